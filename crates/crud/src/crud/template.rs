// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! All CRUD functionality for workout templates
//!

use crate::crud::common::*;
use chrono::{DateTime, Utc};
use monolift_core::{HasIdAndName, MonoliftId, Name, TemplateExercise, WorkoutTemplate};
use sqlx::{Row, Sqlite, Transaction};

/// Whether a template with the given ID exists
pub async fn is_template_id_in_db(
    transaction: &mut Transaction<'_, Sqlite>,
    id: &MonoliftId,
) -> Result<bool, CrudError> {
    let row = sqlx::query("SELECT COUNT(*) AS row_count FROM templates WHERE id = ?")
        .bind(*id)
        .fetch_one(&mut **transaction)
        .await?;
    let count: i64 = row.try_get("row_count")?;
    Ok(count > 0)
}

/// Look up a template's ID from its name
pub async fn template_id_from_name(
    transaction: &mut Transaction<'_, Sqlite>,
    name: &Name,
) -> Result<MonoliftId, CrudError> {
    let row = sqlx::query("SELECT id FROM templates WHERE name = ?")
        .bind(name.clone())
        .fetch_optional(&mut **transaction)
        .await?;
    match row {
        Some(row) => Ok(row.try_get("id")?),
        None => Err(CrudError::NameNotInDb),
    }
}

/// Insert a template's planned exercises
async fn insert_template_exercises(
    transaction: &mut Transaction<'_, Sqlite>,
    template_id: &MonoliftId,
    exercises: &[TemplateExercise],
) -> Result<(), CrudError> {
    for exercise in exercises {
        let row_id = exercise.id().unwrap_or_else(MonoliftId::new);
        sqlx::query(
            r#"
            INSERT INTO template_exercises
            (id, template_id, exercise_id, display_order, target_sets, target_reps)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(row_id)
        .bind(*template_id)
        .bind(exercise.exercise_id())
        .bind(exercise.display_order())
        .bind(exercise.target_sets())
        .bind(exercise.target_reps())
        .execute(&mut **transaction)
        .await?;
    }
    Ok(())
}

/// Fetch a template's planned exercises, in display order
async fn fetch_template_exercises(
    transaction: &mut Transaction<'_, Sqlite>,
    template_id: &MonoliftId,
) -> Result<Vec<TemplateExercise>, CrudError> {
    let rows = sqlx::query(
        r#"
        SELECT id, exercise_id, display_order, target_sets, target_reps
        FROM template_exercises
        WHERE template_id = ?
        ORDER BY display_order
        "#,
    )
    .bind(*template_id)
    .fetch_all(&mut **transaction)
    .await?;

    let mut exercises = Vec::with_capacity(rows.len());
    for row in rows {
        exercises.push(
            TemplateExercise::from(
                Some(row.try_get("id")?),
                row.try_get("exercise_id")?,
                row.try_get("display_order")?,
                row.try_get("target_sets")?,
                row.try_get("target_reps")?,
            )
            .map_err(|_| CrudError::Template)?,
        );
    }
    Ok(exercises)
}

impl Create for WorkoutTemplate {
    /// Create a [`WorkoutTemplate`] and its planned exercises in the database
    async fn create(&mut self, transaction: &mut Transaction<'_, Sqlite>) -> Result<(), CrudError> {
        if self.id().is_none() {
            self.set_id(MonoliftId::new());
        }
        let template_id = self.id().unwrap();

        sqlx::query(
            r#"
            INSERT INTO templates (id, name, days_per_week, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(template_id)
        .bind(self.name().clone())
        .bind(u32::from(self.days_per_week()))
        .bind(self.created_at())
        .bind(self.updated_at())
        .execute(&mut **transaction)
        .await
        .map_err(|error| {
            if let Some(db_err) = error.as_database_error() {
                if db_err.is_unique_violation() {
                    return CrudError::TemplateNameAlreadyInUse(self.name().clone());
                }
            }
            error.into()
        })?;

        insert_template_exercises(transaction, &template_id, self.exercises()).await?;
        Ok(())
    }
}

impl FetchById for WorkoutTemplate {
    async fn fetch_by_id(
        transaction: &mut Transaction<'_, Sqlite>,
        id: &MonoliftId,
    ) -> Result<Self, CrudError> {
        let row = sqlx::query(
            "SELECT id, name, days_per_week, created_at, updated_at FROM templates WHERE id = ?",
        )
        .bind(*id)
        .fetch_optional(&mut **transaction)
        .await?;
        let Some(row) = row else {
            return Err(CrudError::IdNotInDb);
        };

        let days_per_week: u32 = row.try_get("days_per_week")?;
        let created_at: DateTime<Utc> = row.try_get("created_at")?;
        let updated_at: DateTime<Utc> = row.try_get("updated_at")?;
        let exercises = fetch_template_exercises(transaction, id).await?;

        WorkoutTemplate::from(
            Some(*id),
            row.try_get("name")?,
            days_per_week as u8,
            created_at,
            updated_at,
            exercises,
        )
        .map_err(|_| CrudError::Template)
    }
}

impl FetchByName for WorkoutTemplate {
    async fn fetch_by_name(
        transaction: &mut Transaction<'_, Sqlite>,
        name: &Name,
    ) -> Result<Self, CrudError> {
        let id = template_id_from_name(transaction, name).await?;
        WorkoutTemplate::fetch_by_id(transaction, &id).await
    }
}

impl Update for WorkoutTemplate {
    /// Update a template.  The planned exercise list is replaced wholesale.
    async fn update(&mut self, transaction: &mut Transaction<'_, Sqlite>) -> Result<(), CrudError> {
        let Some(template_id) = self.id() else {
            return Err(CrudError::IdNotSet);
        };
        if !is_template_id_in_db(transaction, &template_id).await? {
            return Err(CrudError::IdNotInDb);
        }

        sqlx::query(
            "UPDATE templates SET name = ?, days_per_week = ?, updated_at = ? WHERE id = ?",
        )
        .bind(self.name().clone())
        .bind(u32::from(self.days_per_week()))
        .bind(self.updated_at())
        .bind(template_id)
        .execute(&mut **transaction)
        .await?;

        sqlx::query("DELETE FROM template_exercises WHERE template_id = ?")
            .bind(template_id)
            .execute(&mut **transaction)
            .await?;
        insert_template_exercises(transaction, &template_id, self.exercises()).await?;
        Ok(())
    }
}

impl DeleteById for WorkoutTemplate {
    /// Delete a template.  Sessions logged from it are kept; their template
    /// reference is cleared.
    async fn delete_by_id(
        transaction: &mut Transaction<'_, Sqlite>,
        id: &MonoliftId,
    ) -> Result<(), CrudError> {
        if !is_template_id_in_db(transaction, id).await? {
            return Err(CrudError::IdNotInDb);
        }

        sqlx::query("UPDATE sessions SET template_id = NULL WHERE template_id = ?")
            .bind(*id)
            .execute(&mut **transaction)
            .await?;
        sqlx::query("DELETE FROM template_exercises WHERE template_id = ?")
            .bind(*id)
            .execute(&mut **transaction)
            .await?;
        sqlx::query("DELETE FROM templates WHERE id = ?")
            .bind(*id)
            .execute(&mut **transaction)
            .await?;
        Ok(())
    }
}

/// Fetch every template, ordered by name
pub async fn fetch_all_templates(
    transaction: &mut Transaction<'_, Sqlite>,
) -> Result<Vec<WorkoutTemplate>, CrudError> {
    let ids: Vec<MonoliftId> = {
        let rows = sqlx::query("SELECT id FROM templates ORDER BY name")
            .fetch_all(&mut **transaction)
            .await?;
        rows.iter()
            .map(|row| row.try_get("id"))
            .collect::<Result<_, _>>()?
    };

    let mut templates = Vec::with_capacity(ids.len());
    for id in ids {
        templates.push(WorkoutTemplate::fetch_by_id(transaction, &id).await?);
    }
    Ok(templates)
}
