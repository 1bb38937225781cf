// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! All CRUD functionality for the exercise catalog
//!

use crate::crud::common::*;
use async_trait::async_trait;
use monolift_core::{BodyCategory, Exercise, HasIdAndName, MonoliftId, Name};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, Sqlite, Transaction};

/// A collection of [`Exercise`]s
#[derive(
    derive_more::IntoIterator,
    derive_more::Index,
    Serialize,
    Deserialize,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
)]
pub struct Exercises(Vec<Exercise>);

impl Exercises {
    /// How many exercises the collection holds
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the collection is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate the exercises
    pub fn iter(&self) -> std::slice::Iter<'_, Exercise> {
        self.0.iter()
    }
}

impl From<Vec<Exercise>> for Exercises {
    fn from(value: Vec<Exercise>) -> Self {
        Exercises(value)
    }
}

/// Build an [`Exercise`] from a fetched `exercises` row
fn exercise_from_row(row: &SqliteRow) -> Result<Exercise, CrudError> {
    let id: MonoliftId = row.try_get("id")?;
    let name: Name = row.try_get("name")?;
    let category: String = row.try_get("category")?;
    let category =
        BodyCategory::parse(&category).ok_or_else(|| CrudError::UnknownCategory(category.clone()))?;
    let variant_of: Option<MonoliftId> = row.try_get("variant_of")?;
    Ok(Exercise::from(Some(id), name, category, variant_of))
}

/// Whether an exercise with the given ID exists
pub async fn is_exercise_id_in_db(
    transaction: &mut Transaction<'_, Sqlite>,
    id: &MonoliftId,
) -> Result<bool, CrudError> {
    let row = sqlx::query("SELECT COUNT(*) AS row_count FROM exercises WHERE id = ?")
        .bind(*id)
        .fetch_one(&mut **transaction)
        .await?;
    let count: i64 = row.try_get("row_count")?;
    Ok(count > 0)
}

/// Look up an exercise's ID from its name
pub async fn exercise_id_from_name(
    transaction: &mut Transaction<'_, Sqlite>,
    name: &Name,
) -> Result<MonoliftId, CrudError> {
    let row = sqlx::query("SELECT id FROM exercises WHERE name = ?")
        .bind(name.clone())
        .fetch_optional(&mut **transaction)
        .await?;
    match row {
        Some(row) => Ok(row.try_get("id")?),
        None => Err(CrudError::NameNotInDb),
    }
}

impl Create for Exercise {
    /// Create an [`Exercise`] in the database
    async fn create(&mut self, transaction: &mut Transaction<'_, Sqlite>) -> Result<(), CrudError> {
        if self.id().is_none() {
            self.set_id(MonoliftId::new());
        }
        let exercise_id = self.id().unwrap();

        sqlx::query("INSERT INTO exercises (id, name, category, variant_of) VALUES (?, ?, ?, ?)")
            .bind(exercise_id)
            .bind(self.name().clone())
            .bind(self.category().as_str())
            .bind(self.variant_of())
            .execute(&mut **transaction)
            .await
            .map_err(|error| {
                if let Some(db_err) = error.as_database_error() {
                    if db_err.is_unique_violation() {
                        return CrudError::ExerciseNameAlreadyInUse(self.name().clone());
                    }
                }
                error.into()
            })?;

        Ok(())
    }
}

impl FetchById for Exercise {
    async fn fetch_by_id(
        transaction: &mut Transaction<'_, Sqlite>,
        id: &MonoliftId,
    ) -> Result<Self, CrudError> {
        let row = sqlx::query("SELECT id, name, category, variant_of FROM exercises WHERE id = ?")
            .bind(*id)
            .fetch_optional(&mut **transaction)
            .await?;
        match row {
            Some(row) => exercise_from_row(&row),
            None => Err(CrudError::IdNotInDb),
        }
    }
}

impl FetchByName for Exercise {
    async fn fetch_by_name(
        transaction: &mut Transaction<'_, Sqlite>,
        name: &Name,
    ) -> Result<Self, CrudError> {
        let id = exercise_id_from_name(transaction, name).await?;
        Exercise::fetch_by_id(transaction, &id).await
    }
}

#[async_trait]
impl FetchAll for Exercises {
    /// Fetch the whole exercise catalog, alphabetically
    async fn fetch_all(transaction: &mut Transaction<'_, Sqlite>) -> Result<Self, CrudError> {
        let rows =
            sqlx::query("SELECT id, name, category, variant_of FROM exercises ORDER BY name")
                .fetch_all(&mut **transaction)
                .await?;
        let exercises: Result<Vec<Exercise>, CrudError> =
            rows.iter().map(exercise_from_row).collect();
        Ok(Exercises(exercises?))
    }
}

impl DeleteById for Exercise {
    /// Delete an exercise.  Variants of the deleted exercise are kept but
    /// stop being variants.
    async fn delete_by_id(
        transaction: &mut Transaction<'_, Sqlite>,
        id: &MonoliftId,
    ) -> Result<(), CrudError> {
        if !is_exercise_id_in_db(transaction, id).await? {
            return Err(CrudError::IdNotInDb);
        }

        sqlx::query("UPDATE exercises SET variant_of = NULL WHERE variant_of = ?")
            .bind(*id)
            .execute(&mut **transaction)
            .await?;
        sqlx::query("DELETE FROM exercises WHERE id = ?")
            .bind(*id)
            .execute(&mut **transaction)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use sqlx::{Pool, Sqlite};

    #[sqlx::test]
    async fn create_fetch_delete_round_trip(pool: Pool<Sqlite>) {
        let mut transaction = pool.begin().await.unwrap();

        let mut bench = Exercise::from(
            None,
            Name::from("Bench Press").unwrap(),
            BodyCategory::Chest,
            None,
        );
        bench.create(&mut transaction).await.unwrap();
        let bench_id = bench.id().unwrap();

        let mut paused = Exercise::from(
            None,
            Name::from("Paused Bench Press").unwrap(),
            BodyCategory::Chest,
            Some(bench_id),
        );
        paused.create(&mut transaction).await.unwrap();

        let fetched = Exercise::fetch_by_id(&mut transaction, &bench_id)
            .await
            .unwrap();
        assert_eq!(fetched, bench);

        let fetched = Exercise::fetch_by_name(&mut transaction, &Name::from("Paused Bench Press").unwrap())
            .await
            .unwrap();
        assert_eq!(fetched.variant_of(), Some(bench_id));

        // Alphabetical catalog order
        let all = Exercises::fetch_all(&mut transaction).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name().as_str(), "Bench Press");

        // Deleting the parent detaches the variant
        Exercise::delete_by_id(&mut transaction, &bench_id)
            .await
            .unwrap();
        let orphan = Exercise::fetch_by_name(&mut transaction, &Name::from("Paused Bench Press").unwrap())
            .await
            .unwrap();
        assert_eq!(orphan.variant_of(), None);
        assert!(
            Exercise::fetch_by_id(&mut transaction, &bench_id)
                .await
                .is_err()
        );
    }

    #[sqlx::test]
    async fn duplicate_names_are_rejected(pool: Pool<Sqlite>) {
        let mut transaction = pool.begin().await.unwrap();

        let mut squat = Exercise::from(None, Name::from("Squat").unwrap(), BodyCategory::Legs, None);
        squat.create(&mut transaction).await.unwrap();

        let mut duplicate =
            Exercise::from(None, Name::from("Squat").unwrap(), BodyCategory::Legs, None);
        let error = duplicate.create(&mut transaction).await.unwrap_err();
        assert_eq!(
            error,
            CrudError::ExerciseNameAlreadyInUse(Name::from("Squat").unwrap())
        );
    }
}
