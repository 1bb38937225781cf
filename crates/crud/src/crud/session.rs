// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! All CRUD functionality for logged sessions, their sets, and rest logs
//!

use crate::crud::common::*;
use chrono::{DateTime, NaiveDate, Utc};
use monolift_core::{ExerciseSet, MonoliftId, RestLog, WorkoutSession};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, Sqlite, Transaction};

/// Whether a session with the given ID exists
pub async fn is_session_id_in_db(
    transaction: &mut Transaction<'_, Sqlite>,
    id: &MonoliftId,
) -> Result<bool, CrudError> {
    let row = sqlx::query("SELECT COUNT(*) AS row_count FROM sessions WHERE id = ?")
        .bind(*id)
        .fetch_one(&mut **transaction)
        .await?;
    let count: i64 = row.try_get("row_count")?;
    Ok(count > 0)
}

/// Build a [`WorkoutSession`] from a fetched `sessions` row
fn session_from_row(row: &SqliteRow) -> Result<WorkoutSession, CrudError> {
    WorkoutSession::from(
        Some(row.try_get("id")?),
        row.try_get("template_id")?,
        row.try_get("started_at")?,
        row.try_get("finished_at")?,
        row.try_get("created_at")?,
        row.try_get("updated_at")?,
    )
    .map_err(|_| CrudError::Session)
}

/// Build an [`ExerciseSet`] from a fetched `sets` row
fn set_from_row(row: &SqliteRow) -> Result<ExerciseSet, CrudError> {
    ExerciseSet::from(
        Some(row.try_get("id")?),
        row.try_get("session_id")?,
        row.try_get("exercise_id")?,
        row.try_get("set_index")?,
        row.try_get("reps")?,
        row.try_get("load")?,
        row.try_get("is_partial")?,
        row.try_get("dropset_of_index")?,
    )
    .map_err(|_| CrudError::Set)
}

impl Create for WorkoutSession {
    /// Create a [`WorkoutSession`] in the database
    async fn create(&mut self, transaction: &mut Transaction<'_, Sqlite>) -> Result<(), CrudError> {
        if self.id().is_none() {
            self.set_id(MonoliftId::new());
        }

        sqlx::query(
            r#"
            INSERT INTO sessions (id, template_id, started_at, finished_at, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(self.id().unwrap())
        .bind(self.template_id())
        .bind(self.started_at())
        .bind(self.finished_at())
        .bind(self.created_at())
        .bind(self.updated_at())
        .execute(&mut **transaction)
        .await?;
        Ok(())
    }
}

impl Update for WorkoutSession {
    /// Update a session (e.g. after it finishes)
    async fn update(&mut self, transaction: &mut Transaction<'_, Sqlite>) -> Result<(), CrudError> {
        let Some(session_id) = self.id() else {
            return Err(CrudError::IdNotSet);
        };
        if !is_session_id_in_db(transaction, &session_id).await? {
            return Err(CrudError::IdNotInDb);
        }

        sqlx::query(
            r#"
            UPDATE sessions
            SET template_id = ?, started_at = ?, finished_at = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(self.template_id())
        .bind(self.started_at())
        .bind(self.finished_at())
        .bind(self.updated_at())
        .bind(session_id)
        .execute(&mut **transaction)
        .await?;
        Ok(())
    }
}

impl FetchById for WorkoutSession {
    async fn fetch_by_id(
        transaction: &mut Transaction<'_, Sqlite>,
        id: &MonoliftId,
    ) -> Result<Self, CrudError> {
        let row = sqlx::query(
            r#"
            SELECT id, template_id, started_at, finished_at, created_at, updated_at
            FROM sessions
            WHERE id = ?
            "#,
        )
        .bind(*id)
        .fetch_optional(&mut **transaction)
        .await?;
        match row {
            Some(row) => session_from_row(&row),
            None => Err(CrudError::IdNotInDb),
        }
    }
}

impl DeleteById for WorkoutSession {
    /// Delete a session and everything logged within it
    async fn delete_by_id(
        transaction: &mut Transaction<'_, Sqlite>,
        id: &MonoliftId,
    ) -> Result<(), CrudError> {
        if !is_session_id_in_db(transaction, id).await? {
            return Err(CrudError::IdNotInDb);
        }

        sqlx::query("DELETE FROM sets WHERE session_id = ?")
            .bind(*id)
            .execute(&mut **transaction)
            .await?;
        sqlx::query("DELETE FROM rest_logs WHERE session_id = ?")
            .bind(*id)
            .execute(&mut **transaction)
            .await?;
        sqlx::query("DELETE FROM sessions WHERE id = ?")
            .bind(*id)
            .execute(&mut **transaction)
            .await?;
        Ok(())
    }
}

/// Fetch every session, oldest first
pub async fn fetch_all_sessions(
    transaction: &mut Transaction<'_, Sqlite>,
) -> Result<Vec<WorkoutSession>, CrudError> {
    let rows = sqlx::query(
        r#"
        SELECT id, template_id, started_at, finished_at, created_at, updated_at
        FROM sessions
        ORDER BY started_at
        "#,
    )
    .fetch_all(&mut **transaction)
    .await?;
    rows.iter().map(session_from_row).collect()
}

impl Create for ExerciseSet {
    /// Log a set within a session
    async fn create(&mut self, transaction: &mut Transaction<'_, Sqlite>) -> Result<(), CrudError> {
        if self.id().is_none() {
            self.set_id(MonoliftId::new());
        }

        sqlx::query(
            r#"
            INSERT INTO sets
            (id, session_id, exercise_id, set_index, reps, load, is_partial, dropset_of_index)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(self.id().unwrap())
        .bind(self.session_id())
        .bind(self.exercise_id())
        .bind(self.set_index())
        .bind(self.reps())
        .bind(self.load())
        .bind(self.is_partial())
        .bind(self.dropset_of_index())
        .execute(&mut **transaction)
        .await?;
        Ok(())
    }
}

/// Fetch the sets logged in a session, in set order
pub async fn fetch_sets_for_session(
    transaction: &mut Transaction<'_, Sqlite>,
    session_id: &MonoliftId,
) -> Result<Vec<ExerciseSet>, CrudError> {
    let rows = sqlx::query(
        r#"
        SELECT id, session_id, exercise_id, set_index, reps, load, is_partial, dropset_of_index
        FROM sets
        WHERE session_id = ?
        ORDER BY set_index
        "#,
    )
    .bind(*session_id)
    .fetch_all(&mut **transaction)
    .await?;
    rows.iter().map(set_from_row).collect()
}

/// Fetch every set logged for an exercise, paired with the calendar date of
/// the session it was logged in.  This is what the progress charts run off.
pub async fn fetch_dated_sets_for_exercise(
    transaction: &mut Transaction<'_, Sqlite>,
    exercise_id: &MonoliftId,
) -> Result<Vec<(NaiveDate, ExerciseSet)>, CrudError> {
    let rows = sqlx::query(
        r#"
        SELECT
            sets.id, sets.session_id, sets.exercise_id, sets.set_index,
            sets.reps, sets.load, sets.is_partial, sets.dropset_of_index,
            sessions.started_at
        FROM sets
        JOIN sessions ON sets.session_id = sessions.id
        WHERE sets.exercise_id = ?
        ORDER BY sessions.started_at, sets.set_index
        "#,
    )
    .bind(*exercise_id)
    .fetch_all(&mut **transaction)
    .await?;

    let mut dated_sets = Vec::with_capacity(rows.len());
    for row in &rows {
        let started_at: DateTime<Utc> = row.try_get("started_at")?;
        dated_sets.push((started_at.date_naive(), set_from_row(row)?));
    }
    Ok(dated_sets)
}

/// Fetch every set in the database (used by backups)
pub async fn fetch_all_sets(
    transaction: &mut Transaction<'_, Sqlite>,
) -> Result<Vec<ExerciseSet>, CrudError> {
    let rows = sqlx::query(
        r#"
        SELECT id, session_id, exercise_id, set_index, reps, load, is_partial, dropset_of_index
        FROM sets
        ORDER BY session_id, set_index
        "#,
    )
    .fetch_all(&mut **transaction)
    .await?;
    rows.iter().map(set_from_row).collect()
}

impl Create for RestLog {
    /// Log a rest period within a session
    async fn create(&mut self, transaction: &mut Transaction<'_, Sqlite>) -> Result<(), CrudError> {
        if self.id().is_none() {
            self.set_id(MonoliftId::new());
        }

        sqlx::query(
            "INSERT INTO rest_logs (id, session_id, set_index, seconds) VALUES (?, ?, ?, ?)",
        )
        .bind(self.id().unwrap())
        .bind(self.session_id())
        .bind(self.set_index())
        .bind(self.seconds())
        .execute(&mut **transaction)
        .await?;
        Ok(())
    }
}

/// Fetch the rest periods logged in a session, in set order
pub async fn fetch_rest_logs_for_session(
    transaction: &mut Transaction<'_, Sqlite>,
    session_id: &MonoliftId,
) -> Result<Vec<RestLog>, CrudError> {
    let rows = sqlx::query(
        r#"
        SELECT id, session_id, set_index, seconds
        FROM rest_logs
        WHERE session_id = ?
        ORDER BY set_index
        "#,
    )
    .bind(*session_id)
    .fetch_all(&mut **transaction)
    .await?;

    let mut rest_logs = Vec::with_capacity(rows.len());
    for row in &rows {
        rest_logs.push(RestLog::from(
            Some(row.try_get("id")?),
            row.try_get("session_id")?,
            row.try_get("set_index")?,
            row.try_get("seconds")?,
        ));
    }
    Ok(rest_logs)
}

/// Fetch every rest log in the database (used by backups)
pub async fn fetch_all_rest_logs(
    transaction: &mut Transaction<'_, Sqlite>,
) -> Result<Vec<RestLog>, CrudError> {
    let rows = sqlx::query(
        "SELECT id, session_id, set_index, seconds FROM rest_logs ORDER BY session_id, set_index",
    )
    .fetch_all(&mut **transaction)
    .await?;

    let mut rest_logs = Vec::with_capacity(rows.len());
    for row in &rows {
        rest_logs.push(RestLog::from(
            Some(row.try_get("id")?),
            row.try_get("session_id")?,
            row.try_get("set_index")?,
            row.try_get("seconds")?,
        ));
    }
    Ok(rest_logs)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test::{catalog_exercise, logged_session, test_time};
    use monolift_core::BodyCategory;
    use sqlx::{Pool, Sqlite};

    #[sqlx::test]
    async fn session_with_sets_and_rest_round_trips(pool: Pool<Sqlite>) {
        let mut transaction = pool.begin().await.unwrap();

        let bench = catalog_exercise(&mut transaction, "Bench Press", BodyCategory::Chest).await;
        let session_id = logged_session(
            &mut transaction,
            bench,
            "2024-06-15T18:00:00Z",
            &[(5, 185.0), (5, 185.0), (3, 205.0)],
        )
        .await;

        let sets = fetch_sets_for_session(&mut transaction, &session_id)
            .await
            .unwrap();
        assert_eq!(sets.len(), 3);
        assert_eq!(sets[0].set_index(), 0);
        assert_eq!(sets[2].reps(), 3);
        assert_eq!(sets[2].load(), 205.0);

        let mut rest = RestLog::from(None, session_id, 0, 120);
        rest.create(&mut transaction).await.unwrap();
        let rest_logs = fetch_rest_logs_for_session(&mut transaction, &session_id)
            .await
            .unwrap();
        assert_eq!(rest_logs.len(), 1);
        assert_eq!(rest_logs[0].seconds(), 120);
    }

    #[sqlx::test]
    async fn finishing_a_session_persists(pool: Pool<Sqlite>) {
        let mut transaction = pool.begin().await.unwrap();

        let started = test_time("2024-06-15T18:00:00Z");
        let mut session = WorkoutSession::from(None, None, started, None, started, started).unwrap();
        session.create(&mut transaction).await.unwrap();

        session.finish(test_time("2024-06-15T19:10:00Z")).unwrap();
        session.update(&mut transaction).await.unwrap();

        let fetched = WorkoutSession::fetch_by_id(&mut transaction, &session.id().unwrap())
            .await
            .unwrap();
        assert_eq!(fetched.finished_at(), Some(test_time("2024-06-15T19:10:00Z")));
    }

    #[sqlx::test]
    async fn deleting_a_session_removes_its_sets_and_rest_logs(pool: Pool<Sqlite>) {
        let mut transaction = pool.begin().await.unwrap();

        let bench = catalog_exercise(&mut transaction, "Bench Press", BodyCategory::Chest).await;
        let session_id = logged_session(
            &mut transaction,
            bench,
            "2024-06-15T18:00:00Z",
            &[(5, 185.0)],
        )
        .await;
        let mut rest = RestLog::from(None, session_id, 0, 90);
        rest.create(&mut transaction).await.unwrap();

        WorkoutSession::delete_by_id(&mut transaction, &session_id)
            .await
            .unwrap();

        assert!(fetch_all_sessions(&mut transaction).await.unwrap().is_empty());
        assert!(fetch_all_sets(&mut transaction).await.unwrap().is_empty());
        assert!(
            fetch_all_rest_logs(&mut transaction)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[sqlx::test]
    async fn dated_sets_pair_each_set_with_its_session_date(pool: Pool<Sqlite>) {
        let mut transaction = pool.begin().await.unwrap();

        let bench = catalog_exercise(&mut transaction, "Bench Press", BodyCategory::Chest).await;
        logged_session(&mut transaction, bench, "2024-06-10T18:00:00Z", &[(5, 180.0)]).await;
        logged_session(&mut transaction, bench, "2024-06-12T18:00:00Z", &[(5, 185.0)]).await;

        let dated = fetch_dated_sets_for_exercise(&mut transaction, &bench)
            .await
            .unwrap();
        assert_eq!(dated.len(), 2);
        assert_eq!(dated[0].0, "2024-06-10".parse::<NaiveDate>().unwrap());
        assert_eq!(dated[1].0, "2024-06-12".parse::<NaiveDate>().unwrap());
        assert_eq!(dated[1].1.load(), 185.0);
    }
}
