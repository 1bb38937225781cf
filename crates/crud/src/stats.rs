// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! Stats: row counts and progress metrics
//!

use crate::CrudError;
use crate::crud::fetch_dated_sets_for_exercise;
use chrono::NaiveDate;
use monolift_core::progress::{
    self, OneRmPoint, WeeklyVolume, estimated_one_rm, one_rm_points, weekly_volumes,
};
use monolift_core::MonoliftId;
use serde::Serialize;
use sqlx::Row;
use sqlx::Sqlite;
use sqlx::Transaction;

/// Each variant maps to a table in the database
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum Table {
    /// Represents the `exercises` table
    Exercises,

    /// Represents the `templates` table
    Templates,

    /// Represents the `template_exercises` table
    TemplateExercises,

    /// Represents the `sessions` table
    Sessions,

    /// Represents the `sets` table
    Sets,

    /// Represents the `rest_logs` table
    RestLogs,
}

/// Holds database row counts
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct DatabaseRowCount {
    /// The number of rows in the `exercises` table
    pub exercises: i64,

    /// The number of rows in the `templates` table
    pub templates: i64,

    /// The number of rows in the `template_exercises` table
    pub template_exercises: i64,

    /// The number of rows in the `sessions` table
    pub sessions: i64,

    /// The number of rows in the `sets` table
    pub sets: i64,

    /// The number of rows in the `rest_logs` table
    pub rest_logs: i64,
}

impl DatabaseRowCount {
    /// Fetch the row count for all tables in the database
    pub async fn all(transaction: &mut Transaction<'_, Sqlite>) -> Result<Self, CrudError> {
        Ok(Self {
            exercises: Self::table(transaction, Table::Exercises).await?,
            templates: Self::table(transaction, Table::Templates).await?,
            template_exercises: Self::table(transaction, Table::TemplateExercises).await?,
            sessions: Self::table(transaction, Table::Sessions).await?,
            sets: Self::table(transaction, Table::Sets).await?,
            rest_logs: Self::table(transaction, Table::RestLogs).await?,
        })
    }

    /// Get the row count for a specific table in the database
    pub async fn table(
        transaction: &mut Transaction<'_, Sqlite>,
        table_name: Table,
    ) -> Result<i64, CrudError> {
        let table_name = match table_name {
            Table::Exercises => "exercises",
            Table::Templates => "templates",
            Table::TemplateExercises => "template_exercises",
            Table::Sessions => "sessions",
            Table::Sets => "sets",
            Table::RestLogs => "rest_logs",
        };

        let row = sqlx::query(&format!("SELECT COUNT(*) AS row_count FROM {table_name}"))
            .fetch_one(&mut **transaction)
            .await?;
        Ok(row.get("row_count"))
    }
}

/// The headline numbers shown for one exercise
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ExerciseStats {
    /// The best estimated 1RM across every logged set (if any)
    pub best_one_rm: Option<f64>,

    /// Total volume (reps x load) across every logged set
    pub total_volume: f64,

    /// How many sets have been logged
    pub total_sets: usize,

    /// Mean reps per set (if any sets are logged)
    pub average_reps: Option<f64>,
}

/// Compute the headline stats for an exercise from its logged sets
pub async fn exercise_stats(
    transaction: &mut Transaction<'_, Sqlite>,
    exercise_id: &MonoliftId,
) -> Result<ExerciseStats, CrudError> {
    let dated_sets = fetch_dated_sets_for_exercise(transaction, exercise_id).await?;
    let sets: Vec<_> = dated_sets.into_iter().map(|(_, set)| set).collect();

    Ok(ExerciseStats {
        best_one_rm: progress::best_set(&sets)
            .map(|set| estimated_one_rm(set.reps(), set.load())),
        total_volume: progress::total_volume(&sets),
        total_sets: sets.len(),
        average_reps: progress::average_reps(&sets),
    })
}

/// The best estimated 1RM per day for an exercise, oldest first.  Feeds the
/// 1RM progress chart.
pub async fn one_rm_series(
    transaction: &mut Transaction<'_, Sqlite>,
    exercise_id: &MonoliftId,
) -> Result<Vec<OneRmPoint>, CrudError> {
    let dated_sets = fetch_dated_sets_for_exercise(transaction, exercise_id).await?;
    Ok(one_rm_points(&dated_sets))
}

/// Total volume per Sunday-start week for an exercise, oldest first.  Sets
/// logged before `since` (when given) are left out.  Feeds the weekly volume
/// chart.
pub async fn weekly_volume_series(
    transaction: &mut Transaction<'_, Sqlite>,
    exercise_id: &MonoliftId,
    since: Option<NaiveDate>,
) -> Result<Vec<WeeklyVolume>, CrudError> {
    let mut dated_sets = fetch_dated_sets_for_exercise(transaction, exercise_id).await?;
    if let Some(since) = since {
        dated_sets.retain(|(date, _)| *date >= since);
    }
    Ok(weekly_volumes(&dated_sets))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test::{catalog_exercise, logged_session};
    use monolift_core::BodyCategory;
    use sqlx::{Pool, Sqlite};

    #[sqlx::test]
    async fn row_counts_reflect_logged_data(pool: Pool<Sqlite>) {
        let mut transaction = pool.begin().await.unwrap();

        let bench = catalog_exercise(&mut transaction, "Bench Press", BodyCategory::Chest).await;
        logged_session(
            &mut transaction,
            bench,
            "2024-06-10T18:00:00Z",
            &[(5, 180.0), (5, 180.0)],
        )
        .await;

        let counts = DatabaseRowCount::all(&mut transaction).await.unwrap();
        assert_eq!(counts.exercises, 1);
        assert_eq!(counts.sessions, 1);
        assert_eq!(counts.sets, 2);
        assert_eq!(counts.templates, 0);
        assert_eq!(counts.rest_logs, 0);
    }

    #[sqlx::test]
    async fn exercise_stats_match_the_logged_sets(pool: Pool<Sqlite>) {
        let mut transaction = pool.begin().await.unwrap();

        let bench = catalog_exercise(&mut transaction, "Bench Press", BodyCategory::Chest).await;
        logged_session(
            &mut transaction,
            bench,
            "2024-06-10T18:00:00Z",
            &[(5, 100.0), (8, 80.0)],
        )
        .await;

        let stats = exercise_stats(&mut transaction, &bench).await.unwrap();
        assert_eq!(stats.total_sets, 2);
        assert_eq!(stats.total_volume, 500.0 + 640.0);
        assert_eq!(stats.average_reps, Some(6.5));
        assert_eq!(stats.best_one_rm, Some(estimated_one_rm(5, 100.0)));
    }

    #[sqlx::test]
    async fn series_are_per_day_and_per_week(pool: Pool<Sqlite>) {
        let mut transaction = pool.begin().await.unwrap();

        let bench = catalog_exercise(&mut transaction, "Bench Press", BodyCategory::Chest).await;
        logged_session(
            &mut transaction,
            bench,
            "2024-06-10T18:00:00Z",
            &[(5, 100.0), (3, 110.0)],
        )
        .await;
        logged_session(&mut transaction, bench, "2024-06-12T18:00:00Z", &[(5, 105.0)]).await;

        let series = one_rm_series(&mut transaction, &bench).await.unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].one_rm, estimated_one_rm(3, 110.0));

        // Both sessions fall in the same Sunday-start week
        let volumes = weekly_volume_series(&mut transaction, &bench, None)
            .await
            .unwrap();
        assert_eq!(volumes.len(), 1);
        assert_eq!(volumes[0].week, "2024-06-09".parse().unwrap());
        assert_eq!(volumes[0].volume, 500.0 + 330.0 + 525.0);

        // A cutoff after the first session leaves only the second
        let recent = weekly_volume_series(
            &mut transaction,
            &bench,
            Some("2024-06-11".parse().unwrap()),
        )
        .await
        .unwrap();
        assert_eq!(recent[0].volume, 525.0);
    }
}
