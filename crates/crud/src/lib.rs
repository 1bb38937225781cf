// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! *Part of the wider Monolift project*
//!
//! This library crate is responsible for all database interactions and
//! management for the Monolift project.  It does the following:
//!
//! - Enables CRUD (Create, Read, Update, Delete) operations on the exercise
//! catalog, workout templates, logged sessions, sets, and rest logs
//! - Reports which calendar dates have a logged workout (the data the
//! calendar grid's workout markers run off)
//! - Provides helpers to get table row counts
//! - Computes progress metrics (estimated 1RM series, weekly volume) from
//! logged sets
//! - Backs up, restores & merges every store as JSON files
//! - Seeds the built-in exercise catalog
//! - Reads & writes the user settings file
//!
//! This crate makes use of the basic Monolift `core` crate for primitive
//! types, and is itself used by the `www-api` crate and the CLI tools.
//!

mod backup;
mod crud;
mod db;
mod seed;
mod settings_store;
mod stats;

pub use backup::*;
pub use crud::*;
pub use db::*;
pub use seed::*;
pub use settings_store::*;
pub use stats::*;

#[cfg(test)]
pub mod test {
    use crate::crud::Create;
    use chrono::{DateTime, Utc};
    use monolift_core::{
        BodyCategory, Exercise, ExerciseSet, HasIdAndName, MonoliftId, Name, TemplateExercise,
        WorkoutSession, WorkoutTemplate,
    };
    use sqlx::{Sqlite, Transaction};

    /// Parse an RFC 3339 timestamp for test fixtures
    pub fn test_time(time: &str) -> DateTime<Utc> {
        time.parse().unwrap()
    }

    /// Create a catalog exercise and return its ID
    pub async fn catalog_exercise(
        transaction: &mut Transaction<'_, Sqlite>,
        name: &str,
        category: BodyCategory,
    ) -> MonoliftId {
        let mut exercise = Exercise::from(None, Name::from(name).unwrap(), category, None);
        exercise.create(transaction).await.unwrap();
        exercise.id().unwrap()
    }

    /// Build (but do not persist) a template planning 3x8 of each given
    /// exercise, in the order given
    pub fn sample_template(name: &str, exercise_ids: &[MonoliftId]) -> WorkoutTemplate {
        let created = test_time("2024-06-15T08:00:00Z");
        let exercises = exercise_ids
            .iter()
            .enumerate()
            .map(|(order, id)| TemplateExercise::from(None, *id, order as u32, 3, 8).unwrap())
            .collect();
        WorkoutTemplate::from(
            None,
            Name::from(name).unwrap(),
            3,
            created,
            created,
            exercises,
        )
        .unwrap()
    }

    /// Create a finished session started at `started_at` with the given
    /// (reps, load) sets of one exercise, returning the session's ID
    pub async fn logged_session(
        transaction: &mut Transaction<'_, Sqlite>,
        exercise_id: MonoliftId,
        started_at: &str,
        sets: &[(u32, f64)],
    ) -> MonoliftId {
        let started = test_time(started_at);
        let mut session =
            WorkoutSession::from(None, None, started, None, started, started).unwrap();
        session.create(transaction).await.unwrap();
        let session_id = session.id().unwrap();

        for (index, (reps, load)) in sets.iter().enumerate() {
            let mut set = ExerciseSet::from(
                None,
                session_id,
                exercise_id,
                index as u32,
                *reps,
                *load,
                false,
                None,
            )
            .unwrap();
            set.create(transaction).await.unwrap();
        }
        session_id
    }
}
