// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! Backup, restore & merge every Monolift store to & from JSON
//!

use crate::crud::{
    Create, CrudError, Exercises, FetchAll, fetch_all_rest_logs, fetch_all_sessions,
    fetch_all_sets, fetch_all_templates,
};
use log::warn;
use monolift_core::{Exercise, ExerciseSet, HasIdAndName, MonoliftId, RestLog, WorkoutSession, WorkoutTemplate};
use serde::Serialize;
use serde::de::DeserializeOwned;
use sqlx::{Row, Sqlite, Transaction};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// One JSON file per store, named the way the original cloud blobs were
pub const EXERCISES_FILE: &str = "exercises.json";
pub const TEMPLATES_FILE: &str = "workout-templates.json";
pub const SESSIONS_FILE: &str = "workout-sessions.json";
pub const SETS_FILE: &str = "exercise-sets.json";
pub const REST_LOGS_FILE: &str = "rest-logs.json";

/// Possible operations & used to indicate success
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum BackupMergeRestore {
    /// Used to indicate we want to backup every store
    Backup,

    /// Used to indicate we want to merge in stores from JSON
    Merge,

    /// Used to indicate we want to restore the database
    Restore,
}

/// Errors that can occur when backing up/merging in/restoring Monolift
/// databases
#[derive(Debug, Error)]
pub enum BackupRestoreMergeError {
    /// A CRUD error occurred
    #[error(transparent)]
    CrudError(#[from] CrudError),

    /// An error occurred when working with the backup/merge/restore dir or
    /// files
    #[error(transparent)]
    StdIo(#[from] std::io::Error),

    /// A database error occurred in this module (database errors elsewhere
    /// will be returned as a `CrudError`)
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    /// A JSON error occurred (most likely when reading a JSON file)
    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),
}

/// Backup every store to JSON files in the given dir
pub async fn backup(
    transaction: &mut Transaction<'_, Sqlite>,
    backup_dir_path: PathBuf,
) -> Result<(), BackupRestoreMergeError> {
    backup_or_restore_or_merge(transaction, backup_dir_path, BackupMergeRestore::Backup).await
}

/// Merge the JSON files in the given dir into the database
pub async fn merge(
    transaction: &mut Transaction<'_, Sqlite>,
    merge_dir_path: PathBuf,
) -> Result<(), BackupRestoreMergeError> {
    backup_or_restore_or_merge(transaction, merge_dir_path, BackupMergeRestore::Merge).await
}

/// Restore the database from the JSON files in the given dir
pub async fn restore(
    transaction: &mut Transaction<'_, Sqlite>,
    restore_dir_path: PathBuf,
) -> Result<(), BackupRestoreMergeError> {
    backup_or_restore_or_merge(transaction, restore_dir_path, BackupMergeRestore::Restore).await
}

/// Backup, merge, or restore a database
async fn backup_or_restore_or_merge(
    transaction: &mut Transaction<'_, Sqlite>,
    dir_path: PathBuf,
    backup_merge_restore: BackupMergeRestore,
) -> Result<(), BackupRestoreMergeError> {
    match backup_merge_restore {
        BackupMergeRestore::Backup => backup_all(transaction, &dir_path).await,
        BackupMergeRestore::Merge => merge_all(transaction, &dir_path).await,
        BackupMergeRestore::Restore => {
            clear_db(transaction).await?;
            merge_all(transaction, &dir_path).await
        }
    }
}

/// Write every store to its JSON file
async fn backup_all(
    transaction: &mut Transaction<'_, Sqlite>,
    dir: &Path,
) -> Result<(), BackupRestoreMergeError> {
    let exercises = Exercises::fetch_all(transaction).await?;
    write_store(&dir.join(EXERCISES_FILE), &exercises)?;

    let templates = fetch_all_templates(transaction).await?;
    write_store(&dir.join(TEMPLATES_FILE), &templates)?;

    let sessions = fetch_all_sessions(transaction).await?;
    write_store(&dir.join(SESSIONS_FILE), &sessions)?;

    let sets = fetch_all_sets(transaction).await?;
    write_store(&dir.join(SETS_FILE), &sets)?;

    let rest_logs = fetch_all_rest_logs(transaction).await?;
    write_store(&dir.join(REST_LOGS_FILE), &rest_logs)?;

    Ok(())
}

/// Merge every store's JSON file into the database.  Stores are merged in
/// reference order (catalog first, rest logs last) so merged rows always find
/// what they point at.
async fn merge_all(
    transaction: &mut Transaction<'_, Sqlite>,
    dir: &Path,
) -> Result<(), BackupRestoreMergeError> {
    let exercises: Vec<Exercise> = read_store(&dir.join(EXERCISES_FILE))?;
    for mut exercise in exercises {
        if id_exists(transaction, "exercises", exercise.id()).await? {
            warn!("Skipping exercise '{}': ID already in use", exercise.name());
            continue;
        }
        exercise.create(transaction).await?;
    }

    let templates: Vec<WorkoutTemplate> = read_store(&dir.join(TEMPLATES_FILE))?;
    for mut template in templates {
        if id_exists(transaction, "templates", template.id()).await? {
            warn!("Skipping template '{}': ID already in use", template.name());
            continue;
        }
        template.create(transaction).await?;
    }

    let sessions: Vec<WorkoutSession> = read_store(&dir.join(SESSIONS_FILE))?;
    for mut session in sessions {
        if id_exists(transaction, "sessions", session.id()).await? {
            warn!("Skipping a session: ID already in use");
            continue;
        }
        session.create(transaction).await?;
    }

    let sets: Vec<ExerciseSet> = read_store(&dir.join(SETS_FILE))?;
    for mut set in sets {
        if id_exists(transaction, "sets", set.id()).await? {
            warn!("Skipping a set: ID already in use");
            continue;
        }
        set.create(transaction).await?;
    }

    let rest_logs: Vec<RestLog> = read_store(&dir.join(REST_LOGS_FILE))?;
    for mut rest_log in rest_logs {
        if id_exists(transaction, "rest_logs", rest_log.id()).await? {
            warn!("Skipping a rest log: ID already in use");
            continue;
        }
        rest_log.create(transaction).await?;
    }

    Ok(())
}

/// Delete every row in every store, in reference order
async fn clear_db(
    transaction: &mut Transaction<'_, Sqlite>,
) -> Result<(), BackupRestoreMergeError> {
    for table in [
        "rest_logs",
        "sets",
        "sessions",
        "template_exercises",
        "templates",
        "exercises",
    ] {
        sqlx::query(&format!("DELETE FROM {table}"))
            .execute(&mut **transaction)
            .await?;
    }
    Ok(())
}

/// Whether a row with the given ID exists in the given table
async fn id_exists(
    transaction: &mut Transaction<'_, Sqlite>,
    table: &str,
    id: Option<MonoliftId>,
) -> Result<bool, BackupRestoreMergeError> {
    let Some(id) = id else {
        return Ok(false);
    };
    let row = sqlx::query(&format!(
        "SELECT COUNT(*) AS row_count FROM {table} WHERE id = ?"
    ))
    .bind(id)
    .fetch_one(&mut **transaction)
    .await?;
    Ok(row.get::<i64, _>("row_count") > 0)
}

/// Serialise a store to pretty JSON at the given path
fn write_store<T: Serialize>(path: &Path, store: &T) -> Result<(), BackupRestoreMergeError> {
    let json = serde_json::to_string_pretty(store)?;
    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Read a store's JSON file.  A missing file reads as an empty store, so
/// partial backup dirs merge cleanly.
fn read_store<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, BackupRestoreMergeError> {
    if !path.exists() {
        warn!("No data found at {}, skipping", path.to_string_lossy());
        return Ok(Vec::new());
    }
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}
