// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! CRUD traits and errors
//!

use async_trait::async_trait;
use monolift_core::Name;
use serde::{Deserialize, Serialize};
use sqlx::{Sqlite, Transaction};
use thiserror::Error;

/// Alias of u64
pub type RowsAffected = u64;

/// Used to limit the number of things fetched/returned.
///
/// Can easily be destructured, e.g.:
///
/// ```
/// use monolift_crud::Limit;
///
/// fn my_func(Limit(limit): Limit) {
///     println!("Limit is {}", limit);
/// }
/// ```
#[derive(Serialize, Deserialize, Hash, PartialEq, Eq, Debug, Clone)]
pub struct Limit(pub u32);

/// Implementing types can fetch all instances
#[allow(async_fn_in_trait)]
#[async_trait]
pub trait FetchAll: Sized + Send {
    async fn fetch_all(transaction: &mut Transaction<'_, Sqlite>) -> Result<Self, CrudError>;
}

/// Implementing types can be fetched using their [`MonoliftId`]
///
/// [`MonoliftId`]: monolift_core::MonoliftId
#[allow(async_fn_in_trait)]
pub trait FetchById: Sized {
    /// Fetch the thing using its ID
    async fn fetch_by_id(
        transaction: &mut Transaction<'_, Sqlite>,
        id: &monolift_core::MonoliftId,
    ) -> Result<Self, CrudError>;
}

/// Implementing types can be fetched using their [`Name`]
#[allow(async_fn_in_trait)]
pub trait FetchByName: Sized {
    /// Fetch the thing using its [`Name`]
    async fn fetch_by_name(
        transaction: &mut Transaction<'_, Sqlite>,
        name: &Name,
    ) -> Result<Self, CrudError>;
}

/// Implementing types can be deleted using their [`MonoliftId`]
///
/// [`MonoliftId`]: monolift_core::MonoliftId
#[allow(async_fn_in_trait)]
pub trait DeleteById {
    /// Delete the thing using its ID
    async fn delete_by_id(
        transaction: &mut Transaction<'_, Sqlite>,
        id: &monolift_core::MonoliftId,
    ) -> Result<(), CrudError>;
}

/// Implementing types can be created in the database
#[allow(async_fn_in_trait)]
pub trait Create {
    /// Create the data in the database
    async fn create(&mut self, transaction: &mut Transaction<'_, Sqlite>) -> Result<(), CrudError>;
}

/// Implementing types can be updated in the database
#[allow(async_fn_in_trait)]
pub trait Update {
    async fn update(&mut self, transaction: &mut Transaction<'_, Sqlite>) -> Result<(), CrudError>;
}

/// All errors that could occur when running CRUD operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CrudError {
    #[error("The ID field is not set")]
    IdNotSet,

    #[error("The exercise's name ('{0}') is already in use")]
    ExerciseNameAlreadyInUse(Name),

    #[error("The template's name ('{0}') is already in use")]
    TemplateNameAlreadyInUse(Name),

    #[error("Unknown body category `{0}`")]
    UnknownCategory(String),

    #[error("Name error")]
    Name,

    #[error("Template error")]
    Template,

    #[error("Session error")]
    Session,

    #[error("Set error")]
    Set,

    #[error("Not unique in the database: {0}")]
    NotUniqueInDb(String),

    #[error("SQLx database error: {0}")]
    SqlxDbError(String),

    #[error("The ID is not in the database")]
    IdNotInDb,

    #[error("The name is not in the database")]
    NameNotInDb,

    #[error("IO error: {0}")]
    Io(String),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("Database migration error: {0}")]
    DbMigrate(String),
}

impl From<sqlx::Error> for CrudError {
    fn from(value: sqlx::Error) -> Self {
        if let Some(db_err) = value.as_database_error() {
            if db_err.is_unique_violation() {
                return CrudError::NotUniqueInDb(db_err.message().to_string());
            }
        }

        Self::SqlxDbError(value.to_string())
    }
}

impl From<std::io::Error> for CrudError {
    fn from(value: std::io::Error) -> Self {
        CrudError::Io(value.to_string())
    }
}

impl From<serde_json::Error> for CrudError {
    fn from(value: serde_json::Error) -> Self {
        CrudError::Json(value.to_string())
    }
}
