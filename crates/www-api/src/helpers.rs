// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! Generic helpers
//!

use crate::ApiError;
use axum::Json;
use monolift_core::{HasIdAndName, MonoliftId, Name};
use monolift_crud::{Create, FetchByName, Update, exercise_id_from_name, template_id_from_name};
use serde::Serialize;
use sqlx::{Sqlite, Transaction};

/// The JSON body error responses carry
#[derive(Serialize)]
pub struct ErrorMsg {
    pub error_msg: String,
}

/// Create a named thing and echo back its persisted form
pub async fn save_new<T: Create + FetchByName + HasIdAndName>(
    transaction: &mut Transaction<'_, Sqlite>,
    mut thing_to_create: T,
) -> Result<Json<T>, ApiError> {
    thing_to_create.create(transaction).await?;
    let created = T::fetch_by_name(transaction, thing_to_create.name()).await?;
    Ok(Json(created))
}

/// Update a named thing and echo back its persisted form
pub async fn patch<T: Update + FetchByName + HasIdAndName>(
    transaction: &mut Transaction<'_, Sqlite>,
    mut thing_to_patch: T,
) -> Result<Json<T>, ApiError> {
    thing_to_patch.update(transaction).await?;
    let updated = T::fetch_by_name(transaction, thing_to_patch.name()).await?;
    Ok(Json(updated))
}

/// Resolve a path segment that may be either an ID or an exercise name
pub async fn exercise_id_from_id_or_name(
    transaction: &mut Transaction<'_, Sqlite>,
    id_or_name: String,
) -> Result<MonoliftId, ApiError> {
    if let Ok(id) = MonoliftId::from(&id_or_name) {
        return Ok(id);
    }
    let name = Name::from(&id_or_name).map_err(ApiError::bad_request)?;
    Ok(exercise_id_from_name(transaction, &name).await?)
}

/// Resolve a path segment that may be either an ID or a template name
pub async fn template_id_from_id_or_name(
    transaction: &mut Transaction<'_, Sqlite>,
    id_or_name: String,
) -> Result<MonoliftId, ApiError> {
    if let Ok(id) = MonoliftId::from(&id_or_name) {
        return Ok(id);
    }
    let name = Name::from(&id_or_name).map_err(ApiError::bad_request)?;
    Ok(template_id_from_name(transaction, &name).await?)
}
