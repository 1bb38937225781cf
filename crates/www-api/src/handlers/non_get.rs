// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! All requests that aren't GET requests
//!

use crate::helpers::*;
use crate::ApiError;
use axum::extract::{Path, State};
use axum::{
    Json, Router,
    routing::{delete, patch as patch_route, put},
};
use monolift_core::{ExerciseSet, MonoliftId, WorkoutSession, WorkoutTemplate};
use monolift_crud::{Create, DeleteById};
use sqlx::{Pool, Sqlite};
use std::sync::Arc;

///
pub fn router() -> Result<Router<Arc<Pool<Sqlite>>>, sqlx::Error> {
    #[rustfmt::skip]
    let apiv1 = Router::new()
        .route("/template",               put(handle_put_template))
        .route("/template/{id-or-name}",  patch_route(handle_patch_template)
                                                             .delete(handle_delete_template))
        .route("/session",                put(handle_put_session))
        .route("/session/{id}",           delete(handle_delete_session))
        .route("/set",                    put(handle_put_set));

    Ok(apiv1)
}

/// Handle a request to create a workout template
pub async fn handle_put_template(
    State(pool): State<Arc<Pool<Sqlite>>>,
    Json(mut payload): Json<WorkoutTemplate>,
) -> Result<Json<WorkoutTemplate>, ApiError> {
    let mut transaction = pool.begin().await?;
    payload.clear_id();
    let result = save_new(&mut transaction, payload).await?;
    transaction.commit().await?;
    Ok(result)
}

/// Handle a request to update a workout template
pub async fn handle_patch_template(
    State(pool): State<Arc<Pool<Sqlite>>>,
    Json(payload): Json<WorkoutTemplate>,
) -> Result<Json<WorkoutTemplate>, ApiError> {
    let mut transaction = pool.begin().await?;
    let result = patch(&mut transaction, payload).await?;
    transaction.commit().await?;
    Ok(result)
}

/// Handle a request to delete a workout template.  Sessions logged from the
/// template survive it.
pub async fn handle_delete_template(
    State(pool): State<Arc<Pool<Sqlite>>>,
    Path(id_or_name): Path<String>,
) -> Result<Json<()>, ApiError> {
    let mut transaction = pool.begin().await?;
    let id = template_id_from_id_or_name(&mut transaction, id_or_name).await?;
    WorkoutTemplate::delete_by_id(&mut transaction, &id).await?;
    transaction.commit().await?;
    Ok(Json(()))
}

/// Handle a request to log a workout session
pub async fn handle_put_session(
    State(pool): State<Arc<Pool<Sqlite>>>,
    Json(mut payload): Json<WorkoutSession>,
) -> Result<Json<WorkoutSession>, ApiError> {
    let mut transaction = pool.begin().await?;
    payload.clear_id();
    payload.create(&mut transaction).await?;
    transaction.commit().await?;
    Ok(Json(payload))
}

/// Handle a request to delete a session and everything logged within it
pub async fn handle_delete_session(
    State(pool): State<Arc<Pool<Sqlite>>>,
    Path(id): Path<String>,
) -> Result<Json<()>, ApiError> {
    let mut transaction = pool.begin().await?;
    let id = MonoliftId::from(&id).map_err(ApiError::bad_request)?;
    WorkoutSession::delete_by_id(&mut transaction, &id).await?;
    transaction.commit().await?;
    Ok(Json(()))
}

/// Handle a request to log one set within a session
pub async fn handle_put_set(
    State(pool): State<Arc<Pool<Sqlite>>>,
    Json(mut payload): Json<ExerciseSet>,
) -> Result<Json<ExerciseSet>, ApiError> {
    let mut transaction = pool.begin().await?;
    payload.clear_id();
    payload.create(&mut transaction).await?;
    transaction.commit().await?;
    Ok(Json(payload))
}
