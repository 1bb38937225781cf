// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! All GET requests
//!

use crate::helpers::*;
use crate::{ApiError, SinceQueryParams};
use axum::extract::{Path, Query, State};
use axum::{Json, Router, routing::get};
use chrono::{DateTime, NaiveDate, Utc};
use monolift_core::progress::{OneRmPoint, WeeklyVolume};
use monolift_core::{WorkoutSession, WorkoutTemplate};
use monolift_crud::{
    Exercises, ExerciseStats, FetchAll, exercise_stats, fetch_all_sessions, fetch_all_templates,
    fetch_workout_dates, one_rm_series, weekly_volume_series,
};
use serde::Serialize;
use sqlx::{Pool, Sqlite};
use std::collections::BTreeSet;
use std::sync::Arc;

///
pub fn router() -> Result<Router<Arc<Pool<Sqlite>>>, sqlx::Error> {
    #[rustfmt::skip]
    let apiv1 = Router::new()
        .route("/health",                         get(handle_get_health))
        .route("/exercises",                      get(handle_get_exercises))
        .route("/templates",                      get(handle_get_templates))
        .route("/sessions",                       get(handle_get_sessions))
        .route("/workout-dates",                  get(handle_get_workout_dates))
        .route("/exercise/{id-or-name}/stats",    get(handle_get_exercise_stats))
        .route("/exercise/{id-or-name}/one-rm",   get(handle_get_one_rm_series))
        .route("/exercise/{id-or-name}/volume",   get(handle_get_weekly_volume));

    Ok(apiv1)
}

/// The health probe's response body
#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub database: &'static str,
}

/// Handle a request for the health of the API (including whether the
/// database behind it answers)
pub async fn handle_get_health(State(pool): State<Arc<Pool<Sqlite>>>) -> Json<Health> {
    let database = match sqlx::query("SELECT 1").fetch_one(&*pool).await {
        Ok(_) => "connected",
        Err(_) => "disconnected",
    };
    Json(Health {
        status: if database == "connected" { "ok" } else { "error" },
        timestamp: Utc::now(),
        database,
    })
}

/// Handle a request for the whole exercise catalog
pub async fn handle_get_exercises(
    State(pool): State<Arc<Pool<Sqlite>>>,
) -> Result<Json<Exercises>, ApiError> {
    let mut transaction = pool.begin().await?;
    let exercises = Exercises::fetch_all(&mut transaction).await?;
    Ok(Json(exercises))
}

/// Handle a request for every workout template
pub async fn handle_get_templates(
    State(pool): State<Arc<Pool<Sqlite>>>,
) -> Result<Json<Vec<WorkoutTemplate>>, ApiError> {
    let mut transaction = pool.begin().await?;
    let templates = fetch_all_templates(&mut transaction).await?;
    Ok(Json(templates))
}

/// Handle a request for every logged session
pub async fn handle_get_sessions(
    State(pool): State<Arc<Pool<Sqlite>>>,
) -> Result<Json<Vec<WorkoutSession>>, ApiError> {
    let mut transaction = pool.begin().await?;
    let sessions = fetch_all_sessions(&mut transaction).await?;
    Ok(Json(sessions))
}

/// Handle a request for the dates that have a logged workout (what the
/// calendar marks)
pub async fn handle_get_workout_dates(
    State(pool): State<Arc<Pool<Sqlite>>>,
) -> Result<Json<BTreeSet<NaiveDate>>, ApiError> {
    let mut transaction = pool.begin().await?;
    let dates = fetch_workout_dates(&mut transaction).await?;
    Ok(Json(dates))
}

/// Handle a request for one exercise's headline stats
pub async fn handle_get_exercise_stats(
    State(pool): State<Arc<Pool<Sqlite>>>,
    Path(id_or_name): Path<String>,
) -> Result<Json<ExerciseStats>, ApiError> {
    let mut transaction = pool.begin().await?;
    let id = exercise_id_from_id_or_name(&mut transaction, id_or_name).await?;
    let stats = exercise_stats(&mut transaction, &id).await?;
    Ok(Json(stats))
}

/// Handle a request for one exercise's estimated-1RM progress series
pub async fn handle_get_one_rm_series(
    State(pool): State<Arc<Pool<Sqlite>>>,
    Path(id_or_name): Path<String>,
) -> Result<Json<Vec<OneRmPoint>>, ApiError> {
    let mut transaction = pool.begin().await?;
    let id = exercise_id_from_id_or_name(&mut transaction, id_or_name).await?;
    let series = one_rm_series(&mut transaction, &id).await?;
    Ok(Json(series))
}

/// Handle a request for one exercise's weekly volume series
pub async fn handle_get_weekly_volume(
    State(pool): State<Arc<Pool<Sqlite>>>,
    Path(id_or_name): Path<String>,
    Query(params): Query<SinceQueryParams>,
) -> Result<Json<Vec<WeeklyVolume>>, ApiError> {
    let mut transaction = pool.begin().await?;
    let id = exercise_id_from_id_or_name(&mut transaction, id_or_name).await?;
    let series = weekly_volume_series(&mut transaction, &id, params.since).await?;
    Ok(Json(series))
}
