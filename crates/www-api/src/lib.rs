// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! *Part of the wider Monolift project*
//!
//! This crate provides the web API, which may also be run locally.  The
//! mobile clients treat it as a thin sync backend: it exposes the exercise
//! catalog, workout templates, logged sessions, and the progress metrics
//! computed from them.  There is no authentication and no rate limiting -
//! anyone who can reach the socket can read (and, in read-write mode, write)
//! the database behind it.
//!

mod error;
mod handlers;
mod helpers;
mod queries;

use error::*;
use queries::*;

use axum::Router;
use log::info;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::{str::FromStr, sync::Arc};
use tower_http::trace::TraceLayer;

/// API access mode (read-only or read-write)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiAccessMode {
    Read,
    ReadWrite,
}

/// Set up and serve the API
pub async fn prepare_api_router(
    db_url: &str,
    access_mode: ApiAccessMode,
) -> Result<Router, sqlx::Error> {
    // Create connection options (whether the database is read-only or not)
    let connect_options =
        SqliteConnectOptions::from_str(db_url)?.read_only(access_mode == ApiAccessMode::Read);

    // Create a pool with those options
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(connect_options)
        .await?;

    info!("Preparing API router for {db_url} ({access_mode:?})");

    // Get the router
    let apiv1 = handlers::router(access_mode)?;

    // Add the state
    let apiv1 = apiv1.with_state(Arc::new(pool));

    // Add URL path prefix and request tracing
    let api = Router::new()
        .nest("/api/v1", apiv1)
        .layer(TraceLayer::new_for_http());

    // Return the router
    Ok(api)
}
