// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! The Monolift www API
//!

use clap::Parser;
use monolift_crud::db_url_from_path;
use monolift_www_api::{ApiAccessMode, prepare_api_router};
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};
use std::path::PathBuf;

/// Monolift www API entry point (serve the www JSON API)
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();

    // Setup logging
    let config_log = ConfigBuilder::new().add_filter_allow_str("monolift").build();
    TermLogger::init(
        LevelFilter::Info,
        config_log,
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .unwrap();

    let db_url = db_url_from_path(&args.database);
    let access_mode = if args.read_only {
        ApiAccessMode::Read
    } else {
        ApiAccessMode::ReadWrite
    };

    serve(&db_url, access_mode, &args.address).await;
    Ok(())
}

/// Serve the API
async fn serve(db_url: &str, access_mode: ApiAccessMode, address: &str) {
    // Get the router
    let api_router = prepare_api_router(db_url, access_mode).await.unwrap();

    // Bind the listener for new connections
    let listener = tokio::net::TcpListener::bind(address).await.unwrap();

    // Print the address
    println!("http://{address}");

    // Serve the server
    axum::serve(listener, api_router).await.unwrap();
}

/// Monolift CLI args using [clap]
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Monolift www API server",
    after_help = "This is intended for use when deploying to a server and in CI"
)]
pub struct Cli {
    /// Path to the database
    #[arg(long)]
    pub database: PathBuf,

    /// Serve the database read-only (write endpoints are not even routed)
    #[arg(long)]
    pub read_only: bool,

    /// The address to listen on
    #[arg(long, default_value = "0.0.0.0:3000")]
    pub address: String,
}
