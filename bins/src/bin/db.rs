// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! The Monolift tool for basic database management
//!

use clap::{CommandFactory, Parser, ValueEnum, builder::PossibleValue};
use monolift_crud::{
    DatabaseRowCount, backup, open_pool, restore, seed_exercise_catalog, setup_database_at_path,
};
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};
use std::path::{Path, PathBuf};

/// Monolift entry point
///
/// One of:
/// - Create the database
/// - Seed the exercise catalog
/// - Backup the database
/// - Restore the database
/// - Print database stats
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

    // Check the options
    match (&args.cli_command, &args.database, &args.json) {
        //----------------------------------------------------------------------
        // Valid
        //----------------------------------------------------------------------
        (Command::Create, database, _) => match setup_database_at_path(database).await {
            Ok(()) => println!("Success"),
            Err(error) => {
                eprintln!("Error: {error}");
                std::process::exit(1);
            }
        },
        (Command::Seed, database, _) => {
            let mut transaction = begin_transaction(database).await;
            match seed_exercise_catalog(&mut transaction).await {
                Ok(inserted) => {
                    commit(transaction).await;
                    println!("Seeded {inserted} exercises");
                }
                Err(error) => {
                    eprintln!("Error seeding exercise catalog: {error}");
                    std::process::exit(1);
                }
            }
        }
        (Command::Backup, database, Some(json)) => {
            let mut transaction = begin_transaction(database).await;
            match backup(&mut transaction, json.to_owned()).await {
                Ok(()) => println!("Successfully backed up database to {json:?}"),
                Err(error) => {
                    eprintln!("Error backing up database: {error}");
                    std::process::exit(1);
                }
            }
        }
        (Command::Restore, database, Some(json)) => {
            let mut transaction = begin_transaction(database).await;
            match restore(&mut transaction, json.to_owned()).await {
                Ok(()) => (),
                Err(error) => {
                    eprintln!("Error restoring database: {error}");
                    std::process::exit(1);
                }
            }
            commit(transaction).await;
            println!("Successfully restored database");
        }
        (Command::Stats, database, _) => {
            let mut transaction = begin_transaction(database).await;
            match DatabaseRowCount::all(&mut transaction).await {
                Ok(counts) => {
                    println!("exercises:          {}", counts.exercises);
                    println!("templates:          {}", counts.templates);
                    println!("template exercises: {}", counts.template_exercises);
                    println!("sessions:           {}", counts.sessions);
                    println!("sets:               {}", counts.sets);
                    println!("rest logs:          {}", counts.rest_logs);
                }
                Err(error) => {
                    eprintln!("Error fetching stats: {error}");
                    std::process::exit(1);
                }
            }
        }
        //----------------------------------------------------------------------
        // Invalid
        //----------------------------------------------------------------------
        _ => {
            eprintln!("CLI Error: invalid options");
            Cli::command().print_long_help().unwrap();
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Open the database and begin a transaction, exiting with a message on
/// failure
async fn begin_transaction(database: &Path) -> sqlx::Transaction<'static, sqlx::Sqlite> {
    let pool = match open_pool(database).await {
        Ok(pool) => pool,
        Err(error) => {
            eprintln!("Error connecting to database: {error}");
            std::process::exit(1);
        }
    };

    match pool.begin().await {
        Ok(transaction) => transaction,
        Err(error) => {
            eprintln!("Error starting transaction: {error}");
            std::process::exit(1);
        }
    }
}

/// Commit the transaction, exiting with a message on failure
async fn commit(transaction: sqlx::Transaction<'_, sqlx::Sqlite>) {
    if let Err(error) = transaction.commit().await {
        eprintln!("Error committing transaction: {error}");
        std::process::exit(1);
    }
}

/// Monolift CLI args using [clap]
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Monolift tool for basic database management",
    after_help = "This is intended for use when deploying to a server and in CI"
)]
pub struct Cli {
    // Database command
    #[arg(value_enum)]
    pub cli_command: Command,

    /// Path to the database
    #[arg(long)]
    pub database: PathBuf,

    /// Path to the dir that contains the JSON
    #[arg(long)]
    pub json: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub enum Command {
    Create,
    Seed,
    Backup,
    Restore,
    Stats,
}

impl ValueEnum for Command {
    fn value_variants<'a>() -> &'a [Self] {
        &[
            Self::Create,
            Self::Seed,
            Self::Backup,
            Self::Restore,
            Self::Stats,
        ]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        match self {
            Command::Create => {
                Some(PossibleValue::new("create").help("Create a new database at the path"))
            }
            Command::Seed => Some(
                PossibleValue::new("seed").help("Seed the built-in exercise catalog"),
            ),
            Command::Backup => Some(
                PossibleValue::new("backup")
                    .help("Backup the database at path to JSON in dir at path"),
            ),
            Command::Restore => Some(
                PossibleValue::new("restore")
                    .help("Restore the database at path from JSON in dir at path"),
            ),
            Command::Stats => Some(PossibleValue::new("stats").help("Print database stats")),
        }
    }
}
