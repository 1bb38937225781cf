// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! Print the workout calendar in the terminal.  Mostly useful for eyeballing
//! the grid the mobile clients render, with workout markers pulled from a
//! local database.
//!

use chrono::{Datelike, Local};
use clap::Parser;
use monolift_calendar::{
    CalendarModel, Cell, GridLayout, MonthRange, WeekRow, centering_offset,
};
use monolift_crud::{fetch_workout_dates, open_pool};
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};
use std::path::PathBuf;

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

    // The clock is read once here; everything below is deterministic in it
    let today = Local::now().date_naive();
    let range = MonthRange::from(-args.months_back, args.months_forward)?;
    let mut model = CalendarModel::build(range, today)?;

    // Mark workout days if a database was supplied
    if let Some(database) = &args.database {
        let pool = open_pool(database).await?;
        let mut transaction = pool.begin().await?;
        let workout_dates = fetch_workout_dates(&mut transaction).await?;
        model.mark_workout_days(&workout_dates);
    }

    // Print the current month's group (or the first in the range when the
    // range excludes the current month)
    let group_index = if range.start() <= 0 && range.end() > 0 {
        (-range.start()) as usize
    } else {
        0
    };
    let group = &model.month_groups()[group_index];

    println!("{} {}", group.month_abbrev(), group.year());
    println!("Sun  Mon  Tue  Wed  Thu  Fri  Sat");
    for row in group.rows() {
        println!("{}", render_row(row));
    }

    // Where the grid scrolls to on mount
    if let Some(today_row) = model.today_row() {
        let offset = centering_offset(&model, &GridLayout::default()).unwrap_or(0.0);
        println!();
        println!(
            "today {} is row {today_row} of {}; mount scroll offset {offset}px",
            today.format("%Y-%m-%d"),
            model.total_rows()
        );
    }

    Ok(())
}

/// Render one week row: `[15]` marks today, `*` marks a workout day
fn render_row(row: &WeekRow) -> String {
    let mut rendered = String::new();
    for cell in row.cells() {
        match cell {
            Cell::Empty => rendered.push_str("     "),
            Cell::Day(day) => {
                let number = day.date().day();
                if day.is_today() {
                    rendered.push_str(&format!("[{number:>2}] "));
                } else if day.has_workout() {
                    rendered.push_str(&format!("*{number:>2}  "));
                } else {
                    rendered.push_str(&format!(" {number:>2}  "));
                }
            }
        }
    }
    rendered.trim_end().to_string()
}

/// Monolift CLI args using [clap]
#[derive(Parser, Debug)]
#[command(version, about = "Print the Monolift workout calendar")]
pub struct Cli {
    /// Path to the database to pull workout markers from
    #[arg(long)]
    pub database: Option<PathBuf>,

    /// How many months back the grid reaches
    #[arg(long, default_value_t = 12)]
    pub months_back: i32,

    /// How many months forward the grid reaches
    #[arg(long, default_value_t = 24)]
    pub months_forward: i32,
}
