// ABOUTME: Macro Ledger CLI - resolve food text, list reference foods, summarize meal logs
// ABOUTME: Wires configuration, logging, the reference cache and the USDA estimator together
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org
//!
//! Usage:
//! ```bash
//! # Resolve a food (reference table first, then USDA if USDA_API_KEY is set)
//! macro-ledger resolve Chicken Breast
//!
//! # Resolve against the reference table only
//! macro-ledger resolve --offline "green apple"
//!
//! # List reference foods
//! macro-ledger foods
//!
//! # Summarize today's entries from a JSON meal log
//! macro-ledger summary --entries meals.json --today
//! ```

mod commands;
mod helpers;

use chrono::Utc;
use clap::{Parser, Subcommand};
use macro_ledger::{
    config::LedgerConfig,
    errors::AppResult,
    logging::LoggingConfig,
    nutrition::{ResolutionCache, Resolver},
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "macro-ledger",
    about = "Food text to macro-nutrient resolution and daily summaries",
    long_about = "Resolve free-text food descriptions into calories, protein, carbs and fat, and summarize a day of logged meals against your targets."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve a food description into a nutrition estimate
    Resolve {
        /// Food description (multiple words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,

        /// Never call the USDA API; report reference-table misses as not found
        #[arg(long)]
        offline: bool,
    },

    /// List canonical names in the reference table
    Foods,

    /// Summarize a JSON array of meal entries
    Summary {
        /// Path to a JSON file containing an array of meal entries
        #[arg(long)]
        entries: PathBuf,

        /// Only count entries logged today (UTC)
        #[arg(long)]
        today: bool,

        /// Print a human-readable table instead of JSON
        #[arg(long)]
        table: bool,
    },
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let cli = Cli::parse();

    let logging = LoggingConfig::from_env();
    let logging = if cli.verbose {
        logging.with_level("debug")
    } else {
        logging
    };
    logging.init()?;

    let config = LedgerConfig::global();
    let cache = ResolutionCache::builtin()?;

    match cli.command {
        Command::Resolve { text, offline } => {
            let resolver = Resolver::new(cache, commands::build_estimator(config, offline)?);
            let estimate = commands::resolve_text(&resolver, &text.join(" ")).await?;
            println!("{}", serde_json::to_string_pretty(&estimate)?);
        }
        Command::Foods => {
            for key in commands::food_keys(&cache) {
                println!("{key}");
            }
        }
        Command::Summary {
            entries,
            today,
            table,
        } => {
            let log = commands::read_meal_log(&entries).await?;
            let day = today.then(|| Utc::now().date_naive());
            let summary = commands::summarize_log(&log, &config.default_settings, day);
            if table {
                print!("{}", helpers::display::render_table(&summary));
            } else {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            }
        }
    }

    Ok(())
}
