//! sheetcal CLI
//!
//! Terminal front end: list view, month grid and event details for a
//! published spreadsheet feed.

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use sheetcal::{error::Result, models::Config, pipeline, utils};

/// sheetcal - Spreadsheet-backed calendar
#[derive(Parser, Debug)]
#[command(name = "sheetcal", version, about = "Spreadsheet-backed calendar")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "sheetcal.toml", global = true)]
    config: PathBuf,

    /// Override the spreadsheet identifier
    #[arg(long, global = true)]
    sheet_id: Option<String>,

    /// Override the sub-sheet (tab) identifier
    #[arg(long, global = true)]
    gid: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress headers and summaries
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List events grouped by day
    List {
        /// Only show events whose title or description contains TERM
        #[arg(short, long, value_name = "TERM")]
        search: Option<String>,

        /// Restrict to one month (YYYY-MM)
        #[arg(short, long, value_parser = parse_month_arg)]
        month: Option<NaiveDate>,
    },

    /// Show a month as a calendar grid
    Month {
        /// Month to show (YYYY-MM, default: current month)
        #[arg(short, long, value_parser = parse_month_arg)]
        month: Option<NaiveDate>,

        /// Only show events whose title or description contains TERM
        #[arg(short, long, value_name = "TERM")]
        search: Option<String>,
    },

    /// Show one event in detail, including its raw row
    Show {
        /// Event identifier (e.g. evt-3)
        id: String,
    },

    /// Validate configuration
    Validate,
}

fn parse_month_arg(value: &str) -> std::result::Result<NaiveDate, String> {
    utils::parse_month(value).map_err(|e| e.to_string())
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    utils::console::init(cli.quiet);

    let mut config = Config::load_or_default(&cli.config);
    if let Some(sheet_id) = cli.sheet_id {
        config.sheet.sheet_id = sheet_id;
    }
    if let Some(gid) = cli.gid {
        config.sheet.gid = gid;
    }

    log::debug!("Loaded configuration from {}", cli.config.display());

    let today = Local::now().date_naive();

    match cli.command {
        Command::List { search, month } => {
            config.validate()?;
            pipeline::run_list(&config, today, search, month).await?;
        }
        Command::Month { month, search } => {
            config.validate()?;
            pipeline::run_month(&config, today, month, search).await?;
        }
        Command::Show { id } => {
            config.validate()?;
            pipeline::run_show(&config, today, &id).await?;
        }
        Command::Validate => pipeline::run_validate(&config)?,
    }

    Ok(())
}
