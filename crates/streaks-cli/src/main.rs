use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use streaks_core::{CachedLedger, EventLedger};
use streaks_db::Database;
use tracing_subscriber::EnvFilter;

use streaks_cli::commands::util::resolve_time;
use streaks_cli::commands::{activities, history, record, status};
use streaks_cli::{Cli, Commands, Config};

/// Load config and open the event ledger, ensuring the parent directory exists.
fn open_ledger(config_path: Option<&Path>) -> Result<(CachedLedger<Database>, Config)> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }

    let db = Database::open(&config.database_path).context("failed to open database")?;
    Ok((db.cached(), config))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let mut stdout = io::stdout().lock();
    let (mut ledger, config) = open_ledger(cli.config.as_deref())?;

    match command {
        Commands::Start {
            activity,
            desired,
            period,
            description,
            at,
        } => {
            let at = resolve_time(at.as_deref())?;
            record::start(
                &mut stdout,
                &mut ledger,
                activity,
                desired,
                period,
                &description.join(" "),
                at,
            )?;
        }
        Commands::Do {
            activity,
            amount,
            at,
        } => {
            let at = resolve_time(at.as_deref())?;
            record::perform(&mut stdout, &mut ledger, activity, amount, at)?;
        }
        Commands::Stop { activity, at } => {
            let at = resolve_time(at.as_deref())?;
            record::stop(&mut stdout, &mut ledger, activity, at)?;
        }
        Commands::Activities { json } => {
            activities::run(&mut stdout, &ledger, json)?;
        }
        Commands::Status { now, json } => {
            let now = resolve_time(now.as_deref())?;
            status::run(&mut stdout, &ledger, &config, now, json)?;
        }
        Commands::History { activity, now } => {
            let now = resolve_time(now.as_deref())?;
            history::run(&mut stdout, &ledger, &activity, now)?;
        }
    }

    stdout.flush()?;
    Ok(())
}
