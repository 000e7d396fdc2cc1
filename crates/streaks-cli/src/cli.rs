//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use streaks_core::ActivityId;

/// Largest amount accepted for a target or a single record.
const MAX_AMOUNT: i64 = 1_000_000_000;

/// Recurring activity streak tracker.
///
/// Records what you do toward "X amount every N days" goals and shows how
/// long each streak has lasted and how much is left in the current cycle.
#[derive(Debug, Parser)]
#[command(name = "streaks", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start an activity, or reconfigure a running one.
    Start {
        /// Activity identifier (no whitespace).
        activity: ActivityId,

        /// Amount to do every cycle.
        #[arg(value_parser = clap::value_parser!(i64).range(0..=MAX_AMOUNT))]
        desired: i64,

        /// Cycle length in days.
        #[arg(value_parser = clap::value_parser!(i64).range(1..))]
        period: i64,

        /// Free-text description.
        description: Vec<String>,

        /// When it happened: RFC 3339 or e.g. "2 hours ago". Defaults to now.
        #[arg(long)]
        at: Option<String>,
    },

    /// Record an amount done toward an activity.
    Do {
        /// Activity identifier.
        activity: ActivityId,

        /// Amount done.
        #[arg(value_parser = clap::value_parser!(i64).range(0..=MAX_AMOUNT))]
        amount: i64,

        /// When it happened: RFC 3339 or e.g. "2 hours ago". Defaults to now.
        #[arg(long)]
        at: Option<String>,
    },

    /// Suspend an activity until it is started again.
    Stop {
        /// Activity identifier.
        activity: ActivityId,

        /// When it happened: RFC 3339 or e.g. "2 hours ago". Defaults to now.
        #[arg(long)]
        at: Option<String>,
    },

    /// List activities and their configuration.
    Activities {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show every activity's current streak.
    Status {
        /// Evaluate as of this time instead of now.
        #[arg(long)]
        now: Option<String>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show the cycles computed for one activity.
    History {
        /// Activity identifier.
        activity: ActivityId,

        /// Evaluate as of this time instead of now.
        #[arg(long)]
        now: Option<String>,
    },
}
