//! CLI subcommand implementations.

pub mod activities;
pub mod history;
pub mod record;
pub mod status;
pub mod util;
