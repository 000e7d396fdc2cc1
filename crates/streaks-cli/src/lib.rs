//! Streaks CLI library.
//!
//! This crate provides the command-line interface for recording activity
//! events and reporting streaks.

mod cli;
pub mod commands;
mod config;
pub mod render;

pub use cli::{Cli, Commands};
pub use config::Config;
