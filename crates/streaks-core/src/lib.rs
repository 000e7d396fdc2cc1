//! Core domain logic for recurring activity streaks.
//!
//! This crate contains the fundamental types and logic for:
//! - Day numbering: mapping timestamps to accounting days
//! - Cycles: folding an activity's events into accumulation windows
//! - Streaks: summarising the live streak of every activity
//! - Ledger: the append-only event log abstraction

pub mod activity;
mod aggregate;
pub mod cycle;
pub mod day;
mod error;
pub mod event;
pub mod event_type;
pub mod ledger;
pub mod streak;
pub mod types;

#[cfg(test)]
mod fixtures;

pub use activity::{Activity, activities};
pub use aggregate::{compute_streaks, compute_streaks_for_day, validate_configuration};
pub use cycle::{Cycle, calculate_cycles};
pub use day::{DAY_START_OFFSET_HOURS, date_for_day_number, day_number};
pub use error::{Result, StreakError};
pub use event::{ActivityEvent, ActivityEventKind};
pub use event_type::{EventType, UnknownEventType};
pub use ledger::{CachedLedger, EventLedger, MemoryLedger};
pub use streak::{StreakInfo, current_streak, reduce};
pub use types::{ActivityId, DayNumber, ValidationError};
