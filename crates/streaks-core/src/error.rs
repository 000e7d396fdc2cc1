//! Error types for `streaks-core`.

use thiserror::Error;

use crate::types::ActivityId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StreakError {
    /// The reducer was handed no cycles. The cycle calculator always emits
    /// at least one, so this is a contract violation upstream.
    #[error("cycle sequence for {activity_id} is empty")]
    EmptySequence { activity_id: ActivityId },

    /// A `Started` event carried a period that cannot delimit cycles.
    #[error("activity {activity_id} has invalid period of {period_days} days")]
    InvalidConfiguration {
        activity_id: ActivityId,
        period_days: i64,
    },
}

pub type Result<T, E = StreakError> = std::result::Result<T, E>;
