//! Streak reduction: collapses a cycle sequence into the live streak.

use serde::Serialize;

use crate::cycle::Cycle;
use crate::error::{Result, StreakError};
use crate::types::{ActivityId, DayNumber};

/// Summary of an activity's current streak, relative to one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreakInfo {
    pub activity_id: ActivityId,
    /// Target of the current cycle.
    pub desired_amount: i64,
    /// Position of the current cycle within the streak, counting it.
    pub successful_cycles: i64,
    pub need_to_do_in_current_cycle: i64,
    /// Days until the current cycle closes.
    pub current_cycle_deadline_in_days: i64,
    /// Days until the cycle after the current one closes.
    pub next_cycle_deadline_in_days: i64,
}

impl StreakInfo {
    pub const fn current_cycle_is_done(&self) -> bool {
        self.need_to_do_in_current_cycle == 0
    }

    /// Whether nothing has been done in a streak that has just begun.
    ///
    /// True for activities that were started but never performed, and for
    /// a fresh empty window right after a break.
    pub const fn is_untouched(&self) -> bool {
        self.successful_cycles == 1
            && self.desired_amount > 0
            && self.need_to_do_in_current_cycle == self.desired_amount
    }
}

/// Returns the cycles of the final streak: everything from the last cycle
/// with `order == 1` onwards.
pub fn current_streak(cycles: &[Cycle]) -> &[Cycle] {
    let start = cycles
        .iter()
        .rposition(|cycle| cycle.order == 1)
        .unwrap_or(0);
    &cycles[start..]
}

/// Reduces an activity's cycles to its streak summary as of `today`.
pub fn reduce(activity_id: ActivityId, cycles: &[Cycle], today: DayNumber) -> Result<StreakInfo> {
    let Some(last) = current_streak(cycles).last() else {
        return Err(StreakError::EmptySequence { activity_id });
    };

    let next_cycle_first_day = last.next_cycle_first_day_number();
    Ok(StreakInfo {
        activity_id,
        desired_amount: last.desired_amount,
        successful_cycles: last.order,
        need_to_do_in_current_cycle: last.need_to_do(),
        current_cycle_deadline_in_days: next_cycle_first_day - today,
        next_cycle_deadline_in_days: next_cycle_first_day + last.cycle_length_days - today,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cycle::calculate_cycles;
    use crate::fixtures::{CycleBuilder, book_pages, daily_races};

    fn id(s: &str) -> ActivityId {
        ActivityId::new(s).unwrap()
    }

    #[test]
    fn current_streak_starts_at_last_reset() {
        let cycles = CycleBuilder::new(1, 5)
            .start_streak(1, 5)
            .add_cycle(7)
            .add_cycle(3)
            .start_streak(6, 5)
            .add_cycle(2)
            .build();

        let streak = current_streak(&cycles);
        assert_eq!(streak.len(), 2);
        assert_eq!(streak[0].from_day_number, 6);
        assert_eq!(streak[1].order, 2);
    }

    #[test]
    fn reduce_open_cycle_mid_streak() {
        let cycles = calculate_cycles(&book_pages(), 10);

        let info = reduce(id("english"), &cycles, 10).unwrap();

        assert_eq!(
            info,
            StreakInfo {
                activity_id: id("english"),
                desired_amount: 5,
                successful_cycles: 5,
                need_to_do_in_current_cycle: 4,
                current_cycle_deadline_in_days: 1,
                next_cycle_deadline_in_days: 3,
            }
        );
        assert!(!info.current_cycle_is_done());
        assert!(!info.is_untouched());
    }

    #[test]
    fn reduce_after_break_reports_fresh_streak() {
        let cycles = calculate_cycles(&daily_races(), 20);

        let info = reduce(id("nitrotype"), &cycles, 20).unwrap();

        assert_eq!(info.successful_cycles, 1);
        assert_eq!(info.need_to_do_in_current_cycle, 5);
        assert_eq!(info.current_cycle_deadline_in_days, 1);
        assert_eq!(info.next_cycle_deadline_in_days, 2);
        assert!(info.is_untouched());
    }

    #[test]
    fn reduce_done_cycle() {
        let cycles = CycleBuilder::new(2, 5)
            .start_streak(1, 5)
            .add_cycle(8)
            .build();

        let info = reduce(id("english"), &cycles, 4).unwrap();

        assert!(info.current_cycle_is_done());
        assert_eq!(info.need_to_do_in_current_cycle, 0);
        assert_eq!(info.successful_cycles, 2);
        assert_eq!(info.current_cycle_deadline_in_days, 1);
        assert_eq!(info.next_cycle_deadline_in_days, 3);
    }

    #[test]
    fn reduce_empty_sequence_fails() {
        let err = reduce(id("english"), &[], 4).unwrap_err();
        assert_eq!(
            err,
            StreakError::EmptySequence {
                activity_id: id("english")
            }
        );
    }
}
