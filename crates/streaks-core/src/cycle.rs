//! Cycle calculation.
//!
//! Folds one activity's events into fixed-length accumulation windows.
//!
//! # Algorithm Summary
//!
//! 1. Sort events by instant and replay them, tracking the active
//!    configuration and the open window.
//! 2. A `Performed` event past the open window closes it and opens the next
//!    one. A failed window, or a gap of at least one whole window, breaks the
//!    streak and restarts numbering at the event's day.
//! 3. The open window is emitted last. If its deadline has passed by
//!    `today`, an empty window for today is projected after it.

use serde::Serialize;

use crate::day::day_number;
use crate::event::{ActivityEvent, ActivityEventKind, chronological};
use crate::types::DayNumber;

/// A fixed-length accumulation window with a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Cycle {
    /// First day of the window.
    pub from_day_number: DayNumber,
    /// Window length in days.
    pub cycle_length_days: i64,
    /// 1-based position within the current unbroken streak.
    pub order: i64,
    /// Target for this window.
    pub desired_amount: i64,
    /// Total performed inside this window.
    pub accumulated_amount: i64,
}

impl Cycle {
    /// Exclusive upper bound of the window.
    pub const fn next_cycle_first_day_number(&self) -> DayNumber {
        self.from_day_number + self.cycle_length_days
    }

    /// Amount still missing to reach the target, never negative.
    pub fn need_to_do(&self) -> i64 {
        (self.desired_amount - self.accumulated_amount).max(0)
    }

    /// Whether the target has been reached.
    pub fn is_done(&self) -> bool {
        self.need_to_do() == 0
    }
}

/// The window currently accumulating.
#[derive(Debug, Clone, Copy)]
struct Window {
    start: DayNumber,
    accumulated: i64,
}

/// Fold state threaded through one replay of an activity's history.
#[derive(Debug)]
struct CycleFold {
    active: bool,
    desired_amount: i64,
    cycle_length_days: i64,
    window: Option<Window>,
    order: i64,
    cycles: Vec<Cycle>,
}

impl CycleFold {
    const fn new() -> Self {
        Self {
            active: false,
            desired_amount: 0,
            cycle_length_days: 0,
            window: None,
            order: 1,
            cycles: Vec::new(),
        }
    }

    const fn cycle(&self, from_day_number: DayNumber, accumulated_amount: i64, order: i64) -> Cycle {
        Cycle {
            from_day_number,
            cycle_length_days: self.cycle_length_days,
            order,
            desired_amount: self.desired_amount,
            accumulated_amount,
        }
    }

    fn apply(&mut self, event: &ActivityEvent) {
        match event.kind {
            ActivityEventKind::Started {
                desired_amount,
                period_days,
                ..
            } => {
                // Reconfiguring keeps whatever the open window holds.
                self.active = true;
                self.desired_amount = desired_amount;
                self.cycle_length_days = period_days;
            }
            ActivityEventKind::Stopped => self.active = false,
            ActivityEventKind::Performed { amount } if self.active => {
                self.perform(day_number(&event.occurred_at), amount);
            }
            ActivityEventKind::Performed { .. } => {}
        }
    }

    fn perform(&mut self, day: DayNumber, amount: i64) {
        let Some(window) = self.window else {
            self.window = Some(Window {
                start: day,
                accumulated: amount,
            });
            return;
        };

        if day - window.start < self.cycle_length_days {
            self.window = Some(Window {
                accumulated: window.accumulated.saturating_add(amount),
                ..window
            });
            return;
        }

        let closed = self.cycle(window.start, window.accumulated, self.order);
        self.cycles.push(closed);
        self.order += 1;

        let mut next = Window {
            start: closed.next_cycle_first_day_number(),
            accumulated: amount,
        };
        if !closed.is_done() || day - next.start >= self.cycle_length_days {
            tracing::trace!(
                day,
                closed_from = closed.from_day_number,
                failed = !closed.is_done(),
                "streak broken"
            );
            next.start = day;
            self.order = 1;
        }
        self.window = Some(next);
    }

    fn finish(mut self, today: DayNumber) -> Vec<Cycle> {
        let Some(window) = self.window else {
            // Nothing was ever performed: one untouched window starting today.
            let untouched = self.cycle(today, 0, self.order);
            self.cycles.push(untouched);
            return self.cycles;
        };

        let last = self.cycle(window.start, window.accumulated, self.order);
        self.cycles.push(last);

        if today - last.from_day_number >= last.cycle_length_days {
            let silent_for_whole_window =
                today >= last.next_cycle_first_day_number() + last.cycle_length_days;
            let projected = if last.is_done() && !silent_for_whole_window {
                // Anchored at the window boundary so the streak stays contiguous.
                self.cycle(last.next_cycle_first_day_number(), 0, last.order + 1)
            } else {
                self.cycle(today, 0, 1)
            };
            self.cycles.push(projected);
        }

        self.cycles
    }
}

/// Folds one activity's events into its cycle sequence as of `today`.
///
/// Events may be passed in any order. The result always holds at least one
/// cycle. When no `Performed` event was counted, it is a single untouched
/// cycle `(today, period, 1, desired, 0)`.
///
/// Calling this twice with the same input yields the same sequence.
pub fn calculate_cycles<'a, I>(events: I, today: DayNumber) -> Vec<Cycle>
where
    I: IntoIterator<Item = &'a ActivityEvent>,
{
    let mut fold = CycleFold::new();
    for event in chronological(events) {
        fold.apply(event);
    }
    fold.finish(today)
}
