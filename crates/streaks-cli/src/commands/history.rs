//! History command: the cycle sequence of one activity.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset};
use streaks_core::{
    ActivityId, Cycle, EventLedger, calculate_cycles, date_for_day_number, day_number,
    validate_configuration,
};

use crate::render::Table;

fn format_day(day: i64) -> String {
    date_for_day_number(day).map_or_else(|| day.to_string(), |date| date.to_string())
}

/// Formats cycles as a table, oldest first.
pub fn format_history(cycles: &[Cycle]) -> String {
    let mut table = Table::new(["From", "Until", "Order", "Done", "Need"]);
    for cycle in cycles {
        if cycle.order == 1 && !table.is_empty() {
            table.add_empty_row();
        }
        table.add_row([
            format_day(cycle.from_day_number),
            format_day(cycle.next_cycle_first_day_number() - 1),
            cycle.order.to_string(),
            format!("{} / {}", cycle.accumulated_amount, cycle.desired_amount),
            cycle.need_to_do().to_string(),
        ]);
    }
    table.to_string()
}

/// Runs the history command.
pub fn run<L: EventLedger, W: Write>(
    writer: &mut W,
    ledger: &L,
    activity_id: &ActivityId,
    now: DateTime<FixedOffset>,
) -> Result<()> {
    let events = ledger.read_all().context("failed to read events")?;
    let events: Vec<_> = events
        .into_iter()
        .filter(|event| &event.activity_id == activity_id)
        .collect();

    if !validate_configuration(activity_id, &events)? {
        anyhow::bail!("activity {activity_id} has never been started");
    }

    let cycles = calculate_cycles(&events, day_number(&now));
    write!(writer, "{}", format_history(&cycles))?;
    Ok(())
}
