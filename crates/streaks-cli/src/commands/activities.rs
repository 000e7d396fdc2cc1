//! Activities command: every activity and its configuration.

use std::io::Write;

use anyhow::{Context, Result};
use streaks_core::{Activity, EventLedger, activities};

use crate::render::Table;

/// Formats activities as a table.
pub fn format_activities(activities: &[Activity]) -> String {
    if activities.is_empty() {
        return "No activities yet. Add one with `streaks start`.\n".to_string();
    }

    let mut table = Table::new(["Activity", "Desired", "Period", "Active", "Description"]);
    for activity in activities {
        table.add_row([
            activity.activity_id.to_string(),
            activity.desired_amount.to_string(),
            activity.period_days.to_string(),
            if activity.active { "yes" } else { "no" }.to_string(),
            activity.description.clone(),
        ]);
    }
    table.to_string()
}

/// Runs the activities command.
pub fn run<L: EventLedger, W: Write>(writer: &mut W, ledger: &L, json: bool) -> Result<()> {
    let events = ledger.read_all().context("failed to read events")?;
    let activities = activities(&events);

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&activities)?)?;
    } else {
        write!(writer, "{}", format_activities(&activities))?;
    }
    Ok(())
}
