//! Status command: activities and their current streaks.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::Serialize;
use streaks_core::{
    Activity, EventLedger, StreakInfo, activities, compute_streaks, date_for_day_number,
    day_number,
};

use crate::Config;
use crate::render::Table;

/// Computed status data.
#[derive(Debug, Serialize)]
pub struct StatusData {
    pub generated_at: DateTime<FixedOffset>,
    /// Accounting day the streaks are evaluated for.
    pub today: NaiveDate,
    pub activities: Vec<Activity>,
    pub streaks: Vec<StreakInfo>,
}

/// Loads events from the ledger and evaluates every streak as of `now`.
pub fn generate_status_data<L: EventLedger>(
    ledger: &L,
    config: &Config,
    now: DateTime<FixedOffset>,
) -> Result<StatusData> {
    let events = ledger.read_all().context("failed to read events")?;
    let streaks = compute_streaks(&events, &now).context("failed to compute streaks")?;
    let today = date_for_day_number(day_number(&now)).context("date out of range")?;

    Ok(StatusData {
        generated_at: now,
        today,
        activities: activities(&events),
        streaks: streaks
            .into_values()
            .filter(|info| !config.is_hidden(info.activity_id.as_str()))
            .collect(),
    })
}

/// Cycles completed so far: the current one only counts once it is done.
const fn completed_cycles(info: &StreakInfo) -> i64 {
    if info.current_cycle_is_done() {
        info.successful_cycles
    } else {
        info.successful_cycles - 1
    }
}

/// Most urgent first: nearest deadline, then most left to do.
fn sorted_by_urgency<'a>(streaks: impl Iterator<Item = &'a StreakInfo>) -> Vec<&'a StreakInfo> {
    let mut streaks: Vec<_> = streaks.collect();
    streaks.sort_by(|a, b| {
        a.current_cycle_deadline_in_days
            .cmp(&b.current_cycle_deadline_in_days)
            .then(b.need_to_do_in_current_cycle.cmp(&a.need_to_do_in_current_cycle))
    });
    streaks
}

fn streak_row(info: &StreakInfo) -> [String; 5] {
    let label = if info.current_cycle_is_done() {
        format!("(done) {}", info.activity_id)
    } else {
        info.activity_id.to_string()
    };
    [
        label,
        completed_cycles(info).to_string(),
        format!(
            "{} / {}",
            info.need_to_do_in_current_cycle, info.desired_amount
        ),
        info.current_cycle_deadline_in_days.to_string(),
        info.next_cycle_deadline_in_days.to_string(),
    ]
}

/// Formats status data as human-readable text.
pub fn format_status(data: &StatusData) -> String {
    let mut activity_table = Table::new(["Activity", "Desired", "Active", "Period", "Description"]);
    for activity in &data.activities {
        activity_table.add_row([
            activity.activity_id.to_string(),
            activity.desired_amount.to_string(),
            if activity.active { "yes" } else { "no" }.to_string(),
            activity.period_days.to_string(),
            activity.description.clone(),
        ]);
    }

    let (done, pending): (Vec<&StreakInfo>, Vec<&StreakInfo>) = data
        .streaks
        .iter()
        .partition(|info| info.current_cycle_is_done());
    let (untouched, in_progress): (Vec<&StreakInfo>, Vec<&StreakInfo>) =
        pending.into_iter().partition(|info| info.is_untouched());

    let mut streak_table = Table::new([
        "Activity",
        "Streak",
        "Need to do",
        "Deadline (days)",
        "Next deadline (days)",
    ]);
    let groups = [untouched, in_progress, done];
    let last_group = groups.iter().rposition(|group| !group.is_empty());
    for (index, group) in groups.iter().enumerate() {
        for info in sorted_by_urgency(group.iter().copied()) {
            streak_table.add_row(streak_row(info));
        }
        if !group.is_empty() && Some(index) != last_group {
            streak_table.add_empty_row();
        }
    }

    let mut output = String::new();
    output.push_str("== Activities ==\n\n");
    if data.activities.is_empty() {
        output.push_str("No activities yet. Add one with `streaks start`.\n");
    } else {
        output.push_str(&activity_table.to_string());
    }
    output.push_str("\nTODAY ");
    output.push_str(&data.today.to_string());
    output.push_str("\n\n");
    output.push_str("===== STREAKS =====\n\n");
    if streak_table.is_empty() {
        output.push_str("No streaks.\n");
    } else {
        output.push_str(&streak_table.to_string());
    }
    output
}

/// Formats status data as JSON.
pub fn format_status_json(data: &StatusData) -> Result<String> {
    Ok(serde_json::to_string_pretty(data)?)
}

/// Runs the status command.
pub fn run<L: EventLedger, W: Write>(
    writer: &mut W,
    ledger: &L,
    config: &Config,
    now: DateTime<FixedOffset>,
    json: bool,
) -> Result<()> {
    let data = generate_status_data(ledger, config, now)?;
    if json {
        writeln!(writer, "{}", format_status_json(&data)?)?;
    } else {
        write!(writer, "{}", format_status(&data))?;
    }
    Ok(())
}
