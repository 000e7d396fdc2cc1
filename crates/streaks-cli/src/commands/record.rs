//! Commands that append events: `start`, `do` and `stop`.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset};
use streaks_core::{ActivityEvent, ActivityId, EventLedger};

/// Records a `Started` event.
pub fn start<L: EventLedger, W: Write>(
    writer: &mut W,
    ledger: &mut L,
    activity_id: ActivityId,
    desired_amount: i64,
    period_days: i64,
    description: &str,
    at: DateTime<FixedOffset>,
) -> Result<()> {
    anyhow::ensure!(period_days > 0, "period must be at least one day");

    append(
        ledger,
        ActivityEvent::started(activity_id.clone(), at, desired_amount, period_days, description),
    )?;
    writeln!(
        writer,
        "Started {activity_id}: {desired_amount} every {period_days} day(s)"
    )?;
    Ok(())
}

/// Records a `Performed` event.
pub fn perform<L: EventLedger, W: Write>(
    writer: &mut W,
    ledger: &mut L,
    activity_id: ActivityId,
    amount: i64,
    at: DateTime<FixedOffset>,
) -> Result<()> {
    append(ledger, ActivityEvent::performed(activity_id.clone(), at, amount))?;
    writeln!(writer, "Recorded {amount} for {activity_id}")?;
    Ok(())
}

/// Records a `Stopped` event.
pub fn stop<L: EventLedger, W: Write>(
    writer: &mut W,
    ledger: &mut L,
    activity_id: ActivityId,
    at: DateTime<FixedOffset>,
) -> Result<()> {
    append(ledger, ActivityEvent::stopped(activity_id.clone(), at))?;
    writeln!(writer, "Stopped {activity_id}")?;
    Ok(())
}

fn append<L: EventLedger>(ledger: &mut L, event: ActivityEvent) -> Result<()> {
    let kind = event.event_type();
    ledger
        .append(event)
        .with_context(|| format!("failed to record {kind} event"))
}
