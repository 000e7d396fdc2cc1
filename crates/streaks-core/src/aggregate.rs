//! Streak aggregation over a full event log.

use std::collections::BTreeMap;

use chrono::{DateTime, TimeZone};

use crate::cycle::calculate_cycles;
use crate::day::day_number;
use crate::error::{Result, StreakError};
use crate::event::{ActivityEvent, ActivityEventKind};
use crate::streak::{StreakInfo, reduce};
use crate::types::{ActivityId, DayNumber};

/// Computes every activity's streak as of `now`.
pub fn compute_streaks<Tz: TimeZone>(
    events: &[ActivityEvent],
    now: &DateTime<Tz>,
) -> Result<BTreeMap<ActivityId, StreakInfo>> {
    compute_streaks_for_day(events, day_number(now))
}

/// Computes every activity's streak as of the accounting day `today`.
///
/// Activities without any `Started` event have no configuration and are
/// left out of the result.
pub fn compute_streaks_for_day(
    events: &[ActivityEvent],
    today: DayNumber,
) -> Result<BTreeMap<ActivityId, StreakInfo>> {
    let mut groups: BTreeMap<&ActivityId, Vec<&ActivityEvent>> = BTreeMap::new();
    for event in events {
        groups.entry(&event.activity_id).or_default().push(event);
    }

    let mut streaks = BTreeMap::new();
    for (activity_id, group) in groups {
        if !validate_configuration(activity_id, group.iter().copied())? {
            tracing::warn!(%activity_id, "activity was never started, skipping");
            continue;
        }

        let cycles = calculate_cycles(group.iter().copied(), today);
        let info = reduce(activity_id.clone(), &cycles, today)?;
        tracing::debug!(
            %activity_id,
            cycles = cycles.len(),
            successful = info.successful_cycles,
            need_to_do = info.need_to_do_in_current_cycle,
            "computed streak"
        );
        streaks.insert(activity_id.clone(), info);
    }

    Ok(streaks)
}

/// Checks every `Started` event of one activity.
///
/// Returns whether the activity was started at all, or `InvalidConfiguration`
/// for the first non-positive period.
pub fn validate_configuration<'a, I>(activity_id: &ActivityId, events: I) -> Result<bool>
where
    I: IntoIterator<Item = &'a ActivityEvent>,
{
    let mut started = false;
    for event in events {
        if let ActivityEventKind::Started { period_days, .. } = event.kind {
            if period_days <= 0 {
                return Err(StreakError::InvalidConfiguration {
                    activity_id: activity_id.clone(),
                    period_days,
                });
            }
            started = true;
        }
    }
    Ok(started)
}
