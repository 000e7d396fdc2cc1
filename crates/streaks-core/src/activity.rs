//! Current configuration of every activity, replayed from the event log.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::event::{ActivityEvent, ActivityEventKind, chronological};
use crate::types::ActivityId;

/// An activity as configured by its latest `Started` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Activity {
    pub activity_id: ActivityId,
    pub desired_amount: i64,
    pub period_days: i64,
    pub description: String,
    /// False after a `Stopped` event until the next `Started`.
    pub active: bool,
}

/// Replays `Started` and `Stopped` events into activities, ordered by ID.
pub fn activities(events: &[ActivityEvent]) -> Vec<Activity> {
    let mut by_id: BTreeMap<ActivityId, Activity> = BTreeMap::new();

    for event in chronological(events) {
        match &event.kind {
            ActivityEventKind::Started {
                desired_amount,
                period_days,
                description,
            } => {
                by_id.insert(
                    event.activity_id.clone(),
                    Activity {
                        activity_id: event.activity_id.clone(),
                        desired_amount: *desired_amount,
                        period_days: *period_days,
                        description: description.clone(),
                        active: true,
                    },
                );
            }
            ActivityEventKind::Stopped => match by_id.get_mut(&event.activity_id) {
                Some(activity) => activity.active = false,
                None => {
                    tracing::warn!(activity_id = %event.activity_id, "stop before start, ignoring");
                }
            },
            ActivityEventKind::Performed { .. } => {}
        }
    }

    by_id.into_values().collect()
}
