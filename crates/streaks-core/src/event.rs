//! Activity events, the append-only input of the streak engine.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::event_type::EventType;
use crate::types::ActivityId;

/// A single entry of an activity's history.
///
/// Events are never mutated once recorded. A ledger may return them in any
/// order; the engine sorts by `occurred_at` before folding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEvent {
    /// The activity this event belongs to.
    pub activity_id: ActivityId,
    /// When the event happened, with the offset it was recorded in.
    pub occurred_at: DateTime<FixedOffset>,
    /// What happened.
    pub kind: ActivityEventKind,
}

/// The payload of an [`ActivityEvent`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActivityEventKind {
    /// The activity was (re)configured and is now active.
    Started {
        /// Target quantity per cycle.
        desired_amount: i64,
        /// Cycle length in days.
        period_days: i64,
        /// Free text shown next to the activity.
        #[serde(default)]
        description: String,
    },
    /// Some amount was done toward the current cycle.
    Performed { amount: i64 },
    /// Accounting is suspended until the next `Started`.
    Stopped,
}

impl ActivityEvent {
    /// Creates a `Started` event.
    pub fn started(
        activity_id: ActivityId,
        occurred_at: DateTime<FixedOffset>,
        desired_amount: i64,
        period_days: i64,
        description: impl Into<String>,
    ) -> Self {
        Self {
            activity_id,
            occurred_at,
            kind: ActivityEventKind::Started {
                desired_amount,
                period_days,
                description: description.into(),
            },
        }
    }

    /// Creates a `Performed` event.
    pub const fn performed(
        activity_id: ActivityId,
        occurred_at: DateTime<FixedOffset>,
        amount: i64,
    ) -> Self {
        Self {
            activity_id,
            occurred_at,
            kind: ActivityEventKind::Performed { amount },
        }
    }

    /// Creates a `Stopped` event.
    pub const fn stopped(activity_id: ActivityId, occurred_at: DateTime<FixedOffset>) -> Self {
        Self {
            activity_id,
            occurred_at,
            kind: ActivityEventKind::Stopped,
        }
    }

    /// Returns the event's type tag.
    pub const fn event_type(&self) -> EventType {
        match self.kind {
            ActivityEventKind::Started { .. } => EventType::Started,
            ActivityEventKind::Performed { .. } => EventType::Performed,
            ActivityEventKind::Stopped => EventType::Stopped,
        }
    }
}

/// Returns references to `events` in chronological order.
///
/// The sort is stable, so events sharing an instant keep ledger order.
pub(crate) fn chronological<'a, I>(events: I) -> Vec<&'a ActivityEvent>
where
    I: IntoIterator<Item = &'a ActivityEvent>,
{
    let mut sorted: Vec<&ActivityEvent> = events.into_iter().collect();
    sorted.sort_by_key(|event| event.occurred_at);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(rfc3339: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(rfc3339).unwrap()
    }

    #[test]
    fn event_serialization_roundtrip() {
        let event = ActivityEvent::started(
            ActivityId::new("english").unwrap(),
            at("2025-01-01T10:00:00+03:00"),
            5,
            2,
            "pages of the english book",
        );

        let json = serde_json::to_string(&event).unwrap();
        let parsed: ActivityEvent = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, event);
        assert_eq!(parsed.occurred_at.offset().local_minus_utc(), 3 * 3600);
    }

    #[test]
    fn event_kind_is_tagged() {
        let event = ActivityEvent::performed(
            ActivityId::new("english").unwrap(),
            at("2025-01-01T10:00:00Z"),
            4,
        );

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["kind"]["type"], "performed");
        assert_eq!(json["kind"]["amount"], 4);
    }

    #[test]
    fn event_type_matches_kind() {
        let id = ActivityId::new("english").unwrap();
        let ts = at("2025-01-01T10:00:00Z");

        assert_eq!(
            ActivityEvent::started(id.clone(), ts, 1, 1, "").event_type(),
            EventType::Started
        );
        assert_eq!(
            ActivityEvent::performed(id.clone(), ts, 1).event_type(),
            EventType::Performed
        );
        assert_eq!(ActivityEvent::stopped(id, ts).event_type(), EventType::Stopped);
    }

    #[test]
    fn chronological_compares_instants_across_offsets() {
        let id = ActivityId::new("english").unwrap();
        // 09:00+03:00 is 06:00Z, earlier than 07:00Z.
        let later = ActivityEvent::performed(id.clone(), at("2025-01-01T07:00:00Z"), 1);
        let earlier = ActivityEvent::performed(id, at("2025-01-01T09:00:00+03:00"), 2);
        let events = [later, earlier];

        let sorted = chronological(&events);
        assert_eq!(sorted[0].kind, ActivityEventKind::Performed { amount: 2 });
        assert_eq!(sorted[1].kind, ActivityEventKind::Performed { amount: 1 });
    }

    #[test]
    fn chronological_keeps_ledger_order_for_ties() {
        let id = ActivityId::new("english").unwrap();
        let ts = at("2025-01-01T07:00:00Z");
        let events = [
            ActivityEvent::started(id.clone(), ts, 5, 1, ""),
            ActivityEvent::performed(id, ts, 3),
        ];

        let sorted = chronological(&events);
        assert_eq!(sorted[0].event_type(), EventType::Started);
        assert_eq!(sorted[1].event_type(), EventType::Performed);
    }
}
