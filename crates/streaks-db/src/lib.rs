//! Storage layer for streaks.
//!
//! Provides an append-only event ledger backed by `rusqlite`.
//!
//! # Thread Safety
//!
//! The [`Database`] type wraps a `rusqlite::Connection`, which is `Send` but not `Sync`.
//! A `Database` can be moved between threads but not shared without external
//! synchronization (e.g. a `Mutex<Database>`).
//!
//! # Schema
//!
//! ## Timestamp Format
//!
//! `occurred_at` is stored as TEXT in RFC 3339 with the offset the event was
//! recorded in (e.g. `2025-01-15T23:30:00+03:00`). Because offsets differ,
//! lexicographic order is not chronological order; the streak engine sorts
//! parsed instants itself.
//!
//! ## Event Columns
//!
//! `type` holds the [`EventType`] string. Payload columns are nullable and only
//! populated for the types that carry them: `desired_amount`, `period_days`
//! and `description` for `started`, `amount` for `performed`.

use std::path::Path;

use chrono::{DateTime, FixedOffset, SecondsFormat};
use rusqlite::{Connection, Row, params};
use streaks_core::{
    ActivityEvent, ActivityEventKind, ActivityId, EventLedger, EventType, UnknownEventType,
    ValidationError,
};
use thiserror::Error;
use uuid::Uuid;

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// Failed to parse an event timestamp.
    #[error("invalid timestamp for event {event_id}: {timestamp}")]
    TimestampParse {
        event_id: String,
        timestamp: String,
        #[source]
        source: chrono::ParseError,
    },
    /// The stored type string is not a known event type.
    #[error("invalid type for event {event_id}")]
    InvalidEventType {
        event_id: String,
        #[source]
        source: UnknownEventType,
    },
    /// The stored activity ID failed validation.
    #[error("invalid activity id for event {event_id}")]
    InvalidActivityId {
        event_id: String,
        #[source]
        source: ValidationError,
    },
    /// A column required by the event type is NULL.
    #[error("event {event_id} is missing {field}")]
    MissingField {
        event_id: String,
        field: &'static str,
    },
}

/// Database connection wrapper.
///
/// See the [module documentation](self) for thread safety considerations.
pub struct Database {
    conn: Connection,
}

/// An event row as stored in the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    pub id: String,
    pub activity_id: String,
    pub kind: String,
    pub occurred_at: String,
    pub desired_amount: Option<i64>,
    pub period_days: Option<i64>,
    pub description: Option<String>,
    pub amount: Option<i64>,
}

impl EventRecord {
    /// Builds a row for `event` under a fresh UUID.
    pub fn from_event(event: &ActivityEvent) -> Self {
        let mut record = Self {
            id: Uuid::new_v4().to_string(),
            activity_id: event.activity_id.to_string(),
            kind: event.event_type().to_string(),
            occurred_at: format_timestamp(event.occurred_at),
            desired_amount: None,
            period_days: None,
            description: None,
            amount: None,
        };
        match &event.kind {
            ActivityEventKind::Started {
                desired_amount,
                period_days,
                description,
            } => {
                record.desired_amount = Some(*desired_amount);
                record.period_days = Some(*period_days);
                record.description = Some(description.clone());
            }
            ActivityEventKind::Performed { amount } => record.amount = Some(*amount),
            ActivityEventKind::Stopped => {}
        }
        record
    }

    /// Parses the row back into a domain event.
    pub fn into_event(self) -> Result<ActivityEvent, DbError> {
        let activity_id =
            ActivityId::new(self.activity_id).map_err(|source| DbError::InvalidActivityId {
                event_id: self.id.clone(),
                source,
            })?;
        let occurred_at = parse_timestamp(&self.occurred_at, &self.id)?;
        let kind: EventType = self
            .kind
            .parse()
            .map_err(|source| DbError::InvalidEventType {
                event_id: self.id.clone(),
                source,
            })?;

        let required = |value: Option<i64>, field: &'static str| {
            value.ok_or_else(|| DbError::MissingField {
                event_id: self.id.clone(),
                field,
            })
        };

        let kind = match kind {
            EventType::Started => ActivityEventKind::Started {
                desired_amount: required(self.desired_amount, "desired_amount")?,
                period_days: required(self.period_days, "period_days")?,
                description: self.description.clone().unwrap_or_default(),
            },
            EventType::Performed => ActivityEventKind::Performed {
                amount: required(self.amount, "amount")?,
            },
            EventType::Stopped => ActivityEventKind::Stopped,
        };

        Ok(ActivityEvent {
            activity_id,
            occurred_at,
            kind,
        })
    }
}

const SELECT_EVENTS: &str = "
    SELECT id, activity_id, type, occurred_at, desired_amount, period_days, description, amount
    FROM events
";

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// The database schema is automatically initialized on first open.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection closes.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initializes the database schema.
    ///
    /// This is idempotent - safe to call on an already-initialized database.
    fn init(&self) -> Result<(), DbError> {
        self.conn.execute_batch(
            "
            -- Events table: append-only activity log
            -- seq: insertion order
            -- type: 'started' | 'performed' | 'stopped'
            CREATE TABLE IF NOT EXISTS events (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                id TEXT NOT NULL UNIQUE,
                activity_id TEXT NOT NULL,
                type TEXT NOT NULL,
                occurred_at TEXT NOT NULL,
                desired_amount INTEGER,
                period_days INTEGER,
                description TEXT,
                amount INTEGER
            );

            CREATE INDEX IF NOT EXISTS idx_events_activity ON events(activity_id);
            ",
        )?;
        Ok(())
    }

    /// Appends one event and returns its generated ID.
    pub fn insert_event(&mut self, event: &ActivityEvent) -> Result<String, DbError> {
        let record = EventRecord::from_event(event);
        insert_record(&self.conn, &record)?;
        tracing::debug!(id = %record.id, activity_id = %record.activity_id, kind = %record.kind, "event stored");
        Ok(record.id)
    }

    /// Appends a batch of events in one transaction.
    pub fn insert_events(&mut self, events: &[ActivityEvent]) -> Result<usize, DbError> {
        if events.is_empty() {
            return Ok(0);
        }
        let tx = self.conn.transaction()?;
        let mut inserted = 0;
        for event in events {
            inserted += insert_record(&tx, &EventRecord::from_event(event))?;
        }
        tx.commit()?;
        Ok(inserted)
    }

    /// Lists all raw rows in insertion order.
    pub fn list_records(&self) -> Result<Vec<EventRecord>, DbError> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SELECT_EVENTS} ORDER BY seq ASC"))?;
        let rows = stmt.query_map([], record_from_row)?;
        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    /// Lists all events in insertion order.
    pub fn list_events(&self) -> Result<Vec<ActivityEvent>, DbError> {
        self.list_records()?
            .into_iter()
            .map(EventRecord::into_event)
            .collect()
    }

    /// Lists the events of one activity in insertion order.
    pub fn list_events_for(&self, activity_id: &ActivityId) -> Result<Vec<ActivityEvent>, DbError> {
        let mut stmt = self.conn.prepare(&format!(
            "{SELECT_EVENTS} WHERE activity_id = ? ORDER BY seq ASC"
        ))?;
        let rows = stmt.query_map([activity_id.as_str()], record_from_row)?;
        let mut events = Vec::new();
        for row in rows {
            events.push(row?.into_event()?);
        }
        Ok(events)
    }

    /// Counts stored events.
    pub fn count_events(&self) -> Result<i64, DbError> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM events", [], |row| row.get(0))?)
    }
}

impl EventLedger for Database {
    type Error = DbError;

    fn read_all(&self) -> Result<Vec<ActivityEvent>, Self::Error> {
        self.list_events()
    }

    fn append(&mut self, event: ActivityEvent) -> Result<(), Self::Error> {
        self.insert_event(&event).map(|_| ())
    }
}

fn insert_record(conn: &Connection, record: &EventRecord) -> Result<usize, DbError> {
    Ok(conn.execute(
        "
        INSERT INTO events
        (id, activity_id, type, occurred_at, desired_amount, period_days, description, amount)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        ",
        params![
            record.id,
            record.activity_id,
            record.kind,
            record.occurred_at,
            record.desired_amount,
            record.period_days,
            record.description,
            record.amount,
        ],
    )?)
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<EventRecord> {
    Ok(EventRecord {
        id: row.get(0)?,
        activity_id: row.get(1)?,
        kind: row.get(2)?,
        occurred_at: row.get(3)?,
        desired_amount: row.get(4)?,
        period_days: row.get(5)?,
        description: row.get(6)?,
        amount: row.get(7)?,
    })
}

fn parse_timestamp(timestamp: &str, event_id: &str) -> Result<DateTime<FixedOffset>, DbError> {
    DateTime::parse_from_rfc3339(timestamp).map_err(|source| DbError::TimestampParse {
        event_id: event_id.to_string(),
        timestamp: timestamp.to_string(),
        source,
    })
}

fn format_timestamp(timestamp: DateTime<FixedOffset>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}
