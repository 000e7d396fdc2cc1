//! The `EventLedger` trait and in-process implementations.
//!
//! The trait is implemented by storage backends (e.g. `streaks-db`). The
//! command layer depends on this abstraction; the streak engine itself only
//! ever sees the event snapshot a ledger returns.

use std::convert::Infallible;
use std::sync::{Mutex, PoisonError};

use crate::event::ActivityEvent;

/// Append-only log of activity events.
///
/// A `read_all` issued after an `append` must observe the appended event.
pub trait EventLedger {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns every recorded event. Order is unspecified.
    fn read_all(&self) -> Result<Vec<ActivityEvent>, Self::Error>;

    /// Records one event.
    fn append(&mut self, event: ActivityEvent) -> Result<(), Self::Error>;

    /// Wraps this ledger in a read cache.
    fn cached(self) -> CachedLedger<Self>
    where
        Self: Sized,
    {
        CachedLedger::new(self)
    }
}

/// A ledger held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryLedger {
    events: Vec<ActivityEvent>,
}

impl MemoryLedger {
    pub const fn new() -> Self {
        Self { events: Vec::new() }
    }
}

impl From<Vec<ActivityEvent>> for MemoryLedger {
    fn from(events: Vec<ActivityEvent>) -> Self {
        Self { events }
    }
}

impl EventLedger for MemoryLedger {
    type Error = Infallible;

    fn read_all(&self) -> Result<Vec<ActivityEvent>, Self::Error> {
        Ok(self.events.clone())
    }

    fn append(&mut self, event: ActivityEvent) -> Result<(), Self::Error> {
        self.events.push(event);
        Ok(())
    }
}

/// Caches `read_all` of an inner ledger; every `append` invalidates the cache.
#[derive(Debug)]
pub struct CachedLedger<L> {
    inner: L,
    cache: Mutex<Option<Vec<ActivityEvent>>>,
}

impl<L: EventLedger> CachedLedger<L> {
    pub const fn new(inner: L) -> Self {
        Self {
            inner,
            cache: Mutex::new(None),
        }
    }

    /// Returns the wrapped ledger.
    pub const fn inner(&self) -> &L {
        &self.inner
    }

    pub fn into_inner(self) -> L {
        self.inner
    }
}

impl<L: EventLedger> EventLedger for CachedLedger<L> {
    type Error = L::Error;

    fn read_all(&self) -> Result<Vec<ActivityEvent>, Self::Error> {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(events) = cache.as_ref() {
            return Ok(events.clone());
        }

        tracing::debug!("event cache empty, reloading");
        let events = self.inner.read_all()?;
        *cache = Some(events.clone());
        Ok(events)
    }

    fn append(&mut self, event: ActivityEvent) -> Result<(), Self::Error> {
        *self.cache.get_mut().unwrap_or_else(PoisonError::into_inner) = None;
        self.inner.append(event)
    }
}
