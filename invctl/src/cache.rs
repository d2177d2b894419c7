//! Caller-owned TTL cache for rendered views.
//!
//! The cache is an explicit struct owned by application state, constructed
//! with an injected clock and TTL. It holds rendered response values only,
//! never raw item or tag state; the read path re-fetches and re-reconciles
//! whenever the cached view has expired or a refresh is forced.

use chrono::{DateTime, TimeDelta, Utc};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Time source, injectable so tests can drive expiry deterministically.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

struct Entry<T> {
    stored_at: DateTime<Utc>,
    value: T,
}

/// Single-slot cache with time-to-live expiry.
pub struct TtlCache<T> {
    ttl: TimeDelta,
    clock: Arc<dyn Clock>,
    slot: Mutex<Option<Entry<T>>>,
}

impl<T: Clone> TtlCache<T> {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            ttl: TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX),
            clock,
            slot: Mutex::new(None),
        }
    }

    /// Return the cached value if it is still fresh.
    ///
    /// `refresh = true` bypasses the slot entirely; the caller is expected to
    /// recompute and [`store`](Self::store) a new value. Expired entries are
    /// evicted on read.
    pub fn get(&self, refresh: bool) -> Option<T> {
        if refresh {
            return None;
        }
        let mut slot = self.lock();
        match slot.as_ref() {
            Some(entry) if self.clock.now().signed_duration_since(entry.stored_at) < self.ttl => {
                Some(entry.value.clone())
            }
            Some(_) => {
                *slot = None;
                None
            }
            None => None,
        }
    }

    pub fn store(&self, value: T) {
        *self.lock() = Some(Entry {
            stored_at: self.clock.now(),
            value,
        });
    }

    /// Drop the cached value, forcing the next read to recompute.
    pub fn invalidate(&self) {
        *self.lock() = None;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Entry<T>>> {
        // A poisoned lock only means a panic mid-store; the slot is still a
        // coherent Option and safe to reuse.
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
