// Session cache for project subsets.
// Timestamped JSON entries per identity with TTL checks; storage faults read as misses.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::clock::Clock;
use crate::github::Repository;

use super::paths::projects_key;
use super::store::SessionStore;

/// Default validity window for a cached subset: 15 minutes.
pub const DEFAULT_TTL: Duration = Duration::from_secs(15 * 60);

/// Persisted form of one identity's subset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Capture instant in epoch milliseconds.
    pub timestamp: i64,
    /// The subset exactly as it was rendered.
    pub repos: Vec<Repository>,
}

impl CacheEntry {
    pub fn new(repos: Vec<Repository>, timestamp: i64) -> Self {
        Self { timestamp, repos }
    }

    pub fn captured_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }

    /// Valid for query times in `[timestamp, timestamp + ttl)`.
    pub fn is_valid(&self, now_millis: i64, ttl: Duration) -> bool {
        let ttl_millis = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
        now_millis.saturating_sub(self.timestamp) < ttl_millis
    }

    pub fn is_expired(&self, now_millis: i64, ttl: Duration) -> bool {
        !self.is_valid(now_millis, ttl)
    }
}

/// TTL cache over a [`SessionStore`].
///
/// Every storage or encoding failure is logged and swallowed: reads become
/// misses and writes become no-ops.
#[derive(Clone)]
pub struct SessionCache {
    store: Arc<dyn SessionStore>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl SessionCache {
    pub fn new(store: Arc<dyn SessionStore>, clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self { store, clock, ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Read an identity's entry if it is present, well formed, and within TTL.
    pub fn read(&self, identity: &str) -> Option<CacheEntry> {
        let entry = self.peek(identity)?;
        let now = self.clock.now_millis();
        if entry.is_expired(now, self.ttl) {
            debug!(identity, age_ms = now - entry.timestamp, "cached subset expired");
            return None;
        }
        Some(entry)
    }

    /// Read an identity's entry regardless of age.
    pub fn peek(&self, identity: &str) -> Option<CacheEntry> {
        let entry: CacheEntry = self.read_json(&projects_key(identity))?;
        if entry.timestamp <= 0 {
            debug!(identity, "cached subset has no capture time");
            return None;
        }
        Some(entry)
    }

    /// Overwrite an identity's entry, stamped with the current instant.
    /// Returns whether the write reached storage.
    pub fn write(&self, identity: &str, repos: &[Repository]) -> bool {
        let entry = CacheEntry::new(repos.to_vec(), self.clock.now_millis());
        self.write_json(&projects_key(identity), &entry)
    }

    /// Untimed read of any JSON value; missing, unreadable or malformed is `None`.
    pub fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(key, error = %e, "session storage read failed");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "discarding malformed session entry");
                None
            }
        }
    }

    /// Untimed write of any JSON value. Returns whether it reached storage.
    pub fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                warn!(key, error = %e, "could not encode session entry");
                return false;
            }
        };

        match self.store.set(key, &json) {
            Ok(()) => true,
            Err(e) => {
                warn!(key, error = %e, "session storage write failed");
                false
            }
        }
    }
}
