//! In-memory TTL cache for fetched datasets.
//!
//! Uses `DashMap` so concurrent requests only contend on the shard holding
//! their key. Expired entries are dropped lazily when read; there is no
//! background sweeper.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use fx_types::{CacheKey, Dataset};
use tracing::debug;

/// Default time-to-live of a cached dataset.
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Source of "now" for expiry checks.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> Instant;
}

/// Monotonic system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    value: Dataset,
    stored_at: Instant,
}

/// Thread-safe dataset cache keyed by window and currency pair.
pub struct RateCache {
    entries: DashMap<CacheKey, CacheEntry>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl Default for RateCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl RateCache {
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
            clock,
        }
    }

    /// Returns the cached dataset unless it is older than the TTL.
    /// An expired entry is removed as a side effect.
    pub fn get(&self, key: &CacheKey) -> Option<Dataset> {
        let now = self.clock.now();

        match self.entries.get(key) {
            None => return None,
            Some(entry) if !self.is_expired(&entry, now) => return Some(entry.value.clone()),
            Some(_) => {}
        }

        // The read guard is released above; re-check so a concurrent fresh put survives.
        if self
            .entries
            .remove_if(key, |_, entry| self.is_expired(entry, now))
            .is_some()
        {
            debug!(%key, "Evicted expired cache entry");
        }
        None
    }

    /// Stores `value`, replacing any existing entry for `key`.
    pub fn put(&self, key: CacheKey, value: Dataset) {
        let entry = CacheEntry {
            value,
            stored_at: self.clock.now(),
        };
        self.entries.insert(key, entry);
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Number of stored entries, expired ones included until they are read.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn is_expired(&self, entry: &CacheEntry, now: Instant) -> bool {
        now.saturating_duration_since(entry.stored_at) > self.ttl
    }
}
