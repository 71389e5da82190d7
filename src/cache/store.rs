//! Cache Store Module
//!
//! The map of request keys to response bodies, plus the sweep used by the reaper.
//! `CacheStore` is not synchronized; `ResponseCache` wraps it in a single lock.

use std::collections::HashMap;
use std::time::Duration;

use bytes::Bytes;
use tokio::time::Instant;

use crate::cache::{CacheEntry, CacheStats};

// == Cache Store ==
/// Response storage keyed by canonical request URL.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Age at which the reaper removes an entry
    ttl: Duration,
    /// Usage statistics
    stats: CacheStats,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store whose entries expire after `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
            stats: CacheStats::new(),
        }
    }

    // == Add ==
    /// Stores a payload under `key`, replacing any existing entry.
    ///
    /// An overwrite also resets the entry's age to zero.
    pub fn add(&mut self, key: impl Into<String>, payload: impl Into<Bytes>) {
        self.entries.insert(key.into(), CacheEntry::new(payload.into()));
    }

    // == Get ==
    /// Returns the payload stored under `key`, however old it is.
    ///
    /// Staleness is resolved by sweeps only, so an entry past its TTL is still
    /// returned until the next sweep removes it.
    pub fn get(&mut self, key: &str) -> Option<Bytes> {
        match self.entries.get(key) {
            Some(entry) => {
                self.stats.record_hit();
                Some(entry.payload.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Sweep Expired ==
    /// Removes every entry whose age at `now` is at least the TTL.
    ///
    /// Returns the number of entries removed.
    pub fn sweep_expired_at(&mut self, now: Instant) -> usize {
        let ttl = self.ttl;
        let before = self.entries.len();

        self.entries.retain(|_, entry| !entry.is_expired_at(now, ttl));

        let removed = before - self.entries.len();
        self.stats.record_reaped(removed);
        removed
    }

    /// Removes every entry that has expired as of the current time.
    pub fn sweep_expired(&mut self) -> usize {
        self.sweep_expired_at(Instant::now())
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
