//! Shared Response Cache
//!
//! A cloneable, lock-guarded handle over `CacheStore` whose reaper is started
//! at construction.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tokio::sync::Mutex;
use tracing::debug;

use crate::cache::{CacheStats, CacheStore};
use crate::tasks::{spawn_reaper, ReaperHandle};

/// Smallest TTL accepted; a periodic timer cannot tick with a zero period.
const MIN_TTL: Duration = Duration::from_millis(1);

/// Largest TTL accepted; the first sweep deadline must fit in an `Instant`.
pub const MAX_TTL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

// == Response Cache ==
/// Time-bounded cache of raw response bodies.
///
/// All operations, including the reaper's sweep, take the same lock for their
/// full duration, so readers never see a half-applied insert or removal.
/// Clones share the same underlying store.
#[derive(Debug, Clone)]
pub struct ResponseCache {
    store: Arc<Mutex<CacheStore>>,
}

impl ResponseCache {
    // == Constructor ==
    /// Creates a cache and starts its reaper, which sweeps once every `ttl`.
    ///
    /// `ttl` is clamped to `[1ms, MAX_TTL]`. The returned `ReaperHandle` stops
    /// the reaper when shut down or dropped, so keep it alive for as long as the
    /// cache is in use; otherwise entries are never evicted.
    /// Must be called from within a tokio runtime.
    pub fn new(ttl: Duration) -> (Self, ReaperHandle) {
        let ttl = ttl.clamp(MIN_TTL, MAX_TTL);
        let store = Arc::new(Mutex::new(CacheStore::new(ttl)));
        let reaper = spawn_reaper(store.clone(), ttl);

        (Self { store }, reaper)
    }

    // == Add ==
    /// Inserts or replaces the payload stored under `key`.
    pub async fn add(&self, key: impl Into<String>, payload: impl Into<Bytes>) {
        let key = key.into();
        let payload = payload.into();
        debug!(key = %key, bytes = payload.len(), "cache add");

        self.store.lock().await.add(key, payload);
    }

    // == Get ==
    /// Returns the payload stored under `key`, if any.
    pub async fn get(&self, key: &str) -> Option<Bytes> {
        let found = self.store.lock().await.get(key);
        debug!(key = %key, hit = found.is_some(), "cache lookup");
        found
    }

    pub async fn stats(&self) -> CacheStats {
        self.store.lock().await.stats()
    }

    pub async fn len(&self) -> usize {
        self.store.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.lock().await.is_empty()
    }

    pub async fn ttl(&self) -> Duration {
        self.store.lock().await.ttl()
    }
}
