//! Cache Entry Module
//!
//! Defines a single timestamped response body held by the cache.

use std::time::Duration;

use bytes::Bytes;
use tokio::time::Instant;

// == Cache Entry ==
/// A raw response body together with the moment it was inserted.
///
/// Entries are never mutated; an overwrite replaces the whole entry.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// When the entry was (most recently) inserted
    pub created_at: Instant,
    /// The raw bytes as received from upstream
    pub payload: Bytes,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry stamped with the current time.
    pub fn new(payload: Bytes) -> Self {
        Self {
            created_at: Instant::now(),
            payload,
        }
    }

    // == Age ==
    /// Returns how old the entry is at `now`.
    ///
    /// Saturates to zero if `now` is earlier than the creation time.
    pub fn age_at(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created_at)
    }

    // == Is Expired ==
    /// Checks if the entry has reached the given TTL at `now`.
    ///
    /// Boundary condition: an entry whose age equals the TTL is expired.
    pub fn is_expired_at(&self, now: Instant, ttl: Duration) -> bool {
        self.age_at(now) >= ttl
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new(Bytes::from_static(b"payload"));

        assert_eq!(entry.payload, Bytes::from_static(b"payload"));
        assert!(entry.age_at(Instant::now()) < Duration::from_secs(1));
    }

    #[test]
    fn test_age_saturates_before_creation() {
        let entry = CacheEntry::new(Bytes::new());
        let earlier = entry.created_at - Duration::from_millis(10);

        assert_eq!(entry.age_at(earlier), Duration::ZERO);
    }

    #[test]
    fn test_not_expired_before_ttl() {
        let entry = CacheEntry::new(Bytes::new());
        let now = entry.created_at + Duration::from_millis(4999);

        assert!(!entry.is_expired_at(now, Duration::from_secs(5)));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let entry = CacheEntry::new(Bytes::new());
        let now = entry.created_at + Duration::from_secs(5);

        // Age equal to the TTL counts as expired
        assert!(entry.is_expired_at(now, Duration::from_secs(5)));
    }
}
