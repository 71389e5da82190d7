//! Cache Module
//!
//! Short-lived in-memory cache of raw API response bodies, keyed by request URL.
//! Entries are removed only by the reaper's periodic sweep.

mod entry;
mod shared;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use shared::{ResponseCache, MAX_TTL};
pub use stats::CacheStats;
pub use store::CacheStore;
