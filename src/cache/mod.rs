//! Cache Module
//!
//! Provides a bounded in-memory cache with LRU eviction and lazy TTL expiration.

mod bounded;
mod entry;
mod events;
mod lru;
mod provider;
mod stats;
mod store;

#[cfg(test)]
mod test_keys;

// Re-export public types
pub use bounded::BoundedExpiringCache;
pub use entry::Deadline;
pub use events::{CacheEvent, EventSink, NoopSink, TracingSink};
pub use lru::{Keys, LruStore};
pub use provider::CacheProvider;
pub use stats::CacheStats;
pub use store::{ExpiringStore, Lookup};
