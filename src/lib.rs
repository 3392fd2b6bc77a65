//! Expiring LRU - A bounded in-process cache
//!
//! Combines a fixed-capacity LRU policy with per-entry TTL expiration. Both
//! indexes live behind one lock, and capacity evictions are mirrored into
//! the expiry index before the lock is released.

pub mod cache;
pub mod config;
pub mod error;
pub mod tasks;

pub use cache::{BoundedExpiringCache, CacheEvent, CacheProvider, CacheStats, EventSink};
pub use config::Config;
pub use error::{CacheError, Result};
pub use tasks::spawn_sweeper;
