//! Cache Events Module
//!
//! Structured observations emitted by the cache and the sinks that receive them.

use std::fmt::Debug;
use std::time::Duration;

use tracing::{debug, info};

// == Cache Event ==
/// A notable cache occurrence. Keys are borrowed for the duration of the call.
#[derive(Debug, Clone, Copy)]
pub enum CacheEvent<'a> {
    /// Cache constructed
    Created {
        capacity: usize,
        default_ttl: Duration,
    },
    /// Entry inserted or overwritten
    Set { key: &'a dyn Debug, ttl: Duration },
    /// Live entry served
    Hit { key: &'a dyn Debug },
    /// Key not stored
    Miss { key: &'a dyn Debug },
    /// Entry found past its deadline and purged
    Expired { key: &'a dyn Debug },
    /// Entry dropped to make room for another
    Evicted { key: &'a dyn Debug },
    /// Entry removed by an explicit delete
    Deleted { key: &'a dyn Debug },
    /// Bulk removal of expired entries
    Purged { removed: usize },
}

impl CacheEvent<'_> {
    /// Stable label for the event kind.
    pub fn name(&self) -> &'static str {
        match self {
            CacheEvent::Created { .. } => "created",
            CacheEvent::Set { .. } => "set",
            CacheEvent::Hit { .. } => "hit",
            CacheEvent::Miss { .. } => "miss",
            CacheEvent::Expired { .. } => "expired",
            CacheEvent::Evicted { .. } => "evicted",
            CacheEvent::Deleted { .. } => "deleted",
            CacheEvent::Purged { .. } => "purged",
        }
    }

    /// Key the event concerns, if any.
    pub fn key(&self) -> Option<&dyn Debug> {
        match *self {
            CacheEvent::Set { key, .. }
            | CacheEvent::Hit { key }
            | CacheEvent::Miss { key }
            | CacheEvent::Expired { key }
            | CacheEvent::Evicted { key }
            | CacheEvent::Deleted { key } => Some(key),
            CacheEvent::Created { .. } | CacheEvent::Purged { .. } => None,
        }
    }
}

// == Event Sink ==
/// Receiver for cache events.
///
/// Called after the cache lock is released. Implementations must not block
/// and must not fail; anything they do is invisible to the cache operation.
pub trait EventSink: Send + Sync {
    fn record(&self, event: &CacheEvent<'_>);
}

/// Default sink: leveled `tracing` records with structured fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&self, event: &CacheEvent<'_>) {
        let name = event.name();
        match *event {
            CacheEvent::Created {
                capacity,
                default_ttl,
            } => info!(event = name, capacity, ?default_ttl, "Cache initialized"),
            CacheEvent::Set { key, ttl } => debug!(event = name, ?key, ?ttl, "Cache set"),
            CacheEvent::Hit { key } => debug!(event = name, ?key, "Cache hit"),
            CacheEvent::Miss { key } => debug!(event = name, ?key, "Cache miss"),
            CacheEvent::Expired { key } => debug!(event = name, ?key, "Cache entry expired"),
            CacheEvent::Evicted { key } => info!(event = name, ?key, "Cache entry evicted"),
            CacheEvent::Deleted { key } => debug!(event = name, ?key, "Cache entry deleted"),
            CacheEvent::Purged { removed } => {
                info!(event = name, removed, "Expired entries purged")
            }
        }
    }
}

/// Sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl EventSink for NoopSink {
    fn record(&self, _event: &CacheEvent<'_>) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_and_keys() {
        let key = "session:456";

        let set = CacheEvent::Set {
            key: &key,
            ttl: Duration::from_secs(1),
        };
        assert_eq!(set.name(), "set");
        assert_eq!(format!("{:?}", set.key().unwrap()), "\"session:456\"");

        let created = CacheEvent::Created {
            capacity: 1,
            default_ttl: Duration::ZERO,
        };
        assert_eq!(created.name(), "created");
        assert!(created.key().is_none());
        assert!(CacheEvent::Purged { removed: 2 }.key().is_none());
    }

    #[test]
    fn test_builtin_sinks_accept_every_event() {
        let key = 7u32;
        let events = [
            CacheEvent::Created {
                capacity: 2,
                default_ttl: Duration::from_secs(5),
            },
            CacheEvent::Set {
                key: &key,
                ttl: Duration::from_secs(5),
            },
            CacheEvent::Hit { key: &key },
            CacheEvent::Miss { key: &key },
            CacheEvent::Expired { key: &key },
            CacheEvent::Evicted { key: &key },
            CacheEvent::Deleted { key: &key },
            CacheEvent::Purged { removed: 3 },
        ];

        for event in &events {
            TracingSink.record(event);
            NoopSink.record(event);
        }
    }
}
