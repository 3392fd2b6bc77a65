//! Bounded Expiring Cache
//!
//! Thread-safe cache combining LRU capacity eviction with per-entry TTL.

use std::borrow::Borrow;
use std::fmt::{self, Debug};
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use tracing::warn;

use crate::cache::{
    CacheEvent, CacheProvider, CacheStats, EventSink, ExpiringStore, Lookup, TracingSink,
};
use crate::config::Config;
use crate::error::{CacheError, Result};

// == Bounded Expiring Cache ==
/// In-process key/value cache bounded by entry count, with lazy TTL expiry.
///
/// A single mutex guards both the recency store and the expiry index, and
/// every public operation holds it for its whole read-modify-write. No
/// background work happens unless a sweeper is spawned explicitly (see
/// [`crate::tasks::spawn_sweeper`]).
///
/// Values are cloned in and out; callers never hold references into the
/// cache. Events go to the configured [`EventSink`] after the lock is
/// released.
pub struct BoundedExpiringCache<K, V> {
    inner: Mutex<ExpiringStore<K, V>>,
    capacity: usize,
    default_ttl: Duration,
    sink: Arc<dyn EventSink>,
}

impl<K, V> BoundedExpiringCache<K, V>
where
    K: Hash + Eq + Clone + Debug,
    V: Clone,
{
    // == Constructors ==
    /// Creates a cache logging through `tracing`.
    ///
    /// # Errors
    /// `InvalidConfiguration` when `capacity` is zero.
    pub fn new(capacity: usize, default_ttl: Duration) -> Result<Self> {
        Self::with_sink(capacity, default_ttl, Arc::new(TracingSink))
    }

    /// Creates a cache reporting events to `sink`.
    pub fn with_sink(
        capacity: usize,
        default_ttl: Duration,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidConfiguration(
                "capacity must be greater than 0".to_string(),
            ));
        }

        sink.record(&CacheEvent::Created {
            capacity,
            default_ttl,
        });

        Ok(Self {
            inner: Mutex::new(ExpiringStore::new(capacity)),
            capacity,
            default_ttl,
            sink,
        })
    }

    /// Creates a cache from loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        Self::new(config.capacity, config.default_ttl())
    }

    // == Set ==
    /// Inserts or overwrites `key`, expiring it `ttl` from now.
    ///
    /// May evict the least recently used unrelated key when at capacity.
    pub fn set(&self, key: K, value: V, ttl: Duration) {
        let now = Instant::now();
        let evicted = self.lock().set(key.clone(), value, ttl, now);

        self.sink.record(&CacheEvent::Set { key: &key, ttl });
        if let Some(evicted) = evicted {
            self.sink.record(&CacheEvent::Evicted { key: &evicted });
        }
    }

    /// Inserts or overwrites `key` using the cache's default TTL.
    pub fn set_default(&self, key: K, value: V) {
        self.set(key, value, self.default_ttl)
    }

    // == Get ==
    /// Returns a clone of the live value for `key`, promoting it.
    ///
    /// # Errors
    /// - `NotFound` if the key was never set, deleted or evicted
    /// - `Expired` if its TTL elapsed; the entry is purged by this call
    pub fn get<Q>(&self, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
    {
        let now = Instant::now();
        let lookup = self.lock().get(key, now);

        match lookup {
            Lookup::Hit(value) => {
                self.sink.record(&CacheEvent::Hit { key: &key });
                Ok(value)
            }
            Lookup::Miss => {
                self.sink.record(&CacheEvent::Miss { key: &key });
                Err(CacheError::NotFound(format!("{:?}", key)))
            }
            Lookup::Expired => {
                self.sink.record(&CacheEvent::Expired { key: &key });
                Err(CacheError::Expired(format!("{:?}", key)))
            }
        }
    }

    // == Delete ==
    /// Removes `key`. Deleting an absent key is a no-op.
    pub fn delete<Q>(&self, key: &Q)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
    {
        if self.lock().delete(key) {
            self.sink.record(&CacheEvent::Deleted { key: &key });
        }
    }

    // == Maintenance ==
    /// Eagerly removes every expired entry, returning how many were removed.
    pub fn purge_expired(&self) -> usize {
        let removed = self.lock().purge_expired(Instant::now());
        if removed > 0 {
            self.sink.record(&CacheEvent::Purged { removed });
        }
        removed
    }

    /// Drops every entry. Statistics counters are kept.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Time left before `key` expires, without promoting it.
    pub fn ttl_remaining<Q>(&self, key: &Q) -> Option<Duration>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.lock().ttl_remaining(key, Instant::now())
    }

    // == Introspection ==
    pub fn stats(&self) -> CacheStats {
        self.lock().stats()
    }

    /// Number of occupied slots, including expired entries not yet purged.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Keys occupying a slot, most recently used first.
    pub fn keys(&self) -> Vec<K> {
        self.lock().keys().cloned().collect()
    }

    /// Runs the dual-index consistency scan under the lock.
    pub fn is_consistent(&self) -> bool {
        self.lock().is_consistent()
    }

    /// Acquires the store, recovering from a poisoned lock.
    ///
    /// A panic inside a critical section (for instance from a key's `Hash`)
    /// can stop a mutation halfway. If the scan finds the indexes out of step
    /// after such a panic, the contents are dropped rather than served.
    fn lock(&self) -> MutexGuard<'_, ExpiringStore<K, V>> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                let mut guard = poisoned.into_inner();
                if !guard.is_consistent() {
                    warn!(
                        len = guard.len(),
                        "Discarding cache contents left inconsistent by a panic"
                    );
                    guard.clear();
                }
                self.inner.clear_poison();
                guard
            }
        }
    }
}

impl<K, V> Debug for BoundedExpiringCache<K, V>
where
    K: Hash + Eq + Clone + Debug,
    V: Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let store = self.lock();
        f.debug_struct("BoundedExpiringCache")
            .field("len", &store.len())
            .field("capacity", &self.capacity)
            .field("default_ttl", &self.default_ttl)
            .finish_non_exhaustive()
    }
}

impl<K, V> CacheProvider<K, V> for BoundedExpiringCache<K, V>
where
    K: Hash + Eq + Clone + Debug + Send,
    V: Clone + Send,
{
    fn set(&self, key: K, value: V, ttl: Duration) {
        BoundedExpiringCache::set(self, key, value, ttl)
    }

    fn get(&self, key: &K) -> Result<V> {
        BoundedExpiringCache::get(self, key)
    }

    fn delete(&self, key: &K) {
        BoundedExpiringCache::delete(self, key)
    }
}
