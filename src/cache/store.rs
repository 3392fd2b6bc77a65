//! Cache Store Module
//!
//! Unsynchronized core pairing the LRU store with the expiry index.
//! Every mutation of either structure goes through this type, which keeps
//! their key sets identical.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

use crate::cache::{CacheStats, Deadline, LruStore};

// == Lookup ==
/// Outcome of a read against the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<V> {
    /// Live entry; the key was promoted to most recently used
    Hit(V),
    /// Key is not stored
    Miss,
    /// Key was stored but its deadline passed; it has now been purged
    Expired,
}

// == Expiring Store ==
/// LRU store plus expiry index plus statistics.
///
/// Callers pass `now` explicitly so the store itself never reads a clock.
#[derive(Debug)]
pub struct ExpiringStore<K, V> {
    /// Recency-ordered values
    lru: LruStore<K, V>,
    /// Key to absolute expiration instant
    expiry: HashMap<K, Deadline>,
    /// Performance statistics
    stats: CacheStats,
}

impl<K, V> ExpiringStore<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    // == Constructor ==
    pub fn new(capacity: usize) -> Self {
        Self {
            lru: LruStore::new(capacity),
            expiry: HashMap::with_capacity(capacity),
            stats: CacheStats::new(),
        }
    }

    // == Set ==
    /// Upserts `key` with a deadline of `now + ttl`.
    ///
    /// A prior deadline for the same key is replaced, never merged. When the
    /// insert overflows capacity the least recently used key is dropped from
    /// both indexes and returned.
    pub fn set(&mut self, key: K, value: V, ttl: Duration, now: Instant) -> Option<K> {
        let evicted = self.lru.insert(key.clone(), value).map(|(evicted, _)| {
            self.expiry.remove(&evicted);
            self.stats.record_eviction();
            evicted
        });

        self.expiry.insert(key, Deadline::after(now, ttl));
        self.stats.set_total_entries(self.lru.len());
        evicted
    }

    // == Get ==
    /// Looks `key` up, purging it if its deadline has passed.
    ///
    /// The deadline is checked before the LRU store is touched, so an expired
    /// entry is never served or promoted.
    pub fn get<Q>(&mut self, key: &Q, now: Instant) -> Lookup<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let deadline = match self.expiry.get(key) {
            Some(deadline) => *deadline,
            None => {
                self.stats.record_miss();
                return Lookup::Miss;
            }
        };

        if deadline.is_expired_at(now) {
            self.remove_entry(key);
            self.stats.record_miss();
            self.stats.record_expirations(1);
            return Lookup::Expired;
        }

        match self.lru.get(key) {
            Some(value) => {
                let value = value.clone();
                self.stats.record_hit();
                Lookup::Hit(value)
            }
            None => {
                // Unreachable while the indexes agree; heal rather than serve a ghost
                self.expiry.remove(key);
                self.stats.record_miss();
                Lookup::Miss
            }
        }
    }

    // == Delete ==
    /// Removes `key` from both indexes. Returns whether it was present.
    pub fn delete<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.remove_entry(key)
    }

    // == Purge Expired ==
    /// Removes every entry whose deadline has passed at `now`.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self, now: Instant) -> usize {
        let expired: Vec<K> = self
            .expiry
            .iter()
            .filter(|(_, deadline)| deadline.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            self.remove_entry(key);
        }

        self.stats.record_expirations(expired.len());
        expired.len()
    }

    /// Drops every entry. Statistics counters are kept.
    pub fn clear(&mut self) {
        self.lru.clear();
        self.expiry.clear();
        self.stats.set_total_entries(0);
    }

    /// Time left for `key` without promoting it, None when absent.
    pub fn ttl_remaining<Q>(&self, key: &Q, now: Instant) -> Option<Duration>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.expiry.get(key).map(|deadline| deadline.remaining_at(now))
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.lru.len());
        stats
    }

    pub fn len(&self) -> usize {
        self.lru.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lru.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.lru.capacity()
    }

    /// Keys from most to least recently used, ignoring TTL.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.lru.keys()
    }

    // == Consistency Scan ==
    /// Verifies the two indexes hold the same key set and capacity holds.
    pub fn is_consistent(&self) -> bool {
        self.lru.len() <= self.lru.capacity()
            && self.lru.keys().count() == self.lru.len()
            && self.lru.len() == self.expiry.len()
            && self.lru.keys().all(|key| self.expiry.contains_key(key))
    }

    fn remove_entry<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let in_lru = self.lru.remove(key).is_some();
        let in_expiry = self.expiry.remove(key).is_some();
        self.stats.set_total_entries(self.lru.len());
        in_lru || in_expiry
    }
}
