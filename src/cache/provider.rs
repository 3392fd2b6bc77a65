//! Cache Provider Module
//!
//! The capability surface callers program against.

use std::sync::Arc;
use std::time::Duration;

use crate::error::Result;

// == Cache Provider ==
/// Minimal set/get/delete surface shared by cache implementations.
///
/// `get` reports absence through `CacheError::NotFound` or
/// `CacheError::Expired`; `set` and `delete` cannot fail.
pub trait CacheProvider<K, V>: Send + Sync {
    fn set(&self, key: K, value: V, ttl: Duration);

    fn get(&self, key: &K) -> Result<V>;

    fn delete(&self, key: &K);
}

impl<K, V, P> CacheProvider<K, V> for Arc<P>
where
    P: CacheProvider<K, V> + ?Sized,
{
    fn set(&self, key: K, value: V, ttl: Duration) {
        (**self).set(key, value, ttl)
    }

    fn get(&self, key: &K) -> Result<V> {
        (**self).get(key)
    }

    fn delete(&self, key: &K) {
        (**self).delete(key)
    }
}
