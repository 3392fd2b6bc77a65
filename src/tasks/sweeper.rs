//! Expiry Sweeper Task
//!
//! Background task that periodically purges expired cache entries, so keys
//! nobody reads again do not hold a slot until capacity pressure evicts them.

use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::BoundedExpiringCache;

/// Spawns a background task that periodically purges expired entries.
///
/// The task loops forever, sleeping for `interval` between sweeps. Each sweep
/// takes the cache lock once, like any other operation.
///
/// # Returns
/// A JoinHandle for the spawned task; abort it to stop sweeping.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(BoundedExpiringCache::new(1000, Duration::from_secs(300))?);
/// let sweeper = spawn_sweeper(cache.clone(), Duration::from_secs(1));
/// // Later, during shutdown:
/// sweeper.abort();
/// ```
pub fn spawn_sweeper<K, V>(
    cache: Arc<BoundedExpiringCache<K, V>>,
    interval: Duration,
) -> JoinHandle<()>
where
    K: Hash + Eq + Clone + Debug + Send + 'static,
    V: Clone + Send + 'static,
{
    tokio::spawn(async move {
        info!(?interval, "Starting expiry sweeper");

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.purge_expired();

            if removed > 0 {
                debug!(removed, "Sweep removed expired entries");
            } else {
                debug!("Sweep found no expired entries");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CacheError;

    fn shared_cache() -> Arc<BoundedExpiringCache<String, String>> {
        Arc::new(BoundedExpiringCache::new(100, Duration::from_secs(300)).unwrap())
    }

    #[tokio::test]
    async fn test_sweeper_removes_expired_entries() {
        let cache = shared_cache();
        cache.set(
            "expire_soon".to_string(),
            "value".to_string(),
            Duration::from_millis(50),
        );

        let handle = spawn_sweeper(cache.clone(), Duration::from_millis(100));

        tokio::time::sleep(Duration::from_millis(350)).await;

        // Purged by the sweeper, so a read sees NotFound rather than Expired
        assert!(cache.is_empty());
        assert!(matches!(
            cache.get("expire_soon"),
            Err(CacheError::NotFound(_))
        ));
        assert_eq!(cache.stats().expirations, 1);

        handle.abort();
    }

    #[tokio::test]
    async fn test_sweeper_preserves_valid_entries() {
        let cache = shared_cache();
        cache.set(
            "long_lived".to_string(),
            "value".to_string(),
            Duration::from_secs(3600),
        );

        let handle = spawn_sweeper(cache.clone(), Duration::from_millis(50));

        tokio::time::sleep(Duration::from_millis(200)).await;

        assert_eq!(cache.get("long_lived"), Ok("value".to_string()));

        handle.abort();
    }

    #[tokio::test]
    async fn test_sweeper_can_be_aborted() {
        let handle = spawn_sweeper(shared_cache(), Duration::from_secs(1));

        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
