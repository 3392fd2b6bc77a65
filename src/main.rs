//! Expiring LRU - demo session against a bounded expiring cache
//!
//! Loads configuration from the environment, runs a short session round and
//! prints the resulting statistics as JSON.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use expiring_lru::{spawn_sweeper, BoundedExpiringCache, CacheError, Config};

/// Entry point for the demo binary.
///
/// # Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the cache and, if configured, the expiry sweeper
/// 4. Store, read and delete a session key
/// 5. Print statistics and stop the sweeper
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "expiring_lru=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    info!(
        capacity = config.capacity,
        default_ttl_secs = config.default_ttl_secs,
        sweep_interval_secs = config.sweep_interval_secs,
        "Configuration loaded"
    );

    let cache = Arc::new(
        BoundedExpiringCache::<String, String>::from_config(&config)
            .context("failed to build cache")?,
    );

    let sweeper = config
        .sweep_interval()
        .map(|interval| spawn_sweeper(cache.clone(), interval));

    let key = "session:456".to_string();
    cache.set(key.clone(), "Active".to_string(), Duration::from_secs(300));

    match cache.get(&key) {
        Ok(value) => info!(%key, %value, "Cached value"),
        Err(err @ (CacheError::NotFound(_) | CacheError::Expired(_))) => {
            warn!(%key, %err, "No cached value")
        }
        Err(err) => return Err(err.into()),
    }

    cache.delete(&key);

    let stats = serde_json::to_string_pretty(&cache.stats()).context("failed to encode stats")?;
    println!("{}", stats);

    if let Some(handle) = sweeper {
        handle.abort();
    }

    Ok(())
}
