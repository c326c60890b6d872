//! Query Cache Demo
//!
//! Drives a shared query cache the way a database host would: cache query
//! results, serve repeats from the cache, invalidate on writes.

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use query_cache::{CacheConfig, SharedQueryCache};

const QUERIES: &[(&str, &str)] = &[
    ("SELECT * FROM users WHERE id = 1", "1|alice"),
    ("SELECT * FROM users WHERE id = 2", "2|bob"),
    ("SELECT count(*) FROM orders", "42"),
    ("SELECT name FROM products LIMIT 3", "lamp,desk,chair"),
];

/// Main entry point for the demo.
///
/// # Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load cache limits from environment variables
/// 3. Populate the cache and replay lookups
/// 4. Invalidate one table and report statistics
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "query_cache=info,query_cache_demo=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = CacheConfig::from_env();
    info!(
        "Configuration loaded: max_entries={}, max_bytes={}, ttl={}s, dedupe_on_put={}",
        config.max_entries, config.max_bytes, config.ttl_secs, config.dedupe_on_put
    );

    let cache = SharedQueryCache::from_config(config).context("invalid cache configuration")?;

    for (query, result) in QUERIES {
        if cache.get(query.as_bytes()).await.is_none() {
            cache.put(query.as_bytes(), result.as_bytes()).await;
        }
    }

    for (query, _) in QUERIES {
        if let Some(result) = cache.get(query.as_bytes()).await {
            info!("Cache hit: {} -> {}", query, String::from_utf8_lossy(&result));
        }
    }

    let removed = cache.invalidate(b"users").await;
    info!("Write to users invalidated {} cached queries", removed);

    let stats = cache.stats().await;
    info!(
        "Cache stats: {}",
        serde_json::to_string(&stats).context("failed to encode stats")?
    );
    info!("Hit rate: {:.2}", stats.hit_rate());

    Ok(())
}
