//! Shared Cache Handle
//!
//! Serializes access to one cache instance for multi-threaded hosts.
//!
//! A single mutex per instance guards lookup, mutation and eviction together:
//! all four operations rewrite list links and the byte counter. Each call
//! holds the lock until it completes.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::cache::{CacheStats, Clock, QueryCache, SystemClock};
use crate::config::CacheConfig;
use crate::error::Result;

/// Cloneable handle to a mutex-guarded cache.
///
/// Clones refer to the same instance. Separate instances share nothing.
#[derive(Debug)]
pub struct SharedQueryCache<C = SystemClock> {
    inner: Arc<Mutex<QueryCache<C>>>,
}

impl<C> Clone for SharedQueryCache<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl SharedQueryCache<SystemClock> {
    /// Creates a shared cache from configuration.
    pub fn from_config(config: CacheConfig) -> Result<Self> {
        Ok(Self::new(QueryCache::with_config(config)?))
    }
}

impl<C: Clock> SharedQueryCache<C> {
    // == Constructor ==
    /// Wraps an existing cache.
    pub fn new(cache: QueryCache<C>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }

    // == Get ==
    /// Looks up `key`, returning an owned copy of the value.
    pub async fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        let mut cache = self.inner.lock().await;
        cache.get(key).map(<[u8]>::to_vec)
    }

    // == Put ==
    /// Stores `value` under `key`; may be dropped under pressure.
    pub async fn put(&self, key: &[u8], value: &[u8]) {
        self.inner.lock().await.put(key, value);
    }

    // == Invalidate ==
    /// Removes entries whose key contains `pattern`. Returns the count.
    pub async fn invalidate(&self, pattern: &[u8]) -> usize {
        self.inner.lock().await.invalidate(pattern)
    }

    // == Clear ==
    /// Removes all entries. Returns the count.
    pub async fn clear(&self) -> usize {
        self.inner.lock().await.clear()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub async fn stats(&self) -> CacheStats {
        self.inner.lock().await.stats()
    }

    // == Length ==
    /// Returns the number of entries.
    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    // == Is Empty ==
    /// Returns true if the cache holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.is_empty()
    }
}
