//! Query Cache - An in-process query result cache
//!
//! Stores opaque result bytes under raw query keys with LRU eviction, a byte
//! budget, TTL expiration and substring invalidation.

pub mod cache;
pub mod config;
pub mod error;
pub mod input;
pub mod shared;

pub use cache::{CacheEntry, CacheStats, Clock, ManualClock, QueryCache, SystemClock};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
pub use shared::SharedQueryCache;
