//! Cache Module
//!
//! Provides the in-memory query result cache with LRU eviction, a byte
//! budget, TTL expiration and substring invalidation.

mod clock;
mod entry;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use lru::{LruList, SlotId};
pub use stats::CacheStats;
pub use store::QueryCache;
