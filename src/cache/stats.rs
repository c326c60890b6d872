//! Cache Statistics Module
//!
//! Tracks cache activity: hits, misses and every way an entry can leave.

use serde::Serialize;

// == Cache Stats ==
/// Cache activity counters plus current occupancy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Number of successful lookups
    pub hits: u64,
    /// Number of failed lookups (key not found or expired)
    pub misses: u64,
    /// Number of entries inserted by put
    pub insertions: u64,
    /// Number of entries evicted under capacity pressure
    pub evictions: u64,
    /// Number of entries purged because their TTL elapsed
    pub expirations: u64,
    /// Number of entries removed by invalidate
    pub invalidations: u64,
    /// Number of same-key entries replaced when dedupe is enabled
    pub replaced: u64,
    /// Number of puts discarded because the entry could not be stored
    pub dropped: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
    /// Current aggregate entry size in bytes
    pub total_bytes: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Record Hit ==
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Insertion ==
    /// Increments the insertion counter.
    pub fn record_insertion(&mut self) {
        self.insertions += 1;
    }

    // == Record Eviction ==
    /// Increments the eviction counter.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    // == Record Expiration ==
    /// Increments the expiration counter.
    pub fn record_expiration(&mut self) {
        self.expirations += 1;
    }

    // == Record Invalidations ==
    /// Adds `count` entries removed by one invalidate call.
    pub fn record_invalidations(&mut self, count: usize) {
        self.invalidations += count as u64;
    }

    // == Record Replaced ==
    /// Increments the same-key replacement counter.
    pub fn record_replaced(&mut self) {
        self.replaced += 1;
    }

    // == Record Drop ==
    /// Increments the dropped put counter.
    pub fn record_drop(&mut self) {
        self.dropped += 1;
    }

    // == Update Occupancy ==
    /// Updates the current entry and byte totals.
    pub fn set_occupancy(&mut self, entries: usize, bytes: usize) {
        self.total_entries = entries;
        self.total_bytes = bytes;
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = CacheStats::new();
        assert_eq!(stats, CacheStats::default());
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.total_bytes, 0);
    }

    #[test]
    fn test_hit_rate_no_requests() {
        let stats = CacheStats::new();
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_hit();
        stats.record_hit();
        stats.record_miss();
        assert_eq!(stats.hit_rate(), 0.75);
    }

    #[test]
    fn test_removal_counters() {
        let mut stats = CacheStats::new();
        stats.record_eviction();
        stats.record_expiration();
        stats.record_expiration();
        stats.record_invalidations(3);
        stats.record_replaced();
        stats.record_drop();

        assert_eq!(stats.evictions, 1);
        assert_eq!(stats.expirations, 2);
        assert_eq!(stats.invalidations, 3);
        assert_eq!(stats.replaced, 1);
        assert_eq!(stats.dropped, 1);
    }

    #[test]
    fn test_stats_serialize() {
        let mut stats = CacheStats::new();
        stats.record_insertion();
        stats.set_occupancy(1, 96);

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["insertions"], 1);
        assert_eq!(json["total_entries"], 1);
        assert_eq!(json["total_bytes"], 96);
    }
}
