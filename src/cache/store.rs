//! Cache Store Module
//!
//! Main cache engine combining recency-ordered storage with a byte budget,
//! TTL expiration and substring invalidation.

use tracing::{debug, warn};

use crate::cache::entry::charged_size;
use crate::cache::lru::SlotId;
use crate::cache::{CacheEntry, CacheStats, Clock, LruList, SystemClock};
use crate::config::CacheConfig;
use crate::error::Result;

// == Query Cache ==
/// In-memory query result cache with LRU eviction and TTL support.
///
/// Each instance is owned by its caller; instances share no state.
#[derive(Debug)]
pub struct QueryCache<C = SystemClock> {
    /// Entries in MRU -> LRU order
    entries: LruList,
    /// Activity counters
    stats: CacheStats,
    /// Limits and policy switches
    config: CacheConfig,
    /// Sum of `size()` over all linked entries
    total_bytes: usize,
    /// Time source for TTL checks
    clock: C,
}

impl QueryCache<SystemClock> {
    // == Constructor ==
    /// Creates a cache with default limits (1000 entries, 64 MiB, 1 hour TTL).
    pub fn new() -> Self {
        Self::from_parts(CacheConfig::default(), SystemClock)
    }

    /// Creates a cache with the given limits using the system clock.
    pub fn with_config(config: CacheConfig) -> Result<Self> {
        Self::with_clock(config, SystemClock)
    }
}

impl Default for QueryCache<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> QueryCache<C> {
    /// Creates a cache with the given limits and time source.
    pub fn with_clock(config: CacheConfig, clock: C) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_parts(config, clock))
    }

    fn from_parts(config: CacheConfig, clock: C) -> Self {
        Self {
            entries: LruList::new(),
            stats: CacheStats::new(),
            config,
            total_bytes: 0,
            clock,
        }
    }

    // == Get ==
    /// Looks up `key` and returns its cached value.
    ///
    /// Walks entries from MRU to LRU, purging every expired entry it passes.
    /// The first live entry with an identical key wins: it is stamped,
    /// counted and moved to the MRU position. A miss inserts nothing.
    pub fn get(&mut self, key: &[u8]) -> Option<&[u8]> {
        let now = self.clock.now_ms();
        let ttl_ms = self.config.ttl_ms();

        let mut purged = 0usize;
        let mut found = None;
        let mut cursor = self.entries.head();

        while let Some(id) = cursor {
            cursor = self.entries.next(id);
            let Some(entry) = self.entries.get(id) else {
                break;
            };

            if entry.is_expired(now, ttl_ms) {
                self.remove_slot(id);
                self.stats.record_expiration();
                purged += 1;
                continue;
            }

            if entry.key == key {
                found = Some(id);
                break;
            }
        }

        if purged > 0 {
            debug!("Lookup purged {} expired entries", purged);
        }

        let Some(id) = found else {
            self.stats.record_miss();
            return None;
        };

        self.stats.record_hit();
        self.entries.move_to_front(id);
        let entry = self.entries.get_mut(id)?;
        entry.touch(now);
        Some(entry.value.as_slice())
    }

    // == Put ==
    /// Stores `value` under `key` at the MRU position.
    ///
    /// Always inserts a new entry. Unless `dedupe_on_put` is set, an older
    /// entry with the same key stays behind the new one until it expires or
    /// is evicted. LRU entries are evicted until the new entry fits; if it
    /// cannot fit even in an empty cache, or its storage cannot be
    /// allocated, the put is silently dropped.
    pub fn put(&mut self, key: &[u8], value: &[u8]) {
        let now = self.clock.now_ms();

        let entry = match CacheEntry::new(key, value, now) {
            Ok(entry) => entry,
            Err(err) => {
                warn!("Dropping cache put: {}", err);
                self.stats.record_drop();
                return;
            }
        };
        let size = entry.size();

        if self.config.dedupe_on_put {
            self.remove_key(key);
        }

        while self.entries.len() >= self.config.max_entries
            || self.total_bytes.saturating_add(size) > self.config.max_bytes
        {
            if !self.evict_lru() {
                warn!(
                    "Dropping cache put: entry of {} bytes exceeds budget of {} bytes",
                    size, self.config.max_bytes
                );
                self.stats.record_drop();
                return;
            }
        }

        self.entries.push_front(entry);
        self.total_bytes += size;
        self.stats.record_insertion();
    }

    // == Invalidate ==
    /// Removes every entry whose key contains `pattern` as a byte substring.
    ///
    /// Matching is case-sensitive. Returns the number of entries removed.
    pub fn invalidate(&mut self, pattern: &[u8]) -> usize {
        let mut removed = 0usize;
        let mut cursor = self.entries.head();

        while let Some(id) = cursor {
            cursor = self.entries.next(id);
            let matches = self
                .entries
                .get(id)
                .is_some_and(|entry| entry.key_contains(pattern));
            if matches {
                self.remove_slot(id);
                removed += 1;
            }
        }

        self.stats.record_invalidations(removed);
        debug!("Invalidated {} entries", removed);
        removed
    }

    // == Clear ==
    /// Removes all entries. Returns the number removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.clear();
        self.total_bytes = 0;
        debug!("Cleared {} entries", removed);
        removed
    }

    // == Peek ==
    /// Returns the entry `get` would hit, without touching or purging.
    pub fn peek(&self, key: &[u8]) -> Option<&CacheEntry> {
        let now = self.clock.now_ms();
        let ttl_ms = self.config.ttl_ms();
        self.entries
            .iter()
            .filter(|entry| !entry.is_expired(now, ttl_ms))
            .find(|entry| entry.key == key)
    }

    /// Returns true if a live entry exists for `key`.
    pub fn contains(&self, key: &[u8]) -> bool {
        self.peek(key).is_some()
    }

    /// Key of the next eviction candidate.
    pub fn peek_lru_key(&self) -> Option<&[u8]> {
        self.entries
            .tail()
            .and_then(|id| self.entries.get(id))
            .map(|entry| entry.key.as_slice())
    }

    /// Entries in MRU -> LRU order, including not-yet-purged expired ones.
    pub fn iter(&self) -> impl Iterator<Item = &CacheEntry> + '_ {
        self.entries.iter()
    }

    /// Keys in MRU -> LRU order.
    pub fn keys_mru(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.iter().map(|entry| entry.key.as_slice())
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_occupancy(self.entries.len(), self.total_bytes);
        stats
    }

    // == Length ==
    /// Returns the number of physically present entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Aggregate size of all entries in bytes.
    pub fn total_bytes(&self) -> usize {
        self.total_bytes
    }

    /// Limits this cache was created with.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Time source used for TTL checks and access timestamps.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Bytes an entry with this key and value would be charged.
    pub fn entry_size(key: &[u8], value: &[u8]) -> usize {
        charged_size(key.len(), value.len())
    }

    fn remove_slot(&mut self, id: SlotId) -> Option<CacheEntry> {
        let entry = self.entries.remove(id)?;
        self.total_bytes -= entry.size();
        Some(entry)
    }

    fn evict_lru(&mut self) -> bool {
        match self.entries.pop_back() {
            Some(evicted) => {
                self.total_bytes -= evicted.size();
                self.stats.record_eviction();
                debug!("Evicted LRU entry of {} bytes", evicted.size());
                true
            }
            None => false,
        }
    }

    fn remove_key(&mut self, key: &[u8]) {
        let mut cursor = self.entries.head();
        while let Some(id) = cursor {
            cursor = self.entries.next(id);
            if self.entries.get(id).is_some_and(|entry| entry.key == key) {
                self.remove_slot(id);
                self.stats.record_replaced();
            }
        }
    }
}
