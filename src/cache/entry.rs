//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::mem;

use crate::error::{CacheError, Result};

// == Cache Entry ==
/// A cached query result with its access metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// Raw query key, compared byte for byte
    pub key: Vec<u8>,
    /// Cached result bytes
    pub value: Vec<u8>,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Last successful lookup (Unix milliseconds)
    pub last_access_at: u64,
    /// Number of successful lookups, starting at 1 on insertion
    pub access_count: u64,
}

impl CacheEntry {
    /// Fixed bookkeeping cost charged to every entry against the byte budget.
    pub const OVERHEAD: usize = mem::size_of::<CacheEntry>();

    // == Constructor ==
    /// Creates a new cache entry stamped at `now_ms`.
    ///
    /// Key and value are copied with fallible allocation so that an
    /// exhausted allocator surfaces as an error instead of an abort.
    pub fn new(key: &[u8], value: &[u8], now_ms: u64) -> Result<Self> {
        Ok(Self {
            key: try_copy(key)?,
            value: try_copy(value)?,
            created_at: now_ms,
            last_access_at: now_ms,
            access_count: 1,
        })
    }

    /// Size charged against the cache byte budget.
    pub fn size(&self) -> usize {
        charged_size(self.key.len(), self.value.len())
    }

    // == Is Expired ==
    /// Checks whether the entry outlived `ttl_ms`.
    ///
    /// An entry whose age equals the TTL is still live; only a strictly
    /// greater age expires it.
    pub fn is_expired(&self, now_ms: u64, ttl_ms: u64) -> bool {
        now_ms.saturating_sub(self.created_at) > ttl_ms
    }

    /// Records a successful lookup.
    pub fn touch(&mut self, now_ms: u64) {
        self.last_access_at = now_ms;
        self.access_count += 1;
    }

    /// Returns true if `pattern` occurs anywhere in the key.
    ///
    /// An empty pattern matches every key.
    pub fn key_contains(&self, pattern: &[u8]) -> bool {
        if pattern.is_empty() {
            return true;
        }
        self.key
            .windows(pattern.len())
            .any(|window| window == pattern)
    }
}

// == Utility Functions ==
/// Size an entry with the given key and value lengths would be charged.
pub fn charged_size(key_len: usize, value_len: usize) -> usize {
    key_len
        .saturating_add(value_len)
        .saturating_add(CacheEntry::OVERHEAD)
}

fn try_copy(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(bytes.len())
        .map_err(|_| CacheError::Allocation {
            requested: bytes.len(),
        })?;
    buf.extend_from_slice(bytes);
    Ok(buf)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new(b"SELECT 1", b"1", 1_000).unwrap();

        assert_eq!(entry.key, b"SELECT 1");
        assert_eq!(entry.value, b"1");
        assert_eq!(entry.created_at, 1_000);
        assert_eq!(entry.last_access_at, 1_000);
        assert_eq!(entry.access_count, 1);
    }

    #[test]
    fn test_entry_size_includes_overhead() {
        let entry = CacheEntry::new(b"abc", b"12345", 0).unwrap();
        assert_eq!(entry.size(), 3 + 5 + CacheEntry::OVERHEAD);
        assert_eq!(charged_size(3, 5), entry.size());
        assert!(CacheEntry::OVERHEAD > 0);
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let entry = CacheEntry::new(b"k", b"v", 1_000).unwrap();

        // Age equal to TTL is still live
        assert!(!entry.is_expired(1_000 + 5_000, 5_000));
        // One millisecond past TTL expires it
        assert!(entry.is_expired(1_000 + 5_001, 5_000));
    }

    #[test]
    fn test_expiration_clock_behind_creation() {
        let entry = CacheEntry::new(b"k", b"v", 10_000).unwrap();
        assert!(!entry.is_expired(5_000, 0));
    }

    #[test]
    fn test_touch_updates_access_metadata() {
        let mut entry = CacheEntry::new(b"k", b"v", 1_000).unwrap();

        entry.touch(2_000);
        entry.touch(3_000);

        assert_eq!(entry.created_at, 1_000);
        assert_eq!(entry.last_access_at, 3_000);
        assert_eq!(entry.access_count, 3);
    }

    #[test]
    fn test_key_contains() {
        let entry = CacheEntry::new(b"SELECT * FROM users WHERE id = 1", b"", 0).unwrap();

        assert!(entry.key_contains(b"users"));
        assert!(entry.key_contains(b"SELECT"));
        assert!(entry.key_contains(b""));
        assert!(!entry.key_contains(b"Users"));
        assert!(!entry.key_contains(b"orders"));
    }

    #[test]
    fn test_key_contains_pattern_longer_than_key() {
        let entry = CacheEntry::new(b"ab", b"", 0).unwrap();
        assert!(!entry.key_contains(b"abc"));
    }

    #[test]
    fn test_binary_keys() {
        let entry = CacheEntry::new(&[0, 1, 0, 2], b"", 0).unwrap();
        assert!(entry.key_contains(&[0, 2]));
        assert!(!entry.key_contains(&[2, 0]));
    }
}
