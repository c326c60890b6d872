//! Raw Input Module
//!
//! Host plugin interfaces hand over buffers together with a signed declared
//! length. Lengths are validated here before any byte is read, so a bad
//! length never reaches the cache.

use crate::cache::{Clock, QueryCache};
use crate::error::{CacheError, Result};

// == Declared Slice ==
/// Returns the first `declared_len` bytes of `buf`.
///
/// Negative lengths and lengths past the end of `buf` are rejected.
pub fn declared_slice(buf: &[u8], declared_len: i64) -> Result<&[u8]> {
    let invalid = || CacheError::InvalidLength {
        declared: declared_len,
        available: buf.len(),
    };
    let len = usize::try_from(declared_len).map_err(|_| invalid())?;
    buf.get(..len).ok_or_else(invalid)
}

impl<C: Clock> QueryCache<C> {
    /// `get` for a length-declared key buffer.
    pub fn get_raw(&mut self, key: &[u8], key_len: i64) -> Result<Option<&[u8]>> {
        let key = declared_slice(key, key_len)?;
        Ok(self.get(key))
    }

    /// `put` for length-declared key and value buffers.
    ///
    /// Both lengths are checked before the cache is touched.
    pub fn put_raw(&mut self, key: &[u8], key_len: i64, value: &[u8], value_len: i64) -> Result<()> {
        let key = declared_slice(key, key_len)?;
        let value = declared_slice(value, value_len)?;
        self.put(key, value);
        Ok(())
    }
}
