//! Error types for the query cache
//!
//! Provides unified error handling using thiserror. A cache miss is not an
//! error: lookups report it as `None`.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the query cache.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// A declared buffer length was negative or ran past the buffer
    #[error("Invalid length: declared {declared}, available {available}")]
    InvalidLength { declared: i64, available: usize },

    /// Configuration values that would make the cache unusable
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Storage for a new entry could not be reserved
    #[error("Allocation of {requested} bytes failed")]
    Allocation { requested: usize },
}

// == Result Type Alias ==
/// Convenience Result type for the query cache.
pub type Result<T> = std::result::Result<T, CacheError>;
