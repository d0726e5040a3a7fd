//! Error types for the TTL store
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Store Error Enum ==
/// Unified error type for the TTL store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Key not found in the store (absent or already expired)
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Key exceeds the maximum length of 32 characters
    #[error("Key exceeds maximum length of {limit} characters (got {actual})")]
    KeyTooLong { actual: usize, limit: usize },

    /// Payload is not syntactically valid JSON
    #[error("Value is not valid JSON: {0}")]
    MalformedJson(String),

    /// Payload exceeds the maximum encoded size of 16 KB
    #[error("Value exceeds maximum size of {limit} bytes (got {actual})")]
    ValueTooLarge { actual: usize, limit: usize },

    /// Snapshot file open/read/write failure
    #[error("Snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Corrupt record in a persisted snapshot
    #[error("Corrupt snapshot record at line {line}: {reason}")]
    CorruptRecord { line: usize, reason: String },
}

// == Result Type Alias ==
/// Convenience Result type for the TTL store.
pub type Result<T> = std::result::Result<T, StoreError>;
