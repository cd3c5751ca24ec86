//! Error types for the store module.

use thiserror::Error;

/// Errors a state store can report.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite: {0}")]
    Database(#[from] rusqlite::Error),

    /// The store rejected the call for a backend-specific reason.
    #[error("backend error: {0}")]
    Backend(String),

    /// A lock guarding the store was poisoned by a panicking writer.
    #[error("store lock poisoned: {0}")]
    Poisoned(String),

    /// A stored row could not be interpreted.
    #[error("invalid stored data: {0}")]
    InvalidData(String),

    #[error("schema migration failed: {0}")]
    Migration(String),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
