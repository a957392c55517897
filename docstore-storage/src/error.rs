//! Error types for the storage layer.

use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur in storage operations.
///
/// A missing collection file is not an error; it is created on first access.
#[derive(Debug, Error)]
pub enum StorageError {
    /// IO error (file system).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error, including malformed collection files.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Entity data that cannot be stored (e.g. not a JSON object).
    #[error("invalid data: {0}")]
    InvalidData(#[from] docstore_model::ModelError),

    /// The id rule has no id left above the stored ones.
    #[error("entity ids exhausted for kind {0}")]
    IdExhausted(&'static str),

    /// A writer panicked while holding the collection lock.
    #[error("collection lock poisoned: {0}")]
    LockPoisoned(String),
}
