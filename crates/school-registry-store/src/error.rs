//! Error types for school storage.

use school_registry_core::IdError;

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database operation failed.
    #[error("database error: {0}")]
    Database(String),

    /// Serialization/deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Record not found.
    #[error("not found")]
    NotFound,

    /// Another school already uses this domain.
    #[error("duplicate domain: {domain}")]
    DuplicateDomain {
        /// The domain that was already taken.
        domain: String,
    },
}

impl From<IdError> for StoreError {
    fn from(err: IdError) -> Self {
        Self::Database(err.to_string())
    }
}
