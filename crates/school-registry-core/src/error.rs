//! Error types for school validation.

use crate::ids::IdError;

/// Result type for validation.
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Reasons a school write is rejected before it reaches the store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required field is absent, `null`, or empty.
    #[error("`{0}` is required")]
    MissingField(&'static str),

    /// The identifier in the request path could not be parsed.
    #[error("invalid identifier: {0}")]
    InvalidId(#[from] IdError),
}
