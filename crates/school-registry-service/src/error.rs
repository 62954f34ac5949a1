//! API error types and responses.
//!
//! Failures are reported with two body shapes that existing clients depend
//! on: `{ "error": ... }` for 500 and 401, and `{ "msg": ... }` for 404.

use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use school_registry_store::StoreError;

/// The school operation a handler was performing when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// `POST /api/schools`
    Create,
    /// `GET /api/schools`
    List,
    /// `GET /api/schools/{id}`
    Fetch,
    /// `PUT /api/schools/{id}`
    Update,
    /// `DELETE /api/schools/{id}`
    Delete,
}

impl Operation {
    /// The static message returned to callers when this operation fails.
    #[must_use]
    pub const fn failure_message(self) -> &'static str {
        match self {
            Self::Create => "Error creating school",
            Self::List => "Error fetching schools",
            Self::Fetch => "Error fetching school",
            Self::Update => "Error updating school",
            Self::Delete => "Error deleting school",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Create => "create",
            Self::List => "list",
            Self::Fetch => "fetch",
            Self::Update => "update",
            Self::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// API error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Unauthorized - missing or invalid credentials.
    #[error("unauthorized")]
    Unauthorized,

    /// No school has the requested identifier.
    #[error("school not found")]
    NotFound,

    /// The request broke a schema or uniqueness rule, or named a malformed id.
    #[error("{operation} failed validation: {reason}")]
    ValidationFailed {
        /// The operation that failed.
        operation: Operation,
        /// Why, for the server log only.
        reason: String,
    },

    /// The store could not complete the operation.
    #[error("{operation} failed in store: {reason}")]
    StoreUnavailable {
        /// The operation that failed.
        operation: Operation,
        /// Why, for the server log only.
        reason: String,
    },
}

impl ApiError {
    /// Build a validation failure for `operation`.
    pub fn validation(operation: Operation, reason: impl fmt::Display) -> Self {
        Self::ValidationFailed {
            operation,
            reason: reason.to_string(),
        }
    }

    /// Classify a store error raised while performing `operation`.
    #[must_use]
    pub fn from_store(operation: Operation, err: StoreError) -> Self {
        match err {
            StoreError::NotFound => Self::NotFound,
            StoreError::DuplicateDomain { .. } => Self::validation(operation, err),
            StoreError::Database(_) | StoreError::Serialization(_) => Self::StoreUnavailable {
                operation,
                reason: err.to_string(),
            },
        }
    }
}

/// Error body for 401 and 500 responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorMessage {
    /// Static description of the failure.
    #[schema(example = "Error creating school")]
    pub error: String,
}

/// Body for 404 responses and delete confirmations.
#[derive(Debug, Serialize, ToSchema)]
pub struct StatusMessage {
    /// Human-readable status.
    #[schema(example = "School not found")]
    pub msg: String,
}

impl StatusMessage {
    /// Wrap a message.
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorMessage {
                    error: "unauthorized".into(),
                }),
            )
                .into_response(),
            Self::NotFound => (
                StatusCode::NOT_FOUND,
                Json(StatusMessage::new("School not found")),
            )
                .into_response(),
            Self::ValidationFailed { operation, reason } => {
                tracing::warn!(%operation, error = %reason, "Rejected invalid school request");
                failure(operation)
            }
            Self::StoreUnavailable { operation, reason } => {
                tracing::error!(%operation, error = %reason, "Store operation failed");
                failure(operation)
            }
        }
    }
}

fn failure(operation: Operation) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorMessage {
            error: operation.failure_message().into(),
        }),
    )
        .into_response()
}
