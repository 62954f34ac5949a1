//! School Registry HTTP API Service.
//!
//! This crate provides the HTTP API for managing schools:
//!
//! - School CRUD under `/api/schools`
//! - Health check
//! - OpenAPI document at `/api-docs/openapi.json`
//!
//! # Authentication
//!
//! All `/api` routes require an `Authorization: Bearer <jwt>` header carrying
//! an HS256 token signed with the configured `JWT_SECRET`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are noisy for Axum handler functions
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result
#![allow(clippy::unused_async)] // Handlers over the sync store still need async

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod shutdown;
pub mod state;

pub use config::ServiceConfig;
pub use error::ApiError;
pub use handlers::docs::ApiDoc;
pub use routes::create_router;
pub use state::AppState;
