//! Core types for the school registry.
//!
//! This crate provides the types shared by the store and the HTTP service:
//!
//! - **Identifiers**: `SchoolId`, `SchoolIdGenerator`
//! - **Schools**: `School`, `NewSchool`, `SchoolPatch`, `SchoolFields`
//! - **Errors**: `ValidationError`, `IdError`
//!
//! # Validation
//!
//! Request bodies arrive as [`SchoolFields`], where every field is optional.
//! They become a [`NewSchool`] (for inserts) or a [`SchoolPatch`] (for
//! updates) through `TryFrom`, which is the only place required-field rules
//! are checked. Uniqueness of `domain` is enforced by the store.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod ids;
pub mod school;

pub use error::{Result, ValidationError};
pub use ids::{IdError, SchoolId, SchoolIdGenerator};
pub use school::{NewSchool, School, SchoolFields, SchoolPatch};
