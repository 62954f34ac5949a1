//! Document storage for the school registry.
//!
//! This crate persists [`School`] records and enforces the two rules the
//! schema cannot check on its own: every record gets a unique identifier, and
//! no two records share a `domain`.
//!
//! # Backends
//!
//! - [`RocksStore`] (feature `rocksdb-backend`): embedded `RocksDB` with a
//!   `schools` column family holding CBOR records keyed by id and a
//!   `schools_by_domain` column family mapping domain to id.
//! - [`MemoryStore`]: a process-local map, used in tests and when the
//!   `RocksDB` backend is not compiled in.
//!
//! # Example
//!
//! ```
//! use school_registry_core::NewSchool;
//! use school_registry_store::{MemoryStore, Store};
//!
//! let now = chrono::Utc::now();
//! let store = MemoryStore::new();
//! let school = store
//!     .insert_school(NewSchool {
//!         fa_name: "مدرسه".into(),
//!         en_name: "School".into(),
//!         domain: "school.example.com".into(),
//!         storage_bucket: "school-files".into(),
//!         mariadb_db_name: "school".into(),
//!         mariadb_username: "school".into(),
//!         mariadb_password: "secret".into(),
//!         created_at: now,
//!         updated_at: now,
//!     })
//!     .unwrap();
//!
//! assert_eq!(store.get_school(&school.id).unwrap(), Some(school));
//! assert_eq!(store.list_schools().unwrap().len(), 1);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod memory;

#[cfg(feature = "rocksdb-backend")]
pub mod keys;
#[cfg(feature = "rocksdb-backend")]
pub mod rocks;
#[cfg(feature = "rocksdb-backend")]
pub mod schema;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
#[cfg(feature = "rocksdb-backend")]
pub use rocks::RocksStore;

use school_registry_core::{NewSchool, School, SchoolId, SchoolPatch};

/// The storage trait defining all school operations.
///
/// Implementations serialize their writes so the `domain` uniqueness check
/// and the write that depends on it happen as one step.
pub trait Store: Send + Sync {
    /// Assign an identifier to `school` and persist it.
    ///
    /// # Errors
    ///
    /// - `StoreError::DuplicateDomain` if another school uses the domain.
    /// - `StoreError::Database` if the write fails.
    fn insert_school(&self, school: NewSchool) -> Result<School>;

    /// List all schools in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_schools(&self) -> Result<Vec<School>>;

    /// Get a school by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_school(&self, id: &SchoolId) -> Result<Option<School>>;

    /// Apply `patch` to a school and return the updated record.
    ///
    /// # Errors
    ///
    /// - `StoreError::NotFound` if the school doesn't exist.
    /// - `StoreError::DuplicateDomain` if the new domain belongs to another school.
    fn update_school(&self, id: &SchoolId, patch: &SchoolPatch) -> Result<School>;

    /// Delete a school and return the removed record.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the school doesn't exist.
    fn delete_school(&self, id: &SchoolId) -> Result<School>;
}
