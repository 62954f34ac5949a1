//! Database schema definitions and column families.
//!
//! This module defines the column families used in `RocksDB` storage.

/// Column family names for the `RocksDB` database.
pub mod cf {
    /// School records, keyed by `school_id` (ULID bytes, so iteration is
    /// insertion order).
    pub const SCHOOLS: &str = "schools";

    /// Index: school id by domain, keyed by the domain's UTF-8 bytes.
    pub const SCHOOLS_BY_DOMAIN: &str = "schools_by_domain";
}

/// Returns all column family names for database initialization.
#[must_use]
pub fn all_column_families() -> Vec<&'static str> {
    vec![cf::SCHOOLS, cf::SCHOOLS_BY_DOMAIN]
}
