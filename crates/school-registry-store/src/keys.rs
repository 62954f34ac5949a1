//! Key encoding utilities for `RocksDB`.

use school_registry_core::SchoolId;

use crate::error::{Result, StoreError};

/// Create a school key from a school ID.
#[must_use]
pub fn school_key(id: &SchoolId) -> Vec<u8> {
    id.to_bytes().to_vec()
}

/// Create a domain index key.
#[must_use]
pub fn domain_key(domain: &str) -> Vec<u8> {
    domain.as_bytes().to_vec()
}

/// Decode a school ID stored as a key or as a domain index value.
///
/// # Errors
///
/// Returns `StoreError::Database` if the bytes are not 16 long.
pub fn decode_school_id(bytes: &[u8]) -> Result<SchoolId> {
    let bytes: [u8; 16] = bytes
        .try_into()
        .map_err(|_| StoreError::Database(format!("corrupt school id: {} bytes", bytes.len())))?;
    Ok(SchoolId::from_bytes(bytes))
}
