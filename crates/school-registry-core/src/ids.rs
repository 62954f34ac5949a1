//! Identifier types for the school registry.
//!
//! School identifiers are ULIDs, so their byte order is their creation order.
//! Stores rely on that to list records in insertion order.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ulid::Ulid;

/// A school identifier using ULID for time-ordering.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SchoolId(Ulid);

impl SchoolId {
    /// Generate a new `SchoolId` with the current timestamp.
    ///
    /// Ids generated this way are not monotonic within one millisecond; stores
    /// use [`SchoolIdGenerator`] instead.
    #[must_use]
    pub fn generate() -> Self {
        Self(Ulid::new())
    }

    /// Return the bytes of the ULID (16 bytes).
    #[must_use]
    pub fn to_bytes(&self) -> [u8; 16] {
        self.0.to_bytes()
    }

    /// Create a `SchoolId` from bytes.
    #[must_use]
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(Ulid::from_bytes(bytes))
    }
}

impl FromStr for SchoolId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ulid = Ulid::from_string(s).map_err(|_| IdError::InvalidUlid)?;
        Ok(Self(ulid))
    }
}

impl fmt::Debug for SchoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SchoolId({})", self.0)
    }
}

impl fmt::Display for SchoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for SchoolId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SchoolId> for String {
    fn from(id: SchoolId) -> Self {
        id.0.to_string()
    }
}

/// Monotonic `SchoolId` source.
///
/// Ids from one generator strictly increase, even when several are issued in
/// the same millisecond.
pub struct SchoolIdGenerator(ulid::Generator);

impl SchoolIdGenerator {
    /// Create a new generator.
    #[must_use]
    pub fn new() -> Self {
        Self(ulid::Generator::new())
    }

    /// Issue the next identifier.
    ///
    /// # Errors
    ///
    /// Returns `IdError::Exhausted` if the random component overflowed within
    /// the current millisecond.
    pub fn next_id(&mut self) -> Result<SchoolId, IdError> {
        self.0
            .generate()
            .map(SchoolId)
            .map_err(|_| IdError::Exhausted)
    }
}

impl Default for SchoolIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SchoolIdGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SchoolIdGenerator")
    }
}

/// Errors that can occur when parsing or issuing identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// The input is not a valid ULID.
    #[error("invalid ULID format")]
    InvalidUlid,

    /// No more ids can be issued in the current millisecond.
    #[error("identifier space exhausted for the current millisecond")]
    Exhausted,
}
