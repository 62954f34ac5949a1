//! In-memory storage implementation.
//!
//! Records live in a `BTreeMap` keyed by `SchoolId`, so iteration order is
//! insertion order just like the `RocksDB` backend. Nothing is persisted.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use school_registry_core::{NewSchool, School, SchoolId, SchoolIdGenerator, SchoolPatch};

use crate::error::{Result, StoreError};
use crate::Store;

#[derive(Debug, Default)]
struct Inner {
    schools: BTreeMap<SchoolId, School>,
    generator: SchoolIdGenerator,
}

impl Inner {
    fn domain_taken(&self, domain: &str, except: Option<&SchoolId>) -> bool {
        self.schools
            .values()
            .any(|school| school.domain == domain && Some(&school.id) != except)
    }
}

/// Process-local storage implementation.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Database("store lock poisoned".into()))
    }
}

impl Store for MemoryStore {
    fn insert_school(&self, school: NewSchool) -> Result<School> {
        let mut inner = self.lock()?;

        if inner.domain_taken(&school.domain, None) {
            return Err(StoreError::DuplicateDomain {
                domain: school.domain,
            });
        }

        let school = school.into_school(inner.generator.next_id()?);
        inner.schools.insert(school.id, school.clone());

        Ok(school)
    }

    fn list_schools(&self) -> Result<Vec<School>> {
        Ok(self.lock()?.schools.values().cloned().collect())
    }

    fn get_school(&self, id: &SchoolId) -> Result<Option<School>> {
        Ok(self.lock()?.schools.get(id).cloned())
    }

    fn update_school(&self, id: &SchoolId, patch: &SchoolPatch) -> Result<School> {
        let mut inner = self.lock()?;

        let mut school = inner.schools.get(id).cloned().ok_or(StoreError::NotFound)?;
        patch.apply_to(&mut school);

        if inner.domain_taken(&school.domain, Some(id)) {
            return Err(StoreError::DuplicateDomain {
                domain: school.domain,
            });
        }

        inner.schools.insert(*id, school.clone());

        Ok(school)
    }

    fn delete_school(&self, id: &SchoolId) -> Result<School> {
        self.lock()?.schools.remove(id).ok_or(StoreError::NotFound)
    }
}
