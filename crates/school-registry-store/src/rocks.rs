//! `RocksDB` storage implementation.
//!
//! This module provides the `RocksStore` implementation of the `Store` trait.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use rocksdb::{
    BoundColumnFamily, ColumnFamilyDescriptor, DBWithThreadMode, IteratorMode, MultiThreaded,
    Options, WriteBatch,
};

use school_registry_core::{NewSchool, School, SchoolId, SchoolIdGenerator, SchoolPatch};

use crate::error::{Result, StoreError};
use crate::keys;
use crate::schema::{all_column_families, cf};
use crate::Store;

/// RocksDB-backed storage implementation.
pub struct RocksStore {
    db: Arc<DBWithThreadMode<MultiThreaded>>,
    /// Held for every write. Also owns the id generator so ids are issued in
    /// write order.
    writer: Mutex<SchoolIdGenerator>,
}

impl RocksStore {
    /// Open or create a `RocksDB` database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_descriptors: Vec<_> = all_column_families()
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect();

        let db = DBWithThreadMode::open_cf_descriptors(&opts, path, cf_descriptors)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(Self {
            db: Arc::new(db),
            writer: Mutex::new(SchoolIdGenerator::new()),
        })
    }

    /// Get a column family handle.
    fn cf(&self, name: &str) -> Result<Arc<BoundColumnFamily<'_>>> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StoreError::Database(format!("column family not found: {name}")))
    }

    /// Take the write lock.
    fn lock_writer(&self) -> Result<MutexGuard<'_, SchoolIdGenerator>> {
        self.writer
            .lock()
            .map_err(|_| StoreError::Database("write lock poisoned".into()))
    }

    /// Look up which school owns `domain`, if any.
    fn domain_owner(&self, domain: &str) -> Result<Option<SchoolId>> {
        let cf = self.cf(cf::SCHOOLS_BY_DOMAIN)?;

        self.db
            .get_cf(&cf, keys::domain_key(domain))
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| keys::decode_school_id(&data))
            .transpose()
    }

    /// Serialize a value using CBOR.
    fn serialize<T: serde::Serialize>(value: &T) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(value, &mut buf)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(buf)
    }

    /// Deserialize a value from CBOR.
    fn deserialize<T: serde::de::DeserializeOwned>(data: &[u8]) -> Result<T> {
        ciborium::from_reader(data).map_err(|e| StoreError::Serialization(e.to_string()))
    }
}

impl Store for RocksStore {
    fn insert_school(&self, school: NewSchool) -> Result<School> {
        let mut generator = self.lock_writer()?;

        if self.domain_owner(&school.domain)?.is_some() {
            return Err(StoreError::DuplicateDomain {
                domain: school.domain,
            });
        }

        let cf_schools = self.cf(cf::SCHOOLS)?;
        let cf_by_domain = self.cf(cf::SCHOOLS_BY_DOMAIN)?;

        let school = school.into_school(generator.next_id()?);
        let key = keys::school_key(&school.id);
        let value = Self::serialize(&school)?;

        let mut batch = WriteBatch::default();
        batch.put_cf(&cf_schools, &key, &value);
        batch.put_cf(&cf_by_domain, keys::domain_key(&school.domain), &key);

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        tracing::debug!(school_id = %school.id, domain = %school.domain, "School stored");

        Ok(school)
    }

    fn list_schools(&self) -> Result<Vec<School>> {
        let cf = self.cf(cf::SCHOOLS)?;

        self.db
            .iterator_cf(&cf, IteratorMode::Start)
            .map(|item| -> Result<School> {
                let (_, value) = item.map_err(|e| StoreError::Database(e.to_string()))?;
                Self::deserialize(&value)
            })
            .collect()
    }

    fn get_school(&self, id: &SchoolId) -> Result<Option<School>> {
        let cf = self.cf(cf::SCHOOLS)?;

        self.db
            .get_cf(&cf, keys::school_key(id))
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    fn update_school(&self, id: &SchoolId, patch: &SchoolPatch) -> Result<School> {
        let _writer = self.lock_writer()?;

        let mut school = self.get_school(id)?.ok_or(StoreError::NotFound)?;
        let previous_domain = school.domain.clone();
        patch.apply_to(&mut school);

        let cf_schools = self.cf(cf::SCHOOLS)?;
        let cf_by_domain = self.cf(cf::SCHOOLS_BY_DOMAIN)?;
        let key = keys::school_key(id);

        let mut batch = WriteBatch::default();

        if school.domain != previous_domain {
            if self
                .domain_owner(&school.domain)?
                .is_some_and(|owner| owner != *id)
            {
                return Err(StoreError::DuplicateDomain {
                    domain: school.domain,
                });
            }

            batch.delete_cf(&cf_by_domain, keys::domain_key(&previous_domain));
            batch.put_cf(&cf_by_domain, keys::domain_key(&school.domain), &key);
        }

        batch.put_cf(&cf_schools, &key, Self::serialize(&school)?);

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(school)
    }

    fn delete_school(&self, id: &SchoolId) -> Result<School> {
        let _writer = self.lock_writer()?;

        let school = self.get_school(id)?.ok_or(StoreError::NotFound)?;

        let cf_schools = self.cf(cf::SCHOOLS)?;
        let cf_by_domain = self.cf(cf::SCHOOLS_BY_DOMAIN)?;

        let mut batch = WriteBatch::default();
        batch.delete_cf(&cf_schools, keys::school_key(id));
        batch.delete_cf(&cf_by_domain, keys::domain_key(&school.domain));

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(school)
    }
}
