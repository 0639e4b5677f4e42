//! Sled-backed storage adapter.

use std::path::Path;

use sled::{Db, Tree};

use super::{Record, RecordIter, StorageAdapter};
use crate::error::Error;
use crate::schema::Collection;

/// Persistent storage adapter wrapping sled.
///
/// One tree per collection; keys are big-endian i64 so iteration yields
/// key order. Every sled failure maps to [`Error::StorageUnavailable`]:
/// the backend being down is fatal to the request, not to the process.
pub struct SledAdapter {
    /// The underlying sled database.
    db: Db,

    /// Tree for the users collection.
    users: Tree,

    /// Tree for the documents collection.
    documents: Tree,
}

impl SledAdapter {
    /// Open or create a store at the given path.
    pub fn open(path: &Path) -> Result<Self, Error> {
        let db = sled::open(path).map_err(storage_error)?;
        let users = db.open_tree(Collection::Users.as_str()).map_err(storage_error)?;
        let documents = db
            .open_tree(Collection::Documents.as_str())
            .map_err(storage_error)?;

        Ok(Self {
            db,
            users,
            documents,
        })
    }

    /// Insert a record during provisioning.
    ///
    /// The record must carry an integer `id` field.
    pub fn insert(&self, collection: Collection, record: Record) -> Result<(), Error> {
        let key = record.key().ok_or_else(|| {
            Error::Serialization(format!(
                "record for '{}' is missing an integer id field",
                collection
            ))
        })?;
        let bytes = record.to_bytes()?;
        self.tree(collection)
            .insert(key.to_be_bytes(), bytes)
            .map_err(storage_error)?;
        Ok(())
    }

    /// Flush pending writes to disk.
    pub fn flush(&self) -> Result<(), Error> {
        self.db.flush().map_err(storage_error)?;
        Ok(())
    }

    fn tree(&self, collection: Collection) -> &Tree {
        match collection {
            Collection::Users => &self.users,
            Collection::Documents => &self.documents,
        }
    }
}

impl StorageAdapter for SledAdapter {
    fn get_by_key(&self, collection: Collection, key: i64) -> Result<Option<Record>, Error> {
        match self.tree(collection).get(key.to_be_bytes()).map_err(storage_error)? {
            Some(bytes) => Ok(Some(Record::from_bytes(&bytes)?)),
            None => Ok(None),
        }
    }

    fn scan_all(&self, collection: Collection) -> Result<RecordIter<'_>, Error> {
        let iter = self.tree(collection).iter().map(|entry| {
            let (_, bytes) = entry.map_err(storage_error)?;
            Record::from_bytes(&bytes)
        });
        Ok(Box::new(iter))
    }
}

/// Map a sled failure to the request-level unavailable error.
fn storage_error(err: sled::Error) -> Error {
    Error::StorageUnavailable(err.to_string())
}
