//! In-process storage adapter.

use std::collections::BTreeMap;

use super::{Record, RecordIter, StorageAdapter};
use crate::error::Error;
use crate::schema::Collection;

/// In-memory storage adapter.
///
/// Collections are plain `BTreeMap`s keyed by record id, so scans yield
/// key order like the sled engine. Provisioning happens through
/// [`MemoryAdapter::insert`] before the adapter is shared; at serve time
/// the store is immutable and lock-free.
#[derive(Debug, Default)]
pub struct MemoryAdapter {
    users: BTreeMap<i64, Record>,
    documents: BTreeMap<i64, Record>,
}

impl MemoryAdapter {
    /// Create an empty adapter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record during provisioning.
    ///
    /// The record must carry an integer `id` field.
    pub fn insert(&mut self, collection: Collection, record: Record) -> Result<(), Error> {
        let key = record.key().ok_or_else(|| {
            Error::Serialization(format!(
                "record for '{}' is missing an integer id field",
                collection
            ))
        })?;
        self.map_mut(collection).insert(key, record);
        Ok(())
    }

    fn map(&self, collection: Collection) -> &BTreeMap<i64, Record> {
        match collection {
            Collection::Users => &self.users,
            Collection::Documents => &self.documents,
        }
    }

    fn map_mut(&mut self, collection: Collection) -> &mut BTreeMap<i64, Record> {
        match collection {
            Collection::Users => &mut self.users,
            Collection::Documents => &mut self.documents,
        }
    }
}

impl StorageAdapter for MemoryAdapter {
    fn get_by_key(&self, collection: Collection, key: i64) -> Result<Option<Record>, Error> {
        Ok(self.map(collection).get(&key).cloned())
    }

    fn scan_all(&self, collection: Collection) -> Result<RecordIter<'_>, Error> {
        Ok(Box::new(self.map(collection).values().cloned().map(Ok)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{FilterExpr, Predicate};
    use docgraph_proto::Value;

    fn adapter_with_documents() -> MemoryAdapter {
        let mut adapter = MemoryAdapter::new();
        adapter
            .insert(
                Collection::Documents,
                Record::new().with_field("id", 2i64).with_field("title", "b"),
            )
            .unwrap();
        adapter
            .insert(
                Collection::Documents,
                Record::new().with_field("id", 1i64).with_field("title", "a"),
            )
            .unwrap();
        adapter
    }

    #[test]
    fn test_get_by_key() {
        let adapter = adapter_with_documents();
        let record = adapter.get_by_key(Collection::Documents, 1).unwrap().unwrap();
        assert_eq!(record.get("title"), Some(&Value::String("a".into())));

        assert!(adapter.get_by_key(Collection::Documents, 99).unwrap().is_none());
        assert!(adapter.get_by_key(Collection::Users, 1).unwrap().is_none());
    }

    #[test]
    fn test_scan_yields_key_order() {
        let adapter = adapter_with_documents();
        let keys: Vec<i64> = adapter
            .scan_all(Collection::Documents)
            .unwrap()
            .map(|r| r.unwrap().key().unwrap())
            .collect();
        assert_eq!(keys, vec![1, 2]);
    }

    #[test]
    fn test_scan_where_uses_predicate() {
        let adapter = adapter_with_documents();
        let predicate = Predicate::new(FilterExpr::eq("title", Value::String("a".into())));
        let matched: Vec<Record> = adapter
            .scan_where(Collection::Documents, &predicate)
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].key(), Some(1));
    }

    #[test]
    fn test_insert_requires_id() {
        let mut adapter = MemoryAdapter::new();
        let err = adapter
            .insert(Collection::Users, Record::new().with_field("username", "x"))
            .unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }
}
