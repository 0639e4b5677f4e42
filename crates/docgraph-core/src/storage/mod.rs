//! Storage adapters for the object graph.
//!
//! The resolver depends only on the [`StorageAdapter`] trait. Two concrete
//! adapters sit behind it: a sled-backed engine and an in-process store.
//! Both evaluate `scan_where` through the same compiled [`Predicate`], so
//! filter semantics cannot drift between backends.

pub mod engine;
pub mod memory;
pub mod record;

pub use engine::SledAdapter;
pub use memory::MemoryAdapter;
pub use record::Record;

use crate::error::Error;
use crate::filter::Predicate;
use crate::schema::Collection;

/// Lazy sequence of records from a scan.
pub type RecordIter<'a> = Box<dyn Iterator<Item = Result<Record, Error>> + 'a>;

/// Read-only access to the named collections.
///
/// A predicate is an opaque value produced only by the filter interpreter;
/// no raw client value ever reaches an adapter. Backend failure surfaces
/// as [`Error::StorageUnavailable`] — fatal to the request, never a panic.
pub trait StorageAdapter: Send + Sync {
    /// Look up a single record by its integer key.
    fn get_by_key(&self, collection: Collection, key: i64) -> Result<Option<Record>, Error>;

    /// Scan every record in a collection, in key order.
    fn scan_all(&self, collection: Collection) -> Result<RecordIter<'_>, Error>;

    /// Scan records matching a compiled predicate, in key order.
    ///
    /// The default implementation filters `scan_all` through
    /// [`Predicate::matches`]; adapters share this single evaluation path.
    fn scan_where<'a>(
        &'a self,
        collection: Collection,
        predicate: &'a Predicate,
    ) -> Result<RecordIter<'a>, Error> {
        let scan = self.scan_all(collection)?;
        Ok(Box::new(scan.filter(move |entry| match entry {
            Ok(record) => predicate.matches(record),
            // Keep backend errors in the stream so callers see them.
            Err(_) => true,
        })))
    }
}
