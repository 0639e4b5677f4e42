//! Docgraph core - storage adapters, filter interpretation, and entity
//! resolution for the users/documents object graph.
//!
//! The pipeline for one request: the query front-end validates the
//! operation and its arguments, the entity resolver fetches root records
//! and one-hop relations through the [`StorageAdapter`] trait, the filter
//! interpreter turns client filter values into opaque predicates, and the
//! result assembler shapes the resolved records into a response tree.
//! Confidential documents are filtered at the storage call site and
//! re-checked before assembly, so they are absent from every access path.

pub mod error;
pub mod filter;
pub mod frontend;
pub mod policy;
pub mod resolver;
pub mod schema;
pub mod storage;

pub use error::Error;
pub use filter::{FilterExpr, Predicate, ScalarMode};
pub use frontend::{QueryFrontEnd, RootOperation};
pub use resolver::{ResolutionState, Resolver};
pub use schema::{Cardinality, Collection, RelationDef};
pub use storage::{MemoryAdapter, Record, RecordIter, SledAdapter, StorageAdapter};

/// Re-export protocol types.
pub use docgraph_proto as proto;
