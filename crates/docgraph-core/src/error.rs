//! Core error types.

use thiserror::Error;

/// Core resolver errors.
///
/// A key lookup with no matching (and visible) record is not an error: it
/// resolves to null. Errors carry the rejected value and the violated
/// constraint, never constructed predicate or backend lookup detail.
#[derive(Debug, Error)]
pub enum Error {
    /// Client supplied a filter operator or argument outside the allow-list.
    #[error("invalid filter: {0}")]
    InvalidFilter(String),

    /// Root operation name is not in the fixed operation set.
    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    /// Operation argument missing or of the wrong type.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Backend unreachable or errored; fatal to the request, not retried.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Record encoding or decoding failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}
