//! Error body and machine-readable error codes.

use serde::{Deserialize, Serialize};

/// Error response body.
///
/// Carries only the violated constraint and the rejected value. Compiled
/// predicates and backend lookup detail never appear here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Error flag.
    pub error: bool,
    /// Machine-readable error code (see [`codes`]).
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

impl ErrorBody {
    /// Create an error body.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: true,
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Machine-readable error codes for the query endpoint.
pub mod codes {
    /// Filter operator or argument outside the allow-list.
    pub const INVALID_FILTER: &str = "INVALID_FILTER";
    /// Root operation name not in the fixed set.
    pub const UNKNOWN_OPERATION: &str = "UNKNOWN_OPERATION";
    /// Argument missing or of the wrong type.
    pub const INVALID_ARGUMENT: &str = "INVALID_ARGUMENT";
    /// Backend unreachable or errored.
    pub const STORAGE_UNAVAILABLE: &str = "STORAGE_UNAVAILABLE";
    /// Unexpected internal error.
    pub const INTERNAL: &str = "INTERNAL";
}
