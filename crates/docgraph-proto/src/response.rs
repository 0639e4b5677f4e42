//! Outbound response envelope.

use serde::{Deserialize, Serialize};

/// Successful query response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    /// Success flag.
    pub success: bool,
    /// The resolved tree: an object, an array of objects, or null.
    pub data: serde_json::Value,
    /// Metadata about the query.
    pub meta: QueryMeta,
}

impl QueryResponse {
    /// Wrap a resolved tree in a success envelope.
    pub fn ok(operation: impl Into<String>, data: serde_json::Value) -> Self {
        let returned = match &data {
            serde_json::Value::Array(items) => items.len(),
            serde_json::Value::Null => 0,
            _ => 1,
        };

        Self {
            success: true,
            data,
            meta: QueryMeta {
                operation: operation.into(),
                returned,
            },
        }
    }
}

/// Query metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryMeta {
    /// The root operation that produced this response.
    pub operation: String,
    /// Number of root records returned.
    pub returned: usize,
}
