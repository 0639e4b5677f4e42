//! Inbound query envelope.

use serde::{Deserialize, Serialize};

/// A query request: a named root operation plus named arguments.
///
/// Arguments are carried as raw JSON. The front-end validates their
/// presence and types before dispatch; filter arguments in particular are
/// only interpreted by the core's filter interpreter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    /// Root operation name (e.g. `getUsers`, `searchDocumentsByTitle`).
    pub operation: String,
    /// Named arguments for the operation.
    #[serde(default)]
    pub arguments: serde_json::Map<String, serde_json::Value>,
}

impl QueryRequest {
    /// Create a request with no arguments.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            arguments: serde_json::Map::new(),
        }
    }

    /// Add a named argument.
    pub fn with_argument(
        mut self,
        name: impl Into<String>,
        value: serde_json::Value,
    ) -> Self {
        self.arguments.insert(name.into(), value);
        self
    }

    /// Get an argument by name.
    pub fn argument(&self, name: &str) -> Option<&serde_json::Value> {
        self.arguments.get(name)
    }
}
