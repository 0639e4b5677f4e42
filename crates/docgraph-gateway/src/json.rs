//! Gateway-local JSON response types.
//!
//! The query envelope itself lives in `docgraph-proto`; this module only
//! holds shapes the gateway adds on top.

use serde::Serialize;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Health status.
    pub status: String,
    /// Gateway version.
    pub version: String,
    /// Whether the storage adapter answered a probe lookup.
    pub storage_ok: bool,
}
