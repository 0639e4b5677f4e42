//! Health check endpoint.

use axum::{extract::State, routing::get, Json, Router};
use docgraph_core::Collection;

use crate::json::HealthResponse;
use crate::AppState;

/// Health check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    // Probe the storage adapter with a cheap key lookup.
    let storage_ok = state.storage.get_by_key(Collection::Users, 1).is_ok();

    Json(HealthResponse {
        status: if storage_ok { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        storage_ok,
    })
}
