//! Docgraph HTTP/JSON gateway.
//!
//! This crate wires the query front-end to an HTTP endpoint. It owns the
//! concerns the core deliberately excludes: process configuration,
//! storage provisioning and seeding, transport, and console logging.

pub mod config;
pub mod error;
pub mod json;
pub mod routes;
pub mod seed;

pub use config::{Args, GatewayConfig, StoreConfig};
pub use error::AppError;

use std::sync::Arc;

use axum::Router;
use docgraph_core::{QueryFrontEnd, StorageAdapter};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across all routes.
#[derive(Clone)]
pub struct AppState {
    /// The query front-end.
    pub frontend: Arc<QueryFrontEnd>,
    /// The storage adapter, kept for health probes.
    pub storage: Arc<dyn StorageAdapter>,
    /// Gateway configuration.
    pub config: GatewayConfig,
}

impl AppState {
    /// Create application state over a provisioned storage adapter.
    pub fn new(storage: Arc<dyn StorageAdapter>, config: GatewayConfig) -> Self {
        Self {
            frontend: Arc::new(QueryFrontEnd::new(storage.clone())),
            storage,
            config,
        }
    }
}

/// Create the router with all routes.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::health::routes())
        .merge(routes::query::routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
