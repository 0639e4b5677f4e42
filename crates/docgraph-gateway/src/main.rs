//! Docgraph HTTP/JSON gateway binary.

use std::sync::Arc;

use clap::Parser;
use docgraph_core::StorageAdapter;
use docgraph_gateway::{create_router, seed, AppState, Args, GatewayConfig, StoreConfig};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Parse command line args
    let args = Args::parse();
    let config = GatewayConfig::from(&args);

    info!(listen = %config.listen_addr, "Starting docgraph gateway");

    // Provision and seed the configured store
    let storage: Arc<dyn StorageAdapter> = match &config.store {
        StoreConfig::Memory => Arc::new(seed::provision_memory(&config.secret_note)?),
        StoreConfig::Sled(path) => Arc::new(seed::provision_sled(path, &config.secret_note)?),
    };

    // Create application state
    let state = AppState::new(storage, config.clone());

    // Create router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    info!("Gateway listening on {}", config.listen_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
