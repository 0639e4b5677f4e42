//! Gateway configuration.

use std::path::PathBuf;

use clap::Parser;

/// Docgraph gateway command line arguments.
#[derive(Debug, Parser)]
#[command(name = "docgraph-gateway")]
#[command(about = "HTTP/JSON gateway for the docgraph query endpoint")]
pub struct Args {
    /// Address to listen on for HTTP requests.
    #[arg(short, long, default_value = "0.0.0.0:8080")]
    pub listen: String,

    /// Data directory for the sled-backed store. The in-process store is
    /// used when omitted.
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,

    /// Sensitive note seeded into the confidential document's debug_info
    /// field at provisioning time. The core never reads this value; it
    /// only returns what is stored, subject to the visibility gate.
    #[arg(long, env = "DOCGRAPH_SECRET_NOTE", hide_env_values = true)]
    pub secret_note: String,
}

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Address to listen on for HTTP requests.
    pub listen_addr: String,
    /// Which storage adapter backs the resolver.
    pub store: StoreConfig,
    /// Sensitive note injected at seed time.
    pub secret_note: String,
}

/// Storage backend selection.
#[derive(Debug, Clone)]
pub enum StoreConfig {
    /// In-process store.
    Memory,
    /// Sled-backed store at the given data directory.
    Sled(PathBuf),
}

impl From<&Args> for GatewayConfig {
    fn from(args: &Args) -> Self {
        let store = match &args.data_dir {
            Some(path) => StoreConfig::Sled(path.clone()),
            None => StoreConfig::Memory,
        };

        Self {
            listen_addr: args.listen.clone(),
            store,
            secret_note: args.secret_note.clone(),
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            store: StoreConfig::Memory,
            secret_note: String::new(),
        }
    }
}
