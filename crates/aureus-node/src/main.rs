//! aureus-node — the node binary.
//!
//! Startup sequence (§6 CLI note, §9 "Global mutable state" redesign flag —
//! every knob below is a `NodeConfig` field, not a hidden constant):
//!
//!   1. Parse `<port> [peer_port...]`.
//!   2. Load or initialize the chain manager from its persistence file.
//!   3. Spawn the background gossip worker (§4.8, §5).
//!   4. Register the CLI-supplied peers.
//!   5. Serve the HTTP/JSON surface (§6) on `127.0.0.1:<port>` until killed.
//!
//! Interactive wallet/mining operations are an external-collaborator concern
//! (§1 Non-goals: "Interactive CLI / operator menus") — this binary only
//! brings a node online; tests and other front-ends drive `ChainManager`
//! directly or through the HTTP surface.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::sync::Mutex;
use tracing::info;

use aureus_rpc::AppState;
use aureus_state::ChainManager;

/// Node configuration, built once at startup from CLI args (§9 redesign flag:
/// no hidden process-wide constants).
struct NodeConfig {
    port: u16,
    peers: Vec<u16>,
    persistence_path: PathBuf,
}

#[derive(Parser, Debug)]
#[command(
    name = "aureus-node",
    version,
    about = "Aureus node — a small Hashcash-style account-model chain"
)]
struct Args {
    /// Port this node listens on (binds 127.0.0.1:<port>, per §6).
    port: u16,

    /// Ports of peer nodes to register at startup (each becomes
    /// http://127.0.0.1:<peer_port>).
    peers: Vec<u16>,

    /// Override the persistence file path (default: blockchain_<port>.json,
    /// so multiple local nodes don't clobber each other's state).
    #[arg(long)]
    data_file: Option<PathBuf>,
}

impl NodeConfig {
    fn from_args(args: Args) -> Self {
        let persistence_path = args
            .data_file
            .unwrap_or_else(|| PathBuf::from(format!("blockchain_{}.json", args.port)));
        Self { port: args.port, peers: args.peers, persistence_path }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,aureus=debug".parse().unwrap()),
        )
        .init();

    let config = NodeConfig::from_args(Args::parse());
    info!(port = config.port, path = %config.persistence_path.display(), "aureus node starting");

    let manager = Arc::new(Mutex::new(ChainManager::load_or_init(config.persistence_path)));
    {
        let manager = manager.lock().await;
        info!(height = manager.chain.len() as u64 - 1, difficulty = manager.difficulty, "chain loaded");
    }

    let gossip = aureus_gossip::spawn(manager.clone());
    for peer_port in &config.peers {
        let peer_url = format!("http://127.0.0.1:{peer_port}");
        info!(peer = %peer_url, "registering startup peer");
        gossip.peers.add(peer_url);
    }

    let state = AppState { manager, gossip };
    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    aureus_rpc::serve(state, addr).await
}
