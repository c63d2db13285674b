//! Outbound peer RPC: broadcast and chain pull (§4.8). Every call uses a
//! short per-peer timeout and swallows failures — one unreachable peer never
//! blocks the others (§5, §7 "PeerUnreachable").

use std::time::Duration;

use serde::Deserialize;
use tracing::warn;

use aureus_core::constants::PEER_RPC_TIMEOUT_SECS;
use aureus_core::{Block, Transaction};

#[derive(Deserialize)]
struct ChainResponse {
    length: usize,
    chain: Vec<Block>,
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(PEER_RPC_TIMEOUT_SECS))
        .build()
        .expect("reqwest client builds with a plain timeout")
}

/// POST `tx` to every peer's `/transaction`. Per-peer failures are logged
/// and do not stop the remaining peers (§4.8 "Outbound").
pub async fn broadcast_transaction(peers: &[String], tx: &Transaction) {
    let http = client();
    for peer in peers {
        let url = format!("{peer}/transaction");
        if let Err(e) = http.post(&url).json(tx).send().await {
            warn!(peer = %peer, error = %e, "broadcast_transaction failed");
        }
    }
}

/// POST `block` to every peer's `/block`.
pub async fn broadcast_block(peers: &[String], block: &Block) {
    let http = client();
    for peer in peers {
        let url = format!("{peer}/block");
        if let Err(e) = http.post(&url).json(block).send().await {
            warn!(peer = %peer, error = %e, "broadcast_block failed");
        }
    }
}

/// GET `{peer}/chain`, returning the peer's declared length alongside its
/// chain on success. `None` on any transport or decode failure (logged,
/// never fatal). The caller checks the declared length against the
/// chain's actual length — sync_chain's "the reported length matches the
/// contents" condition (§4.8).
pub async fn fetch_chain(peer: &str) -> Option<(usize, Vec<Block>)> {
    let url = format!("{peer}/chain");
    let http = client();
    match http.get(&url).send().await {
        Ok(resp) => match resp.json::<ChainResponse>().await {
            Ok(body) => Some((body.length, body.chain)),
            Err(e) => {
                warn!(peer = %peer, error = %e, "malformed /chain response");
                None
            }
        },
        Err(e) => {
            warn!(peer = %peer, error = %e, "fetch_chain failed");
            None
        }
    }
}
