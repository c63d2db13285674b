//! The single background worker (§4.8 "Background processor", §5): drains
//! the inbound queues, mutates chain state, and runs the periodic
//! self-healing sync. This is the only place chain/mempool/balances are
//! mutated in response to peer activity.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, Mutex};
use tracing::{info, warn};

use aureus_core::constants::{SYNC_PERIOD_SECS, WORKER_TICK_MS};
use aureus_core::{Block, Transaction};
use aureus_state::{AcceptOutcome, ChainManager};

use crate::client::{broadcast_block, broadcast_transaction, fetch_chain};
use crate::peers::PeerSet;

/// Handle given to request handlers (the RPC crate): enqueue parsed peer
/// input without touching chain state directly (§3 "Ownership").
#[derive(Clone)]
pub struct GossipHandle {
    tx_sender: mpsc::UnboundedSender<Transaction>,
    block_sender: mpsc::UnboundedSender<Block>,
    pub peers: PeerSet,
}

impl GossipHandle {
    pub fn enqueue_transaction(&self, tx: Transaction) {
        let _ = self.tx_sender.send(tx);
    }

    pub fn enqueue_block(&self, block: Block) {
        let _ = self.block_sender.send(block);
    }
}

/// Fetch every known peer's chain and fold the longest valid one in, per
/// peer in a stable order (§4.8 "sync_chain"). Ties among peers are broken
/// by that order — the manager only replaces on a *strictly* longer chain,
/// so a later equal-length candidate never displaces an earlier one.
pub async fn sync_chain(manager: &Mutex<ChainManager>, peers: &PeerSet) {
    for peer in peers.snapshot() {
        if let Some((declared_length, candidate)) = fetch_chain(&peer).await {
            if declared_length != candidate.len() {
                warn!(peer = %peer, declared_length, actual_length = candidate.len(), "peer's declared chain length does not match its contents, skipping");
                continue;
            }
            let mut manager = manager.lock().await;
            if manager.replace_chain_if_longer(candidate) {
                info!(peer = %peer, "adopted longer chain during sync");
            }
        }
    }
}

/// Spawn the background worker and return the handle request handlers use
/// to enqueue inbound peer input. The worker runs until the process exits.
pub fn spawn(manager: Arc<Mutex<ChainManager>>) -> GossipHandle {
    let (tx_sender, mut tx_receiver) = mpsc::unbounded_channel::<Transaction>();
    let (block_sender, mut block_receiver) = mpsc::unbounded_channel::<Block>();
    let peers = PeerSet::new();
    let handle = GossipHandle { tx_sender, block_sender, peers: peers.clone() };

    tokio::spawn(async move {
        let mut last_sync = tokio::time::Instant::now();
        loop {
            tokio::time::sleep(Duration::from_millis(WORKER_TICK_MS)).await;

            if let Ok(block) = block_receiver.try_recv() {
                let outcome = manager.lock().await.accept_peer_block(block.clone());
                match outcome {
                    AcceptOutcome::NeedsSync => sync_chain(&manager, &peers).await,
                    AcceptOutcome::Rejected(reason) => warn!(reason = %reason, "rejected peer block"),
                    AcceptOutcome::Appended => {
                        broadcast_block(&peers.snapshot(), &block).await;
                    }
                    AcceptOutcome::AlreadyKnown => {}
                }
            }

            if let Ok(tx) = tx_receiver.try_recv() {
                let accepted = manager.lock().await.accept_peer_transaction(tx.clone());
                if accepted {
                    broadcast_transaction(&peers.snapshot(), &tx).await;
                }
            }

            if last_sync.elapsed() >= Duration::from_secs(SYNC_PERIOD_SECS) {
                sync_chain(&manager, &peers).await;
                last_sync = tokio::time::Instant::now();
            }
        }
    });

    handle
}
