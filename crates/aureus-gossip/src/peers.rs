//! Peer set: concurrent read, rare write (§5 "Shared resources").

use std::collections::HashSet;
use std::sync::{Arc, RwLock};

#[derive(Clone, Default)]
pub struct PeerSet {
    inner: Arc<RwLock<HashSet<String>>>,
}

impl PeerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, peer_url: String) {
        self.inner.write().expect("peer set lock poisoned").insert(peer_url);
    }

    /// A snapshot of current peers, in a stable (sorted) iteration order —
    /// the tie-break order `sync_chain` relies on (§4.8).
    pub fn snapshot(&self) -> Vec<String> {
        let mut peers: Vec<String> =
            self.inner.read().expect("peer set lock poisoned").iter().cloned().collect();
        peers.sort();
        peers
    }
}
