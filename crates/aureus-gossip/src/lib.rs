//! Lightweight HTTP-based peer gossip: broadcast, inbound queues, and the
//! background worker that owns all peer-triggered mutation (§4.8, §5).

pub mod client;
pub mod peers;
pub mod worker;

pub use client::{broadcast_block, broadcast_transaction, fetch_chain};
pub use peers::PeerSet;
pub use worker::{spawn, sync_chain, GossipHandle};
