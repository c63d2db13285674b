//! aureus-rpc
//!
//! The HTTP/JSON surface a node exposes to other nodes and front-ends (§6):
//!
//!   GET  /chain       — `{length, chain}`
//!   POST /transaction  — enqueue a transaction dict, 201/400
//!   POST /block        — enqueue a block dict, 201/400
//!   POST /add_peer     — `{peer_url}`, 201/400
//!
//! Handlers are deliberately thin: structural validation only, then handoff
//! to the gossip queues. All consensus-level validation happens on the
//! single background worker in `aureus-gossip` (§5).

pub mod server;
pub mod types;

pub use server::{build_router, serve, AppState};
