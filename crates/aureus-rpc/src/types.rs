//! Wire-level request/response bodies for the HTTP/JSON surface (§6).
//!
//! `Block` and `Transaction` themselves already serialize to the dict shapes
//! §6 specifies, so those two go over the wire unwrapped; these types exist
//! only for the envelopes and error/status bodies around them.

use aureus_core::Block;
use serde::{Deserialize, Serialize};

/// `GET /chain` response body.
#[derive(Debug, Serialize)]
pub struct ChainResponse {
    pub length: usize,
    pub chain: Vec<Block>,
}

/// Request body for `POST /add_peer`.
#[derive(Debug, Deserialize)]
pub struct AddPeerRequest {
    pub peer_url: String,
}

/// `201` response body for `POST /add_peer`.
#[derive(Debug, Serialize)]
pub struct AddPeerResponse {
    pub message: String,
    pub peers: Vec<String>,
}

/// Generic `201` acknowledgement, used by `POST /transaction` and `POST /block`.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// `400` error body shared by every endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
