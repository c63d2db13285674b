//! The HTTP/JSON surface (§6): four endpoints, all cheap to handle. Request
//! handlers parse and structurally validate only; every state-mutating
//! consequence is funneled through the gossip queues and drained by the
//! background worker (§5 "single-writer discipline").

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use aureus_core::validation::{validate_block_shape, validate_transaction_shape};
use aureus_core::{Block, Transaction};
use aureus_gossip::GossipHandle;
use aureus_state::ChainManager;

use crate::types::{AddPeerRequest, AddPeerResponse, ChainResponse, ErrorResponse, MessageResponse};

/// Shared state handed to every request handler via axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    pub manager: Arc<Mutex<ChainManager>>,
    pub gossip: GossipHandle,
}

type Err400 = (StatusCode, Json<ErrorResponse>);

fn bad_request(msg: impl Into<String>) -> Err400 {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: msg.into() }))
}

/// `GET /chain` → `{length, chain}` (§6).
async fn get_chain(State(state): State<AppState>) -> Json<ChainResponse> {
    let manager = state.manager.lock().await;
    Json(ChainResponse { length: manager.chain.len(), chain: manager.chain.clone() })
}

/// `POST /transaction`: structural check, then enqueue for the background
/// worker (§4.8 step 2). Cryptographic and balance checks happen later and
/// do not affect this response — only malformed shape yields 400 here.
async fn post_transaction(
    State(state): State<AppState>,
    Json(tx): Json<Transaction>,
) -> Result<(StatusCode, Json<MessageResponse>), Err400> {
    validate_transaction_shape(&tx).map_err(|e| bad_request(e.to_string()))?;
    state.gossip.enqueue_transaction(tx);
    Ok((StatusCode::CREATED, Json(MessageResponse { message: "transaction queued".to_string() })))
}

/// `POST /block`: structural check, then enqueue for the background worker
/// (§4.8 step 1). Linkage, difficulty, and hash checks happen once dequeued.
async fn post_block(
    State(state): State<AppState>,
    Json(block): Json<Block>,
) -> Result<(StatusCode, Json<MessageResponse>), Err400> {
    validate_block_shape(&block).map_err(|e| bad_request(e.to_string()))?;
    state.gossip.enqueue_block(block);
    Ok((StatusCode::CREATED, Json(MessageResponse { message: "block queued".to_string() })))
}

/// `POST /add_peer` with `{peer_url}` (§6).
async fn post_add_peer(
    State(state): State<AppState>,
    Json(body): Json<AddPeerRequest>,
) -> Result<(StatusCode, Json<AddPeerResponse>), Err400> {
    if body.peer_url.trim().is_empty() {
        return Err(bad_request("peer_url must not be empty"));
    }
    state.gossip.peers.add(body.peer_url.clone());
    info!(peer = %body.peer_url, "registered peer");
    Ok((
        StatusCode::CREATED,
        Json(AddPeerResponse {
            message: "peer added".to_string(),
            peers: state.gossip.peers.snapshot(),
        }),
    ))
}

/// Build the router (separated from `serve` so tests can mount it without
/// binding a socket, via `tower::ServiceExt::oneshot`).
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new().allow_methods(Any).allow_origin(Any).allow_headers(Any);
    Router::new()
        .route("/chain", get(get_chain))
        .route("/transaction", post(post_transaction))
        .route("/block", post(post_block))
        .route("/add_peer", post(post_add_peer))
        .layer(cors)
        .with_state(state)
}

/// Bind `addr` and serve the router until the process exits.
pub async fn serve(state: AppState, addr: SocketAddr) -> anyhow::Result<()> {
    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "RPC server listening");
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tower::ServiceExt;

    fn scratch_state(name: &str) -> AppState {
        let mut path = std::env::temp_dir();
        path.push(format!("aureus-rpc-test-{name}-{}.json", std::process::id()));
        let _ = std::fs::remove_file(&path);
        let manager = Arc::new(Mutex::new(ChainManager::load_or_init(path)));
        let gossip = aureus_gossip::spawn(manager.clone());
        AppState { manager, gossip }
    }

    #[tokio::test]
    async fn get_chain_returns_genesis_only() {
        let state = scratch_state("chain");
        let app = build_router(state);
        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/chain")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: ChainResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.length, 1);
        assert_eq!(body.chain.len(), 1);
    }

    #[tokio::test]
    async fn post_transaction_rejects_malformed_recipient() {
        let state = scratch_state("badtx");
        let app = build_router(state);
        let tx = serde_json::json!({
            "sender": "COINBASE",
            "recipient": "not-64-hex",
            "amount": 1.0,
            "timestamp": 0,
            "signature": null,
        });
        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .method("POST")
                    .uri("/transaction")
                    .header("content-type", "application/json")
                    .body(axum::body::Body::from(serde_json::to_vec(&tx).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn post_add_peer_registers_and_lists_peer() {
        let state = scratch_state("peer");
        let app = build_router(state);
        let body = serde_json::json!({ "peer_url": "http://127.0.0.1:9999" });
        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .method("POST")
                    .uri("/add_peer")
                    .header("content-type", "application/json")
                    .body(axum::body::Body::from(serde_json::to_vec(&body).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let resp: AddPeerResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(resp.peers, vec!["http://127.0.0.1:9999".to_string()]);
    }
}
