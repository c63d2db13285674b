use thiserror::Error;

#[derive(Debug, Error)]
pub enum AureusError {
    // ── Structural / schema ──────────────────────────────────────────────────
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("malformed hex string in field {field}: {reason}")]
    MalformedHex { field: &'static str, reason: String },

    #[error("amount must be non-negative")]
    NegativeAmount,

    // ── Signature / crypto ───────────────────────────────────────────────────
    #[error("invalid signature")]
    InvalidSignature,

    #[error("malformed key material: {0}")]
    MalformedKey(String),

    // ── Consensus ─────────────────────────────────────────────────────────────
    #[error("block hash does not match recomputed hash")]
    HashMismatch,

    #[error("block hash does not meet required difficulty {0}")]
    DifficultyNotMet(u32),

    #[error("previous_hash does not match predecessor hash")]
    LinkageMismatch,

    #[error("height {got} is not predecessor height {predecessor} + 1")]
    HeightMismatch { predecessor: u64, got: u64 },

    #[error("timestamp {got} is not strictly greater than predecessor timestamp {predecessor}")]
    NonMonotonicTimestamp { predecessor: i64, got: i64 },

    #[error("genesis block must have height 0 and previous_hash \"0\"")]
    BadGenesis,

    #[error("chain is empty")]
    EmptyChain,

    // ── Mempool admission ────────────────────────────────────────────────────
    #[error("insufficient balance: need {need}, have {have}")]
    InsufficientFunds { need: f64, have: f64 },

    #[error("transaction already pending (duplicate signature)")]
    DuplicateTransaction,

    // ── Mining ────────────────────────────────────────────────────────────────
    #[error("mempool is empty")]
    EmptyMempool,

    #[error("unknown miner identifier: {0}")]
    UnknownMiner(String),

    // ── Peer / network ────────────────────────────────────────────────────────
    #[error("peer unreachable: {0}")]
    PeerUnreachable(String),

    // ── Persistence ───────────────────────────────────────────────────────────
    #[error("persistence error: {0}")]
    Persistence(String),

    #[error("{0}")]
    Other(String),
}

pub type AureusResult<T> = Result<T, AureusError>;
