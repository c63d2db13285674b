//! ─── Aureus protocol constants ──────────────────────────────────────────────
//!
//! A small Hashcash-style account chain. Ticker: AUR.

/// Fixed mining reward paid to the COINBASE transaction of every mined block.
pub const REWARD: f64 = 10.0;

/// Genesis difficulty: leading hex `'0'` characters a block hash must start with.
pub const INITIAL_DIFFICULTY: u32 = 4;

/// Target time between blocks, in seconds.
pub const TARGET_BLOCK_TIME: i64 = 10;

/// Number of trailing blocks the retarget measures the elapsed time over.
pub const ADJUSTMENT_INTERVAL: usize = 10;

/// Difficulty never retargets below this floor.
pub const MIN_DIFFICULTY: u32 = 1;

/// Balance a known wallet address is seeded with absent an explicit override.
pub const DEFAULT_WALLET_INITIAL: f64 = 100.0;

/// Timeout for outbound peer RPCs (broadcast and chain pull).
pub const PEER_RPC_TIMEOUT_SECS: u64 = 5;

/// Period of the unconditional self-healing `sync_chain` call.
pub const SYNC_PERIOD_SECS: u64 = 60;

/// Sleep between iterations of the background queue-processing worker.
pub const WORKER_TICK_MS: u64 = 100;

/// Literal sender string marking a mining-reward transaction.
pub const COINBASE: &str = "COINBASE";

/// `mined_by` of the genesis block.
pub const GENESIS_MINER: &str = "genesis";

/// Default filename for the single persisted state document.
pub const DEFAULT_PERSISTENCE_FILE: &str = "blockchain.json";
