//! Load/save the single authoritative state document (§6 "Persisted state",
//! §2 item 10). On load failure the file is discarded and a fresh genesis is
//! produced — the node tolerates corrupt local state (§7).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use aureus_core::Block;
use aureus_wallet::WalletRegistry;

use crate::balances::BalanceIndex;

#[derive(Serialize, Deserialize)]
pub struct PersistedState {
    pub chain: Vec<Block>,
    pub balances: BalanceIndex,
    pub wallets: HashMap<String, String>,
    pub public_keys: HashMap<String, String>,
    #[serde(default)]
    pub initial_wallet_balances: HashMap<String, f64>,
}

impl PersistedState {
    pub fn from_parts(chain: &[Block], balances: &BalanceIndex, wallets: &WalletRegistry) -> Self {
        Self {
            chain: chain.to_vec(),
            balances: balances.clone(),
            wallets: wallets.wallets.clone(),
            public_keys: wallets.public_keys.clone(),
            initial_wallet_balances: wallets.initial_wallet_balances.clone(),
        }
    }

    pub fn into_wallet_registry(self) -> (Vec<Block>, BalanceIndex, WalletRegistry) {
        let registry = WalletRegistry {
            wallets: self.wallets,
            public_keys: self.public_keys,
            initial_wallet_balances: self.initial_wallet_balances,
        };
        (self.chain, self.balances, registry)
    }
}

/// Persist the current state to `path`. Save failures are logged and
/// non-fatal (§7 "PersistenceError"): the next mutation retries.
pub fn save(path: &Path, state: &PersistedState) {
    match serde_json::to_string_pretty(state) {
        Ok(json) => {
            if let Err(e) = std::fs::write(path, json) {
                error!(error = %e, path = %path.display(), "failed to persist state");
            }
        }
        Err(e) => error!(error = %e, "failed to serialize state"),
    }
}

/// Load state from `path`. Returns `None` if the file is absent or
/// unparseable; on parse failure the file is removed so the caller can
/// regenerate a fresh genesis.
pub fn load(path: &Path) -> Option<PersistedState> {
    let contents = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str(&contents) {
        Ok(state) => Some(state),
        Err(e) => {
            warn!(error = %e, path = %path.display(), "corrupt persistence file, discarding");
            let _ = std::fs::remove_file(path);
            None
        }
    }
}

pub fn default_path() -> PathBuf {
    PathBuf::from(aureus_core::constants::DEFAULT_PERSISTENCE_FILE)
}
