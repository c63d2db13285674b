//! The authoritative container (§2 item 8, "Chain manager"): owns chain,
//! mempool, balances, and wallets, and orchestrates add-tx, mine,
//! accept-block, rebuild, and sync. Every mutation happens through `&mut
//! self` — the single-writer discipline (§5) is enforced by whoever holds
//! the manager (one background worker, per the node binary).

use std::path::PathBuf;

use tracing::{info, warn};

use aureus_consensus::{is_valid_chain, retarget, validate_against_predecessor};
use aureus_core::constants::{INITIAL_DIFFICULTY, REWARD};
use aureus_core::error::AureusError;
use aureus_core::validation::{is_hex64, validate_transaction_shape};
use aureus_core::{Block, Transaction};
use aureus_crypto::{block_hash, merkle_root, mine, verify};
use aureus_wallet::WalletRegistry;

use crate::balances::{balance_of, rebuild, resolve, BalanceIndex};
use crate::mempool::Mempool;
use crate::persistence::{self, PersistedState};

/// Where a mined block's reward should land, resolved from whatever
/// identifier the caller of `mine_block` supplied (§4.5 step 3).
fn resolve_miner_reward_address(wallets: &WalletRegistry, miner_identifier: &str) -> Option<String> {
    if let Some(addr) = wallets.address_for_pubkey(miner_identifier) {
        return Some(addr.to_string());
    }
    if wallets.is_known_address(miner_identifier) {
        return Some(miner_identifier.to_string());
    }
    if is_hex64(miner_identifier) {
        return Some(miner_identifier.to_string());
    }
    None
}

pub struct ChainManager {
    pub chain: Vec<Block>,
    pub mempool: Mempool,
    pub balances: BalanceIndex,
    pub wallets: WalletRegistry,
    pub difficulty: u32,
    persistence_path: PathBuf,
}

impl ChainManager {
    /// Build a chain manager backed by `persistence_path`, loading existing
    /// state if present and valid, or producing a fresh genesis otherwise
    /// (§6, §7 "load errors cause the file to be discarded").
    pub fn load_or_init(persistence_path: PathBuf) -> Self {
        if let Some(state) = persistence::load(&persistence_path) {
            let (chain, balances, wallets) = state.into_wallet_registry();
            if !chain.is_empty() {
                let difficulty = chain.last().unwrap().difficulty;
                return Self { chain, mempool: Mempool::new(), balances, wallets, difficulty, persistence_path };
            }
            warn!("persisted state had an empty chain; regenerating genesis");
        }
        let mut manager = Self {
            chain: Vec::new(),
            mempool: Mempool::new(),
            balances: BalanceIndex::new(),
            wallets: WalletRegistry::new(),
            difficulty: INITIAL_DIFFICULTY,
            persistence_path,
        };
        manager.create_genesis();
        manager.persist();
        manager
    }

    fn create_genesis(&mut self) {
        let mut genesis = Block::genesis_unhashed(now(), self.difficulty);
        genesis.merkle_root = merkle_root(&genesis.transactions);
        genesis.hash = block_hash(&genesis);
        self.chain.push(genesis);
        self.rebuild_balances();
    }

    pub fn persist(&self) {
        let state = PersistedState::from_parts(&self.chain, &self.balances, &self.wallets);
        persistence::save(&self.persistence_path, &state);
    }

    pub fn rebuild_balances(&mut self) {
        self.balances = rebuild(&self.chain, &self.wallets);
    }

    pub fn balance_of(&self, key: &str) -> f64 {
        balance_of(&self.balances, &self.wallets, key)
    }

    /// `add_transaction` (§4.4): the full six-step local admission
    /// procedure. Any failure returns `false` without mutating state.
    pub fn add_transaction(&mut self, tx: Transaction) -> bool {
        if let Err(e) = validate_transaction_shape(&tx) {
            warn!(error = %e, "rejecting transaction: structural check failed");
            return false;
        }
        let Some(signature) = tx.signature.as_deref() else {
            return false;
        };
        if !verify(&tx.canonical_bytes(), signature, &tx.sender) {
            warn!("rejecting transaction: signature does not verify");
            return false;
        }
        let sender_key = resolve(&self.wallets, &tx.sender);
        let available = self.balance_of(&sender_key);
        if available < tx.amount {
            warn!(sender = %sender_key, available, amount = tx.amount, "rejecting transaction: insufficient funds");
            return false;
        }
        let wallets = &self.wallets;
        let pending_for_sender = self
            .mempool
            .pending_sum_for(&sender_key, |raw| resolve(wallets, raw));
        if pending_for_sender + tx.amount > available {
            warn!(sender = %sender_key, "rejecting transaction: pending-pool double-spend");
            return false;
        }
        self.mempool.push(tx);
        self.persist();
        true
    }

    /// The lighter admission the background worker applies to inbound peer
    /// transactions (§4.8 step 2): dedup by signature, then verify. No
    /// funds check — that is deliberately the literal worker-step text, a
    /// lighter check than local `add_transaction`.
    pub fn accept_peer_transaction(&mut self, tx: Transaction) -> bool {
        let Some(signature) = tx.signature.as_deref() else {
            return false;
        };
        if self.mempool.contains_signature(signature) {
            return false;
        }
        if !verify(&tx.canonical_bytes(), signature, &tx.sender) {
            return false;
        }
        self.mempool.push(tx);
        true
    }

    /// `mine_block` (§4.5).
    pub fn mine_block(&mut self, miner_identifier: &str) -> Result<Block, AureusError> {
        if self.mempool.is_empty() {
            return Err(AureusError::EmptyMempool);
        }
        let (valid, reason) = is_valid_chain(&self.chain);
        if !valid {
            return Err(AureusError::Other(format!("chain invalid: {reason}")));
        }
        let reward_address = resolve_miner_reward_address(&self.wallets, miner_identifier)
            .ok_or_else(|| AureusError::UnknownMiner(miner_identifier.to_string()))?;

        let user_tx = self.mempool.oldest().cloned().ok_or(AureusError::EmptyMempool)?;

        let last = self.chain.last().expect("chain always has a genesis block");
        let timestamp = now().max(last.timestamp + 1);
        let coinbase = Transaction::coinbase(reward_address, REWARD, timestamp);

        let mut block = Block {
            height: last.height + 1,
            previous_hash: last.hash.clone(),
            timestamp,
            difficulty: self.difficulty,
            nonce: 0,
            mined_by: miner_identifier.to_string(),
            transactions: vec![user_tx.clone(), coinbase],
            merkle_root: String::new(),
            hash: String::new(),
        };
        block.merkle_root = merkle_root(&block.transactions);
        mine(&mut block);

        validate_against_predecessor(&block, last)?;

        self.chain.push(block.clone());
        if let Some(sig) = user_tx.signature.as_deref() {
            self.mempool.remove_by_signature(sig);
        }
        self.difficulty = retarget(&self.chain, self.difficulty);
        self.rebuild_balances();
        self.persist();
        info!(height = block.height, hash = %block.hash, "mined block");
        Ok(block)
    }

    /// Whether a hash already appears in the local chain (§4.8 step 1:
    /// "its hash is not already in the chain").
    pub fn contains_hash(&self, hash: &str) -> bool {
        self.chain.iter().any(|b| b.hash == hash)
    }

    /// Accept a block received from a peer (§4.8 step 1). The caller is
    /// responsible for invoking `sync_chain` (a gossip-crate concern) when
    /// this returns [`AcceptOutcome::NeedsSync`].
    pub fn accept_peer_block(&mut self, block: Block) -> AcceptOutcome {
        if block.height as usize > self.chain.len() {
            return AcceptOutcome::NeedsSync;
        }
        if self.contains_hash(&block.hash) {
            return AcceptOutcome::AlreadyKnown;
        }
        let Some(predecessor) = self.chain.last() else {
            return AcceptOutcome::Rejected("chain is empty".to_string());
        };
        if let Err(e) = validate_against_predecessor(&block, predecessor) {
            return AcceptOutcome::Rejected(e.to_string());
        }
        for tx in &block.transactions {
            if let Some(sig) = tx.signature.as_deref() {
                self.mempool.remove_by_signature(sig);
            }
        }
        self.chain.push(block);
        self.difficulty = retarget(&self.chain, self.difficulty);
        self.rebuild_balances();
        self.persist();
        AcceptOutcome::Appended
    }

    /// `is_valid_chain` over the current chain (§4.7), exposed for callers
    /// (e.g. `sync_chain`) that need to validate a candidate chain without
    /// mutating state: use the free function directly for that.
    pub fn is_valid(&self) -> (bool, String) {
        is_valid_chain(&self.chain)
    }

    /// Atomically replace the local chain with a peer's, strictly-longer,
    /// fully-validated chain (§4.8 "sync_chain"). Rebuilds balances and
    /// persists. Returns `false` (no-op) if `candidate` is not strictly
    /// longer or fails validation.
    pub fn replace_chain_if_longer(&mut self, candidate: Vec<Block>) -> bool {
        if candidate.len() <= self.chain.len() {
            return false;
        }
        let (valid, reason) = is_valid_chain(&candidate);
        if !valid {
            warn!(reason = %reason, "rejecting peer chain during sync");
            return false;
        }
        self.difficulty = candidate.last().map(|b| b.difficulty).unwrap_or(self.difficulty);
        self.chain = candidate;
        self.rebuild_balances();
        self.persist();
        info!(height = self.chain.len() as u64 - 1, "replaced chain via sync");
        true
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcceptOutcome {
    Appended,
    AlreadyKnown,
    NeedsSync,
    Rejected(String),
}

fn now() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aureus_core::constants::GENESIS_MINER;

    fn scratch_manager(name: &str) -> ChainManager {
        let mut path = std::env::temp_dir();
        path.push(format!("aureus-chain-manager-test-{name}-{}.json", std::process::id()));
        let _ = std::fs::remove_file(&path);
        ChainManager::load_or_init(path)
    }

    #[test]
    fn fresh_manager_has_valid_genesis() {
        let mgr = scratch_manager("genesis");
        assert_eq!(mgr.chain.len(), 1);
        let (valid, reason) = mgr.is_valid();
        assert!(valid, "{reason}");
        assert_eq!(mgr.chain[0].mined_by, GENESIS_MINER);
    }

    #[test]
    fn mine_block_rejects_on_empty_mempool() {
        let mut mgr = scratch_manager("empty-mempool");
        let err = mgr.mine_block("anyone").unwrap_err();
        assert!(matches!(err, AureusError::EmptyMempool));
        assert_eq!(mgr.chain.len(), 1);
    }

    #[test]
    fn end_to_end_transfer_and_mine() {
        let mut mgr = scratch_manager("e2e");
        let a = mgr.wallets.create_wallet(Some(100.0));
        let b = mgr.wallets.create_wallet(Some(0.0));
        mgr.rebuild_balances();

        let mut tx = Transaction::new_unsigned(a.public_key_hex.clone(), b.address.clone(), 25.0, now());
        let sig = aureus_crypto::sign(&tx.canonical_bytes(), &a.private_key_hex).unwrap();
        tx.signature = Some(sig);

        assert!(mgr.add_transaction(tx));
        assert_eq!(mgr.mempool.len(), 1);

        let block = mgr.mine_block(&a.address).unwrap();
        assert_eq!(mgr.chain.len(), 2);
        assert!(block.hash.starts_with(&"0".repeat(block.difficulty as usize)));
        assert_eq!(mgr.mempool.len(), 0);

        assert_eq!(mgr.balance_of(&a.address), 100.0 - 25.0 + REWARD);
        assert_eq!(mgr.balance_of(&b.address), 25.0);
    }

    #[test]
    fn insufficient_funds_rejected_without_mutation() {
        let mut mgr = scratch_manager("insufficient");
        let a = mgr.wallets.create_wallet(Some(75.0));
        let b = mgr.wallets.create_wallet(Some(0.0));
        mgr.rebuild_balances();

        let mut tx = Transaction::new_unsigned(a.public_key_hex.clone(), b.address.clone(), 100.0, now());
        let sig = aureus_crypto::sign(&tx.canonical_bytes(), &a.private_key_hex).unwrap();
        tx.signature = Some(sig);

        assert!(!mgr.add_transaction(tx));
        assert_eq!(mgr.mempool.len(), 0);
    }

    #[test]
    fn pending_pool_double_spend_rejected() {
        let mut mgr = scratch_manager("double-spend");
        let a = mgr.wallets.create_wallet(Some(75.0));
        let b = mgr.wallets.create_wallet(Some(0.0));
        mgr.rebuild_balances();

        let mut first = Transaction::new_unsigned(a.public_key_hex.clone(), b.address.clone(), 50.0, now());
        first.signature = Some(aureus_crypto::sign(&first.canonical_bytes(), &a.private_key_hex).unwrap());
        let mut second = Transaction::new_unsigned(a.public_key_hex.clone(), b.address.clone(), 50.0, now() + 1);
        second.signature = Some(aureus_crypto::sign(&second.canonical_bytes(), &a.private_key_hex).unwrap());

        assert!(mgr.add_transaction(first));
        assert!(!mgr.add_transaction(second));
        assert_eq!(mgr.mempool.len(), 1);
    }
}
