use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::constants::GENESIS_MINER;
use crate::transaction::Transaction;
use crate::types::{HexString, Timestamp};

/// Header + transaction list. `hash` and `merkle_root` are cached fields,
/// recomputed and checked by every consumer rather than trusted blindly
/// (§4.3 block validation rule 1).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Block {
    pub height: u64,
    pub previous_hash: HexString,
    pub timestamp: Timestamp,
    pub difficulty: u32,
    pub nonce: u64,
    pub mined_by: HexString,
    pub transactions: Vec<Transaction>,
    pub merkle_root: HexString,
    pub hash: HexString,
}

impl Block {
    /// The trivial genesis block: height 0, previous_hash "0", no
    /// transactions, mined_by "genesis". `hash`/`merkle_root` are filled in
    /// by the caller via [`crate::hashing`] (kept crate-agnostic here so this
    /// module has no dependency on the crypto crate).
    pub fn genesis_unhashed(timestamp: Timestamp, difficulty: u32) -> Self {
        Self {
            height: 0,
            previous_hash: "0".to_string(),
            timestamp,
            difficulty,
            nonce: 0,
            mined_by: GENESIS_MINER.to_string(),
            transactions: Vec::new(),
            merkle_root: String::new(),
            hash: String::new(),
        }
    }

    /// UTF-8 bytes of the canonical block object, keys sorted
    /// lexicographically, `hash` absent, `transactions` rendered as each
    /// transaction's full dict form (§4.1).
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let txs: Vec<serde_json::Value> = self
            .transactions
            .iter()
            .map(|tx| {
                json!({
                    "sender": tx.sender,
                    "recipient": tx.recipient,
                    "amount": tx.amount,
                    "timestamp": tx.timestamp,
                    "signature": tx.signature,
                })
            })
            .collect();
        let value = json!({
            "mined_by": self.mined_by,
            "transactions": txs,
            "height": self.height,
            "difficulty": self.difficulty,
            "previous_hash": self.previous_hash,
            "nonce": self.nonce,
            "timestamp": self.timestamp,
            "merkle_root": self.merkle_root,
        });
        value.to_string().into_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_bytes_exclude_hash_field() {
        let mut b = Block::genesis_unhashed(0, 4);
        b.hash = "should-not-appear".into();
        let s = String::from_utf8(b.canonical_bytes()).unwrap();
        assert!(!s.contains("should-not-appear"));
        assert!(s.contains("\"mined_by\":\"genesis\""));
    }

    #[test]
    fn round_trip_preserves_hash_field() {
        let mut b = Block::genesis_unhashed(0, 4);
        b.hash = "abc123".into();
        let json = serde_json::to_string(&b).unwrap();
        let back: Block = serde_json::from_str(&json).unwrap();
        assert_eq!(back.hash, "abc123");
    }
}
