use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::constants::COINBASE;
use crate::types::{Amount, HexString, Timestamp};

/// A signed value transfer, or — when `sender == "COINBASE"` — a mining
/// reward. This is the sole transaction shape; there is no UTXO model and no
/// scripting.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// Hex public key of the payer, or the literal `"COINBASE"`.
    pub sender: HexString,
    /// Hex public key of the payee (64 hex chars).
    pub recipient: HexString,
    /// Non-negative amount transferred.
    pub amount: Amount,
    /// Integer seconds since epoch, set at creation.
    pub timestamp: Timestamp,
    /// Hex Ed25519 signature over the canonical bytes; absent on COINBASE.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<HexString>,
}

impl Transaction {
    pub fn new_unsigned(sender: HexString, recipient: HexString, amount: Amount, timestamp: Timestamp) -> Self {
        Self { sender, recipient, amount, timestamp, signature: None }
    }

    pub fn coinbase(recipient: HexString, amount: Amount, timestamp: Timestamp) -> Self {
        Self { sender: COINBASE.to_string(), recipient, amount, timestamp, signature: None }
    }

    pub fn is_coinbase(&self) -> bool {
        self.sender == COINBASE
    }

    /// UTF-8 bytes of `{sender, recipient, amount, timestamp}` with keys
    /// sorted lexicographically and no insignificant whitespace. This, not
    /// the wire struct, is what gets signed and verified (§4.1).
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let value = json!({
            "sender": self.sender,
            "recipient": self.recipient,
            "amount": self.amount,
            "timestamp": self.timestamp,
        });
        value.to_string().into_bytes()
    }

    /// Full dict form INCLUDING the signature field, keys sorted
    /// lexicographically — this is what the block's `transactions` list and
    /// the Merkle root hash over (§4.1).
    pub fn full_dict_bytes(&self) -> Vec<u8> {
        let value = json!({
            "sender": self.sender,
            "recipient": self.recipient,
            "amount": self.amount,
            "timestamp": self.timestamp,
            "signature": self.signature,
        });
        value.to_string().into_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_bytes_omit_signature_and_sort_keys() {
        let tx = Transaction {
            sender: "ab".into(),
            recipient: "cd".into(),
            amount: 1.5,
            timestamp: 100,
            signature: Some("deadbeef".into()),
        };
        let s = String::from_utf8(tx.canonical_bytes()).unwrap();
        assert_eq!(s, r#"{"amount":1.5,"recipient":"cd","sender":"ab","timestamp":100}"#);
    }

    #[test]
    fn round_trip_preserves_equality() {
        let tx = Transaction::new_unsigned("a".into(), "b".into(), 5.0, 42);
        let json = serde_json::to_string(&tx).unwrap();
        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(tx, back);
    }

    #[test]
    fn coinbase_has_no_signature() {
        let tx = Transaction::coinbase("minerpub".into(), 10.0, 1);
        assert!(tx.is_coinbase());
        assert!(tx.signature.is_none());
    }
}
