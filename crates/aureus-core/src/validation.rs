//! Structural checks on transactions and blocks arriving from untrusted
//! sources — the "Validation schema" component (§2 item 5). This layer only
//! checks shape (required fields, hex format, non-negativity); cryptographic
//! and consensus checks live in `aureus-crypto`/`aureus-consensus`.

use crate::block::Block;
use crate::constants::COINBASE;
use crate::error::AureusError;
use crate::transaction::Transaction;

/// `true` iff `s` is exactly 64 lowercase-or-uppercase hex characters — the
/// shape of both an address (SHA-256 digest) and a raw Ed25519 public key.
pub fn is_hex64(s: &str) -> bool {
    s.len() == 64 && s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Structural schema check for an inbound transaction (§4.4 step 1).
/// Does not verify the signature — that is a separate step.
pub fn validate_transaction_shape(tx: &Transaction) -> Result<(), AureusError> {
    if tx.sender.is_empty() {
        return Err(AureusError::MissingField("sender"));
    }
    if tx.recipient.is_empty() {
        return Err(AureusError::MissingField("recipient"));
    }
    if !is_hex64(&tx.recipient) {
        return Err(AureusError::MalformedHex {
            field: "recipient",
            reason: "expected 64 hex characters".into(),
        });
    }
    if tx.sender != COINBASE && !is_hex64(&tx.sender) {
        return Err(AureusError::MalformedHex {
            field: "sender",
            reason: "expected 64 hex characters or \"COINBASE\"".into(),
        });
    }
    if tx.amount < 0.0 || !tx.amount.is_finite() {
        return Err(AureusError::NegativeAmount);
    }
    if tx.sender != COINBASE {
        match &tx.signature {
            Some(sig) if !sig.is_empty() => {}
            _ => return Err(AureusError::MissingField("signature")),
        }
    }
    Ok(())
}

/// Structural schema check for an inbound block (§6 "structural" half of
/// RPC admission): required fields non-empty, well-typed `mined_by` and
/// hash-shaped `hash`/`merkle_root`/`previous_hash`. Does not check the
/// hash, linkage, difficulty, or any transaction's signature — those are
/// consensus-layer concerns applied once the block is dequeued.
pub fn validate_block_shape(block: &Block) -> Result<(), AureusError> {
    if block.mined_by.is_empty() {
        return Err(AureusError::MissingField("mined_by"));
    }
    if block.hash.is_empty() {
        return Err(AureusError::MissingField("hash"));
    }
    if block.merkle_root.is_empty() {
        return Err(AureusError::MissingField("merkle_root"));
    }
    if block.previous_hash.is_empty() {
        return Err(AureusError::MissingField("previous_hash"));
    }
    for tx in &block.transactions {
        validate_transaction_shape(tx)?;
    }
    Ok(())
}
