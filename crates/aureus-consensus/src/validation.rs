//! Block and chain validation rules (§4.3 "Block validation rules", §4.7
//! "Chain validation").

use aureus_core::error::AureusError;
use aureus_core::Block;
use aureus_crypto::pow::{block_hash, meets_difficulty};

/// Validate `block` against its immediate predecessor (§4.3 rules 1–5).
/// Callers validating a genesis block should use [`validate_genesis`]
/// instead (rule 6).
pub fn validate_against_predecessor(block: &Block, predecessor: &Block) -> Result<(), AureusError> {
    let recomputed = block_hash(block);
    if block.hash != recomputed {
        return Err(AureusError::HashMismatch);
    }
    if block.previous_hash != predecessor.hash {
        return Err(AureusError::LinkageMismatch);
    }
    if !meets_difficulty(&block.hash, block.difficulty) {
        return Err(AureusError::DifficultyNotMet(block.difficulty));
    }
    if block.height != predecessor.height + 1 {
        return Err(AureusError::HeightMismatch { predecessor: predecessor.height, got: block.height });
    }
    if block.timestamp <= predecessor.timestamp {
        return Err(AureusError::NonMonotonicTimestamp {
            predecessor: predecessor.timestamp,
            got: block.timestamp,
        });
    }
    Ok(())
}

/// Validate the genesis constraints (§4.3 rule 6): `height == 0` and
/// `previous_hash == "0"`. The hash itself is still checked against the
/// recomputed value.
pub fn validate_genesis(block: &Block) -> Result<(), AureusError> {
    if block.height != 0 || block.previous_hash != "0" {
        return Err(AureusError::BadGenesis);
    }
    let recomputed = block_hash(block);
    if block.hash != recomputed {
        return Err(AureusError::HashMismatch);
    }
    Ok(())
}

/// Label a rule-1–5 failure the way the original per-rule log messages do:
/// "Invalid hash in block #N", "Chain broken at block #N" (linkage),
/// "Difficulty not met in block #N", "Invalid height sequence at block #N",
/// "Invalid timestamp in block #N" — one label per failing rule, not a
/// single blanket prefix (§8 scenario 5 expects the exact hash-mismatch
/// string).
fn describe_failure(index: usize, err: &AureusError) -> String {
    match err {
        AureusError::HashMismatch => format!("Invalid hash in block #{index}"),
        AureusError::LinkageMismatch => format!("Chain broken at block #{index}"),
        AureusError::DifficultyNotMet(_) => format!("Difficulty not met in block #{index}"),
        AureusError::HeightMismatch { .. } => format!("Invalid height sequence at block #{index}"),
        AureusError::NonMonotonicTimestamp { .. } => format!("Invalid timestamp in block #{index}"),
        other => format!("Invalid block #{index}: {other}"),
    }
}

/// `is_valid_chain` (§4.7): non-empty, genesis-shaped first block, and every
/// subsequent block passes rules 1–5 against its predecessor. Returns the
/// first failing rule's description, or `"OK"`.
pub fn is_valid_chain(chain: &[Block]) -> (bool, String) {
    let Some(genesis) = chain.first() else {
        return (false, "chain is empty".to_string());
    };
    if let Err(e) = validate_genesis(genesis) {
        return (false, format!("Invalid genesis block: {e}"));
    }
    for i in 1..chain.len() {
        if let Err(e) = validate_against_predecessor(&chain[i], &chain[i - 1]) {
            return (false, describe_failure(i, &e));
        }
    }
    (true, "OK".to_string())
}
