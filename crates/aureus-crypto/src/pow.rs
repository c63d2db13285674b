use aureus_core::Block;

use crate::hash::sha256_hex;

/// `true` iff `hash_hex` begins with `difficulty` hex `'0'` characters
/// (§4.3 rule 3, glossary "Difficulty").
pub fn meets_difficulty(hash_hex: &str, difficulty: u32) -> bool {
    let difficulty = difficulty as usize;
    hash_hex.len() >= difficulty && hash_hex.as_bytes()[..difficulty].iter().all(|&b| b == b'0')
}

/// Recompute `block`'s canonical hash (does not touch `nonce`).
pub fn block_hash(block: &Block) -> String {
    sha256_hex(&block.canonical_bytes())
}

/// Mine `block` in place: starting from `nonce = 0`, recompute the block
/// hash and increment `nonce` until it begins with `block.difficulty`
/// hex `'0'` characters (§4.3 "Proof of work" step 3). `block.merkle_root`
/// must already be set; `block.hash` is filled in on return.
///
/// Deterministic given inputs; the first valid nonce found is returned, not
/// necessarily the smallest one a parallel search would find, but test
/// suites assume canonical structure rather than a canonical nonce.
pub fn mine(block: &mut Block) {
    let difficulty = block.difficulty;
    let mut nonce = 0u64;
    loop {
        block.nonce = nonce;
        let hash = block_hash(block);
        if meets_difficulty(&hash, difficulty) {
            block.hash = hash;
            return;
        }
        nonce = nonce.checked_add(1).expect("PoW loop exhausted u64 nonce range");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aureus_core::Transaction;

    #[test]
    fn mined_block_meets_its_own_difficulty() {
        let mut block = Block::genesis_unhashed(0, 1);
        block.transactions = vec![Transaction::coinbase("b".repeat(64), 10.0, 0)];
        block.merkle_root = "deadbeef".into();
        mine(&mut block);
        assert!(meets_difficulty(&block.hash, block.difficulty));
        assert_eq!(block_hash(&block), block.hash);
    }

    #[test]
    fn meets_difficulty_checks_exact_prefix() {
        assert!(meets_difficulty("0000abcd", 4));
        assert!(!meets_difficulty("0001abcd", 4));
        assert!(meets_difficulty("anything", 0));
    }
}
