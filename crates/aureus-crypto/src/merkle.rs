use aureus_core::Transaction;

use crate::hash::sha256_hex;

/// Merkle root over a block's transactions (§4.1 "Merkle root"):
/// SHA-256 hex digests of each transaction's full dict form, paired and
/// re-hashed (concatenating the hex strings, not raw bytes), duplicating the
/// last element when a level has an odd count. The empty list's root is
/// `sha256_hex(b"")`.
pub fn merkle_root(txs: &[Transaction]) -> String {
    if txs.is_empty() {
        return sha256_hex(b"");
    }
    let mut level: Vec<String> = txs.iter().map(|tx| sha256_hex(&tx.full_dict_bytes())).collect();
    while level.len() > 1 {
        if level.len() % 2 == 1 {
            level.push(level.last().unwrap().clone());
        }
        level = level
            .chunks(2)
            .map(|pair| sha256_hex(format!("{}{}", pair[0], pair[1]).as_bytes()))
            .collect();
    }
    level.into_iter().next().unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_hashes_empty_bytes() {
        assert_eq!(merkle_root(&[]), sha256_hex(b""));
    }

    #[test]
    fn single_tx_root_is_its_own_leaf_hash() {
        let tx = Transaction::coinbase("a".repeat(64), 10.0, 0);
        let root = merkle_root(&[tx.clone()]);
        assert_eq!(root, sha256_hex(&tx.full_dict_bytes()));
    }

    #[test]
    fn odd_count_duplication_is_deterministic() {
        let txs: Vec<Transaction> = (0..3)
            .map(|i| Transaction::coinbase("a".repeat(64), i as f64, i))
            .collect();
        let root1 = merkle_root(&txs);
        let root2 = merkle_root(&txs);
        assert_eq!(root1, root2);
    }

    #[test]
    fn different_tx_sets_produce_different_roots() {
        let a = vec![Transaction::coinbase("a".repeat(64), 1.0, 0)];
        let b = vec![Transaction::coinbase("a".repeat(64), 2.0, 0)];
        assert_ne!(merkle_root(&a), merkle_root(&b));
    }
}
