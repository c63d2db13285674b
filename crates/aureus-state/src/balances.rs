//! The derived balance index and the address/public-key resolution rule
//! that keeps it consistent regardless of which alias a transaction uses
//! (§4.4, §4.6, §9 "Address vs public-key duality").

use std::collections::HashMap;

use aureus_core::constants::COINBASE;
use aureus_core::Block;
use aureus_wallet::WalletRegistry;

pub type BalanceIndex = HashMap<String, f64>;

/// Canonicalize `raw` (a sender or recipient string) to the account key the
/// balance index stores under: its address if `raw` is a known public key
/// or already a known address, otherwise `raw` itself unchanged (§9).
pub fn resolve(wallets: &WalletRegistry, raw: &str) -> String {
    if wallets.is_known_address(raw) {
        return raw.to_string();
    }
    if let Some(addr) = wallets.address_for_pubkey(raw) {
        return addr.to_string();
    }
    raw.to_string()
}

/// `balance(key)` (§4.4): direct match first, then through [`resolve`];
/// zero if unknown.
pub fn balance_of(balances: &BalanceIndex, wallets: &WalletRegistry, key: &str) -> f64 {
    if let Some(v) = balances.get(key) {
        return *v;
    }
    let canonical = resolve(wallets, key);
    balances.get(&canonical).copied().unwrap_or(0.0)
}

/// Rebuild the balance index from scratch (§4.6). Called on every chain
/// mutation: mining, peer append, sync replacement.
pub fn rebuild(chain: &[Block], wallets: &WalletRegistry) -> BalanceIndex {
    let mut balances: BalanceIndex = HashMap::new();

    // Step 2: seed every known wallet with its initial-balance override.
    for address in wallets.known_addresses() {
        balances.insert(address.clone(), wallets.seed_balance(address));
    }

    // Step 3: walk the chain debiting senders and crediting recipients.
    for block in chain {
        for tx in &block.transactions {
            if tx.sender != COINBASE {
                let sender_key = resolve(wallets, &tx.sender);
                *balances.entry(sender_key).or_insert(0.0) -= tx.amount;
            }
            let recipient_key = resolve(wallets, &tx.recipient);
            *balances.entry(recipient_key).or_insert(0.0) += tx.amount;
        }
    }

    // Step 4: any wallet address still missing is restored to its seed.
    for address in wallets.known_addresses() {
        balances.entry(address.clone()).or_insert_with(|| wallets.seed_balance(address));
    }

    balances
}

#[cfg(test)]
mod tests {
    use super::*;
    use aureus_core::Transaction;

    #[test]
    fn rebuild_is_idempotent() {
        let mut wallets = WalletRegistry::new();
        let a = wallets.create_wallet(Some(100.0));
        let b = wallets.create_wallet(Some(0.0));
        let mut genesis = Block::genesis_unhashed(0, 1);
        genesis.hash = "g".into();
        let mut next = Block::genesis_unhashed(10, 1);
        next.height = 1;
        next.previous_hash = "g".into();
        next.transactions = vec![Transaction::new_unsigned(a.address.clone(), b.address.clone(), 25.0, 10)];
        let chain = vec![genesis, next];

        let first = rebuild(&chain, &wallets);
        let second = rebuild(&chain, &wallets);
        assert_eq!(first, second);
        assert_eq!(first[&a.address], 75.0);
        assert_eq!(first[&b.address], 25.0);
    }

    #[test]
    fn resolve_maps_pubkey_to_address() {
        let mut wallets = WalletRegistry::new();
        let w = wallets.create_wallet(None);
        assert_eq!(resolve(&wallets, &w.public_key_hex), w.address);
        assert_eq!(resolve(&wallets, &w.address), w.address);
        assert_eq!(resolve(&wallets, "unknown-raw-string"), "unknown-raw-string");
    }

    #[test]
    fn unknown_account_has_zero_balance() {
        let wallets = WalletRegistry::new();
        let balances = BalanceIndex::new();
        assert_eq!(balance_of(&balances, &wallets, "nobody"), 0.0);
    }

    #[test]
    fn debit_applies_even_for_unseen_sender() {
        let wallets = WalletRegistry::new();
        let mut genesis = Block::genesis_unhashed(0, 1);
        genesis.hash = "g".into();
        let mut next = Block::genesis_unhashed(10, 1);
        next.height = 1;
        next.previous_hash = "g".into();
        next.transactions = vec![Transaction::new_unsigned("x".repeat(64), "y".repeat(64), 5.0, 10)];
        let chain = vec![genesis, next];
        let balances = rebuild(&chain, &wallets);
        assert_eq!(balances["x".repeat(64).as_str()], -5.0);
        assert_eq!(balances["y".repeat(64).as_str()], 5.0);
    }
}
