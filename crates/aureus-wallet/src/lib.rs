//! Local wallet registry: the address↔public-key↔private-key mapping a node
//! keeps for accounts it can sign on behalf of, plus per-address
//! initial-balance overrides (§3 "Wallet registry", §4.6 step 2).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use aureus_core::constants::DEFAULT_WALLET_INITIAL;
use aureus_crypto::generate_keypair;

/// A freshly created local wallet: the caller is handed the private key
/// once and is responsible for keeping it; the registry only keeps the
/// public-facing halves plus the balance seed.
pub struct NewWallet {
    pub address: String,
    pub private_key_hex: String,
    pub public_key_hex: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct WalletRegistry {
    /// address → private-key-hex
    pub wallets: HashMap<String, String>,
    /// address → public-key-hex
    pub public_keys: HashMap<String, String>,
    /// address → initial-balance override (§6, default `DEFAULT_WALLET_INITIAL`)
    #[serde(default)]
    pub initial_wallet_balances: HashMap<String, f64>,
}

impl WalletRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a keypair, register it locally, and seed its initial balance
    /// (supplemented feature: `create_wallet` in the original prototype).
    pub fn create_wallet(&mut self, initial_balance: Option<f64>) -> NewWallet {
        let kp = generate_keypair();
        self.wallets.insert(kp.address.clone(), kp.private_key_hex.clone());
        self.public_keys.insert(kp.address.clone(), kp.public_key_hex.clone());
        self.initial_wallet_balances
            .insert(kp.address.clone(), initial_balance.unwrap_or(DEFAULT_WALLET_INITIAL));
        NewWallet {
            address: kp.address,
            private_key_hex: kp.private_key_hex,
            public_key_hex: kp.public_key_hex,
        }
    }

    /// Register an externally generated keypair (e.g. loaded from disk)
    /// without minting a new one.
    pub fn register(&mut self, address: String, private_key_hex: String, public_key_hex: String) {
        self.wallets.insert(address.clone(), private_key_hex);
        self.public_keys.insert(address, public_key_hex);
    }

    /// The initial-balance seed for `address`, defaulting per §6.
    pub fn seed_balance(&self, address: &str) -> f64 {
        self.initial_wallet_balances
            .get(address)
            .copied()
            .unwrap_or(DEFAULT_WALLET_INITIAL)
    }

    pub fn known_addresses(&self) -> impl Iterator<Item = &String> {
        self.wallets.keys()
    }

    /// Resolve a public key to its locally known address, if any.
    pub fn address_for_pubkey(&self, pubkey: &str) -> Option<&str> {
        self.public_keys
            .iter()
            .find(|(_, pk)| pk.as_str() == pubkey)
            .map(|(addr, _)| addr.as_str())
    }

    pub fn is_known_address(&self, address: &str) -> bool {
        self.wallets.contains_key(address)
    }

    pub fn private_key_for(&self, address: &str) -> Option<&str> {
        self.wallets.get(address).map(|s| s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_wallet_registers_address_and_seed() {
        let mut registry = WalletRegistry::new();
        let w = registry.create_wallet(None);
        assert!(registry.is_known_address(&w.address));
        assert_eq!(registry.seed_balance(&w.address), DEFAULT_WALLET_INITIAL);
    }

    #[test]
    fn create_wallet_honors_explicit_balance() {
        let mut registry = WalletRegistry::new();
        let w = registry.create_wallet(Some(0.0));
        assert_eq!(registry.seed_balance(&w.address), 0.0);
    }

    #[test]
    fn address_for_pubkey_resolves_registered_keys() {
        let mut registry = WalletRegistry::new();
        let w = registry.create_wallet(None);
        assert_eq!(registry.address_for_pubkey(&w.public_key_hex), Some(w.address.as_str()));
        assert_eq!(registry.address_for_pubkey("unknown"), None);
    }
}
