pub mod hash;
pub mod keys;
pub mod merkle;
pub mod pow;

pub use hash::{address_from_pubkey, sha256_hex};
pub use keys::{generate_keypair, sign, verify, GeneratedKeypair};
pub use merkle::merkle_root;
pub use pow::{block_hash, meets_difficulty, mine};
