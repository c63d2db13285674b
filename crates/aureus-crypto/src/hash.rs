use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 digest of `data`.
pub fn sha256_hex(data: &[u8]) -> String {
    let digest = Sha256::digest(data);
    hex::encode(digest)
}

/// Derive an account address from a raw public key: `sha256_hex(pubkey_bytes)`.
pub fn address_from_pubkey(pubkey_bytes: &[u8]) -> String {
    sha256_hex(pubkey_bytes)
}
