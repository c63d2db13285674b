use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;

use aureus_core::error::AureusError;

use crate::hash::address_from_pubkey;

/// A freshly generated keypair plus the address derived from its public key.
pub struct GeneratedKeypair {
    pub address: String,
    pub public_key_hex: String,
    pub private_key_hex: String,
}

/// Generate a new Ed25519 keypair (§9 "the spec consumes a signature
/// primitive with defined inputs and outputs" — key generation internals are
/// out of scope; this is the one concrete implementation a node needs to
/// create wallets).
pub fn generate_keypair() -> GeneratedKeypair {
    let mut csprng = OsRng;
    let signing_key = SigningKey::generate(&mut csprng);
    let verifying_key = signing_key.verifying_key();
    let public_key_hex = hex::encode(verifying_key.to_bytes());
    GeneratedKeypair {
        address: address_from_pubkey(&verifying_key.to_bytes()),
        public_key_hex,
        private_key_hex: hex::encode(signing_key.to_bytes()),
    }
}

fn decode_signing_key(private_key_hex: &str) -> Result<SigningKey, AureusError> {
    let bytes = hex::decode(private_key_hex)
        .map_err(|e| AureusError::MalformedKey(e.to_string()))?;
    let arr: [u8; 32] = bytes
        .try_into()
        .map_err(|_| AureusError::MalformedKey("private key must be 32 bytes".into()))?;
    Ok(SigningKey::from_bytes(&arr))
}

fn decode_verifying_key(public_key_hex: &str) -> Result<VerifyingKey, AureusError> {
    let bytes = hex::decode(public_key_hex)
        .map_err(|e| AureusError::MalformedKey(e.to_string()))?;
    let arr: [u8; 32] = bytes
        .try_into()
        .map_err(|_| AureusError::MalformedKey("public key must be 32 bytes".into()))?;
    VerifyingKey::from_bytes(&arr).map_err(|e| AureusError::MalformedKey(e.to_string()))
}

/// Sign `message` with the hex-encoded private key, returning the hex
/// signature. Fails if `private_key_hex` is malformed (§4.2).
pub fn sign(message: &[u8], private_key_hex: &str) -> Result<String, AureusError> {
    let signing_key = decode_signing_key(private_key_hex)?;
    let signature = signing_key.sign(message);
    Ok(hex::encode(signature.to_bytes()))
}

/// `true` iff `signature_hex` is a valid Ed25519 signature over `message`
/// under `public_key_hex`. Malformed inputs verify as `false`, never panic
/// or error — callers fold this straight into admission/validation booleans
/// (§4.2, §7 "Exception-for-control-flow" redesign flag).
pub fn verify(message: &[u8], signature_hex: &str, public_key_hex: &str) -> bool {
    let Ok(verifying_key) = decode_verifying_key(public_key_hex) else {
        return false;
    };
    let Ok(sig_bytes) = hex::decode(signature_hex) else {
        return false;
    };
    let Ok(sig_arr): Result<[u8; 64], _> = sig_bytes.try_into() else {
        return false;
    };
    let signature = Signature::from_bytes(&sig_arr);
    verifying_key.verify(message, &signature).is_ok()
}
