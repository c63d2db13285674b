//! Shared scalar aliases for the account/balance model.
//!
//! Accounts are addressable by either a 64-hex-char address (SHA-256 of the
//! public key) or the raw 64-hex-char public key itself — both are aliases
//! for the same account (see [`crate::validation::is_hex64`]).

/// Account balances and transfer amounts.
pub type Amount = f64;

/// Seconds since the Unix epoch.
pub type Timestamp = i64;

/// A hex-encoded public key, address, or signature. Kept as `String` rather
/// than a fixed-size newtype: the wire format is JSON strings end to end, and
/// `sender` additionally carries the non-hex literal `"COINBASE"`.
pub type HexString = String;
