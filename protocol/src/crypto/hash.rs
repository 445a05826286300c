//! # Hashing Utilities
//!
//! ICON uses SHA3-256 (the FIPS 202 standard) in two places: the digest of
//! the canonical transaction phrase, and the derivation of an address from a
//! public key.
//!
//! ## On SHA3 versus Keccak
//!
//! Ethereum's "sha3" is Keccak-256 with the original padding. ICON uses the
//! standardized SHA3-256. They produce different digests for the same input,
//! so `sha3::Keccak256` is not a drop-in replacement here.

use sha3::{Digest, Sha3_256};

/// Compute the SHA3-256 digest of the input.
///
/// # Example
///
/// ```
/// use icon_protocol::crypto::sha3_256;
///
/// let digest = sha3_256(b"icx_sendTransaction");
/// assert_eq!(digest.len(), 32);
/// ```
pub fn sha3_256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha3_256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// SHA3-256 rendered as bare lowercase hex (no `0x`).
pub fn sha3_256_hex(data: &[u8]) -> String {
    hex::encode(sha3_256(data))
}
