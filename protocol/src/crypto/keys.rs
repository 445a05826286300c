//! # Key Management
//!
//! secp256k1 keys and the 65-byte recoverable signature format ICON puts on
//! the wire.
//!
//! ## Security considerations
//!
//! - Private keys are validated as curve scalars at construction. There is
//!   no way to hold a `PrivateKey` that the signer would reject.
//! - `Debug` never prints secret material.
//! - Key bytes are never logged. If you add logging to this module,
//!   you will be asked to leave.

use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use rand::rngs::OsRng;
use rand::RngCore;
use secp256k1::SecretKey;
use thiserror::Error;

use crate::config::{
    ADDRESS_BODY_LENGTH, PRIVATE_KEY_LENGTH, SIGNATURE_LENGTH, UNCOMPRESSED_PUBLIC_KEY_LENGTH,
};
use crate::crypto::hash::sha3_256;
use crate::types::{Address, AddressKind};

/// Errors that can occur during key and signature handling.
///
/// Intentionally vague about *why* a key was rejected; leaking details
/// about key material through error messages is a classic footgun.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("invalid private key: wrong length or not a valid secp256k1 scalar")]
    InvalidPrivateKey,

    #[error("invalid public key: not a valid secp256k1 point")]
    InvalidPublicKey,

    #[error("invalid signature: {reason}")]
    InvalidSignature { reason: String },

    #[error("public key recovery failed")]
    RecoveryFailed,
}

// ---------------------------------------------------------------------------
// PrivateKey
// ---------------------------------------------------------------------------

/// A secp256k1 private scalar.
///
/// Deliberately not `Serialize`. Exporting a key should be a conscious act:
/// call [`PrivateKey::to_hex`].
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey {
    secret: SecretKey,
}

impl PrivateKey {
    /// Draws a fresh key from the OS RNG.
    ///
    /// Out-of-range scalars (zero, or `>= n`) are astronomically unlikely
    /// but possible; they are simply redrawn.
    pub fn generate() -> Self {
        let mut bytes = [0u8; PRIVATE_KEY_LENGTH];
        loop {
            OsRng.fill_bytes(&mut bytes);
            if let Ok(secret) = SecretKey::from_slice(&bytes) {
                return Self { secret };
            }
        }
    }

    /// Wraps raw key bytes, rejecting anything that is not a 32-byte scalar
    /// in `[1, n)`.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, KeyError> {
        if bytes.len() != PRIVATE_KEY_LENGTH {
            return Err(KeyError::InvalidPrivateKey);
        }
        let secret = SecretKey::from_slice(bytes).map_err(|_| KeyError::InvalidPrivateKey)?;
        Ok(Self { secret })
    }

    /// Parses a hex-encoded key, with or without a `0x` prefix.
    pub fn from_hex(hex_str: &str) -> Result<Self, KeyError> {
        let digits = hex_str.strip_prefix("0x").unwrap_or(hex_str);
        let bytes = hex::decode(digits).map_err(|_| KeyError::InvalidPrivateKey)?;
        Self::from_slice(&bytes)
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            inner: secp256k1::PublicKey::from_secret_key_global(&self.secret),
        }
    }

    /// Exports the raw 32-byte scalar. Handle with extreme care.
    pub fn to_bytes(&self) -> [u8; PRIVATE_KEY_LENGTH] {
        self.secret.secret_bytes()
    }

    /// Exports the key as bare lowercase hex.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    pub(crate) fn secret(&self) -> &SecretKey {
        &self.secret
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrivateKey(<redacted>, pub={})", self.public_key().to_address())
    }
}

// ---------------------------------------------------------------------------
// PublicKey
// ---------------------------------------------------------------------------

/// A secp256k1 public point.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PublicKey {
    inner: secp256k1::PublicKey,
}

impl PublicKey {
    pub(crate) fn from_inner(inner: secp256k1::PublicKey) -> Self {
        Self { inner }
    }

    /// Accepts both compressed (33-byte) and uncompressed (65-byte) forms.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, KeyError> {
        let inner =
            secp256k1::PublicKey::from_slice(bytes).map_err(|_| KeyError::InvalidPublicKey)?;
        Ok(Self { inner })
    }

    pub fn from_hex(hex_str: &str) -> Result<Self, KeyError> {
        let digits = hex_str.strip_prefix("0x").unwrap_or(hex_str);
        let bytes = hex::decode(digits).map_err(|_| KeyError::InvalidPublicKey)?;
        Self::from_slice(&bytes)
    }

    /// 65 bytes: `0x04 || x || y`.
    pub fn serialize_uncompressed(&self) -> [u8; UNCOMPRESSED_PUBLIC_KEY_LENGTH] {
        self.inner.serialize_uncompressed()
    }

    /// 33 bytes: parity tag and `x`.
    pub fn serialize_compressed(&self) -> [u8; 33] {
        self.inner.serialize()
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.serialize_uncompressed())
    }

    /// Derives the `hx` address: the last 20 bytes of SHA3-256 over the
    /// 64-byte `x || y` (uncompressed form without its tag byte).
    pub fn to_address(&self) -> Address {
        let uncompressed = self.serialize_uncompressed();
        let digest = sha3_256(&uncompressed[1..]);
        let mut body = [0u8; ADDRESS_BODY_LENGTH];
        body.copy_from_slice(&digest[digest.len() - ADDRESS_BODY_LENGTH..]);
        Address::new(AddressKind::Eoa, body)
    }

    pub(crate) fn inner(&self) -> &secp256k1::PublicKey {
        &self.inner
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_hex())
    }
}

// ---------------------------------------------------------------------------
// IconSignature
// ---------------------------------------------------------------------------

/// A recoverable ECDSA signature: `r (32, BE) || s (32, BE) || recovery id (1)`.
///
/// Travels as standard base64 of the 65 raw bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct IconSignature {
    bytes: [u8; SIGNATURE_LENGTH],
}

impl IconSignature {
    /// Validates the length and the recovery id (0..=3).
    pub fn from_slice(bytes: &[u8]) -> Result<Self, KeyError> {
        let bytes: [u8; SIGNATURE_LENGTH] =
            bytes.try_into().map_err(|_| KeyError::InvalidSignature {
                reason: format!("expected {SIGNATURE_LENGTH} bytes, got {}", bytes.len()),
            })?;
        if bytes[64] > 3 {
            return Err(KeyError::InvalidSignature {
                reason: format!("recovery id {} out of range", bytes[64]),
            });
        }
        Ok(Self { bytes })
    }

    pub(crate) fn from_parts(compact: [u8; 64], recovery_id: u8) -> Self {
        let mut bytes = [0u8; SIGNATURE_LENGTH];
        bytes[..64].copy_from_slice(&compact);
        bytes[64] = recovery_id;
        Self { bytes }
    }

    pub fn from_base64(encoded: &str) -> Result<Self, KeyError> {
        let bytes = STANDARD
            .decode(encoded)
            .map_err(|e| KeyError::InvalidSignature {
                reason: format!("not base64: {e}"),
            })?;
        Self::from_slice(&bytes)
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LENGTH] {
        &self.bytes
    }

    pub fn r(&self) -> &[u8] {
        &self.bytes[..32]
    }

    pub fn s(&self) -> &[u8] {
        &self.bytes[32..64]
    }

    pub fn recovery_id(&self) -> u8 {
        self.bytes[64]
    }

    pub(crate) fn compact(&self) -> &[u8] {
        &self.bytes[..64]
    }
}

impl fmt::Debug for IconSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IconSignature({})", self.to_base64())
    }
}

impl fmt::Display for IconSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base64())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_KEY: &str = "38f792b95a5202ab431bfc799f7e1e5c74ec0b9ede5c6142ee7364f2c84d72f6";

    #[test]
    fn sample_key_derives_known_address() {
        let key = PrivateKey::from_hex(SAMPLE_KEY).unwrap();
        assert_eq!(
            key.public_key().to_address().to_string(),
            "hx902ecb51c109183ace539f247b4ea1347fbf23b5"
        );
    }

    #[test]
    fn scalar_one_derives_generator_address() {
        let mut bytes = [0u8; 32];
        bytes[31] = 1;
        let key = PrivateKey::from_slice(&bytes).unwrap();
        let public = key.public_key().serialize_uncompressed();
        assert_eq!(
            hex::encode(&public[1..33]),
            "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
        );
        assert_eq!(
            key.public_key().to_address().to_string(),
            "hx0502987e630ea7ebb2bf1d84a65a727109385bcf"
        );
    }

    #[test]
    fn hex_prefix_is_optional() {
        let bare = PrivateKey::from_hex(SAMPLE_KEY).unwrap();
        let prefixed = PrivateKey::from_hex(&format!("0x{SAMPLE_KEY}")).unwrap();
        assert_eq!(bare, prefixed);
        assert_eq!(bare.to_hex(), SAMPLE_KEY);
    }

    #[test]
    fn rejects_invalid_scalars() {
        assert_eq!(PrivateKey::from_slice(&[0u8; 32]), Err(KeyError::InvalidPrivateKey));
        assert_eq!(PrivateKey::from_slice(&[1u8; 31]), Err(KeyError::InvalidPrivateKey));
        assert_eq!(
            PrivateKey::from_hex("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141"),
            Err(KeyError::InvalidPrivateKey)
        );
        assert_eq!(PrivateKey::from_hex("not hex"), Err(KeyError::InvalidPrivateKey));
    }

    #[test]
    fn generated_keys_are_distinct() {
        let a = PrivateKey::generate();
        let b = PrivateKey::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn debug_does_not_leak_secret() {
        let key = PrivateKey::from_hex(SAMPLE_KEY).unwrap();
        let debug = format!("{:?}", key);
        assert!(!debug.contains(SAMPLE_KEY));
        assert!(debug.contains("redacted"));
    }

    #[test]
    fn public_key_roundtrips_through_both_encodings() {
        let public = PrivateKey::from_hex(SAMPLE_KEY).unwrap().public_key();
        let from_uncompressed = PublicKey::from_slice(&public.serialize_uncompressed()).unwrap();
        let from_compressed = PublicKey::from_slice(&public.serialize_compressed()).unwrap();
        assert_eq!(from_uncompressed, public);
        assert_eq!(from_compressed, public);
        assert_eq!(PublicKey::from_hex(&public.to_hex()).unwrap(), public);
    }

    #[test]
    fn signature_length_and_recovery_id_checked() {
        assert!(IconSignature::from_slice(&[0u8; 64]).is_err());
        let mut bytes = [0u8; 65];
        bytes[64] = 4;
        assert!(IconSignature::from_slice(&bytes).is_err());
        bytes[64] = 1;
        let sig = IconSignature::from_slice(&bytes).unwrap();
        assert_eq!(sig.recovery_id(), 1);
        assert_eq!(IconSignature::from_base64(&sig.to_base64()).unwrap(), sig);
        assert!(IconSignature::from_base64("%%%").is_err());
    }
}
