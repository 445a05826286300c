//! # Wallet
//!
//! A private key together with the public key and `hx` address derived from
//! it. This is the signer the transaction pipeline consumes; it is never
//! persisted by this crate. Keystore files and mnemonics are somebody
//! else's problem.

use std::fmt;

use crate::crypto::keys::{IconSignature, KeyError, PrivateKey, PublicKey};
use crate::crypto::signatures;
use crate::types::Address;

/// An in-memory signing identity.
///
/// The public key and address are computed once at construction so signing
/// a batch of transactions does not redo the point multiplication and the
/// SHA3 for each one.
#[derive(Clone)]
pub struct Wallet {
    private_key: PrivateKey,
    public_key: PublicKey,
    address: Address,
}

impl Wallet {
    /// Creates a wallet with a fresh random key.
    pub fn generate() -> Self {
        Self::from_key(PrivateKey::generate())
    }

    /// Loads a wallet from 32 raw key bytes.
    pub fn from_private_key(bytes: &[u8]) -> Result<Self, KeyError> {
        PrivateKey::from_slice(bytes).map(Self::from_key)
    }

    /// Loads a wallet from a hex-encoded key (`0x` prefix optional).
    pub fn from_private_key_hex(hex_str: &str) -> Result<Self, KeyError> {
        PrivateKey::from_hex(hex_str).map(Self::from_key)
    }

    pub fn from_key(private_key: PrivateKey) -> Self {
        let public_key = private_key.public_key();
        let address = public_key.to_address();
        Self {
            private_key,
            public_key,
            address,
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Exports the private key as bare hex. Don't log it.
    pub fn private_key_hex(&self) -> String {
        self.private_key.to_hex()
    }

    /// Signs a 32-byte digest.
    pub fn sign(&self, digest: &[u8; 32]) -> IconSignature {
        signatures::sign(&self.private_key, digest)
    }
}

impl fmt::Debug for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Wallet({})", self.address)
    }
}
