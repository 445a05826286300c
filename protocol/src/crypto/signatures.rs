//! # Digital Signatures
//!
//! Recoverable secp256k1 ECDSA over 32-byte digests.
//!
//! Nonces are derived with RFC 6979 inside libsecp256k1, so signing the same
//! digest with the same key always yields the same 65 bytes. No RNG is
//! touched at signing time, which is the whole point: a bad RNG during ECDSA
//! signing leaks your private key (see: PlayStation 3, 2010).
//!
//! libsecp256k1 also emits low-`s` signatures only, so there is exactly one
//! valid encoding per (key, digest) pair.

use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
use secp256k1::{Message, SECP256K1};

use super::keys::{IconSignature, KeyError, PrivateKey, PublicKey};

/// Sign a 32-byte digest.
///
/// # Example
///
/// ```
/// use icon_protocol::crypto::{sha3_256, sign, verify, PrivateKey};
///
/// let key = PrivateKey::generate();
/// let digest = sha3_256(b"icx_sendTransaction.from.hx...");
/// let sig = sign(&key, &digest);
/// assert!(verify(&key.public_key(), &digest, &sig));
/// ```
pub fn sign(key: &PrivateKey, digest: &[u8; 32]) -> IconSignature {
    let message = Message::from_digest(*digest);
    let recoverable = SECP256K1.sign_ecdsa_recoverable(&message, key.secret());
    let (recovery_id, compact) = recoverable.serialize_compact();
    IconSignature::from_parts(compact, recovery_id.to_i32() as u8)
}

fn to_recoverable(signature: &IconSignature) -> Result<RecoverableSignature, KeyError> {
    let recovery_id = RecoveryId::from_i32(i32::from(signature.recovery_id())).map_err(|_| {
        KeyError::InvalidSignature {
            reason: "bad recovery id".to_string(),
        }
    })?;
    RecoverableSignature::from_compact(signature.compact(), recovery_id).map_err(|_| {
        KeyError::InvalidSignature {
            reason: "r or s out of range".to_string(),
        }
    })
}

/// Verify a signature against a known public key.
///
/// Returns a plain boolean: callers almost always want yes/no, and the
/// reason a forged signature failed is nobody's business.
pub fn verify(public_key: &PublicKey, digest: &[u8; 32], signature: &IconSignature) -> bool {
    let Ok(recoverable) = to_recoverable(signature) else {
        return false;
    };
    let message = Message::from_digest(*digest);
    SECP256K1
        .verify_ecdsa(&message, &recoverable.to_standard(), public_key.inner())
        .is_ok()
}

/// Recover the signer's public key from a digest and a recoverable signature.
pub fn recover(digest: &[u8; 32], signature: &IconSignature) -> Result<PublicKey, KeyError> {
    let recoverable = to_recoverable(signature)?;
    let message = Message::from_digest(*digest);
    SECP256K1
        .recover_ecdsa(&message, &recoverable)
        .map(PublicKey::from_inner)
        .map_err(|_| KeyError::RecoveryFailed)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
