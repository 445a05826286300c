//! Signed-transaction verification.
//!
//! ICON transactions do not carry the sender's public key. The signature is
//! recoverable, so verification means: recompute the digest from the
//! parameter map, recover the public key from `signature`, derive its
//! address, and compare it against `from`. Checks run cheapest first
//! (shape before curve math).

use thiserror::Error;
use tracing::warn;

use super::serializer::digest_params;
use super::Params;
use crate::crypto::keys::{IconSignature, KeyError};
use crate::crypto::signatures::recover;
use crate::types::{Address, Hash};
use crate::validator;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Why a signed parameter set was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationError {
    /// The map is not a structurally valid signed transaction.
    #[error("malformed signed transaction: {reason}")]
    Malformed { reason: String },

    /// The signature bytes could not be decoded or recovered.
    #[error(transparent)]
    InvalidSignature(#[from] KeyError),

    /// The signature is valid, but for somebody else.
    #[error("signature was made by {recovered}, not by sender {sender}")]
    SignerMismatch { sender: Address, recovered: Address },
}

// ---------------------------------------------------------------------------
// Verification
// ---------------------------------------------------------------------------

/// Recovers the address that signed `digest`.
pub fn recover_signer(digest: &Hash, signature: &IconSignature) -> Result<Address, KeyError> {
    recover(digest.as_bytes(), signature).map(|pk| pk.to_address())
}

/// Verifies a wire-ready `icx_sendTransaction` parameter map.
///
/// The checks, in order:
///
/// 1. **Shape**: [`validator::is_signed_transaction`] must accept the map.
/// 2. **Signature decoding**: `signature` is base64 of 65 bytes with a
///    valid recovery id.
/// 3. **Recovery**: the signer is recovered from the recomputed digest.
/// 4. **Sender**: the recovered address must equal `from`.
///
/// Returns the signer address on success.
pub fn verify_signed_params(params: &Params) -> Result<Address, VerificationError> {
    if !validator::is_signed_transaction(params) {
        return Err(VerificationError::Malformed {
            reason: "missing or invalid fields".to_string(),
        });
    }

    let sender: Address = params
        .get("from")
        .and_then(|v| v.as_str())
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| VerificationError::Malformed {
            reason: "unparseable `from`".to_string(),
        })?;
    let signature = params
        .get("signature")
        .and_then(|v| v.as_str())
        .ok_or_else(|| VerificationError::Malformed {
            reason: "missing `signature`".to_string(),
        })?;
    let signature = IconSignature::from_base64(signature)?;

    let digest = digest_params(params);
    let recovered = recover_signer(&digest, &signature)?;
    if recovered != sender {
        warn!(
            tx_hash = %digest,
            sender = %sender,
            recovered = %recovered,
            "signature does not match sender"
        );
        return Err(VerificationError::SignerMismatch { sender, recovered });
    }
    Ok(recovered)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
