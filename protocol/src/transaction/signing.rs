//! Transaction signing with secp256k1 recoverable signatures.
//!
//! Signing is a separate step from building because the wallet may not be
//! available at construction time. The signing input is the transaction
//! hash from [`super::serializer::digest`], which by construction never
//! includes the `signature` field itself.

use serde_json::Value;
use tracing::debug;

use super::types::Transaction;
use super::verification::recover_signer;
use super::Params;
use crate::config::SIGNING_CURVE;
use crate::crypto::keys::IconSignature;
use crate::error::{IconError, ValidationError};
use crate::types::Hash;
use crate::wallet::Wallet;

/// A transaction together with its hash and the sender's signature.
///
/// Produced once by [`SignedTransaction::new`], then handed to the transport
/// as [`to_params`](Self::to_params). Like [`Transaction`], it is immutable.
///
/// # Example
///
/// ```rust
/// use icon_protocol::transaction::{SignedTransaction, TransactionBuilder};
/// use icon_protocol::wallet::Wallet;
///
/// let wallet = Wallet::generate();
/// let tx = TransactionBuilder::new()
///     .from(wallet.address().to_string())
///     .to("hxd008c05cbc0e689f04a5bb729a66b42377a9a497")
///     .value(1_000u64)
///     .step_limit(100_000u64)
///     .nid(3u64)
///     .version(3u64)
///     .timestamp(1_538_000_000_000_000u64)
///     .build()
///     .unwrap();
///
/// let signed = SignedTransaction::new(tx, &wallet).unwrap();
/// assert!(signed.verify());
/// assert!(signed.to_params().contains_key("signature"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    transaction: Transaction,
    hash: Hash,
    signature: IconSignature,
}

impl SignedTransaction {
    /// Hashes and signs `transaction` with `wallet`.
    ///
    /// # Errors
    ///
    /// [`ValidationError`] on `from` if the wallet's address is not the
    /// transaction's sender. The network would reject such a transaction
    /// anyway, so there is no point signing it.
    pub fn new(transaction: impl Into<Transaction>, wallet: &Wallet) -> Result<Self, IconError> {
        let transaction = transaction.into();
        let sender = *transaction.common().from();
        if sender != wallet.address() {
            return Err(ValidationError::invalid(
                "from",
                format!("{sender} does not match signing wallet {}", wallet.address()),
            )
            .into());
        }

        let hash = transaction.tx_hash();
        let signature = wallet.sign(hash.as_bytes());
        debug!(tx_hash = %hash, signer = %sender, curve = SIGNING_CURVE, "signed transaction");

        Ok(Self {
            transaction,
            hash,
            signature,
        })
    }

    /// Like [`new`](Self::new), loading the wallet from raw key bytes.
    ///
    /// # Errors
    ///
    /// [`IconError::InvalidKey`] if the bytes are not a valid secp256k1
    /// scalar; otherwise as [`new`](Self::new).
    pub fn from_private_key(
        transaction: impl Into<Transaction>,
        private_key: &[u8],
    ) -> Result<Self, IconError> {
        let wallet = Wallet::from_private_key(private_key)?;
        Self::new(transaction, &wallet)
    }

    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    /// The digest that was signed; the network reports it as `txHash`.
    pub fn tx_hash(&self) -> &Hash {
        &self.hash
    }

    pub fn signature(&self) -> &IconSignature {
        &self.signature
    }

    pub fn signature_base64(&self) -> String {
        self.signature.to_base64()
    }

    /// The `icx_sendTransaction` parameters: every transaction field plus
    /// `signature`.
    pub fn to_params(&self) -> Params {
        let mut params = self.transaction.to_params();
        params.insert("signature".into(), Value::String(self.signature_base64()));
        params
    }

    /// `true` if the signature recovers to the sender address.
    pub fn verify(&self) -> bool {
        recover_signer(&self.hash, &self.signature)
            .is_ok_and(|signer| &signer == self.transaction.common().from())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
