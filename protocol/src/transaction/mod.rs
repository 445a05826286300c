//! # Transaction Module
//!
//! Construction, canonical hashing, signing, and verification of ICON
//! `icx_sendTransaction` payloads.
//!
//! ## Architecture
//!
//! ```text
//! types.rs        Variant structs, the Transaction union, parameter maps
//! builder.rs      TransactionBuilder and the per-variant builders
//! serializer.rs   Canonical dotted phrase and SHA3-256 transaction hash
//! signing.rs      SignedTransaction: recoverable secp256k1 signature
//! verification.rs Signer recovery and sender check on a params map
//! call.rs         Read-only icx_call requests
//! ```
//!
//! ## Transaction Lifecycle
//!
//! 1. **Build**: a builder accumulates raw fields, then validates them once.
//! 2. **Hash**: [`Transaction::tx_hash`] serializes and digests the fields.
//! 3. **Sign**: [`SignedTransaction::new`] signs the hash with a wallet.
//! 4. **Send**: [`SignedTransaction::to_params`] goes to the JSON-RPC layer.
//!
//! ## Design Decisions
//!
//! - Only absent optional fields are left out of the parameter map. A
//!   `nonce` of zero is sent as `"0x0"` and hashed.
//! - Every numeric field is canonical hex text (`0x0`, `0x186a0`), never a
//!   JSON number. Byte-exactness of the hash depends on it.
//! - Nothing here does I/O. Transport, retries, and receipts belong to the
//!   caller.

pub mod builder;
pub mod call;
pub mod serializer;
pub mod signing;
pub mod types;
pub mod verification;

/// A JSON-RPC parameter object.
pub type Params = serde_json::Map<String, serde_json::Value>;

pub use builder::{
    CallTransactionBuilder, DeployTransactionBuilder, DepositTransactionBuilder,
    MessageTransactionBuilder, TransactionBuilder,
};
pub use call::{Call, CallBuilder};
pub use serializer::{digest, digest_params, serialize};
pub use signing::SignedTransaction;
pub use types::{
    CallTransaction, CommonFields, DataType, DeployTransaction, DepositAction,
    DepositTransaction, IcxTransaction, MessageTransaction, Transaction, WithdrawTarget,
};
pub use verification::{recover_signer, verify_signed_params, VerificationError};
