// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # ICON Protocol: Transaction Core
//!
//! Everything a client needs to turn a handful of fields into a signed
//! `icx_sendTransaction` payload the ICON network will accept, and nothing
//! it doesn't. No HTTP, no node state, no retries. The core's job ends the
//! moment it hands you a validated, hashed, signed parameter map.
//!
//! The hard part is byte-exactness. ICON hashes a dotted text rendering of
//! the parameters, not the JSON, so one stray leading zero in a hex number
//! and the signature is worthless on-chain.
//!
//! ## Architecture
//!
//! Leaves first:
//!
//! - **codec**: native values to canonical `0x` hex text and back.
//! - **validator**: boolean predicates over the protocol's text grammar.
//! - **types**: `Address`, `Hash`, `HexInt`. Validated once, trusted after.
//! - **crypto**: SHA3-256 and secp256k1 recoverable ECDSA.
//! - **wallet**: a private key plus its derived `hx` address.
//! - **transaction**: builders, canonical hashing, signing, verification.
//! - **config**: protocol constants and network presets.
//! - **error**: the error types that cross module boundaries.
//!
//! ## Quick Start
//!
//! ```rust
//! use icon_protocol::config::NetworkConfig;
//! use icon_protocol::transaction::{SignedTransaction, TransactionBuilder};
//! use icon_protocol::wallet::Wallet;
//!
//! let wallet = Wallet::generate();
//! let tx = TransactionBuilder::new()
//!     .network(&NetworkConfig::yeouido())
//!     .from(wallet.address().to_string())
//!     .to("hxd008c05cbc0e689f04a5bb729a66b42377a9a497")
//!     .value(1_000_000_000_000_000_000u128)
//!     .timestamp(icon_protocol::config::timestamp_now())
//!     .build()?;
//!
//! let signed = SignedTransaction::new(tx, &wallet)?;
//! let params = signed.to_params();
//! assert!(icon_protocol::validator::is_signed_transaction(&params));
//! # Ok::<(), icon_protocol::error::IconError>(())
//! ```
//!
//! ## Design Philosophy
//!
//! 1. Fail fast. Invalid input is an error naming the field, never repaired.
//! 2. Deterministic everything. Same fields, same hash; same key, same
//!    signature (RFC 6979).
//! 3. Immutable outputs. To change a transaction, rebuild it.

pub mod codec;
pub mod config;
pub mod crypto;
pub mod error;
pub mod transaction;
pub mod types;
pub mod validator;
pub mod wallet;

pub use error::{IconError, Result, ValidationError};
pub use transaction::{SignedTransaction, Transaction, TransactionBuilder};
pub use types::{Address, Hash, HexInt};
pub use wallet::Wallet;
