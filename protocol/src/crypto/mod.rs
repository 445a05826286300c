//! # Cryptographic Primitives
//!
//! The small set of primitives the signing pipeline needs, and nothing else:
//!
//! - **SHA3-256** for transaction digests and address derivation.
//! - **secp256k1 ECDSA** with recoverable signatures, RFC 6979 nonces.
//!
//! Everything here is a thin, type-safe wrapper around audited
//! implementations (`sha3`, `secp256k1`). We don't roll our own curve math.

pub mod hash;
pub mod keys;
pub mod signatures;

pub use hash::{sha3_256, sha3_256_hex};
pub use keys::{IconSignature, KeyError, PrivateKey, PublicKey};
pub use signatures::{recover, sign, verify};
