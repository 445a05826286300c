//! # Protocol Configuration & Constants
//!
//! Every magic number the transaction pipeline depends on lives here. If
//! you're hardcoding `"icx_sendTransaction"` somewhere else, you're doing it
//! wrong and you owe the team coffee.
//!
//! Most of these values are fixed by the ICON JSON-RPC v3 protocol. Changing
//! them does not make the network agree with you; it makes every signature
//! you produce invalid.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::types::HexInt;

// ---------------------------------------------------------------------------
// Network Identifiers
// ---------------------------------------------------------------------------

/// Mainnet. Mistakes here cost real ICX.
pub const NID_MAINNET: u64 = 0x1;

/// Euljiro, the long-lived test network operated by the foundation.
pub const NID_EULJIRO: u64 = 0x2;

/// Yeouido, the public developer testnet.
pub const NID_YEOUIDO: u64 = 0x3;

// ---------------------------------------------------------------------------
// Protocol Version & Method Tags
// ---------------------------------------------------------------------------

/// Transaction format version understood by current nodes.
pub const DEFAULT_TRANSACTION_VERSION: u64 = 0x3;

/// JSON-RPC method of a state-changing transaction. Also the literal prefix
/// of the canonical serialization phrase that gets hashed.
pub const SEND_TRANSACTION_METHOD: &str = "icx_sendTransaction";

/// JSON-RPC method of a read-only SCORE call.
pub const CALL_METHOD: &str = "icx_call";

/// Marker accepted wherever a block height is expected, meaning "the tip".
pub const LATEST_BLOCK: &str = "latest";

// ---------------------------------------------------------------------------
// Addresses
// ---------------------------------------------------------------------------

/// Prefix of externally-owned account addresses.
pub const EOA_PREFIX: &str = "hx";

/// Prefix of SCORE (smart contract) addresses.
pub const CONTRACT_PREFIX: &str = "cx";

/// Length of the address body in bytes (40 hex characters).
pub const ADDRESS_BODY_LENGTH: usize = 20;

/// Length of the binary address form: one kind byte plus the body.
pub const ADDRESS_LENGTH: usize = 21;

/// Target of a deploy transaction that installs a brand new SCORE.
pub const SCORE_INSTALL_ADDRESS: &str = "cx0000000000000000000000000000000000000000";

// ---------------------------------------------------------------------------
// Cryptographic Parameters
// ---------------------------------------------------------------------------

/// secp256k1, same curve as Bitcoin and Ethereum.
pub const SIGNING_CURVE: &str = "secp256k1";

/// SHA3-256 (FIPS 202), not Keccak-256. The padding differs and so does
/// every digest.
pub const DIGEST_ALGORITHM: &str = "SHA3-256";

/// Private key length in bytes.
pub const PRIVATE_KEY_LENGTH: usize = 32;

/// Uncompressed public key length in bytes, including the 0x04 tag.
pub const UNCOMPRESSED_PUBLIC_KEY_LENGTH: usize = 65;

/// Digest length in bytes.
pub const HASH_LENGTH: usize = 32;

/// Recoverable signature length: `r (32) || s (32) || recovery id (1)`.
pub const SIGNATURE_LENGTH: usize = 65;

// ---------------------------------------------------------------------------
// Payload Parameters
// ---------------------------------------------------------------------------

/// Content type of a Python SCORE package.
pub const CONTENT_TYPE_ZIP: &str = "application/zip";

/// Content type of a Java SCORE jar.
pub const CONTENT_TYPE_JAVA: &str = "application/java";

/// Content types a deploy transaction may carry.
pub const DEPLOY_CONTENT_TYPES: [&str; 2] = [CONTENT_TYPE_ZIP, CONTENT_TYPE_JAVA];

/// Smallest denomination ("loop") per ICX.
pub const LOOP_PER_ICX: u128 = 1_000_000_000_000_000_000;

// ---------------------------------------------------------------------------
// NetworkConfig
// ---------------------------------------------------------------------------

/// The per-network values that every transaction on that network repeats.
///
/// Load one from a config file (it is plain serde) or use a preset, then hand
/// it to [`crate::transaction::TransactionBuilder::network`] so each builder
/// starts from the same base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfig {
    /// Network identifier.
    pub nid: HexInt,
    /// Transaction format version.
    pub version: HexInt,
    /// Default step limit for transactions built from this config.
    pub step_limit: HexInt,
}

impl NetworkConfig {
    /// Default step limit for the presets. Enough for a transfer or a small
    /// SCORE call; deploys need more.
    pub const DEFAULT_STEP_LIMIT: u64 = 100_000;

    fn preset(nid: u64) -> Self {
        Self {
            nid: HexInt::from(nid),
            version: HexInt::from(DEFAULT_TRANSACTION_VERSION),
            step_limit: HexInt::from(Self::DEFAULT_STEP_LIMIT),
        }
    }

    pub fn mainnet() -> Self {
        Self::preset(NID_MAINNET)
    }

    pub fn euljiro() -> Self {
        Self::preset(NID_EULJIRO)
    }

    pub fn yeouido() -> Self {
        Self::preset(NID_YEOUIDO)
    }

    /// Parses a config from JSON, e.g.
    /// `{"nid":"0x3","version":"0x3","stepLimit":"0x186a0"}`.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

// ---------------------------------------------------------------------------
// Utility
// ---------------------------------------------------------------------------

/// Current UTC time in microseconds, the unit ICON transaction timestamps use.
pub fn timestamp_now() -> u64 {
    Utc::now().timestamp_micros() as u64
}

/// Returns a friendly name for a network ID, mainly for logging.
pub fn network_name(nid: u64) -> String {
    match nid {
        NID_MAINNET => "mainnet".to_string(),
        NID_EULJIRO => "euljiro".to_string(),
        NID_YEOUIDO => "yeouido".to_string(),
        other => format!("unknown(0x{:x})", other),
    }
}
