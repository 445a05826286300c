//! # Validator
//!
//! Stateless predicates over the protocol's text grammar. Every function
//! answers yes or no and never panics or errors: the caller decides whether
//! an invalid value is fatal. (It is, in the builders and in the pre-send
//! checks, which turn a `false` into a [`crate::error::ValidationError`].)
//!
//! The canonical grammars:
//!
//! ```text
//! Address  ^(hx|cx)[0-9a-f]{40}$
//! Hash     ^0x[0-9a-f]{64}$
//! HexInt   ^0x(0|[1-9a-f][0-9a-f]*)$
//! ```

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::Value;

use crate::config::{
    ADDRESS_BODY_LENGTH, CONTRACT_PREFIX, EOA_PREFIX, HASH_LENGTH, LATEST_BLOCK,
    PRIVATE_KEY_LENGTH, SIGNATURE_LENGTH, UNCOMPRESSED_PUBLIC_KEY_LENGTH,
};
use crate::transaction::Params;

fn is_lower_hex(s: &str) -> bool {
    s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

fn has_lower_hex_body(s: &str, prefix: &str, hex_len: usize) -> bool {
    match s.strip_prefix(prefix) {
        Some(body) => body.len() == hex_len && is_lower_hex(body),
        None => false,
    }
}

// ---------------------------------------------------------------------------
// Addresses
// ---------------------------------------------------------------------------

/// `hx` or `cx` followed by exactly 40 lowercase hex digits.
pub fn is_address(s: &str) -> bool {
    is_eoa_address(s) || is_score_address(s)
}

/// Externally-owned account address (`hx…`).
pub fn is_eoa_address(s: &str) -> bool {
    has_lower_hex_body(s, EOA_PREFIX, ADDRESS_BODY_LENGTH * 2)
}

/// SCORE address (`cx…`).
pub fn is_score_address(s: &str) -> bool {
    has_lower_hex_body(s, CONTRACT_PREFIX, ADDRESS_BODY_LENGTH * 2)
}

// ---------------------------------------------------------------------------
// Hashes & numbers
// ---------------------------------------------------------------------------

/// `0x` followed by exactly 64 lowercase hex digits.
pub fn is_hash(s: &str) -> bool {
    has_lower_hex_body(s, "0x", HASH_LENGTH * 2)
}

pub fn is_block_hash(s: &str) -> bool {
    is_hash(s)
}

pub fn is_transaction_hash(s: &str) -> bool {
    is_hash(s)
}

/// Canonical hex integer: `0x0`, or `0x` and lowercase digits without a
/// leading zero.
pub fn is_hex_int(s: &str) -> bool {
    match s.strip_prefix("0x") {
        Some("0") => true,
        Some(digits) => !digits.is_empty() && !digits.starts_with('0') && is_lower_hex(digits),
        None => false,
    }
}

/// `0x` followed by an even number of hex digits (possibly none).
pub fn is_hex_bytes(s: &str) -> bool {
    match s.strip_prefix("0x") {
        Some(digits) => digits.len() % 2 == 0 && digits.bytes().all(|b| b.is_ascii_hexdigit()),
        None => false,
    }
}

/// Non-negative decimal integer or its canonical hex encoding.
pub fn is_block_number(s: &str) -> bool {
    if s.starts_with("0x") {
        return is_hex_int(s);
    }
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// The literal marker for "the latest block".
pub fn is_predefined_block_value(s: &str) -> bool {
    s == LATEST_BLOCK
}

// ---------------------------------------------------------------------------
// Keys
// ---------------------------------------------------------------------------

/// 32 bytes of hex (optional `0x`) that form a valid secp256k1 scalar.
pub fn is_private_key(s: &str) -> bool {
    let digits = s.strip_prefix("0x").unwrap_or(s);
    match hex::decode(digits) {
        Ok(bytes) if bytes.len() == PRIVATE_KEY_LENGTH => {
            secp256k1::SecretKey::from_slice(&bytes).is_ok()
        }
        _ => false,
    }
}

/// Hex (optional `0x`) of an uncompressed secp256k1 point.
pub fn is_public_key(s: &str) -> bool {
    let digits = s.strip_prefix("0x").unwrap_or(s);
    match hex::decode(digits) {
        Ok(bytes) if bytes.len() == UNCOMPRESSED_PUBLIC_KEY_LENGTH => {
            secp256k1::PublicKey::from_slice(&bytes).is_ok()
        }
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// Request shapes
// ---------------------------------------------------------------------------

fn str_field<'a>(params: &'a Params, key: &str) -> Option<&'a str> {
    params.get(key).and_then(Value::as_str)
}

fn optional_hex_int(params: &Params, key: &str) -> bool {
    match params.get(key) {
        None => true,
        Some(value) => value.as_str().is_some_and(is_hex_int),
    }
}

/// Structural check of a signed `icx_sendTransaction` parameter set:
/// common fields present and well-formed, `signature` decodes to 65 bytes.
pub fn is_signed_transaction(params: &Params) -> bool {
    let required_ints = ["version", "stepLimit", "nid", "timestamp"];
    if !required_ints
        .iter()
        .all(|key| str_field(params, key).is_some_and(is_hex_int))
    {
        return false;
    }
    if !optional_hex_int(params, "value") || !optional_hex_int(params, "nonce") {
        return false;
    }
    if !str_field(params, "from").is_some_and(is_eoa_address) {
        return false;
    }
    if !str_field(params, "to").is_some_and(is_address) {
        return false;
    }
    match str_field(params, "signature").map(|s| STANDARD.decode(s)) {
        Some(Ok(bytes)) => bytes.len() == SIGNATURE_LENGTH,
        _ => false,
    }
}

/// Structural check of an `icx_call` parameter set: `to` is a SCORE,
/// `dataType` is `call`, and `data.method` is a non-empty string.
pub fn is_call(params: &Params) -> bool {
    if !str_field(params, "to").is_some_and(is_score_address) {
        return false;
    }
    if let Some(from) = params.get("from") {
        if !from.as_str().is_some_and(is_eoa_address) {
            return false;
        }
    }
    if str_field(params, "dataType") != Some("call") {
        return false;
    }
    params
        .get("data")
        .and_then(|data| data.get("method"))
        .and_then(Value::as_str)
        .is_some_and(|method| !method.is_empty())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
