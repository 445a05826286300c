//! Canonical serialization and hashing.
//!
//! The network does not hash JSON. It hashes a dotted phrase built from the
//! parameter map:
//!
//! ```text
//! icx_sendTransaction.data.{method.transfer.params.{_to.hx…._value.0x1}}.dataType.call.from.hx….nid.0x3…
//! ```
//!
//! Rules, at every nesting level:
//!
//! - keys in ascending byte order, each pair written `key.value`, pairs
//!   joined with `.`;
//! - objects wrap their pairs in `{}`; arrays wrap `.`-joined items in `[]`;
//! - `null` is written `\0`;
//! - in string values, `\ . { } [ ]` are escaped with a backslash (keys are
//!   written as-is);
//! - the top-level `method`, `signature` and `txHash` entries are skipped.
//!
//! The phrase is hashed with SHA3-256. Same fields in, same digest out,
//! regardless of the order the builder was called in.

use serde_json::{Number, Value};
use tracing::{debug, trace};

use super::types::Transaction;
use super::Params;
use crate::codec;
use crate::config::{DIGEST_ALGORITHM, SEND_TRANSACTION_METHOD};
use crate::crypto::hash::sha3_256;
use crate::types::Hash;

/// Top-level keys that never take part in the hash.
const EXCLUDED_KEYS: [&str; 3] = ["method", "signature", "txHash"];

fn escape_into(out: &mut String, s: &str) {
    for c in s.chars() {
        if matches!(c, '\\' | '.' | '{' | '}' | '[' | ']') {
            out.push('\\');
        }
        out.push(c);
    }
}

// Numbers and booleans never come out of a builder; they are accepted here
// so a hand-assembled parameter map still hashes the way it would after
// normalization.
fn number_text(n: &Number) -> String {
    if let Some(u) = n.as_u64() {
        codec::encode_uint(&u.into())
    } else if let Some(i) = n.as_i64() {
        codec::encode_int(&i.into())
    } else {
        n.to_string()
    }
}

fn write_pairs<'a>(out: &mut String, entries: impl Iterator<Item = (&'a String, &'a Value)>) {
    let mut sorted: Vec<_> = entries.collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));
    for (i, (key, value)) in sorted.into_iter().enumerate() {
        if i > 0 {
            out.push('.');
        }
        out.push_str(key);
        out.push('.');
        write_value(out, value);
    }
}

fn write_value(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("\\0"),
        Value::Bool(b) => out.push_str(if *b { "0x1" } else { "0x0" }),
        Value::Number(n) => out.push_str(&number_text(n)),
        Value::String(s) => escape_into(out, s),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push('.');
                }
                write_value(out, item);
            }
            out.push(']');
        }
        Value::Object(map) => {
            out.push('{');
            write_pairs(out, map.iter());
            out.push('}');
        }
    }
}

/// Builds the canonical phrase for a parameter map.
pub fn serialize(params: &Params) -> String {
    let mut out = String::with_capacity(512);
    out.push_str(SEND_TRANSACTION_METHOD);
    out.push('.');
    write_pairs(
        &mut out,
        params
            .iter()
            .filter(|(key, _)| !EXCLUDED_KEYS.contains(&key.as_str())),
    );
    out
}

/// SHA3-256 of [`serialize`].
pub fn digest_params(params: &Params) -> Hash {
    let phrase = serialize(params);
    trace!(phrase = %phrase, "canonical transaction phrase");
    Hash::from_bytes(sha3_256(phrase.as_bytes()))
}

/// Transaction hash: the digest that gets signed and that the network
/// reports back as `txHash`.
pub fn digest(transaction: &Transaction) -> Hash {
    let hash = digest_params(&transaction.to_params());
    debug!(
        tx_hash = %hash,
        algorithm = DIGEST_ALGORITHM,
        data_type = transaction.data_type().map(|d| d.as_str()).unwrap_or("transfer"),
        "computed transaction hash"
    );
    hash
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
