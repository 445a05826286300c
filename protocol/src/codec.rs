//! # Field Codec
//!
//! Conversions between native values and the protocol's `0x`-prefixed hex
//! text. Every number, string, and byte blob that ends up in a transaction
//! passes through here before it is hashed, so the output must be canonical:
//! lowercase digits, no leading zeros, and exactly `0x0` for zero. A stray
//! leading zero changes the hash input and the network will reject the
//! signature without telling you why.
//!
//! ## Encoding rules
//!
//! | Input            | Output                                     |
//! |------------------|--------------------------------------------|
//! | integer `n >= 0` | `0x` + minimal lowercase base-16 digits    |
//! | integer `n < 0`  | `-0x` + digits of `|n|`                    |
//! | text             | `0x` + two hex digits per UTF-8 byte       |
//! | bytes            | `0x` + two hex digits per byte             |
//!
//! Decoding is the inverse for numeric fields: `0x`-prefixed text is read as
//! base 16, anything else as base 10. Malformed input is an error, never a
//! best guess.

use std::collections::BTreeMap;

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{Num, Zero};
use thiserror::Error;

/// Errors raised by the codec on malformed input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    #[error("empty input where a value was expected")]
    Empty,

    #[error("malformed hex text: {input:?}")]
    InvalidHex { input: String },

    #[error("malformed decimal text: {input:?}")]
    InvalidDecimal { input: String },

    #[error("decoded bytes are not valid UTF-8")]
    InvalidUtf8,

    #[error("negative value where an unsigned integer is required: {value}")]
    Negative { value: String },

    #[error("byte sequence supplied where a numeric value is required")]
    NotNumeric,
}

// ---------------------------------------------------------------------------
// FieldValue
// ---------------------------------------------------------------------------

/// A native value before it has been turned into protocol hex text.
///
/// Builders accept `impl Into<FieldValue>` so callers can pass `u64`, `u128`,
/// big integers, strings, or byte slices without ceremony. The value is only
/// interpreted (and validated) when the transaction is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Int(BigInt),
    Text(String),
    Bytes(Vec<u8>),
}

impl FieldValue {
    /// Shorthand for [`encode_hex`].
    pub fn to_hex(&self) -> String {
        encode_hex(self)
    }

    /// Interprets the value as an integer.
    ///
    /// Text is decoded with [`decode_hex`] (so `"0x186a0"` and `"100000"`
    /// both work). Bytes are not numbers.
    pub fn to_int(&self) -> Result<BigInt, EncodingError> {
        match self {
            FieldValue::Int(n) => Ok(n.clone()),
            FieldValue::Text(text) => decode_hex(text),
            FieldValue::Bytes(_) => Err(EncodingError::NotNumeric),
        }
    }

    /// Like [`to_int`](Self::to_int) but rejects negative values.
    pub fn to_uint(&self) -> Result<BigUint, EncodingError> {
        let n = self.to_int()?;
        n.to_biguint().ok_or_else(|| EncodingError::Negative {
            value: n.to_string(),
        })
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for FieldValue {
                fn from(v: $t) -> Self {
                    FieldValue::Int(BigInt::from(v))
                }
            }
        )*
    };
}

impl_from_int!(u8, u16, u32, u64, u128, usize, i32, i64, i128);

impl From<BigInt> for FieldValue {
    fn from(v: BigInt) -> Self {
        FieldValue::Int(v)
    }
}

impl From<BigUint> for FieldValue {
    fn from(v: BigUint) -> Self {
        FieldValue::Int(BigInt::from(v))
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(v)
    }
}

impl From<&String> for FieldValue {
    fn from(v: &String) -> Self {
        FieldValue::Text(v.clone())
    }
}

impl From<Vec<u8>> for FieldValue {
    fn from(v: Vec<u8>) -> Self {
        FieldValue::Bytes(v)
    }
}

impl From<&[u8]> for FieldValue {
    fn from(v: &[u8]) -> Self {
        FieldValue::Bytes(v.to_vec())
    }
}

impl<const N: usize> From<[u8; N]> for FieldValue {
    fn from(v: [u8; N]) -> Self {
        FieldValue::Bytes(v.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for FieldValue {
    fn from(v: &[u8; N]) -> Self {
        FieldValue::Bytes(v.to_vec())
    }
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// Encodes any [`FieldValue`] into protocol hex text.
pub fn encode_hex(value: &FieldValue) -> String {
    match value {
        FieldValue::Int(n) => encode_int(n),
        FieldValue::Text(text) => encode_text(text),
        FieldValue::Bytes(bytes) => encode_bytes(bytes),
    }
}

/// Canonical integer form: `0x0`, `0x186a0`, `-0x1`.
pub fn encode_int(value: &BigInt) -> String {
    let digits = value.magnitude().to_str_radix(16);
    match value.sign() {
        Sign::Minus => format!("-0x{digits}"),
        _ => format!("0x{digits}"),
    }
}

/// Canonical unsigned integer form.
pub fn encode_uint(value: &BigUint) -> String {
    format!("0x{}", value.to_str_radix(16))
}

/// Text is hex-encoded byte-by-byte over its UTF-8 representation, so a
/// three-byte code point becomes six hex digits.
pub fn encode_text(text: &str) -> String {
    encode_bytes(text.as_bytes())
}

pub fn encode_bytes(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Applies [`encode_hex`] to every value of a field mapping, keeping keys.
pub fn convert_params_to_hex(params: &BTreeMap<String, FieldValue>) -> BTreeMap<String, String> {
    params
        .iter()
        .map(|(key, value)| (key.clone(), encode_hex(value)))
        .collect()
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Decodes numeric text. `0x`-prefixed input is base 16 (either case),
/// anything else base 10. A leading `-` is allowed.
pub fn decode_hex(text: &str) -> Result<BigInt, EncodingError> {
    if text.is_empty() {
        return Err(EncodingError::Empty);
    }

    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };

    // num-bigint tolerates `_` separators and a leading `+`; the protocol
    // does not, so the digit check happens before parsing.
    let magnitude = if let Some(digits) = unsigned.strip_prefix("0x") {
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(EncodingError::InvalidHex {
                input: text.to_string(),
            });
        }
        BigUint::from_str_radix(digits, 16).map_err(|_| EncodingError::InvalidHex {
            input: text.to_string(),
        })?
    } else {
        if unsigned.is_empty() || !unsigned.bytes().all(|b| b.is_ascii_digit()) {
            return Err(EncodingError::InvalidDecimal {
                input: text.to_string(),
            });
        }
        BigUint::from_str_radix(unsigned, 10).map_err(|_| EncodingError::InvalidDecimal {
            input: text.to_string(),
        })?
    };

    let sign = if negative && !magnitude.is_zero() {
        Sign::Minus
    } else {
        Sign::Plus
    };
    Ok(BigInt::from_biguint(sign, magnitude))
}

/// Decodes numeric text that must not be negative.
pub fn decode_uint(text: &str) -> Result<BigUint, EncodingError> {
    FieldValue::Text(text.to_string()).to_uint()
}

/// Inverse of [`encode_bytes`]. Requires the `0x` prefix and an even number
/// of digits.
pub fn decode_hex_bytes(text: &str) -> Result<Vec<u8>, EncodingError> {
    let digits = text.strip_prefix("0x").ok_or_else(|| EncodingError::InvalidHex {
        input: text.to_string(),
    })?;
    hex::decode(digits).map_err(|_| EncodingError::InvalidHex {
        input: text.to_string(),
    })
}

/// Inverse of [`encode_text`].
pub fn decode_hex_utf8(text: &str) -> Result<String, EncodingError> {
    let bytes = decode_hex_bytes(text)?;
    String::from_utf8(bytes).map_err(|_| EncodingError::InvalidUtf8)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
