//! Arbitrary-precision unsigned integers in canonical hex form.

use std::fmt;
use std::str::FromStr;

use num_bigint::BigUint;
use num_traits::ToPrimitive;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::codec::{self, EncodingError, FieldValue};
use crate::validator;

/// An unsigned integer that renders as `0x` + lowercase hex, no leading
/// zeros, `0x0` for zero.
///
/// `FromStr` only accepts the canonical form. Use
/// [`HexInt::try_from`] on a [`FieldValue`] for the lenient path that also
/// takes decimal text and native integers.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct HexInt(BigUint);

impl HexInt {
    pub fn new(value: BigUint) -> Self {
        Self(value)
    }

    pub fn value(&self) -> &BigUint {
        &self.0
    }

    pub fn into_inner(self) -> BigUint {
        self.0
    }

    /// Lossy view for small values (network ids, versions). `None` when the
    /// value does not fit.
    pub fn to_u64(&self) -> Option<u64> {
        self.0.to_u64()
    }
}

impl From<u64> for HexInt {
    fn from(value: u64) -> Self {
        Self(BigUint::from(value))
    }
}

impl From<u128> for HexInt {
    fn from(value: u128) -> Self {
        Self(BigUint::from(value))
    }
}

impl From<BigUint> for HexInt {
    fn from(value: BigUint) -> Self {
        Self(value)
    }
}

impl From<HexInt> for FieldValue {
    fn from(value: HexInt) -> Self {
        FieldValue::from(value.0)
    }
}

impl From<&HexInt> for FieldValue {
    fn from(value: &HexInt) -> Self {
        FieldValue::from(value.0.clone())
    }
}

impl TryFrom<&FieldValue> for HexInt {
    type Error = EncodingError;

    fn try_from(value: &FieldValue) -> Result<Self, Self::Error> {
        value.to_uint().map(Self)
    }
}

impl FromStr for HexInt {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !validator::is_hex_int(s) {
            return Err(EncodingError::InvalidHex {
                input: s.to_string(),
            });
        }
        codec::decode_uint(s).map(Self)
    }
}

impl fmt::Display for HexInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&codec::encode_uint(&self.0))
    }
}

impl fmt::Debug for HexInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HexInt({})", self)
    }
}

impl Serialize for HexInt {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HexInt {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_display() {
        assert_eq!(HexInt::from(0u64).to_string(), "0x0");
        assert_eq!(HexInt::from(255u64).to_string(), "0xff");
        assert_eq!(HexInt::from(u128::MAX).to_string(), format!("0x{:x}", u128::MAX));
    }

    #[test]
    fn strict_parse() {
        assert_eq!("0xff".parse::<HexInt>().unwrap(), HexInt::from(255u64));
        assert!("0x0ff".parse::<HexInt>().is_err());
        assert!("255".parse::<HexInt>().is_err());
        assert!("0xFF".parse::<HexInt>().is_err());
    }

    #[test]
    fn lenient_conversion_from_field_value() {
        let from_text = HexInt::try_from(&FieldValue::from("100000")).unwrap();
        let from_hex = HexInt::try_from(&FieldValue::from("0x0186a0")).unwrap();
        let from_int = HexInt::try_from(&FieldValue::from(100_000u64)).unwrap();
        assert_eq!(from_text, from_int);
        assert_eq!(from_hex, from_int);
        assert_eq!(from_hex.to_string(), "0x186a0");
    }

    #[test]
    fn lenient_conversion_rejects_negative_and_bytes() {
        assert!(HexInt::try_from(&FieldValue::from(-3i32)).is_err());
        assert!(HexInt::try_from(&FieldValue::from(vec![1u8])).is_err());
    }

    #[test]
    fn to_u64_overflow() {
        assert_eq!(HexInt::from(3u64).to_u64(), Some(3));
        assert_eq!(HexInt::from(u128::MAX).to_u64(), None);
    }
}
