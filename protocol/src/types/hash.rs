//! 32-byte digests (block hashes, transaction hashes).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::codec::EncodingError;
use crate::config::HASH_LENGTH;
use crate::validator;

/// A 32-byte digest, written as `0x` + 64 lowercase hex digits.
///
/// The raw bytes are what gets signed; the text form is for humans and
/// JSON-RPC.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Hash([u8; HASH_LENGTH]);

impl Hash {
    pub fn from_bytes(bytes: [u8; HASH_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; HASH_LENGTH] {
        &self.0
    }

    pub fn to_bytes(self) -> [u8; HASH_LENGTH] {
        self.0
    }
}

impl From<[u8; HASH_LENGTH]> for Hash {
    fn from(bytes: [u8; HASH_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl FromStr for Hash {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !validator::is_hash(s) {
            return Err(EncodingError::InvalidHex {
                input: s.to_string(),
            });
        }
        let mut bytes = [0u8; HASH_LENGTH];
        hex::decode_to_slice(&s[2..], &mut bytes).map_err(|_| EncodingError::InvalidHex {
            input: s.to_string(),
        })?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({})", self)
    }
}

impl Serialize for Hash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Hash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLOCK_HASH: &str = "0x0561c95cbb8ccc012b171124d8d187f01012996c2b051a7420d51d256741a6b5";

    #[test]
    fn parse_display_roundtrip() {
        let hash: Hash = BLOCK_HASH.parse().unwrap();
        assert_eq!(hash.as_bytes()[0], 0x05);
        assert_eq!(hash.to_string(), BLOCK_HASH);
    }

    #[test]
    fn rejects_missing_prefix() {
        assert!(BLOCK_HASH[2..].parse::<Hash>().is_err());
        assert!(BLOCK_HASH[..65].parse::<Hash>().is_err());
    }
}
