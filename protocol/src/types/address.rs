//! ICON addresses.
//!
//! An address is a one-byte kind tag plus a 20-byte body. On the wire it is
//! written as `hx` (externally-owned account) or `cx` (SCORE) followed by the
//! body in 40 lowercase hex digits. The 21-byte binary form puts `0x00` or
//! `0x01` in front of the body.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::codec::EncodingError;
use crate::config::{ADDRESS_BODY_LENGTH, ADDRESS_LENGTH, CONTRACT_PREFIX, EOA_PREFIX};
use crate::validator;

/// Which kind of account an address points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AddressKind {
    /// `hx`: controlled by a private key.
    Eoa,
    /// `cx`: a deployed smart contract.
    Contract,
}

impl AddressKind {
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Eoa => EOA_PREFIX,
            Self::Contract => CONTRACT_PREFIX,
        }
    }

    fn tag(self) -> u8 {
        match self {
            Self::Eoa => 0x00,
            Self::Contract => 0x01,
        }
    }
}

/// A validated ICON address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address {
    kind: AddressKind,
    body: [u8; ADDRESS_BODY_LENGTH],
}

impl Address {
    pub fn new(kind: AddressKind, body: [u8; ADDRESS_BODY_LENGTH]) -> Self {
        Self { kind, body }
    }

    /// Parses the 21-byte binary form.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EncodingError> {
        let invalid = || EncodingError::InvalidHex {
            input: hex::encode(bytes),
        };
        if bytes.len() != ADDRESS_LENGTH {
            return Err(invalid());
        }
        let kind = match bytes[0] {
            0x00 => AddressKind::Eoa,
            0x01 => AddressKind::Contract,
            _ => return Err(invalid()),
        };
        let mut body = [0u8; ADDRESS_BODY_LENGTH];
        body.copy_from_slice(&bytes[1..]);
        Ok(Self { kind, body })
    }

    pub fn kind(&self) -> AddressKind {
        self.kind
    }

    pub fn is_contract(&self) -> bool {
        self.kind == AddressKind::Contract
    }

    pub fn body(&self) -> &[u8; ADDRESS_BODY_LENGTH] {
        &self.body
    }

    /// The 21-byte binary form: kind tag followed by the body.
    pub fn to_bytes(&self) -> [u8; ADDRESS_LENGTH] {
        let mut out = [0u8; ADDRESS_LENGTH];
        out[0] = self.kind.tag();
        out[1..].copy_from_slice(&self.body);
        out
    }
}

impl FromStr for Address {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !validator::is_address(s) {
            return Err(EncodingError::InvalidHex {
                input: s.to_string(),
            });
        }
        let kind = if s.starts_with(EOA_PREFIX) {
            AddressKind::Eoa
        } else {
            AddressKind::Contract
        };
        let mut body = [0u8; ADDRESS_BODY_LENGTH];
        hex::decode_to_slice(&s[2..], &mut body).map_err(|_| EncodingError::InvalidHex {
            input: s.to_string(),
        })?;
        Ok(Self { kind, body })
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.prefix(), hex::encode(self.body))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
