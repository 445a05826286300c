//! # Validated Protocol Types
//!
//! Newtypes for the three text shapes the protocol cares about. Each one can
//! only be constructed through a validating parser, so once you hold an
//! [`Address`], [`Hash`], or [`HexInt`] you never need to check its shape
//! again. Display and serde both produce the canonical wire text.

pub mod address;
pub mod hash;
pub mod hex_int;

pub use address::{Address, AddressKind};
pub use hash::Hash;
pub use hex_int::HexInt;
