use num_bigint::{BigInt, BigUint};
use proptest::prelude::*;

use icon_protocol::codec;
use icon_protocol::crypto::{sign, verify, PrivateKey};
use icon_protocol::transaction::{Transaction, TransactionBuilder};
use icon_protocol::types::{Address, AddressKind, HexInt};
use icon_protocol::validator;

/// Strategy for a random address of either kind.
fn arb_address() -> impl Strategy<Value = Address> {
    (any::<bool>(), prop::array::uniform20(any::<u8>())).prop_map(|(contract, body)| {
        let kind = if contract {
            AddressKind::Contract
        } else {
            AddressKind::Eoa
        };
        Address::new(kind, body)
    })
}

/// Strategy for a valid secp256k1 private key.
fn arb_private_key() -> impl Strategy<Value = PrivateKey> {
    prop::array::uniform32(any::<u8>())
        .prop_filter_map("not a valid scalar", |bytes| PrivateKey::from_slice(&bytes).ok())
}

/// Breaks an otherwise valid address string in one of several ways.
fn mangle(address: &str, how: u8) -> String {
    match how % 4 {
        0 => address[..address.len() - 1].to_string(),
        1 => format!("{address}0"),
        2 => address[2..].to_string(),
        _ => address.to_uppercase(),
    }
}

fn transfer(to: &str, from: &str, value: u128, step_limit: u64, nonce: Option<u64>) -> TransactionBuilder {
    let builder = TransactionBuilder::new()
        .to(to)
        .from(from)
        .value(value)
        .step_limit(step_limit)
        .nid(3u64)
        .version(3u64)
        .timestamp(1_538_000_000_000_000u64);
    match nonce {
        Some(n) => builder.nonce(n),
        None => builder,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn uint_hex_roundtrip(x in any::<u128>()) {
        let encoded = codec::encode_uint(&BigUint::from(x));
        prop_assert_eq!(codec::decode_hex(&encoded).unwrap(), BigInt::from(x));
    }

    #[test]
    fn big_uint_hex_roundtrip(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        let x = BigUint::from_bytes_be(&bytes);
        let encoded = codec::encode_uint(&x);
        prop_assert_eq!(codec::decode_uint(&encoded).unwrap(), x);
    }

    #[test]
    fn bytes_hex_roundtrip(bytes in prop::collection::vec(any::<u8>(), 0..128)) {
        let encoded = codec::encode_bytes(&bytes);
        prop_assert!(validator::is_hex_bytes(&encoded));
        prop_assert_eq!(codec::decode_hex_bytes(&encoded).unwrap(), bytes);
    }

    #[test]
    fn text_hex_roundtrip(text in ".*") {
        let encoded = codec::encode_text(&text);
        prop_assert_eq!(encoded.len(), 2 + 2 * text.len());
        prop_assert_eq!(codec::decode_hex_utf8(&encoded).unwrap(), text);
    }

    #[test]
    fn hex_encoding_is_canonical(x in any::<u128>()) {
        let encoded = HexInt::from(x).to_string();
        prop_assert!(validator::is_hex_int(&encoded));
        if x == 0 {
            prop_assert_eq!(encoded.as_str(), "0x0");
        } else {
            prop_assert!(!encoded.starts_with("0x0"));
        }
        prop_assert_eq!(encoded.to_lowercase(), encoded.clone());
    }

    #[test]
    fn addresses_roundtrip_through_text_and_bytes(address in arb_address()) {
        let text = address.to_string();
        prop_assert!(validator::is_address(&text));
        prop_assert_eq!(text.parse::<Address>().unwrap(), address);
        prop_assert_eq!(Address::from_bytes(&address.to_bytes()).unwrap(), address);
    }

    #[test]
    fn mangled_addresses_are_rejected_by_builder(
        to in arb_address(),
        how in any::<u8>(),
    ) {
        let bad = mangle(&to.to_string(), how);
        prop_assume!(bad != to.to_string());
        prop_assert!(!validator::is_address(&bad));
        let err = transfer(&bad, "hx902ecb51c109183ace539f247b4ea1347fbf23b5", 1, 1, None)
            .build()
            .unwrap_err();
        prop_assert_eq!(err.field(), "to");
    }

    #[test]
    fn digest_is_deterministic_and_order_independent(
        value in any::<u128>(),
        step_limit in any::<u64>(),
        nonce in proptest::option::of(any::<u64>()),
    ) {
        let to = "hxd008c05cbc0e689f04a5bb729a66b42377a9a497";
        let from = "hx902ecb51c109183ace539f247b4ea1347fbf23b5";
        let a = Transaction::from(transfer(to, from, value, step_limit, nonce).build().unwrap());

        let mut reversed = TransactionBuilder::new()
            .timestamp(1_538_000_000_000_000u64)
            .version(3u64)
            .nid(3u64)
            .step_limit(step_limit)
            .value(value)
            .from(from)
            .to(to);
        if let Some(n) = nonce {
            reversed = reversed.nonce(n);
        }
        let b = Transaction::from(reversed.build().unwrap());

        prop_assert_eq!(a.tx_hash(), a.tx_hash());
        prop_assert_eq!(a.tx_hash(), b.tx_hash());
    }

    #[test]
    fn signatures_are_deterministic_and_verify(
        key in arb_private_key(),
        digest in prop::array::uniform32(any::<u8>()),
        other in prop::array::uniform32(any::<u8>()),
    ) {
        let first = sign(&key, &digest);
        let second = sign(&key, &digest);
        prop_assert_eq!(first.as_bytes(), second.as_bytes());
        prop_assert!(verify(&key.public_key(), &digest, &first));
        if other != digest {
            prop_assert!(!verify(&key.public_key(), &other, &first));
        }
    }
}
