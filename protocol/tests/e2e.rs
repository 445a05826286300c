//! End-to-end integration tests for the ICON transaction core.
//!
//! These tests exercise the full pipeline through the public API only:
//! wallet loading, building every variant, canonical hashing, signing,
//! and verification of the wire-ready parameter map. Fixtures pin the
//! exact bytes the network expects, so a regression in any layer shows
//! up as a digest mismatch here.

use std::thread;

use serde_json::json;

use icon_protocol::codec;
use icon_protocol::config::{NetworkConfig, SCORE_INSTALL_ADDRESS};
use icon_protocol::crypto::{recover, sign, verify, PrivateKey};
use icon_protocol::error::{IconError, ValidationError};
use icon_protocol::transaction::{
    serialize, verify_signed_params, CallBuilder, SignedTransaction, Transaction,
    TransactionBuilder,
};
use icon_protocol::validator;
use icon_protocol::wallet::Wallet;

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

const SAMPLE_KEY: &str = "38f792b95a5202ab431bfc799f7e1e5c74ec0b9ede5c6142ee7364f2c84d72f6";
const FROM: &str = "hx902ecb51c109183ace539f247b4ea1347fbf23b5";
const TO: &str = "hxd008c05cbc0e689f04a5bb729a66b42377a9a497";
const SCORE: &str = "cx0000000000000000000000000000000000000001";
const TIMESTAMP: u64 = 1_538_000_000_000_000;

const TRANSFER_HASH: &str = "0x6451d132f99b81d15085c584ff2d9e112acce02bb734c7e62ab5884e30d3d147";
const CALL_HASH: &str = "0x4eb9be961735d7abc566d263fb79782da15de08e4b586ea3402c89d78b1e38f9";

fn sample_wallet() -> Wallet {
    Wallet::from_private_key_hex(SAMPLE_KEY).unwrap()
}

fn base() -> TransactionBuilder {
    TransactionBuilder::new()
        .from(FROM)
        .to(TO)
        .step_limit(100_000u64)
        .nid(3u64)
        .nonce(1u64)
        .version(3u64)
        .timestamp(TIMESTAMP)
}

// ---------------------------------------------------------------------------
// 1. Transfer fixture
// ---------------------------------------------------------------------------

#[test]
fn transfer_digest_matches_fixture() {
    let tx = base()
        .value(1_000_000_000_000_000_000u128)
        .build()
        .unwrap();
    let tx = Transaction::from(tx);
    assert_eq!(tx.tx_hash().to_string(), TRANSFER_HASH);

    // Hashing is repeatable.
    assert_eq!(tx.tx_hash(), tx.tx_hash());
}

#[test]
fn transfer_signs_and_verifies_end_to_end() {
    let wallet = sample_wallet();
    assert_eq!(wallet.address().to_string(), FROM);

    let tx = base()
        .value(1_000_000_000_000_000_000u128)
        .build()
        .unwrap();
    let signed = SignedTransaction::new(tx, &wallet).unwrap();
    assert_eq!(signed.tx_hash().to_string(), TRANSFER_HASH);

    let params = signed.to_params();
    assert!(validator::is_signed_transaction(&params));
    assert_eq!(params["value"], "0xde0b6b3a7640000");
    assert_eq!(params["timestamp"], "0x576cd87aa2000");
    assert_eq!(verify_signed_params(&params).unwrap(), wallet.address());
}

// ---------------------------------------------------------------------------
// 2. Call fixture with nested params
// ---------------------------------------------------------------------------

#[test]
fn call_digest_matches_fixture() {
    let tx = base()
        .to(SCORE)
        .call()
        .method("transfer")
        .params(json!({
            "_to": TO,
            "_value": 1u64,
            "memo": "a.b{c}",
        }))
        .build()
        .unwrap();

    let tx = Transaction::from(tx);
    assert_eq!(tx.tx_hash().to_string(), CALL_HASH);
    let params = tx.to_params();
    assert!(serialize(&params).contains(".memo.a\\.b\\{c\\}}}"));
}

// ---------------------------------------------------------------------------
// 3. Hash validation and rejected addresses
// ---------------------------------------------------------------------------

#[test]
fn block_hash_requires_prefix() {
    let hash = "0x0561c95cbb8ccc012b171124d8d187f01012996c2b051a7420d51d256741a6b5";
    assert!(validator::is_block_hash(hash));
    assert!(!validator::is_block_hash(&hash[2..]));
}

#[test]
fn short_addresses_fail_validation_and_build() {
    let short_to = &TO[..41];
    assert!(!validator::is_address(short_to));
    let err = base().to(short_to).build().unwrap_err();
    assert_eq!(err.field(), "to");

    let short_from = &FROM[..41];
    assert!(!validator::is_address(short_from));
    let err = base().from(short_from).build().unwrap_err();
    assert_eq!(err.field(), "from");
}

#[test]
fn malformed_addresses_are_rejected_everywhere() {
    let bad = [
        "hxD008C05CBC0E689F04A5BB729A66B42377A9A497",
        "d008c05cbc0e689f04a5bb729a66b42377a9a497",
        "0xd008c05cbc0e689f04a5bb729a66b42377a9a497",
        "hxd008c05cbc0e689f04a5bb729a66b42377a9a4970",
    ];
    for address in bad {
        assert!(!validator::is_address(address), "{address}");
        assert!(base().to(address).build().is_err(), "{address}");
    }
}

// ---------------------------------------------------------------------------
// 4. Signature determinism and key separation
// ---------------------------------------------------------------------------

#[test]
fn signatures_are_deterministic_and_key_bound() {
    let digest = *Transaction::from(base().value(1u64).build().unwrap())
        .tx_hash()
        .as_bytes();

    let alice = PrivateKey::from_hex(SAMPLE_KEY).unwrap();
    let bob = PrivateKey::generate();

    let a1 = sign(&alice, &digest);
    let a2 = sign(&alice, &digest);
    assert_eq!(a1.as_bytes(), a2.as_bytes());

    let b = sign(&bob, &digest);
    assert_ne!(a1.as_bytes(), b.as_bytes());

    assert!(verify(&alice.public_key(), &digest, &a1));
    assert!(!verify(&bob.public_key(), &digest, &a1));
    assert!(verify(&bob.public_key(), &digest, &b));
    assert!(!verify(&alice.public_key(), &digest, &b));

    assert_eq!(recover(&digest, &a1).unwrap(), alice.public_key());
}

#[test]
fn signature_does_not_verify_over_other_digest() {
    let wallet = sample_wallet();
    let digest = *Transaction::from(base().build().unwrap()).tx_hash().as_bytes();
    let other = *Transaction::from(base().nonce(2u64).build().unwrap())
        .tx_hash()
        .as_bytes();
    let sig = wallet.sign(&digest);
    assert!(verify(wallet.public_key(), &digest, &sig));
    assert!(!verify(wallet.public_key(), &other, &sig));
}

// ---------------------------------------------------------------------------
// 5. Field omission
// ---------------------------------------------------------------------------

#[test]
fn zero_nonce_is_sent_and_hashed() {
    let with_zero = Transaction::from(base().nonce(0u64).build().unwrap());
    let params = with_zero.to_params();
    assert_eq!(params["nonce"], "0x0");

    let without = TransactionBuilder::new()
        .from(FROM)
        .to(TO)
        .step_limit(100_000u64)
        .nid(3u64)
        .version(3u64)
        .timestamp(TIMESTAMP)
        .build()
        .unwrap();
    let without = Transaction::from(without);
    assert!(!without.to_params().contains_key("nonce"));
    assert_ne!(with_zero.tx_hash(), without.tx_hash());
}

#[test]
fn zero_value_is_sent() {
    let tx = Transaction::from(base().value(0u64).build().unwrap());
    assert_eq!(tx.to_params()["value"], "0x0");
}

// ---------------------------------------------------------------------------
// 6. Every variant through the signer
// ---------------------------------------------------------------------------

#[test]
fn every_variant_signs_and_verifies() {
    let wallet = sample_wallet();
    let template = base();

    let variants: Vec<Transaction> = vec![
        template.clone().value(10u64).build().unwrap().into(),
        template
            .clone()
            .message()
            .message("hello ICON")
            .build()
            .unwrap()
            .into(),
        template
            .clone()
            .to(SCORE)
            .call()
            .method("setValue")
            .params(json!({ "value": 42u64, "enabled": false }))
            .build()
            .unwrap()
            .into(),
        template
            .clone()
            .to(SCORE_INSTALL_ADDRESS)
            .deploy()
            .content_type("application/zip")
            .content(b"PK\x03\x04score".to_vec())
            .build()
            .unwrap()
            .into(),
        template
            .clone()
            .to(SCORE)
            .value(5_000u64)
            .deposit()
            .add()
            .build()
            .unwrap()
            .into(),
        template
            .clone()
            .to(SCORE)
            .deposit()
            .withdraw()
            .build()
            .unwrap()
            .into(),
    ];

    let mut hashes = Vec::new();
    for tx in variants {
        let signed = SignedTransaction::new(tx, &wallet).unwrap();
        assert!(signed.verify());
        let params = signed.to_params();
        assert!(validator::is_signed_transaction(&params));
        assert_eq!(verify_signed_params(&params).unwrap(), wallet.address());
        hashes.push(*signed.tx_hash());
    }

    hashes.sort();
    hashes.dedup();
    assert_eq!(hashes.len(), 6, "every variant must hash differently");
}

#[test]
fn message_payload_round_trips() {
    let tx = base().message().message("안녕 ICON").build().unwrap();
    assert_eq!(
        codec::decode_hex_utf8(tx.data()).unwrap(),
        "안녕 ICON"
    );
}

// ---------------------------------------------------------------------------
// 7. Network presets and read calls
// ---------------------------------------------------------------------------

#[test]
fn network_preset_drives_nid() {
    let config = NetworkConfig::from_json(r#"{ "nid": "0x50", "version": "0x3", "stepLimit": "0x2710" }"#)
        .unwrap();
    let tx = TransactionBuilder::new()
        .network(&config)
        .from(FROM)
        .to(TO)
        .timestamp(TIMESTAMP)
        .build()
        .unwrap();
    let params = Transaction::from(tx).to_params();
    assert_eq!(params["nid"], "0x50");
    assert_eq!(params["stepLimit"], "0x2710");
}

#[test]
fn read_call_shape() {
    let call = CallBuilder::new()
        .to(SCORE)
        .method("balanceOf")
        .build()
        .unwrap();
    assert!(validator::is_call(&call.to_params()));
}

// ---------------------------------------------------------------------------
// 8. Error surface
// ---------------------------------------------------------------------------

#[test]
fn errors_convert_into_umbrella() {
    let err: IconError = base().to("nope").build().unwrap_err().into();
    assert!(matches!(err, IconError::Validation(ValidationError::Invalid { .. })));

    let err = SignedTransaction::from_private_key(base().build().unwrap(), b"short").unwrap_err();
    assert!(matches!(err, IconError::InvalidKey(_)));

    let err: IconError = codec::decode_hex("0xzz").unwrap_err().into();
    assert!(matches!(err, IconError::Encoding(_)));
}

// ---------------------------------------------------------------------------
// 9. Concurrency
// ---------------------------------------------------------------------------

#[test]
fn parallel_signing_agrees_with_sequential() {
    let wallet = sample_wallet();
    let expected: Vec<String> = (0..8u64)
        .map(|n| {
            SignedTransaction::new(base().nonce(n).build().unwrap(), &wallet)
                .unwrap()
                .signature_base64()
        })
        .collect();

    let handles: Vec<_> = (0..8u64)
        .map(|n| {
            let wallet = wallet.clone();
            thread::spawn(move || {
                SignedTransaction::new(base().nonce(n).build().unwrap(), &wallet)
                    .unwrap()
                    .signature_base64()
            })
        })
        .collect();

    let actual: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(actual, expected);
}
