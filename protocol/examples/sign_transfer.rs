//! Walkthrough of the full signing pipeline.
//!
//! Loads a wallet, builds one transaction of every kind, hashes and signs
//! each, verifies the wire-ready parameters, and prints them as JSON-RPC
//! request bodies a transport could send as-is.
//!
//! Run with:
//!   cargo run --example sign_transfer
//!   RUST_LOG=icon_protocol=trace cargo run --example sign_transfer
//!   LOG_FORMAT=json cargo run --example sign_transfer

use anyhow::{ensure, Context};
use serde_json::json;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use icon_protocol::config::{
    network_name, timestamp_now, NetworkConfig, CALL_METHOD, LOOP_PER_ICX, SCORE_INSTALL_ADDRESS,
    SEND_TRANSACTION_METHOD,
};
use icon_protocol::transaction::{
    serialize, verify_signed_params, CallBuilder, SignedTransaction, Transaction,
    TransactionBuilder,
};
use icon_protocol::types::HexInt;
use icon_protocol::wallet::Wallet;

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    fn from_str_lossy(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

fn init_logging(default_level: &str, format: LogFormat) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    match format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_target(true).with_line_number(true))
                .init();
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_target(true))
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Walkthrough
// ---------------------------------------------------------------------------

const DEMO_KEY: &str = "38f792b95a5202ab431bfc799f7e1e5c74ec0b9ede5c6142ee7364f2c84d72f6";
const RECIPIENT: &str = "hxd008c05cbc0e689f04a5bb729a66b42377a9a497";
const TOKEN_SCORE: &str = "cx0000000000000000000000000000000000000001";

fn request_body(id: u64, signed: &SignedTransaction) -> serde_json::Value {
    json!({
        "jsonrpc": "2.0",
        "method": SEND_TRANSACTION_METHOD,
        "id": id,
        "params": signed.to_params(),
    })
}

fn main() -> anyhow::Result<()> {
    let format = LogFormat::from_str_lossy(&std::env::var("LOG_FORMAT").unwrap_or_default());
    init_logging("icon_protocol=debug,sign_transfer=info", format);

    let network = NetworkConfig::yeouido();
    let nid = network.nid.to_u64().unwrap_or_default();
    let wallet = Wallet::from_private_key_hex(DEMO_KEY).context("loading demo wallet")?;
    info!(address = %wallet.address(), network = %network_name(nid), "wallet loaded");

    let template = TransactionBuilder::new()
        .network(&network)
        .from(wallet.address().to_string())
        .timestamp(timestamp_now());

    let transactions: Vec<(&str, Transaction)> = vec![
        (
            "transfer 1 ICX",
            template
                .clone()
                .to(RECIPIENT)
                .value(LOOP_PER_ICX)
                .nonce(0u64)
                .build()?
                .into(),
        ),
        (
            "message",
            template
                .clone()
                .to(RECIPIENT)
                .message()
                .message("gm from icon-protocol")
                .build()?
                .into(),
        ),
        (
            "token transfer",
            template
                .clone()
                .to(TOKEN_SCORE)
                .call()
                .method("transfer")
                .params(json!({
                    "_to": RECIPIENT,
                    "_value": HexInt::from(10 * LOOP_PER_ICX).to_string(),
                }))
                .build()?
                .into(),
        ),
        (
            "score install",
            template
                .clone()
                .to(SCORE_INSTALL_ADDRESS)
                .deploy()
                .content_type("application/java")
                .content(b"PK\x03\x04demo-score".to_vec())
                .params(json!({ "name": "DemoToken", "decimals": 18u64 }))
                .build()?
                .into(),
        ),
        (
            "fee deposit",
            template
                .clone()
                .to(TOKEN_SCORE)
                .value(5_000 * LOOP_PER_ICX)
                .deposit()
                .add()
                .build()?
                .into(),
        ),
    ];

    for (id, (label, tx)) in transactions.into_iter().enumerate() {
        let phrase = serialize(&tx.to_params());
        let signed = SignedTransaction::new(tx, &wallet)?;
        let signer = verify_signed_params(&signed.to_params())?;
        ensure!(signer == wallet.address(), "{label}: recovered wrong signer {signer}");

        info!(%label, tx_hash = %signed.tx_hash(), "signed and verified");
        println!("--- {label} ---");
        println!("phrase: {phrase}");
        println!("{}", serde_json::to_string_pretty(&request_body(id as u64 + 1, &signed))?);
    }

    let call = CallBuilder::new()
        .from(wallet.address().to_string())
        .to(TOKEN_SCORE)
        .method("balanceOf")
        .params({
            let mut params = serde_json::Map::new();
            params.insert("_owner".into(), json!(wallet.address().to_string()));
            params
        })
        .build()?;
    println!("--- read call ---");
    println!(
        "{}",
        serde_json::to_string_pretty(&json!({
            "jsonrpc": "2.0",
            "method": CALL_METHOD,
            "id": 99,
            "params": call.to_params(),
        }))?
    );

    Ok(())
}
