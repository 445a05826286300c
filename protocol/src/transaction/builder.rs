//! Transaction construction via the builder pattern.
//!
//! Construction is two-phase on purpose. Setters only *store* raw input;
//! nothing is checked until `build()`, which runs one consolidated
//! validation pass and either returns an immutable transaction or a
//! [`ValidationError`] naming the first field that failed. That lets you
//! keep a partially-filled [`TransactionBuilder`] around as a template
//! (network, version, step limit) and clone it into as many variant
//! builders as you like.
//!
//! Variant builders wrap a [`TransactionBuilder`] rather than extending it.
//! Every variant builder exposes the common setters too, so chains read
//! the same no matter which kind you are building:
//!
//! ```rust
//! use icon_protocol::transaction::CallTransactionBuilder;
//! use serde_json::json;
//!
//! let tx = CallTransactionBuilder::new()
//!     .from("hx902ecb51c109183ace539f247b4ea1347fbf23b5")
//!     .to("cx0000000000000000000000000000000000000001")
//!     .step_limit(100_000u64)
//!     .nid(3u64)
//!     .version(3u64)
//!     .timestamp(1_538_000_000_000_000u64)
//!     .method("transfer")
//!     .params(json!({ "_to": "hxd008c05cbc0e689f04a5bb729a66b42377a9a497", "_value": 1u64 }))
//!     .build()
//!     .unwrap();
//! assert_eq!(tx.method(), "transfer");
//! ```

use serde_json::Value;
use tracing::debug;

use super::types::{
    CallTransaction, CommonFields, DeployTransaction, DepositAction, DepositTransaction,
    IcxTransaction, MessageTransaction, WithdrawTarget,
};
use super::Params;
use crate::codec::{self, FieldValue};
use crate::config::{network_name, NetworkConfig, DEPLOY_CONTENT_TYPES};
use crate::error::ValidationError;
use crate::types::{Address, Hash, HexInt};
use crate::validator;

// ---------------------------------------------------------------------------
// Field checks
// ---------------------------------------------------------------------------

fn require<'a, T>(field: &str, value: &'a Option<T>) -> Result<&'a T, ValidationError> {
    value.as_ref().ok_or_else(|| ValidationError::missing(field))
}

fn parse_address(field: &str, raw: &str) -> Result<Address, ValidationError> {
    raw.parse()
        .map_err(|_| ValidationError::invalid(field, format!("{raw:?} is not an address")))
}

fn parse_hex_int(field: &str, raw: &FieldValue) -> Result<HexInt, ValidationError> {
    HexInt::try_from(raw).map_err(|e| ValidationError::invalid(field, e.to_string()))
}

fn require_score(field: &str, address: &Address) -> Result<(), ValidationError> {
    if address.is_contract() {
        Ok(())
    } else {
        Err(ValidationError::invalid(
            field,
            format!("{address} is not a SCORE address"),
        ))
    }
}

/// Turns user-supplied method parameters into the all-strings shape the
/// network hashes: integers become canonical hex, booleans `0x1`/`0x0`,
/// strings and nulls stay as they are, containers recurse.
fn normalize_params(field: &str, raw: &Value) -> Result<Params, ValidationError> {
    match normalize_value(field, raw)? {
        Value::Object(map) => Ok(map),
        _ => Err(ValidationError::invalid(field, "must be a JSON object")),
    }
}

fn normalize_value(path: &str, raw: &Value) -> Result<Value, ValidationError> {
    Ok(match raw {
        Value::Null => Value::Null,
        Value::String(s) => Value::String(s.clone()),
        Value::Bool(b) => Value::String(if *b { "0x1" } else { "0x0" }.to_string()),
        Value::Number(n) => match n.as_u64() {
            Some(u) => Value::String(HexInt::from(u).to_string()),
            None => {
                return Err(ValidationError::invalid(
                    path,
                    format!("{n} is not a non-negative integer; pass it as a string"),
                ))
            }
        },
        Value::Array(items) => Value::Array(
            items
                .iter()
                .enumerate()
                .map(|(i, item)| normalize_value(&format!("{path}.{i}"), item))
                .collect::<Result<_, _>>()?,
        ),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| normalize_value(&format!("{path}.{k}"), v).map(|v| (k.clone(), v)))
                .collect::<Result<_, _>>()?,
        ),
    })
}

// ---------------------------------------------------------------------------
// TransactionBuilder
// ---------------------------------------------------------------------------

/// Builder for the fields every transaction shares. Builds a plain transfer.
///
/// # Usage
///
/// ```rust
/// use icon_protocol::transaction::TransactionBuilder;
///
/// let tx = TransactionBuilder::new()
///     .from("hx902ecb51c109183ace539f247b4ea1347fbf23b5")
///     .to("hxd008c05cbc0e689f04a5bb729a66b42377a9a497")
///     .value(1_000_000_000_000_000_000u128)
///     .step_limit(100_000u64)
///     .nid(3u64)
///     .nonce(1u64)
///     .version(3u64)
///     .timestamp(1_538_000_000_000_000u64)
///     .build()
///     .unwrap();
/// assert_eq!(tx.common().value().unwrap().to_string(), "0xde0b6b3a7640000");
/// ```
#[derive(Debug, Clone, Default)]
pub struct TransactionBuilder {
    to: Option<String>,
    from: Option<String>,
    value: Option<FieldValue>,
    step_limit: Option<FieldValue>,
    nid: Option<FieldValue>,
    nonce: Option<FieldValue>,
    version: Option<FieldValue>,
    timestamp: Option<FieldValue>,
}

impl TransactionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-fills `nid`, `version`, and `stepLimit` from a network config.
    /// Later setters override.
    pub fn network(mut self, config: &NetworkConfig) -> Self {
        self.nid = Some(FieldValue::from(&config.nid));
        self.version = Some(FieldValue::from(&config.version));
        self.step_limit = Some(FieldValue::from(&config.step_limit));
        self
    }

    pub fn to(mut self, address: impl Into<String>) -> Self {
        self.to = Some(address.into());
        self
    }

    pub fn from(mut self, address: impl Into<String>) -> Self {
        self.from = Some(address.into());
        self
    }

    /// Amount in loop (10^-18 ICX).
    pub fn value(mut self, value: impl Into<FieldValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn step_limit(mut self, step_limit: impl Into<FieldValue>) -> Self {
        self.step_limit = Some(step_limit.into());
        self
    }

    pub fn nid(mut self, nid: impl Into<FieldValue>) -> Self {
        self.nid = Some(nid.into());
        self
    }

    pub fn nonce(mut self, nonce: impl Into<FieldValue>) -> Self {
        self.nonce = Some(nonce.into());
        self
    }

    pub fn version(mut self, version: impl Into<FieldValue>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Microseconds since the Unix epoch. See [`crate::config::timestamp_now`].
    pub fn timestamp(mut self, timestamp: impl Into<FieldValue>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// Validates the common fields in declaration order: `to`, `from`,
    /// `value`, `stepLimit`, `nid`, `nonce`, `version`, `timestamp`.
    fn validate(&self) -> Result<CommonFields, ValidationError> {
        let to = parse_address("to", require("to", &self.to)?)?;
        let from = parse_address("from", require("from", &self.from)?)?;
        if from.is_contract() {
            return Err(ValidationError::invalid(
                "from",
                format!("{from} is a SCORE; only EOAs can sign"),
            ));
        }
        let value = self
            .value
            .as_ref()
            .map(|v| parse_hex_int("value", v))
            .transpose()?;
        let step_limit = parse_hex_int("stepLimit", require("stepLimit", &self.step_limit)?)?;
        let nid = parse_hex_int("nid", require("nid", &self.nid)?)?;
        let nonce = self
            .nonce
            .as_ref()
            .map(|v| parse_hex_int("nonce", v))
            .transpose()?;
        let version = parse_hex_int("version", require("version", &self.version)?)?;
        let timestamp = parse_hex_int("timestamp", require("timestamp", &self.timestamp)?)?;

        Ok(CommonFields {
            to,
            from,
            value,
            step_limit,
            nid,
            nonce,
            version,
            timestamp,
        })
    }

    fn log_built(common: &CommonFields, kind: &str) {
        debug!(
            kind,
            nid = %common.nid,
            network = %common.nid.to_u64().map(network_name).unwrap_or_default(),
            from = %common.from,
            to = %common.to,
            "built transaction"
        );
    }

    /// Builds a plain ICX transfer.
    pub fn build(self) -> Result<IcxTransaction, ValidationError> {
        let common = self.validate()?;
        Self::log_built(&common, "transfer");
        Ok(IcxTransaction { common })
    }

    pub fn message(self) -> MessageTransactionBuilder {
        MessageTransactionBuilder::with_base(self)
    }

    pub fn call(self) -> CallTransactionBuilder {
        CallTransactionBuilder::with_base(self)
    }

    pub fn deploy(self) -> DeployTransactionBuilder {
        DeployTransactionBuilder::with_base(self)
    }

    pub fn deposit(self) -> DepositTransactionBuilder {
        DepositTransactionBuilder::with_base(self)
    }
}

/// Forwards the common setters of [`TransactionBuilder`] to `self.base`.
macro_rules! common_setters {
    () => {
        /// Starts from an existing common-field builder.
        pub fn with_base(base: TransactionBuilder) -> Self {
            Self {
                base,
                ..Self::default()
            }
        }

        pub fn network(mut self, config: &NetworkConfig) -> Self {
            self.base = self.base.network(config);
            self
        }

        pub fn to(mut self, address: impl Into<String>) -> Self {
            self.base = self.base.to(address);
            self
        }

        pub fn from(mut self, address: impl Into<String>) -> Self {
            self.base = self.base.from(address);
            self
        }

        pub fn value(mut self, value: impl Into<FieldValue>) -> Self {
            self.base = self.base.value(value);
            self
        }

        pub fn step_limit(mut self, step_limit: impl Into<FieldValue>) -> Self {
            self.base = self.base.step_limit(step_limit);
            self
        }

        pub fn nid(mut self, nid: impl Into<FieldValue>) -> Self {
            self.base = self.base.nid(nid);
            self
        }

        pub fn nonce(mut self, nonce: impl Into<FieldValue>) -> Self {
            self.base = self.base.nonce(nonce);
            self
        }

        pub fn version(mut self, version: impl Into<FieldValue>) -> Self {
            self.base = self.base.version(version);
            self
        }

        pub fn timestamp(mut self, timestamp: impl Into<FieldValue>) -> Self {
            self.base = self.base.timestamp(timestamp);
            self
        }
    };
}

// ---------------------------------------------------------------------------
// MessageTransactionBuilder
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
enum MessageData {
    Text(String),
    Hex(String),
}

/// Transfer with a message attached (`dataType = "message"`).
#[derive(Debug, Clone, Default)]
pub struct MessageTransactionBuilder {
    base: TransactionBuilder,
    data: Option<MessageData>,
}

impl MessageTransactionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    common_setters!();

    /// Attaches a text message; it is UTF-8 hex-encoded at build time.
    pub fn message(mut self, text: impl Into<String>) -> Self {
        self.data = Some(MessageData::Text(text.into()));
        self
    }

    /// Attaches already hex-encoded data (`0x` + even number of digits).
    pub fn data(mut self, hex: impl Into<String>) -> Self {
        self.data = Some(MessageData::Hex(hex.into()));
        self
    }

    pub fn build(self) -> Result<MessageTransaction, ValidationError> {
        let common = self.base.validate()?;
        let data = match require("data", &self.data)? {
            MessageData::Text(text) => codec::encode_text(text),
            MessageData::Hex(hex) if validator::is_hex_bytes(hex) => hex.to_ascii_lowercase(),
            MessageData::Hex(hex) => {
                return Err(ValidationError::invalid(
                    "data",
                    format!("{hex:?} is not 0x-prefixed hex"),
                ))
            }
        };
        TransactionBuilder::log_built(&common, "message");
        Ok(MessageTransaction { common, data })
    }
}

// ---------------------------------------------------------------------------
// CallTransactionBuilder
// ---------------------------------------------------------------------------

/// SCORE method invocation (`dataType = "call"`).
#[derive(Debug, Clone, Default)]
pub struct CallTransactionBuilder {
    base: TransactionBuilder,
    method: Option<String>,
    params: Option<Value>,
}

impl CallTransactionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    common_setters!();

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Method parameters as a JSON object. Non-negative integers and
    /// booleans are converted to hex text at build time.
    pub fn params(mut self, params: Value) -> Self {
        self.params = Some(params);
        self
    }

    pub fn build(self) -> Result<CallTransaction, ValidationError> {
        let common = self.base.validate()?;
        require_score("to", &common.to)?;
        let method = require("data.method", &self.method)?;
        if method.is_empty() {
            return Err(ValidationError::invalid("data.method", "must not be empty"));
        }
        let params = self
            .params
            .as_ref()
            .map(|p| normalize_params("data.params", p))
            .transpose()?;
        TransactionBuilder::log_built(&common, "call");
        Ok(CallTransaction {
            common,
            method: method.clone(),
            params,
        })
    }
}

// ---------------------------------------------------------------------------
// DeployTransactionBuilder
// ---------------------------------------------------------------------------

/// SCORE install or update (`dataType = "deploy"`).
///
/// Install by sending to [`crate::config::SCORE_INSTALL_ADDRESS`]; update by
/// sending to the existing SCORE.
#[derive(Debug, Clone, Default)]
pub struct DeployTransactionBuilder {
    base: TransactionBuilder,
    content_type: Option<String>,
    content: Option<Vec<u8>>,
    params: Option<Value>,
}

impl DeployTransactionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    common_setters!();

    /// `application/zip` or `application/java`.
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// The SCORE package bytes.
    pub fn content(mut self, content: impl Into<Vec<u8>>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Install/update parameters as a JSON object.
    pub fn params(mut self, params: Value) -> Self {
        self.params = Some(params);
        self
    }

    pub fn build(self) -> Result<DeployTransaction, ValidationError> {
        let common = self.base.validate()?;
        require_score("to", &common.to)?;
        let content_type = require("data.contentType", &self.content_type)?;
        if !DEPLOY_CONTENT_TYPES.contains(&content_type.as_str()) {
            return Err(ValidationError::invalid(
                "data.contentType",
                format!("unsupported content type {content_type:?}"),
            ));
        }
        let content = require("data.content", &self.content)?;
        if content.is_empty() {
            return Err(ValidationError::invalid("data.content", "must not be empty"));
        }
        let params = self
            .params
            .as_ref()
            .map(|p| normalize_params("data.params", p))
            .transpose()?;
        TransactionBuilder::log_built(&common, "deploy");
        Ok(DeployTransaction {
            common,
            content_type: content_type.clone(),
            content: content.clone(),
            params,
        })
    }
}

// ---------------------------------------------------------------------------
// DepositTransactionBuilder
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DepositKind {
    Add,
    Withdraw,
}

/// Fee-sharing deposit management (`dataType = "deposit"`).
#[derive(Debug, Clone, Default)]
pub struct DepositTransactionBuilder {
    base: TransactionBuilder,
    action: Option<DepositKind>,
    id: Option<String>,
    amount: Option<FieldValue>,
}

impl DepositTransactionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    common_setters!();

    /// Deposit the transaction `value` into the SCORE.
    pub fn add(mut self) -> Self {
        self.action = Some(DepositKind::Add);
        self
    }

    /// Withdraw from the SCORE's deposit. Without `id` or `amount`, all of it.
    pub fn withdraw(mut self) -> Self {
        self.action = Some(DepositKind::Withdraw);
        self
    }

    /// Withdraw the deposit made by this transaction hash.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Withdraw this many loop.
    pub fn amount(mut self, amount: impl Into<FieldValue>) -> Self {
        self.amount = Some(amount.into());
        self
    }

    pub fn build(self) -> Result<DepositTransaction, ValidationError> {
        let common = self.base.validate()?;
        require_score("to", &common.to)?;
        let action = match require("data.action", &self.action)? {
            DepositKind::Add => {
                if common.value.is_none() {
                    return Err(ValidationError::missing("value"));
                }
                if self.id.is_some() {
                    return Err(ValidationError::invalid("data.id", "only valid for withdraw"));
                }
                if self.amount.is_some() {
                    return Err(ValidationError::invalid(
                        "data.amount",
                        "only valid for withdraw",
                    ));
                }
                DepositAction::Add
            }
            DepositKind::Withdraw => {
                let target = match (&self.id, &self.amount) {
                    (Some(_), Some(_)) => {
                        return Err(ValidationError::invalid(
                            "data.amount",
                            "mutually exclusive with data.id",
                        ))
                    }
                    (Some(id), None) => {
                        let hash: Hash = id.parse().map_err(|_| {
                            ValidationError::invalid("data.id", format!("{id:?} is not a hash"))
                        })?;
                        Some(WithdrawTarget::Id(hash))
                    }
                    (None, Some(amount)) => {
                        Some(WithdrawTarget::Amount(parse_hex_int("data.amount", amount)?))
                    }
                    (None, None) => None,
                };
                DepositAction::Withdraw(target)
            }
        };
        TransactionBuilder::log_built(&common, "deposit");
        Ok(DepositTransaction { common, action })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
