//! Core type definitions for ICON transactions.
//!
//! A transaction is one of five variants, all sharing the same
//! [`CommonFields`]. Each variant is its own struct so that a builder's
//! output type already tells you which kind you have; [`Transaction`] is
//! the closed union used once the kind no longer matters (hashing, signing,
//! transport).
//!
//! Values are immutable once built. All fields are private and exposed
//! through getters; to change anything, rebuild from a builder.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use super::Params;
use crate::codec;
use crate::types::{Address, Hash, HexInt};

// ---------------------------------------------------------------------------
// DataType
// ---------------------------------------------------------------------------

/// The `dataType` tag. A plain transfer carries none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Call,
    Deploy,
    Message,
    Deposit,
}

impl DataType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Call => "call",
            Self::Deploy => "deploy",
            Self::Message => "message",
            Self::Deposit => "deposit",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "call" => Ok(Self::Call),
            "deploy" => Ok(Self::Deploy),
            "message" => Ok(Self::Message),
            "deposit" => Ok(Self::Deposit),
            other => Err(format!("unknown dataType {other:?}")),
        }
    }
}

// ---------------------------------------------------------------------------
// CommonFields
// ---------------------------------------------------------------------------

/// Fields every transaction carries. Only `value` and `nonce` are optional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommonFields {
    pub(crate) to: Address,
    pub(crate) from: Address,
    pub(crate) value: Option<HexInt>,
    pub(crate) step_limit: HexInt,
    pub(crate) nid: HexInt,
    pub(crate) nonce: Option<HexInt>,
    pub(crate) version: HexInt,
    pub(crate) timestamp: HexInt,
}

impl CommonFields {
    pub fn to(&self) -> &Address {
        &self.to
    }

    pub fn from(&self) -> &Address {
        &self.from
    }

    pub fn value(&self) -> Option<&HexInt> {
        self.value.as_ref()
    }

    pub fn step_limit(&self) -> &HexInt {
        &self.step_limit
    }

    pub fn nid(&self) -> &HexInt {
        &self.nid
    }

    pub fn nonce(&self) -> Option<&HexInt> {
        self.nonce.as_ref()
    }

    pub fn version(&self) -> &HexInt {
        &self.version
    }

    pub fn timestamp(&self) -> &HexInt {
        &self.timestamp
    }

    /// Writes the common fields into a parameter map.
    ///
    /// Absent optional fields are left out. Present ones are always written,
    /// zero included: `nonce = 0` goes on the wire as `"0x0"` and is part of
    /// the hash.
    pub(crate) fn write_params(&self, params: &mut Params) {
        let mut put = |key: &str, value: String| {
            params.insert(key.to_string(), Value::String(value));
        };
        put("version", self.version.to_string());
        put("from", self.from.to_string());
        put("to", self.to.to_string());
        if let Some(value) = &self.value {
            put("value", value.to_string());
        }
        put("stepLimit", self.step_limit.to_string());
        put("timestamp", self.timestamp.to_string());
        put("nid", self.nid.to_string());
        if let Some(nonce) = &self.nonce {
            put("nonce", nonce.to_string());
        }
    }
}

fn assemble(common: &CommonFields, data: Option<(DataType, Value)>) -> Params {
    let mut params = Params::new();
    common.write_params(&mut params);
    if let Some((data_type, data)) = data {
        params.insert("dataType".into(), Value::String(data_type.to_string()));
        params.insert("data".into(), data);
    }
    params
}

// ---------------------------------------------------------------------------
// Variants
// ---------------------------------------------------------------------------

/// Plain ICX transfer. No `dataType`, no `data`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IcxTransaction {
    pub(crate) common: CommonFields,
}

impl IcxTransaction {
    pub fn common(&self) -> &CommonFields {
        &self.common
    }

    pub fn to_params(&self) -> Params {
        assemble(&self.common, None)
    }
}

/// Transfer with an attached message. `data` is `0x`-prefixed hex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTransaction {
    pub(crate) common: CommonFields,
    pub(crate) data: String,
}

impl MessageTransaction {
    pub fn common(&self) -> &CommonFields {
        &self.common
    }

    /// The hex-encoded message as it goes on the wire.
    pub fn data(&self) -> &str {
        &self.data
    }

    /// The message decoded as UTF-8, if it is text.
    pub fn message_text(&self) -> Option<String> {
        codec::decode_hex_utf8(&self.data).ok()
    }

    pub fn to_params(&self) -> Params {
        assemble(
            &self.common,
            Some((DataType::Message, Value::String(self.data.clone()))),
        )
    }
}

/// State-changing SCORE method invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallTransaction {
    pub(crate) common: CommonFields,
    pub(crate) method: String,
    pub(crate) params: Option<Params>,
}

impl CallTransaction {
    pub fn common(&self) -> &CommonFields {
        &self.common
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    /// Normalized method parameters (all leaves are strings or null).
    pub fn params(&self) -> Option<&Params> {
        self.params.as_ref()
    }

    pub fn to_params(&self) -> Params {
        let mut data = Params::new();
        data.insert("method".into(), Value::String(self.method.clone()));
        if let Some(params) = &self.params {
            data.insert("params".into(), Value::Object(params.clone()));
        }
        assemble(&self.common, Some((DataType::Call, Value::Object(data))))
    }
}

/// SCORE install or update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployTransaction {
    pub(crate) common: CommonFields,
    pub(crate) content_type: String,
    pub(crate) content: Vec<u8>,
    pub(crate) params: Option<Params>,
}

impl DeployTransaction {
    pub fn common(&self) -> &CommonFields {
        &self.common
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn params(&self) -> Option<&Params> {
        self.params.as_ref()
    }

    /// `true` when the target is the install address rather than an
    /// existing SCORE.
    pub fn is_install(&self) -> bool {
        self.common.to.body().iter().all(|b| *b == 0)
    }

    pub fn to_params(&self) -> Params {
        let mut data = Params::new();
        data.insert(
            "contentType".into(),
            Value::String(self.content_type.clone()),
        );
        data.insert(
            "content".into(),
            Value::String(codec::encode_bytes(&self.content)),
        );
        if let Some(params) = &self.params {
            data.insert("params".into(), Value::Object(params.clone()));
        }
        assemble(&self.common, Some((DataType::Deploy, Value::Object(data))))
    }
}

/// What to take back out of a SCORE's fee deposit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WithdrawTarget {
    /// A specific deposit, by the hash of the transaction that made it.
    Id(Hash),
    /// A specific amount.
    Amount(HexInt),
}

/// Deposit action on a SCORE's fee-sharing balance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DepositAction {
    /// Add the transaction's `value` to the deposit.
    Add,
    /// Withdraw everything (`None`) or a selected part.
    Withdraw(Option<WithdrawTarget>),
}

/// Fee-sharing deposit management.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositTransaction {
    pub(crate) common: CommonFields,
    pub(crate) action: DepositAction,
}

impl DepositTransaction {
    pub fn common(&self) -> &CommonFields {
        &self.common
    }

    pub fn action(&self) -> &DepositAction {
        &self.action
    }

    pub fn to_params(&self) -> Params {
        let mut data = Params::new();
        match &self.action {
            DepositAction::Add => {
                data.insert("action".into(), Value::String("add".into()));
            }
            DepositAction::Withdraw(target) => {
                data.insert("action".into(), Value::String("withdraw".into()));
                match target {
                    Some(WithdrawTarget::Id(id)) => {
                        data.insert("id".into(), Value::String(id.to_string()));
                    }
                    Some(WithdrawTarget::Amount(amount)) => {
                        data.insert("amount".into(), Value::String(amount.to_string()));
                    }
                    None => {}
                }
            }
        }
        assemble(&self.common, Some((DataType::Deposit, Value::Object(data))))
    }
}

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// Any built transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transaction {
    Transfer(IcxTransaction),
    Message(MessageTransaction),
    Call(CallTransaction),
    Deploy(DeployTransaction),
    Deposit(DepositTransaction),
}

impl Transaction {
    pub fn common(&self) -> &CommonFields {
        match self {
            Self::Transfer(tx) => tx.common(),
            Self::Message(tx) => tx.common(),
            Self::Call(tx) => tx.common(),
            Self::Deploy(tx) => tx.common(),
            Self::Deposit(tx) => tx.common(),
        }
    }

    /// `None` for a plain transfer.
    pub fn data_type(&self) -> Option<DataType> {
        match self {
            Self::Transfer(_) => None,
            Self::Message(_) => Some(DataType::Message),
            Self::Call(_) => Some(DataType::Call),
            Self::Deploy(_) => Some(DataType::Deploy),
            Self::Deposit(_) => Some(DataType::Deposit),
        }
    }

    /// The unsigned `icx_sendTransaction` parameter map: every field
    /// canonically hex-encoded, absent optional fields omitted.
    pub fn to_params(&self) -> Params {
        match self {
            Self::Transfer(tx) => tx.to_params(),
            Self::Message(tx) => tx.to_params(),
            Self::Call(tx) => tx.to_params(),
            Self::Deploy(tx) => tx.to_params(),
            Self::Deposit(tx) => tx.to_params(),
        }
    }

    /// SHA3-256 of the canonical serialization.
    pub fn tx_hash(&self) -> Hash {
        super::serializer::digest(self)
    }
}

impl From<IcxTransaction> for Transaction {
    fn from(tx: IcxTransaction) -> Self {
        Self::Transfer(tx)
    }
}

impl From<MessageTransaction> for Transaction {
    fn from(tx: MessageTransaction) -> Self {
        Self::Message(tx)
    }
}

impl From<CallTransaction> for Transaction {
    fn from(tx: CallTransaction) -> Self {
        Self::Call(tx)
    }
}

impl From<DeployTransaction> for Transaction {
    fn from(tx: DeployTransaction) -> Self {
        Self::Deploy(tx)
    }
}

impl From<DepositTransaction> for Transaction {
    fn from(tx: DepositTransaction) -> Self {
        Self::Deposit(tx)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn common(nonce: Option<u64>) -> CommonFields {
        CommonFields {
            to: "hxd008c05cbc0e689f04a5bb729a66b42377a9a497".parse().unwrap(),
            from: "hx902ecb51c109183ace539f247b4ea1347fbf23b5".parse().unwrap(),
            value: None,
            step_limit: HexInt::from(100_000u64),
            nid: HexInt::from(3u64),
            nonce: nonce.map(HexInt::from),
            version: HexInt::from(3u64),
            timestamp: HexInt::from(1_538_000_000_000_000u64),
        }
    }

    #[test]
    fn data_type_text_roundtrip() {
        for dt in [
            DataType::Call,
            DataType::Deploy,
            DataType::Message,
            DataType::Deposit,
        ] {
            assert_eq!(dt.as_str().parse::<DataType>().unwrap(), dt);
        }
        assert!("transfer".parse::<DataType>().is_err());
    }

    #[test]
    fn absent_optionals_are_omitted() {
        let params = IcxTransaction { common: common(None) }.to_params();
        assert!(!params.contains_key("value"));
        assert!(!params.contains_key("nonce"));
        assert!(!params.contains_key("dataType"));
        assert_eq!(params.len(), 6);
    }

    #[test]
    fn zero_nonce_is_kept() {
        let params = IcxTransaction {
            common: common(Some(0)),
        }
        .to_params();
        assert_eq!(params["nonce"], "0x0");
    }

    #[test]
    fn deposit_params_shapes() {
        let add = DepositTransaction {
            common: common(None),
            action: DepositAction::Add,
        }
        .to_params();
        assert_eq!(add["dataType"], "deposit");
        assert_eq!(add["data"]["action"], "add");

        let withdraw_all = DepositTransaction {
            common: common(None),
            action: DepositAction::Withdraw(None),
        }
        .to_params();
        assert_eq!(withdraw_all["data"].as_object().unwrap().len(), 1);

        let withdraw_amount = DepositTransaction {
            common: common(None),
            action: DepositAction::Withdraw(Some(WithdrawTarget::Amount(HexInt::from(10u64)))),
        }
        .to_params();
        assert_eq!(withdraw_amount["data"]["amount"], "0xa");
    }

    #[test]
    fn message_text_decodes() {
        let tx = MessageTransaction {
            common: common(None),
            data: codec::encode_text("hello"),
        };
        assert_eq!(tx.message_text().as_deref(), Some("hello"));
        assert_eq!(tx.to_params()["data"], "0x68656c6c6f");
    }

    #[test]
    fn union_reports_data_type() {
        let tx: Transaction = IcxTransaction { common: common(None) }.into();
        assert_eq!(tx.data_type(), None);
        let tx: Transaction = MessageTransaction {
            common: common(None),
            data: "0x".into(),
        }
        .into();
        assert_eq!(tx.data_type(), Some(DataType::Message));
    }
}
