//! Read-only SCORE calls (`icx_call`).
//!
//! A call is not a transaction: it is never hashed or signed, and it carries
//! none of the fee or replay fields. It shares the `data`/`dataType` shape
//! with [`super::types::CallTransaction`], which is why it lives here.

use serde_json::Value;

use super::Params;
use crate::error::ValidationError;
use crate::types::Address;

/// A validated `icx_call` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    from: Option<Address>,
    to: Address,
    method: String,
    params: Option<Params>,
}

impl Call {
    pub fn from(&self) -> Option<&Address> {
        self.from.as_ref()
    }

    pub fn to(&self) -> &Address {
        &self.to
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn params(&self) -> Option<&Params> {
        self.params.as_ref()
    }

    /// The `icx_call` parameter map.
    pub fn to_params(&self) -> Params {
        let mut data = Params::new();
        data.insert("method".into(), Value::String(self.method.clone()));
        if let Some(params) = &self.params {
            data.insert("params".into(), Value::Object(params.clone()));
        }

        let mut out = Params::new();
        if let Some(from) = &self.from {
            out.insert("from".into(), Value::String(from.to_string()));
        }
        out.insert("to".into(), Value::String(self.to.to_string()));
        out.insert("dataType".into(), Value::String("call".into()));
        out.insert("data".into(), Value::Object(data));
        out
    }
}

/// Builder for [`Call`]. Same deferred-validation contract as the
/// transaction builders.
#[derive(Debug, Clone, Default)]
pub struct CallBuilder {
    from: Option<String>,
    to: Option<String>,
    method: Option<String>,
    params: Option<Params>,
}

impl CallBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Optional caller address.
    pub fn from(mut self, address: impl Into<String>) -> Self {
        self.from = Some(address.into());
        self
    }

    pub fn to(mut self, address: impl Into<String>) -> Self {
        self.to = Some(address.into());
        self
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Call parameters. Read calls pass them through untouched, so use
    /// hex text for numbers.
    pub fn params(mut self, params: Params) -> Self {
        self.params = Some(params);
        self
    }

    pub fn build(self) -> Result<Call, ValidationError> {
        let to_raw = self.to.ok_or_else(|| ValidationError::missing("to"))?;
        let to: Address = to_raw
            .parse()
            .map_err(|_| ValidationError::invalid("to", format!("{to_raw:?} is not an address")))?;
        if !to.is_contract() {
            return Err(ValidationError::invalid("to", format!("{to} is not a SCORE address")));
        }

        let from = match self.from {
            Some(raw) => {
                let from: Address = raw.parse().map_err(|_| {
                    ValidationError::invalid("from", format!("{raw:?} is not an address"))
                })?;
                if from.is_contract() {
                    return Err(ValidationError::invalid("from", "must be an EOA"));
                }
                Some(from)
            }
            None => None,
        };

        let method = self
            .method
            .filter(|m| !m.is_empty())
            .ok_or_else(|| ValidationError::missing("data.method"))?;

        Ok(Call {
            from,
            to,
            method,
            params: self.params,
        })
    }
}
