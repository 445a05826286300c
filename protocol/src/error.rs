//! Crate-level error types.
//!
//! Each module owns the error for its own failure modes ([`EncodingError`],
//! [`KeyError`], [`VerificationError`]). [`ValidationError`] lives here
//! because builders, the call request, and the pre-send checks all raise it.
//! [`IconError`] unifies them for operations that can fail more than one way.

use thiserror::Error;

use crate::codec::EncodingError;
use crate::crypto::keys::KeyError;
use crate::transaction::verification::VerificationError;

/// A required field is missing or fails its predicate.
///
/// Always names the offending field. Nested payload fields use a dotted
/// path such as `data.method` or `data.params._to`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required field `{field}`")]
    Missing { field: String },

    #[error("invalid field `{field}`: {reason}")]
    Invalid { field: String, reason: String },
}

impl ValidationError {
    pub fn missing(field: impl Into<String>) -> Self {
        Self::Missing {
            field: field.into(),
        }
    }

    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// The field that failed.
    pub fn field(&self) -> &str {
        match self {
            Self::Missing { field } | Self::Invalid { field, .. } => field,
        }
    }
}

/// Umbrella error for the whole pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IconError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error(transparent)]
    InvalidKey(#[from] KeyError),

    #[error(transparent)]
    Verification(#[from] VerificationError),
}

pub type Result<T> = std::result::Result<T, IconError>;
