//! # Error Types
//!
//! Errors raised by domain constructors and parsers in `assure-core`.
//! All errors use `thiserror` for derive-based `Display` and `Error`
//! implementations. The query pipeline itself never fails; its inputs are
//! validated at construction time (see [`crate::query::PageRequest`]).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single field-level validation failure, reported in error details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Wire name of the offending field (e.g. `"page"`, `"primaryEmail"`).
    pub field: String,
    /// Human-readable reason.
    pub message: String,
}

impl FieldError {
    /// Construct a field error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Top-level error type for the Assure domain layer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A risk sub-score fell outside the 0–100 range.
    #[error("risk score '{field}' must be between 0 and 100, got {value}")]
    RiskScoreOutOfRange {
        /// Name of the offending sub-score.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A string did not name a known variant of a domain enum.
    #[error("unknown {kind} '{value}'")]
    UnknownVariant {
        /// The enum being parsed (e.g. "customer type").
        kind: &'static str,
        /// The rejected input.
        value: String,
    },

    /// A date or timestamp could not be parsed.
    #[error("invalid date '{0}': expected YYYY-MM-DD or RFC 3339")]
    InvalidDate(String),

    /// A pagination parameter was out of range.
    #[error("invalid pagination: {field} {message}")]
    InvalidPagination {
        /// `page` or `limit`.
        field: &'static str,
        message: String,
    },

    /// A money amount was negative or not a number.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// A business identifier did not match its expected format.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),
}

impl CoreError {
    /// Wire name of the input this error is about.
    pub fn field(&self) -> &'static str {
        match self {
            Self::RiskScoreOutOfRange { field, .. } => *field,
            Self::UnknownVariant { kind, .. } => *kind,
            Self::InvalidDate(_) => "date",
            Self::InvalidPagination { field, .. } => *field,
            Self::InvalidAmount(_) => "amount",
            Self::InvalidIdentifier(_) => "id",
        }
    }
}

impl From<CoreError> for FieldError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidPagination { field, message } => Self::new(field, message),
            other => Self::new(other.field(), other.to_string()),
        }
    }
}
