//! # Business Identifier Newtypes
//!
//! Human-facing record numbers (`CUST-2026-000042`, `POL-…`, `CLM-…`).
//! Records are keyed internally by UUID; these numbers are what back-office
//! staff search and sort by. Newtypes keep a policy number from being
//! passed where a customer number is expected.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Number of zero-padded digits in the sequence part of a record number.
const SEQUENCE_WIDTH: usize = 6;

/// Format `PREFIX-YYYY-NNNNNN`.
fn format_sequential(prefix: &str, year: i32, seq: u64) -> String {
    format!("{prefix}-{year:04}-{seq:0width$}", width = SEQUENCE_WIDTH)
}

/// Check the `PREFIX-YYYY-NNNNNN` shape, returning the sequence part.
fn parse_sequential(prefix: &str, s: &str) -> Result<u64, CoreError> {
    let rest = s
        .strip_prefix(prefix)
        .and_then(|r| r.strip_prefix('-'))
        .ok_or_else(|| CoreError::InvalidIdentifier(format!("{s:?} must start with {prefix}-")))?;
    let (year, seq) = rest
        .split_once('-')
        .ok_or_else(|| CoreError::InvalidIdentifier(format!("{s:?} is missing a year segment")))?;
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoreError::InvalidIdentifier(format!(
            "{s:?} has a malformed year"
        )));
    }
    if seq.is_empty() || !seq.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoreError::InvalidIdentifier(format!(
            "{s:?} has a malformed sequence"
        )));
    }
    seq.parse()
        .map_err(|_| CoreError::InvalidIdentifier(format!("{s:?} sequence overflows")))
}

macro_rules! record_number {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Prefix shared by every number of this kind.
            pub const PREFIX: &'static str = $prefix;

            /// Build a sequential-looking number for the given year and sequence.
            pub fn sequential(year: i32, seq: u64) -> Self {
                Self(format_sequential(Self::PREFIX, year, seq))
            }

            /// Parse and validate an existing number.
            pub fn parse(s: &str) -> Result<Self, CoreError> {
                parse_sequential(Self::PREFIX, s)?;
                Ok(Self(s.to_string()))
            }

            /// The sequence component (the trailing digits).
            pub fn sequence(&self) -> Option<u64> {
                parse_sequential(Self::PREFIX, &self.0).ok()
            }

            /// Return the number as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

record_number!(
    /// Customer number, e.g. `CUST-2026-000001`.
    CustomerNumber,
    "CUST"
);

record_number!(
    /// Policy number, e.g. `POL-2026-000001`.
    PolicyNumber,
    "POL"
);

record_number!(
    /// Claim number, e.g. `CLM-2026-000001`.
    ClaimNumber,
    "CLM"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_is_zero_padded() {
        let n = CustomerNumber::sequential(2026, 42);
        assert_eq!(n.as_str(), "CUST-2026-000042");
        assert_eq!(n.sequence(), Some(42));
    }

    #[test]
    fn parse_rejects_wrong_prefix() {
        assert!(CustomerNumber::parse("POL-2026-000001").is_err());
        assert!(PolicyNumber::parse("POL-2026-000001").is_ok());
    }

    #[test]
    fn parse_rejects_malformed_segments() {
        assert!(ClaimNumber::parse("CLM-26-000001").is_err());
        assert!(ClaimNumber::parse("CLM-2026-").is_err());
        assert!(ClaimNumber::parse("CLM-2026-12a").is_err());
        assert!(ClaimNumber::parse("CLM2026000001").is_err());
    }

    #[test]
    fn numbers_order_lexicographically_within_a_year() {
        let a = CustomerNumber::sequential(2026, 9);
        let b = CustomerNumber::sequential(2026, 10);
        assert!(a < b);
    }

    #[test]
    fn serializes_as_plain_string() {
        let n = PolicyNumber::sequential(2025, 7);
        let json = serde_json::to_string(&n).unwrap();
        assert_eq!(json, "\"POL-2025-000007\"");
    }
}
