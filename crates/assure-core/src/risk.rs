//! # Risk Profile
//!
//! Each customer carries four underwriting sub-scores in `0..=100` and a
//! coarse [`RiskCategory`] derived from their weighted average. The category
//! is what the query pipeline filters on and what dashboards bucket by.
//!
//! | Sub-score    | Weight |
//! |--------------|--------|
//! | credit       | 0.30   |
//! | claims       | 0.30   |
//! | fraud        | 0.25   |
//! | compliance   | 0.15   |
//!
//! Category thresholds on the overall score: `< 25` Low, `< 50` Medium,
//! `< 75` High, otherwise Critical.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

const CREDIT_WEIGHT: f64 = 0.30;
const CLAIMS_WEIGHT: f64 = 0.30;
const FRAUD_WEIGHT: f64 = 0.25;
const COMPLIANCE_WEIGHT: f64 = 0.15;

/// Coarse risk bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskCategory {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskCategory {
    /// Every category, lowest risk first.
    pub const ALL: [RiskCategory; 4] = [Self::Low, Self::Medium, Self::High, Self::Critical];

    /// Bucket an overall score.
    pub fn from_score(score: f64) -> Self {
        if score < 25.0 {
            Self::Low
        } else if score < 50.0 {
            Self::Medium
        } else if score < 75.0 {
            Self::High
        } else {
            Self::Critical
        }
    }

    /// Return the wire representation of this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| CoreError::UnknownVariant {
                kind: "risk category",
                value: s.to_string(),
            })
    }
}

/// Risk sub-scores plus derived overall score and category.
///
/// Construct through [`RiskProfile::from_scores`] so the derived fields stay
/// consistent with the sub-scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskProfile {
    pub credit_score: f64,
    pub claims_score: f64,
    pub fraud_score: f64,
    pub compliance_score: f64,
    pub overall_score: f64,
    pub category: RiskCategory,
}

fn check_range(field: &'static str, value: f64) -> Result<f64, CoreError> {
    if (0.0..=100.0).contains(&value) {
        Ok(value)
    } else {
        Err(CoreError::RiskScoreOutOfRange { field, value })
    }
}

impl RiskProfile {
    /// Build a profile from raw sub-scores, deriving overall score and category.
    pub fn from_scores(
        credit: f64,
        claims: f64,
        fraud: f64,
        compliance: f64,
    ) -> Result<Self, CoreError> {
        let credit = check_range("creditScore", credit)?;
        let claims = check_range("claimsScore", claims)?;
        let fraud = check_range("fraudScore", fraud)?;
        let compliance = check_range("complianceScore", compliance)?;

        let overall = credit * CREDIT_WEIGHT
            + claims * CLAIMS_WEIGHT
            + fraud * FRAUD_WEIGHT
            + compliance * COMPLIANCE_WEIGHT;
        // Two decimal places keep the wire value readable.
        let overall = (overall * 100.0).round() / 100.0;

        Ok(Self {
            credit_score: credit,
            claims_score: claims,
            fraud_score: fraud,
            compliance_score: compliance,
            overall_score: overall,
            category: RiskCategory::from_score(overall),
        })
    }
}

impl Default for RiskProfile {
    /// A neutral profile for freshly onboarded customers.
    fn default() -> Self {
        Self {
            credit_score: 0.0,
            claims_score: 0.0,
            fraud_score: 0.0,
            compliance_score: 0.0,
            overall_score: 0.0,
            category: RiskCategory::Low,
        }
    }
}
