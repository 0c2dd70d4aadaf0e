//! # Policies and Claims
//!
//! Thin records with create/get/list. A policy names the customer it covers
//! and a claim names its policy, but neither reference is checked: the data
//! model enforces no cross-entity integrity.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::customer::wire_enum;
use crate::error::CoreError;
use crate::identity::{ClaimNumber, PolicyNumber};

/// Policy lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PolicyStatus {
    Draft,
    Active,
    Lapsed,
    Cancelled,
    Expired,
}

wire_enum!(PolicyStatus, "policy status", {
    Draft => "Draft",
    Active => "Active",
    Lapsed => "Lapsed",
    Cancelled => "Cancelled",
    Expired => "Expired",
});

/// Claim status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClaimStatus {
    Submitted,
    #[serde(rename = "Under_Review")]
    UnderReview,
    Approved,
    Rejected,
    Settled,
}

wire_enum!(ClaimStatus, "claim status", {
    Submitted => "Submitted",
    UnderReview => "Under_Review",
    Approved => "Approved",
    Rejected => "Rejected",
    Settled => "Settled",
});

/// Insurance policy record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Policy {
    pub id: Uuid,
    pub policy_number: PolicyNumber,
    pub customer_id: Uuid,
    pub product: String,
    pub status: PolicyStatus,
    pub premium: f64,
    pub sum_insured: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for a new policy.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPolicy {
    pub customer_id: Uuid,
    pub product: String,
    pub premium: f64,
    pub sum_insured: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Policy {
    /// Create a policy in `Draft`.
    ///
    /// Rejects a coverage period that ends before it starts and negative
    /// money amounts.
    pub fn new(
        input: NewPolicy,
        number: PolicyNumber,
        now: DateTime<Utc>,
    ) -> Result<Self, CoreError> {
        if input.end_date < input.start_date {
            return Err(CoreError::InvalidDate(format!(
                "endDate {} precedes startDate {}",
                input.end_date, input.start_date
            )));
        }
        if !(input.premium >= 0.0 && input.sum_insured >= 0.0) {
            return Err(CoreError::InvalidAmount(
                "premium and sumInsured must be non-negative".to_string(),
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            policy_number: number,
            customer_id: input.customer_id,
            product: input.product,
            status: PolicyStatus::Draft,
            premium: input.premium,
            sum_insured: input.sum_insured,
            start_date: input.start_date,
            end_date: input.end_date,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Claim stub record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    pub id: Uuid,
    pub claim_number: ClaimNumber,
    pub policy_id: Uuid,
    pub customer_id: Uuid,
    pub status: ClaimStatus,
    pub amount_claimed: f64,
    pub description: String,
    pub incident_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for a new claim.
#[derive(Debug, Clone, PartialEq)]
pub struct NewClaim {
    pub policy_id: Uuid,
    pub customer_id: Uuid,
    pub amount_claimed: f64,
    pub description: String,
    pub incident_date: NaiveDate,
}

impl Claim {
    /// File a claim in `Submitted`.
    pub fn new(input: NewClaim, number: ClaimNumber, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            claim_number: number,
            policy_id: input.policy_id,
            customer_id: input.customer_id,
            status: ClaimStatus::Submitted,
            amount_claimed: input.amount_claimed,
            description: input.description,
            incident_date: input.incident_date,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn new_policy() -> NewPolicy {
        NewPolicy {
            customer_id: Uuid::new_v4(),
            product: "Home Contents".into(),
            premium: 480.0,
            sum_insured: 50_000.0,
            start_date: date(2026, 1, 1),
            end_date: date(2026, 12, 31),
        }
    }

    #[test]
    fn policy_starts_in_draft() {
        let p = Policy::new(new_policy(), PolicyNumber::sequential(2026, 1), Utc::now()).unwrap();
        assert_eq!(p.status, PolicyStatus::Draft);
        assert_eq!(p.policy_number.as_str(), "POL-2026-000001");
    }

    #[test]
    fn policy_rejects_inverted_period() {
        let mut input = new_policy();
        input.end_date = date(2025, 12, 31);
        assert!(Policy::new(input, PolicyNumber::sequential(2026, 1), Utc::now()).is_err());
    }

    #[test]
    fn policy_rejects_negative_premium() {
        let mut input = new_policy();
        input.premium = -1.0;
        assert!(Policy::new(input, PolicyNumber::sequential(2026, 1), Utc::now()).is_err());
    }

    #[test]
    fn claim_starts_submitted() {
        let c = Claim::new(
            NewClaim {
                policy_id: Uuid::new_v4(),
                customer_id: Uuid::new_v4(),
                amount_claimed: 1200.0,
                description: "Water damage".into(),
                incident_date: date(2026, 2, 3),
            },
            ClaimNumber::sequential(2026, 9),
            Utc::now(),
        );
        assert_eq!(c.status, ClaimStatus::Submitted);
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["claimNumber"], "CLM-2026-000009");
        assert_eq!(json["status"], "Submitted");
    }

    #[test]
    fn claim_status_wire_names() {
        assert_eq!(
            "Under_Review".parse::<ClaimStatus>().unwrap(),
            ClaimStatus::UnderReview
        );
        assert!("Paid".parse::<ClaimStatus>().is_err());
    }
}
