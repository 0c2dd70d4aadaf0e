//! # Dashboard Summary
//!
//! Portfolio-level counts and totals over a customer snapshot. Every enum
//! variant appears in its breakdown, with zero when no customer has it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::customer::{Customer, CustomerStatus, CustomerType, KycStatus};
use crate::risk::RiskCategory;

/// Aggregated view of the customer book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_customers: usize,
    pub by_status: BTreeMap<String, usize>,
    pub by_type: BTreeMap<String, usize>,
    pub by_kyc_status: BTreeMap<String, usize>,
    pub by_risk_category: BTreeMap<String, usize>,
    pub total_premium: f64,
    pub active_policies: u64,
    /// Mean of per-customer claim ratios; 0 for an empty book.
    pub average_claim_ratio: f64,
}

fn zeroed<'a>(names: impl Iterator<Item = &'a str>) -> BTreeMap<String, usize> {
    names.map(|n| (n.to_string(), 0)).collect()
}

fn bump(map: &mut BTreeMap<String, usize>, key: &str) {
    *map.entry(key.to_string()).or_default() += 1;
}

/// Summarise `customers`.
pub fn summarize(customers: &[Customer]) -> DashboardSummary {
    let mut by_status = zeroed(CustomerStatus::ALL.iter().map(|s| s.as_str()));
    let mut by_type = zeroed(CustomerType::ALL.iter().map(|t| t.as_str()));
    let mut by_kyc_status = zeroed(KycStatus::ALL.iter().map(|k| k.as_str()));
    let mut by_risk_category = zeroed(RiskCategory::ALL.iter().map(|r| r.as_str()));

    let mut total_premium = 0.0;
    let mut active_policies = 0u64;
    let mut claim_ratio_sum = 0.0;

    for c in customers {
        bump(&mut by_status, c.status.as_str());
        bump(&mut by_type, c.customer_type.as_str());
        bump(&mut by_kyc_status, c.kyc_status.as_str());
        bump(&mut by_risk_category, c.risk_profile.category.as_str());
        total_premium += c.metrics.total_premium;
        active_policies += u64::from(c.metrics.active_policies);
        claim_ratio_sum += c.metrics.claim_ratio;
    }

    let average_claim_ratio = if customers.is_empty() {
        0.0
    } else {
        ((claim_ratio_sum / customers.len() as f64) * 10_000.0).round() / 10_000.0
    };

    DashboardSummary {
        total_customers: customers.len(),
        by_status,
        by_type,
        by_kyc_status,
        by_risk_category,
        total_premium,
        active_policies,
        average_claim_ratio,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample;

    #[test]
    fn empty_book_has_every_key_at_zero() {
        let s = summarize(&[]);
        assert_eq!(s.total_customers, 0);
        assert_eq!(s.by_status.len(), CustomerStatus::ALL.len());
        assert_eq!(s.by_kyc_status.len(), KycStatus::ALL.len());
        assert_eq!(s.by_risk_category.len(), RiskCategory::ALL.len());
        assert!(s.by_type.values().all(|&n| n == 0));
        assert_eq!(s.average_claim_ratio, 0.0);
    }

    #[test]
    fn breakdowns_sum_to_total() {
        let customers = sample::customers();
        let s = summarize(&customers);
        assert_eq!(s.total_customers, customers.len());
        for breakdown in [&s.by_status, &s.by_type, &s.by_kyc_status, &s.by_risk_category] {
            assert_eq!(breakdown.values().sum::<usize>(), customers.len());
        }
    }

    #[test]
    fn two_customer_totals() {
        let s = summarize(&sample::two_customers());
        assert_eq!(s.total_premium, 27_400.0);
        assert_eq!(s.active_policies, 7);
        assert_eq!(s.by_type["Individual"], 1);
        assert_eq!(s.by_type["Corporate"], 1);
        assert_eq!(s.by_status["Active"], 2);
        assert_eq!(s.average_claim_ratio, 0.235);
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(summarize(&sample::two_customers())).unwrap();
        assert_eq!(json["totalCustomers"], 2);
        assert_eq!(json["byKycStatus"]["Verified"], 2);
        assert_eq!(json["byStatus"]["Pending_KYC"], 0);
    }
}
