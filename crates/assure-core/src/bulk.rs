//! # Bulk Actions
//!
//! One action applied to many customers. The caller loops over the ids it
//! was given; each record is mutated independently, so one failure never
//! rolls back another.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::customer::{ActivityKind, Customer, CustomerStatus, KycStatus};

/// A status or assignment change applied to a batch of customers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum BulkAction {
    Activate,
    Deactivate,
    Suspend,
    #[serde(rename_all = "camelCase")]
    AssignManager { manager_id: String },
    #[serde(rename_all = "camelCase")]
    SetKycStatus { kyc_status: KycStatus },
}

impl BulkAction {
    /// Short name used in logs and activity descriptions.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Activate => "activate",
            Self::Deactivate => "deactivate",
            Self::Suspend => "suspend",
            Self::AssignManager { .. } => "assignManager",
            Self::SetKycStatus { .. } => "setKycStatus",
        }
    }
}

/// A customer the action could not be applied to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkFailure {
    pub id: Uuid,
    pub reason: String,
}

/// Per-id outcome of a bulk request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BulkOutcome {
    pub succeeded: Vec<Uuid>,
    pub failed: Vec<BulkFailure>,
}

impl BulkOutcome {
    pub fn succeed(&mut self, id: Uuid) {
        self.succeeded.push(id);
    }

    pub fn fail(&mut self, id: Uuid, reason: impl Into<String>) {
        self.failed.push(BulkFailure {
            id,
            reason: reason.into(),
        });
    }
}

/// Apply `action` to a single customer.
pub fn apply(customer: &mut Customer, action: &BulkAction, now: DateTime<Utc>) {
    match action {
        BulkAction::Activate => customer.set_status(CustomerStatus::Active, now),
        BulkAction::Deactivate => customer.deactivate(now),
        BulkAction::Suspend => customer.set_status(CustomerStatus::Suspended, now),
        BulkAction::AssignManager { manager_id } => {
            if customer.account_manager_id.as_deref() != Some(manager_id.as_str()) {
                customer.account_manager_id = Some(manager_id.clone());
                customer.record_activity(
                    ActivityKind::Updated,
                    format!("account manager set to {manager_id}"),
                    now,
                );
            }
            customer.updated_at = now;
        }
        BulkAction::SetKycStatus { kyc_status } => customer.set_kyc_status(*kyc_status, now),
    }
}
