//! # Customer Records
//!
//! The customer aggregate and its lifecycle:
//!
//! - **create**: [`Customer::new`] starts every record in
//!   [`CustomerStatus::PendingKyc`] with [`KycStatus::Pending`].
//! - **update**: [`Customer::apply_update`] is a shallow merge: each field
//!   present in the [`CustomerUpdate`] replaces the stored value wholesale.
//! - **delete**: [`Customer::deactivate`] is a soft delete that flips the
//!   status to [`CustomerStatus::Inactive`]. Records are never removed.
//!
//! Every lifecycle step refreshes `updated_at` and appends to the activity
//! log. Owned arrays (contacts, addresses, documents, notes, activity) carry
//! no cross-entity referential integrity.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::identity::CustomerNumber;
use crate::risk::RiskProfile;

/// Implements `as_str`, `Display`, `FromStr`, and an `ALL` list for a
/// fieldless wire enum.
macro_rules! wire_enum {
    ($name:ident, $kind:literal, { $($variant:ident => $wire:literal),+ $(,)? }) => {
        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$(Self::$variant),+];

            /// Return the wire representation of this value.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire),+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::error::CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok(Self::$variant),)+
                    other => Err($crate::error::CoreError::UnknownVariant {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

pub(crate) use wire_enum;

// -- Enums --------------------------------------------------------------------

/// Individual person or corporate body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CustomerType {
    Individual,
    Corporate,
}

wire_enum!(CustomerType, "customer type", {
    Individual => "Individual",
    Corporate => "Corporate",
});

/// Account status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CustomerStatus {
    Active,
    Inactive,
    Suspended,
    #[serde(rename = "Pending_KYC")]
    PendingKyc,
}

wire_enum!(CustomerStatus, "customer status", {
    Active => "Active",
    Inactive => "Inactive",
    Suspended => "Suspended",
    PendingKyc => "Pending_KYC",
});

/// Know-Your-Customer verification status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KycStatus {
    Pending,
    #[serde(rename = "In_Progress")]
    InProgress,
    Verified,
    Rejected,
    Expired,
}

wire_enum!(KycStatus, "KYC status", {
    Pending => "Pending",
    InProgress => "In_Progress",
    Verified => "Verified",
    Rejected => "Rejected",
    Expired => "Expired",
});

/// Kind of entry in a customer's activity log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Created,
    Updated,
    StatusChanged,
    KycChanged,
    RiskRescored,
    NoteAdded,
    Deactivated,
}

// -- Owned value types ----------------------------------------------------------

/// Personal details for an individual customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,
}

/// Company details for a corporate customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInfo {
    pub company_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_count: Option<u32>,
}

/// A named contact person attached to a customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub is_primary: bool,
}

/// Postal address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Free-form label such as "Billing" or "Head office".
    pub kind: String,
    pub line1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    pub country: String,
}

/// Reference to an uploaded document. File storage lives elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRef {
    pub id: Uuid,
    pub name: String,
    pub document_type: String,
    pub uploaded_at: DateTime<Utc>,
}

/// Free-text note left by staff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Uuid,
    pub author: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Audit entry in a customer's activity log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    pub id: Uuid,
    pub kind: ActivityKind,
    pub description: String,
    pub at: DateTime<Utc>,
}

/// Book-of-business figures.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerMetrics {
    pub total_premium: f64,
    pub active_policies: u32,
    /// Claims paid over premium earned, as a fraction.
    pub claim_ratio: f64,
}

// -- Customer -----------------------------------------------------------------

/// Customer record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: Uuid,
    pub customer_number: CustomerNumber,
    pub customer_type: CustomerType,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personal_info: Option<PersonalInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_info: Option<CompanyInfo>,
    pub primary_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_phone: Option<String>,
    pub status: CustomerStatus,
    pub kyc_status: KycStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_manager_id: Option<String>,
    pub risk_profile: RiskProfile,
    pub metrics: CustomerMetrics,
    #[serde(default)]
    pub contacts: Vec<Contact>,
    #[serde(default)]
    pub addresses: Vec<Address>,
    #[serde(default)]
    pub documents: Vec<DocumentRef>,
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default)]
    pub activity_log: Vec<ActivityEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a customer. Shape-validated at the boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCustomer {
    pub customer_type: CustomerType,
    pub display_name: Option<String>,
    pub personal_info: Option<PersonalInfo>,
    pub company_info: Option<CompanyInfo>,
    pub primary_email: String,
    pub primary_phone: Option<String>,
    pub account_manager_id: Option<String>,
    pub contacts: Vec<Contact>,
    pub addresses: Vec<Address>,
}

/// Shallow-merge update. `None` leaves the stored field untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CustomerUpdate {
    pub display_name: Option<String>,
    pub personal_info: Option<PersonalInfo>,
    pub company_info: Option<CompanyInfo>,
    pub primary_email: Option<String>,
    pub primary_phone: Option<String>,
    pub status: Option<CustomerStatus>,
    pub kyc_status: Option<KycStatus>,
    pub account_manager_id: Option<String>,
    pub metrics: Option<CustomerMetrics>,
    pub contacts: Option<Vec<Contact>>,
    pub addresses: Option<Vec<Address>>,
}

impl CustomerUpdate {
    /// Whether the update carries no fields at all.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Display name derived from the naming fields for the customer type.
fn derive_display_name(
    customer_type: CustomerType,
    personal: Option<&PersonalInfo>,
    company: Option<&CompanyInfo>,
) -> String {
    match customer_type {
        CustomerType::Individual => personal
            .map(|p| format!("{} {}", p.first_name.trim(), p.last_name.trim()))
            .unwrap_or_default(),
        CustomerType::Corporate => company
            .map(|c| c.company_name.trim().to_string())
            .unwrap_or_default(),
    }
}

impl Customer {
    /// Create a new customer in `Pending_KYC`.
    pub fn new(input: NewCustomer, number: CustomerNumber, now: DateTime<Utc>) -> Self {
        let display_name = input
            .display_name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| {
                derive_display_name(
                    input.customer_type,
                    input.personal_info.as_ref(),
                    input.company_info.as_ref(),
                )
            });

        let mut customer = Self {
            id: Uuid::new_v4(),
            customer_number: number,
            customer_type: input.customer_type,
            display_name,
            personal_info: input.personal_info,
            company_info: input.company_info,
            primary_email: input.primary_email,
            primary_phone: input.primary_phone,
            status: CustomerStatus::PendingKyc,
            kyc_status: KycStatus::Pending,
            account_manager_id: input.account_manager_id,
            risk_profile: RiskProfile::default(),
            metrics: CustomerMetrics::default(),
            contacts: input.contacts,
            addresses: input.addresses,
            documents: Vec::new(),
            notes: Vec::new(),
            activity_log: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        let description = format!("customer {} created", customer.customer_number);
        customer.record_activity(ActivityKind::Created, description, now);
        customer
    }

    /// Company name from `company_info`, when present. Not gated on
    /// `customer_type`.
    pub fn company_name(&self) -> Option<&str> {
        self.company_info.as_ref().map(|c| c.company_name.as_str())
    }

    /// Industry, when the customer is corporate and has one.
    pub fn industry(&self) -> Option<&str> {
        self.company_info
            .as_ref()
            .and_then(|c| c.industry.as_deref())
    }

    /// Append an activity entry. Does not touch `updated_at`.
    pub fn record_activity(
        &mut self,
        kind: ActivityKind,
        description: impl Into<String>,
        at: DateTime<Utc>,
    ) {
        self.activity_log.push(ActivityEntry {
            id: Uuid::new_v4(),
            kind,
            description: description.into(),
            at,
        });
    }

    /// Shallow-merge `update` into this record and refresh `updated_at`.
    pub fn apply_update(&mut self, update: CustomerUpdate, now: DateTime<Utc>) {
        let mut changed = Vec::new();

        if let Some(name) = update.display_name {
            self.display_name = name;
            changed.push("displayName");
        }
        if let Some(info) = update.personal_info {
            self.personal_info = Some(info);
            changed.push("personalInfo");
        }
        if let Some(info) = update.company_info {
            self.company_info = Some(info);
            changed.push("companyInfo");
        }
        if let Some(email) = update.primary_email {
            self.primary_email = email;
            changed.push("primaryEmail");
        }
        if let Some(phone) = update.primary_phone {
            self.primary_phone = Some(phone);
            changed.push("primaryPhone");
        }
        if let Some(manager) = update.account_manager_id {
            self.account_manager_id = Some(manager);
            changed.push("accountManagerId");
        }
        if let Some(metrics) = update.metrics {
            self.metrics = metrics;
            changed.push("metrics");
        }
        if let Some(contacts) = update.contacts {
            self.contacts = contacts;
            changed.push("contacts");
        }
        if let Some(addresses) = update.addresses {
            self.addresses = addresses;
            changed.push("addresses");
        }
        if !changed.is_empty() {
            self.record_activity(
                ActivityKind::Updated,
                format!("updated {}", changed.join(", ")),
                now,
            );
        }

        if let Some(status) = update.status {
            self.set_status(status, now);
        }
        if let Some(kyc) = update.kyc_status {
            self.set_kyc_status(kyc, now);
        }

        self.updated_at = now;
    }

    /// Change the account status, logging the transition.
    pub fn set_status(&mut self, status: CustomerStatus, now: DateTime<Utc>) {
        if self.status != status {
            let description = format!("status {} -> {}", self.status, status);
            self.status = status;
            self.record_activity(ActivityKind::StatusChanged, description, now);
        }
        self.updated_at = now;
    }

    /// Change the KYC status, logging the transition.
    pub fn set_kyc_status(&mut self, kyc: KycStatus, now: DateTime<Utc>) {
        if self.kyc_status != kyc {
            let description = format!("KYC {} -> {}", self.kyc_status, kyc);
            self.kyc_status = kyc;
            self.record_activity(ActivityKind::KycChanged, description, now);
        }
        self.updated_at = now;
    }

    /// Replace the risk profile.
    pub fn rescore(&mut self, profile: RiskProfile, now: DateTime<Utc>) {
        let description = format!(
            "risk {} ({}) -> {} ({})",
            self.risk_profile.category,
            self.risk_profile.overall_score,
            profile.category,
            profile.overall_score
        );
        self.risk_profile = profile;
        self.record_activity(ActivityKind::RiskRescored, description, now);
        self.updated_at = now;
    }

    /// Attach a staff note, returning a copy of it.
    pub fn add_note(
        &mut self,
        author: impl Into<String>,
        body: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Note {
        let note = Note {
            id: Uuid::new_v4(),
            author: author.into(),
            body: body.into(),
            created_at: now,
        };
        self.notes.push(note.clone());
        let description = format!("note added by {}", note.author);
        self.record_activity(ActivityKind::NoteAdded, description, now);
        self.updated_at = now;
        note
    }

    /// Soft delete: flip to `Inactive`. The record stays in the collection.
    pub fn deactivate(&mut self, now: DateTime<Utc>) {
        if self.status != CustomerStatus::Inactive {
            self.status = CustomerStatus::Inactive;
            self.record_activity(ActivityKind::Deactivated, "customer deactivated", now);
        }
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap()
    }

    fn new_individual() -> NewCustomer {
        NewCustomer {
            customer_type: CustomerType::Individual,
            display_name: None,
            personal_info: Some(PersonalInfo {
                first_name: "Ada".into(),
                last_name: "Lovelace".into(),
                date_of_birth: None,
                occupation: None,
            }),
            company_info: None,
            primary_email: "ada@example.com".into(),
            primary_phone: None,
            account_manager_id: None,
            contacts: vec![],
            addresses: vec![],
        }
    }

    fn new_corporate() -> NewCustomer {
        NewCustomer {
            customer_type: CustomerType::Corporate,
            display_name: None,
            personal_info: None,
            company_info: Some(CompanyInfo {
                company_name: "Analytical Engines Ltd".into(),
                industry: Some("Manufacturing".into()),
                registration_number: None,
                employee_count: Some(12),
            }),
            primary_email: "ops@engines.example".into(),
            primary_phone: None,
            account_manager_id: None,
            contacts: vec![],
            addresses: vec![],
        }
    }

    #[test]
    fn new_customer_starts_pending_kyc() {
        let c = Customer::new(new_individual(), CustomerNumber::sequential(2026, 1), t0());
        assert_eq!(c.status, CustomerStatus::PendingKyc);
        assert_eq!(c.kyc_status, KycStatus::Pending);
        assert_eq!(c.created_at, c.updated_at);
        assert_eq!(c.activity_log.len(), 1);
        assert_eq!(c.activity_log[0].kind, ActivityKind::Created);
    }

    #[test]
    fn display_name_derived_from_naming_fields() {
        let ind = Customer::new(new_individual(), CustomerNumber::sequential(2026, 1), t0());
        assert_eq!(ind.display_name, "Ada Lovelace");

        let corp = Customer::new(new_corporate(), CustomerNumber::sequential(2026, 2), t0());
        assert_eq!(corp.display_name, "Analytical Engines Ltd");
        assert_eq!(corp.industry(), Some("Manufacturing"));
    }

    #[test]
    fn explicit_display_name_wins() {
        let mut input = new_individual();
        input.display_name = Some("  Countess Lovelace ".into());
        let c = Customer::new(input, CustomerNumber::sequential(2026, 1), t0());
        assert_eq!(c.display_name, "Countess Lovelace");
    }

    #[test]
    fn update_is_shallow_merge_and_refreshes_updated_at() {
        let mut c = Customer::new(new_individual(), CustomerNumber::sequential(2026, 1), t0());
        let later = t0() + Duration::hours(2);
        c.apply_update(
            CustomerUpdate {
                primary_phone: Some("+44 20 7946 0000".into()),
                ..Default::default()
            },
            later,
        );
        assert_eq!(c.primary_phone.as_deref(), Some("+44 20 7946 0000"));
        assert_eq!(c.primary_email, "ada@example.com");
        assert_eq!(c.updated_at, later);
        assert_eq!(c.created_at, t0());
    }

    #[test]
    fn update_logs_status_transition() {
        let mut c = Customer::new(new_individual(), CustomerNumber::sequential(2026, 1), t0());
        c.apply_update(
            CustomerUpdate {
                status: Some(CustomerStatus::Active),
                kyc_status: Some(KycStatus::Verified),
                ..Default::default()
            },
            t0(),
        );
        let kinds: Vec<ActivityKind> = c.activity_log.iter().map(|a| a.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ActivityKind::Created,
                ActivityKind::StatusChanged,
                ActivityKind::KycChanged
            ]
        );
    }

    #[test]
    fn deactivate_is_soft_delete() {
        let mut c = Customer::new(new_individual(), CustomerNumber::sequential(2026, 1), t0());
        c.deactivate(t0() + Duration::minutes(5));
        assert_eq!(c.status, CustomerStatus::Inactive);
        // Second deactivation is a no-op on the log.
        c.deactivate(t0() + Duration::minutes(6));
        let deactivations = c
            .activity_log
            .iter()
            .filter(|a| a.kind == ActivityKind::Deactivated)
            .count();
        assert_eq!(deactivations, 1);
    }

    #[test]
    fn add_note_appends_note_and_activity() {
        let mut c = Customer::new(new_individual(), CustomerNumber::sequential(2026, 1), t0());
        let note = c.add_note("underwriter-7", "Requested proof of address", t0());
        assert_eq!(c.notes, vec![note]);
        assert_eq!(c.activity_log.last().unwrap().kind, ActivityKind::NoteAdded);
    }

    #[test]
    fn wire_names_round_trip_through_serde_and_from_str() {
        assert_eq!(
            serde_json::to_string(&CustomerStatus::PendingKyc).unwrap(),
            "\"Pending_KYC\""
        );
        assert_eq!(
            "Pending_KYC".parse::<CustomerStatus>().unwrap(),
            CustomerStatus::PendingKyc
        );
        assert_eq!(
            serde_json::to_string(&KycStatus::InProgress).unwrap(),
            "\"In_Progress\""
        );
        assert!("Partnership".parse::<CustomerType>().is_err());
    }

    #[test]
    fn customer_serializes_camel_case() {
        let c = Customer::new(new_corporate(), CustomerNumber::sequential(2026, 3), t0());
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["customerNumber"], "CUST-2026-000003");
        assert_eq!(json["customerType"], "Corporate");
        assert_eq!(json["companyInfo"]["companyName"], "Analytical Engines Ltd");
        assert!(json.get("personalInfo").is_none());
        assert_eq!(json["metrics"]["totalPremium"], 0.0);
    }

    #[test]
    fn company_name_reads_company_info_for_any_type() {
        let mut c = Customer::new(new_individual(), CustomerNumber::sequential(2026, 3), t0());
        assert_eq!(c.company_name(), None);
        c.company_info = Some(CompanyInfo {
            company_name: "Lovelace Consulting".into(),
            industry: None,
            registration_number: None,
            employee_count: None,
        });
        assert_eq!(c.customer_type, CustomerType::Individual);
        assert_eq!(c.company_name(), Some("Lovelace Consulting"));
    }
}
