//! # Sample Dataset
//!
//! Fixed demo customers used to seed the API in development and as test
//! fixtures. Timestamps and customer numbers are deterministic; UUIDs are
//! derived from the sequence so fixtures compare equal across calls.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use uuid::Uuid;

use crate::customer::{
    ActivityEntry, ActivityKind, Address, CompanyInfo, Contact, Customer, CustomerMetrics,
    CustomerStatus, CustomerType, KycStatus, PersonalInfo,
};
use crate::identity::CustomerNumber;
use crate::risk::RiskProfile;

/// Year stamped into sample customer numbers.
pub const SAMPLE_YEAR: i32 = 2024;

fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0)
        .single()
        .unwrap_or_default()
}

fn stable_id(seq: u64) -> Uuid {
    Uuid::from_u128(0x5a4d_0000_0000_4000_8000_0000_0000_0000 | u128::from(seq))
}

struct Seed {
    seq: u64,
    customer_type: CustomerType,
    display_name: &'static str,
    personal: Option<(&'static str, &'static str)>,
    company: Option<(&'static str, &'static str)>,
    email: &'static str,
    phone: &'static str,
    status: CustomerStatus,
    kyc: KycStatus,
    manager: Option<&'static str>,
    scores: (f64, f64, f64, f64),
    metrics: (f64, u32, f64),
    created: DateTime<Utc>,
    updated: DateTime<Utc>,
    city: &'static str,
}

fn build(seed: Seed) -> Customer {
    let (credit, claims, fraud, compliance) = seed.scores;
    let (total_premium, active_policies, claim_ratio) = seed.metrics;
    let customer_number = CustomerNumber::sequential(SAMPLE_YEAR, seed.seq);
    Customer {
        id: stable_id(seed.seq),
        customer_number: customer_number.clone(),
        customer_type: seed.customer_type,
        display_name: seed.display_name.to_string(),
        personal_info: seed.personal.map(|(first, last)| PersonalInfo {
            first_name: first.to_string(),
            last_name: last.to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1985, 6, 15),
            occupation: None,
        }),
        company_info: seed.company.map(|(name, industry)| CompanyInfo {
            company_name: name.to_string(),
            industry: Some(industry.to_string()),
            registration_number: None,
            employee_count: None,
        }),
        primary_email: seed.email.to_string(),
        primary_phone: Some(seed.phone.to_string()),
        status: seed.status,
        kyc_status: seed.kyc,
        account_manager_id: seed.manager.map(str::to_string),
        risk_profile: RiskProfile::from_scores(credit, claims, fraud, compliance)
            .unwrap_or_default(),
        metrics: CustomerMetrics {
            total_premium,
            active_policies,
            claim_ratio,
        },
        contacts: vec![Contact {
            name: seed.display_name.to_string(),
            role: None,
            email: Some(seed.email.to_string()),
            phone: Some(seed.phone.to_string()),
            is_primary: true,
        }],
        addresses: vec![Address {
            kind: "Primary".to_string(),
            line1: "1 Market Street".to_string(),
            line2: None,
            city: seed.city.to_string(),
            region: None,
            postal_code: None,
            country: "US".to_string(),
        }],
        documents: Vec::new(),
        notes: Vec::new(),
        activity_log: vec![ActivityEntry {
            id: stable_id(seed.seq + 1_000),
            kind: ActivityKind::Created,
            description: format!("customer {customer_number} created"),
            at: seed.created,
        }],
        created_at: seed.created,
        updated_at: seed.updated,
    }
}

fn sarah_johnson() -> Customer {
    build(Seed {
        seq: 1,
        customer_type: CustomerType::Individual,
        display_name: "Sarah Johnson",
        personal: Some(("Sarah", "Johnson")),
        company: None,
        email: "sarah.johnson@email.com",
        phone: "+1-555-0123",
        status: CustomerStatus::Active,
        kyc: KycStatus::Verified,
        manager: Some("am-001"),
        scores: (15.0, 20.0, 5.0, 10.0),
        metrics: (2400.0, 2, 0.15),
        created: at(2024, 1, 15, 10),
        updated: at(2024, 3, 10, 14),
        city: "Springfield",
    })
}

fn techcorp() -> Customer {
    build(Seed {
        seq: 2,
        customer_type: CustomerType::Corporate,
        display_name: "TechCorp Solutions Inc.",
        personal: None,
        company: Some(("TechCorp Solutions Inc.", "Information Technology")),
        email: "contact@techcorp.com",
        phone: "+1-555-0456",
        status: CustomerStatus::Active,
        kyc: KycStatus::Verified,
        manager: Some("am-002"),
        scores: (35.0, 40.0, 20.0, 30.0),
        metrics: (25000.0, 5, 0.32),
        created: at(2024, 2, 1, 9),
        updated: at(2024, 3, 15, 11),
        city: "Austin",
    })
}

/// The two-customer fixture: one individual (premium 2400) and one corporate
/// IT customer (premium 25000).
pub fn two_customers() -> Vec<Customer> {
    vec![sarah_johnson(), techcorp()]
}

/// The full demo list.
pub fn customers() -> Vec<Customer> {
    vec![
        sarah_johnson(),
        techcorp(),
        build(Seed {
            seq: 3,
            customer_type: CustomerType::Individual,
            display_name: "Michael Chen",
            personal: Some(("Michael", "Chen")),
            company: None,
            email: "m.chen@mailbox.org",
            phone: "+1-555-0789",
            status: CustomerStatus::PendingKyc,
            kyc: KycStatus::InProgress,
            manager: Some("am-001"),
            scores: (40.0, 55.0, 30.0, 45.0),
            metrics: (1200.0, 1, 0.0),
            created: at(2024, 2, 20, 16),
            updated: at(2024, 2, 21, 8),
            city: "Portland",
        }),
        build(Seed {
            seq: 4,
            customer_type: CustomerType::Corporate,
            display_name: "Green Valley Farms LLC",
            personal: None,
            company: Some(("Green Valley Farms LLC", "Agriculture")),
            email: "office@greenvalleyfarms.com",
            phone: "+1-555-0321",
            status: CustomerStatus::Active,
            kyc: KycStatus::Verified,
            manager: Some("am-003"),
            scores: (55.0, 70.0, 40.0, 50.0),
            metrics: (18500.0, 3, 0.58),
            created: at(2024, 3, 5, 13),
            updated: at(2024, 4, 2, 10),
            city: "Fresno",
        }),
        build(Seed {
            seq: 5,
            customer_type: CustomerType::Individual,
            display_name: "Emily Rodriguez",
            personal: Some(("Emily", "Rodriguez")),
            company: None,
            email: "emily.r@example.net",
            phone: "+1-555-0654",
            status: CustomerStatus::Suspended,
            kyc: KycStatus::Expired,
            manager: Some("am-002"),
            scores: (80.0, 85.0, 75.0, 70.0),
            metrics: (3600.0, 0, 1.12),
            created: at(2024, 3, 5, 18),
            updated: at(2024, 5, 1, 9),
            city: "Denver",
        }),
        build(Seed {
            seq: 6,
            customer_type: CustomerType::Corporate,
            display_name: "Harbor Logistics Group",
            personal: None,
            company: Some(("Harbor Logistics Group", "Transportation")),
            email: "risk@harborlogistics.com",
            phone: "+1-555-0987",
            status: CustomerStatus::Inactive,
            kyc: KycStatus::Rejected,
            manager: None,
            scores: (60.0, 45.0, 65.0, 80.0),
            metrics: (0.0, 0, 0.0),
            created: at(2024, 4, 12, 11),
            updated: at(2024, 6, 30, 17),
            city: "Seattle",
        }),
        build(Seed {
            seq: 7,
            customer_type: CustomerType::Individual,
            display_name: "David Okafor",
            personal: Some(("David", "Okafor")),
            company: None,
            email: "dokafor@example.com",
            phone: "+1-555-0111",
            status: CustomerStatus::Active,
            kyc: KycStatus::Verified,
            manager: Some("am-003"),
            scores: (10.0, 5.0, 0.0, 5.0),
            metrics: (5200.0, 3, 0.05),
            created: at(2024, 5, 22, 8),
            updated: at(2024, 5, 22, 8),
            city: "Chicago",
        }),
        build(Seed {
            seq: 8,
            customer_type: CustomerType::Corporate,
            display_name: "Brightline Software Ltd",
            personal: None,
            company: Some(("Brightline Software Ltd", "Information Technology")),
            email: "finance@brightline.io",
            phone: "+1-555-0222",
            status: CustomerStatus::PendingKyc,
            kyc: KycStatus::Pending,
            manager: Some("am-002"),
            scores: (25.0, 10.0, 15.0, 20.0),
            metrics: (9800.0, 2, 0.12),
            created: at(2024, 6, 3, 15),
            updated: at(2024, 6, 3, 15),
            city: "Boston",
        }),
    ]
}
