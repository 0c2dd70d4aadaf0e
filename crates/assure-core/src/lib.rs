//! # assure-core: Domain Types for the Assure Customer Service
//!
//! Customer records, risk scoring, policy and claim stubs, and the pure
//! functions the HTTP API and the CLI share: the customer query pipeline,
//! bulk actions, and dashboard aggregation. The crate performs no I/O.
//!
//! ## Design Principles
//!
//! 1. **Newtype identifiers.** [`CustomerNumber`], [`PolicyNumber`], and
//!    [`ClaimNumber`] are distinct types with validated parsers.
//!
//! 2. **Typed filters.** Enum filters are `Option<T>`; the wire value `All`
//!    maps to `None` at the parse boundary in [`query`], so the pipeline
//!    never sees a string it has to interpret.
//!
//! 3. **The query pipeline cannot fail.** [`query::run`] takes a validated
//!    [`query::CustomerQuery`] and borrows the collection immutably.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `assure-*` crates.
//! - No `unsafe` code.
//! - No `.unwrap()` outside tests.

pub mod bulk;
pub mod customer;
pub mod dashboard;
pub mod error;
pub mod identity;
pub mod policy;
pub mod query;
pub mod risk;
pub mod sample;
pub mod temporal;

// Re-export primary types at crate root for ergonomic imports.
pub use bulk::{BulkAction, BulkFailure, BulkOutcome};
pub use customer::{
    ActivityEntry, ActivityKind, Address, CompanyInfo, Contact, Customer, CustomerMetrics,
    CustomerStatus, CustomerType, CustomerUpdate, DocumentRef, KycStatus, NewCustomer, Note,
    PersonalInfo,
};
pub use dashboard::DashboardSummary;
pub use error::{CoreError, FieldError};
pub use identity::{ClaimNumber, CustomerNumber, PolicyNumber};
pub use policy::{Claim, ClaimStatus, NewClaim, NewPolicy, Policy, PolicyStatus};
pub use query::{CustomerFilters, CustomerQuery, PageRequest, Pagination, QueryPage};
pub use risk::{RiskCategory, RiskProfile};
