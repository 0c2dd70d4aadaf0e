//! # API Route Modules
//!
//! - `customers`: query pipeline, lifecycle, bulk actions, risk, notes,
//!   and activity.
//! - `dashboard`: portfolio summary.
//! - `policies`: policy create/get/list.
//! - `claims`: claim create/get/list.

pub mod claims;
pub mod customers;
pub mod dashboard;
pub mod policies;
