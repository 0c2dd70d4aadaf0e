//! # Customer Query Pipeline
//!
//! Filter → sort → paginate over an in-memory customer collection.
//!
//! [`run`] is a pure function of `(collection, query)`: it never mutates the
//! collection and cannot fail once a [`CustomerQuery`] has been built. All
//! string parsing (the `All` sentinel, unknown sort keys, non-numeric page
//! numbers) happens in [`RawCustomerQuery::parse`], which both the HTTP API
//! and the CLI call before reaching the pipeline.
//!
//! ## Ordering
//!
//! Strings compare with the root Unicode collation (see [`locale_cmp`]), numbers
//! numerically, timestamps by epoch milliseconds. Ascending keeps the
//! natural order; descending reverses it. Records with equal sort keys are
//! ordered by customer number ascending in both directions, so pages are
//! stable across calls.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use feruca::Collator;
use serde::{Deserialize, Serialize};

use crate::customer::{Customer, CustomerStatus, CustomerType, KycStatus};
use crate::error::{CoreError, FieldError};
use crate::risk::RiskCategory;
use crate::temporal::{parse_lower_bound, parse_upper_bound};

/// Default page number.
pub const DEFAULT_PAGE: u32 = 1;
/// Default page size.
pub const DEFAULT_LIMIT: u32 = 20;
/// Largest accepted page size.
pub const MAX_LIMIT: u32 = 100;

/// Sentinel meaning "do not filter on this field".
pub const ALL: &str = "All";

// -- Sorting ------------------------------------------------------------------

/// Field to sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    DisplayName,
    #[default]
    CreatedAt,
    UpdatedAt,
    TotalPremium,
    /// Fallback for unrecognized sort keys.
    CustomerNumber,
}

impl SortField {
    /// Map a wire sort key. Unrecognized keys sort by customer number.
    pub fn parse_lenient(s: &str) -> Self {
        match s {
            "displayName" => Self::DisplayName,
            "createdAt" => Self::CreatedAt,
            "updatedAt" => Self::UpdatedAt,
            "totalPremium" => Self::TotalPremium,
            _ => Self::CustomerNumber,
        }
    }

    /// Return the wire key for this field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DisplayName => "displayName",
            Self::CreatedAt => "createdAt",
            Self::UpdatedAt => "updatedAt",
            Self::TotalPremium => "totalPremium",
            Self::CustomerNumber => "customerNumber",
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Exactly `asc` is ascending; anything else is descending.
    pub fn parse_lenient(s: &str) -> Self {
        if s == "asc" {
            Self::Asc
        } else {
            Self::Desc
        }
    }

    /// Return the wire value for this direction.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Locale-aware string comparison using the root Unicode collation at
/// tertiary strength: base letters first, then accents, then case with
/// lowercase before uppercase.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    Collator::default().collate(a, b)
}

fn compare_by(a: &Customer, b: &Customer, field: SortField, collator: &mut Collator) -> Ordering {
    match field {
        SortField::DisplayName => {
            collator.collate(a.display_name.as_str(), b.display_name.as_str())
        }
        SortField::CreatedAt => a
            .created_at
            .timestamp_millis()
            .cmp(&b.created_at.timestamp_millis()),
        SortField::UpdatedAt => a
            .updated_at
            .timestamp_millis()
            .cmp(&b.updated_at.timestamp_millis()),
        SortField::TotalPremium => a.metrics.total_premium.total_cmp(&b.metrics.total_premium),
        SortField::CustomerNumber => a.customer_number.cmp(&b.customer_number),
    }
}

// -- Pagination ---------------------------------------------------------------

/// Validated page number and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Build a page request; `page >= 1` and `1 <= limit <= MAX_LIMIT`.
    pub fn new(page: u32, limit: u32) -> Result<Self, CoreError> {
        Ok(Self {
            page: Self::check_page(page)?,
            limit: Self::check_limit(limit)?,
        })
    }

    fn check_page(page: u32) -> Result<u32, CoreError> {
        if page < 1 {
            return Err(CoreError::InvalidPagination {
                field: "page",
                message: "must be at least 1".to_string(),
            });
        }
        Ok(page)
    }

    fn check_limit(limit: u32) -> Result<u32, CoreError> {
        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(CoreError::InvalidPagination {
                field: "limit",
                message: format!("must be between 1 and {MAX_LIMIT}"),
            });
        }
        Ok(limit)
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Zero-based index of the first record on this page.
    pub fn offset(&self) -> usize {
        (self.page as usize - 1) * self.limit as usize
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Pagination metadata returned with every page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: usize,
    pub total_pages: usize,
}

/// One page of results plus totals.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPage<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

// -- Filters ------------------------------------------------------------------

/// Typed filters. `None` means the filter is inactive (`All`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CustomerFilters {
    /// Lowercased search term.
    pub search: Option<String>,
    pub customer_type: Option<CustomerType>,
    pub status: Option<CustomerStatus>,
    pub kyc_status: Option<KycStatus>,
    pub risk_category: Option<RiskCategory>,
    pub account_manager: Option<String>,
    pub industry: Option<String>,
    pub created_from: Option<DateTime<Utc>>,
    /// Already normalized to end of day.
    pub created_to: Option<DateTime<Utc>>,
}

fn contains_term(field: &str, term: &str) -> bool {
    field.to_lowercase().contains(term)
}

impl CustomerFilters {
    /// Set the search term, lowercasing it. An empty term disables search.
    pub fn with_search(mut self, term: &str) -> Self {
        self.search = (!term.is_empty()).then(|| term.to_lowercase());
        self
    }

    fn matches_search(&self, c: &Customer) -> bool {
        let Some(term) = self.search.as_deref() else {
            return true;
        };
        let personal = c.personal_info.as_ref();
        contains_term(&c.display_name, term)
            || contains_term(&c.primary_email, term)
            || c.primary_phone
                .as_deref()
                .is_some_and(|p| contains_term(p, term))
            || contains_term(c.customer_number.as_str(), term)
            || c.company_name().is_some_and(|n| contains_term(n, term))
            || personal.is_some_and(|p| contains_term(&p.first_name, term))
            || personal.is_some_and(|p| contains_term(&p.last_name, term))
    }

    /// Whether a customer satisfies every active filter.
    pub fn matches(&self, c: &Customer) -> bool {
        if !self.matches_search(c) {
            return false;
        }
        if self.customer_type.is_some_and(|t| c.customer_type != t) {
            return false;
        }
        if self.status.is_some_and(|s| c.status != s) {
            return false;
        }
        if self.kyc_status.is_some_and(|k| c.kyc_status != k) {
            return false;
        }
        if self
            .risk_category
            .is_some_and(|r| c.risk_profile.category != r)
        {
            return false;
        }
        if let Some(ref manager) = self.account_manager {
            if c.account_manager_id.as_deref() != Some(manager.as_str()) {
                return false;
            }
        }
        // Industry only narrows corporate records.
        if let Some(ref industry) = self.industry {
            if c.customer_type == CustomerType::Corporate
                && c.industry() != Some(industry.as_str())
            {
                return false;
            }
        }
        if self.created_from.is_some_and(|from| c.created_at < from) {
            return false;
        }
        if self.created_to.is_some_and(|to| c.created_at > to) {
            return false;
        }
        true
    }
}

/// A fully parsed customer query.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CustomerQuery {
    pub filters: CustomerFilters,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
    pub page: PageRequest,
}

/// Run the pipeline: filter, sort, paginate.
pub fn run(customers: &[Customer], query: &CustomerQuery) -> QueryPage<Customer> {
    let mut matched: Vec<&Customer> = customers
        .iter()
        .filter(|c| query.filters.matches(c))
        .collect();

    let mut collator = Collator::default();
    matched.sort_by(|a, b| {
        let natural = compare_by(a, b, query.sort_by, &mut collator);
        let directed = match query.sort_order {
            SortOrder::Asc => natural,
            SortOrder::Desc => natural.reverse(),
        };
        directed.then_with(|| a.customer_number.cmp(&b.customer_number))
    });

    let total = matched.len();
    let limit = query.page.limit() as usize;
    let items = matched
        .into_iter()
        .skip(query.page.offset())
        .take(limit)
        .cloned()
        .collect();

    QueryPage {
        items,
        pagination: Pagination {
            page: query.page.page(),
            limit: query.page.limit(),
            total,
            total_pages: total.div_ceil(limit),
        },
    }
}

// -- Boundary parsing ---------------------------------------------------------

/// Query parameters as they arrive on the wire, all optional strings.
///
/// Deserializes from an HTTP query string (`?type=Corporate&page=2`) and is
/// also built by the CLI from its flags.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCustomerQuery {
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub customer_type: Option<String>,
    pub status: Option<String>,
    pub kyc_status: Option<String>,
    pub risk_category: Option<String>,
    pub account_manager: Option<String>,
    pub industry: Option<String>,
    pub created_date_from: Option<String>,
    pub created_date_to: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Parse an enum filter, treating absent, blank, and `All` as inactive.
fn parse_enum_filter<T>(
    field: &str,
    value: Option<&str>,
    errors: &mut Vec<FieldError>,
) -> Option<T>
where
    T: std::str::FromStr<Err = CoreError>,
{
    let value = value.map(str::trim).filter(|v| !v.is_empty() && *v != ALL)?;
    match value.parse() {
        Ok(v) => Some(v),
        Err(e) => {
            errors.push(FieldError::new(field, e.to_string()));
            None
        }
    }
}

fn parse_text_filter(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != ALL)
        .map(str::to_string)
}

fn parse_number(
    field: &str,
    value: Option<&str>,
    default: u32,
    errors: &mut Vec<FieldError>,
) -> u32 {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => default,
        Some(v) => v.parse().unwrap_or_else(|_| {
            errors.push(FieldError::new(
                field,
                format!("must be a positive integer, got {v:?}"),
            ));
            default
        }),
    }
}

impl RawCustomerQuery {
    /// Validate and type every parameter.
    ///
    /// Collects every field failure rather than stopping at the first, so the
    /// caller can report them all at once.
    pub fn parse(&self) -> Result<CustomerQuery, Vec<FieldError>> {
        let mut errors = Vec::new();

        let mut filters = CustomerFilters::default()
            .with_search(self.search.as_deref().unwrap_or_default());
        filters.customer_type =
            parse_enum_filter("type", self.customer_type.as_deref(), &mut errors);
        filters.status = parse_enum_filter("status", self.status.as_deref(), &mut errors);
        filters.kyc_status =
            parse_enum_filter("kycStatus", self.kyc_status.as_deref(), &mut errors);
        filters.risk_category =
            parse_enum_filter("riskCategory", self.risk_category.as_deref(), &mut errors);
        filters.account_manager = parse_text_filter(self.account_manager.as_deref());
        filters.industry = parse_text_filter(self.industry.as_deref());

        if let Some(from) = self.created_date_from.as_deref().filter(|s| !s.trim().is_empty()) {
            match parse_lower_bound(from) {
                Ok(dt) => filters.created_from = Some(dt),
                Err(e) => errors.push(FieldError::new("createdDateFrom", e.to_string())),
            }
        }
        if let Some(to) = self.created_date_to.as_deref().filter(|s| !s.trim().is_empty()) {
            match parse_upper_bound(to) {
                Ok(dt) => filters.created_to = Some(dt),
                Err(e) => errors.push(FieldError::new("createdDateTo", e.to_string())),
            }
        }

        let sort_by = self
            .sort_by
            .as_deref()
            .map(SortField::parse_lenient)
            .unwrap_or_default();
        let sort_order = self
            .sort_order
            .as_deref()
            .map(SortOrder::parse_lenient)
            .unwrap_or_default();

        let page = parse_number("page", self.page.as_deref(), DEFAULT_PAGE, &mut errors);
        let limit = parse_number("limit", self.limit.as_deref(), DEFAULT_LIMIT, &mut errors);
        // Page and limit are reported independently.
        let page_request = match (PageRequest::check_page(page), PageRequest::check_limit(limit)) {
            (Ok(page), Ok(limit)) => PageRequest { page, limit },
            (page, limit) => {
                errors.extend(page.err().into_iter().chain(limit.err()).map(FieldError::from));
                PageRequest::default()
            }
        };

        if errors.is_empty() {
            Ok(CustomerQuery {
                filters,
                sort_by,
                sort_order,
                page: page_request,
            })
        } else {
            Err(errors)
        }
    }
}

/// Normalized filters echoed back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterEcho {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub customer_type: String,
    pub status: String,
    pub kyc_status: String,
    pub risk_category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_manager: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_date_from: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_date_to: Option<DateTime<Utc>>,
    pub sort_by: String,
    pub sort_order: String,
}

fn or_all<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| ALL.to_string(), |v| v.to_string())
}

impl CustomerQuery {
    /// The filters as they were applied, for echoing in responses.
    pub fn echo(&self) -> FilterEcho {
        let f = &self.filters;
        FilterEcho {
            search: f.search.clone(),
            customer_type: or_all(f.customer_type),
            status: or_all(f.status),
            kyc_status: or_all(f.kyc_status),
            risk_category: or_all(f.risk_category),
            account_manager: f.account_manager.clone(),
            industry: f.industry.clone(),
            created_date_from: f.created_from,
            created_date_to: f.created_to,
            sort_by: self.sort_by.as_str().to_string(),
            sort_order: self.sort_order.as_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample;

    fn raw(pairs: &[(&str, &str)]) -> RawCustomerQuery {
        let json: serde_json::Map<String, serde_json::Value> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
            .collect();
        serde_json::from_value(serde_json::Value::Object(json)).unwrap()
    }

    fn query(pairs: &[(&str, &str)]) -> CustomerQuery {
        raw(pairs).parse().unwrap()
    }

    #[test]
    fn premium_ascending_first_page_of_one() {
        let customers = sample::two_customers();
        let page = run(
            &customers,
            &query(&[
                ("sortBy", "totalPremium"),
                ("sortOrder", "asc"),
                ("page", "1"),
                ("limit", "1"),
            ]),
        );
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].metrics.total_premium, 2400.0);
        assert_eq!(page.pagination.total, 2);
        assert_eq!(page.pagination.total_pages, 2);
    }

    #[test]
    fn corporate_industry_filter_selects_techcorp() {
        let customers = sample::two_customers();
        let page = run(
            &customers,
            &query(&[("type", "Corporate"), ("industry", "Information Technology")]),
        );
        assert_eq!(page.pagination.total, 1);
        assert_eq!(page.items[0].company_name(), Some("TechCorp Solutions Inc."));
    }

    #[test]
    fn industry_filter_never_excludes_individuals() {
        let customers = sample::two_customers();
        let page = run(&customers, &query(&[("industry", "Agriculture")]));
        assert_eq!(page.pagination.total, 1);
        assert_eq!(page.items[0].customer_type, CustomerType::Individual);
    }

    #[test]
    fn search_is_case_insensitive() {
        let customers = sample::customers();
        let page = run(&customers, &query(&[("search", "sarah")]));
        assert_eq!(page.pagination.total, 1);
        assert_eq!(page.items[0].display_name, "Sarah Johnson");

        let upper = run(&customers, &query(&[("search", "SARAH")]));
        assert_eq!(upper.items, page.items);
    }

    #[test]
    fn search_matches_customer_number_and_email() {
        let customers = sample::customers();
        let target = &customers[2];
        let by_number = run(
            &customers,
            &query(&[("search", &target.customer_number.as_str().to_lowercase())]),
        );
        assert_eq!(by_number.items.len(), 1);
        assert_eq!(by_number.items[0].id, target.id);

        let by_email = run(&customers, &query(&[("search", &target.primary_email)]));
        assert!(by_email.items.iter().any(|c| c.id == target.id));
    }

    #[test]
    fn all_sentinel_disables_filters() {
        let customers = sample::customers();
        let page = run(
            &customers,
            &query(&[
                ("type", "All"),
                ("status", "All"),
                ("kycStatus", "All"),
                ("riskCategory", "All"),
                ("limit", "100"),
            ]),
        );
        assert_eq!(page.pagination.total, customers.len());
    }

    #[test]
    fn created_to_includes_whole_day() {
        let customers = sample::customers();
        let target = customers
            .iter()
            .min_by_key(|c| c.created_at)
            .unwrap()
            .clone();
        let day = target.created_at.date_naive().to_string();
        let page = run(
            &customers,
            &query(&[("createdDateFrom", &day), ("createdDateTo", &day)]),
        );
        assert!(page.items.iter().any(|c| c.id == target.id));
        for c in &page.items {
            assert_eq!(c.created_at.date_naive(), target.created_at.date_naive());
        }
    }

    #[test]
    fn default_sort_is_created_at_descending() {
        let customers = sample::customers();
        let page = run(&customers, &query(&[("limit", "100")]));
        let stamps: Vec<_> = page.items.iter().map(|c| c.created_at).collect();
        let mut sorted = stamps.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(stamps, sorted);
    }

    #[test]
    fn unknown_sort_key_falls_back_to_customer_number() {
        let customers = sample::customers();
        let page = run(
            &customers,
            &query(&[("sortBy", "favouriteColour"), ("sortOrder", "asc"), ("limit", "100")]),
        );
        let numbers: Vec<_> = page
            .items
            .iter()
            .map(|c| c.customer_number.as_str().to_string())
            .collect();
        let mut sorted = numbers.clone();
        sorted.sort();
        assert_eq!(numbers, sorted);
        assert_eq!(query(&[("sortBy", "nope")]).echo().sort_by, "customerNumber");
    }

    #[test]
    fn page_past_the_end_is_empty_with_totals() {
        let customers = sample::two_customers();
        let page = run(&customers, &query(&[("page", "5"), ("limit", "1")]));
        assert!(page.items.is_empty());
        assert_eq!(page.pagination.total, 2);
        assert_eq!(page.pagination.total_pages, 2);
    }

    #[test]
    fn empty_collection_returns_empty_page() {
        let page = run(&[], &CustomerQuery::default());
        assert!(page.items.is_empty());
        assert_eq!(page.pagination.total, 0);
        assert_eq!(page.pagination.total_pages, 0);
    }

    #[test]
    fn run_does_not_mutate_input() {
        let customers = sample::customers();
        let before = customers.clone();
        let _ = run(&customers, &query(&[("sortBy", "displayName")]));
        assert_eq!(customers, before);
    }

    #[test]
    fn malformed_parameters_are_all_reported() {
        let errors = raw(&[
            ("page", "two"),
            ("limit", "0"),
            ("type", "Partnership"),
            ("createdDateTo", "yesterday"),
        ])
        .parse()
        .unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"page"));
        assert!(fields.contains(&"limit"));
        assert!(fields.contains(&"type"));
        assert!(fields.contains(&"createdDateTo"));
    }

    #[test]
    fn page_zero_rejected() {
        let errors = raw(&[("page", "0")]).parse().unwrap_err();
        assert_eq!(errors[0].field, "page");
    }

    #[test]
    fn limit_above_max_rejected() {
        let errors = raw(&[("limit", "101")]).parse().unwrap_err();
        assert_eq!(errors[0].field, "limit");
    }

    #[test]
    fn sort_order_matches_wire_value_exactly() {
        assert_eq!(SortOrder::parse_lenient("asc"), SortOrder::Asc);
        assert_eq!(SortOrder::parse_lenient("ASC"), SortOrder::Desc);
        assert_eq!(SortOrder::parse_lenient(" asc"), SortOrder::Desc);
        assert_eq!(SortOrder::parse_lenient("sideways"), SortOrder::Desc);
    }

    #[test]
    fn locale_cmp_orders_case_with_lowercase_first() {
        assert_eq!(locale_cmp("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_cmp("Zeta", "alpha"), Ordering::Greater);
        assert_eq!(locale_cmp("apple", "Apple"), Ordering::Less);
        assert_eq!(locale_cmp("same", "same"), Ordering::Equal);
    }

    #[test]
    fn locale_cmp_places_accented_letters_with_their_base() {
        assert_eq!(locale_cmp("Émile Dubois", "Zach Adams"), Ordering::Less);
        assert_eq!(locale_cmp("Ølsen", "Peters"), Ordering::Less);
        assert_eq!(locale_cmp("Ângela", "Bruno"), Ordering::Less);
    }

    #[test]
    fn display_name_sort_handles_accents() {
        let mut customers = sample::two_customers();
        customers[0].display_name = "Zach Adams".into();
        customers[1].display_name = "Émile Dubois".into();
        let page = run(
            &customers,
            &query(&[("sortBy", "displayName"), ("sortOrder", "asc")]),
        );
        let names: Vec<&str> = page.items.iter().map(|c| c.display_name.as_str()).collect();
        assert_eq!(names, vec!["Émile Dubois", "Zach Adams"]);
    }

    #[test]
    fn search_term_is_used_verbatim() {
        assert_eq!(CustomerFilters::default().with_search("").search, None);
        assert_eq!(
            CustomerFilters::default().with_search(" Sarah ").search.as_deref(),
            Some(" sarah ")
        );
        let customers = sample::two_customers();
        assert_eq!(run(&customers, &query(&[("search", " sarah ")])).pagination.total, 0);
    }

    #[test]
    fn page_request_rejects_out_of_range() {
        match PageRequest::new(0, 10) {
            Err(CoreError::InvalidPagination { field, .. }) => assert_eq!(field, "page"),
            other => panic!("expected page error, got {other:?}"),
        }
        match PageRequest::new(1, MAX_LIMIT + 1) {
            Err(CoreError::InvalidPagination { field, .. }) => assert_eq!(field, "limit"),
            other => panic!("expected limit error, got {other:?}"),
        }
        assert_eq!(PageRequest::new(3, 25).unwrap().offset(), 50);
    }

    #[test]
    fn page_and_limit_errors_reported_together() {
        let errors = raw(&[("page", "0"), ("limit", "500")]).parse().unwrap_err();
        assert_eq!(
            errors,
            vec![
                FieldError::new("page", "must be at least 1"),
                FieldError::new("limit", format!("must be between 1 and {MAX_LIMIT}")),
            ]
        );
    }

    #[test]
    fn echo_reports_all_for_inactive_filters() {
        let echo = query(&[("status", "Active")]).echo();
        assert_eq!(echo.status, "Active");
        assert_eq!(echo.customer_type, ALL);
        assert_eq!(echo.sort_by, "createdAt");
        assert_eq!(echo.sort_order, "desc");
    }
}
