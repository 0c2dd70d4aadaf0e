//! # Customer API
//!
//! Customer query pipeline, lifecycle (create, update, soft delete), bulk
//! status changes, risk rescoring, staff notes, and the activity log.

use std::collections::HashSet;

use assure_core::bulk::{self, BulkAction, BulkFailure, BulkOutcome};
use assure_core::query::{self, FilterEcho, Pagination, RawCustomerQuery};
use assure_core::{
    ActivityEntry, Address, CompanyInfo, Contact, Customer, CustomerMetrics, CustomerStatus,
    CustomerType, CustomerUpdate, FieldError, KycStatus, NewCustomer, Note, PersonalInfo,
    RiskProfile,
};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::AppError;
use crate::extractors::{
    check_amount, check_email, check_text, extract_customer_query, extract_validated_json,
    Validate,
};
use crate::state::AppState;

const MAX_NAME_LEN: usize = 200;
const MAX_SHORT_LEN: usize = 64;
const MAX_NOTE_LEN: usize = 5_000;
/// Largest number of ids accepted by one bulk request.
pub const MAX_BULK_IDS: usize = 500;

// -- Request / response types -------------------------------------------------

/// Request to create a customer.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateCustomerRequest {
    /// "Individual" or "Corporate".
    #[schema(value_type = String)]
    pub customer_type: CustomerType,
    /// Derived from the naming fields when omitted.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Required for Individual customers.
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub personal_info: Option<PersonalInfo>,
    /// Required for Corporate customers.
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub company_info: Option<CompanyInfo>,
    pub primary_email: String,
    #[serde(default)]
    pub primary_phone: Option<String>,
    #[serde(default)]
    pub account_manager_id: Option<String>,
    #[serde(default)]
    #[schema(value_type = Vec<Object>)]
    pub contacts: Vec<Contact>,
    #[serde(default)]
    #[schema(value_type = Vec<Object>)]
    pub addresses: Vec<Address>,
}

fn check_personal(errors: &mut Vec<FieldError>, info: &PersonalInfo) {
    check_text(errors, "personalInfo.firstName", &info.first_name, MAX_NAME_LEN);
    check_text(errors, "personalInfo.lastName", &info.last_name, MAX_NAME_LEN);
}

fn check_company(errors: &mut Vec<FieldError>, info: &CompanyInfo) {
    check_text(errors, "companyInfo.companyName", &info.company_name, MAX_NAME_LEN);
}

fn check_contacts(errors: &mut Vec<FieldError>, contacts: &[Contact]) {
    for (i, contact) in contacts.iter().enumerate() {
        check_text(errors, &format!("contacts[{i}].name"), &contact.name, MAX_NAME_LEN);
        if let Some(ref email) = contact.email {
            check_email(errors, &format!("contacts[{i}].email"), email);
        }
    }
}

fn check_addresses(errors: &mut Vec<FieldError>, addresses: &[Address]) {
    for (i, address) in addresses.iter().enumerate() {
        check_text(errors, &format!("addresses[{i}].line1"), &address.line1, MAX_NAME_LEN);
        check_text(errors, &format!("addresses[{i}].city"), &address.city, MAX_NAME_LEN);
        check_text(errors, &format!("addresses[{i}].country"), &address.country, MAX_SHORT_LEN);
    }
}

impl Validate for CreateCustomerRequest {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        check_email(&mut errors, "primaryEmail", &self.primary_email);
        if let Some(ref name) = self.display_name {
            check_text(&mut errors, "displayName", name, MAX_NAME_LEN);
        }
        if let Some(ref phone) = self.primary_phone {
            check_text(&mut errors, "primaryPhone", phone, MAX_SHORT_LEN);
        }
        if let Some(ref manager) = self.account_manager_id {
            check_text(&mut errors, "accountManagerId", manager, MAX_SHORT_LEN);
        }
        match self.customer_type {
            CustomerType::Individual => match self.personal_info {
                Some(ref info) => check_personal(&mut errors, info),
                None => errors.push(FieldError::new(
                    "personalInfo",
                    "required for Individual customers",
                )),
            },
            CustomerType::Corporate => match self.company_info {
                Some(ref info) => check_company(&mut errors, info),
                None => errors.push(FieldError::new(
                    "companyInfo",
                    "required for Corporate customers",
                )),
            },
        }
        check_contacts(&mut errors, &self.contacts);
        check_addresses(&mut errors, &self.addresses);
        errors
    }
}

impl From<CreateCustomerRequest> for NewCustomer {
    fn from(req: CreateCustomerRequest) -> Self {
        Self {
            customer_type: req.customer_type,
            display_name: req.display_name,
            personal_info: req.personal_info,
            company_info: req.company_info,
            primary_email: req.primary_email.trim().to_string(),
            primary_phone: req.primary_phone,
            account_manager_id: req.account_manager_id,
            contacts: req.contacts,
            addresses: req.addresses,
        }
    }
}

/// Shallow-merge update. Omitted fields are left unchanged; present fields
/// replace the stored value wholesale.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateCustomerRequest {
    pub display_name: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub personal_info: Option<PersonalInfo>,
    #[schema(value_type = Option<Object>)]
    pub company_info: Option<CompanyInfo>,
    pub primary_email: Option<String>,
    pub primary_phone: Option<String>,
    #[schema(value_type = Option<String>)]
    pub status: Option<CustomerStatus>,
    #[schema(value_type = Option<String>)]
    pub kyc_status: Option<KycStatus>,
    pub account_manager_id: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub metrics: Option<CustomerMetrics>,
    #[schema(value_type = Option<Vec<Object>>)]
    pub contacts: Option<Vec<Contact>>,
    #[schema(value_type = Option<Vec<Object>>)]
    pub addresses: Option<Vec<Address>>,
}

impl From<UpdateCustomerRequest> for CustomerUpdate {
    fn from(req: UpdateCustomerRequest) -> Self {
        Self {
            display_name: req.display_name.map(|n| n.trim().to_string()),
            personal_info: req.personal_info,
            company_info: req.company_info,
            primary_email: req.primary_email.map(|e| e.trim().to_string()),
            primary_phone: req.primary_phone,
            status: req.status,
            kyc_status: req.kyc_status,
            account_manager_id: req.account_manager_id,
            metrics: req.metrics,
            contacts: req.contacts,
            addresses: req.addresses,
        }
    }
}

impl Validate for UpdateCustomerRequest {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if let Some(ref name) = self.display_name {
            check_text(&mut errors, "displayName", name, MAX_NAME_LEN);
        }
        if let Some(ref info) = self.personal_info {
            check_personal(&mut errors, info);
        }
        if let Some(ref info) = self.company_info {
            check_company(&mut errors, info);
        }
        if let Some(ref email) = self.primary_email {
            check_email(&mut errors, "primaryEmail", email);
        }
        if let Some(ref phone) = self.primary_phone {
            check_text(&mut errors, "primaryPhone", phone, MAX_SHORT_LEN);
        }
        if let Some(ref manager) = self.account_manager_id {
            check_text(&mut errors, "accountManagerId", manager, MAX_SHORT_LEN);
        }
        if let Some(ref metrics) = self.metrics {
            check_amount(&mut errors, "metrics.totalPremium", metrics.total_premium);
            check_amount(&mut errors, "metrics.claimRatio", metrics.claim_ratio);
        }
        if let Some(ref contacts) = self.contacts {
            check_contacts(&mut errors, contacts);
        }
        if let Some(ref addresses) = self.addresses {
            check_addresses(&mut errors, addresses);
        }
        errors
    }
}

/// Response for the customer list endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct CustomerListResponse {
    #[schema(value_type = Vec<Object>)]
    pub customers: Vec<Customer>,
    #[schema(value_type = Object)]
    pub pagination: Pagination,
    /// The filters as applied, with `All` for inactive enum filters.
    #[schema(value_type = Object)]
    pub filters: FilterEcho,
}

/// Request to apply one action to many customers.
///
/// The action is flattened into the body:
/// `{"customerIds": [...], "action": "assignManager", "managerId": "am-007"}`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkActionRequest {
    pub customer_ids: Vec<Uuid>,
    /// One of activate, deactivate, suspend, assignManager, setKycStatus.
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub action: BulkAction,
}

impl Validate for BulkActionRequest {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.customer_ids.is_empty() {
            errors.push(FieldError::new("customerIds", "must not be empty"));
        } else if self.customer_ids.len() > MAX_BULK_IDS {
            errors.push(FieldError::new(
                "customerIds",
                format!("must not exceed {MAX_BULK_IDS} ids"),
            ));
        }
        if let BulkAction::AssignManager { ref manager_id } = self.action {
            check_text(&mut errors, "managerId", manager_id, MAX_SHORT_LEN);
        }
        errors
    }
}

/// Per-id result of a bulk action.
#[derive(Debug, Serialize, ToSchema)]
pub struct BulkActionResponse {
    pub action: String,
    pub succeeded: Vec<Uuid>,
    #[schema(value_type = Vec<Object>)]
    pub failed: Vec<BulkFailure>,
}

/// Risk sub-scores, each 0–100.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RiskScoresRequest {
    pub credit_score: f64,
    pub claims_score: f64,
    pub fraud_score: f64,
    pub compliance_score: f64,
}

impl Validate for RiskScoresRequest {
    fn validate(&self) -> Vec<FieldError> {
        [
            ("creditScore", self.credit_score),
            ("claimsScore", self.claims_score),
            ("fraudScore", self.fraud_score),
            ("complianceScore", self.compliance_score),
        ]
        .into_iter()
        .filter(|(_, score)| !(0.0..=100.0).contains(score))
        .map(|(field, score)| {
            FieldError::new(field, format!("must be between 0 and 100, got {score}"))
        })
        .collect()
    }
}

/// Staff note to attach to a customer.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct AddNoteRequest {
    pub author: String,
    pub body: String,
}

impl Validate for AddNoteRequest {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        check_text(&mut errors, "author", &self.author, MAX_SHORT_LEN);
        check_text(&mut errors, "body", &self.body, MAX_NOTE_LEN);
        errors
    }
}

// -- Router -------------------------------------------------------------------

/// Build the customers router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/customers", get(list_customers).post(create_customer))
        .route("/v1/customers/bulk", post(bulk_action))
        .route(
            "/v1/customers/{id}",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
        .route("/v1/customers/{id}/risk-profile", put(update_risk_profile))
        .route("/v1/customers/{id}/notes", post(add_note))
        .route("/v1/customers/{id}/activity", get(get_activity))
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("customer {id} not found"))
}

// -- Handlers -----------------------------------------------------------------

/// GET /v1/customers: Filter, sort, and paginate customers.
#[utoipa::path(
    get,
    path = "/v1/customers",
    params(
        ("search" = Option<String>, Query, description = "Case-insensitive substring over name, email, phone, number, company, first and last name"),
        ("type" = Option<String>, Query, description = "Individual, Corporate, or All"),
        ("status" = Option<String>, Query, description = "Active, Inactive, Suspended, Pending_KYC, or All"),
        ("kycStatus" = Option<String>, Query, description = "Pending, In_Progress, Verified, Rejected, Expired, or All"),
        ("riskCategory" = Option<String>, Query, description = "Low, Medium, High, Critical, or All"),
        ("accountManager" = Option<String>, Query, description = "Account manager id"),
        ("industry" = Option<String>, Query, description = "Industry; narrows Corporate customers only"),
        ("createdDateFrom" = Option<String>, Query, description = "Inclusive lower bound (YYYY-MM-DD or RFC 3339)"),
        ("createdDateTo" = Option<String>, Query, description = "Inclusive upper bound, extended to end of day"),
        ("sortBy" = Option<String>, Query, description = "displayName, createdAt (default), updatedAt, totalPremium"),
        ("sortOrder" = Option<String>, Query, description = "asc or desc (default)"),
        ("page" = Option<u32>, Query, description = "Page number, from 1"),
        ("limit" = Option<u32>, Query, description = "Page size, 1 to 100 (default 20)"),
    ),
    responses(
        (status = 200, description = "Page of customers", body = CustomerListResponse),
        (status = 400, description = "Invalid query parameters", body = crate::error::ErrorBody),
    ),
    tag = "customers"
)]
pub(crate) async fn list_customers(
    State(state): State<AppState>,
    params: Result<Query<RawCustomerQuery>, QueryRejection>,
) -> Result<Json<CustomerListResponse>, AppError> {
    let query = extract_customer_query(params)?;
    let snapshot = state.customers.list();
    let page = query::run(&snapshot, &query);
    Ok(Json(CustomerListResponse {
        customers: page.items,
        pagination: page.pagination,
        filters: query.echo(),
    }))
}

/// POST /v1/customers: Create a customer in `Pending_KYC`.
#[utoipa::path(
    post,
    path = "/v1/customers",
    request_body = CreateCustomerRequest,
    responses(
        (status = 201, description = "Customer created", body = serde_json::Value),
        (status = 400, description = "Invalid request", body = crate::error::ErrorBody),
    ),
    tag = "customers"
)]
pub(crate) async fn create_customer(
    State(state): State<AppState>,
    body: Result<Json<CreateCustomerRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Customer>), AppError> {
    let req = extract_validated_json(body)?;
    let customer = Customer::new(req.into(), state.next_customer_number(), Utc::now());
    state.customers.insert(customer.id, customer.clone());
    tracing::info!(
        customer_id = %customer.id,
        customer_number = %customer.customer_number,
        "customer created"
    );
    Ok((StatusCode::CREATED, Json(customer)))
}

/// GET /v1/customers/{id}: Get a customer.
#[utoipa::path(
    get,
    path = "/v1/customers/{id}",
    params(("id" = Uuid, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Customer found", body = serde_json::Value),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "customers"
)]
pub(crate) async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Customer>, AppError> {
    state.customers.get(&id).map(Json).ok_or_else(|| not_found(id))
}

/// PUT /v1/customers/{id}: Shallow-merge update.
#[utoipa::path(
    put,
    path = "/v1/customers/{id}",
    params(("id" = Uuid, Path, description = "Customer ID")),
    request_body = UpdateCustomerRequest,
    responses(
        (status = 200, description = "Customer updated", body = serde_json::Value),
        (status = 400, description = "Invalid request", body = crate::error::ErrorBody),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "customers"
)]
pub(crate) async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Result<Json<UpdateCustomerRequest>, JsonRejection>,
) -> Result<Json<Customer>, AppError> {
    let req = extract_validated_json(body)?;
    let update = CustomerUpdate::from(req);
    if update.is_empty() {
        return Err(AppError::field("body", "at least one field must be provided"));
    }
    let now = Utc::now();
    let updated = state
        .customers
        .update(&id, |c| c.apply_update(update, now))
        .ok_or_else(|| not_found(id))?;
    tracing::info!(customer_id = %id, "customer updated");
    Ok(Json(updated))
}

/// DELETE /v1/customers/{id}: Soft delete. The customer becomes `Inactive`.
#[utoipa::path(
    delete,
    path = "/v1/customers/{id}",
    params(("id" = Uuid, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Customer deactivated", body = serde_json::Value),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "customers"
)]
pub(crate) async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Customer>, AppError> {
    let now = Utc::now();
    let updated = state
        .customers
        .update(&id, |c| c.deactivate(now))
        .ok_or_else(|| not_found(id))?;
    tracing::info!(customer_id = %id, "customer deactivated");
    Ok(Json(updated))
}

/// POST /v1/customers/bulk: Apply one action to many customers.
///
/// Each id is handled independently. Unknown ids are reported as failed;
/// repeated ids are processed once.
#[utoipa::path(
    post,
    path = "/v1/customers/bulk",
    request_body = BulkActionRequest,
    responses(
        (status = 200, description = "Per-id outcome", body = BulkActionResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorBody),
    ),
    tag = "customers"
)]
pub(crate) async fn bulk_action(
    State(state): State<AppState>,
    body: Result<Json<BulkActionRequest>, JsonRejection>,
) -> Result<Json<BulkActionResponse>, AppError> {
    let req = extract_validated_json(body)?;
    let now = Utc::now();
    let mut outcome = BulkOutcome::default();
    let mut seen = HashSet::new();

    for id in req.customer_ids {
        if !seen.insert(id) {
            continue;
        }
        match state.customers.update(&id, |c| bulk::apply(c, &req.action, now)) {
            Some(_) => outcome.succeed(id),
            None => outcome.fail(id, "not found"),
        }
    }

    tracing::info!(
        action = req.action.name(),
        succeeded = outcome.succeeded.len(),
        failed = outcome.failed.len(),
        "bulk action applied"
    );
    Ok(Json(BulkActionResponse {
        action: req.action.name().to_string(),
        succeeded: outcome.succeeded,
        failed: outcome.failed,
    }))
}

/// PUT /v1/customers/{id}/risk-profile: Rescore a customer.
#[utoipa::path(
    put,
    path = "/v1/customers/{id}/risk-profile",
    params(("id" = Uuid, Path, description = "Customer ID")),
    request_body = RiskScoresRequest,
    responses(
        (status = 200, description = "Customer with new risk profile", body = serde_json::Value),
        (status = 400, description = "Score out of range", body = crate::error::ErrorBody),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "customers"
)]
pub(crate) async fn update_risk_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Result<Json<RiskScoresRequest>, JsonRejection>,
) -> Result<Json<Customer>, AppError> {
    let req = extract_validated_json(body)?;
    let profile = RiskProfile::from_scores(
        req.credit_score,
        req.claims_score,
        req.fraud_score,
        req.compliance_score,
    )?;
    let now = Utc::now();
    let updated = state
        .customers
        .update(&id, |c| c.rescore(profile, now))
        .ok_or_else(|| not_found(id))?;
    tracing::info!(
        customer_id = %id,
        category = %updated.risk_profile.category,
        overall = updated.risk_profile.overall_score,
        "risk profile updated"
    );
    Ok(Json(updated))
}

/// POST /v1/customers/{id}/notes: Attach a staff note.
#[utoipa::path(
    post,
    path = "/v1/customers/{id}/notes",
    params(("id" = Uuid, Path, description = "Customer ID")),
    request_body = AddNoteRequest,
    responses(
        (status = 201, description = "Note added", body = serde_json::Value),
        (status = 400, description = "Invalid request", body = crate::error::ErrorBody),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "customers"
)]
pub(crate) async fn add_note(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Result<Json<AddNoteRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Note>), AppError> {
    let req = extract_validated_json(body)?;
    let now = Utc::now();
    let mut note = None;
    state
        .customers
        .update(&id, |c| note = Some(c.add_note(req.author, req.body, now)))
        .ok_or_else(|| not_found(id))?;
    let note = note.ok_or_else(|| AppError::Internal("note was not recorded".into()))?;
    Ok((StatusCode::CREATED, Json(note)))
}

/// GET /v1/customers/{id}/activity: Activity log, oldest first.
#[utoipa::path(
    get,
    path = "/v1/customers/{id}/activity",
    params(("id" = Uuid, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Activity entries", body = serde_json::Value),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "customers"
)]
pub(crate) async fn get_activity(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ActivityEntry>>, AppError> {
    state
        .customers
        .get(&id)
        .map(|c| Json(c.activity_log))
        .ok_or_else(|| not_found(id))
}
