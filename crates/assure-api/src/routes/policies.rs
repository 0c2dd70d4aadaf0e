//! # Policy API
//!
//! Create, get, and list policies. The referenced customer is not checked.

use assure_core::query::ALL;
use assure_core::{FieldError, NewPolicy, Policy, PolicyStatus};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::error::AppError;
use crate::extractors::{check_amount, check_text, extract_query, extract_validated_json, Validate};
use crate::state::AppState;

/// Request to create a policy.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreatePolicyRequest {
    pub customer_id: Uuid,
    /// Product name, e.g. "Home Contents".
    pub product: String,
    pub premium: f64,
    pub sum_insured: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Validate for CreatePolicyRequest {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        check_text(&mut errors, "product", &self.product, 200);
        check_amount(&mut errors, "premium", self.premium);
        check_amount(&mut errors, "sumInsured", self.sum_insured);
        if self.end_date < self.start_date {
            errors.push(FieldError::new("endDate", "must not precede startDate"));
        }
        errors
    }
}

/// Filters for the policy list.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PolicyListParams {
    /// Only policies for this customer.
    pub customer_id: Option<Uuid>,
    /// Draft, Active, Lapsed, Cancelled, Expired, or All.
    pub status: Option<String>,
}

/// Parse an optional status filter; `All` and blank mean no filter.
pub(crate) fn parse_status_filter<T>(value: Option<&str>) -> Result<Option<T>, AppError>
where
    T: std::str::FromStr<Err = assure_core::CoreError>,
{
    match value.map(str::trim).filter(|v| !v.is_empty() && *v != ALL) {
        None => Ok(None),
        Some(v) => v
            .parse()
            .map(Some)
            .map_err(|e: assure_core::CoreError| AppError::field("status", e.to_string())),
    }
}

/// Build the policies router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/policies", get(list_policies).post(create_policy))
        .route("/v1/policies/{id}", get(get_policy))
}

/// POST /v1/policies: Create a policy in `Draft`.
#[utoipa::path(
    post,
    path = "/v1/policies",
    request_body = CreatePolicyRequest,
    responses(
        (status = 201, description = "Policy created", body = serde_json::Value),
        (status = 400, description = "Invalid request", body = crate::error::ErrorBody),
    ),
    tag = "policies"
)]
pub(crate) async fn create_policy(
    State(state): State<AppState>,
    body: Result<Json<CreatePolicyRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Policy>), AppError> {
    let req = extract_validated_json(body)?;
    let input = NewPolicy {
        customer_id: req.customer_id,
        product: req.product.trim().to_string(),
        premium: req.premium,
        sum_insured: req.sum_insured,
        start_date: req.start_date,
        end_date: req.end_date,
    };
    let policy = Policy::new(input, state.next_policy_number(), Utc::now())?;
    state.policies.insert(policy.id, policy.clone());
    tracing::info!(
        policy_id = %policy.id,
        policy_number = %policy.policy_number,
        customer_id = %policy.customer_id,
        "policy created"
    );
    Ok((StatusCode::CREATED, Json(policy)))
}

/// GET /v1/policies: List policies, ordered by policy number.
#[utoipa::path(
    get,
    path = "/v1/policies",
    params(PolicyListParams),
    responses(
        (status = 200, description = "Policies", body = serde_json::Value),
        (status = 400, description = "Invalid filter", body = crate::error::ErrorBody),
    ),
    tag = "policies"
)]
pub(crate) async fn list_policies(
    State(state): State<AppState>,
    params: Result<Query<PolicyListParams>, QueryRejection>,
) -> Result<Json<Vec<Policy>>, AppError> {
    let params = extract_query(params)?;
    let status: Option<PolicyStatus> = parse_status_filter(params.status.as_deref())?;
    let mut policies: Vec<Policy> = state
        .policies
        .list()
        .into_iter()
        .filter(|p| params.customer_id.map_or(true, |id| p.customer_id == id))
        .filter(|p| status.map_or(true, |s| p.status == s))
        .collect();
    policies.sort_by(|a, b| a.policy_number.cmp(&b.policy_number));
    Ok(Json(policies))
}

/// GET /v1/policies/{id}: Get a policy.
#[utoipa::path(
    get,
    path = "/v1/policies/{id}",
    params(("id" = Uuid, Path, description = "Policy ID")),
    responses(
        (status = 200, description = "Policy found", body = serde_json::Value),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "policies"
)]
pub(crate) async fn get_policy(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Policy>, AppError> {
    state
        .policies
        .get(&id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("policy {id} not found")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_filter_parsing() {
        assert_eq!(parse_status_filter::<PolicyStatus>(None).unwrap(), None);
        assert_eq!(parse_status_filter::<PolicyStatus>(Some("All")).unwrap(), None);
        assert_eq!(
            parse_status_filter::<PolicyStatus>(Some("Lapsed")).unwrap(),
            Some(PolicyStatus::Lapsed)
        );
        assert!(parse_status_filter::<PolicyStatus>(Some("Paused")).is_err());
    }

    #[test]
    fn create_request_checks_period_and_amounts() {
        let req: CreatePolicyRequest = serde_json::from_value(serde_json::json!({
            "customerId": Uuid::new_v4(),
            "product": "Motor",
            "premium": -10.0,
            "sumInsured": 1000.0,
            "startDate": "2026-06-01",
            "endDate": "2026-01-01"
        }))
        .unwrap();
        let fields: Vec<String> = req.validate().into_iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["premium", "endDate"]);
    }
}
