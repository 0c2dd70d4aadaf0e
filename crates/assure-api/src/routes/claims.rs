//! # Claim API
//!
//! Create, get, and list claims. The referenced policy and customer are not
//! checked.

use assure_core::{Claim, ClaimStatus, FieldError, NewClaim};
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
use crate::routes::policies::parse_status_filter;
use crate::state::AppState;

/// Request to file a claim.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateClaimRequest {
    pub policy_id: Uuid,
    pub customer_id: Uuid,
    pub amount_claimed: f64,
    pub description: String,
    pub incident_date: NaiveDate,
}

impl Validate for CreateClaimRequest {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        check_amount(&mut errors, "amountClaimed", self.amount_claimed);
        check_text(&mut errors, "description", &self.description, 5_000);
        if self.incident_date > Utc::now().date_naive() {
            errors.push(FieldError::new("incidentDate", "must not be in the future"));
        }
        errors
    }
}

/// Filters for the claim list.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ClaimListParams {
    pub customer_id: Option<Uuid>,
    pub policy_id: Option<Uuid>,
    /// Submitted, Under_Review, Approved, Rejected, Settled, or All.
    pub status: Option<String>,
}

/// Build the claims router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/claims", get(list_claims).post(create_claim))
        .route("/v1/claims/{id}", get(get_claim))
}

/// POST /v1/claims: File a claim in `Submitted`.
#[utoipa::path(
    post,
    path = "/v1/claims",
    request_body = CreateClaimRequest,
    responses(
        (status = 201, description = "Claim filed", body = serde_json::Value),
        (status = 400, description = "Invalid request", body = crate::error::ErrorBody),
    ),
    tag = "claims"
)]
pub(crate) async fn create_claim(
    State(state): State<AppState>,
    body: Result<Json<CreateClaimRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Claim>), AppError> {
    let req = extract_validated_json(body)?;
    let input = NewClaim {
        policy_id: req.policy_id,
        customer_id: req.customer_id,
        amount_claimed: req.amount_claimed,
        description: req.description.trim().to_string(),
        incident_date: req.incident_date,
    };
    let claim = Claim::new(input, state.next_claim_number(), Utc::now());
    state.claims.insert(claim.id, claim.clone());
    tracing::info!(
        claim_id = %claim.id,
        claim_number = %claim.claim_number,
        policy_id = %claim.policy_id,
        "claim filed"
    );
    Ok((StatusCode::CREATED, Json(claim)))
}

/// GET /v1/claims: List claims, ordered by claim number.
#[utoipa::path(
    get,
    path = "/v1/claims",
    params(ClaimListParams),
    responses(
        (status = 200, description = "Claims", body = serde_json::Value),
        (status = 400, description = "Invalid filter", body = crate::error::ErrorBody),
    ),
    tag = "claims"
)]
pub(crate) async fn list_claims(
    State(state): State<AppState>,
    params: Result<Query<ClaimListParams>, QueryRejection>,
) -> Result<Json<Vec<Claim>>, AppError> {
    let params = extract_query(params)?;
    let status: Option<ClaimStatus> = parse_status_filter(params.status.as_deref())?;
    let mut claims: Vec<Claim> = state
        .claims
        .list()
        .into_iter()
        .filter(|c| params.customer_id.map_or(true, |id| c.customer_id == id))
        .filter(|c| params.policy_id.map_or(true, |id| c.policy_id == id))
        .filter(|c| status.map_or(true, |s| c.status == s))
        .collect();
    claims.sort_by(|a, b| a.claim_number.cmp(&b.claim_number));
    Ok(Json(claims))
}

/// GET /v1/claims/{id}: Get a claim.
#[utoipa::path(
    get,
    path = "/v1/claims/{id}",
    params(("id" = Uuid, Path, description = "Claim ID")),
    responses(
        (status = 200, description = "Claim found", body = serde_json::Value),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    tag = "claims"
)]
pub(crate) async fn get_claim(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Claim>, AppError> {
    state
        .claims
        .get(&id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("claim {id} not found")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn future_incident_rejected() {
        let req = CreateClaimRequest {
            policy_id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            amount_claimed: 100.0,
            description: "Hail damage".into(),
            incident_date: Utc::now().date_naive() + chrono::Days::new(3),
        };
        let errors = req.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "incidentDate");
    }

    #[test]
    fn blank_description_rejected() {
        let req = CreateClaimRequest {
            policy_id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            amount_claimed: 100.0,
            description: "   ".into(),
            incident_date: Utc::now().date_naive(),
        };
        assert_eq!(req.validate()[0].field, "description");
    }
}
