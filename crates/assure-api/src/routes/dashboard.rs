//! # Dashboard API
//!
//! Portfolio summary over the current customer snapshot.

use assure_core::dashboard::{self, DashboardSummary};
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::state::AppState;

/// Build the dashboard router.
pub fn router() -> Router<AppState> {
    Router::new().route("/v1/dashboard/summary", get(summary))
}

/// GET /v1/dashboard/summary: Counts by status, type, KYC status, and risk
/// category, plus premium and claim totals.
#[utoipa::path(
    get,
    path = "/v1/dashboard/summary",
    responses(
        (status = 200, description = "Dashboard summary", body = serde_json::Value),
    ),
    tag = "dashboard"
)]
pub(crate) async fn summary(State(state): State<AppState>) -> Json<DashboardSummary> {
    Json(dashboard::summarize(&state.customers.list()))
}
