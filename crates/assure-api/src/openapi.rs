//! # OpenAPI Specification Assembly
//!
//! Assembles all utoipa-documented routes into a single OpenAPI document,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::state::AppState;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .description(Some(
                            "Static bearer token. Enabled when AUTH_TOKEN is set.",
                        ))
                        .build(),
                ),
            );
        }
    }
}

/// Assembled OpenAPI spec for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Assure API",
        version = "0.1.0",
        description = "Customer management for an insurance back office: customer query pipeline, lifecycle, bulk actions, dashboard, and policy/claim records."
    ),
    paths(
        // Customers
        crate::routes::customers::list_customers,
        crate::routes::customers::create_customer,
        crate::routes::customers::get_customer,
        crate::routes::customers::update_customer,
        crate::routes::customers::delete_customer,
        crate::routes::customers::bulk_action,
        crate::routes::customers::update_risk_profile,
        crate::routes::customers::add_note,
        crate::routes::customers::get_activity,
        // Dashboard
        crate::routes::dashboard::summary,
        // Policies
        crate::routes::policies::create_policy,
        crate::routes::policies::list_policies,
        crate::routes::policies::get_policy,
        // Claims
        crate::routes::claims::create_claim,
        crate::routes::claims::list_claims,
        crate::routes::claims::get_claim,
        // Operations
        crate::middleware::metrics::metrics_handler,
    ),
    components(schemas(
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        crate::routes::customers::CreateCustomerRequest,
        crate::routes::customers::UpdateCustomerRequest,
        crate::routes::customers::CustomerListResponse,
        crate::routes::customers::BulkActionRequest,
        crate::routes::customers::BulkActionResponse,
        crate::routes::customers::RiskScoresRequest,
        crate::routes::customers::AddNoteRequest,
        crate::routes::policies::CreatePolicyRequest,
        crate::routes::claims::CreateClaimRequest,
        crate::middleware::metrics::MetricsSnapshot,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "customers", description = "Customer query pipeline and lifecycle"),
        (name = "dashboard", description = "Portfolio summary"),
        (name = "policies", description = "Policy records"),
        (name = "claims", description = "Claim records"),
        (name = "operations", description = "Service counters"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json: Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
