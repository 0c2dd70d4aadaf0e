//! # Authentication Middleware
//!
//! Optional static bearer token. When `AUTH_TOKEN` is configured every API
//! request must carry `Authorization: Bearer <token>`; otherwise requests
//! pass through untouched. Health probes are mounted outside this layer.

use axum::extract::Request;
use axum::http::header;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use subtle::ConstantTimeEq;

use crate::error::AppError;

/// Auth configuration injected into request extensions.
///
/// Custom `Debug` redacts the token value to prevent credential leakage in logs.
#[derive(Clone)]
pub struct AuthConfig {
    pub token: Option<String>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Constant-time comparison of bearer tokens.
///
/// When lengths differ, performs a dummy comparison so timing does not
/// depend on where the mismatch is.
fn constant_time_token_eq(provided: &str, expected: &str) -> bool {
    let provided = provided.as_bytes();
    let expected = expected.as_bytes();
    if provided.len() != expected.len() {
        let _ = expected.ct_eq(expected);
        return false;
    }
    provided.ct_eq(expected).into()
}

/// Reject requests without the configured bearer token.
pub async fn auth_middleware(request: Request, next: Next) -> Response {
    let expected = request
        .extensions()
        .get::<AuthConfig>()
        .and_then(|c| c.token.clone());

    let Some(expected) = expected else {
        return next.run(request).await;
    };

    match check_header(&request, &expected) {
        Ok(()) => next.run(request).await,
        Err(reason) => {
            tracing::warn!(reason, "authentication failed");
            AppError::Unauthorized(reason.into()).into_response()
        }
    }
}

fn check_header(request: &Request, expected: &str) -> Result<(), &'static str> {
    let header_value = request
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or("missing authorization header")?
        .to_str()
        .map_err(|_| "authorization header is not valid ASCII")?;
    let provided = header_value
        .strip_prefix("Bearer ")
        .ok_or("authorization header must use Bearer scheme")?;
    if constant_time_token_eq(provided, expected) {
        Ok(())
    } else {
        Err("invalid bearer token")
    }
}
