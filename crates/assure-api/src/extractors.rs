//! # Custom Extractors & Validation
//!
//! Provides the [`Validate`] trait for request DTOs and helpers that turn
//! axum rejections into [`AppError`]s.
//!
//! Syntactically broken input (bad JSON, undecodable query string) is a
//! `BAD_REQUEST`. Well-formed input with the wrong shape (missing field,
//! unknown enum value) is a `VALIDATION_ERROR`.

use assure_core::query::{CustomerQuery, RawCustomerQuery};
use assure_core::FieldError;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::Query;
use axum::Json;

use crate::error::AppError;

/// Trait for request types that can validate their business rules
/// beyond what serde deserialization checks.
pub trait Validate {
    /// Every field that breaks a rule. Empty means valid.
    fn validate(&self) -> Vec<FieldError>;
}

/// Extract a JSON body, mapping deserialization errors to [`AppError`].
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    result.map(|Json(v)| v).map_err(|err| match err {
        JsonRejection::JsonDataError(e) => AppError::field("body", e.body_text()),
        other => AppError::BadRequest(other.body_text()),
    })
}

/// Extract a JSON body and validate it using the [`Validate`] trait.
pub fn extract_validated_json<T: Validate>(
    result: Result<Json<T>, JsonRejection>,
) -> Result<T, AppError> {
    let value = extract_json(result)?;
    let errors = value.validate();
    if errors.is_empty() {
        Ok(value)
    } else {
        Err(AppError::Validation(errors))
    }
}

/// Extract query parameters, mapping decode errors to [`AppError::BadRequest`].
pub fn extract_query<T>(result: Result<Query<T>, QueryRejection>) -> Result<T, AppError> {
    result
        .map(|Query(v)| v)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}

/// Extract and parse the customer list query.
pub fn extract_customer_query(
    result: Result<Query<RawCustomerQuery>, QueryRejection>,
) -> Result<CustomerQuery, AppError> {
    extract_query(result)?
        .parse()
        .map_err(AppError::Validation)
}

/// Require a non-blank string field, bounded in length.
pub(crate) fn check_text(
    errors: &mut Vec<FieldError>,
    field: &str,
    value: &str,
    max_len: usize,
) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, "must not be empty"));
    } else if value.chars().count() > max_len {
        errors.push(FieldError::new(
            field,
            format!("must not exceed {max_len} characters"),
        ));
    }
}

/// Require a plausible email address.
pub(crate) fn check_email(errors: &mut Vec<FieldError>, field: &str, value: &str) {
    let trimmed = value.trim();
    let valid = trimmed
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !valid || trimmed.chars().any(char::is_whitespace) {
        errors.push(FieldError::new(field, "must be a valid email address"));
    }
}

/// Require a non-negative, finite amount.
pub(crate) fn check_amount(errors: &mut Vec<FieldError>, field: &str, value: f64) {
    if !(value.is_finite() && value >= 0.0) {
        errors.push(FieldError::new(field, "must be a non-negative number"));
    }
}
