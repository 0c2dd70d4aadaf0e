//! # Date Range Bounds
//!
//! Parsing for the `createdDateFrom` / `createdDateTo` query bounds.
//!
//! Both bounds accept either a calendar date (`2026-01-15`) or an RFC 3339
//! timestamp (`2026-01-15T08:30:00Z`, any offset; converted to UTC).
//!
//! - A lower bound given as a date starts at `00:00:00.000` UTC.
//! - An upper bound is always normalized to the end of its UTC day,
//!   `23:59:59.999`, so that `to=2026-01-15` includes records created at any
//!   time on the 15th.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::error::CoreError;

/// Last representable millisecond of a day.
fn end_of_day_time() -> NaiveTime {
    NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN)
}

/// `date` at `23:59:59.999` UTC.
pub fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(end_of_day_time()))
}

/// `date` at `00:00:00.000` UTC.
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

enum Parsed {
    Date(NaiveDate),
    Instant(DateTime<Utc>),
}

fn parse_either(s: &str) -> Result<Parsed, CoreError> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(Parsed::Date(date));
    }
    DateTime::parse_from_rfc3339(s)
        .map(|dt| Parsed::Instant(dt.with_timezone(&Utc)))
        .map_err(|_| CoreError::InvalidDate(s.to_string()))
}

/// Parse an inclusive lower bound.
pub fn parse_lower_bound(s: &str) -> Result<DateTime<Utc>, CoreError> {
    Ok(match parse_either(s)? {
        Parsed::Date(date) => start_of_day(date),
        Parsed::Instant(dt) => dt,
    })
}

/// Parse an inclusive upper bound, normalized to the end of its UTC day.
pub fn parse_upper_bound(s: &str) -> Result<DateTime<Utc>, CoreError> {
    let date = match parse_either(s)? {
        Parsed::Date(date) => date,
        Parsed::Instant(dt) => dt.date_naive(),
    };
    Ok(end_of_day(date))
}
