//! Timestamp parsing for query strings and request bodies

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use helly::{DomainError, TimeWindow};

/// Parse an ISO-8601 timestamp.
///
/// Accepts RFC 3339 (`2024-06-01T10:00:00Z`, `2024-06-01T12:00:00+02:00`),
/// a naive `2024-06-01T10:00:00` taken as UTC, or a bare `2024-06-01`
/// meaning midnight UTC.
pub fn parse_timestamp(field: &str, raw: &str) -> Result<DateTime<Utc>, DomainError> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    if let Some(midnight) = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Ok(midnight.and_utc());
    }

    Err(DomainError::validation(format!(
        "{} is not a valid ISO-8601 timestamp: {:?}",
        field, raw
    )))
}

/// Parse an optional timestamp; blank counts as absent
pub fn parse_optional(field: &str, raw: Option<&str>) -> Result<Option<DateTime<Utc>>, DomainError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(value) => parse_timestamp(field, value).map(Some),
        None => Ok(None),
    }
}

/// Build a window from optional `from` / `to` strings
pub fn parse_window(from: Option<&str>, to: Option<&str>) -> Result<TimeWindow, DomainError> {
    TimeWindow::new(parse_optional("from", from)?, parse_optional("to", to)?)
}
