//! Timestamp display helpers.
//!
//! Timestamps arrive as RFC 3339 strings from the API; they are shown either
//! relative to now ("5 minutes ago") or through a caller-supplied strftime
//! layout rendered in the timestamp's own offset.

use std::fmt::Write as _;

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

/// Timestamp formatting error
#[derive(Debug, Error)]
pub enum TimeError {
    /// Input is not an RFC 3339 date-time
    #[error("invalid timestamp: {0}")]
    Parse(#[from] chrono::ParseError),

    /// Layout contains a specifier chrono cannot render
    #[error("invalid time layout: {0:?}")]
    Layout(String),
}

/// Render an RFC 3339 timestamp through a strftime `layout`, keeping the
/// timestamp's original UTC offset.
///
/// # Errors
///
/// [`TimeError::Parse`] when `input` is malformed, [`TimeError::Layout`]
/// when `layout` has an unrenderable specifier.
pub fn format_at(layout: &str, input: &str) -> Result<String, TimeError> {
    let t = DateTime::parse_from_rfc3339(input)?;
    let mut out = String::new();
    // chrono reports bad layouts at render time; write! surfaces that as an
    // error instead of the Display panic.
    write!(out, "{}", t.format(layout)).map_err(|_| TimeError::Layout(layout.to_string()))?;
    Ok(out)
}

/// Render an RFC 3339 timestamp relative to `now`, e.g. "5 minutes ago".
///
/// Timestamps in the future are not treated specially: a negative duration
/// compares below every bucket boundary and comes out as "just now".
///
/// # Errors
///
/// [`TimeError::Parse`] when `input` is malformed.
pub fn relative_from_now(now: DateTime<Utc>, input: &str) -> Result<String, TimeError> {
    let t = DateTime::parse_from_rfc3339(input)?;
    Ok(time_ago(now.signed_duration_since(t.with_timezone(&Utc))))
}

fn time_ago(ago: Duration) -> String {
    if ago < Duration::minutes(1) {
        return "just now".to_string();
    }
    if ago < Duration::hours(1) {
        return format!("{} ago", pluralize(ago.num_minutes(), "minute"));
    }
    if ago < Duration::hours(24) {
        return format!("{} ago", pluralize(ago.num_hours(), "hour"));
    }
    if ago < Duration::days(30) {
        return format!("{} ago", pluralize(ago.num_hours() / 24, "day"));
    }
    if ago < Duration::days(365) {
        return format!("{} ago", pluralize(ago.num_hours() / 24 / 30, "month"));
    }
    // Years use fractional hours so that e.g. 365d23h is still one year.
    let years = (ago.num_seconds() as f64 / 3600.0 / 24.0 / 365.0) as i64;
    format!("{} ago", pluralize(years, "year"))
}

/// "1 minute" / "5 minutes".
pub fn pluralize(n: i64, thing: &str) -> String {
    if n == 1 {
        format!("1 {thing}")
    } else {
        format!("{n} {thing}s")
    }
}
