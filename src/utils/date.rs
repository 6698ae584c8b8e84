//! Date handling for article ordering and generation timestamps.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use std::cmp::Reverse;

/// Naive date-time layouts tried after RFC 3339, interpreted as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse a frontmatter date into a UTC timestamp.
///
/// Accepts RFC 3339 (`2024-01-15T08:00:00Z`, `2024-01-15T10:00:00+02:00`),
/// a naive date-time (`2024-01-15T08:00:00`, `2024-01-15 08:00`) and a bare
/// date (`2024-01-15`, midnight UTC). Anything else yields `None`.
pub fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Some(dt) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return Some(dt.and_utc());
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Sort key putting the newest date first and undated (or unparseable)
/// values last.
pub fn newest_first_key(date: Option<&str>) -> Reverse<Option<DateTime<Utc>>> {
    Reverse(date.and_then(parse_datetime))
}

/// Rewrite a parseable date as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
///
/// Values that do not parse are returned unchanged.
pub fn normalize_date(raw: String) -> String {
    match parse_datetime(&raw) {
        Some(dt) => dt.to_rfc3339_opts(SecondsFormat::Millis, true),
        None => raw,
    }
}

/// Current time as ISO 8601 with millisecond precision (`...T08:30:00.123Z`).
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
