//! Timestamp codec for record fields.
//!
//! Timestamps are UTC with microsecond precision so that the ISO string
//! produced by [`format`] parses back to an identical value.

use chrono::{DateTime, Duration, NaiveDateTime, SecondsFormat, SubsecRound, Utc};

use crate::error::{ModelError, Result};

const NAIVE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

fn tick() -> Duration {
    Duration::microseconds(1)
}

/// Current time truncated to microseconds.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// The earliest timestamp strictly after `previous` that is not before now.
///
/// Every timestamp accepted by [`parse`] has a successor; `previous` is
/// returned unchanged only for one that does not.
pub fn next_after(previous: DateTime<Utc>) -> DateTime<Utc> {
    let current = now();
    if current > previous {
        current
    } else {
        previous.checked_add_signed(tick()).unwrap_or(previous)
    }
}

/// ISO-8601 form, e.g. `2024-01-02T03:04:05.123456Z`.
pub fn format(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse an RFC 3339 timestamp, or a naive `YYYY-MM-DDTHH:MM:SS[.f]` taken as UTC.
///
/// Rejects instants with no representable successor, so a record built from
/// parsed timestamps can always be saved.
pub fn parse(field: &str, value: &str) -> Result<DateTime<Utc>> {
    let invalid = || ModelError::InvalidTimestamp {
        field: field.to_string(),
        value: value.to_string(),
    };
    let parsed = DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| NaiveDateTime::parse_from_str(value, NAIVE_FORMAT).map(|dt| dt.and_utc()))
        .map_err(|_| invalid())?
        .trunc_subsecs(6);
    parsed.checked_add_signed(tick()).ok_or_else(invalid)?;
    Ok(parsed)
}
