use chrono::{DateTime, SecondsFormat, Utc};

/// ISO 8601 with millisecond precision and a `Z` suffix, e.g.
/// `2024-05-01T09:30:00.000Z`.
pub fn to_iso8601(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}
