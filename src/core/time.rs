//! Timestamp formatting shared by tools and resources.

use chrono::{SecondsFormat, Utc};

/// Current UTC time as an ISO-8601 / RFC 3339 string with microseconds,
/// e.g. `2024-05-01T12:34:56.789012Z`.
pub fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}
