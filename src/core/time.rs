//! Creation stamps and event ids.
//!
//! All timestamps use RFC 3339 in UTC with millisecond precision, the same
//! shape the seed document carries in `created`.

use chrono::{DateTime, SecondsFormat, Utc};
use ulid::Ulid;

/// Current UTC time, e.g. `2025-05-12T10:16:00.584Z`.
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn is_rfc3339(value: &str) -> bool {
    DateTime::parse_from_rfc3339(value).is_ok()
}

pub fn new_event_id() -> String {
    Ulid::new().to_string()
}
