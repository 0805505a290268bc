use chrono::{DateTime, SecondsFormat, Utc};

/// Formats a UTC instant as ISO-8601 with millisecond precision and a `Z` suffix.
pub fn format_iso8601(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Returns the current UTC time formatted by [`format_iso8601`].
pub fn current_iso8601_timestamp() -> String {
    format_iso8601(Utc::now())
}
