//! Timezone resolution for naive local date-time strings.
//!
//! A naive `YYYYMMDDTHHmmss` string is read as wall-clock time in an event zone,
//! turned into an absolute instant, then re-projected into a display zone.
//! Offsets are derived from the zone's field breakdown of an instant.

mod fields;
mod resolver;
pub mod table;

pub use fields::{
    ChronoTzFormatter, ZoneFormatter, ZonedFields, format_local_date_time,
    parse_local_date_time, try_parse_local_date_time,
};
pub use resolver::{ConvertedDateTime, DisplayValues, TimeZoneResolver};

use chrono::{DateTime, NaiveDateTime, Utc};

/// Error during timezone conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// Date string does not match `YYYYMMDDTHHmmss`.
    #[error("Invalid date-time format: {0:?}")]
    InvalidFormat(String),

    /// Unknown or invalid timezone identifier.
    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    /// The zone formatter could not produce a field breakdown.
    #[error("Formatting failure: {0}")]
    FormattingFailure(String),
}

/// ## Summary
/// Returns the UTC offset of `zone` at `instant`, in minutes east of UTC.
///
/// Unknown zones resolve as UTC and therefore yield `0`.
#[must_use]
pub fn resolve_offset_minutes(instant: DateTime<Utc>, zone: &str) -> i32 {
    let resolver = TimeZoneResolver::new();
    resolver
        .resolve_offset_minutes(instant, &resolver.resolve_event_zone(zone))
        .unwrap_or_default()
}

/// ## Summary
/// Converts a naive date-time string from `event_zone` (defaulting to
/// `display_zone`) into an absolute instant plus its field breakdown in
/// `display_zone`.
///
/// Returns `None` when the string is malformed or formatting fails; unknown
/// zones fall back to UTC instead of failing.
#[must_use]
pub fn convert_to_selected_timezone(
    date_str: &str,
    display_zone: &str,
    event_zone: Option<&str>,
) -> Option<ConvertedDateTime> {
    TimeZoneResolver::new().convert(date_str, display_zone, event_zone)
}

/// Formats display values as `YYYY-MM-DD HH:mm:ss`.
#[must_use]
pub fn format_display_values(values: &DisplayValues) -> String {
    values.to_string()
}

/// ## Summary
/// Returns the current wall-clock time in `zone` as a naive date-time.
///
/// Falls back to the current UTC time if the zone cannot be formatted.
#[must_use]
pub fn get_current_time_in_timezone(zone: &str) -> NaiveDateTime {
    TimeZoneResolver::new().current_time_at(Utc::now(), zone)
}
