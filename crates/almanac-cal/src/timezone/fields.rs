//! Field breakdowns of instants and the naive string format.

use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use chrono_tz::Tz;
use regex_lite::Regex;

use super::ConversionError;

#[expect(clippy::expect_used, reason = "pattern is a compile-time constant")]
static LOCAL_DATE_TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4})(\d{2})(\d{2})T(\d{2})(\d{2})(\d{2})?$").expect("valid regex")
});

/// Calendar and clock fields of an instant as seen in some zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZonedFields {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl ZonedFields {
    #[must_use]
    pub fn from_naive(naive: NaiveDateTime) -> Self {
        Self {
            year: naive.year(),
            month: naive.month(),
            day: naive.day(),
            hour: naive.hour(),
            minute: naive.minute(),
            second: naive.second(),
        }
    }

    /// ## Summary
    /// Rebuilds a naive date-time from the fields.
    ///
    /// ## Errors
    /// Returns `ConversionError::FormattingFailure` if the fields do not form a real date-time.
    pub fn to_naive(self) -> Result<NaiveDateTime, ConversionError> {
        let date = NaiveDate::from_ymd_opt(self.year, self.month, self.day);
        let time = NaiveTime::from_hms_opt(self.hour, self.minute, self.second);
        match (date, time) {
            (Some(date), Some(time)) => Ok(NaiveDateTime::new(date, time)),
            _ => Err(ConversionError::FormattingFailure(format!("{self:?}"))),
        }
    }
}

/// ## Summary
/// Source of truth for zone offsets: the field breakdown of an instant in a zone.
///
/// The recurrence logic only ever talks to this seam, so a different zone
/// database can be dropped in without touching it.
pub trait ZoneFormatter {
    /// ## Summary
    /// Breaks `instant` down into wall-clock fields in `zone`.
    ///
    /// ## Errors
    /// Returns `ConversionError::UnknownTimezone` if `zone` is not known to the formatter,
    /// or `ConversionError::FormattingFailure` if the breakdown cannot be produced.
    fn zoned_fields_of(
        &self,
        instant: DateTime<Utc>,
        zone: &str,
    ) -> Result<ZonedFields, ConversionError>;
}

/// Formatter backed by the bundled IANA database in `chrono-tz`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChronoTzFormatter;

impl ZoneFormatter for ChronoTzFormatter {
    fn zoned_fields_of(
        &self,
        instant: DateTime<Utc>,
        zone: &str,
    ) -> Result<ZonedFields, ConversionError> {
        let tz = Tz::from_str(zone).map_err(|_e| ConversionError::UnknownTimezone(zone.to_string()))?;
        Ok(ZonedFields::from_naive(instant.with_timezone(&tz).naive_local()))
    }
}

/// ## Summary
/// Parses a `YYYYMMDDTHHmmss` string (seconds optional, default `00`).
///
/// ## Errors
/// Returns `ConversionError::InvalidFormat` if the string does not match the
/// pattern or names a date-time that does not exist on the calendar.
pub fn try_parse_local_date_time(s: &str) -> Result<NaiveDateTime, ConversionError> {
    let invalid = || ConversionError::InvalidFormat(s.to_string());

    let caps = LOCAL_DATE_TIME_RE.captures(s).ok_or_else(invalid)?;
    let field = |i: usize| -> Result<u32, ConversionError> {
        caps.get(i)
            .map_or(Ok(0), |m| m.as_str().parse::<u32>().map_err(|_e| invalid()))
    };

    let year = i32::try_from(field(1)?).map_err(|_e| invalid())?;
    let fields = ZonedFields {
        year,
        month: field(2)?,
        day: field(3)?,
        hour: field(4)?,
        minute: field(5)?,
        second: field(6)?,
    };

    fields.to_naive().map_err(|_e| invalid())
}

/// Fail-soft form of [`try_parse_local_date_time`].
#[must_use]
pub fn parse_local_date_time(s: &str) -> Option<NaiveDateTime> {
    try_parse_local_date_time(s).ok()
}

/// Serialises a naive date-time as `YYYYMMDDTHHmmss`.
#[must_use]
pub fn format_local_date_time(naive: NaiveDateTime) -> String {
    naive.format("%Y%m%dT%H%M%S").to_string()
}
