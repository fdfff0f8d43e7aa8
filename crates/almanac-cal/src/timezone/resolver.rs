//! Event-zone to display-zone conversion.

use std::fmt;

use chrono::{DateTime, Duration, NaiveDateTime, Utc};

use almanac_core::constants::FALLBACK_TIMEZONE;

use super::fields::{ChronoTzFormatter, ZoneFormatter, ZonedFields, try_parse_local_date_time};
use super::{ConversionError, table};

/// Wall-clock fields of a converted instant in the display zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayValues {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    /// The display zone actually used, after alias and fallback resolution.
    pub timezone: String,
}

impl DisplayValues {
    fn new(fields: ZonedFields, timezone: &str) -> Self {
        Self {
            year: fields.year,
            month: fields.month,
            day: fields.day,
            hour: fields.hour,
            minute: fields.minute,
            second: fields.second,
            timezone: timezone.to_string(),
        }
    }

    /// ## Summary
    /// The display-local date-time as a naive value.
    ///
    /// ## Errors
    /// Returns `ConversionError::FormattingFailure` if the fields are not a real date-time.
    pub fn to_naive(&self) -> Result<NaiveDateTime, ConversionError> {
        ZonedFields {
            year: self.year,
            month: self.month,
            day: self.day,
            hour: self.hour,
            minute: self.minute,
            second: self.second,
        }
        .to_naive()
    }
}

impl fmt::Display for DisplayValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

/// Result of converting a naive string into an instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedDateTime {
    /// The absolute instant.
    pub date: DateTime<Utc>,
    /// `date` broken down in the display zone.
    pub display_values: DisplayValues,
}

/// ## Summary
/// Converts naive wall-clock strings between an event zone and a display zone.
///
/// Offsets come from the [`ZoneFormatter`]; the resolver itself holds no
/// mutable state and can be shared freely.
#[derive(Debug, Clone, Default)]
pub struct TimeZoneResolver<F = ChronoTzFormatter> {
    formatter: F,
}

impl TimeZoneResolver {
    /// Creates a resolver backed by the bundled IANA database.
    #[must_use]
    pub fn new() -> Self {
        Self {
            formatter: ChronoTzFormatter,
        }
    }
}

impl<F: ZoneFormatter> TimeZoneResolver<F> {
    /// Creates a resolver backed by a custom formatter.
    #[must_use]
    pub fn with_formatter(formatter: F) -> Self {
        Self { formatter }
    }

    /// ## Summary
    /// Breaks an instant down in `zone`.
    ///
    /// ## Errors
    /// Propagates the formatter's error.
    pub fn zoned_fields_of(
        &self,
        instant: DateTime<Utc>,
        zone: &str,
    ) -> Result<ZonedFields, ConversionError> {
        self.formatter.zoned_fields_of(instant, zone)
    }

    /// ## Summary
    /// Returns the UTC offset of `zone` at `instant` in minutes, positive east of UTC.
    ///
    /// The offset is the difference between the zone's wall-clock fields and the
    /// UTC fields of the same instant.
    ///
    /// ## Errors
    /// Returns an error if the zone is unknown or its fields cannot be formatted.
    pub fn resolve_offset_minutes(
        &self,
        instant: DateTime<Utc>,
        zone: &str,
    ) -> Result<i32, ConversionError> {
        let local = self.formatter.zoned_fields_of(instant, zone)?.to_naive()?;
        let minutes = (local - instant.naive_utc()).num_minutes();
        i32::try_from(minutes).map_err(|_e| {
            ConversionError::FormattingFailure(format!("offset out of range in {zone}"))
        })
    }

    /// ## Summary
    /// Resolves an event zone: legacy aliases first, then any zone the formatter
    /// knows. Falls back to `UTC`.
    #[must_use]
    pub fn resolve_event_zone(&self, zone: &str) -> String {
        if let Some(id) = table::normalize_alias(zone) {
            return id.to_string();
        }
        let zone = zone.trim();
        if self
            .formatter
            .zoned_fields_of(DateTime::<Utc>::UNIX_EPOCH, zone)
            .is_ok()
        {
            return zone.to_string();
        }
        tracing::warn!(zone, fallback = FALLBACK_TIMEZONE, "Unknown event timezone");
        FALLBACK_TIMEZONE.to_string()
    }

    /// ## Summary
    /// Interprets a naive date-time as wall-clock time in `zone` and returns the
    /// absolute instant.
    ///
    /// The fields are first read as if they were UTC; the zone's offset at that
    /// provisional instant is subtracted. If the offset at the corrected instant
    /// differs (the provisional instant sat across a DST change), the corrected
    /// offset is used instead.
    ///
    /// ## Errors
    /// Returns an error if the zone is unknown or cannot be formatted.
    pub fn local_to_instant(
        &self,
        local: NaiveDateTime,
        zone: &str,
    ) -> Result<DateTime<Utc>, ConversionError> {
        let fake_utc = local.and_utc();
        let offset = self.resolve_offset_minutes(fake_utc, zone)?;
        let utc_date = fake_utc - Duration::minutes(i64::from(offset));

        let corrected = self.resolve_offset_minutes(utc_date, zone)?;
        if corrected == offset {
            return Ok(utc_date);
        }
        tracing::trace!(zone, offset, corrected, "Offset differs at corrected instant");
        Ok(fake_utc - Duration::minutes(i64::from(corrected)))
    }

    /// ## Summary
    /// Formats an instant as a naive `YYYYMMDDTHHmmss`-ready date-time in `zone`.
    ///
    /// ## Errors
    /// Returns an error if the zone is unknown or cannot be formatted.
    pub fn instant_to_local(
        &self,
        instant: DateTime<Utc>,
        zone: &str,
    ) -> Result<NaiveDateTime, ConversionError> {
        self.formatter.zoned_fields_of(instant, zone)?.to_naive()
    }

    /// ## Summary
    /// Converts `date_str`, wall-clock time in `event_zone` (or `display_zone`
    /// when absent), to an instant and its breakdown in `display_zone`.
    ///
    /// ## Errors
    /// Returns `ConversionError::InvalidFormat` for malformed strings and
    /// formatting errors from the formatter. Unknown zones never error; they
    /// fall back to `UTC`.
    pub fn try_convert(
        &self,
        date_str: &str,
        display_zone: &str,
        event_zone: Option<&str>,
    ) -> Result<ConvertedDateTime, ConversionError> {
        let local = try_parse_local_date_time(date_str)?;

        let event_zone = self.resolve_event_zone(event_zone.unwrap_or(display_zone));
        let date = self.local_to_instant(local, &event_zone)?;

        let display_zone = table::resolve_display_zone(display_zone);
        let fields = self.formatter.zoned_fields_of(date, display_zone)?;

        Ok(ConvertedDateTime {
            date,
            display_values: DisplayValues::new(fields, display_zone),
        })
    }

    /// Fail-soft form of [`Self::try_convert`].
    #[must_use]
    pub fn convert(
        &self,
        date_str: &str,
        display_zone: &str,
        event_zone: Option<&str>,
    ) -> Option<ConvertedDateTime> {
        match self.try_convert(date_str, display_zone, event_zone) {
            Ok(converted) => Some(converted),
            Err(e) => {
                tracing::debug!(date_str, error = %e, "Date-time conversion failed");
                None
            }
        }
    }

    /// ## Summary
    /// Re-expresses `now` as naive wall-clock time in `zone`.
    ///
    /// Falls back to the naive UTC reading of `now` on any formatting error.
    #[must_use]
    pub fn current_time_at(&self, now: DateTime<Utc>, zone: &str) -> NaiveDateTime {
        let zone = self.resolve_event_zone(zone);
        self.instant_to_local(now, &zone)
            .unwrap_or_else(|_e| now.naive_utc())
    }
}
