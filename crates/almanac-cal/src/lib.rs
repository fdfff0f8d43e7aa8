//! Calendar event expansion.
//!
//! Resolves naive `YYYYMMDDTHHmmss` wall-clock strings against IANA zones and
//! enumerates the concrete occurrences of repeating events inside a view window.

pub mod event;
pub mod recurrence;
pub mod timezone;

pub use event::{Event, EventAttribute, ExpandedEvent};
pub use recurrence::{
    ExpansionLimits, Occurrence, RepeatRule, RuleError, expand_events_for_range,
    expand_events_for_range_with, generate_recurring_instances, generate_recurring_instances_with,
};
pub use timezone::{
    ConversionError, ConvertedDateTime, DisplayValues, TimeZoneResolver,
    convert_to_selected_timezone, format_display_values, get_current_time_in_timezone,
    parse_local_date_time, resolve_offset_minutes,
};
