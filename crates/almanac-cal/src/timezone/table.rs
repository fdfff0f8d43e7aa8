//! Static table of selectable IANA zones and their picker labels.

use almanac_core::constants::FALLBACK_TIMEZONE;

/// One selectable zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimezoneEntry {
    pub id: &'static str,
    pub label: &'static str,
}

const fn entry(id: &'static str, label: &'static str) -> TimezoneEntry {
    TimezoneEntry { id, label }
}

/// Zones offered to users, west to east.
pub static TIMEZONES: &[TimezoneEntry] = &[
    entry("Pacific/Midway", "(GMT-11:00) Midway Island, Samoa"),
    entry("Pacific/Honolulu", "(GMT-10:00) Hawaii"),
    entry("America/Anchorage", "(GMT-09:00) Alaska"),
    entry("America/Los_Angeles", "(GMT-08:00) Pacific Time (US & Canada)"),
    entry("America/Tijuana", "(GMT-08:00) Tijuana, Baja California"),
    entry("America/Phoenix", "(GMT-07:00) Arizona"),
    entry("America/Denver", "(GMT-07:00) Mountain Time (US & Canada)"),
    entry("America/Chicago", "(GMT-06:00) Central Time (US & Canada)"),
    entry("America/Mexico_City", "(GMT-06:00) Guadalajara, Mexico City, Monterrey"),
    entry("America/Regina", "(GMT-06:00) Saskatchewan"),
    entry("America/Bogota", "(GMT-05:00) Bogota, Lima, Quito"),
    entry("America/New_York", "(GMT-05:00) Eastern Time (US & Canada)"),
    entry("America/Caracas", "(GMT-04:00) Caracas"),
    entry("America/Halifax", "(GMT-04:00) Atlantic Time (Canada)"),
    entry("America/Santiago", "(GMT-04:00) Santiago"),
    entry("America/St_Johns", "(GMT-03:30) Newfoundland"),
    entry("America/Sao_Paulo", "(GMT-03:00) Brasilia"),
    entry("America/Argentina/Buenos_Aires", "(GMT-03:00) Buenos Aires"),
    entry("Atlantic/South_Georgia", "(GMT-02:00) Mid-Atlantic"),
    entry("Atlantic/Azores", "(GMT-01:00) Azores"),
    entry("Atlantic/Cape_Verde", "(GMT-01:00) Cape Verde Is."),
    entry("UTC", "(UTC) Coordinated Universal Time"),
    entry("GMT", "(GMT+00:00) Greenwich Mean Time"),
    entry("Europe/London", "(GMT+00:00) Dublin, Edinburgh, Lisbon, London"),
    entry("Africa/Casablanca", "(GMT+00:00) Casablanca, Monrovia"),
    entry("Europe/Amsterdam", "(GMT+01:00) Amsterdam, Berlin, Bern, Rome, Stockholm, Vienna"),
    entry("Europe/Belgrade", "(GMT+01:00) Belgrade, Bratislava, Budapest, Ljubljana, Prague"),
    entry("Europe/Brussels", "(GMT+01:00) Brussels, Copenhagen, Madrid, Paris"),
    entry("Europe/Warsaw", "(GMT+01:00) Sarajevo, Skopje, Warsaw, Zagreb"),
    entry("Africa/Lagos", "(GMT+01:00) West Central Africa"),
    entry("Europe/Athens", "(GMT+02:00) Athens, Bucharest"),
    entry("Africa/Cairo", "(GMT+02:00) Cairo"),
    entry("Africa/Johannesburg", "(GMT+02:00) Harare, Pretoria"),
    entry("Europe/Helsinki", "(GMT+02:00) Helsinki, Kyiv, Riga, Sofia, Tallinn, Vilnius"),
    entry("Asia/Jerusalem", "(GMT+02:00) Jerusalem"),
    entry("Europe/Istanbul", "(GMT+03:00) Istanbul"),
    entry("Asia/Riyadh", "(GMT+03:00) Kuwait, Riyadh"),
    entry("Europe/Moscow", "(GMT+03:00) Moscow, St. Petersburg"),
    entry("Africa/Nairobi", "(GMT+03:00) Nairobi"),
    entry("Asia/Tehran", "(GMT+03:30) Tehran"),
    entry("Asia/Dubai", "(GMT+04:00) Abu Dhabi, Muscat"),
    entry("Asia/Baku", "(GMT+04:00) Baku"),
    entry("Asia/Kabul", "(GMT+04:30) Kabul"),
    entry("Asia/Karachi", "(GMT+05:00) Islamabad, Karachi"),
    entry("Asia/Tashkent", "(GMT+05:00) Tashkent"),
    entry("Asia/Kolkata", "(GMT+05:30) Chennai, Kolkata, Mumbai, New Delhi"),
    entry("Asia/Colombo", "(GMT+05:30) Sri Jayawardenepura"),
    entry("Asia/Kathmandu", "(GMT+05:45) Kathmandu"),
    entry("Asia/Dhaka", "(GMT+06:00) Astana, Dhaka"),
    entry("Asia/Yangon", "(GMT+06:30) Yangon (Rangoon)"),
    entry("Asia/Bangkok", "(GMT+07:00) Bangkok, Hanoi, Jakarta"),
    entry("Asia/Shanghai", "(GMT+08:00) Beijing, Chongqing, Hong Kong, Urumqi"),
    entry("Asia/Singapore", "(GMT+08:00) Kuala Lumpur, Singapore"),
    entry("Australia/Perth", "(GMT+08:00) Perth"),
    entry("Asia/Taipei", "(GMT+08:00) Taipei"),
    entry("Asia/Tokyo", "(GMT+09:00) Osaka, Sapporo, Tokyo"),
    entry("Asia/Seoul", "(GMT+09:00) Seoul"),
    entry("Australia/Adelaide", "(GMT+09:30) Adelaide"),
    entry("Australia/Darwin", "(GMT+09:30) Darwin"),
    entry("Australia/Brisbane", "(GMT+10:00) Brisbane"),
    entry("Australia/Sydney", "(GMT+10:00) Canberra, Melbourne, Sydney"),
    entry("Pacific/Guam", "(GMT+10:00) Guam, Port Moresby"),
    entry("Asia/Vladivostok", "(GMT+10:00) Vladivostok"),
    entry("Asia/Magadan", "(GMT+11:00) Magadan, Solomon Is., New Caledonia"),
    entry("Pacific/Auckland", "(GMT+12:00) Auckland, Wellington"),
    entry("Pacific/Fiji", "(GMT+12:00) Fiji, Marshall Is."),
    entry("Pacific/Tongatapu", "(GMT+13:00) Nuku'alofa"),
];

/// Short names accepted in place of an IANA id.
static LEGACY_ALIASES: &[(&str, &str)] = &[
    ("ist", "Asia/Kolkata"),
    ("utc", "GMT"),
    ("gmt", "GMT"),
    ("est", "America/New_York"),
    ("pst", "America/Los_Angeles"),
];

/// Returns `true` if `id` is a zone in the static table.
#[must_use]
pub fn is_valid_timezone(id: &str) -> bool {
    lookup(id).is_some()
}

/// Returns the picker label for `id`, if it is in the static table.
#[must_use]
pub fn timezone_label(id: &str) -> Option<&'static str> {
    lookup(id).map(|e| e.label)
}

/// All selectable zones, in table order.
#[must_use]
pub fn all_timezones() -> &'static [TimezoneEntry] {
    TIMEZONES
}

/// Maps a legacy lowercase short name to its IANA id.
///
/// Matching is exact: `"UTC"` is already a table id and is left alone.
#[must_use]
pub fn normalize_alias(zone: &str) -> Option<&'static str> {
    let zone = zone.trim();
    LEGACY_ALIASES
        .iter()
        .find(|(alias, _)| *alias == zone)
        .map(|(_, id)| *id)
}

/// ## Summary
/// Resolves a requested display zone.
///
/// Legacy aliases are applied first; otherwise the id must be in the static
/// table. Anything else resolves to `UTC`.
#[must_use]
pub fn resolve_display_zone(zone: &str) -> &'static str {
    if let Some(id) = normalize_alias(zone) {
        return id;
    }
    if let Some(entry) = lookup(zone.trim()) {
        return entry.id;
    }
    tracing::warn!(zone, fallback = FALLBACK_TIMEZONE, "Unknown display timezone");
    FALLBACK_TIMEZONE
}

fn lookup(id: &str) -> Option<&'static TimezoneEntry> {
    TIMEZONES.iter().find(|e| e.id == id)
}
