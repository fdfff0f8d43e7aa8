/// Loop iterations allowed for every rule except yearly ones.
pub const MAX_SUB_YEARLY_ITERATIONS: usize = 366 * 2;

/// Loop iterations allowed for yearly rules.
pub const MAX_YEARLY_ITERATIONS: usize = 50;

/// Upper bound on occurrences produced for a single event in one call.
pub const MAX_EMITTED_OCCURRENCES: usize = 366;

/// How far past "now" sub-yearly rules are enumerated.
pub const SUB_YEARLY_HORIZON_DAYS: i64 = 365;

/// How far past "now" yearly rules are enumerated.
pub const YEARLY_HORIZON_YEARS: i32 = 10;

/// Zone used whenever a requested zone cannot be resolved.
pub const FALLBACK_TIMEZONE: &str = "UTC";

/// Repeat-rule text that means "single occurrence".
pub const NO_REPEAT_SENTINEL: &str = "Does not repeat";

/// Attribute key under which an event's repeat rule may be stored.
pub const REPEAT_EVENT_KEY: &str = "repeatEvent";
