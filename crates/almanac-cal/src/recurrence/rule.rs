//! Classification of free-text repeat rules.
//!
//! Rules are matched against an ordered list of matcher families. The first
//! family that accepts the text wins; [`RepeatRule::validate`] additionally
//! rejects text that more than one family accepts.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use almanac_core::constants::NO_REPEAT_SENTINEL;
use chrono::{Month, NaiveDate, Weekday};
use regex_lite::Regex;

#[expect(clippy::expect_used, reason = "patterns are compile-time constants")]
mod patterns {
    use super::{LazyLock, Regex};

    pub(super) static ANNUALLY_ON: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^annually on ([a-z]+)\.? (\d{1,2})(?:st|nd|rd|th)?$").expect("valid regex")
    });

    pub(super) static MONTHLY_NTH: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^monthly on the (first|second|third|fourth|1st|2nd|3rd|4th) ([a-z]+)$")
            .expect("valid regex")
    });

    pub(super) static MONTHLY_LAST: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^monthly on the last ([a-z]+)$").expect("valid regex")
    });

    pub(super) static CUSTOM: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(
            r"^every (\d+) (day|week|month|year)s?(?: on ([a-z]+(?: ?, ?[a-z]+)*))?(?:,? \(?(?:(?:for )?(\d+) times?|until ([^()]+?))\)?)?$",
        )
        .expect("valid regex")
    });
}

/// Unit of a custom interval rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Day,
    Week,
    Month,
    Year,
}

impl Unit {
    fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

/// When a custom rule stops producing occurrences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndCondition {
    Never,
    /// Total occurrences, counting the first one.
    After(u32),
    /// Last calendar day an occurrence may fall on.
    On(NaiveDate),
}

/// `Every <N> <unit>s [on <days>] [(<N> times)|(until <date>)]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomRule {
    pub interval: u32,
    pub unit: Unit,
    pub days_of_week: Vec<Weekday>,
    pub end: EndCondition,
}

/// A classified repeat rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepeatRule {
    NoRepeat,
    Daily,
    Weekly,
    BiWeekly,
    Monthly,
    Yearly,
    /// Monday to Friday.
    Weekdays,
    AnnuallyOn {
        month: u32,
        day: u32,
    },
    /// `occurrence` is 1 to 4.
    MonthlyOnNthWeekday {
        occurrence: u8,
        weekday: Weekday,
    },
    MonthlyOnLastWeekday {
        weekday: Weekday,
    },
    Custom(CustomRule),
}

/// Why a repeat-rule string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    #[error("Unrecognized repeat rule: {0:?}")]
    Unrecognized(String),

    #[error("Ambiguous repeat rule {text:?}: matched by {families:?}")]
    Ambiguous {
        text: String,
        families: Vec<&'static str>,
    },
}

type Matcher = fn(&str) -> Option<RepeatRule>;

/// Matcher families in precedence order. Positional patterns come before the
/// generic interval pattern.
const MATCHERS: &[(&'static str, Matcher)] = &[
    ("no-repeat", match_no_repeat),
    ("fixed-phrase", match_fixed_phrase),
    ("annually-on", match_annually_on),
    ("monthly-nth-weekday", match_monthly_nth),
    ("monthly-last-weekday", match_monthly_last),
    ("custom-interval", match_custom),
];

impl RepeatRule {
    /// ## Summary
    /// Classifies rule text using the first matcher family that accepts it.
    ///
    /// Matching is case-insensitive and ignores surrounding and repeated
    /// whitespace. Returns `None` for unrecognized text.
    #[must_use]
    pub fn classify(text: &str) -> Option<Self> {
        let normalized = normalize(text);
        MATCHERS.iter().find_map(|(_, matcher)| matcher(&normalized))
    }

    /// ## Summary
    /// Classifies rule text for ingestion, insisting on exactly one matching family.
    ///
    /// ## Errors
    /// Returns `RuleError::Unrecognized` if no family matches, or
    /// `RuleError::Ambiguous` if several do.
    pub fn validate(text: &str) -> Result<Self, RuleError> {
        Self::validate_with(text, MATCHERS)
    }

    fn validate_with(text: &str, matchers: &[(&'static str, Matcher)]) -> Result<Self, RuleError> {
        let normalized = normalize(text);
        let mut matches: Vec<(&'static str, Self)> = matchers
            .iter()
            .filter_map(|(family, matcher)| matcher(&normalized).map(|rule| (*family, rule)))
            .collect();

        match matches.len() {
            0 => Err(RuleError::Unrecognized(text.to_string())),
            1 => Ok(matches.remove(0).1),
            _ => Err(RuleError::Ambiguous {
                text: text.to_string(),
                families: matches.into_iter().map(|(family, _)| family).collect(),
            }),
        }
    }

    /// Rules whose period is a year or longer; they get the longer horizon and
    /// the smaller iteration cap.
    #[must_use]
    pub fn is_yearly(&self) -> bool {
        match self {
            Self::Yearly | Self::AnnuallyOn { .. } => true,
            Self::Custom(custom) => custom.unit == Unit::Year,
            _ => false,
        }
    }

    #[must_use]
    pub fn end_condition(&self) -> EndCondition {
        match self {
            Self::Custom(custom) => custom.end,
            _ => EndCondition::Never,
        }
    }
}

impl FromStr for RepeatRule {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::validate(s)
    }
}

impl fmt::Display for RepeatRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoRepeat => f.write_str(NO_REPEAT_SENTINEL),
            Self::Daily => f.write_str("Daily"),
            Self::Weekly => f.write_str("Weekly"),
            Self::BiWeekly => f.write_str("Bi-weekly"),
            Self::Monthly => f.write_str("Monthly"),
            Self::Yearly => f.write_str("Annually"),
            Self::Weekdays => f.write_str("Every weekday (Monday to Friday)"),
            Self::AnnuallyOn { month, day } => {
                let name = u8::try_from(*month)
                    .ok()
                    .and_then(|m| Month::try_from(m).ok())
                    .map_or("?", |m| m.name());
                write!(f, "Annually on {name} {day}")
            }
            Self::MonthlyOnNthWeekday {
                occurrence,
                weekday,
            } => {
                let ordinal = match occurrence {
                    1 => "first",
                    2 => "second",
                    3 => "third",
                    _ => "fourth",
                };
                write!(f, "Monthly on the {ordinal} {}", weekday_name(*weekday))
            }
            Self::MonthlyOnLastWeekday { weekday } => {
                write!(f, "Monthly on the last {}", weekday_name(*weekday))
            }
            Self::Custom(custom) => {
                write!(f, "Every {} {}s", custom.interval, custom.unit.as_str())?;
                if !custom.days_of_week.is_empty() {
                    let days: Vec<String> =
                        custom.days_of_week.iter().map(ToString::to_string).collect();
                    write!(f, " on {}", days.join(","))?;
                }
                match custom.end {
                    EndCondition::Never => Ok(()),
                    EndCondition::After(count) => write!(f, " ({count} times)"),
                    EndCondition::On(date) => write!(f, " (until {})", date.format("%Y-%m-%d")),
                }
            }
        }
    }
}

fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn match_no_repeat(text: &str) -> Option<RepeatRule> {
    (text.eq_ignore_ascii_case(NO_REPEAT_SENTINEL)
        || matches!(text, "" | "doesn't repeat" | "no repeat" | "never" | "none"))
    .then_some(RepeatRule::NoRepeat)
}

fn match_fixed_phrase(text: &str) -> Option<RepeatRule> {
    let rule = match text {
        "daily" | "every day" => RepeatRule::Daily,
        "weekly" | "every week" => RepeatRule::Weekly,
        "bi-weekly" | "biweekly" | "every other week" | "fortnightly" => RepeatRule::BiWeekly,
        "monthly" | "every month" => RepeatRule::Monthly,
        "yearly" | "annually" | "every year" => RepeatRule::Yearly,
        "weekdays"
        | "every weekday"
        | "every weekday (monday to friday)"
        | "every weekday (mon-fri)" => RepeatRule::Weekdays,
        _ => return None,
    };
    Some(rule)
}

fn match_annually_on(text: &str) -> Option<RepeatRule> {
    let caps = patterns::ANNUALLY_ON.captures(text)?;
    let month = month_from_name(caps.get(1)?.as_str())?;
    let day: u32 = caps.get(2)?.as_str().parse().ok()?;

    // 2024 is a leap year, so February 29 is accepted
    NaiveDate::from_ymd_opt(2024, month, day)?;
    Some(RepeatRule::AnnuallyOn { month, day })
}

fn match_monthly_nth(text: &str) -> Option<RepeatRule> {
    let caps = patterns::MONTHLY_NTH.captures(text)?;
    let occurrence = match caps.get(1)?.as_str() {
        "first" | "1st" => 1,
        "second" | "2nd" => 2,
        "third" | "3rd" => 3,
        "fourth" | "4th" => 4,
        _ => return None,
    };
    let weekday = weekday_from_name(caps.get(2)?.as_str())?;
    Some(RepeatRule::MonthlyOnNthWeekday {
        occurrence,
        weekday,
    })
}

fn match_monthly_last(text: &str) -> Option<RepeatRule> {
    let caps = patterns::MONTHLY_LAST.captures(text)?;
    let weekday = weekday_from_name(caps.get(1)?.as_str())?;
    Some(RepeatRule::MonthlyOnLastWeekday { weekday })
}

fn match_custom(text: &str) -> Option<RepeatRule> {
    let caps = patterns::CUSTOM.captures(text)?;

    let interval: u32 = caps.get(1)?.as_str().parse().ok()?;
    if interval == 0 {
        return None;
    }
    let unit = match caps.get(2)?.as_str() {
        "day" => Unit::Day,
        "week" => Unit::Week,
        "month" => Unit::Month,
        _ => Unit::Year,
    };

    let mut days_of_week = Vec::new();
    if let Some(days) = caps.get(3) {
        for name in days.as_str().split(',') {
            let weekday = weekday_from_name(name.trim())?;
            if !days_of_week.contains(&weekday) {
                days_of_week.push(weekday);
            }
        }
        days_of_week.sort_by_key(Weekday::num_days_from_monday);
    }

    let end = if let Some(count) = caps.get(4) {
        let count: u32 = count.as_str().parse().ok()?;
        if count == 0 {
            return None;
        }
        EndCondition::After(count)
    } else if let Some(until) = caps.get(5) {
        EndCondition::On(parse_until_date(until.as_str())?)
    } else {
        EndCondition::Never
    };

    Some(RepeatRule::Custom(CustomRule {
        interval,
        unit,
        days_of_week,
        end,
    }))
}

const UNTIL_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y%m%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%b %d, %Y",
    "%b %d %Y",
    "%d %B %Y",
];

fn parse_until_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    UNTIL_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
}

fn month_from_name(name: &str) -> Option<u32> {
    let month = match name {
        "jan" | "january" => 1,
        "feb" | "february" => 2,
        "mar" | "march" => 3,
        "apr" | "april" => 4,
        "may" => 5,
        "jun" | "june" => 6,
        "jul" | "july" => 7,
        "aug" | "august" => 8,
        "sep" | "sept" | "september" => 9,
        "oct" | "october" => 10,
        "nov" | "november" => 11,
        "dec" | "december" => 12,
        _ => return None,
    };
    Some(month)
}

fn weekday_from_name(name: &str) -> Option<Weekday> {
    let weekday = match name {
        "mon" | "monday" => Weekday::Mon,
        "tue" | "tues" | "tuesday" => Weekday::Tue,
        "wed" | "wednesday" => Weekday::Wed,
        "thu" | "thur" | "thurs" | "thursday" => Weekday::Thu,
        "fri" | "friday" => Weekday::Fri,
        "sat" | "saturday" => Weekday::Sat,
        "sun" | "sunday" => Weekday::Sun,
        _ => return None,
    };
    Some(weekday)
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
