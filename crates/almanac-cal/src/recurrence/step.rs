//! Calendar stepping for classified rules.
//!
//! Periodic rules compute their n-th occurrence directly from the start day,
//! so month-length clamping never accumulates. Positional rules search for the
//! next matching day strictly after a cursor.

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};

use super::rule::{RepeatRule, Unit};

/// How a rule moves from one occurrence to the next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Cadence {
    /// Occurrence `n` is `start + n * interval` units.
    Periodic { unit: Unit, interval: u32 },
    /// Next occurrence is found by scanning forward from the cursor.
    Scan(ScanRule),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ScanRule {
    Weekdays,
    AnnuallyOn { month: u32, day: u32 },
    /// `occurrence` of `None` means the last one in the month.
    MonthlyPositional {
        occurrence: Option<u8>,
        weekday: Weekday,
    },
    WeeklyOnDays { interval: u32, days: Vec<Weekday> },
}

impl Cadence {
    /// Returns `None` for rules that never repeat.
    pub(crate) fn for_rule(rule: &RepeatRule) -> Option<Self> {
        let cadence = match rule {
            RepeatRule::NoRepeat => return None,
            RepeatRule::Daily => periodic(Unit::Day, 1),
            RepeatRule::Weekly => periodic(Unit::Week, 1),
            RepeatRule::BiWeekly => periodic(Unit::Week, 2),
            RepeatRule::Monthly => periodic(Unit::Month, 1),
            RepeatRule::Yearly => periodic(Unit::Year, 1),
            RepeatRule::Weekdays => Self::Scan(ScanRule::Weekdays),
            RepeatRule::AnnuallyOn { month, day } => Self::Scan(ScanRule::AnnuallyOn {
                month: *month,
                day: *day,
            }),
            RepeatRule::MonthlyOnNthWeekday {
                occurrence,
                weekday,
            } => Self::Scan(ScanRule::MonthlyPositional {
                occurrence: Some(*occurrence),
                weekday: *weekday,
            }),
            RepeatRule::MonthlyOnLastWeekday { weekday } => {
                Self::Scan(ScanRule::MonthlyPositional {
                    occurrence: None,
                    weekday: *weekday,
                })
            }
            RepeatRule::Custom(custom) => {
                if custom.unit == Unit::Week && !custom.days_of_week.is_empty() {
                    Self::Scan(ScanRule::WeeklyOnDays {
                        interval: custom.interval,
                        days: custom.days_of_week.clone(),
                    })
                } else {
                    periodic(custom.unit, custom.interval)
                }
            }
        };
        Some(cadence)
    }

    /// ## Summary
    /// First periodic index worth generating when the view window starts at
    /// `view_start`. Lands at or before the first in-window occurrence.
    pub(crate) fn fast_forward_index(
        unit: Unit,
        interval: u32,
        start: NaiveDate,
        view_start: NaiveDate,
    ) -> u32 {
        if view_start <= start {
            return 1;
        }
        let interval = i64::from(interval);
        let periods = match unit {
            Unit::Day => (view_start - start).num_days() / interval,
            Unit::Week => (view_start - start).num_days() / (7 * interval),
            Unit::Month => months_between(start, view_start) / interval - 1,
            Unit::Year => i64::from(view_start.year() - start.year()) / interval - 1,
        };
        u32::try_from(periods.max(1)).unwrap_or(u32::MAX)
    }
}

fn periodic(unit: Unit, interval: u32) -> Cadence {
    Cadence::Periodic { unit, interval }
}

/// ## Summary
/// The `n`-th occurrence of a periodic rule. Month and year steps clamp to the
/// last day of a shorter month, measured from the start day each time.
pub(crate) fn nth_periodic(
    start: NaiveDate,
    unit: Unit,
    interval: u32,
    n: u32,
) -> Option<NaiveDate> {
    let steps = interval.checked_mul(n)?;
    match unit {
        Unit::Day => start.checked_add_days(Days::new(u64::from(steps))),
        Unit::Week => start.checked_add_days(Days::new(u64::from(steps).checked_mul(7)?)),
        Unit::Month => start.checked_add_months(Months::new(steps)),
        Unit::Year => start.checked_add_months(Months::new(steps.checked_mul(12)?)),
    }
}

/// Next day strictly after `cursor` that satisfies a scan rule.
pub(crate) fn next_scan(rule: &ScanRule, start: NaiveDate, cursor: NaiveDate) -> Option<NaiveDate> {
    match rule {
        ScanRule::Weekdays => next_weekday(cursor),
        ScanRule::AnnuallyOn { month, day } => next_annual(cursor, *month, *day),
        ScanRule::MonthlyPositional {
            occurrence,
            weekday,
        } => next_monthly_positional(cursor, *occurrence, *weekday),
        ScanRule::WeeklyOnDays { interval, days } => {
            next_weekly_on_days(start, cursor, *interval, days)
        }
    }
}

fn next_weekday(cursor: NaiveDate) -> Option<NaiveDate> {
    let mut day = cursor.succ_opt()?;
    while matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
        day = day.succ_opt()?;
    }
    Some(day)
}

fn next_annual(cursor: NaiveDate, month: u32, day: u32) -> Option<NaiveDate> {
    let this_year = clamped_date(cursor.year(), month, day)?;
    if this_year > cursor {
        return Some(this_year);
    }
    clamped_date(cursor.year() + 1, month, day)
}

fn next_monthly_positional(
    cursor: NaiveDate,
    occurrence: Option<u8>,
    weekday: Weekday,
) -> Option<NaiveDate> {
    let first_of_month = cursor.with_day(1)?;
    // Every month has each positional weekday, so this ends within two months.
    (0..=12).find_map(|offset| {
        let month = first_of_month.checked_add_months(Months::new(offset))?;
        let candidate = match occurrence {
            Some(n) => NaiveDate::from_weekday_of_month_opt(month.year(), month.month(), weekday, n),
            None => last_weekday_of_month(month.year(), month.month(), weekday),
        }?;
        (candidate > cursor).then_some(candidate)
    })
}

fn next_weekly_on_days(
    start: NaiveDate,
    cursor: NaiveDate,
    interval: u32,
    days: &[Weekday],
) -> Option<NaiveDate> {
    let interval = i64::from(interval);
    let start_week = week_start(start);
    let bound = 7 * interval + 7;

    (1..=bound).find_map(|offset| {
        let day = cursor.checked_add_days(Days::new(offset.unsigned_abs()))?;
        let week_offset = (week_start(day) - start_week).num_days() / 7;
        (days.contains(&day.weekday()) && week_offset.rem_euclid(interval) == 0).then_some(day)
    })
}

/// Monday of the ISO week containing `day`.
fn week_start(day: NaiveDate) -> NaiveDate {
    day - Days::new(u64::from(day.weekday().num_days_from_monday()))
}

fn months_between(from: NaiveDate, to: NaiveDate) -> i64 {
    i64::from(to.year() - from.year()) * 12 + i64::from(to.month()) - i64::from(from.month())
}

fn clamped_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let last_day = first
        .checked_add_months(Months::new(1))?
        .pred_opt()?
        .day();
    first.with_day(day.min(last_day))
}

pub(crate) fn last_weekday_of_month(year: i32, month: u32, weekday: Weekday) -> Option<NaiveDate> {
    let last = NaiveDate::from_ymd_opt(year, month, 1)?
        .checked_add_months(Months::new(1))?
        .pred_opt()?;
    let back = (7 + last.weekday().num_days_from_monday() - weekday.num_days_from_monday()) % 7;
    last.checked_sub_days(Days::new(u64::from(back)))
}
