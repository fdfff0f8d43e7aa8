//! Occurrence enumeration for a single event and for event lists.

use chrono::{DateTime, Days, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};

use almanac_core::config::ExpansionSettings;
use almanac_core::constants::{
    MAX_EMITTED_OCCURRENCES, MAX_SUB_YEARLY_ITERATIONS, MAX_YEARLY_ITERATIONS,
    SUB_YEARLY_HORIZON_DAYS, YEARLY_HORIZON_YEARS,
};

use super::rule::{EndCondition, RepeatRule};
use super::step::{Cadence, next_scan, nth_periodic};
use crate::event::{Event, ExpandedEvent};
use crate::timezone::{
    TimeZoneResolver, format_local_date_time, table, try_parse_local_date_time,
};

/// ## Summary
/// Safety caps and horizons for one expansion call.
///
/// Defaults match the values the calendar has always used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpansionLimits {
    pub max_sub_yearly_iterations: usize,
    pub max_yearly_iterations: usize,
    pub max_emitted_occurrences: usize,
    pub sub_yearly_horizon_days: i64,
    pub yearly_horizon_years: i32,
    /// The "today" horizons are measured from. `None` reads the clock in the display zone.
    pub reference_date: Option<NaiveDate>,
}

impl Default for ExpansionLimits {
    fn default() -> Self {
        Self {
            max_sub_yearly_iterations: MAX_SUB_YEARLY_ITERATIONS,
            max_yearly_iterations: MAX_YEARLY_ITERATIONS,
            max_emitted_occurrences: MAX_EMITTED_OCCURRENCES,
            sub_yearly_horizon_days: SUB_YEARLY_HORIZON_DAYS,
            yearly_horizon_years: YEARLY_HORIZON_YEARS,
            reference_date: None,
        }
    }
}

impl From<&ExpansionSettings> for ExpansionLimits {
    fn from(settings: &ExpansionSettings) -> Self {
        Self {
            max_sub_yearly_iterations: settings.max_sub_yearly_iterations,
            max_yearly_iterations: settings.max_yearly_iterations,
            max_emitted_occurrences: settings.max_emitted_occurrences,
            sub_yearly_horizon_days: settings.sub_yearly_horizon_days,
            yearly_horizon_years: settings.yearly_horizon_years,
            reference_date: None,
        }
    }
}

impl ExpansionLimits {
    #[must_use]
    pub fn with_reference_date(mut self, today: NaiveDate) -> Self {
        self.reference_date = Some(today);
        self
    }

    fn horizon(&self, today: NaiveDate, yearly: bool) -> NaiveDate {
        let horizon = if yearly {
            u32::try_from(self.yearly_horizon_years)
                .ok()
                .and_then(|years| years.checked_mul(12))
                .and_then(|months| today.checked_add_months(Months::new(months)))
        } else {
            u64::try_from(self.sub_yearly_horizon_days)
                .ok()
                .and_then(|days| today.checked_add_days(Days::new(days)))
        };
        horizon.unwrap_or(NaiveDate::MAX)
    }
}

/// One concrete occurrence of an event.
#[derive(Debug, Clone, PartialEq)]
pub struct Occurrence<'a> {
    /// Day the occurrence starts on in the display zone.
    pub date: NaiveDate,
    pub event: &'a Event,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

/// The resolved anchor of an event.
///
/// Stepping happens on the event zone's calendar so every occurrence keeps the
/// event's own wall-clock time; `display_day` is where the first one lands.
struct Anchor {
    display_zone: &'static str,
    event_zone: String,
    start_day: NaiveDate,
    time_of_day: NaiveTime,
    duration: TimeDelta,
    display_day: NaiveDate,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
}

/// ## Summary
/// Enumerates the occurrences of `event` whose calendar day falls in
/// `[view_start, view_end]`, using the default limits.
#[must_use]
pub fn generate_recurring_instances<'a>(
    event: &'a Event,
    view_start: NaiveDate,
    view_end: NaiveDate,
    display_zone: &str,
) -> Vec<Occurrence<'a>> {
    generate_recurring_instances_with(
        event,
        view_start,
        view_end,
        display_zone,
        &ExpansionLimits::default(),
    )
}

/// ## Summary
/// Enumerates the occurrences of `event` whose calendar day falls in
/// `[view_start, view_end]`.
///
/// Occurrences come out in strictly increasing day order with no duplicate
/// days. Each keeps the event's wall-clock time in its own zone and its
/// duration; `date` is the day the occurrence starts on in `display_zone`.
/// Malformed times yield nothing; unrecognized rules yield only the first
/// occurrence.
#[must_use]
#[tracing::instrument(skip(event, limits), fields(from = %event.from_time, rule = event.repeat_rule()))]
pub fn generate_recurring_instances_with<'a>(
    event: &'a Event,
    view_start: NaiveDate,
    view_end: NaiveDate,
    display_zone: &str,
    limits: &ExpansionLimits,
) -> Vec<Occurrence<'a>> {
    if view_start > view_end {
        tracing::warn!(%view_start, %view_end, "View window is inverted");
        return Vec::new();
    }

    let resolver = TimeZoneResolver::new();
    let Some(anchor) = resolve_anchor(&resolver, event, display_zone) else {
        return Vec::new();
    };

    let in_window = |day: NaiveDate| day >= view_start && day <= view_end;
    let mut occurrences = Vec::new();
    if in_window(anchor.display_day) {
        occurrences.push(Occurrence {
            date: anchor.display_day,
            event,
            start_date: anchor.start_date,
            end_date: anchor.end_date,
        });
    }

    let rule = match event.repeat_rule() {
        None => RepeatRule::NoRepeat,
        Some(text) => RepeatRule::classify(text).unwrap_or_else(|| {
            tracing::warn!(rule = text, "Unrecognized repeat rule; emitting first occurrence only");
            RepeatRule::NoRepeat
        }),
    };
    let Some(cadence) = Cadence::for_rule(&rule) else {
        return occurrences;
    };

    let today = limits.reference_date.unwrap_or_else(|| {
        resolver
            .current_time_at(Utc::now(), anchor.display_zone)
            .date()
    });
    let (ceiling, count_limit) = bounds(&rule, today, limits);
    let max_iterations = if rule.is_yearly() {
        limits.max_yearly_iterations
    } else {
        limits.max_sub_yearly_iterations
    };

    // An event-zone day is at most one day away from its display-zone day.
    let earliest = view_start.pred_opt().unwrap_or(view_start);
    let target = earliest.pred_opt().unwrap_or(earliest);

    // Counted rules must walk from the start to know how many they have produced.
    let fast_forward = count_limit.is_none() && anchor.start_day < target;
    let (mut index, mut cursor) = if fast_forward {
        starting_point(&cadence, anchor.start_day, target)
    } else {
        (1, anchor.start_day)
    };
    let mut generated: u32 = 1;
    let mut last_day = anchor.display_day;

    for _ in 0..max_iterations {
        if count_limit.is_some_and(|limit| generated >= limit) {
            break;
        }

        let next = match &cadence {
            Cadence::Periodic { unit, interval } => {
                let next = nth_periodic(anchor.start_day, *unit, *interval, index);
                index = index.saturating_add(1);
                next
            }
            Cadence::Scan(scan) => next_scan(scan, anchor.start_day, cursor),
        };
        let Some(next) = next else {
            break;
        };
        if next <= cursor {
            tracing::debug!(%next, "Cursor did not advance");
            break;
        }
        if next > ceiling {
            break;
        }
        cursor = next;
        generated = generated.saturating_add(1);

        if next < earliest {
            continue;
        }
        let Some(occurrence) = build_occurrence(&resolver, &anchor, event, next) else {
            continue;
        };
        if occurrence.date > view_end {
            break;
        }
        // Zones that shift on different days can fold two starts onto one display day.
        if occurrence.date < view_start || occurrence.date <= last_day {
            continue;
        }
        last_day = occurrence.date;
        tracing::trace!(date = %occurrence.date, "Occurrence");
        occurrences.push(occurrence);

        if occurrences.len() >= limits.max_emitted_occurrences {
            tracing::debug!(cap = limits.max_emitted_occurrences, "Occurrence cap reached");
            break;
        }
    }

    tracing::debug!(count = occurrences.len(), %ceiling, "Expanded event");
    occurrences
}

/// Last event-zone day the walk may reach, and the total occurrence count if
/// the rule has one.
fn bounds(
    rule: &RepeatRule,
    today: NaiveDate,
    limits: &ExpansionLimits,
) -> (NaiveDate, Option<u32>) {
    let ceiling = limits.horizon(today, rule.is_yearly());
    match rule.end_condition() {
        EndCondition::Never => (ceiling, None),
        EndCondition::After(count) => (ceiling, Some(count)),
        EndCondition::On(until) => (ceiling.min(until), None),
    }
}

/// Periodic index and scan cursor to resume from when skipping ahead to `target`.
fn starting_point(cadence: &Cadence, start_day: NaiveDate, target: NaiveDate) -> (u32, NaiveDate) {
    match cadence {
        Cadence::Periodic { unit, interval } => (
            Cadence::fast_forward_index(*unit, *interval, start_day, target),
            start_day,
        ),
        Cadence::Scan(_) => (1, target.max(start_day)),
    }
}

/// ## Summary
/// Materialises every occurrence of every event in `[view_start, view_end]`,
/// using the default limits.
#[must_use]
pub fn expand_events_for_range(
    events: &[Event],
    view_start: NaiveDate,
    view_end: NaiveDate,
    display_zone: &str,
) -> Vec<ExpandedEvent> {
    expand_events_for_range_with(
        events,
        view_start,
        view_end,
        display_zone,
        &ExpansionLimits::default(),
    )
}

/// ## Summary
/// Materialises every occurrence of every event in `[view_start, view_end]`.
///
/// Each result is a copy of its event with `fromTime`/`toTime` rewritten to the
/// occurrence, as wall-clock time in the event's own zone, plus the
/// display-zone `instanceDate`. Input events are not modified.
#[must_use]
#[tracing::instrument(skip(events, limits), fields(events = events.len()))]
pub fn expand_events_for_range_with(
    events: &[Event],
    view_start: NaiveDate,
    view_end: NaiveDate,
    display_zone: &str,
    limits: &ExpansionLimits,
) -> Vec<ExpandedEvent> {
    let resolver = TimeZoneResolver::new();

    events
        .iter()
        .flat_map(|event| {
            let zone = resolver
                .resolve_event_zone(event.time_zone.as_deref().unwrap_or(display_zone));
            generate_recurring_instances_with(event, view_start, view_end, display_zone, limits)
                .into_iter()
                .filter_map(|occurrence| materialize(&resolver, &zone, &occurrence))
                .collect::<Vec<_>>()
        })
        .collect()
}

fn materialize(
    resolver: &TimeZoneResolver,
    zone: &str,
    occurrence: &Occurrence<'_>,
) -> Option<ExpandedEvent> {
    let from = resolver.instant_to_local(occurrence.start_date, zone).ok()?;
    let to = resolver.instant_to_local(occurrence.end_date, zone).ok()?;

    let mut event = occurrence.event.clone();
    event.from_time = format_local_date_time(from);
    event.to_time = format_local_date_time(to);

    Some(ExpandedEvent {
        event,
        instance_date: occurrence.date.format("%Y-%m-%d").to_string(),
    })
}

fn resolve_anchor(resolver: &TimeZoneResolver, event: &Event, display_zone: &str) -> Option<Anchor> {
    let event_zone = resolver.resolve_event_zone(event.time_zone.as_deref().unwrap_or(display_zone));
    let display_zone = table::resolve_display_zone(display_zone);

    let parse = |s: &str| {
        try_parse_local_date_time(s)
            .inspect_err(|e| tracing::debug!(date_str = s, error = %e, "Unparseable event time"))
            .ok()
    };
    let local_start = parse(&event.from_time)?;
    let local_end = parse(&event.to_time)?;

    let start_date = resolver.local_to_instant(local_start, &event_zone).ok()?;
    let end_date = resolver.local_to_instant(local_end, &event_zone).ok()?;
    let display_day = resolver.instant_to_local(start_date, display_zone).ok()?.date();

    Some(Anchor {
        display_zone,
        event_zone,
        start_day: local_start.date(),
        time_of_day: local_start.time(),
        duration: end_date - start_date,
        display_day,
        start_date,
        end_date,
    })
}

fn build_occurrence<'a>(
    resolver: &TimeZoneResolver,
    anchor: &Anchor,
    event: &'a Event,
    day: NaiveDate,
) -> Option<Occurrence<'a>> {
    let local = NaiveDateTime::new(day, anchor.time_of_day);
    let start_date = resolver.local_to_instant(local, &anchor.event_zone).ok()?;
    let date = resolver
        .instant_to_local(start_date, anchor.display_zone)
        .ok()?
        .date();
    Some(Occurrence {
        date,
        event,
        start_date,
        end_date: start_date + anchor.duration,
    })
}
