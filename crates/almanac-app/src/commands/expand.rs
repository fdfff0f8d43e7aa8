use std::io::Read;
use std::path::Path;

use almanac_cal::{Event, ExpansionLimits, expand_events_for_range_with};
use almanac_core::error::CoreError;
use anyhow::{Context, Result};
use chrono::NaiveDate;

pub fn run(
    events_path: &Path,
    from: &str,
    to: &str,
    display_zone: &str,
    limits: &ExpansionLimits,
) -> Result<()> {
    let view_start = parse_day(from)?;
    let view_end = parse_day(to)?;
    if view_start > view_end {
        anyhow::bail!("--from {from} is after --to {to}");
    }

    let raw = read_events(events_path)?;
    let expanded = expand_json(&raw, view_start, view_end, display_zone, limits)?;
    println!("{expanded}");
    Ok(())
}

/// Parses a JSON array of events and renders the expanded occurrences as pretty JSON.
pub fn expand_json(
    raw: &str,
    view_start: NaiveDate,
    view_end: NaiveDate,
    display_zone: &str,
    limits: &ExpansionLimits,
) -> Result<String> {
    let events: Vec<Event> =
        serde_json::from_str(raw).context("events must be a JSON array of event objects")?;
    tracing::info!(count = events.len(), %view_start, %view_end, display_zone, "Expanding events");

    let expanded = expand_events_for_range_with(&events, view_start, view_end, display_zone, limits);
    Ok(serde_json::to_string_pretty(&expanded)?)
}

pub fn parse_day(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| CoreError::InvalidInput(format!("'{s}' is not a YYYY-MM-DD date: {e}")).into())
}

fn read_events(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .context("failed to read events from stdin")?;
        return Ok(raw);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
