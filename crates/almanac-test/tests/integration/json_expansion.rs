use almanac_test::component::{Event, ExpandedEvent, ExpansionLimits, expand_events_for_range_with};
use almanac_test::fixtures::ymd;
use serde_json::{Value, json};

fn expand_json(raw: Value, from: &str, to: &str, display_zone: &str) -> anyhow::Result<Value> {
    let events: Vec<Event> = serde_json::from_value(raw)?;
    let limits = ExpansionLimits::default().with_reference_date(ymd(from)?);
    let expanded: Vec<ExpandedEvent> =
        expand_events_for_range_with(&events, ymd(from)?, ymd(to)?, display_zone, &limits);
    Ok(serde_json::to_value(expanded)?)
}

/// ## Summary
/// Events from the front end come back as flat occurrence records with every
/// unknown field preserved.
#[test_log::test]
fn expanded_json_keeps_event_fields() {
    let raw = json!([
        {
            "fromTime": "20240315T100000",
            "toTime": "20240315T110000",
            "title": "Book club",
            "list": [
                {"key": "repeatEvent", "value": "Monthly on the third Friday"},
                {"key": "color", "value": "#aa3300"}
            ]
        }
    ]);

    let out = expand_json(raw, "2024-03-01", "2024-05-31", "UTC").expect("expansion");

    assert_eq!(
        out,
        json!([
            {
                "fromTime": "20240315T100000",
                "toTime": "20240315T110000",
                "title": "Book club",
                "list": [
                    {"key": "repeatEvent", "value": "Monthly on the third Friday"},
                    {"key": "color", "value": "#aa3300"}
                ],
                "instanceDate": "2024-03-15"
            },
            {
                "fromTime": "20240419T100000",
                "toTime": "20240419T110000",
                "title": "Book club",
                "list": [
                    {"key": "repeatEvent", "value": "Monthly on the third Friday"},
                    {"key": "color", "value": "#aa3300"}
                ],
                "instanceDate": "2024-04-19"
            },
            {
                "fromTime": "20240517T100000",
                "toTime": "20240517T110000",
                "title": "Book club",
                "list": [
                    {"key": "repeatEvent", "value": "Monthly on the third Friday"},
                    {"key": "color", "value": "#aa3300"}
                ],
                "instanceDate": "2024-05-17"
            }
        ])
    );
}

/// ## Summary
/// Times are written back in the event's own zone while `instanceDate` follows
/// the display zone.
#[test_log::test]
fn expanded_json_uses_event_zone_for_times() {
    let raw = json!([
        {
            "fromTime": "20240101T200000",
            "toTime": "20240101T210000",
            "timeZone": "America/New_York",
            "repeatEvent": "Every 1 days (2 times)"
        }
    ]);

    let out = expand_json(raw, "2024-01-01", "2024-01-31", "Asia/Kolkata").expect("expansion");
    let records = out.as_array().expect("array");

    // 20:00 in New York is 06:30 the next day in Kolkata.
    let summary: Vec<_> = records
        .iter()
        .map(|r| (r["fromTime"].clone(), r["instanceDate"].clone()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (json!("20240101T200000"), json!("2024-01-02")),
            (json!("20240102T200000"), json!("2024-01-03")),
        ]
    );
    assert!(records.iter().all(|r| r["timeZone"] == json!("America/New_York")));
}

#[test_log::test]
fn malformed_events_are_skipped() {
    let raw = json!([
        {"fromTime": "yesterday", "toTime": "today", "repeatEvent": "Daily"},
        {"fromTime": "20240105T090000", "toTime": "20240105T093000"}
    ]);

    let out = expand_json(raw, "2024-01-01", "2024-01-31", "UTC").expect("expansion");

    assert_eq!(out.as_array().map(Vec::len), Some(1));
    assert_eq!(out[0]["instanceDate"], json!("2024-01-05"));
}
