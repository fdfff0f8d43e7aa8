use almanac_test::component::{Event, ExpansionLimits, generate_recurring_instances_with};
use chrono::NaiveDate;

include!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../almanac-cal/tests/recurrence_cases_data/mod.rs"
));

/// ## Summary
/// Integration-level validation for recurrence behavior using shared cases.
#[test_log::test]
fn recurrence_cases_integration() {
    for case in recurrence_cases() {
        assert_case(&case);
    }
}

#[test_log::test]
fn rule_display_round_trips_through_expansion() {
    use almanac_test::component::RepeatRule;

    let rule: RepeatRule = "every 2 WEEKS on wed, mon (for 4 times)"
        .parse()
        .expect("rule should parse");
    let canonical = rule.to_string();
    assert_eq!(canonical, "Every 2 weeks on Mon,Wed (4 times)");

    let event = Event::new("20240101T080000", "20240101T090000").with_repeat(canonical);
    let limits = ExpansionLimits::default()
        .with_reference_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    let days: Vec<_> = generate_recurring_instances_with(
        &event,
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
        "UTC",
        &limits,
    )
    .into_iter()
    .map(|o| o.date.to_string())
    .collect();

    assert_eq!(days, ["2024-01-01", "2024-01-03", "2024-01-15", "2024-01-17"]);
}
