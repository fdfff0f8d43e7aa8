use almanac_test::component::timezone::table;
use almanac_test::component::{
    TimeZoneResolver, convert_to_selected_timezone, format_display_values,
    get_current_time_in_timezone, parse_local_date_time, resolve_offset_minutes,
};
use chrono::{TimeZone, Utc};

#[test_log::test]
fn offsets_follow_daylight_saving() {
    let winter = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
    let summer = Utc.with_ymd_and_hms(2024, 7, 15, 12, 0, 0).unwrap();

    assert_eq!(resolve_offset_minutes(winter, "America/New_York"), -300);
    assert_eq!(resolve_offset_minutes(summer, "America/New_York"), -240);
    assert_eq!(resolve_offset_minutes(summer, "Australia/Sydney"), 600);
    assert_eq!(resolve_offset_minutes(winter, "Australia/Sydney"), 660);
    assert_eq!(resolve_offset_minutes(winter, "Nowhere/Special"), 0);
}

#[test_log::test]
fn converts_between_event_and_display_zones() {
    let converted = convert_to_selected_timezone(
        "20240115T100000",
        "Asia/Kolkata",
        Some("America/New_York"),
    )
    .expect("valid input");

    assert_eq!(converted.date, Utc.with_ymd_and_hms(2024, 1, 15, 15, 0, 0).unwrap());
    assert_eq!(format_display_values(&converted.display_values), "2024-01-15 20:30:00");
    assert_eq!(converted.display_values.timezone, "Asia/Kolkata");
}

#[test_log::test]
fn unsupported_display_zone_falls_back_to_utc() {
    let converted = convert_to_selected_timezone("20240115T100000", "Mars/Olympus", None)
        .expect("valid input");

    assert_eq!(converted.display_values.timezone, "UTC");
    assert_eq!(converted.date, Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap());
}

#[test_log::test]
fn legacy_aliases_resolve() {
    let resolver = TimeZoneResolver::new();
    assert_eq!(resolver.resolve_event_zone("ist"), "Asia/Kolkata");
    assert_eq!(resolver.resolve_event_zone("est"), "America/New_York");
    assert_eq!(resolver.resolve_event_zone("pst"), "America/Los_Angeles");
    assert_eq!(resolver.resolve_event_zone("gmt"), "GMT");
    assert_eq!(resolver.resolve_event_zone("UTC"), "UTC");
}

#[test_log::test]
fn malformed_strings_do_not_convert() {
    for input in ["", "2024-01-15 10:00", "20241315T100000", "20240115T1000000"] {
        assert!(
            convert_to_selected_timezone(input, "UTC", None).is_none(),
            "{input:?} should not convert"
        );
        assert!(parse_local_date_time(input).is_none(), "{input:?}");
    }
}

#[test_log::test]
fn zone_table_is_queryable() {
    assert!(table::is_valid_timezone("Asia/Kathmandu"));
    assert!(!table::is_valid_timezone("ist"));
    assert!(table::all_timezones().iter().any(|entry| entry.id == "UTC"));
    assert!(table::timezone_label("Asia/Tokyo").is_some());
}

#[test_log::test]
fn current_time_is_near_now() {
    let before = Utc::now().naive_utc();
    let now = get_current_time_in_timezone("UTC");
    let after = Utc::now().naive_utc();

    assert!(now >= before - chrono::TimeDelta::seconds(1));
    assert!(now <= after);
}
