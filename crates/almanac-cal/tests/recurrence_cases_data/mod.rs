// Shared recurrence scenarios.
//
// Included by the almanac-cal unit tests and the almanac-test integration
// tests. The including module must have `Event`, `ExpansionLimits`,
// `NaiveDate` and `generate_recurring_instances_with` in scope.

pub struct RecurrenceCase {
    pub name: &'static str,
    pub from_time: &'static str,
    pub to_time: &'static str,
    pub rule: Option<&'static str>,
    pub time_zone: Option<&'static str>,
    pub display_zone: &'static str,
    pub view: (&'static str, &'static str),
    pub today: &'static str,
    pub expected: &'static [&'static str],
}

const fn case(
    name: &'static str,
    from_time: &'static str,
    to_time: &'static str,
    rule: Option<&'static str>,
    view: (&'static str, &'static str),
    today: &'static str,
    expected: &'static [&'static str],
) -> RecurrenceCase {
    RecurrenceCase {
        name,
        from_time,
        to_time,
        rule,
        time_zone: None,
        display_zone: "UTC",
        view,
        today,
        expected,
    }
}

pub fn recurrence_cases() -> Vec<RecurrenceCase> {
    vec![
        case(
            "every_day",
            "20240101T090000",
            "20240101T100000",
            Some("Every day"),
            ("2024-01-01", "2024-01-05"),
            "2024-01-01",
            &["2024-01-01", "2024-01-02", "2024-01-03", "2024-01-04", "2024-01-05"],
        ),
        case(
            "monthly_clamps_short_months_from_start_day",
            "20240131T090000",
            "20240131T093000",
            Some("Monthly"),
            ("2024-01-01", "2024-04-30"),
            "2024-01-01",
            &["2024-01-31", "2024-02-29", "2024-03-31", "2024-04-30"],
        ),
        case(
            "monthly_third_friday",
            "20240315T100000",
            "20240315T110000",
            Some("Monthly on the third Friday"),
            ("2024-03-01", "2024-09-30"),
            "2024-03-01",
            &[
                "2024-03-15",
                "2024-04-19",
                "2024-05-17",
                "2024-06-21",
                "2024-07-19",
                "2024-08-16",
                "2024-09-20",
            ],
        ),
        case(
            "monthly_last_friday",
            "20240126T100000",
            "20240126T110000",
            Some("Monthly on the last Friday"),
            ("2024-01-01", "2024-04-30"),
            "2024-01-01",
            &["2024-01-26", "2024-02-23", "2024-03-29", "2024-04-26"],
        ),
        case(
            "every_two_weeks_on_mon_wed",
            "20240101T080000",
            "20240101T083000",
            Some("Every 2 weeks on Mon,Wed"),
            ("2024-01-01", "2024-02-15"),
            "2024-01-01",
            &[
                "2024-01-01",
                "2024-01-03",
                "2024-01-15",
                "2024-01-17",
                "2024-01-29",
                "2024-01-31",
                "2024-02-12",
                "2024-02-14",
            ],
        ),
        case(
            "weekdays_skip_weekend",
            "20240105T090000",
            "20240105T100000",
            Some("Every weekday (Monday to Friday)"),
            ("2024-01-05", "2024-01-12"),
            "2024-01-01",
            &["2024-01-05", "2024-01-08", "2024-01-09", "2024-01-10", "2024-01-11", "2024-01-12"],
        ),
        case(
            "annually_on_march_5",
            "20240305T120000",
            "20240305T130000",
            Some("Annually on March 5"),
            ("2024-01-01", "2027-12-31"),
            "2025-01-01",
            &["2024-03-05", "2025-03-05", "2026-03-05", "2027-03-05"],
        ),
        case(
            "count_includes_first_occurrence",
            "20240101T090000",
            "20240101T100000",
            Some("Every 1 days (3 times)"),
            ("2024-01-01", "2024-01-31"),
            "2024-01-01",
            &["2024-01-01", "2024-01-02", "2024-01-03"],
        ),
        case(
            "count_spent_before_window",
            "20240101T090000",
            "20240101T100000",
            Some("Every 1 weeks (4 times)"),
            ("2024-01-10", "2024-02-28"),
            "2024-01-01",
            &["2024-01-15", "2024-01-22"],
        ),
        case(
            "until_date_is_inclusive",
            "20240101T090000",
            "20240101T100000",
            Some("Every 1 weeks (until 2024-01-22)"),
            ("2024-01-01", "2024-01-31"),
            "2024-01-01",
            &["2024-01-01", "2024-01-08", "2024-01-15", "2024-01-22"],
        ),
        case(
            "fast_forward_keeps_day_phase",
            "20240101T090000",
            "20240101T100000",
            Some("Every 3 days"),
            ("2024-03-01", "2024-03-07"),
            "2024-03-01",
            &["2024-03-01", "2024-03-04", "2024-03-07"],
        ),
        case(
            "fast_forward_keeps_month_clamp",
            "20240131T090000",
            "20240131T100000",
            Some("Monthly"),
            ("2024-06-01", "2024-08-31"),
            "2024-06-01",
            &["2024-06-30", "2024-07-31", "2024-08-31"],
        ),
        case(
            "every_two_months",
            "20240131T090000",
            "20240131T100000",
            Some("Every 2 months"),
            ("2024-01-01", "2024-06-30"),
            "2024-01-01",
            &["2024-01-31", "2024-03-31", "2024-05-31"],
        ),
        case(
            "bi_weekly",
            "20240103T090000",
            "20240103T100000",
            Some("Bi-weekly"),
            ("2024-01-01", "2024-02-10"),
            "2024-01-01",
            &["2024-01-03", "2024-01-17", "2024-01-31"],
        ),
        case(
            "yearly_from_leap_day",
            "20240229T090000",
            "20240229T100000",
            Some("Yearly"),
            ("2024-01-01", "2028-12-31"),
            "2024-01-01",
            &["2024-02-29", "2025-02-28", "2026-02-28", "2027-02-28", "2028-02-29"],
        ),
        case(
            "yearly_counted",
            "20240615T090000",
            "20240615T100000",
            Some("Every 1 year (2 times)"),
            ("2024-01-01", "2030-12-31"),
            "2024-01-01",
            &["2024-06-15", "2025-06-15"],
        ),
        case(
            "no_repeat_inside_window",
            "20240110T090000",
            "20240110T100000",
            None,
            ("2024-01-01", "2024-01-31"),
            "2024-01-01",
            &["2024-01-10"],
        ),
        case(
            "no_repeat_sentinel",
            "20240110T090000",
            "20240110T100000",
            Some("Does not repeat"),
            ("2024-01-01", "2024-01-31"),
            "2024-01-01",
            &["2024-01-10"],
        ),
        case(
            "starts_on_view_end",
            "20240131T090000",
            "20240131T100000",
            None,
            ("2024-01-01", "2024-01-31"),
            "2024-01-01",
            &["2024-01-31"],
        ),
        case(
            "starts_day_after_view_end",
            "20240201T000000",
            "20240201T010000",
            None,
            ("2024-01-01", "2024-01-31"),
            "2024-01-01",
            &[],
        ),
        case(
            "unrecognized_rule_keeps_first_occurrence",
            "20240102T090000",
            "20240102T100000",
            Some("Every blue moon"),
            ("2024-01-01", "2024-01-31"),
            "2024-01-01",
            &["2024-01-02"],
        ),
        case(
            "horizon_stops_sub_yearly_rules",
            "20240101T090000",
            "20240101T100000",
            Some("Daily"),
            ("2024-01-01", "2024-01-10"),
            "2023-01-03",
            &["2024-01-01", "2024-01-02", "2024-01-03"],
        ),
        case(
            "malformed_start_yields_nothing",
            "2024-01-01 09:00",
            "20240101T100000",
            Some("Daily"),
            ("2024-01-01", "2024-01-10"),
            "2024-01-01",
            &[],
        ),
        RecurrenceCase {
            display_zone: "Asia/Kolkata",
            time_zone: Some("UTC"),
            ..case(
                "display_zone_moves_calendar_day",
                "20240101T230000",
                "20240101T233000",
                Some("Daily"),
                ("2024-01-01", "2024-01-03"),
                "2024-01-01",
                &["2024-01-02", "2024-01-03"],
            )
        },
        RecurrenceCase {
            display_zone: "America/New_York",
            ..case(
                "daily_across_dst_start",
                "20240309T090000",
                "20240309T100000",
                Some("Daily"),
                ("2024-03-09", "2024-03-11"),
                "2024-03-01",
                &["2024-03-09", "2024-03-10", "2024-03-11"],
            )
        },
    ]
}

fn case_date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("case dates are YYYY-MM-DD")
}

pub fn assert_case(case: &RecurrenceCase) {
    let mut event = Event::new(case.from_time, case.to_time);
    event.repeat_event = case.rule.map(str::to_string);
    event.time_zone = case.time_zone.map(str::to_string);

    let limits = ExpansionLimits::default().with_reference_date(case_date(case.today));
    let occurrences = generate_recurring_instances_with(
        &event,
        case_date(case.view.0),
        case_date(case.view.1),
        case.display_zone,
        &limits,
    );

    let dates: Vec<String> = occurrences
        .iter()
        .map(|o| o.date.format("%Y-%m-%d").to_string())
        .collect();
    assert_eq!(dates, case.expected, "case {}", case.name);

    for pair in occurrences.windows(2) {
        assert!(pair[0].date < pair[1].date, "case {} is not increasing", case.name);
        assert!(pair[0].start_date < pair[1].start_date, "case {}", case.name);
    }
    if let Some(first) = occurrences.first() {
        let duration = first.end_date - first.start_date;
        for occurrence in &occurrences {
            assert_eq!(occurrence.end_date - occurrence.start_date, duration, "case {}", case.name);
            assert!(std::ptr::eq(occurrence.event, &event), "case {}", case.name);
        }
    }
}
