use almanac_test::component::ExpansionLimits;
use almanac_test::component::config::Settings;
use almanac_test::component::constants::{FALLBACK_TIMEZONE, MAX_EMITTED_OCCURRENCES};

#[test_log::test]
fn default_settings_drive_expansion_limits() {
    let settings = Settings::load().expect("defaults should load");
    assert_eq!(settings.display.timezone, FALLBACK_TIMEZONE);

    let limits = ExpansionLimits::from(&settings.expansion);
    assert_eq!(limits, ExpansionLimits::default());
    assert_eq!(limits.max_emitted_occurrences, MAX_EMITTED_OCCURRENCES);
    assert_eq!(limits.reference_date, None);
}
