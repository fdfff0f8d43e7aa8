use almanac_cal::TimeZoneResolver;
use anyhow::Result;

pub fn run(date: &str, display_zone: &str, event_zone: Option<&str>) -> Result<()> {
    println!("{}", render(date, display_zone, event_zone)?);
    Ok(())
}

/// One line: the UTC instant, the display-zone wall clock, and the zone actually used.
pub fn render(date: &str, display_zone: &str, event_zone: Option<&str>) -> Result<String> {
    let converted = TimeZoneResolver::new().try_convert(date, display_zone, event_zone)?;
    Ok(format!(
        "{}\t{}\t{}",
        converted.date.to_rfc3339(),
        converted.display_values,
        converted.display_values.timezone
    ))
}
