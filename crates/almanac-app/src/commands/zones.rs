use almanac_cal::get_current_time_in_timezone;
use almanac_cal::timezone::table;

pub fn list() {
    for zone in table::all_timezones() {
        println!("{}\t{}", zone.id, zone.label);
    }
}

pub fn now(zone: &str) {
    let resolved = table::resolve_display_zone(zone);
    let now = get_current_time_in_timezone(resolved);
    println!("{}\t{resolved}", now.format("%Y-%m-%d %H:%M:%S"));
}
