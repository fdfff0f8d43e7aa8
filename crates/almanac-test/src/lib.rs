//! Almanac - integration test support.
//!
//! Re-exports the workspace crates so integration tests can use
//! `almanac_test::` paths.

pub mod component {
    pub use almanac_cal::*;
    pub use almanac_core::*;
}

pub mod fixtures {
    use chrono::NaiveDate;

    /// Parses a `YYYY-MM-DD` date.
    ///
    /// ## Errors
    /// Returns the chrono parse error for anything else.
    pub fn ymd(s: &str) -> chrono::ParseResult<NaiveDate> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
    }
}
