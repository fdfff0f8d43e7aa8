//! Shared ambient layer for the almanac workspace.
//!
//! Holds the error taxonomy, configuration loading and the constants that
//! bound recurrence expansion.

pub mod config;
pub mod constants;
pub mod error;
