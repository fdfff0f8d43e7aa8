//! Recurring-event expansion.
//!
//! A free-text repeat rule is classified into a [`RepeatRule`], then stepped
//! over the event zone's calendar to enumerate the occurrences that fall in
//! a view window.

mod expander;
mod rule;
mod step;


pub use expander::{
    ExpansionLimits, Occurrence, expand_events_for_range, expand_events_for_range_with,
    generate_recurring_instances, generate_recurring_instances_with,
};
pub use rule::{CustomRule, EndCondition, RepeatRule, RuleError, Unit};
