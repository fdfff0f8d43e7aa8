//! Event records as exchanged with the calendar front end.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use almanac_core::constants::REPEAT_EVENT_KEY;

/// A calendar event.
///
/// Only the fields the expander reads are typed; everything else the front end
/// attaches is kept in `extra` so events survive a JSON round trip untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Local wall-clock start, `YYYYMMDDTHHmmss`.
    pub from_time: String,
    /// Local wall-clock end, `YYYYMMDDTHHmmss`.
    pub to_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat_event: Option<String>,
    /// Zone in which `from_time`/`to_time` are wall-clock time. Defaults to the display zone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub list: Vec<EventAttribute>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A free-form key/value attribute attached to an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventAttribute {
    pub key: String,
    pub value: Value,
}

impl Event {
    #[must_use]
    pub fn new(from_time: impl Into<String>, to_time: impl Into<String>) -> Self {
        Self {
            from_time: from_time.into(),
            to_time: to_time.into(),
            repeat_event: None,
            time_zone: None,
            list: Vec::new(),
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn with_repeat(mut self, rule: impl Into<String>) -> Self {
        self.repeat_event = Some(rule.into());
        self
    }

    #[must_use]
    pub fn with_time_zone(mut self, zone: impl Into<String>) -> Self {
        self.time_zone = Some(zone.into());
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.list.push(EventAttribute {
            key: key.into(),
            value: value.into(),
        });
        self
    }

    /// ## Summary
    /// The repeat-rule text: `repeatEvent` if set and non-blank, otherwise the
    /// `list` attribute keyed `repeatEvent`.
    #[must_use]
    pub fn repeat_rule(&self) -> Option<&str> {
        self.repeat_event
            .as_deref()
            .filter(|rule| !rule.trim().is_empty())
            .or_else(|| {
                self.list
                    .iter()
                    .find(|attr| attr.key == REPEAT_EVENT_KEY)
                    .and_then(|attr| attr.value.as_str())
            })
    }
}

/// A materialised occurrence: the event with concrete times plus the day it falls on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpandedEvent {
    #[serde(flatten)]
    pub event: Event,
    /// `YYYY-MM-DD` in the display zone.
    pub instance_date: String,
}
