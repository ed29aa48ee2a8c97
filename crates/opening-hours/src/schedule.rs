//! Weekly opening-hours tables.
//!
//! A [`WeeklySchedule`] maps each [`Weekday`] to a [`DaySchedule`] holding up
//! to two windows (morning and afternoon). Tables come from a content store
//! whose fields are loosely typed: empty strings, `null` and `false` all mean
//! "not set", and a day may be stored as a scalar instead of an object.
//! [`WeeklySchedule::from_json_value`] accepts that shape without failing on
//! it.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

use crate::error::{Result, ScheduleError};
use crate::time::TimeWindow;
use crate::weekday::Weekday;

/// Opening windows for a single weekday.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DaySchedule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub morning: Option<TimeWindow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub afternoon: Option<TimeWindow>,
}

impl DaySchedule {
    /// A day with a lunch break: `morning` then `afternoon`.
    pub fn split(morning: TimeWindow, afternoon: TimeWindow) -> Self {
        Self {
            morning: Some(morning),
            afternoon: Some(afternoon),
        }
    }

    /// A day with only a morning window.
    pub fn morning_only(morning: TimeWindow) -> Self {
        Self {
            morning: Some(morning),
            afternoon: None,
        }
    }

    /// A day with only an afternoon window.
    pub fn afternoon_only(afternoon: TimeWindow) -> Self {
        Self {
            morning: None,
            afternoon: Some(afternoon),
        }
    }

    /// `true` when the morning has an end boundary configured (valid or not).
    pub fn has_morning_end(&self) -> bool {
        self.morning.as_ref().is_some_and(|w| w.end.is_some())
    }

    /// `true` when the afternoon has a start boundary configured (valid or not).
    pub fn has_afternoon_start(&self) -> bool {
        self.afternoon.as_ref().is_some_and(|w| w.start.is_some())
    }
}

/// The recurring weekly table for one venue. Missing days are closed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WeeklySchedule {
    days: BTreeMap<Weekday, DaySchedule>,
}

impl WeeklySchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with_day(mut self, day: Weekday, schedule: DaySchedule) -> Self {
        self.days.insert(day, schedule);
        self
    }

    pub fn insert(&mut self, day: Weekday, schedule: DaySchedule) {
        self.days.insert(day, schedule);
    }

    /// The entry for `day`, if the table has one.
    pub fn get(&self, day: Weekday) -> Option<&DaySchedule> {
        self.days.get(&day)
    }

    /// `true` when the table has no day entries at all.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Parse a store document from JSON text. See [`Self::from_json_value`].
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::InvalidSchedule`] if the text is not JSON or
    /// the top-level value is not an object.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(s)
            .map_err(|e| ScheduleError::InvalidSchedule(format!("not valid JSON: {e}")))?;
        Self::from_json_value(&value)
    }

    /// Build a table from the store's loosely typed JSON value.
    ///
    /// `null` and `false` at the top level yield an empty table. Day values
    /// that are not objects or are empty objects are dropped, as are unknown
    /// day keys. Boundaries
    /// that are blank, `null` or `false` are absent; other non-time values
    /// are kept as [`crate::Boundary::Malformed`].
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::InvalidSchedule`] if the top-level value is
    /// some other scalar or an array.
    ///
    /// # Examples
    ///
    /// ```
    /// use opening_hours::{WeeklySchedule, Weekday};
    ///
    /// let json = serde_json::json!({
    ///     "monday": {"morning": {"start": "09:00:00", "end": "12:00:00"}},
    ///     "tuesday": false,
    /// });
    /// let schedule = WeeklySchedule::from_json_value(&json).unwrap();
    /// assert!(schedule.get(Weekday::Monday).is_some());
    /// assert!(schedule.get(Weekday::Tuesday).is_none());
    /// ```
    pub fn from_json_value(value: &Value) -> Result<Self> {
        let map = match value {
            Value::Null | Value::Bool(false) => return Ok(Self::default()),
            Value::Object(map) => map,
            other => {
                return Err(ScheduleError::InvalidSchedule(format!(
                    "expected an object keyed by weekday, got {}",
                    json_kind(other)
                )));
            }
        };

        let mut schedule = Self::default();
        for (key, day_value) in map {
            let Some(day) = Weekday::parse(key) else {
                warn!(key = %key, "ignoring unknown weekday in schedule");
                continue;
            };
            match day_value {
                Value::Object(fields) if fields.is_empty() => {
                    warn!(day = %day, "ignoring empty day entry");
                }
                Value::Object(fields) => {
                    schedule.insert(day, day_from_fields(fields));
                }
                other => {
                    warn!(
                        day = %day,
                        kind = json_kind(other),
                        "ignoring day entry that is not an object"
                    );
                }
            }
        }
        Ok(schedule)
    }
}

// ── Store decoding helpers ──────────────────────────────────────────────────

fn day_from_fields(fields: &Map<String, Value>) -> DaySchedule {
    DaySchedule {
        morning: fields.get("morning").and_then(window_from_value),
        afternoon: fields.get("afternoon").and_then(window_from_value),
    }
}

fn window_from_value(value: &Value) -> Option<TimeWindow> {
    let fields = value.as_object()?;
    let start = fields.get("start").map(boundary_text).unwrap_or_default();
    let end = fields.get("end").map(boundary_text).unwrap_or_default();
    Some(TimeWindow::from_raw(&start, &end))
}

/// Flatten a boundary value to the text [`TimeWindow::from_raw`] expects.
/// Falsy values become the empty string.
fn boundary_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null | Value::Bool(false) => String::new(),
        other => other.to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
