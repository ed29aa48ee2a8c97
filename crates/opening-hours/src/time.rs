//! Time-of-day value types: [`TimeOfDay`], [`Boundary`] and [`TimeWindow`].
//!
//! Boundaries arrive from the schedule store as loosely formatted strings
//! (`"09:00"`, `"09:00:00"`, `""`). Parsing them here keeps the distinction
//! between a boundary that was never configured (`None`), one that was
//! configured but cannot be read ([`Boundary::Malformed`]) and a usable time
//! ([`Boundary::Time`]).

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Serialize, Serializer};

use crate::error::ScheduleError;

// ── TimeOfDay ───────────────────────────────────────────────────────────────

/// A wall-clock time with minute precision.
///
/// Displays as `HH:MM` (24-hour). Seconds in the input are accepted and
/// dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

/// How to render a [`TimeOfDay`] for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum HourStyle {
    /// `09:00`, `19:30`.
    #[default]
    Colon,
    /// `9h00`, `19h30`.
    Compact,
}

impl TimeOfDay {
    /// `00:00`.
    pub const MIDNIGHT: TimeOfDay = TimeOfDay { hour: 0, minute: 0 };

    /// Build a time from hour (0-23) and minute (0-59).
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(Self {
            hour: hour as u8,
            minute: minute as u8,
        })
    }

    /// Parse `HH:MM` or `HH:MM:SS`. Returns `None` for anything else.
    ///
    /// ```
    /// use opening_hours::TimeOfDay;
    ///
    /// let t = TimeOfDay::parse("09:30:00").unwrap();
    /// assert_eq!(t.to_string(), "09:30");
    /// assert!(TimeOfDay::parse("9am").is_none());
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let naive = NaiveTime::parse_from_str(s, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
            .ok()?;
        Self::new(naive.hour(), naive.minute())
    }

    pub fn hour(&self) -> u32 {
        self.hour as u32
    }

    pub fn minute(&self) -> u32 {
        self.minute as u32
    }

    pub fn is_midnight(&self) -> bool {
        *self == Self::MIDNIGHT
    }

    pub fn to_naive(self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour(), self.minute(), 0).unwrap_or(NaiveTime::MIN)
    }

    /// Render in the given [`HourStyle`].
    pub fn format(&self, style: HourStyle) -> String {
        match style {
            HourStyle::Colon => format!("{:02}:{:02}", self.hour, self.minute),
            HourStyle::Compact => format!("{}h{:02}", self.hour, self.minute),
        }
    }
}

impl From<NaiveTime> for TimeOfDay {
    fn from(t: NaiveTime) -> Self {
        Self {
            hour: t.hour() as u8,
            minute: t.minute() as u8,
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(HourStyle::Colon))
    }
}

impl FromStr for TimeOfDay {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            ScheduleError::InvalidDatetime(format!("'{}' is not a HH:MM[:SS] time", s.trim()))
        })
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ── Boundary ────────────────────────────────────────────────────────────────

/// A configured opening or closing boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Boundary {
    /// A readable time of day.
    Time(TimeOfDay),
    /// A non-empty value that is not a `HH:MM[:SS]` time. Kept verbatim.
    Malformed(String),
}

impl Boundary {
    /// Classify a raw store value. Blank input means "not configured".
    pub fn from_raw(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(match TimeOfDay::parse(trimmed) {
            Some(t) => Boundary::Time(t),
            None => Boundary::Malformed(trimmed.to_string()),
        })
    }

    /// The usable time, if this boundary parsed.
    pub fn time(&self) -> Option<TimeOfDay> {
        match self {
            Boundary::Time(t) => Some(*t),
            Boundary::Malformed(_) => None,
        }
    }
}

impl From<TimeOfDay> for Boundary {
    fn from(t: TimeOfDay) -> Self {
        Boundary::Time(t)
    }
}

impl Serialize for Boundary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Boundary::Time(t) => t.serialize(serializer),
            Boundary::Malformed(raw) => serializer.serialize_str(raw),
        }
    }
}

// ── TimeWindow ──────────────────────────────────────────────────────────────

/// One continuous opening interval within a day.
///
/// Both ends are optional on their own: a day that runs straight through is
/// stored as a morning start and an afternoon end with nothing in between.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TimeWindow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<Boundary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<Boundary>,
}

impl TimeWindow {
    /// A complete window from two times.
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Self {
        Self {
            start: Some(start.into()),
            end: Some(end.into()),
        }
    }

    /// Build from raw store strings.
    pub fn from_raw(start: &str, end: &str) -> Self {
        Self {
            start: Boundary::from_raw(start),
            end: Boundary::from_raw(end),
        }
    }

    pub fn start_time(&self) -> Option<TimeOfDay> {
        self.start.as_ref().and_then(Boundary::time)
    }

    pub fn end_time(&self) -> Option<TimeOfDay> {
        self.end.as_ref().and_then(Boundary::time)
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
