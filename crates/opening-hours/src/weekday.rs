//! Weekdays keyed by their canonical lowercase identifier, and day rotation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

/// One of the seven ISO weekdays, Monday first.
///
/// The lowercase English name (`"monday"`) is the stable key used by the
/// schedule store regardless of the display language.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All weekdays in ISO order.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Canonical store key, e.g. `"wednesday"`.
    pub fn key(self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        }
    }

    /// Parse a weekday name (case-insensitive, supports full and abbreviated).
    pub fn parse(s: &str) -> Option<Weekday> {
        match s.trim().to_lowercase().as_str() {
            "monday" | "mon" => Some(Weekday::Monday),
            "tuesday" | "tue" | "tues" => Some(Weekday::Tuesday),
            "wednesday" | "wed" => Some(Weekday::Wednesday),
            "thursday" | "thu" | "thurs" => Some(Weekday::Thursday),
            "friday" | "fri" => Some(Weekday::Friday),
            "saturday" | "sat" => Some(Weekday::Saturday),
            "sunday" | "sun" => Some(Weekday::Sunday),
            _ => None,
        }
    }

    /// 0 for Monday through 6 for Sunday.
    pub fn num_days_from_monday(self) -> u32 {
        self as u32
    }

    /// The following day, wrapping Sunday to Monday.
    pub fn succ(self) -> Weekday {
        Self::ALL[(self.num_days_from_monday() as usize + 1) % 7]
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        Self::ALL[day.num_days_from_monday() as usize]
    }
}

impl From<Weekday> for chrono::Weekday {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Monday => chrono::Weekday::Mon,
            Weekday::Tuesday => chrono::Weekday::Tue,
            Weekday::Wednesday => chrono::Weekday::Wed,
            Weekday::Thursday => chrono::Weekday::Thu,
            Weekday::Friday => chrono::Weekday::Fri,
            Weekday::Saturday => chrono::Weekday::Sat,
            Weekday::Sunday => chrono::Weekday::Sun,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Weekday {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Weekday::parse(s).ok_or_else(|| ScheduleError::InvalidWeekday(format!("'{}'", s.trim())))
    }
}

// ── Day rotation ────────────────────────────────────────────────────────────

/// The seven weekdays starting at `today` and wrapping at the end of the week.
///
/// ```
/// use opening_hours::{rotate_from, Weekday};
///
/// let days = rotate_from(Weekday::Saturday);
/// assert_eq!(days[0], Weekday::Saturday);
/// assert_eq!(days[2], Weekday::Monday);
/// ```
pub fn rotate_from(today: Weekday) -> [Weekday; 7] {
    let offset = today.num_days_from_monday() as usize;
    std::array::from_fn(|i| Weekday::ALL[(offset + i) % 7])
}

// ── Tests ───────────────────────────────────────────────────────────────────
