//! Time sources fixed to one civil timezone.
//!
//! Resolution never reads the system clock directly. Callers hold a
//! [`Clock`], sample it once per resolution and pass the instant down.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::error::{Result, ScheduleError};

/// Timezone used when none is configured.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Europe::Paris;

/// Something that can tell the current time in a fixed timezone.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Tz>;
}

/// Reads the OS clock and converts it to a configured timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemClock {
    tz: Tz,
}

impl SystemClock {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Build from an IANA timezone name such as `"Europe/Paris"`.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::InvalidTimezone`] for unknown names.
    pub fn from_name(name: &str) -> Result<Self> {
        parse_timezone(name).map(Self::new)
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEZONE)
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Tz> {
        Utc::now().with_timezone(&self.tz)
    }
}

/// Always returns the same instant. For tests and replays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    instant: DateTime<Tz>,
}

impl FixedClock {
    pub fn new(instant: DateTime<Tz>) -> Self {
        Self { instant }
    }

    /// Parse an RFC 3339 instant and express it in `tz`.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::InvalidDatetime`] if `datetime` is not RFC 3339.
    pub fn from_rfc3339(datetime: &str, tz: Tz) -> Result<Self> {
        DateTime::parse_from_rfc3339(datetime)
            .map(|dt| Self::new(dt.with_timezone(&tz)))
            .map_err(|e| ScheduleError::InvalidDatetime(format!("'{}': {}", datetime, e)))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Tz> {
        self.instant
    }
}

/// Parse an IANA timezone string into `Tz`.
pub fn parse_timezone(s: &str) -> Result<Tz> {
    s.trim()
        .parse::<Tz>()
        .map_err(|_| ScheduleError::InvalidTimezone(format!("'{}'", s)))
}

// ── Tests ───────────────────────────────────────────────────────────────────
