//! Error types for the fallible edges of opening-hours resolution.
//!
//! Status resolution itself never fails. These errors come from loading a
//! schedule store or interpreting caller-supplied timezones and instants.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid datetime: {0}")]
    InvalidDatetime(String),

    #[error("Invalid weekday: {0}")]
    InvalidWeekday(String),

    #[error("Schedule store I/O error: {0}")]
    Io(String),
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
