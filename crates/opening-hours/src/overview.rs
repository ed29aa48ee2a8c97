//! Per-day opening-hours lines for display, ordered from today.

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::schedule::{DaySchedule, WeeklySchedule};
use crate::time::{HourStyle, TimeWindow};
use crate::weekday::{rotate_from, Weekday};

/// One row of the weekly overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayHours {
    pub day: Weekday,
    /// Today's date for the first row, the next occurrence of `day` after that.
    pub date: NaiveDate,
    pub is_today: bool,
    /// e.g. `"09:00 - 12:00 / 14:00 - 19:00"`. `None` when the day is closed.
    pub hours: Option<String>,
}

/// The week starting at `today`, one [`DayHours`] per weekday.
///
/// ```
/// use chrono::NaiveDate;
/// use opening_hours::{weekly_overview, HourStyle, WeeklySchedule, Weekday};
///
/// let today = NaiveDate::from_ymd_opt(2026, 3, 20).unwrap(); // a Friday
/// let rows = weekly_overview(&WeeklySchedule::new(), today, HourStyle::Colon);
/// assert_eq!(rows.len(), 7);
/// assert_eq!(rows[0].day, Weekday::Friday);
/// assert_eq!(rows[3].date, NaiveDate::from_ymd_opt(2026, 3, 23).unwrap());
/// ```
pub fn weekly_overview(
    schedule: &WeeklySchedule,
    today: NaiveDate,
    style: HourStyle,
) -> Vec<DayHours> {
    rotate_from(today.weekday().into())
        .into_iter()
        .zip(0i64..)
        .map(|(day, offset)| DayHours {
            day,
            date: today + Duration::days(offset),
            is_today: offset == 0,
            hours: day_hours_line(schedule.get(day), style),
        })
        .collect()
}

/// Render one day's windows, morning first, joined with `" / "`.
///
/// A complete window renders as `start - end`. A window with only one
/// readable boundary renders that boundary alone. Returns `None` when nothing
/// is renderable.
pub fn day_hours_line(day: Option<&DaySchedule>, style: HourStyle) -> Option<String> {
    let day = day?;
    let segments: Vec<String> = [day.morning.as_ref(), day.afternoon.as_ref()]
        .into_iter()
        .flatten()
        .filter_map(|window| window_segment(window, style))
        .collect();

    if segments.is_empty() {
        None
    } else {
        Some(segments.join(" / "))
    }
}

fn window_segment(window: &TimeWindow, style: HourStyle) -> Option<String> {
    match (window.start_time(), window.end_time()) {
        (Some(start), Some(end)) => Some(format!(
            "{} - {}",
            start.format(style),
            end.format(style)
        )),
        (Some(only), None) | (None, Some(only)) => Some(only.format(style)),
        (None, None) => None,
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
