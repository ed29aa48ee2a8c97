//! Next-opening search across the rotated week.

use crate::schedule::WeeklySchedule;
use crate::time::TimeOfDay;
use crate::weekday::Weekday;

/// Find the morning opening time of the first day after `today`.
///
/// Walks `rotated` from the entry following `today` to the end of the
/// sequence; `today` itself never counts, even if it has a morning start.
/// Only a readable morning start qualifies: days that open in the afternoon
/// only are passed over. Returns `None` when none of the remaining days has
/// one, or when `today` does not appear in `rotated`.
///
/// ```
/// use opening_hours::{find_next_opening, rotate_from, DaySchedule, TimeOfDay, TimeWindow,
///     WeeklySchedule, Weekday};
///
/// let nine = TimeOfDay::new(9, 0).unwrap();
/// let noon = TimeOfDay::new(12, 0).unwrap();
/// let schedule = WeeklySchedule::new()
///     .with_day(Weekday::Monday, DaySchedule::morning_only(TimeWindow::new(nine, noon)));
///
/// let days = rotate_from(Weekday::Friday);
/// assert_eq!(find_next_opening(&schedule, &days, Weekday::Friday), Some(nine));
/// ```
pub fn find_next_opening(
    schedule: &WeeklySchedule,
    rotated: &[Weekday],
    today: Weekday,
) -> Option<TimeOfDay> {
    rotated
        .iter()
        .skip_while(|day| **day != today)
        .skip(1)
        .find_map(|day| morning_start(schedule, *day))
}

fn morning_start(schedule: &WeeklySchedule, day: Weekday) -> Option<TimeOfDay> {
    schedule.get(day)?.morning.as_ref()?.start_time()
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::DaySchedule;
    use crate::time::TimeWindow;
    use crate::weekday::rotate_from;

    fn t(h: u32, m: u32) -> TimeOfDay {
        TimeOfDay::new(h, m).unwrap()
    }

    fn morning(start: TimeOfDay) -> DaySchedule {
        DaySchedule::morning_only(TimeWindow::new(start, t(12, 0)))
    }

    #[test]
    fn test_skips_today_even_when_open() {
        let schedule = WeeklySchedule::new()
            .with_day(Weekday::Monday, morning(t(8, 0)))
            .with_day(Weekday::Tuesday, morning(t(10, 0)));
        let days = rotate_from(Weekday::Monday);
        assert_eq!(find_next_opening(&schedule, &days, Weekday::Monday), Some(t(10, 0)));
    }

    #[test]
    fn test_wraps_through_week_end() {
        let schedule = WeeklySchedule::new().with_day(Weekday::Tuesday, morning(t(9, 30)));
        let days = rotate_from(Weekday::Saturday);
        assert_eq!(
            find_next_opening(&schedule, &days, Weekday::Saturday),
            Some(t(9, 30))
        );
    }

    #[test]
    fn test_returns_first_match_not_earliest_time() {
        let schedule = WeeklySchedule::new()
            .with_day(Weekday::Thursday, morning(t(11, 0)))
            .with_day(Weekday::Friday, morning(t(7, 0)));
        let days = rotate_from(Weekday::Wednesday);
        assert_eq!(
            find_next_opening(&schedule, &days, Weekday::Wednesday),
            Some(t(11, 0))
        );
    }

    #[test]
    fn test_none_when_only_today_opens() {
        let schedule = WeeklySchedule::new().with_day(Weekday::Friday, morning(t(9, 0)));
        let days = rotate_from(Weekday::Friday);
        assert_eq!(find_next_opening(&schedule, &days, Weekday::Friday), None);
    }

    #[test]
    fn test_afternoon_only_days_are_passed_over() {
        // Current behavior: an afternoon-only day is not a "next opening".
        let schedule = WeeklySchedule::new()
            .with_day(
                Weekday::Tuesday,
                DaySchedule::afternoon_only(TimeWindow::new(t(14, 0), t(18, 0))),
            )
            .with_day(Weekday::Wednesday, morning(t(9, 0)));
        let days = rotate_from(Weekday::Monday);
        assert_eq!(find_next_opening(&schedule, &days, Weekday::Monday), Some(t(9, 0)));
    }

    #[test]
    fn test_malformed_morning_start_is_passed_over() {
        let schedule = WeeklySchedule::new()
            .with_day(
                Weekday::Tuesday,
                DaySchedule::morning_only(TimeWindow::from_raw("soon", "12:00")),
            )
            .with_day(Weekday::Thursday, morning(t(8, 45)));
        let days = rotate_from(Weekday::Monday);
        assert_eq!(find_next_opening(&schedule, &days, Weekday::Monday), Some(t(8, 45)));
    }

    #[test]
    fn test_today_missing_from_sequence() {
        let schedule = WeeklySchedule::new().with_day(Weekday::Tuesday, morning(t(9, 0)));
        let days = [Weekday::Tuesday, Weekday::Wednesday];
        assert_eq!(find_next_opening(&schedule, &days, Weekday::Monday), None);
    }
}
