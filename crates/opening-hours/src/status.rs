//! Opening-hours status resolution.
//!
//! Classifies "now" against today's windows into one of four statuses:
//!
//! | Status     | Meaning                                | `hour`               |
//! |------------|----------------------------------------|----------------------|
//! | `open`     | inside a window                        | when it closes       |
//! | `later`    | closed now, opens again today          | when it reopens      |
//! | `tomorrow` | done for today, reopens on a later day | next morning opening |
//! | `closed`   | nothing applies                        | none                 |
//!
//! All functions take explicit inputs. The caller samples the clock once and
//! passes the instant in, so two calls with the same inputs always agree.
//!
//! # Rule order
//!
//! Rules are checked in a fixed order and the first match wins. Every window
//! is half-open (`[start, end)`), so an instant equal to a closing time is no
//! longer open.
//!
//! 1. Empty table: `closed`.
//! 2. No entry for today: `tomorrow` at the next morning opening.
//! 3. Before the morning start: `later` at the morning start.
//! 4. Between morning end and afternoon start: `later` at the afternoon start.
//! 5. At or after the afternoon end: `tomorrow` at the next morning opening.
//! 6. No break configured, between morning start and afternoon end: `open`
//!    until the afternoon end.
//! 7. Inside the morning window: `open` until the morning end.
//! 8. Inside the afternoon window: `open` until the afternoon end.
//! 9. Otherwise: `closed`.

use chrono::{DateTime, Datelike, NaiveDate};
use chrono_tz::Tz;
use serde::Serialize;
use tracing::debug;

use crate::anchor::{anchor_boundary, anchor_str, start_of_day};
use crate::clock::Clock;
use crate::schedule::WeeklySchedule;
use crate::search::find_next_opening;
use crate::time::{Boundary, TimeOfDay, TimeWindow};
use crate::weekday::{rotate_from, Weekday};

// ── Options ─────────────────────────────────────────────────────────────────

/// What to do with a window whose anchored start is not before its end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum InvertedWindowPolicy {
    /// Treat the window as if neither boundary were set.
    #[default]
    Discard,
    /// Use the boundaries as configured, however they compare.
    Keep,
}

/// Options for [`resolve_status_with_options`].
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    pub inverted_windows: InvertedWindowPolicy,
}

// ── Result types ────────────────────────────────────────────────────────────

/// Coarse opening state of a venue at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Open,
    Later,
    Tomorrow,
    Closed,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Open => "open",
            Status::Later => "later",
            Status::Tomorrow => "tomorrow",
            Status::Closed => "closed",
        }
    }
}

/// A status plus the time that goes with it.
///
/// `hour` is the closing time for [`Status::Open`], the reopening time for
/// [`Status::Later`], the next morning opening for [`Status::Tomorrow`] (absent
/// when no later day opens in the morning) and always absent for
/// [`Status::Closed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct StatusResult {
    pub status: Status,
    pub hour: Option<TimeOfDay>,
}

impl StatusResult {
    pub fn open(until: TimeOfDay) -> Self {
        Self {
            status: Status::Open,
            hour: Some(until),
        }
    }

    pub fn later(at: TimeOfDay) -> Self {
        Self {
            status: Status::Later,
            hour: Some(at),
        }
    }

    pub fn tomorrow(at: Option<TimeOfDay>) -> Self {
        Self {
            status: Status::Tomorrow,
            hour: at,
        }
    }

    pub fn closed() -> Self {
        Self {
            status: Status::Closed,
            hour: None,
        }
    }
}

// ── Resolution ──────────────────────────────────────────────────────────────

/// Resolve the status of a venue with default [`ResolveOptions`].
///
/// # Arguments
///
/// * `schedule`: The venue's weekly table
/// * `rotated`: The week starting at `today` (see [`rotate_from`])
/// * `today`: The current weekday
/// * `now`: The current time of day as `HH:MM[:SS]`
/// * `sampled`: The clock reading this resolution is based on. Supplies the
///   reference date and timezone, and stands in for `now` if `now` does not
///   parse.
///
/// `now` is anchored with the same rule as the boundaries, so a `now` of
/// `00:00` sits at the end of the reference date.
///
/// # Examples
///
/// ```
/// use chrono::TimeZone;
/// use opening_hours::{resolve_status, rotate_from, DaySchedule, Status, TimeOfDay,
///     TimeWindow, WeeklySchedule, Weekday};
///
/// let t = |h, m| TimeOfDay::new(h, m).unwrap();
/// let schedule = WeeklySchedule::new().with_day(
///     Weekday::Monday,
///     DaySchedule::split(TimeWindow::new(t(9, 0), t(12, 0)), TimeWindow::new(t(14, 0), t(19, 0))),
/// );
/// let sampled = chrono_tz::Europe::Paris.with_ymd_and_hms(2026, 3, 16, 13, 0, 0).unwrap();
///
/// let result = resolve_status(
///     &schedule,
///     &rotate_from(Weekday::Monday),
///     Weekday::Monday,
///     "13:00",
///     sampled,
/// );
/// assert_eq!(result.status, Status::Later);
/// assert_eq!(result.hour, Some(t(14, 0)));
/// ```
pub fn resolve_status(
    schedule: &WeeklySchedule,
    rotated: &[Weekday],
    today: Weekday,
    now: &str,
    sampled: DateTime<Tz>,
) -> StatusResult {
    resolve_status_with_options(
        schedule,
        rotated,
        today,
        now,
        sampled,
        &ResolveOptions::default(),
    )
}

/// Resolve the status of a venue.
///
/// See [`resolve_status`] for the arguments and the module docs for the rule
/// order. This function never fails: absent or unreadable boundaries only
/// disable the rules that depend on them.
pub fn resolve_status_with_options(
    schedule: &WeeklySchedule,
    rotated: &[Weekday],
    today: Weekday,
    now: &str,
    sampled: DateTime<Tz>,
    options: &ResolveOptions,
) -> StatusResult {
    if schedule.is_empty() {
        return decided("empty schedule", StatusResult::closed());
    }

    let Some(day) = schedule.get(today) else {
        let next = find_next_opening(schedule, rotated, today);
        return decided("no entry for today", StatusResult::tomorrow(next));
    };

    let tz = sampled.timezone();
    let date = sampled.date_naive();
    let policy = options.inverted_windows;
    let (ms, me) = anchor_window(day.morning.as_ref(), date, &tz, policy);
    let (afs, afe) = anchor_window(day.afternoon.as_ref(), date, &tz, policy);

    let now_at = anchor_str(now, date, &tz).unwrap_or(sampled);
    let midnight = start_of_day(date, &tz);

    if let Some(ms) = ms {
        if midnight.is_none_or(|m| m <= now_at) && now_at < ms.at {
            return decided("before morning opening", StatusResult::later(ms.time));
        }
    }

    if let (Some(me), Some(afs)) = (me, afs) {
        if me.at <= now_at && now_at < afs.at {
            return decided("midday break", StatusResult::later(afs.time));
        }
    }

    if let Some(afe) = afe {
        if now_at >= afe.at {
            let next = find_next_opening(schedule, rotated, today);
            return decided("after closing", StatusResult::tomorrow(next));
        }
    }

    let no_pause = !day.has_morning_end() && !day.has_afternoon_start();
    if no_pause {
        if let (Some(ms), Some(afe)) = (ms, afe) {
            if ms.at <= now_at && now_at < afe.at {
                return decided("open without break", StatusResult::open(afe.time));
            }
        }
    }

    if let (Some(ms), Some(me)) = (ms, me) {
        if ms.at <= now_at && now_at < me.at {
            return decided("morning window", StatusResult::open(me.time));
        }
    }

    if let (Some(afs), Some(afe)) = (afs, afe) {
        if afs.at <= now_at && now_at < afe.at {
            return decided("afternoon window", StatusResult::open(afe.time));
        }
    }

    decided("no rule matched", StatusResult::closed())
}

/// Resolve the status at one sampled instant.
///
/// Derives today, the rotated week and the `HH:MM` time of day from
/// `sampled`, then applies [`resolve_status_with_options`].
pub fn resolve_at(
    schedule: &WeeklySchedule,
    sampled: DateTime<Tz>,
    options: &ResolveOptions,
) -> StatusResult {
    let today = Weekday::from(sampled.weekday());
    let rotated = rotate_from(today);
    let now = sampled.format("%H:%M").to_string();
    resolve_status_with_options(schedule, &rotated, today, &now, sampled, options)
}

/// Sample `clock` once and resolve the status at that instant.
pub fn resolve_now<C: Clock + ?Sized>(
    schedule: &WeeklySchedule,
    clock: &C,
    options: &ResolveOptions,
) -> StatusResult {
    resolve_at(schedule, clock.now(), options)
}

// ── Internal helpers ────────────────────────────────────────────────────────

/// An anchored boundary together with the time it was anchored from.
#[derive(Debug, Clone, Copy)]
struct Edge {
    at: DateTime<Tz>,
    time: TimeOfDay,
}

fn anchor_edge(
    boundary: Option<&Boundary>,
    date: NaiveDate,
    tz: &Tz,
) -> Option<Edge> {
    let time = boundary?.time()?;
    let at = anchor_boundary(boundary, date, tz)?;
    Some(Edge { at, time })
}

fn anchor_window(
    window: Option<&TimeWindow>,
    date: NaiveDate,
    tz: &Tz,
    policy: InvertedWindowPolicy,
) -> (Option<Edge>, Option<Edge>) {
    let Some(window) = window else {
        return (None, None);
    };
    let start = anchor_edge(window.start.as_ref(), date, tz);
    let end = anchor_edge(window.end.as_ref(), date, tz);

    if let (Some(s), Some(e)) = (start, end) {
        if policy == InvertedWindowPolicy::Discard && s.at >= e.at {
            debug!(start = %s.time, end = %e.time, "discarding inverted window");
            return (None, None);
        }
    }
    (start, end)
}

fn decided(rule: &'static str, result: StatusResult) -> StatusResult {
    debug!(
        rule,
        status = result.status.as_str(),
        hour = ?result.hour.map(|h| h.to_string()),
        "resolved opening status"
    );
    result
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::schedule::DaySchedule;
    use chrono::TimeZone;
    use chrono_tz::Europe::Paris;
    use proptest::prelude::*;

    fn t(h: u32, m: u32) -> TimeOfDay {
        TimeOfDay::new(h, m).unwrap()
    }

    /// Monday March 16, 2026 at the given Paris wall-clock time.
    fn monday_at(h: u32, m: u32) -> DateTime<Tz> {
        Paris.with_ymd_and_hms(2026, 3, 16, h, m, 0).unwrap()
    }

    fn split_day() -> DaySchedule {
        DaySchedule::split(
            TimeWindow::new(t(9, 0), t(12, 0)),
            TimeWindow::new(t(14, 0), t(19, 0)),
        )
    }

    fn resolve_monday(schedule: &WeeklySchedule, h: u32, m: u32) -> StatusResult {
        resolve_at(schedule, monday_at(h, m), &ResolveOptions::default())
    }

    fn week_of_split_days() -> WeeklySchedule {
        WeeklySchedule::new()
            .with_day(Weekday::Monday, split_day())
            .with_day(
                Weekday::Tuesday,
                DaySchedule::split(
                    TimeWindow::new(t(10, 0), t(12, 30)),
                    TimeWindow::new(t(14, 0), t(19, 0)),
                ),
            )
    }

    // ── Walk through a split day ────────────────────────────────────────

    #[test]
    fn test_before_opening_is_later() {
        let result = resolve_monday(&week_of_split_days(), 8, 0);
        assert_eq!(result, StatusResult::later(t(9, 0)));
    }

    #[test]
    fn test_morning_is_open_until_noon() {
        let result = resolve_monday(&week_of_split_days(), 10, 0);
        assert_eq!(result, StatusResult::open(t(12, 0)));
    }

    #[test]
    fn test_lunch_break_is_later() {
        let result = resolve_monday(&week_of_split_days(), 13, 0);
        assert_eq!(result, StatusResult::later(t(14, 0)));
    }

    #[test]
    fn test_afternoon_is_open_until_evening() {
        let result = resolve_monday(&week_of_split_days(), 16, 0);
        assert_eq!(result, StatusResult::open(t(19, 0)));
    }

    #[test]
    fn test_after_closing_is_tomorrow_with_next_morning() {
        let result = resolve_monday(&week_of_split_days(), 20, 0);
        assert_eq!(result, StatusResult::tomorrow(Some(t(10, 0))));
    }

    #[test]
    fn test_after_closing_without_next_opening() {
        let schedule = WeeklySchedule::new().with_day(Weekday::Monday, split_day());
        let result = resolve_monday(&schedule, 20, 0);
        assert_eq!(result, StatusResult::tomorrow(None));
    }

    // ── Boundary instants ───────────────────────────────────────────────

    #[test]
    fn test_exact_opening_is_open() {
        let result = resolve_monday(&week_of_split_days(), 9, 0);
        assert_eq!(result, StatusResult::open(t(12, 0)));
    }

    #[test]
    fn test_exact_morning_close_is_later() {
        let result = resolve_monday(&week_of_split_days(), 12, 0);
        assert_eq!(result, StatusResult::later(t(14, 0)));
    }

    #[test]
    fn test_exact_afternoon_open_is_open() {
        let result = resolve_monday(&week_of_split_days(), 14, 0);
        assert_eq!(result, StatusResult::open(t(19, 0)));
    }

    #[test]
    fn test_exact_evening_close_is_tomorrow() {
        let result = resolve_monday(&week_of_split_days(), 19, 0);
        assert_eq!(result.status, Status::Tomorrow);
    }

    // ── Day shapes ──────────────────────────────────────────────────────

    #[test]
    fn test_morning_only_long_window() {
        let schedule = WeeklySchedule::new().with_day(
            Weekday::Monday,
            DaySchedule::morning_only(TimeWindow::new(t(9, 0), t(19, 0))),
        );
        assert_eq!(resolve_monday(&schedule, 12, 0), StatusResult::open(t(19, 0)));
    }

    #[test]
    fn test_no_pause_day_from_morning_start_to_afternoon_end() {
        let day = DaySchedule::split(
            TimeWindow::from_raw("09:00", ""),
            TimeWindow::from_raw("", "19:00"),
        );
        let schedule = WeeklySchedule::new().with_day(Weekday::Monday, day);
        assert_eq!(resolve_monday(&schedule, 12, 0), StatusResult::open(t(19, 0)));
        assert_eq!(resolve_monday(&schedule, 7, 0), StatusResult::later(t(9, 0)));
        assert_eq!(resolve_monday(&schedule, 19, 30).status, Status::Tomorrow);
    }

    #[test]
    fn test_malformed_break_boundary_disables_no_pause_rule() {
        // A configured but unreadable morning end still counts as a break.
        let day = DaySchedule::split(
            TimeWindow::from_raw("09:00", "noonish"),
            TimeWindow::from_raw("", "19:00"),
        );
        let schedule = WeeklySchedule::new().with_day(Weekday::Monday, day);
        assert_eq!(resolve_monday(&schedule, 12, 0), StatusResult::closed());
    }

    #[test]
    fn test_afternoon_only_day() {
        let schedule = WeeklySchedule::new().with_day(
            Weekday::Monday,
            DaySchedule::afternoon_only(TimeWindow::new(t(14, 0), t(18, 0))),
        );
        // No morning start, so nothing says "later" before 14:00.
        assert_eq!(resolve_monday(&schedule, 10, 0), StatusResult::closed());
        assert_eq!(resolve_monday(&schedule, 15, 0), StatusResult::open(t(18, 0)));
    }

    #[test]
    fn test_morning_only_after_close_is_closed() {
        // Without an afternoon end there is no "after closing" rule.
        let schedule = WeeklySchedule::new().with_day(
            Weekday::Monday,
            DaySchedule::morning_only(TimeWindow::new(t(9, 0), t(12, 0))),
        );
        assert_eq!(resolve_monday(&schedule, 15, 0), StatusResult::closed());
    }

    #[test]
    fn test_empty_day_entry_from_store_is_tomorrow() {
        let schedule = WeeklySchedule::from_json_value(&serde_json::json!({
            "monday": {},
            "tuesday": {"morning": {"start": "10:00:00", "end": "12:00:00"}}
        }))
        .unwrap();
        assert_eq!(
            resolve_monday(&schedule, 10, 0),
            StatusResult::tomorrow(Some(t(10, 0)))
        );
    }

    // ── Midnight handling ───────────────────────────────────────────────

    #[test]
    fn test_midnight_close_keeps_evening_open() {
        let schedule = WeeklySchedule::new().with_day(
            Weekday::Monday,
            DaySchedule::split(
                TimeWindow::new(t(10, 0), t(14, 0)),
                TimeWindow::new(t(18, 0), TimeOfDay::MIDNIGHT),
            ),
        );
        assert_eq!(
            resolve_monday(&schedule, 23, 30),
            StatusResult::open(TimeOfDay::MIDNIGHT)
        );
        assert_eq!(resolve_monday(&schedule, 8, 0), StatusResult::later(t(10, 0)));
    }

    #[test]
    fn test_midnight_close_is_not_inverted() {
        let schedule = WeeklySchedule::new().with_day(
            Weekday::Monday,
            DaySchedule::afternoon_only(TimeWindow::new(t(20, 0), TimeOfDay::MIDNIGHT)),
        );
        assert_eq!(
            resolve_monday(&schedule, 21, 0),
            StatusResult::open(TimeOfDay::MIDNIGHT)
        );
    }

    #[test]
    fn test_now_at_midnight_anchors_to_end_of_day() {
        // "00:00" as now follows the boundary rule and lands after today's close.
        let result = resolve_monday(&week_of_split_days(), 0, 0);
        assert_eq!(result, StatusResult::tomorrow(Some(t(10, 0))));
        let result = resolve_monday(&week_of_split_days(), 0, 1);
        assert_eq!(result, StatusResult::later(t(9, 0)));
    }

    // ── Missing entries ─────────────────────────────────────────────────

    #[test]
    fn test_empty_schedule_is_closed() {
        let result = resolve_monday(&WeeklySchedule::new(), 10, 0);
        assert_eq!(result, StatusResult::closed());
    }

    #[test]
    fn test_missing_today_is_tomorrow() {
        let schedule = WeeklySchedule::new().with_day(Weekday::Wednesday, split_day());
        assert_eq!(
            resolve_monday(&schedule, 10, 0),
            StatusResult::tomorrow(Some(t(9, 0)))
        );
    }

    // ── now parsing ─────────────────────────────────────────────────────

    #[test]
    fn test_unparseable_now_falls_back_to_sampled_instant() {
        let schedule = week_of_split_days();
        let result = resolve_status(
            &schedule,
            &rotate_from(Weekday::Monday),
            Weekday::Monday,
            "not a time",
            monday_at(16, 0),
        );
        assert_eq!(result, StatusResult::open(t(19, 0)));
    }

    #[test]
    fn test_now_string_wins_over_sampled_time() {
        let schedule = week_of_split_days();
        let result = resolve_status(
            &schedule,
            &rotate_from(Weekday::Monday),
            Weekday::Monday,
            "10:15:00",
            monday_at(16, 0),
        );
        assert_eq!(result, StatusResult::open(t(12, 0)));
    }

    // ── Inverted windows ────────────────────────────────────────────────

    #[test]
    fn test_inverted_window_is_discarded_by_default() {
        let schedule = WeeklySchedule::new().with_day(
            Weekday::Monday,
            DaySchedule::morning_only(TimeWindow::new(t(12, 0), t(9, 0))),
        );
        // Discarded: 08:00 is not "before opening at 12:00".
        assert_eq!(resolve_monday(&schedule, 8, 0), StatusResult::closed());
    }

    #[test]
    fn test_inverted_window_kept_on_request() {
        let schedule = WeeklySchedule::new().with_day(
            Weekday::Monday,
            DaySchedule::morning_only(TimeWindow::new(t(12, 0), t(9, 0))),
        );
        let options = ResolveOptions {
            inverted_windows: InvertedWindowPolicy::Keep,
        };
        let result = resolve_at(&schedule, monday_at(8, 0), &options);
        assert_eq!(result, StatusResult::later(t(12, 0)));
    }

    // ── Entry points ────────────────────────────────────────────────────

    #[test]
    fn test_resolve_now_samples_clock() {
        let clock = FixedClock::new(monday_at(10, 30));
        let result = resolve_now(&week_of_split_days(), &clock, &ResolveOptions::default());
        assert_eq!(result, StatusResult::open(t(12, 0)));
    }

    #[test]
    fn test_resolve_at_uses_local_weekday() {
        // 23:30 UTC on Sunday is 00:30 Monday in Paris (winter time).
        let utc = chrono::Utc.with_ymd_and_hms(2026, 3, 15, 23, 30, 0).unwrap();
        let result = resolve_at(
            &week_of_split_days(),
            utc.with_timezone(&Paris),
            &ResolveOptions::default(),
        );
        assert_eq!(result, StatusResult::later(t(9, 0)));
    }

    #[test]
    fn test_result_serializes_lowercase() {
        let json = serde_json::to_value(StatusResult::open(t(19, 0))).unwrap();
        assert_eq!(json, serde_json::json!({"status": "open", "hour": "19:00"}));
        let json = serde_json::to_value(StatusResult::closed()).unwrap();
        assert_eq!(json, serde_json::json!({"status": "closed", "hour": null}));
    }

    // ── Properties ──────────────────────────────────────────────────────

    fn arb_day() -> impl Strategy<Value = Weekday> {
        (0usize..7).prop_map(|i| Weekday::ALL[i])
    }

    proptest! {
        /// An empty table is closed at every minute of every day.
        #[test]
        fn empty_schedule_always_closed(day in arb_day(), h in 0u32..24, m in 0u32..60) {
            let sampled = monday_at(h, m);
            let now = format!("{h:02}:{m:02}");
            let result = resolve_status(
                &WeeklySchedule::new(),
                &rotate_from(day),
                day,
                &now,
                sampled,
            );
            prop_assert_eq!(result, StatusResult::closed());
        }

        /// Without an entry for today the answer is always `tomorrow`.
        #[test]
        fn missing_today_always_tomorrow(h in 0u32..24, m in 0u32..60) {
            let schedule = WeeklySchedule::new().with_day(Weekday::Friday, split_day());
            let result = resolve_monday(&schedule, h, m);
            prop_assert_eq!(result.status, Status::Tomorrow);
        }

        /// Same inputs, same answer.
        #[test]
        fn resolution_is_idempotent(h in 0u32..24, m in 0u32..60) {
            let schedule = week_of_split_days();
            let first = resolve_monday(&schedule, h, m);
            let second = resolve_monday(&schedule, h, m);
            prop_assert_eq!(first, second);
        }

        /// `closed` never carries an hour; every other status on a split day does.
        #[test]
        fn hour_presence_matches_status(h in 0u32..24, m in 0u32..60) {
            let result = resolve_monday(&week_of_split_days(), h, m);
            match result.status {
                Status::Closed => prop_assert!(result.hour.is_none()),
                _ => prop_assert!(result.hour.is_some()),
            }
        }
    }
}
