//! Window anchoring: pin a bare time of day onto a calendar date.
//!
//! Anchored instants are what the resolver compares, so a closing time of
//! `00:00` can sort after an opening time of `22:00` on the same day.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use chrono_tz::Tz;

use crate::time::{Boundary, TimeOfDay};

/// Anchor `time` onto `date` in `tz`.
///
/// `00:00` means the midnight that *ends* `date`, i.e. the start of the
/// following day. Every other time lands on `date` itself.
///
/// Local times that fall in a DST fold resolve to the earlier instant. Local
/// times that fall in a DST gap are moved forward by one hour.
///
/// ```
/// use chrono::NaiveDate;
/// use opening_hours::{anchor_time, TimeOfDay};
///
/// let date = NaiveDate::from_ymd_opt(2026, 3, 16).unwrap();
/// let close = anchor_time(TimeOfDay::MIDNIGHT, date, &chrono_tz::Europe::Paris).unwrap();
/// assert_eq!(close.date_naive(), NaiveDate::from_ymd_opt(2026, 3, 17).unwrap());
/// ```
pub fn anchor_time(time: TimeOfDay, date: NaiveDate, tz: &Tz) -> Option<DateTime<Tz>> {
    let day = if time.is_midnight() {
        date.succ_opt()?
    } else {
        date
    };
    localize(day.and_time(time.to_naive()), tz)
}

/// Anchor an optional configured boundary. Absent and malformed boundaries
/// both yield `None`.
pub fn anchor_boundary(
    boundary: Option<&Boundary>,
    date: NaiveDate,
    tz: &Tz,
) -> Option<DateTime<Tz>> {
    let time = boundary?.time()?;
    anchor_time(time, date, tz)
}

/// Anchor a raw `HH:MM[:SS]` string. Blank or unparseable input yields `None`.
pub fn anchor_str(raw: &str, date: NaiveDate, tz: &Tz) -> Option<DateTime<Tz>> {
    anchor_time(TimeOfDay::parse(raw)?, date, tz)
}

/// Midnight at the start of `date` in `tz`.
pub fn start_of_day(date: NaiveDate, tz: &Tz) -> Option<DateTime<Tz>> {
    localize(date.and_time(NaiveTime::MIN), tz)
}

fn localize(naive: NaiveDateTime, tz: &Tz) -> Option<DateTime<Tz>> {
    tz.from_local_datetime(&naive)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(naive + Duration::hours(1))).earliest())
}

// ── Tests ───────────────────────────────────────────────────────────────────
