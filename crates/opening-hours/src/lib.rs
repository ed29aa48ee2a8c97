//! # opening-hours
//!
//! Deterministic opening-hours status for venues on a weekly schedule.
//!
//! Given a venue's recurring weekly table (a morning and an afternoon window
//! per weekday) and one sampled instant, the resolver answers whether the
//! venue is open, opens again later today, reopens on a later day, or is
//! closed, together with the relevant time.
//!
//! ## Modules
//!
//! - [`time`]: `TimeOfDay`, configured boundaries and windows
//! - [`weekday`]: Canonical weekday keys and day rotation
//! - [`schedule`]: Day and weekly tables, lenient loading from store JSON
//! - [`anchor`]: Pin times of day onto a calendar date (midnight closes roll over)
//! - [`search`]: Find the next morning opening after today
//! - [`status`]: The status resolver
//! - [`overview`]: Ordered per-day opening-hours lines for display
//! - [`clock`]: Injected time sources in a fixed timezone
//! - [`provider`]: Mall/shop venue selection over a schedule store
//! - [`error`]: Error types

pub mod anchor;
pub mod clock;
pub mod error;
pub mod overview;
pub mod provider;
pub mod schedule;
pub mod search;
pub mod status;
pub mod time;
pub mod weekday;

pub use anchor::{anchor_boundary, anchor_str, anchor_time, start_of_day};
pub use clock::{parse_timezone, Clock, FixedClock, SystemClock, DEFAULT_TIMEZONE};
pub use error::ScheduleError;
pub use overview::{day_hours_line, weekly_overview, DayHours};
pub use provider::{JsonScheduleStore, ScheduleProvider, Venue};
pub use schedule::{DaySchedule, WeeklySchedule};
pub use search::find_next_opening;
pub use status::{
    resolve_at, resolve_now, resolve_status, resolve_status_with_options,
    InvertedWindowPolicy, ResolveOptions, Status, StatusResult,
};
pub use time::{Boundary, HourStyle, TimeOfDay, TimeWindow};
pub use weekday::{rotate_from, Weekday};
