//! Entry-point for the `opening-hours` binary.
//!
//! Loads a schedule store, samples the clock once (or takes `--at`), and
//! prints the venue's status or weekly hours as text or JSON.

mod cli;

use anyhow::{Context, Result};
use chrono::DateTime;
use chrono_tz::Tz;
use clap::Parser;
use opening_hours::{
    parse_timezone, resolve_at, weekly_overview, Clock, DayHours, FixedClock, HourStyle,
    InvertedWindowPolicy, JsonScheduleStore, ResolveOptions, ScheduleProvider, Status,
    StatusResult, SystemClock, Venue,
};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command, QueryArgs, WeekArgs};

fn main() -> Result<()> {
    let default_level = "error";
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(default_level))
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();
    let output = match cli.command {
        Command::Status(args) => run_status(&args)?,
        Command::Week(args) => run_week(&args)?,
    };
    println!("{output}");
    Ok(())
}

const NO_HOURS: &str = "no opening hours available";

/// JSON shape of `status`.
#[derive(Serialize)]
struct StatusReport {
    venue: Venue,
    at: String,
    #[serde(flatten)]
    result: StatusResult,
}

/// JSON shape of `week`.
#[derive(Serialize)]
struct WeekReport {
    venue: Venue,
    status: StatusResult,
    days: Vec<DayHours>,
}

/// Everything a query needs, gathered from the flags.
struct Query {
    venue: Venue,
    store: JsonScheduleStore,
    clock: Box<dyn Clock>,
    options: ResolveOptions,
}

impl Query {
    fn from_args(args: &QueryArgs) -> Result<Self> {
        let tz = parse_timezone(&args.timezone)?;
        let store = JsonScheduleStore::from_path(&args.store)
            .with_context(|| format!("failed to load schedule store {}", args.store.display()))?;
        let clock: Box<dyn Clock> = match &args.at {
            Some(at) => Box::new(FixedClock::from_rfc3339(at, tz).context("invalid --at")?),
            None => Box::new(SystemClock::new(tz)),
        };
        let inverted_windows = if args.keep_inverted_windows {
            InvertedWindowPolicy::Keep
        } else {
            InvertedWindowPolicy::Discard
        };
        Ok(Self {
            venue: Venue::from_shop_id(args.shop),
            store,
            clock,
            options: ResolveOptions { inverted_windows },
        })
    }
}

fn run_status(args: &QueryArgs) -> Result<String> {
    let query = Query::from_args(args)?;
    let schedule = query.store.schedule(&query.venue);
    let sampled = query.clock.now();
    let result = resolve_at(&schedule, sampled, &query.options);
    debug!(venue = ?query.venue, at = %sampled, status = result.status.as_str(), "status");

    if args.json {
        let report = StatusReport {
            venue: query.venue,
            at: sampled.to_rfc3339(),
            result,
        };
        return Ok(serde_json::to_string_pretty(&report)?);
    }
    if schedule.is_empty() {
        return Ok(NO_HOURS.to_string());
    }
    Ok(status_line(&result))
}

fn run_week(args: &WeekArgs) -> Result<String> {
    let query = Query::from_args(&args.query)?;
    let schedule = query.store.schedule(&query.venue);
    let sampled: DateTime<Tz> = query.clock.now();
    let status = resolve_at(&schedule, sampled, &query.options);
    let style = if args.compact_hours {
        HourStyle::Compact
    } else {
        HourStyle::Colon
    };
    let days = weekly_overview(&schedule, sampled.date_naive(), style);

    if args.query.json {
        let report = WeekReport {
            venue: query.venue,
            status,
            days,
        };
        return Ok(serde_json::to_string_pretty(&report)?);
    }

    if schedule.is_empty() {
        return Ok(NO_HOURS.to_string());
    }

    let mut lines = vec![status_line(&status)];
    for row in &days {
        let marker = if row.is_today { '>' } else { ' ' };
        lines.push(format!(
            "{marker} {:<9} {}  {}",
            row.day.key(),
            row.date,
            row.hours.as_deref().unwrap_or("closed")
        ));
    }
    Ok(lines.join("\n"))
}

fn status_line(result: &StatusResult) -> String {
    match (result.status, result.hour) {
        (Status::Open, Some(until)) => format!("open until {until}"),
        (Status::Later, Some(at)) => format!("opens at {at}"),
        (Status::Tomorrow, Some(at)) => format!("opens on the next opening day at {at}"),
        (Status::Tomorrow, None) => "closed until further notice".to_string(),
        _ => "closed".to_string(),
    }
}
