use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Query venue opening hours from a schedule store.
#[derive(Parser, Debug)]
#[command(name = "opening-hours", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print whether the venue is open now, and until or from when.
    Status(QueryArgs),
    /// Print the week's opening hours starting from today.
    Week(WeekArgs),
}

#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    /// JSON schedule store: {"mall": {...}, "shops": {"<id>": {...}}}.
    #[arg(long, value_name = "FILE")]
    pub store: PathBuf,

    /// Shop identifier. Without it, the mall's schedule is used.
    #[arg(long, value_name = "ID")]
    pub shop: Option<u64>,

    /// Evaluate at this RFC 3339 instant instead of the current time.
    #[arg(long, value_name = "RFC3339")]
    pub at: Option<String>,

    /// IANA timezone the venue operates in.
    #[arg(long, default_value = "Europe/Paris")]
    pub timezone: String,

    /// Emit JSON instead of text.
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Use windows whose start is not before their end as configured,
    /// instead of ignoring them.
    #[arg(long = "keep-inverted-windows", default_value_t = false)]
    pub keep_inverted_windows: bool,
}

#[derive(Args, Debug, Clone)]
pub struct WeekArgs {
    #[command(flatten)]
    pub query: QueryArgs,

    /// Render hours as 9h00 instead of 09:00.
    #[arg(long = "compact-hours", default_value_t = false)]
    pub compact_hours: bool,
}
