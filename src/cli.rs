//! CLI interface for frota
//!
//! This module defines the command-line interface using clap. Each
//! subcommand renders one dashboard report; with no subcommand the
//! overview is shown.
//!
//! # Example
//!
//! ```bash
//! # Fuel report over the last 7 days, as of a fixed date
//! frota --now 2026-01-25 fuel --range last-7
//!
//! # Tickets needing attention this month, as JSON
//! frota --json overview --tab attention
//!
//! # Pending manual fueling records of one station, as CSV
//! frota --csv audit --tab pending --station gs1
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use frota_core::audit::AuditTab;
use frota_core::distribution::BucketOrder;
use frota_core::error::{FrotaError, Result};
use frota_core::kpis::TicketTab;
use frota_core::range::ReportRange;
use frota_core::top_n::{DEFAULT_COST_THRESHOLD, DEFAULT_TOP_N, TopNConfig};
use std::path::PathBuf;

/// Fleet dashboard reports for Frota+
#[derive(Parser, Debug, Clone)]
#[command(name = "frota")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Show informational output (default is quiet mode with only warnings and errors)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Output as JSON
    #[arg(long, global = true, conflicts_with = "csv")]
    pub json: bool,

    /// Output the report's main table as CSV
    #[arg(long, global = true)]
    pub csv: bool,

    /// Reference instant (YYYY-MM-DD or RFC 3339); defaults to the system clock
    #[arg(long, global = true, value_parser = parse_now)]
    pub now: Option<DateTime<Utc>>,

    /// Timezone the reference day is read in (e.g. "Africa/Luanda", "UTC")
    #[arg(long, short = 'z', global = true)]
    pub timezone: Option<String>,

    /// Use UTC for the reference day (overrides --timezone and --local)
    #[arg(long, global = true)]
    pub utc: bool,

    /// Use the system's local timezone for the reference day
    #[arg(long, global = true)]
    pub local: bool,

    /// Dataset file (JSON); falls back to FROTA_DATA_PATH, then the config dir
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Ticket KPIs and status distribution
    Overview(OverviewArgs),
    /// Fuel totals and top vehicles
    Fuel(FuelArgs),
    /// Ticket priority distribution
    Priority(PriorityArgs),
    /// Manual fueling audit per station
    Audit(AuditArgs),
}

impl Command {
    /// Overview with default arguments
    pub fn default_overview() -> Self {
        Command::Overview(OverviewArgs::default())
    }
}

/// Bucket order of the status distribution
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrderArg {
    /// Largest bucket first
    #[default]
    Count,
    /// Palette legend order
    Legend,
    /// Order of first appearance
    FirstSeen,
}

impl From<OrderArg> for BucketOrder {
    fn from(order: OrderArg) -> Self {
        match order {
            OrderArg::Count => BucketOrder::CountDescending,
            OrderArg::Legend => BucketOrder::Legend,
            OrderArg::FirstSeen => BucketOrder::FirstSeen,
        }
    }
}

/// Arguments for the overview report
#[derive(Args, Debug, Clone)]
pub struct OverviewArgs {
    /// Range: today, last-7, or this-month
    #[arg(long, short = 'r', default_value = "this-month")]
    pub range: ReportRange,

    /// Order of the status buckets
    #[arg(long, value_enum, default_value = "count")]
    pub order: OrderArg,

    /// Only list tickets of one tab: attention, pending, in-progress, completed
    #[arg(long, short = 't')]
    pub tab: Option<TicketTab>,
}

impl Default for OverviewArgs {
    fn default() -> Self {
        Self {
            range: ReportRange::ThisMonth,
            order: OrderArg::Count,
            tab: None,
        }
    }
}

/// Arguments for the fuel report
#[derive(Args, Debug, Clone)]
pub struct FuelArgs {
    /// Range: today, last-7, or last-30
    #[arg(long, short = 'r', default_value = "last-30")]
    pub range: ReportRange,

    /// Number of vehicles to rank
    #[arg(long, short = 'n', default_value_t = DEFAULT_TOP_N)]
    pub top: usize,

    /// Summed cost (KZ) from which a vehicle counts as high-cost
    #[arg(long, default_value_t = DEFAULT_COST_THRESHOLD)]
    pub threshold: f64,
}

impl FuelArgs {
    /// Validated top-N configuration
    pub fn top_n_config(&self) -> Result<TopNConfig> {
        TopNConfig::new(self.top, self.threshold)
    }
}

/// Arguments for the priority report
#[derive(Args, Debug, Clone)]
pub struct PriorityArgs {
    /// Range: today, last-7, last-30, or this-month
    #[arg(long, short = 'r', default_value = "this-month")]
    pub range: ReportRange,
}

/// Arguments for the audit report
#[derive(Args, Debug, Clone)]
pub struct AuditArgs {
    /// Records to list: all, pending, or resolved
    #[arg(long, short = 't', default_value = "all")]
    pub tab: AuditTab,

    /// Restrict to one station id
    #[arg(long, short = 's')]
    pub station: Option<String>,

    /// Only stations with this fuel in stock, e.g. "Diesel" (TODOS keeps all)
    #[arg(long, short = 'f')]
    pub fuel: Option<String>,
}

/// Parse the `--now` reference instant
///
/// Accepts a bare `YYYY-MM-DD`, read as noon UTC, or a full RFC 3339
/// timestamp.
pub fn parse_now(input: &str) -> Result<DateTime<Utc>> {
    let trimmed = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date
            .and_hms_opt(12, 0, 0)
            .map(|naive| naive.and_utc())
            .ok_or_else(|| FrotaError::InvalidDate(format!("Invalid date: {trimmed}")));
    }

    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            FrotaError::InvalidDate(format!(
                "'{trimmed}', expected YYYY-MM-DD or an RFC 3339 timestamp"
            ))
        })
}
