//! Output formatting for frota reports
//!
//! This module renders report view models in three formats:
//! - Table format for human-readable terminal output
//! - JSON format for machine-readable output and integration with other tools
//! - CSV format for spreadsheet export of the main table of each report
//!
//! # Examples
//!
//! ```
//! use frota_core::fixtures;
//! use frota_core::range::ReportRange;
//! use frota_core::report::FuelReport;
//! use frota_core::top_n::TopNConfig;
//! use frota_terminal::output::{OutputFormat, get_formatter};
//!
//! let report = FuelReport::build(
//!     &fixtures::demo_fuel_events(),
//!     ReportRange::Last7,
//!     fixtures::fuel_reference(),
//!     TopNConfig::default(),
//! )
//! .unwrap();
//!
//! let csv = get_formatter(OutputFormat::Csv).format_fuel(&report).unwrap();
//! assert!(csv.starts_with("rank,plate,liters,cost_kz,classification"));
//! ```

use colored::*;
use frota_core::audit::AuditSummary;
use frota_core::distribution::{DistributionBucket, total_count};
use frota_core::error::{FrotaError, Result};
use frota_core::kpis::TicketTab;
use frota_core::range::RangeWindow;
use frota_core::report::{FuelReport, OverviewReport, PriorityReport, StationAuditReport};
use frota_core::top_n::{CostClass, TopEntityRow};
use frota_core::types::{FuelAvailability, FuelStock, Ticket};
use prettytable::{Row, Table, format, row};
use serde_json::json;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Trait for report formatters
///
/// One method per report. The overview takes an optional tab; when set,
/// only the tickets of that tab are listed.
pub trait OutputFormatter {
    /// Format the manager overview
    fn format_overview(&self, report: &OverviewReport, tab: Option<TicketTab>) -> Result<String>;

    /// Format the fuel consumption report
    fn format_fuel(&self, report: &FuelReport) -> Result<String>;

    /// Format the priority distribution
    fn format_priority(&self, report: &PriorityReport) -> Result<String>;

    /// Format the station audit
    fn format_audit(&self, report: &StationAuditReport) -> Result<String>;
}

/// Output format selected on the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl OutputFormat {
    /// Resolve from the `--json` / `--csv` flags; JSON wins if both are set
    pub fn from_flags(json: bool, csv: bool) -> Self {
        if json {
            Self::Json
        } else if csv {
            Self::Csv
        } else {
            Self::Table
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = FrotaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => Err(FrotaError::InvalidArgument(format!(
                "unknown output format '{s}', expected one of: table, json, csv"
            ))),
        }
    }
}

/// Format a number with thousands separators
fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();

    for (count, ch) in s.chars().rev().enumerate() {
        if count > 0 && count % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }

    result.chars().rev().collect()
}

/// Format a KZ amount with two decimals and thousands separators
fn format_kz(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let whole = whole.parse::<u64>().map(format_number).unwrap_or_else(|_| whole.to_string());
    let sign = if amount < 0.0 { "-" } else { "" };
    format!("KZ {sign}{whole}.{cents}")
}

fn format_liters(liters: f64) -> String {
    format!("{liters:.1} L")
}

fn format_window(window: &RangeWindow) -> String {
    format!("{} to {}", window.from, window.last_day())
}

fn share(value: u64, total: u64) -> String {
    if total == 0 {
        return "0.0%".to_string();
    }
    format!("{:.1}%", value as f64 * 100.0 / total as f64)
}

/// Table formatter for human-readable output
pub struct TableFormatter {
    /// Whether to use colored output (respects NO_COLOR environment variable)
    colored_output: bool,
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl TableFormatter {
    pub fn new() -> Self {
        Self {
            colored_output: std::env::var("NO_COLOR").is_err(),
        }
    }

    /// Force colors on or off
    pub fn with_color(mut self, enabled: bool) -> Self {
        self.colored_output = enabled;
        self
    }

    fn new_table() -> Table {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        table
    }

    fn heading(&self, text: &str) -> String {
        if self.colored_output {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn classification(&self, class: CostClass) -> String {
        let label = class.label();
        if !self.colored_output {
            return label.to_string();
        }
        match class {
            CostClass::HighCost => label.red().bold().to_string(),
            CostClass::Efficient => label.green().to_string(),
        }
    }

    fn distribution_table(title: &str, buckets: &[DistributionBucket]) -> Table {
        let total = total_count(buckets);
        let mut table = Self::new_table();
        table.set_titles(row![b -> title, b -> "Count", b -> "Share", b -> "Color"]);
        for bucket in buckets {
            table.add_row(row![
                bucket.name,
                r -> format_number(bucket.value),
                r -> share(bucket.value, total),
                bucket.color
            ]);
        }
        table.add_row(row![b -> "TOTAL", b -> format_number(total), b -> "", ""]);
        table
    }

    fn ticket_table(tickets: &[&Ticket]) -> Table {
        let mut table = Self::new_table();
        table.set_titles(row![
            b -> "Code",
            b -> "Subject",
            b -> "Type",
            b -> "Requester",
            b -> "Date",
            b -> "SLA",
            b -> "Status"
        ]);
        for ticket in tickets {
            table.add_row(row![
                ticket.code,
                ticket.subject,
                ticket.kind,
                ticket.requester_name,
                ticket.date,
                ticket.sla_label,
                ticket.status
            ]);
        }
        table
    }

    fn ranking_table(&self, key_title: &str, rows: &[TopEntityRow]) -> Table {
        let mut table = Self::new_table();
        table.set_titles(row![
            b -> "#",
            b -> key_title,
            b -> "Liters",
            b -> "Cost",
            b -> "Efficiency"
        ]);
        for (rank, entity) in rows.iter().enumerate() {
            table.add_row(row![
                r -> rank + 1,
                entity.key,
                r -> format_liters(entity.volume),
                r -> format_kz(entity.cost),
                self.classification(entity.classification)
            ]);
        }
        table
    }

    fn audit_row(name: &str, city: &str, in_stock: &str, summary: &AuditSummary) -> Row {
        row![
            name,
            city,
            in_stock,
            r -> summary.count,
            r -> summary.pending,
            r -> summary.regularized,
            r -> format_kz(summary.total_amount),
            r -> format_liters(summary.total_liters),
            r -> format!("{:.1}%", summary.risk_pct)
        ]
    }
}

impl OutputFormatter for TableFormatter {
    fn format_overview(&self, report: &OverviewReport, tab: Option<TicketTab>) -> Result<String> {
        let mut output = String::new();
        output.push_str(&self.heading(&format!(
            "Overview: {} ({})",
            report.label,
            format_window(&report.window)
        )));
        output.push('\n');

        let kpis = &report.kpis;
        let mut summary = Self::new_table();
        summary.set_titles(row![b -> "Tickets", b -> "Open", b -> "In analysis"]);
        summary.add_row(row![r -> kpis.total, r -> kpis.open, r -> kpis.in_analysis]);
        output.push_str(&summary.to_string());

        let mut tabs = Self::new_table();
        tabs.set_titles(Row::new(
            TicketTab::ALL
                .iter()
                .map(|t| prettytable::Cell::new(t.label()).style_spec("b"))
                .collect(),
        ));
        tabs.add_row(Row::new(
            TicketTab::ALL
                .iter()
                .map(|t| prettytable::Cell::new(&kpis.tab_count(*t).to_string()).style_spec("r"))
                .collect(),
        ));
        output.push_str(&tabs.to_string());

        output.push('\n');
        output.push_str(&Self::distribution_table("Status", &report.distribution).to_string());

        let listed: Vec<&Ticket> = match tab {
            Some(tab) => report.rows(tab),
            None => report.tickets.iter().collect(),
        };
        output.push('\n');
        match tab {
            Some(tab) => output.push_str(&self.heading(&format!("Tickets: {}", tab.label()))),
            None => output.push_str(&self.heading("Tickets")),
        }
        output.push('\n');
        output.push_str(&Self::ticket_table(&listed).to_string());

        Ok(output)
    }

    fn format_fuel(&self, report: &FuelReport) -> Result<String> {
        let mut output = String::new();
        output.push_str(&self.heading(&format!(
            "Fuel: {} ({})",
            report.label,
            format_window(&report.window)
        )));
        output.push('\n');

        let totals = &report.totals;
        let mut summary = Self::new_table();
        summary.set_titles(row![
            b -> "Events",
            b -> "Liters",
            b -> "Cost",
            b -> "Cost/L",
            b -> "Vehicles",
            b -> "Avg cost/vehicle"
        ]);
        summary.add_row(row![
            r -> totals.events,
            r -> format_liters(totals.total_liters),
            r -> format_kz(totals.total_cost),
            r -> format_kz(totals.cost_per_liter),
            r -> totals.active_vehicles,
            r -> format_kz(report.average_cost_per_vehicle)
        ]);
        output.push_str(&summary.to_string());

        output.push('\n');
        output.push_str(&self.heading(&format!(
            "Top {} vehicles (high cost from {})",
            report.config.n(),
            format_kz(report.config.cost_threshold())
        )));
        output.push('\n');
        output.push_str(&self.ranking_table("Plate", &report.top_vehicles).to_string());

        if !report.top_stations.is_empty() {
            output.push('\n');
            output.push_str(&self.heading("Top stations"));
            output.push('\n');
            output.push_str(&self.ranking_table("Station", &report.top_stations).to_string());
        }

        if !report.fuel_mix.is_empty() {
            output.push('\n');
            output.push_str(&Self::distribution_table("Fuel", &report.fuel_mix).to_string());
        }

        Ok(output)
    }

    fn format_priority(&self, report: &PriorityReport) -> Result<String> {
        let mut output = String::new();
        output.push_str(&self.heading(&format!(
            "Priority: {} ({})",
            report.label,
            format_window(&report.window)
        )));
        output.push('\n');
        output.push_str(&Self::distribution_table("Priority", &report.distribution).to_string());
        Ok(output)
    }

    fn format_audit(&self, report: &StationAuditReport) -> Result<String> {
        let mut output = String::new();
        output.push_str(&self.heading(&format!("Station audit: {}", report.tab.label())));
        output.push('\n');

        let mut summary = Self::new_table();
        summary.set_titles(row![
            b -> "Station",
            b -> "City",
            b -> "In stock",
            b -> "Records",
            b -> "Pending",
            b -> "Resolved",
            b -> "Amount",
            b -> "Liters",
            b -> "Risk"
        ]);
        for station in &report.stations {
            summary.add_row(Self::audit_row(
                &station.name,
                &station.city,
                &in_stock(&station.fuels),
                &station.summary,
            ));
        }
        let mut total_row = Self::audit_row("TOTAL", "", "", &report.overall);
        if let Some(cell) = total_row.get_mut_cell(0) {
            cell.style(prettytable::Attr::Bold);
        }
        summary.add_row(total_row);
        output.push_str(&summary.to_string());

        let mut records = Self::new_table();
        records.set_titles(row![
            b -> "Station",
            b -> "Date",
            b -> "Time",
            b -> "Requester",
            b -> "Vehicle",
            b -> "Amount",
            b -> "Liters",
            b -> "Status"
        ]);
        for station in &report.stations {
            for record in &station.records {
                records.add_row(row![
                    station.id,
                    record.date,
                    record.time,
                    record.requester,
                    record.vehicle,
                    r -> format_kz(record.amount_kz),
                    r -> format_liters(record.liters),
                    record.status.as_str()
                ]);
            }
        }
        output.push('\n');
        output.push_str(&records.to_string());

        Ok(output)
    }
}

/// Names of the fuels with `OK` stock, comma separated
fn in_stock(fuels: &[FuelAvailability]) -> String {
    fuels
        .iter()
        .filter(|f| f.status == FuelStock::Ok)
        .map(|f| f.fuel.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter;

impl JsonFormatter {
    fn render(value: &serde_json::Value) -> Result<String> {
        Ok(serde_json::to_string_pretty(value)?)
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_overview(&self, report: &OverviewReport, tab: Option<TicketTab>) -> Result<String> {
        let tickets: Vec<&Ticket> = match tab {
            Some(tab) => report.rows(tab),
            None => report.tickets.iter().collect(),
        };
        Self::render(&json!({
            "report": OverviewReport::NAME,
            "range": report.range,
            "label": report.label,
            "window": report.window,
            "tab": tab.map(|t| t.to_string()),
            "kpis": report.kpis,
            "distribution": report.distribution,
            "tickets": tickets,
        }))
    }

    fn format_fuel(&self, report: &FuelReport) -> Result<String> {
        Self::render(&json!({
            "report": FuelReport::NAME,
            "range": report.range,
            "label": report.label,
            "window": report.window,
            "top_n": report.config.n(),
            "cost_threshold": report.config.cost_threshold(),
            "totals": report.totals,
            "average_cost_per_vehicle": report.average_cost_per_vehicle,
            "top_vehicles": report.top_vehicles,
            "top_stations": report.top_stations,
            "fuel_mix": report.fuel_mix,
        }))
    }

    fn format_priority(&self, report: &PriorityReport) -> Result<String> {
        Self::render(&json!({
            "report": PriorityReport::NAME,
            "range": report.range,
            "label": report.label,
            "window": report.window,
            "total": report.total,
            "distribution": report.distribution,
        }))
    }

    fn format_audit(&self, report: &StationAuditReport) -> Result<String> {
        Self::render(&json!({
            "report": "audit",
            "tab": report.tab,
            "overall": report.overall,
            "stations": report.stations,
        }))
    }
}

/// CSV formatter
///
/// Writes the main table of each report: listed tickets, ranked vehicles,
/// priority buckets, or audit records.
pub struct CsvFormatter;

impl CsvFormatter {
    fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String> {
        let bytes = writer
            .into_inner()
            .map_err(|e| FrotaError::Export(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| FrotaError::Export(e.to_string()))
    }

    fn export_err(e: csv::Error) -> FrotaError {
        FrotaError::Export(e.to_string())
    }
}

impl OutputFormatter for CsvFormatter {
    fn format_overview(&self, report: &OverviewReport, tab: Option<TicketTab>) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record([
                "code", "subject", "type", "requester", "date", "sla", "status", "tab",
            ])
            .map_err(Self::export_err)?;

        let tickets: Vec<&Ticket> = match tab {
            Some(tab) => report.rows(tab),
            None => report.tickets.iter().collect(),
        };
        for ticket in tickets {
            let tab = TicketTab::of(ticket).to_string();
            writer
                .write_record([
                    ticket.code.as_str(),
                    ticket.subject.as_str(),
                    ticket.kind.as_str(),
                    ticket.requester_name.as_str(),
                    ticket.date.as_str(),
                    ticket.sla_label.as_str(),
                    ticket.status.as_str(),
                    tab.as_str(),
                ])
                .map_err(Self::export_err)?;
        }
        Self::finish(writer)
    }

    fn format_fuel(&self, report: &FuelReport) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(["rank", "plate", "liters", "cost_kz", "classification"])
            .map_err(Self::export_err)?;
        for (rank, row) in report.top_vehicles.iter().enumerate() {
            writer
                .write_record([
                    (rank + 1).to_string(),
                    row.key.clone(),
                    format!("{:.1}", row.volume),
                    format!("{:.2}", row.cost),
                    row.classification.to_string(),
                ])
                .map_err(Self::export_err)?;
        }
        debug!("Exported {} vehicle rows", report.top_vehicles.len());
        Self::finish(writer)
    }

    fn format_priority(&self, report: &PriorityReport) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(["priority", "count", "color"])
            .map_err(Self::export_err)?;
        for bucket in &report.distribution {
            writer
                .write_record([
                    bucket.name.clone(),
                    bucket.value.to_string(),
                    bucket.color.clone(),
                ])
                .map_err(Self::export_err)?;
        }
        Self::finish(writer)
    }

    fn format_audit(&self, report: &StationAuditReport) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record([
                "station", "record", "date", "time", "requester", "vehicle", "amount_kz",
                "liters", "status",
            ])
            .map_err(Self::export_err)?;
        for station in &report.stations {
            for record in &station.records {
                writer
                    .write_record([
                        station.id.clone(),
                        record.id.clone(),
                        record.date.clone(),
                        record.time.clone(),
                        record.requester.clone(),
                        record.vehicle.clone(),
                        format!("{:.2}", record.amount_kz),
                        format!("{:.1}", record.liters),
                        record.status.as_str().to_string(),
                    ])
                    .map_err(Self::export_err)?;
            }
        }
        Self::finish(writer)
    }
}

/// Get the formatter for an output format
pub fn get_formatter(format: OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Table => Box::new(TableFormatter::new()),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Csv => Box::new(CsvFormatter),
    }
}
