//! Command dispatch
//!
//! Builds the report a command asks for from a data source and renders it
//! with the selected formatter. The reference day is resolved by the caller.

use crate::cli::Command;
use frota_core::error::{FrotaError, Result};
use frota_core::report::{FuelReport, OverviewReport, PriorityReport, StationAuditReport};
use frota_core::repository::FleetDataSource;
use frota_core::types::CalendarDate;
use frota_core::workflow::filter_stations_by_fuel;
use frota_terminal::output::OutputFormatter;
use tracing::info;

/// Run `command` against `source` and return the rendered report
pub fn run_command(
    command: &Command,
    source: &dyn FleetDataSource,
    today: CalendarDate,
    formatter: &dyn OutputFormatter,
) -> Result<String> {
    match command {
        Command::Overview(args) => {
            info!("Running overview report ({})", args.range);
            let report = OverviewReport::build_for_day(
                source.tickets(),
                args.range,
                today,
                args.order.into(),
            )?;
            formatter.format_overview(&report, args.tab)
        }
        Command::Fuel(args) => {
            info!("Running fuel report ({})", args.range);
            let report = FuelReport::build_for_day(
                source.fuel_events(),
                args.range,
                today,
                args.top_n_config()?,
            )?;
            formatter.format_fuel(&report)
        }
        Command::Priority(args) => {
            info!("Running priority report ({})", args.range);
            let report = PriorityReport::build_for_day(source.tickets(), args.range, today)?;
            formatter.format_priority(&report)
        }
        Command::Audit(args) => {
            info!("Running station audit ({})", args.tab);
            let stations = match &args.station {
                Some(id) => {
                    let station = source.station(id).ok_or_else(|| {
                        FrotaError::InvalidArgument(format!("unknown station '{id}'"))
                    })?;
                    std::slice::from_ref(station)
                }
                None => source.stations(),
            };
            let report = StationAuditReport::build(
                filter_stations_by_fuel(stations, args.fuel.as_deref()),
                args.tab,
            );
            formatter.format_audit(&report)
        }
    }
}
