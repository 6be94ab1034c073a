//! frota - fleet dashboard reporting for Frota+
//!
//! This library provides functionality to:
//! - Filter tickets and fueling events to a named reporting range
//! - Count records per category with display colors
//! - Rank vehicles and stations by fuel volume and tag high-cost ones
//! - Render the resulting reports as tables, JSON, or CSV
//!
//! # Examples
//!
//! ```
//! use frota::{
//!     fixtures,
//!     range::ReportRange,
//!     report::FuelReport,
//!     repository::{FleetDataSource, InMemoryRepository},
//!     top_n::TopNConfig,
//! };
//!
//! let repo = InMemoryRepository::demo();
//! let report = FuelReport::build(
//!     repo.fuel_events(),
//!     ReportRange::Last30,
//!     fixtures::fuel_reference(),
//!     TopNConfig::default(),
//! )?;
//!
//! assert_eq!(report.top_vehicles[0].key, "AA-00-BB");
//! # Ok::<(), frota::FrotaError>(())
//! ```

pub mod cli;
pub mod commands;
pub mod data_loader;

// Re-export core modules for backward compatibility
pub use frota_core::{
    audit, distribution, error, fixtures, kpis, range, report, repository, timezone, top_n, types,
    workflow,
};
pub use frota_terminal::output;

// Re-export commonly used types
pub use error::{FrotaError, Result};
pub use types::{CalendarDate, Dated, FuelEvent, Station, Ticket};
pub use workflow::filter_stations_by_fuel;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
