//! Reporting core for the frota fleet dashboard
//!
//! This crate provides the record types, error handling, range filtering,
//! distribution and top-N aggregation, and the report view models built on
//! top of them. Every function here is synchronous and pure; the reference
//! instant is always an argument.

pub mod audit;
pub mod distribution;
pub mod error;
pub mod fixtures;
pub mod kpis;
pub mod range;
pub mod report;
pub mod repository;
pub mod timezone;
pub mod top_n;
pub mod types;
pub mod workflow;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types
pub use distribution::{BucketOrder, ColorPalette, DistributionAggregator, DistributionBucket};
pub use error::{FrotaError, Result};
pub use range::{RangeFilter, RangeWindow, ReportRange, filter_by_range};
pub use repository::{Dataset, FleetDataSource, InMemoryRepository};
pub use top_n::{CostClass, TopEntityRow, TopNAggregator, TopNConfig};
pub use types::{CalendarDate, Dated, FuelEvent, Station, Ticket};
pub use workflow::filter_stations_by_fuel;
