//! Terminal output formatting for frota
//!
//! This crate renders report view models as tables, JSON, or CSV.

pub mod output;

pub use output::{
    CsvFormatter, JsonFormatter, OutputFormat, OutputFormatter, TableFormatter, get_formatter,
};
