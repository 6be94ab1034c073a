//! Error types for frota
//!
//! This module defines the error types used throughout the frota crates.
//! All errors are derived from `thiserror` for convenient error handling
//! and automatic `From` implementations.
//!
//! Note that the reporting core itself is close to infallible: malformed
//! record dates are dropped, empty inputs produce empty outputs, and unknown
//! categories fall back to a default color. Errors are reserved for caller
//! mistakes (an unknown range name, an invalid top-N configuration), for
//! status changes the workflow forbids, and for loading datasets from disk.
//!
//! # Example
//!
//! ```
//! use frota_core::error::{FrotaError, Result};
//! use frota_core::range::ReportRange;
//!
//! fn parse_range(input: &str) -> Result<ReportRange> {
//!     input.parse::<ReportRange>()
//! }
//!
//! assert!(parse_range("last-7").is_ok());
//! assert!(matches!(parse_range("yesterday"), Err(FrotaError::InvalidRange(_))));
//! ```

use std::path::PathBuf;
use thiserror::Error;

use crate::range::ReportRange;

/// Main error type for frota operations
#[derive(Error, Debug)]
pub enum FrotaError {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid date supplied on the command line or in configuration
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    /// Unknown range name
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// A known range that the requested report does not offer
    #[error("Range '{range}' is not available for the {report} report")]
    UnsupportedRange {
        /// The rejected range
        range: ReportRange,
        /// Report that rejected it
        report: &'static str,
    },

    /// Invalid timezone
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Parse error with file context
    #[error("Parse error in {file}: {error}")]
    Parse {
        /// The file that caused the error
        file: PathBuf,
        /// The error message
        error: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Report export error
    #[error("Export error: {0}")]
    Export(String),

    /// A status change the workflow does not allow
    #[error("{record} cannot move from {from} to {to}")]
    InvalidTransition {
        /// Ticket or audit record being changed
        record: String,
        from: &'static str,
        to: &'static str,
    },
}

/// Convenience type alias for Results in frota
pub type Result<T> = std::result::Result<T, FrotaError>;
