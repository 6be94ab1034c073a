//! Timezone utilities for the reference day
//!
//! Range windows are anchored on a calendar day. This module decides which
//! zone that day is read in: UTC unless the user asks for an explicit IANA
//! zone or for the system's local zone.

use crate::error::{FrotaError, Result};
use crate::types::CalendarDate;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use std::str::FromStr;
use tracing::debug;

/// Configuration for timezone handling
#[derive(Debug, Clone)]
pub struct TimezoneConfig {
    /// The timezone the reference day is read in
    pub tz: Tz,
    /// Whether the timezone is UTC
    pub is_utc: bool,
}

impl Default for TimezoneConfig {
    fn default() -> Self {
        Self {
            tz: Tz::UTC,
            is_utc: true,
        }
    }
}

impl TimezoneConfig {
    /// Create a timezone configuration from CLI arguments
    ///
    /// `--utc` wins over everything, then an explicit zone, then `--local`.
    pub fn from_cli(timezone_str: Option<&str>, use_utc: bool, use_local: bool) -> Result<Self> {
        if use_utc {
            return Ok(Self::default());
        }

        if let Some(tz_str) = timezone_str {
            let tz = Tz::from_str(tz_str).map_err(|_| {
                FrotaError::InvalidTimezone(format!(
                    "'{}'. Use format like 'Africa/Luanda', 'Europe/Lisbon', or 'UTC'",
                    tz_str
                ))
            })?;
            return Ok(Self {
                tz,
                is_utc: tz == Tz::UTC,
            });
        }

        if use_local {
            let tz = get_local_timezone();
            return Ok(Self {
                tz,
                is_utc: tz == Tz::UTC,
            });
        }

        Ok(Self::default())
    }

    /// Get the display name for the configured timezone
    pub fn display_name(&self) -> &str {
        if self.is_utc { "UTC" } else { self.tz.name() }
    }

    /// Calendar day of `now` in this zone
    pub fn today(&self, now: DateTime<Utc>) -> CalendarDate {
        CalendarDate::new(now.with_timezone(&self.tz).date_naive())
    }
}

/// Zone named by `TZ`, else the one the OS reports, else UTC
pub fn get_local_timezone() -> Tz {
    if let Some(tz) = std::env::var("TZ").ok().and_then(|name| name.parse::<Tz>().ok()) {
        debug!("TZ selects {}", tz.name());
        return tz;
    }

    match iana_time_zone::get_timezone() {
        Ok(name) => name.parse().unwrap_or_else(|_| {
            debug!("Unknown system zone {name}, using UTC");
            Tz::UTC
        }),
        Err(e) => {
            debug!("No system zone ({e}), using UTC");
            Tz::UTC
        }
    }
}
