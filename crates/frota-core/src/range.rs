//! Range filtering for dated records
//!
//! This module turns a named reporting range ("today", "last 7 days", ...)
//! into a half-open window of calendar days and filters records against it.
//!
//! The reference instant is always supplied by the caller; nothing in here
//! reads the system clock, so filtering is deterministic and testable.
//!
//! # Examples
//!
//! ```
//! use frota_core::range::{RangeFilter, ReportRange};
//! use frota_core::types::CalendarDate;
//! use chrono::{TimeZone, Utc};
//!
//! let now = Utc.with_ymd_and_hms(2024, 5, 21, 12, 0, 0).unwrap();
//! let dates = vec![
//!     CalendarDate::parse("2024-05-21").unwrap(),
//!     CalendarDate::parse("5/15/2024").unwrap(),
//!     CalendarDate::parse("5/14/2024").unwrap(),
//! ];
//!
//! let filter = RangeFilter::new(ReportRange::Last7, now);
//! assert_eq!(filter.apply(&dates).len(), 2);
//! ```

use crate::error::{FrotaError, Result};
use crate::types::{CalendarDate, Dated};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, trace};

/// Named reporting range
///
/// Two dashboards use overlapping but different sets: the manager overview
/// offers `Today | Last7 | ThisMonth` and the fuel reports offer
/// `Today | Last7 | Last30`. Both the rolling and the calendar variant are
/// kept; each report checks the range against its own set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportRange {
    /// The reference day only
    Today,
    /// Reference day and the six days before it
    #[serde(rename = "LAST_7")]
    Last7,
    /// Reference day and the 29 days before it
    #[serde(rename = "LAST_30")]
    Last30,
    /// From the first of the reference month through the reference day
    #[serde(alias = "MONTH")]
    ThisMonth,
}

impl ReportRange {
    /// Every range the core can compute
    pub const ALL: &'static [ReportRange] = &[
        ReportRange::Today,
        ReportRange::Last7,
        ReportRange::Last30,
        ReportRange::ThisMonth,
    ];

    /// Ranges offered by the manager overview
    pub const OVERVIEW: &'static [ReportRange] =
        &[ReportRange::ThisMonth, ReportRange::Last7, ReportRange::Today];

    /// Ranges offered by the fuel and KPI reports
    pub const FUEL: &'static [ReportRange] =
        &[ReportRange::Last30, ReportRange::Last7, ReportRange::Today];

    /// Dashboard label for the range
    pub fn label(&self) -> &'static str {
        match self {
            Self::Today => "Hoje",
            Self::Last7 => "Últimos 7 dias",
            Self::Last30 => "Últimos 30 dias",
            Self::ThisMonth => "Este mês",
        }
    }

    /// Fail unless `self` is one of `allowed`
    pub fn ensure_in(self, allowed: &[ReportRange], report: &'static str) -> Result<Self> {
        if allowed.contains(&self) {
            Ok(self)
        } else {
            Err(FrotaError::UnsupportedRange {
                range: self,
                report,
            })
        }
    }
}

impl fmt::Display for ReportRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Today => write!(f, "today"),
            Self::Last7 => write!(f, "last-7"),
            Self::Last30 => write!(f, "last-30"),
            Self::ThisMonth => write!(f, "this-month"),
        }
    }
}

impl FromStr for ReportRange {
    type Err = FrotaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "today" => Ok(Self::Today),
            "last-7" | "last7" | "7d" => Ok(Self::Last7),
            "last-30" | "last30" | "30d" => Ok(Self::Last30),
            "this-month" | "month" => Ok(Self::ThisMonth),
            _ => Err(FrotaError::InvalidRange(format!(
                "'{s}', expected one of: today, last-7, last-30, this-month"
            ))),
        }
    }
}

/// Half-open window `[from, to)` of calendar days
///
/// `to` is the day after the last included day, so `from <= to` always holds
/// and a window covering a single day has `to == from + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeWindow {
    /// First included day
    pub from: CalendarDate,
    /// First excluded day
    pub to: CalendarDate,
}

impl RangeWindow {
    /// Compute the window for `range` anchored on the reference day `today`
    ///
    /// Both bounds saturate at the first and last representable days.
    pub fn for_day(range: ReportRange, today: CalendarDate) -> Self {
        let to = today.add_days(1);
        let from = match range {
            ReportRange::Today => today,
            ReportRange::Last7 => today.add_days(-6),
            ReportRange::Last30 => today.add_days(-29),
            ReportRange::ThisMonth => today.first_of_month(),
        };
        Self { from, to }
    }

    /// Compute the window using the UTC calendar day of `now`
    pub fn compute(range: ReportRange, now: DateTime<Utc>) -> Self {
        Self::for_day(range, CalendarDate::new(now.date_naive()))
    }

    /// Whether `date` falls inside the window
    pub fn contains(&self, date: CalendarDate) -> bool {
        self.from <= date && date < self.to
    }

    /// Number of calendar days covered
    pub fn days(&self) -> i64 {
        (*self.to.inner() - *self.from.inner()).num_days()
    }

    /// Last included day
    pub fn last_day(&self) -> CalendarDate {
        self.to.add_days(-1)
    }
}

/// Range filter for dated records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeFilter {
    range: ReportRange,
    window: RangeWindow,
}

impl RangeFilter {
    /// Create a filter for `range` relative to the UTC day of `now`
    pub fn new(range: ReportRange, now: DateTime<Utc>) -> Self {
        Self::for_day(range, CalendarDate::new(now.date_naive()))
    }

    /// Create a filter anchored on an explicit reference day
    pub fn for_day(range: ReportRange, today: CalendarDate) -> Self {
        let window = RangeWindow::for_day(range, today);
        debug!(
            "Range {} resolves to [{}, {}) ({} days)",
            range,
            window.from,
            window.to,
            window.days()
        );
        Self { range, window }
    }

    pub fn range(&self) -> ReportRange {
        self.range
    }

    pub fn window(&self) -> RangeWindow {
        self.window
    }

    /// Check if a record passes the filter
    ///
    /// Records without a usable date never match.
    pub fn matches<R: Dated + ?Sized>(&self, record: &R) -> bool {
        match record.record_date() {
            Some(date) => self.window.contains(date),
            None => false,
        }
    }

    /// Keep the records that fall inside the window, in input order
    pub fn apply<'a, R: Dated>(&self, records: &'a [R]) -> Vec<&'a R> {
        let mut undated = 0usize;
        let kept: Vec<&R> = records
            .iter()
            .filter(|record| match record.record_date() {
                Some(date) => self.window.contains(date),
                None => {
                    undated += 1;
                    false
                }
            })
            .collect();

        if undated > 0 {
            trace!("Dropped {} records with unparsable dates", undated);
        }
        debug!(
            "Range {} kept {} of {} records",
            self.range,
            kept.len(),
            records.len()
        );

        kept
    }
}

/// Filter `records` to the window of `range` around `now`
///
/// Records whose date cannot be parsed are silently excluded.
pub fn filter_by_range<R: Dated>(
    records: &[R],
    range: ReportRange,
    now: DateTime<Utc>,
) -> Vec<&R> {
    RangeFilter::new(range, now).apply(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FuelEvent;
    use chrono::TimeZone;

    fn day(s: &str) -> CalendarDate {
        CalendarDate::parse(s).unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 21, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_today_window() {
        let window = RangeWindow::compute(ReportRange::Today, now());
        assert_eq!(window.from, day("2024-05-21"));
        assert_eq!(window.to, day("2024-05-22"));
        assert_eq!(window.days(), 1);

        assert!(window.contains(day("2024-05-21")));
        assert!(!window.contains(day("2024-05-20")));
        assert!(!window.contains(day("2024-05-22")));
    }

    #[test]
    fn test_last_7_window() {
        let window = RangeWindow::compute(ReportRange::Last7, now());
        assert_eq!(window.from, day("2024-05-15"));
        assert_eq!(window.days(), 7);
        assert!(window.contains(day("2024-05-15")));
        assert!(!window.contains(day("2024-05-14")));
    }

    #[test]
    fn test_last_30_window_crosses_month() {
        let window = RangeWindow::compute(ReportRange::Last30, now());
        assert_eq!(window.from, day("2024-04-22"));
        assert_eq!(window.last_day(), day("2024-05-21"));
        assert_eq!(window.days(), 30);
    }

    #[test]
    fn test_this_month_window() {
        let window = RangeWindow::compute(ReportRange::ThisMonth, now());
        assert_eq!(window.from, day("2024-05-01"));
        assert_eq!(window.to, day("2024-05-22"));
        assert!(!window.contains(day("2024-04-30")));
    }

    #[test]
    fn test_this_month_on_first_day() {
        let first = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let window = RangeWindow::compute(ReportRange::ThisMonth, first);
        assert_eq!(window.from, day("2024-06-01"));
        assert_eq!(window.days(), 1);
    }

    #[test]
    fn test_reference_time_of_day_does_not_matter() {
        let early = Utc.with_ymd_and_hms(2024, 5, 21, 0, 0, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2024, 5, 21, 23, 59, 59).unwrap();
        for range in ReportRange::ALL {
            assert_eq!(
                RangeWindow::compute(*range, early),
                RangeWindow::compute(*range, late)
            );
        }
    }

    #[test]
    fn test_extreme_reference_instants() {
        let events = vec![
            FuelEvent::new("a", "2024-05-21", "AA-00-BB", 10.0, 20.0),
            FuelEvent::new("b", "9999-12-31", "AA-00-BB", 10.0, 20.0),
        ];

        for range in ReportRange::ALL {
            let late = RangeWindow::compute(*range, DateTime::<Utc>::MAX_UTC);
            assert_eq!(late.to, CalendarDate::MAX);
            assert!(late.from <= late.to);
            assert!(filter_by_range(&events, *range, DateTime::<Utc>::MAX_UTC).is_empty());

            let early = RangeWindow::compute(*range, DateTime::<Utc>::MIN_UTC);
            assert_eq!(early.from, CalendarDate::new(DateTime::<Utc>::MIN_UTC.date_naive()));
            assert!(filter_by_range(&events, *range, DateTime::<Utc>::MIN_UTC).is_empty());
        }

        let last_30 = RangeWindow::compute(ReportRange::Last30, DateTime::<Utc>::MIN_UTC);
        assert_eq!(last_30.from, CalendarDate::MIN);
    }

    #[test]
    fn test_filter_drops_malformed_dates() {
        let events = vec![
            FuelEvent::new("e1", "2024-05-21", "AA-00-BB", 10.0, 20.0),
            FuelEvent::new("e2", "21-05-2024", "AA-00-BB", 10.0, 20.0),
            FuelEvent::new("e3", "not a date", "AA-00-BB", 10.0, 20.0),
        ];

        for range in ReportRange::ALL {
            let kept = filter_by_range(&events, *range, now());
            assert_eq!(kept.len(), 1);
            assert_eq!(kept[0].id, "e1");
        }
    }

    #[test]
    fn test_filter_preserves_input_order() {
        let events = vec![
            FuelEvent::new("e1", "5/20/2024", "A", 1.0, 1.0),
            FuelEvent::new("e2", "2024-05-16", "B", 1.0, 1.0),
            FuelEvent::new("e3", "5/21/2024", "C", 1.0, 1.0),
        ];
        let ids: Vec<_> = filter_by_range(&events, ReportRange::Last7, now())
            .into_iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, vec!["e1", "e2", "e3"]);
    }

    #[test]
    fn test_matches_single_record() {
        let filter = RangeFilter::new(ReportRange::Today, now());
        assert!(filter.matches(&day("2024-05-21")));
        assert!(!filter.matches(&day("2024-05-22")));
        assert_eq!(filter.range(), ReportRange::Today);
    }

    #[test]
    fn test_empty_input() {
        let events: Vec<FuelEvent> = Vec::new();
        assert!(filter_by_range(&events, ReportRange::Last30, now()).is_empty());
    }

    #[test]
    fn test_range_parsing() {
        assert_eq!("today".parse::<ReportRange>().unwrap(), ReportRange::Today);
        assert_eq!("LAST_7".parse::<ReportRange>().unwrap(), ReportRange::Last7);
        assert_eq!("30d".parse::<ReportRange>().unwrap(), ReportRange::Last30);
        assert_eq!("month".parse::<ReportRange>().unwrap(), ReportRange::ThisMonth);
        assert!(matches!(
            "yesterday".parse::<ReportRange>(),
            Err(FrotaError::InvalidRange(_))
        ));
    }

    #[test]
    fn test_range_display_round_trips() {
        for range in ReportRange::ALL {
            assert_eq!(range.to_string().parse::<ReportRange>().unwrap(), *range);
        }
    }

    #[test]
    fn test_range_labels() {
        assert_eq!(ReportRange::Today.label(), "Hoje");
        assert_eq!(ReportRange::Last7.label(), "Últimos 7 dias");
        assert_eq!(ReportRange::Last30.label(), "Últimos 30 dias");
        assert_eq!(ReportRange::ThisMonth.label(), "Este mês");
    }

    #[test]
    fn test_ensure_in_rejects_foreign_range() {
        assert!(ReportRange::ThisMonth.ensure_in(ReportRange::OVERVIEW, "overview").is_ok());
        let err = ReportRange::Last30
            .ensure_in(ReportRange::OVERVIEW, "overview")
            .unwrap_err();
        assert!(matches!(
            err,
            FrotaError::UnsupportedRange {
                range: ReportRange::Last30,
                report: "overview"
            }
        ));
        assert!(ReportRange::ThisMonth.ensure_in(ReportRange::FUEL, "fuel").is_err());
    }

    #[test]
    fn test_range_serde_names() {
        assert_eq!(
            serde_json::to_string(&ReportRange::Last7).unwrap(),
            "\"LAST_7\""
        );
        let month: ReportRange = serde_json::from_str("\"MONTH\"").unwrap();
        assert_eq!(month, ReportRange::ThisMonth);
    }
}
