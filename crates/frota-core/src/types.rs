//! Core domain types for frota
//!
//! This module contains the calendar-date value type used by the range
//! filter, the [`Dated`] adapter trait, and the record types the dashboard
//! reports over: tickets, fuel events, stations, and manual fueling records.

use chrono::{Datelike, Duration, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

static ISO_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})$").expect("ISO date pattern is valid")
});

static MONTH_DAY_YEAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{1,2})/([0-9]{1,2})/([0-9]{4})$").expect("M/D/YYYY pattern is valid")
});

/// Calendar day without time information
///
/// Every record date is normalized to this type before it reaches the range
/// filter, so the filter never has to guess a textual format.
///
/// # Examples
/// ```
/// use frota_core::types::CalendarDate;
///
/// let iso = CalendarDate::parse("2024-05-21").unwrap();
/// let us = CalendarDate::parse("5/21/2024").unwrap();
/// assert_eq!(iso, us);
/// assert_eq!(iso.format("%d/%m/%Y"), "21/05/2024");
///
/// assert!(CalendarDate::parse("21-05-2024").is_none());
/// assert!(CalendarDate::parse("2/30/2024").is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Earliest representable day
    pub const MIN: Self = Self(NaiveDate::MIN);
    /// Latest representable day
    pub const MAX: Self = Self(NaiveDate::MAX);

    /// Create a new CalendarDate
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Create from year, month and day; `None` for impossible dates
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Parse a record date in either `YYYY-MM-DD` or `M/D/YYYY` form.
    ///
    /// Surrounding whitespace is ignored. Any other shape, a zero component,
    /// or a date that does not exist on the calendar yields `None`.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();

        if let Some(caps) = ISO_DATE.captures(trimmed) {
            return Self::from_components(&caps[1], &caps[2], &caps[3]);
        }

        if let Some(caps) = MONTH_DAY_YEAR.captures(trimmed) {
            return Self::from_components(&caps[3], &caps[1], &caps[2]);
        }

        None
    }

    fn from_components(year: &str, month: &str, day: &str) -> Option<Self> {
        let year = year.parse::<i32>().ok()?;
        let month = month.parse::<u32>().ok()?;
        let day = day.parse::<u32>().ok()?;

        if year == 0 || month == 0 || day == 0 {
            return None;
        }

        Self::from_ymd(year, month, day)
    }

    /// Get the inner NaiveDate
    pub fn inner(&self) -> &NaiveDate {
        &self.0
    }

    /// Shift by a signed number of days, saturating at the calendar bounds
    pub fn add_days(&self, days: i64) -> Self {
        Duration::try_days(days)
            .and_then(|delta| self.0.checked_add_signed(delta))
            .map(Self)
            .unwrap_or(if days < 0 { Self::MIN } else { Self::MAX })
    }

    /// First day of this date's month
    pub fn first_of_month(&self) -> Self {
        Self(self.0.with_day(1).unwrap_or(self.0))
    }

    /// Format with a chrono format string
    pub fn format(&self, fmt: &str) -> String {
        self.0.format(fmt).to_string()
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

/// A record that carries a calendar date
///
/// Implementations translate whatever textual date the record stores into a
/// [`CalendarDate`]. Returning `None` means the record has no usable date and
/// is dropped by every range filter.
pub trait Dated {
    /// The record's calendar day, if it can be determined
    fn record_date(&self) -> Option<CalendarDate>;
}

impl Dated for CalendarDate {
    fn record_date(&self) -> Option<CalendarDate> {
        Some(*self)
    }
}

impl<T: Dated + ?Sized> Dated for &T {
    fn record_date(&self) -> Option<CalendarDate> {
        (**self).record_date()
    }
}

/// Ticket lifecycle status as shown on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TicketStatus {
    #[serde(rename = "ABERTO")]
    Open,
    #[serde(rename = "EM ANÁLISE", alias = "EM ANALISE")]
    InAnalysis,
    #[serde(rename = "ATRIBUÍDO", alias = "ATRIBUIDO")]
    Assigned,
    #[serde(rename = "REGULARIZAÇÃO", alias = "REGULARIZACAO")]
    Regularization,
    #[serde(rename = "APROVADO")]
    Approved,
    #[serde(rename = "REJEITADO")]
    Rejected,
    #[serde(rename = "CONCLUÍDO", alias = "CONCLUIDO")]
    Completed,
}

impl TicketStatus {
    /// Dashboard label, also used as the distribution category
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "ABERTO",
            Self::InAnalysis => "EM ANÁLISE",
            Self::Assigned => "ATRIBUÍDO",
            Self::Regularization => "REGULARIZAÇÃO",
            Self::Approved => "APROVADO",
            Self::Rejected => "REJEITADO",
            Self::Completed => "CONCLUÍDO",
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ticket priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TicketPriority {
    #[serde(rename = "Alta")]
    High,
    #[serde(rename = "Urgente")]
    Urgent,
    #[serde(rename = "Normal")]
    Normal,
    #[serde(rename = "Baixa")]
    Low,
}

impl TicketPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "Alta",
            Self::Urgent => "Urgente",
            Self::Normal => "Normal",
            Self::Low => "Baixa",
        }
    }
}

impl fmt::Display for TicketPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How urgently the manager should look at a ticket
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttentionLevel {
    High,
    Medium,
    #[default]
    Low,
}

/// Support ticket row
///
/// `date` is kept exactly as the source wrote it (`M/D/YYYY` on the manager
/// overview, `YYYY-MM-DD` on client tickets); [`Dated`] normalizes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: String,
    pub code: String,
    pub subject: String,
    /// Request type, e.g. "PEDIDO CARTAO"
    #[serde(rename = "type")]
    pub kind: String,
    pub requester_name: String,
    #[serde(default)]
    pub requester_role: String,
    #[serde(alias = "createdAt")]
    pub date: String,
    #[serde(default)]
    pub sla_label: String,
    pub status: TicketStatus,
    #[serde(default)]
    pub priority: Option<TicketPriority>,
    #[serde(default)]
    pub attention_level: AttentionLevel,
}

impl Dated for Ticket {
    fn record_date(&self) -> Option<CalendarDate> {
        CalendarDate::parse(&self.date)
    }
}

/// A single fueling event
///
/// Measures are optional; an absent value contributes nothing to sums.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuelEvent {
    pub id: String,
    #[serde(rename = "dateISO", alias = "date")]
    pub date: String,
    /// Vehicle registration plate
    #[serde(rename = "matricula", alias = "plate")]
    pub plate: String,
    #[serde(default)]
    pub liters: Option<f64>,
    #[serde(default)]
    pub cost_kz: Option<f64>,
    #[serde(default)]
    pub station: Option<String>,
    #[serde(default)]
    pub fuel_type: Option<String>,
}

impl FuelEvent {
    /// Create an event with both measures present
    pub fn new(
        id: impl Into<String>,
        date: impl Into<String>,
        plate: impl Into<String>,
        liters: f64,
        cost_kz: f64,
    ) -> Self {
        Self {
            id: id.into(),
            date: date.into(),
            plate: plate.into(),
            liters: Some(liters),
            cost_kz: Some(cost_kz),
            station: None,
            fuel_type: None,
        }
    }

    /// Set the station the event happened at
    pub fn at_station(mut self, station: impl Into<String>) -> Self {
        self.station = Some(station.into());
        self
    }

    /// Set the fuel type
    pub fn with_fuel(mut self, fuel_type: impl Into<String>) -> Self {
        self.fuel_type = Some(fuel_type.into());
        self
    }
}

impl Dated for FuelEvent {
    fn record_date(&self) -> Option<CalendarDate> {
        CalendarDate::parse(&self.date)
    }
}

/// Review state of a manual fueling record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ManualFuelStatus {
    #[serde(rename = "ABERTO")]
    Open,
    #[serde(rename = "APROVADO")]
    Approved,
    #[serde(rename = "EM REGULARIZAÇÃO", alias = "EM REGULARIZACAO")]
    InRegularization,
}

impl ManualFuelStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "ABERTO",
            Self::Approved => "APROVADO",
            Self::InRegularization => "EM REGULARIZAÇÃO",
        }
    }
}

/// Fueling done outside the card flow, pending manager audit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualFuelRecord {
    pub id: String,
    pub date: String,
    #[serde(default)]
    pub time: String,
    pub requester: String,
    pub vehicle: String,
    pub amount_kz: f64,
    pub liters: f64,
    pub status: ManualFuelStatus,
}

impl Dated for ManualFuelRecord {
    fn record_date(&self) -> Option<CalendarDate> {
        CalendarDate::parse(&self.date)
    }
}

/// Operational state of a partner station
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StationStatus {
    #[default]
    #[serde(rename = "DISPONIVEL")]
    Available,
    #[serde(rename = "INDISPONIVEL")]
    Unavailable,
}

/// Stock level of one fuel at a station
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FuelStock {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "LIMITADO")]
    Limited,
    #[serde(rename = "INDISPONIVEL", alias = "INDISPONÍVEL")]
    Unavailable,
}

impl FuelStock {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Limited => "LIMITADO",
            Self::Unavailable => "INDISPONIVEL",
        }
    }
}

impl fmt::Display for FuelStock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One fuel a station sells and how much of it is left
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelAvailability {
    /// Fuel name, e.g. "Diesel" or "Gasolina 95"
    pub fuel: String,
    pub status: FuelStock,
}

impl FuelAvailability {
    pub fn new(fuel: impl Into<String>, status: FuelStock) -> Self {
        Self {
            fuel: fuel.into(),
            status,
        }
    }
}

/// Partner fuel station with its manual fueling history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    pub id: String,
    pub name: String,
    pub city: String,
    #[serde(default)]
    pub status: StationStatus,
    #[serde(default)]
    pub fuels: Vec<FuelAvailability>,
    #[serde(default)]
    pub audit_history: Vec<ManualFuelRecord>,
}
