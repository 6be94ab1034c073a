//! Status changes applied from the support and manager screens
//!
//! Tickets move through support (start analysis, conclude) and manager
//! review (approve, reject). Manual fueling records are approved or sent to
//! regularization while still `ABERTO`. Every change returns an updated
//! copy and leaves the input untouched.

use crate::error::{FrotaError, Result};
use crate::types::{FuelStock, ManualFuelRecord, ManualFuelStatus, Station, Ticket, TicketStatus};
use tracing::debug;

impl TicketStatus {
    /// Whether a ticket in this status may be moved to `to`
    ///
    /// Support can start analysis on, or conclude, anything not yet
    /// concluded. Managers only decide on tickets under analysis.
    pub fn can_transition_to(self, to: TicketStatus) -> bool {
        match to {
            TicketStatus::InAnalysis | TicketStatus::Completed => self != TicketStatus::Completed,
            TicketStatus::Approved | TicketStatus::Rejected => self == TicketStatus::InAnalysis,
            _ => false,
        }
    }
}

impl Ticket {
    /// Copy of this ticket moved to `to`
    ///
    /// # Errors
    ///
    /// [`FrotaError::InvalidTransition`] when the move is not allowed.
    pub fn transition(&self, to: TicketStatus) -> Result<Ticket> {
        if !self.status.can_transition_to(to) {
            return Err(FrotaError::InvalidTransition {
                record: format!("ticket {}", self.code),
                from: self.status.as_str(),
                to: to.as_str(),
            });
        }

        debug!("Ticket {} moved from {} to {}", self.code, self.status, to);
        Ok(Ticket {
            status: to,
            ..self.clone()
        })
    }

    pub fn start_analysis(&self) -> Result<Ticket> {
        self.transition(TicketStatus::InAnalysis)
    }

    pub fn conclude(&self) -> Result<Ticket> {
        self.transition(TicketStatus::Completed)
    }

    pub fn approve(&self) -> Result<Ticket> {
        self.transition(TicketStatus::Approved)
    }

    pub fn reject(&self) -> Result<Ticket> {
        self.transition(TicketStatus::Rejected)
    }
}

impl ManualFuelStatus {
    /// Only open records are reviewed, and review is final
    pub fn can_transition_to(self, to: ManualFuelStatus) -> bool {
        self == ManualFuelStatus::Open && to != ManualFuelStatus::Open
    }
}

impl Station {
    /// Whether `fuel` is in stock (`OK`); the name match ignores ASCII case
    pub fn offers(&self, fuel: &str) -> bool {
        self.fuels
            .iter()
            .any(|f| f.status == FuelStock::Ok && f.fuel.eq_ignore_ascii_case(fuel.trim()))
    }

    /// Copy with record `record_id` approved
    pub fn approve_record(&self, record_id: &str) -> Result<Station> {
        self.review_record(record_id, ManualFuelStatus::Approved)
    }

    /// Copy with record `record_id` sent to regularization
    pub fn regularize(&self, record_id: &str) -> Result<Station> {
        self.review_record(record_id, ManualFuelStatus::InRegularization)
    }

    fn review_record(&self, record_id: &str, to: ManualFuelStatus) -> Result<Station> {
        let index = self
            .audit_history
            .iter()
            .position(|r| r.id == record_id)
            .ok_or_else(|| {
                FrotaError::InvalidArgument(format!(
                    "station '{}' has no record '{record_id}'",
                    self.id
                ))
            })?;

        let from = self.audit_history[index].status;
        if !from.can_transition_to(to) {
            return Err(FrotaError::InvalidTransition {
                record: format!("record {record_id}"),
                from: from.as_str(),
                to: to.as_str(),
            });
        }

        let mut next = self.clone();
        next.audit_history[index].status = to;
        debug!(
            "Record {} at station {} moved from {} to {}",
            record_id,
            self.id,
            from.as_str(),
            to.as_str()
        );
        Ok(next)
    }

    /// Copy with a new manual fueling record on top of the history
    ///
    /// Fueling `fuel` by hand proves the station has it, so that fuel's
    /// stock goes back to `OK`.
    ///
    /// # Errors
    ///
    /// A record id already in the history is rejected, so submitting the
    /// same record twice does not duplicate it.
    pub fn record_manual_fueling(&self, record: ManualFuelRecord, fuel: &str) -> Result<Station> {
        if self.audit_history.iter().any(|r| r.id == record.id) {
            return Err(FrotaError::InvalidArgument(format!(
                "station '{}' already has record '{}'",
                self.id, record.id
            )));
        }

        let mut next = self.clone();
        next.audit_history.insert(0, record);
        for availability in &mut next.fuels {
            if availability.fuel.eq_ignore_ascii_case(fuel.trim()) {
                availability.status = FuelStock::Ok;
            }
        }
        Ok(next)
    }
}

/// Stations that have `fuel` in stock, in input order
///
/// `None` and `"TODOS"` keep every station.
pub fn filter_stations_by_fuel<'a>(stations: &'a [Station], fuel: Option<&str>) -> Vec<&'a Station> {
    match fuel.map(str::trim) {
        None => stations.iter().collect(),
        Some(f) if f.eq_ignore_ascii_case("TODOS") => stations.iter().collect(),
        Some(f) => stations.iter().filter(|s| s.offers(f)).collect(),
    }
}
