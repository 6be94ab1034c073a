//! Station audit of manual fueling records

use crate::error::{FrotaError, Result};
use crate::types::{ManualFuelRecord, ManualFuelStatus};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Risk added by each pending record, in percent
pub const RISK_PER_PENDING_PCT: f64 = 0.2;

/// Risk ceiling, in percent
pub const MAX_RISK_PCT: f64 = 0.8;

/// Which records the audit list shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuditTab {
    #[default]
    All,
    /// Records still `ABERTO`
    Pending,
    /// Records already reviewed, whatever the outcome
    Resolved,
}

impl AuditTab {
    pub fn includes(&self, record: &ManualFuelRecord) -> bool {
        match self {
            Self::All => true,
            Self::Pending => record.status == ManualFuelStatus::Open,
            Self::Resolved => record.status != ManualFuelStatus::Open,
        }
    }

    /// Records of `records` shown under this tab, in input order
    pub fn apply<'a>(&self, records: &'a [ManualFuelRecord]) -> Vec<&'a ManualFuelRecord> {
        records.iter().filter(|r| self.includes(r)).collect()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "TODOS",
            Self::Pending => "PENDENTES",
            Self::Resolved => "REGULARIZADOS",
        }
    }
}

impl fmt::Display for AuditTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Pending => write!(f, "pending"),
            Self::Resolved => write!(f, "resolved"),
        }
    }
}

impl FromStr for AuditTab {
    type Err = FrotaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "all" | "todos" => Ok(Self::All),
            "pending" | "pendentes" => Ok(Self::Pending),
            "resolved" | "regularizados" => Ok(Self::Resolved),
            _ => Err(FrotaError::InvalidArgument(format!(
                "unknown audit tab '{s}', expected one of: all, pending, resolved"
            ))),
        }
    }
}

/// Aggregate figures of a station's manual fueling history
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AuditSummary {
    pub count: usize,
    /// Sum of amounts, KZ
    pub total_amount: f64,
    pub total_liters: f64,
    /// Records with status `ABERTO`
    pub pending: usize,
    /// `count - pending`
    pub regularized: usize,
    /// 0.2 per pending record, capped at 0.8
    pub risk_pct: f64,
}

impl AuditSummary {
    pub fn from_records(records: &[ManualFuelRecord]) -> Self {
        let pending = records
            .iter()
            .filter(|r| r.status == ManualFuelStatus::Open)
            .count();

        Self {
            count: records.len(),
            total_amount: records.iter().map(|r| r.amount_kz).sum(),
            total_liters: records.iter().map(|r| r.liters).sum(),
            pending,
            regularized: records.len().saturating_sub(pending),
            risk_pct: (pending as f64 * RISK_PER_PENDING_PCT).min(MAX_RISK_PCT),
        }
    }

    /// Size of a tab's list
    pub fn tab_count(&self, tab: AuditTab) -> usize {
        match tab {
            AuditTab::All => self.count,
            AuditTab::Pending => self.pending,
            AuditTab::Resolved => self.regularized,
        }
    }
}
