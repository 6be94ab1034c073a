//! Headline figures for the dashboard cards
//!
//! Fuel totals and ticket counts computed over an already range-filtered
//! record set. Nothing here filters by date; callers pass the output of a
//! [`RangeFilter`](crate::range::RangeFilter).

use crate::types::{AttentionLevel, FuelEvent, Ticket, TicketStatus};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

/// Fuel consumption totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FuelTotals {
    /// Number of fueling events
    pub events: usize,
    pub total_liters: f64,
    pub total_cost: f64,
    /// Total cost divided by total liters, 0 when no liters were pumped
    pub cost_per_liter: f64,
    /// Distinct vehicle plates seen
    pub active_vehicles: usize,
}

impl FuelTotals {
    /// Sum a set of fuel events
    ///
    /// Missing measures count as zero.
    pub fn from_events<'a, I>(events: I) -> Self
    where
        I: IntoIterator<Item = &'a FuelEvent>,
    {
        let mut totals = Self::default();
        let mut plates: HashSet<&str> = HashSet::new();

        for event in events {
            totals.events += 1;
            totals.total_liters += event.liters.unwrap_or(0.0);
            totals.total_cost += event.cost_kz.unwrap_or(0.0);
            plates.insert(event.plate.as_str());
        }

        totals.active_vehicles = plates.len();
        totals.cost_per_liter = if totals.total_liters > 0.0 {
            totals.total_cost / totals.total_liters
        } else {
            0.0
        };
        totals
    }
}

/// Mean of the per-entity cost sums
///
/// Each distinct key contributes one sum, however many records it has.
/// Empty input gives 0.
pub fn average_cost_per_entity<'a, R, I, K, C>(records: I, key: K, cost: C) -> f64
where
    R: 'a + ?Sized,
    I: IntoIterator<Item = &'a R>,
    K: Fn(&R) -> &str,
    C: Fn(&R) -> Option<f64>,
{
    // Sums stay in first-seen key order so the float total is reproducible
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut sums: Vec<f64> = Vec::new();
    for record in records {
        let slot = *index.entry(key(record)).or_insert_with(|| {
            sums.push(0.0);
            sums.len() - 1
        });
        sums[slot] += cost(record).unwrap_or(0.0);
    }

    if sums.is_empty() {
        return 0.0;
    }
    sums.iter().sum::<f64>() / sums.len() as f64
}

/// Overview tab a ticket is listed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TicketTab {
    /// Late or flagged tickets that are not completed
    Attention,
    /// Open tickets nobody flagged
    Pending,
    /// Everything else still being worked on
    InProgress,
    Completed,
}

impl TicketTab {
    pub const ALL: &'static [TicketTab] = &[
        TicketTab::Attention,
        TicketTab::Pending,
        TicketTab::InProgress,
        TicketTab::Completed,
    ];

    /// Which tab `ticket` belongs to
    pub fn of(ticket: &Ticket) -> Self {
        if ticket.status == TicketStatus::Completed {
            return Self::Completed;
        }
        if needs_attention(ticket) {
            return Self::Attention;
        }
        if ticket.status == TicketStatus::Open {
            Self::Pending
        } else {
            Self::InProgress
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Attention => "Atenção",
            Self::Pending => "Pendentes",
            Self::InProgress => "Em Curso",
            Self::Completed => "Concluídos",
        }
    }
}

fn needs_attention(ticket: &Ticket) -> bool {
    ticket.sla_label.to_uppercase().contains("ATRASADO")
        || ticket.attention_level != AttentionLevel::Low
}

impl fmt::Display for TicketTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attention => write!(f, "attention"),
            Self::Pending => write!(f, "pending"),
            Self::InProgress => write!(f, "in-progress"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

impl FromStr for TicketTab {
    type Err = crate::error::FrotaError;

    fn from_str(s: &str) -> crate::error::Result<Self> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "attention" | "atencao" => Ok(Self::Attention),
            "pending" | "pendentes" => Ok(Self::Pending),
            "in-progress" | "em-curso" => Ok(Self::InProgress),
            "completed" | "concluidos" => Ok(Self::Completed),
            _ => Err(crate::error::FrotaError::InvalidArgument(format!(
                "unknown ticket tab '{s}', expected one of: attention, pending, in-progress, completed"
            ))),
        }
    }
}

/// Ticket counts for the overview cards
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketKpis {
    pub total: usize,
    /// Status `ABERTO`
    pub open: usize,
    /// Status `EM ANÁLISE`
    pub in_analysis: usize,
    pub attention: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
}

impl TicketKpis {
    pub fn from_tickets<'a, I>(tickets: I) -> Self
    where
        I: IntoIterator<Item = &'a Ticket>,
    {
        let mut kpis = Self::default();
        for ticket in tickets {
            kpis.total += 1;
            match ticket.status {
                TicketStatus::Open => kpis.open += 1,
                TicketStatus::InAnalysis => kpis.in_analysis += 1,
                _ => {}
            }
            match TicketTab::of(ticket) {
                TicketTab::Attention => kpis.attention += 1,
                TicketTab::Pending => kpis.pending += 1,
                TicketTab::InProgress => kpis.in_progress += 1,
                TicketTab::Completed => kpis.completed += 1,
            }
        }
        kpis
    }

    /// Count for one tab
    pub fn tab_count(&self, tab: TicketTab) -> usize {
        match tab {
            TicketTab::Attention => self.attention,
            TicketTab::Pending => self.pending,
            TicketTab::InProgress => self.in_progress,
            TicketTab::Completed => self.completed,
        }
    }
}
