//! Common test utilities and helpers for frota tests
//!
//! Builders for tickets and fuel events, plus a few reference instants and
//! dataset helpers shared by the integration tests.

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use frota::repository::Dataset;
use frota::types::{AttentionLevel, FuelEvent, Ticket, TicketPriority, TicketStatus};
use once_cell::sync::Lazy;
use std::ffi::OsString;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};
use tempfile::TempDir;

// Serializes environment variable modifications in tests
pub static ENV_MUTEX: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

/// Exclusive hold on the process environment for one test
///
/// Variables touched through the scope get their previous values back
/// when it drops, before the lock is released.
pub struct EnvScope {
    saved: Vec<(&'static str, Option<OsString>)>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvScope {
    pub fn lock() -> Self {
        Self {
            saved: Vec::new(),
            _lock: ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner()),
        }
    }

    pub fn set(&mut self, key: &'static str, value: impl AsRef<std::ffi::OsStr>) -> &mut Self {
        self.saved.push((key, std::env::var_os(key)));
        unsafe { std::env::set_var(key, value) };
        self
    }

    pub fn unset(&mut self, key: &'static str) -> &mut Self {
        self.saved.push((key, std::env::var_os(key)));
        unsafe { std::env::remove_var(key) };
        self
    }
}

impl Drop for EnvScope {
    fn drop(&mut self) {
        while let Some((key, value)) = self.saved.pop() {
            match value {
                Some(value) => unsafe { std::env::set_var(key, value) },
                None => unsafe { std::env::remove_var(key) },
            }
        }
    }
}

/// Plates used across tests
pub const TEST_PLATES: &[&str] = &["AA-00-BB", "XX-99-YY", "ZZ-11-CC", "BB-22-DD"];

/// 2024-05-21 12:00 UTC
pub fn may_21_noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 21, 12, 0, 0).unwrap()
}

/// Builder for test tickets
pub struct TicketBuilder {
    ticket: Ticket,
}

impl TicketBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            ticket: Ticket {
                id: id.to_string(),
                code: format!("TKT-{id}"),
                subject: "Teste".to_string(),
                kind: "SUPORTE".to_string(),
                requester_name: "Lorrys".to_string(),
                requester_role: "Cliente".to_string(),
                date: "2024-05-21".to_string(),
                sla_label: String::new(),
                status: TicketStatus::Open,
                priority: None,
                attention_level: AttentionLevel::Low,
            },
        }
    }

    pub fn with_date(mut self, date: &str) -> Self {
        self.ticket.date = date.to_string();
        self
    }

    pub fn with_status(mut self, status: TicketStatus) -> Self {
        self.ticket.status = status;
        self
    }

    pub fn with_priority(mut self, priority: TicketPriority) -> Self {
        self.ticket.priority = Some(priority);
        self
    }

    pub fn with_attention(mut self, level: AttentionLevel) -> Self {
        self.ticket.attention_level = level;
        self
    }

    pub fn with_sla(mut self, label: &str) -> Self {
        self.ticket.sla_label = label.to_string();
        self
    }

    pub fn build(self) -> Ticket {
        self.ticket
    }
}

/// Builder for test fuel events
pub struct FuelEventBuilder {
    event: FuelEvent,
}

impl FuelEventBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            event: FuelEvent::new(id, "2024-05-21", TEST_PLATES[0], 100.0, 150.0),
        }
    }

    pub fn with_date(mut self, date: &str) -> Self {
        self.event.date = date.to_string();
        self
    }

    pub fn with_plate(mut self, plate: &str) -> Self {
        self.event.plate = plate.to_string();
        self
    }

    pub fn with_liters(mut self, liters: Option<f64>) -> Self {
        self.event.liters = liters;
        self
    }

    pub fn with_cost(mut self, cost: Option<f64>) -> Self {
        self.event.cost_kz = cost;
        self
    }

    pub fn at_station(mut self, station: &str) -> Self {
        self.event = self.event.at_station(station);
        self
    }

    pub fn build(self) -> FuelEvent {
        self.event
    }
}

/// Write `dataset` as JSON into a fresh temp dir
pub fn write_dataset(dataset: &Dataset) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dataset.json");
    std::fs::write(&path, serde_json::to_string_pretty(dataset).unwrap()).unwrap();
    (dir, path)
}
