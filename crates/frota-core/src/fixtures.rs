//! Demo dataset shown by the dashboard
//!
//! Overview tickets are dated relative to 2024-05-21 and fuel events relative
//! to 2026-01-25; [`overview_reference`] and [`fuel_reference`] return those
//! instants so demo reports are reproducible.

use crate::types::{
    AttentionLevel, FuelAvailability, FuelEvent, FuelStock, ManualFuelRecord, ManualFuelStatus,
    Station, StationStatus, Ticket, TicketPriority, TicketStatus,
};
use chrono::{DateTime, TimeZone, Utc};

pub const STATION_CENTRAL: &str = "Posto Central - Av. Liberdade";
pub const STATION_NORTE: &str = "Posto Norte - Zona Industrial";
pub const STATION_SUL: &str = "Posto Sul - A2";

const DIESEL: &str = "Diesel";
const GASOLINE: &str = "Gasolina 95";
const ADBLUE: &str = "AdBlue";

/// Reference instant of the overview demo, 2024-05-21 12:00 UTC
pub fn overview_reference() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 21, 12, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Reference instant of the fuel report demo, 2026-01-25 12:00 UTC
pub fn fuel_reference() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 25, 12, 0, 0)
        .single()
        .unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn ticket(
    id: &str,
    code: &str,
    subject: &str,
    kind: &str,
    requester: &str,
    date: &str,
    sla_label: &str,
    status: TicketStatus,
    priority: Option<TicketPriority>,
    attention_level: AttentionLevel,
) -> Ticket {
    Ticket {
        id: id.to_string(),
        code: code.to_string(),
        subject: subject.to_string(),
        kind: kind.to_string(),
        requester_name: requester.to_string(),
        requester_role: "Cliente".to_string(),
        date: date.to_string(),
        sla_label: sla_label.to_string(),
        status,
        priority,
        attention_level,
    }
}

/// Manager overview tickets, dated `M/D/YYYY`
pub fn demo_tickets() -> Vec<Ticket> {
    use AttentionLevel::*;
    use TicketStatus::*;

    vec![
        ticket(
            "t1",
            "TKT-2024-001",
            "Solicitação Novo Cartão - Cliente Lorrys",
            "PEDIDO CARTAO",
            "Lorrys",
            "5/20/2024",
            "ATRASADO +48H",
            InAnalysis,
            Some(TicketPriority::High),
            High,
        ),
        ticket(
            "t2",
            "TKT-2024-002",
            "Abastecimento Manual - Emergência",
            "ABASTECIMENTO MANUAL",
            "Lorrys",
            "5/21/2024",
            "ATRASADO +48H",
            Open,
            Some(TicketPriority::Urgent),
            High,
        ),
        ticket(
            "t3",
            "TKT-2024-004",
            "Erro de Leitura Chip",
            "SUPORTE",
            "Lorrys",
            "5/21/2024",
            "ATRASADO +48H",
            Assigned,
            Some(TicketPriority::Normal),
            Medium,
        ),
        ticket(
            "t4",
            "TKT-2024-005",
            "Regularização Abastecimento - Fim de Semana",
            "ABASTECIMENTO MANUAL",
            "Maria Santos",
            "5/18/2024",
            "ATRASADO +48H",
            Regularization,
            Some(TicketPriority::Low),
            Low,
        ),
        ticket(
            "t5",
            "TKT-2024-006",
            "Cartão emitido com sucesso",
            "PEDIDO CARTAO",
            "Lorrys",
            "5/12/2024",
            "",
            Completed,
            None,
            Low,
        ),
        ticket(
            "t6",
            "TKT-2024-007",
            "Recarga confirmada",
            "CARREGAMENTO",
            "Maria Santos",
            "5/10/2024",
            "",
            Completed,
            None,
            Low,
        ),
    ]
}

/// Fueling events behind the reports page, dated `YYYY-MM-DD`
pub fn demo_fuel_events() -> Vec<FuelEvent> {
    vec![
        FuelEvent::new("e1", "2026-01-25", "AA-00-BB", 120.0, 210.0)
            .at_station(STATION_CENTRAL)
            .with_fuel(DIESEL),
        FuelEvent::new("e2", "2026-01-23", "AA-00-BB", 160.0, 240.0)
            .at_station(STATION_NORTE)
            .with_fuel(DIESEL),
        FuelEvent::new("e3", "2026-01-22", "XX-99-YY", 140.0, 210.0)
            .at_station(STATION_CENTRAL)
            .with_fuel(GASOLINE),
        FuelEvent::new("e4", "2026-01-20", "XX-99-YY", 115.0, 200.0)
            .at_station(STATION_SUL)
            .with_fuel(DIESEL),
        FuelEvent::new("e5", "2026-01-18", "ZZ-11-CC", 110.0, 180.0)
            .at_station(STATION_CENTRAL)
            .with_fuel(DIESEL),
        FuelEvent::new("e6", "2026-01-16", "ZZ-11-CC", 120.0, 200.0)
            .at_station(STATION_NORTE)
            .with_fuel(GASOLINE),
        FuelEvent::new("e7", "2026-01-14", "BB-22-DD", 90.0, 150.0)
            .at_station(STATION_SUL)
            .with_fuel(DIESEL),
        FuelEvent::new("e8", "2026-01-12", "BB-22-DD", 120.0, 200.0)
            .at_station(STATION_CENTRAL)
            .with_fuel(DIESEL),
        FuelEvent::new("e9", "2025-12-28", "AA-00-BB", 80.0, 120.0)
            .at_station(STATION_NORTE)
            .with_fuel(DIESEL),
        FuelEvent::new("e10", "2025-12-20", "XX-99-YY", 70.0, 110.0)
            .at_station(STATION_CENTRAL)
            .with_fuel(GASOLINE),
    ]
}

#[allow(clippy::too_many_arguments)]
fn manual(
    id: &str,
    date: &str,
    time: &str,
    requester: &str,
    vehicle: &str,
    amount_kz: f64,
    liters: f64,
    status: ManualFuelStatus,
) -> ManualFuelRecord {
    ManualFuelRecord {
        id: id.to_string(),
        date: date.to_string(),
        time: time.to_string(),
        requester: requester.to_string(),
        vehicle: vehicle.to_string(),
        amount_kz,
        liters,
        status,
    }
}

fn fuels(diesel: FuelStock, gasoline: FuelStock, adblue: FuelStock) -> Vec<FuelAvailability> {
    vec![
        FuelAvailability::new(DIESEL, diesel),
        FuelAvailability::new(GASOLINE, gasoline),
        FuelAvailability::new(ADBLUE, adblue),
    ]
}

/// Partner stations with their manual fueling history
pub fn demo_stations() -> Vec<Station> {
    vec![
        Station {
            id: "gs1".to_string(),
            name: STATION_CENTRAL.to_string(),
            city: "Huíla".to_string(),
            status: StationStatus::Available,
            fuels: fuels(FuelStock::Ok, FuelStock::Ok, FuelStock::Limited),
            audit_history: vec![
                manual(
                    "g1",
                    "5/21/2024",
                    "09:15",
                    "João Motorista",
                    "XX-99-YY",
                    85.5,
                    50.0,
                    ManualFuelStatus::Open,
                ),
                manual(
                    "g2",
                    "5/15/2024",
                    "11:00",
                    "João Motorista",
                    "AA-00-BB",
                    120.0,
                    70.0,
                    ManualFuelStatus::Approved,
                ),
            ],
        },
        Station {
            id: "gs2".to_string(),
            name: STATION_NORTE.to_string(),
            city: "Luanda".to_string(),
            status: StationStatus::Available,
            fuels: fuels(FuelStock::Unavailable, FuelStock::Ok, FuelStock::Ok),
            audit_history: vec![manual(
                "g3",
                "1/14/2026",
                "10:20",
                "Carlos Gestor",
                "LA-091-A-89",
                25000.0,
                15.9,
                ManualFuelStatus::InRegularization,
            )],
        },
        Station {
            id: "gs3".to_string(),
            name: STATION_SUL.to_string(),
            city: "Benguela".to_string(),
            status: StationStatus::Available,
            fuels: fuels(FuelStock::Ok, FuelStock::Limited, FuelStock::Unavailable),
            audit_history: Vec::new(),
        },
    ]
}
