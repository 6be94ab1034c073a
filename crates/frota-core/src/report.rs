//! Report view models
//!
//! Each report wires the range filter into the aggregators for one dashboard
//! page. Reports validate their range against the set the page offers and
//! own copies of the rows they list, so they can be handed to a formatter.

use crate::audit::{AuditSummary, AuditTab};
use crate::distribution::{BucketOrder, ColorPalette, DistributionAggregator, DistributionBucket};
use crate::error::Result;
use crate::kpis::{FuelTotals, TicketKpis, TicketTab, average_cost_per_entity};
use crate::range::{RangeFilter, RangeWindow, ReportRange};
use crate::top_n::{TopEntityRow, TopNAggregator, TopNConfig};
use crate::types::{CalendarDate, FuelAvailability, FuelEvent, ManualFuelRecord, Station, Ticket};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

fn utc_day(now: DateTime<Utc>) -> CalendarDate {
    CalendarDate::new(now.date_naive())
}

/// Manager overview: ticket KPIs and status distribution
#[derive(Debug, Clone, Serialize)]
pub struct OverviewReport {
    pub range: ReportRange,
    pub label: &'static str,
    pub window: RangeWindow,
    pub kpis: TicketKpis,
    pub distribution: Vec<DistributionBucket>,
    /// Tickets inside the window, in input order
    pub tickets: Vec<Ticket>,
}

impl OverviewReport {
    pub const NAME: &'static str = "overview";

    /// Build relative to the UTC day of `now`
    pub fn build(
        tickets: &[Ticket],
        range: ReportRange,
        now: DateTime<Utc>,
        order: BucketOrder,
    ) -> Result<Self> {
        Self::build_for_day(tickets, range, utc_day(now), order)
    }

    /// Build relative to an explicit reference day
    pub fn build_for_day(
        tickets: &[Ticket],
        range: ReportRange,
        today: CalendarDate,
        order: BucketOrder,
    ) -> Result<Self> {
        let range = range.ensure_in(ReportRange::OVERVIEW, Self::NAME)?;
        let filter = RangeFilter::for_day(range, today);
        let filtered = filter.apply(tickets);

        let kpis = TicketKpis::from_tickets(filtered.iter().copied());
        let distribution = DistributionAggregator::new(ColorPalette::ticket_status())
            .with_order(order)
            .aggregate(filtered.iter().copied(), |t| t.status.as_str());

        debug!(
            "Overview over {} tickets: {} need attention",
            kpis.total, kpis.attention
        );

        Ok(Self {
            range,
            label: range.label(),
            window: filter.window(),
            kpis,
            distribution,
            tickets: filtered.into_iter().cloned().collect(),
        })
    }

    /// Tickets listed under one overview tab
    pub fn rows(&self, tab: TicketTab) -> Vec<&Ticket> {
        self.tickets
            .iter()
            .filter(|t| TicketTab::of(t) == tab)
            .collect()
    }
}

/// Fuel consumption report
#[derive(Debug, Clone, Serialize)]
pub struct FuelReport {
    pub range: ReportRange,
    pub label: &'static str,
    pub window: RangeWindow,
    pub config: TopNConfig,
    pub totals: FuelTotals,
    /// Mean of per-vehicle cost sums, KZ
    pub average_cost_per_vehicle: f64,
    pub top_vehicles: Vec<TopEntityRow>,
    /// Events without a station are left out
    pub top_stations: Vec<TopEntityRow>,
    /// Event count per fuel type, in first-seen order
    pub fuel_mix: Vec<DistributionBucket>,
}

impl FuelReport {
    pub const NAME: &'static str = "fuel";

    /// Build relative to the UTC day of `now`
    pub fn build(
        events: &[FuelEvent],
        range: ReportRange,
        now: DateTime<Utc>,
        config: TopNConfig,
    ) -> Result<Self> {
        Self::build_for_day(events, range, utc_day(now), config)
    }

    /// Build relative to an explicit reference day
    pub fn build_for_day(
        events: &[FuelEvent],
        range: ReportRange,
        today: CalendarDate,
        config: TopNConfig,
    ) -> Result<Self> {
        let range = range.ensure_in(ReportRange::FUEL, Self::NAME)?;
        let filter = RangeFilter::for_day(range, today);
        let filtered = filter.apply(events);
        let aggregator = TopNAggregator::new(config);

        let top_vehicles = aggregator.aggregate(
            filtered.iter().copied(),
            |e| e.plate.as_str(),
            |e| e.liters,
            |e| e.cost_kz,
        );

        let top_stations = aggregator.aggregate(
            filtered.iter().copied().filter(|e| e.station.is_some()),
            |e| e.station.as_deref().unwrap_or_default(),
            |e| e.liters,
            |e| e.cost_kz,
        );

        let fuel_mix = DistributionAggregator::new(ColorPalette::fuel_type())
            .with_order(BucketOrder::FirstSeen)
            .aggregate(
                filtered.iter().copied().filter(|e| e.fuel_type.is_some()),
                |e| e.fuel_type.as_deref().unwrap_or_default(),
            );

        Ok(Self {
            range,
            label: range.label(),
            window: filter.window(),
            config,
            totals: FuelTotals::from_events(filtered.iter().copied()),
            average_cost_per_vehicle: average_cost_per_entity(
                filtered.iter().copied(),
                |e| e.plate.as_str(),
                |e| e.cost_kz,
            ),
            top_vehicles,
            top_stations,
            fuel_mix,
        })
    }
}

/// Ticket count per priority, in legend order
#[derive(Debug, Clone, Serialize)]
pub struct PriorityReport {
    pub range: ReportRange,
    pub label: &'static str,
    pub window: RangeWindow,
    /// Tickets in the window that carry a priority
    pub total: u64,
    pub distribution: Vec<DistributionBucket>,
}

impl PriorityReport {
    pub const NAME: &'static str = "priority";

    pub fn build(tickets: &[Ticket], range: ReportRange, now: DateTime<Utc>) -> Result<Self> {
        Self::build_for_day(tickets, range, utc_day(now))
    }

    pub fn build_for_day(
        tickets: &[Ticket],
        range: ReportRange,
        today: CalendarDate,
    ) -> Result<Self> {
        let range = range.ensure_in(ReportRange::ALL, Self::NAME)?;
        let filter = RangeFilter::for_day(range, today);
        let filtered = filter.apply(tickets);

        let distribution = DistributionAggregator::new(ColorPalette::ticket_priority())
            .with_order(BucketOrder::Legend)
            .aggregate(
                filtered.iter().copied().filter(|t| t.priority.is_some()),
                |t| t.priority.map(|p| p.as_str()).unwrap_or_default(),
            );

        Ok(Self {
            range,
            label: range.label(),
            window: filter.window(),
            total: crate::distribution::total_count(&distribution),
            distribution,
        })
    }
}

/// Audit view of one station
#[derive(Debug, Clone, Serialize)]
pub struct StationAudit {
    pub id: String,
    pub name: String,
    pub city: String,
    /// Figures over the whole history, whatever the tab
    pub summary: AuditSummary,
    /// Fuel stock levels
    pub fuels: Vec<FuelAvailability>,
    /// Records shown under the selected tab
    pub records: Vec<ManualFuelRecord>,
}

/// Manual fueling audit across stations
#[derive(Debug, Clone, Serialize)]
pub struct StationAuditReport {
    pub tab: AuditTab,
    pub stations: Vec<StationAudit>,
    /// Summary over every station's history combined
    pub overall: AuditSummary,
}

impl StationAuditReport {
    pub fn build<'a, I>(stations: I, tab: AuditTab) -> Self
    where
        I: IntoIterator<Item = &'a Station>,
    {
        let stations: Vec<&Station> = stations.into_iter().collect();
        let audits: Vec<StationAudit> = stations
            .iter()
            .map(|station| StationAudit {
                id: station.id.clone(),
                name: station.name.clone(),
                city: station.city.clone(),
                summary: AuditSummary::from_records(&station.audit_history),
                fuels: station.fuels.clone(),
                records: tab
                    .apply(&station.audit_history)
                    .into_iter()
                    .cloned()
                    .collect(),
            })
            .collect();

        let all_records: Vec<ManualFuelRecord> = stations
            .iter()
            .flat_map(|s| s.audit_history.iter().cloned())
            .collect();

        debug!(
            "Audited {} stations, {} manual records",
            audits.len(),
            all_records.len()
        );

        Self {
            tab,
            stations: audits,
            overall: AuditSummary::from_records(&all_records),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FrotaError;
    use crate::fixtures;
    use crate::top_n::CostClass;

    fn keys(rows: &[TopEntityRow]) -> Vec<&str> {
        rows.iter().map(|r| r.key.as_str()).collect()
    }

    #[test]
    fn test_overview_this_month() {
        let report = OverviewReport::build(
            &fixtures::demo_tickets(),
            ReportRange::ThisMonth,
            fixtures::overview_reference(),
            BucketOrder::CountDescending,
        )
        .unwrap();

        assert_eq!(report.label, "Este mês");
        assert_eq!(report.kpis.total, 6);
        assert_eq!(report.kpis.attention, 4);
        assert_eq!(report.kpis.completed, 2);
        assert_eq!(report.distribution[0].name, "CONCLUÍDO");
        assert_eq!(report.distribution[0].value, 2);
        assert_eq!(report.distribution.len(), 5);
        assert_eq!(report.rows(TicketTab::Completed).len(), 2);
    }

    #[test]
    fn test_overview_last_7_and_today() {
        let tickets = fixtures::demo_tickets();
        let now = fixtures::overview_reference();

        let week = OverviewReport::build(&tickets, ReportRange::Last7, now, BucketOrder::default())
            .unwrap();
        let ids: Vec<_> = week.tickets.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["t1", "t2", "t3", "t4"]);
        assert!(week.distribution.iter().all(|b| b.name != "CONCLUÍDO"));

        let today =
            OverviewReport::build(&tickets, ReportRange::Today, now, BucketOrder::default())
                .unwrap();
        assert_eq!(today.kpis.total, 2);
    }

    #[test]
    fn test_overview_rejects_rolling_30() {
        let result = OverviewReport::build(
            &fixtures::demo_tickets(),
            ReportRange::Last30,
            fixtures::overview_reference(),
            BucketOrder::default(),
        );
        assert!(matches!(
            result,
            Err(FrotaError::UnsupportedRange { report: "overview", .. })
        ));
    }

    #[test]
    fn test_fuel_last_30() {
        let report = FuelReport::build(
            &fixtures::demo_fuel_events(),
            ReportRange::Last30,
            fixtures::fuel_reference(),
            TopNConfig::default(),
        )
        .unwrap();

        assert_eq!(report.totals.events, 9);
        assert_eq!(
            keys(&report.top_vehicles),
            vec!["AA-00-BB", "XX-99-YY", "ZZ-11-CC", "BB-22-DD"]
        );
        assert_eq!(report.top_vehicles[0].volume, 360.0);
        assert_eq!(report.top_vehicles[0].cost, 570.0);
        assert_eq!(report.top_vehicles[1].classification, CostClass::HighCost);
        assert_eq!(report.top_vehicles[2].classification, CostClass::Efficient);

        assert_eq!(report.top_stations[0].key, fixtures::STATION_CENTRAL);
        assert_eq!(report.top_stations[0].volume, 490.0);

        let mix: Vec<_> = report
            .fuel_mix
            .iter()
            .map(|b| (b.name.as_str(), b.value))
            .collect();
        assert_eq!(mix, vec![("Diesel", 7), ("Gasolina 95", 2)]);

        // (570 + 410 + 380 + 350) / 4
        assert_eq!(report.average_cost_per_vehicle, 427.5);
    }

    #[test]
    fn test_fuel_last_7() {
        let report = FuelReport::build(
            &fixtures::demo_fuel_events(),
            ReportRange::Last7,
            fixtures::fuel_reference(),
            TopNConfig::default(),
        )
        .unwrap();

        assert_eq!(keys(&report.top_vehicles), vec!["AA-00-BB", "XX-99-YY"]);
        assert_eq!(report.top_vehicles[0].volume, 280.0);
        assert_eq!(report.top_vehicles[0].classification, CostClass::HighCost);
        assert_eq!(report.totals.active_vehicles, 2);
    }

    #[test]
    fn test_fuel_rejects_this_month() {
        let result = FuelReport::build(
            &fixtures::demo_fuel_events(),
            ReportRange::ThisMonth,
            fixtures::fuel_reference(),
            TopNConfig::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_priority_legend_order() {
        let report = PriorityReport::build(
            &fixtures::demo_tickets(),
            ReportRange::ThisMonth,
            fixtures::overview_reference(),
        )
        .unwrap();

        let names: Vec<_> = report.distribution.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Alta", "Baixa", "Normal", "Urgente"]);
        assert_eq!(report.total, 4);
        assert_eq!(report.distribution[3].color, "#ef4444");
    }

    #[test]
    fn test_station_audit() {
        let report = StationAuditReport::build(&fixtures::demo_stations(), AuditTab::Pending);

        assert_eq!(report.stations.len(), 3);
        let central = &report.stations[0];
        assert_eq!(central.summary.count, 2);
        assert_eq!(central.records.len(), 1);
        assert_eq!(central.records[0].id, "g1");
        assert!(report.stations[2].records.is_empty());

        assert_eq!(report.overall.count, 3);
        assert_eq!(report.overall.pending, 1);
        assert_eq!(report.overall.regularized, 2);
    }

    #[test]
    fn test_reports_over_empty_data() {
        let now = fixtures::overview_reference();
        let overview =
            OverviewReport::build(&[], ReportRange::Today, now, BucketOrder::default()).unwrap();
        assert!(overview.distribution.is_empty());

        let fuel = FuelReport::build(&[], ReportRange::Today, now, TopNConfig::default()).unwrap();
        assert!(fuel.top_vehicles.is_empty());
        assert_eq!(fuel.average_cost_per_vehicle, 0.0);

        let audit = StationAuditReport::build(&Vec::<Station>::new(), AuditTab::All);
        assert_eq!(audit.overall, AuditSummary::default());
    }
}
