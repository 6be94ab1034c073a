//! Data source trait and in-memory repository
//!
//! Reports read their records through [`FleetDataSource`] so the same code
//! runs over the demo fixtures, a dataset file, or data a test injects.

use crate::fixtures;
use crate::types::{FuelEvent, Station, Ticket};
use serde::{Deserialize, Serialize};

/// Read access to the records the dashboard reports over
pub trait FleetDataSource: Send + Sync {
    /// Support tickets
    fn tickets(&self) -> &[Ticket];

    /// Fueling events
    fn fuel_events(&self) -> &[FuelEvent];

    /// Partner stations with their audit history
    fn stations(&self) -> &[Station];

    /// Look up a station by id
    fn station(&self, id: &str) -> Option<&Station> {
        self.stations().iter().find(|s| s.id == id)
    }
}

/// Serialized form of a full dataset
///
/// Every collection is optional in the file and defaults to empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(default)]
    pub tickets: Vec<Ticket>,
    #[serde(default)]
    pub fuel_events: Vec<FuelEvent>,
    #[serde(default)]
    pub stations: Vec<Station>,
}

/// Repository holding its records in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    dataset: Dataset,
}

impl InMemoryRepository {
    pub fn new(tickets: Vec<Ticket>, fuel_events: Vec<FuelEvent>, stations: Vec<Station>) -> Self {
        Self {
            dataset: Dataset {
                tickets,
                fuel_events,
                stations,
            },
        }
    }

    /// Repository preloaded with the dashboard demo data
    pub fn demo() -> Self {
        Self::new(
            fixtures::demo_tickets(),
            fixtures::demo_fuel_events(),
            fixtures::demo_stations(),
        )
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn into_dataset(self) -> Dataset {
        self.dataset
    }
}

impl From<Dataset> for InMemoryRepository {
    fn from(dataset: Dataset) -> Self {
        Self { dataset }
    }
}

impl FleetDataSource for InMemoryRepository {
    fn tickets(&self) -> &[Ticket] {
        &self.dataset.tickets
    }

    fn fuel_events(&self) -> &[FuelEvent] {
        &self.dataset.fuel_events
    }

    fn stations(&self) -> &[Station] {
        &self.dataset.stations
    }
}
