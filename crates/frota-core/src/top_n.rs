//! Top-N entity aggregation
//!
//! Groups records by an entity key (vehicle plate, station), sums a volume
//! and a cost measure per key, tags each entity as high-cost or efficient,
//! and returns the N entities with the largest volume.
//!
//! # Ordering
//!
//! Entities are sorted by descending rounded volume using a stable sort.
//! Entities with equal volume stay in the order their key was first seen
//! in the input.
//!
//! # Examples
//!
//! ```
//! use frota_core::top_n::{CostClass, TopNAggregator, TopNConfig};
//! use frota_core::types::FuelEvent;
//!
//! let events = vec![
//!     FuelEvent::new("e1", "2026-01-25", "AA-00-BB", 120.0, 210.0),
//!     FuelEvent::new("e2", "2026-01-23", "AA-00-BB", 160.0, 240.0),
//!     FuelEvent::new("e3", "2026-01-22", "XX-99-YY", 140.0, 210.0),
//! ];
//!
//! let top = TopNAggregator::new(TopNConfig::default()).aggregate(
//!     &events,
//!     |e| e.plate.as_str(),
//!     |e| e.liters,
//!     |e| e.cost_kz,
//! );
//!
//! assert_eq!(top[0].key, "AA-00-BB");
//! assert_eq!(top[0].volume, 280.0);
//! assert_eq!(top[0].classification, CostClass::HighCost);
//! assert_eq!(top[1].classification, CostClass::Efficient);
//! ```

use crate::error::{FrotaError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// Default number of entities returned
pub const DEFAULT_TOP_N: usize = 4;

/// Default summed cost (KZ) at which an entity counts as high-cost
pub const DEFAULT_COST_THRESHOLD: f64 = 400.0;

/// Cost classification of an aggregated entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CostClass {
    /// Summed cost reached the threshold
    HighCost,
    /// Summed cost stayed below the threshold
    Efficient,
}

impl CostClass {
    /// Classify a summed cost; the threshold itself counts as high-cost
    pub fn classify(cost: f64, threshold: f64) -> Self {
        if cost >= threshold {
            Self::HighCost
        } else {
            Self::Efficient
        }
    }

    /// Dashboard label
    pub fn label(&self) -> &'static str {
        match self {
            Self::HighCost => "Alto custo",
            Self::Efficient => "Eficiente",
        }
    }
}

impl fmt::Display for CostClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HighCost => write!(f, "HIGH_COST"),
            Self::Efficient => write!(f, "EFFICIENT"),
        }
    }
}

/// One ranked entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopEntityRow {
    /// Entity identifier
    pub key: String,
    /// Summed volume, rounded to one decimal
    pub volume: f64,
    /// Summed cost, rounded to two decimals
    pub cost: f64,
    pub classification: CostClass,
}

/// Configuration for [`TopNAggregator`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TopNConfig {
    n: usize,
    cost_threshold: f64,
}

impl<'de> Deserialize<'de> for TopNConfig {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Fields {
            n: usize,
            cost_threshold: f64,
        }

        let fields = Fields::deserialize(deserializer)?;
        Self::new(fields.n, fields.cost_threshold).map_err(serde::de::Error::custom)
    }
}

impl TopNConfig {
    /// Validate and build a configuration
    ///
    /// The threshold must be a finite, non-negative amount.
    pub fn new(n: usize, cost_threshold: f64) -> Result<Self> {
        if !cost_threshold.is_finite() || cost_threshold < 0.0 {
            return Err(FrotaError::InvalidArgument(format!(
                "cost threshold must be a finite, non-negative amount, got {cost_threshold}"
            )));
        }
        Ok(Self { n, cost_threshold })
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn cost_threshold(&self) -> f64 {
        self.cost_threshold
    }
}

impl Default for TopNConfig {
    fn default() -> Self {
        Self {
            n: DEFAULT_TOP_N,
            cost_threshold: DEFAULT_COST_THRESHOLD,
        }
    }
}

/// Accumulator for one entity
#[derive(Default)]
struct EntityAccumulator {
    volume: f64,
    cost: f64,
}

impl EntityAccumulator {
    fn add(&mut self, volume: Option<f64>, cost: Option<f64>) {
        self.volume += volume.unwrap_or(0.0);
        self.cost += cost.unwrap_or(0.0);
    }

    fn into_row(self, key: String, threshold: f64) -> TopEntityRow {
        TopEntityRow {
            key,
            volume: round_to(self.volume, 1),
            cost: round_to(self.cost, 2),
            classification: CostClass::classify(self.cost, threshold),
        }
    }
}

/// Ranks entities by summed volume
pub struct TopNAggregator {
    config: TopNConfig,
}

impl TopNAggregator {
    pub fn new(config: TopNConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TopNConfig {
        &self.config
    }

    /// Aggregate every entity, ranked, without truncation
    pub fn rank_all<'a, R, I, K, V, C>(
        &self,
        records: I,
        key: K,
        volume: V,
        cost: C,
    ) -> Vec<TopEntityRow>
    where
        R: 'a + ?Sized,
        I: IntoIterator<Item = &'a R>,
        K: Fn(&R) -> &str,
        V: Fn(&R) -> Option<f64>,
        C: Fn(&R) -> Option<f64>,
    {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut groups: Vec<(String, EntityAccumulator)> = Vec::new();

        for record in records {
            let entity = key(record);
            let slot = match index.get(entity) {
                Some(&slot) => slot,
                None => {
                    index.insert(entity.to_string(), groups.len());
                    groups.push((entity.to_string(), EntityAccumulator::default()));
                    groups.len() - 1
                }
            };
            groups[slot].1.add(volume(record), cost(record));
        }

        let threshold = self.config.cost_threshold;
        let mut rows: Vec<TopEntityRow> = groups
            .into_iter()
            .map(|(entity, acc)| acc.into_row(entity, threshold))
            .collect();

        // Stable: equal volumes keep first-seen order.
        rows.sort_by(|a, b| b.volume.total_cmp(&a.volume));

        rows
    }

    /// Aggregate and keep the top `n` entities
    pub fn aggregate<'a, R, I, K, V, C>(
        &self,
        records: I,
        key: K,
        volume: V,
        cost: C,
    ) -> Vec<TopEntityRow>
    where
        R: 'a + ?Sized,
        I: IntoIterator<Item = &'a R>,
        K: Fn(&R) -> &str,
        V: Fn(&R) -> Option<f64>,
        C: Fn(&R) -> Option<f64>,
    {
        let mut rows = self.rank_all(records, key, volume, cost);
        let entities = rows.len();
        rows.truncate(self.config.n);
        debug!(
            "Ranked {} entities, returning top {}",
            entities,
            rows.len()
        );
        rows
    }
}

/// Group, sum, classify, rank and truncate in one call
pub fn top_entities<'a, R, I, K, V, C>(
    records: I,
    key: K,
    volume: V,
    cost: C,
    n: usize,
    cost_threshold: f64,
) -> Result<Vec<TopEntityRow>>
where
    R: 'a + ?Sized,
    I: IntoIterator<Item = &'a R>,
    K: Fn(&R) -> &str,
    V: Fn(&R) -> Option<f64>,
    C: Fn(&R) -> Option<f64>,
{
    let config = TopNConfig::new(n, cost_threshold)?;
    Ok(TopNAggregator::new(config).aggregate(records, key, volume, cost))
}

/// Round half away from zero to `decimals` places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row {
        key: &'static str,
        volume: Option<f64>,
        cost: Option<f64>,
    }

    fn row(key: &'static str, volume: f64, cost: f64) -> Row {
        Row {
            key,
            volume: Some(volume),
            cost: Some(cost),
        }
    }

    fn top(rows: &[Row], n: usize, threshold: f64) -> Vec<TopEntityRow> {
        top_entities(rows, |r| r.key, |r| r.volume, |r| r.cost, n, threshold).unwrap()
    }

    #[test]
    fn test_truncation_and_ordering() {
        let rows = vec![
            row("A", 50.0, 0.0),
            row("B", 120.0, 0.0),
            row("C", 30.0, 0.0),
            row("D", 200.0, 0.0),
        ];
        let result = top(&rows, 3, 400.0);
        let keys: Vec<_> = result.iter().map(|r| (r.key.as_str(), r.volume)).collect();
        assert_eq!(keys, vec![("D", 200.0), ("B", 120.0), ("A", 50.0)]);
    }

    #[test]
    fn test_threshold_boundary_is_inclusive() {
        let rows = vec![row("AT", 10.0, 400.0), row("BELOW", 5.0, 399.99)];
        let result = top(&rows, 4, 400.0);
        assert_eq!(result[0].classification, CostClass::HighCost);
        assert_eq!(result[1].classification, CostClass::Efficient);
    }

    #[test]
    fn test_sums_per_key() {
        let rows = vec![
            row("AA-00-BB", 120.0, 210.0),
            row("XX-99-YY", 140.0, 210.0),
            row("AA-00-BB", 160.0, 240.0),
        ];
        let result = top(&rows, 4, 400.0);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].key, "AA-00-BB");
        assert_eq!(result[0].volume, 280.0);
        assert_eq!(result[0].cost, 450.0);
        assert_eq!(result[0].classification, CostClass::HighCost);
        assert_eq!(result[1].classification, CostClass::Efficient);
    }

    #[test]
    fn test_missing_measures_count_as_zero() {
        let rows = vec![
            Row {
                key: "A",
                volume: None,
                cost: Some(10.0),
            },
            Row {
                key: "A",
                volume: Some(5.0),
                cost: None,
            },
        ];
        let result = top(&rows, 4, 400.0);
        assert_eq!(result[0].volume, 5.0);
        assert_eq!(result[0].cost, 10.0);
    }

    #[test]
    fn test_rounding_happens_after_accumulation() {
        // Rounding each 0.04 first would total 0.0.
        let rows = vec![
            row("A", 0.04, 0.004),
            row("A", 0.04, 0.004),
            row("A", 0.04, 0.004),
        ];
        let result = top(&rows, 1, 400.0);
        assert_eq!(result[0].volume, 0.1);
        assert_eq!(result[0].cost, 0.01);
    }

    #[test]
    fn test_float_noise_is_rounded_away() {
        let rows = vec![row("A", 0.1, 0.1), row("A", 0.2, 0.2)];
        let result = top(&rows, 1, 400.0);
        assert_eq!(result[0].volume, 0.3);
        assert_eq!(result[0].cost, 0.3);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let rows = vec![
            row("first", 100.0, 0.0),
            row("second", 100.0, 0.0),
            row("third", 100.0, 0.0),
        ];
        let keys: Vec<_> = top(&rows, 4, 400.0).into_iter().map(|r| r.key).collect();
        assert_eq!(keys, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_zero_n_returns_nothing() {
        let rows = vec![row("A", 1.0, 1.0)];
        assert!(top(&rows, 0, 400.0).is_empty());
    }

    #[test]
    fn test_empty_input() {
        let rows: Vec<Row> = Vec::new();
        assert!(top(&rows, 4, 400.0).is_empty());
    }

    #[test]
    fn test_invalid_threshold_fails_fast() {
        assert!(matches!(
            TopNConfig::new(4, f64::NAN),
            Err(FrotaError::InvalidArgument(_))
        ));
        assert!(TopNConfig::new(4, -1.0).is_err());
        assert!(TopNConfig::new(4, f64::INFINITY).is_err());
        assert!(TopNConfig::new(4, 0.0).is_ok());
    }

    #[test]
    fn test_rank_all_keeps_everything() {
        let rows = vec![row("A", 1.0, 0.0), row("B", 2.0, 0.0), row("C", 3.0, 0.0)];
        let aggregator = TopNAggregator::new(TopNConfig::new(1, 400.0).unwrap());
        let all = aggregator.rank_all(&rows, |r| r.key, |r| r.volume, |r| r.cost);
        assert_eq!(all.len(), 3);
        assert_eq!(aggregator.config().n(), 1);
    }

    #[test]
    fn test_default_config() {
        let config = TopNConfig::default();
        assert_eq!(config.n(), 4);
        assert_eq!(config.cost_threshold(), 400.0);
    }

    #[test]
    fn test_deserialize_validates_threshold() {
        let config: TopNConfig =
            serde_json::from_str(r#"{"n": 2, "cost_threshold": 150.0}"#).unwrap();
        assert_eq!(config, TopNConfig::new(2, 150.0).unwrap());

        let err = serde_json::from_str::<TopNConfig>(r#"{"n": 2, "cost_threshold": -5.0}"#)
            .unwrap_err();
        assert!(err.to_string().contains("non-negative"), "{err}");

        let json = serde_json::to_string(&TopNConfig::default()).unwrap();
        assert_eq!(
            serde_json::from_str::<TopNConfig>(&json).unwrap(),
            TopNConfig::default()
        );
    }

    #[test]
    fn test_cost_class_labels() {
        assert_eq!(CostClass::HighCost.label(), "Alto custo");
        assert_eq!(CostClass::Efficient.to_string(), "EFFICIENT");
        assert_eq!(
            serde_json::to_string(&CostClass::HighCost).unwrap(),
            "\"HIGH_COST\""
        );
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.25, 1), 1.3);
        assert_eq!(round_to(2.0 / 3.0, 2), 0.67);
        assert_eq!(round_to(-1.5, 0), -2.0);
    }
}
