//! Categorical distributions over record sets
//!
//! Counts how many records share each value of a categorical field (ticket
//! status, priority, fuel type) and attaches a display color to every
//! bucket. Only categories actually present in the input produce a bucket.
//!
//! # Examples
//!
//! ```
//! use frota_core::distribution::{BucketOrder, ColorPalette, DistributionAggregator};
//!
//! let statuses = ["OPEN", "OPEN", "CLOSED"];
//! let palette = ColorPalette::new([("OPEN", "#3b82f6"), ("PENDING", "#f59e0b")]);
//!
//! let buckets = DistributionAggregator::new(&palette)
//!     .with_order(BucketOrder::CountDescending)
//!     .aggregate(&statuses, |s| *s);
//!
//! assert_eq!(buckets.len(), 2);
//! assert_eq!((buckets[0].name.as_str(), buckets[0].value), ("OPEN", 2));
//! assert_eq!(buckets[1].color, "#a1a1aa");
//! ```

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Color given to categories missing from a palette
pub const FALLBACK_COLOR: &str = "#a1a1aa";

/// Count of records sharing one categorical value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionBucket {
    /// Category value
    pub name: String,
    /// Number of records in the category
    pub value: u64,
    /// Display color
    pub color: String,
}

/// Ordered category → color lookup
///
/// Entry order doubles as the legend order used by [`BucketOrder::Legend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorPalette {
    entries: Vec<(String, String)>,
    fallback: String,
}

impl ColorPalette {
    /// Build a palette from `(category, color)` pairs, in legend order
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            fallback: FALLBACK_COLOR.to_string(),
        }
    }

    /// Palette with no entries; every category gets the fallback color
    pub fn empty() -> Self {
        Self::new(std::iter::empty::<(String, String)>())
    }

    /// Replace the fallback color
    pub fn with_fallback(mut self, color: impl Into<String>) -> Self {
        self.fallback = color.into();
        self
    }

    /// Color for a category, or the fallback
    pub fn color_for(&self, category: &str) -> &str {
        self.entries
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, color)| color.as_str())
            .unwrap_or(&self.fallback)
    }

    /// Legend position of a category, if the palette knows it
    pub fn position(&self, category: &str) -> Option<usize> {
        self.entries.iter().position(|(name, _)| name == category)
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ticket status colors from the manager overview
    pub fn ticket_status() -> &'static ColorPalette {
        &TICKET_STATUS_PALETTE
    }

    /// Priority colors, legend order Alta, Baixa, Normal, Urgente
    pub fn ticket_priority() -> &'static ColorPalette {
        &TICKET_PRIORITY_PALETTE
    }

    pub fn fuel_type() -> &'static ColorPalette {
        &FUEL_TYPE_PALETTE
    }
}

static TICKET_STATUS_PALETTE: Lazy<ColorPalette> = Lazy::new(|| {
    ColorPalette::new([
        ("ABERTO", "#3b82f6"),
        ("EM ANÁLISE", "#f59e0b"),
        ("ATRIBUÍDO", "#64748b"),
        ("REGULARIZAÇÃO", "#ef4444"),
        ("CONCLUÍDO", "#10b981"),
    ])
});

static TICKET_PRIORITY_PALETTE: Lazy<ColorPalette> = Lazy::new(|| {
    ColorPalette::new([
        ("Alta", "#f59e0b"),
        ("Baixa", "#3b82f6"),
        ("Normal", "#2563eb"),
        ("Urgente", "#ef4444"),
    ])
});

static FUEL_TYPE_PALETTE: Lazy<ColorPalette> = Lazy::new(|| {
    ColorPalette::new([
        ("Diesel", "#2563eb"),
        ("Gasolina 95", "#f59e0b"),
        ("AdBlue", "#10b981"),
    ])
});

/// How buckets are ordered in the output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BucketOrder {
    /// Descending by count; equal counts keep first-seen order
    #[default]
    CountDescending,
    /// Palette legend order, unknown categories after it in first-seen order
    Legend,
    /// Order in which categories were first encountered
    FirstSeen,
}

/// Counts records per category
pub struct DistributionAggregator<'p> {
    palette: &'p ColorPalette,
    order: BucketOrder,
}

impl<'p> DistributionAggregator<'p> {
    /// Create an aggregator coloring buckets from `palette`
    pub fn new(palette: &'p ColorPalette) -> Self {
        Self {
            palette,
            order: BucketOrder::default(),
        }
    }

    /// Set the bucket order
    pub fn with_order(mut self, order: BucketOrder) -> Self {
        self.order = order;
        self
    }

    /// Count `records` by the category `selector` extracts
    pub fn aggregate<'a, R, I, F>(&self, records: I, selector: F) -> Vec<DistributionBucket>
    where
        R: 'a + ?Sized,
        I: IntoIterator<Item = &'a R>,
        F: Fn(&R) -> &str,
    {
        // First-seen order is tracked alongside the counts.
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut counts: Vec<(String, u64)> = Vec::new();

        for record in records {
            let category = selector(record);
            match index.get(category) {
                Some(&slot) => counts[slot].1 += 1,
                None => {
                    index.insert(category.to_string(), counts.len());
                    counts.push((category.to_string(), 1));
                }
            }
        }

        match self.order {
            BucketOrder::CountDescending => counts.sort_by(|a, b| b.1.cmp(&a.1)),
            BucketOrder::Legend => {
                counts.sort_by_key(|(name, _)| self.palette.position(name).unwrap_or(usize::MAX))
            }
            BucketOrder::FirstSeen => {}
        }

        counts
            .into_iter()
            .map(|(name, value)| DistributionBucket {
                color: self.palette.color_for(&name).to_string(),
                name,
                value,
            })
            .collect()
    }
}

/// Count `records` by `selector`, sorted by descending count
pub fn distribution_by_field<'a, R, I, F>(
    records: I,
    selector: F,
    palette: &ColorPalette,
) -> Vec<DistributionBucket>
where
    R: 'a + ?Sized,
    I: IntoIterator<Item = &'a R>,
    F: Fn(&R) -> &str,
{
    DistributionAggregator::new(palette).aggregate(records, selector)
}

/// Sum of all bucket counts
pub fn total_count(buckets: &[DistributionBucket]) -> u64 {
    buckets.iter().map(|b| b.value).sum()
}
