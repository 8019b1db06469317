//! Importance weights attached to contributing factors.
//!
//! Without a trained model every factor gets the same flat weight. A
//! calibrated source can be swapped in without touching factor selection
//! or fusion.

use std::collections::BTreeMap;

use crate::scoring::ItemId;

/// Flat weight used when no calibrated source is configured.
pub const DEFAULT_FLAT_IMPORTANCE: f64 = 0.1;

/// Source of the per-item weight reported on a contributing factor.
pub trait FeatureImportance: Send + Sync {
    fn importance(&self, item: ItemId) -> f64;
}

/// The same weight for every item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatImportance(pub f64);

impl Default for FlatImportance {
    fn default() -> Self {
        Self(DEFAULT_FLAT_IMPORTANCE)
    }
}

impl FeatureImportance for FlatImportance {
    fn importance(&self, _item: ItemId) -> f64 {
        self.0
    }
}

/// Per-item weights, e.g. feature importances exported from a trained
/// classifier. Unmapped items fall back to a flat weight.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibratedImportance {
    weights: BTreeMap<ItemId, f64>,
    fallback: f64,
}

impl CalibratedImportance {
    pub fn new(weights: BTreeMap<ItemId, f64>) -> Self {
        Self {
            weights,
            fallback: DEFAULT_FLAT_IMPORTANCE,
        }
    }

    pub fn with_fallback(mut self, fallback: f64) -> Self {
        self.fallback = fallback;
        self
    }
}

impl FeatureImportance for CalibratedImportance {
    fn importance(&self, item: ItemId) -> f64 {
        self.weights.get(&item).copied().unwrap_or(self.fallback)
    }
}
