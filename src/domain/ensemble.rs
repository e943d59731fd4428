//! All registered variants side by side.
//!
//! The ensemble evaluates every variant over one snapshot and exposes each
//! variant's rolling performance metric. Choosing between variants from
//! those metrics is left to the caller.

use std::collections::BTreeMap;

use crate::domain::decision::Decision;
use crate::domain::snapshot::IndicatorSnapshot;
use crate::domain::variant::{Variant, VariantId};

#[derive(Debug)]
pub struct Ensemble {
    variants: BTreeMap<VariantId, Variant>,
}

impl Default for Ensemble {
    fn default() -> Self {
        Self::new()
    }
}

impl Ensemble {
    /// One fresh instance of every registered variant.
    pub fn new() -> Self {
        Self::with_variants(&VariantId::ALL)
    }

    pub fn with_variants(ids: &[VariantId]) -> Self {
        Ensemble {
            variants: ids.iter().map(|&id| (id, Variant::new(id))).collect(),
        }
    }

    pub fn get(&self, id: VariantId) -> Option<&Variant> {
        self.variants.get(&id)
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Decisions in registry order.
    pub fn evaluate_all(&self, snapshot: &IndicatorSnapshot) -> Vec<(VariantId, Decision)> {
        self.variants
            .values()
            .map(|v| (v.id(), v.evaluate(snapshot)))
            .collect()
    }

    /// Records a realized return for one variant. Returns `false` if the variant is not held.
    pub fn update_performance(&self, id: VariantId, realized_return: f64) -> bool {
        match self.variants.get(&id) {
            Some(variant) => {
                variant.update_performance(realized_return);
                true
            }
            None => {
                tracing::warn!(variant = %id, "performance update for variant not in ensemble");
                false
            }
        }
    }

    /// Metrics in registry order.
    pub fn performance_metrics(&self, window: usize) -> Vec<(VariantId, f64)> {
        self.variants
            .values()
            .map(|v| (v.id(), v.performance_metric(window)))
            .collect()
    }
}
