//! Variant registry and the long-lived `Variant` handle.
//!
//! - `VariantId`: closed enumeration of every known variant (parse / display)
//! - `Variant`: one variant instance plus its own performance history
//!
//! Each concrete variant lives in its own module and implements
//! [`KlmVariant`]; `VariantId::strategy` dispatches to it.

pub mod nova;
pub mod original;
pub mod v1200_28;
pub mod v1280_26;
pub mod v410_38;
pub mod v506_38;
pub mod v520_22;
pub mod v830_21;

use std::fmt;
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard};

use crate::domain::chain::KlmVariant;
use crate::domain::decision::Decision;
use crate::domain::error::KlmError;
use crate::domain::performance::PerformanceHistory;
use crate::domain::snapshot::IndicatorSnapshot;

use nova::Nova;
use original::Original;
use v1200_28::Variant1200_28;
use v1280_26::Variant1280_26;
use v410_38::Variant410_38;
use v506_38::Variant506_38;
use v520_22::Variant520_22;
use v830_21::Variant830_21;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VariantId {
    V506_38,
    V410_38,
    V520_22,
    V830_21,
    V1200_28,
    V1280_26,
    Nova,
    Original,
}

impl VariantId {
    pub const ALL: [VariantId; 8] = [
        VariantId::V506_38,
        VariantId::V410_38,
        VariantId::V520_22,
        VariantId::V830_21,
        VariantId::V1200_28,
        VariantId::V1280_26,
        VariantId::Nova,
        VariantId::Original,
    ];

    pub fn strategy(&self) -> &'static dyn KlmVariant {
        match self {
            VariantId::V506_38 => &Variant506_38,
            VariantId::V410_38 => &Variant410_38,
            VariantId::V520_22 => &Variant520_22,
            VariantId::V830_21 => &Variant830_21,
            VariantId::V1200_28 => &Variant1200_28,
            VariantId::V1280_26 => &Variant1280_26,
            VariantId::Nova => &Nova,
            VariantId::Original => &Original,
        }
    }

    pub fn name(&self) -> &'static str {
        self.strategy().name()
    }

    pub fn description(&self) -> &'static str {
        self.strategy().description()
    }
}

impl fmt::Display for VariantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for VariantId {
    type Err = KlmError;

    /// Accepts the display name case-insensitively, with `_` or `-` in place of `/`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace(['_', '-'], "/");
        VariantId::ALL
            .into_iter()
            .find(|id| id.name().to_lowercase() == wanted)
            .ok_or_else(|| KlmError::UnknownVariant {
                name: s.trim().to_string(),
            })
    }
}

/// A variant instance: pure evaluation plus a mutex-guarded performance history.
#[derive(Debug)]
pub struct Variant {
    id: VariantId,
    history: Mutex<PerformanceHistory>,
}

impl Variant {
    pub fn new(id: VariantId) -> Self {
        Variant {
            id,
            history: Mutex::new(PerformanceHistory::new()),
        }
    }

    pub fn id(&self) -> VariantId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.id.name()
    }

    pub fn description(&self) -> &'static str {
        self.id.description()
    }

    /// Evaluates the snapshot. Never touches the performance history.
    pub fn evaluate(&self, snapshot: &IndicatorSnapshot) -> Decision {
        let decision = self.id.strategy().evaluate(snapshot);
        tracing::debug!(variant = self.name(), decision = %decision, "evaluated");
        decision
    }

    pub fn update_performance(&self, realized_return: f64) {
        self.history().push(realized_return);
    }

    pub fn performance_metric(&self, window: usize) -> f64 {
        self.history().metric(window)
    }

    pub fn history_len(&self) -> usize {
        self.history().len()
    }

    fn history(&self) -> MutexGuard<'_, PerformanceHistory> {
        // push never leaves the buffer half-updated, so a poisoned guard is still usable
        self.history.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl From<VariantId> for Variant {
    fn from(id: VariantId) -> Self {
        Variant::new(id)
    }
}
