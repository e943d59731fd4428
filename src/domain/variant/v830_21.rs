//! 830/21: the bond check replaces both the BSC sub-strategy and the L/S rotator.

use crate::domain::chain::{bond_check, switch_with, KlmVariant, Selection};
use crate::domain::decision::Decision;
use crate::domain::selection::SelectionOrder;
use crate::domain::snapshot::{IndicatorField, IndicatorSnapshot};

const TECH: Selection = Selection {
    candidates: &["TECL", "SOXL", "SVIX"],
    field: IndicatorField::Rsi10,
    order: SelectionOrder::Bottom,
    count: 1,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct Variant830_21;

impl KlmVariant for Variant830_21 {
    fn name(&self) -> &'static str {
        "830/21"
    }

    fn description(&self) -> &'static str {
        "KLM 830/21: BND bond check on popped volatility and in the non-tech branch"
    }

    fn bsc_strategy(&self, snapshot: &IndicatorSnapshot) -> Decision {
        bond_check(snapshot)
    }

    fn core_switcher(&self, snapshot: &IndicatorSnapshot) -> Decision {
        switch_with(snapshot, &TECH, bond_check)
    }
}
