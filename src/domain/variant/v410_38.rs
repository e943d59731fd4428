//! 410/38: two-way equal-weight tech allocation, contrarian SQQQ/TLT rotator.

use crate::domain::chain::{switch_with, KlmVariant, Rotator, Selection};
use crate::domain::decision::Decision;
use crate::domain::selection::SelectionOrder;
use crate::domain::snapshot::{IndicatorField, IndicatorSnapshot};

const TECH: Selection = Selection {
    candidates: &["TECL", "SOXL", "SVIX"],
    field: IndicatorField::Rsi10,
    order: SelectionOrder::Bottom,
    count: 2,
};

const ROTATOR: Rotator = Rotator::contrarian(&["SQQQ", "TLT"], "TLT");

#[derive(Debug, Clone, Copy, Default)]
pub struct Variant410_38;

impl KlmVariant for Variant410_38 {
    fn name(&self) -> &'static str {
        "410/38"
    }

    fn description(&self) -> &'static str {
        "KLM 410/38: equal-weight two lowest-RSI tech picks, highest-RSI SQQQ/TLT rotator"
    }

    fn core_switcher(&self, snapshot: &IndicatorSnapshot) -> Decision {
        switch_with(snapshot, &TECH, |s| ROTATOR.run(s))
    }
}
