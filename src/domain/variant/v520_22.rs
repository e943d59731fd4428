//! 520/22: inverted tech polarity (highest RSI wins), contrarian SQQQ/TLT rotator.

use crate::domain::chain::{switch_with, KlmVariant, Rotator, Selection};
use crate::domain::decision::Decision;
use crate::domain::selection::SelectionOrder;
use crate::domain::snapshot::{IndicatorField, IndicatorSnapshot};

const TECH: Selection = Selection {
    candidates: &["TECL", "SOXL", "SVIX"],
    field: IndicatorField::Rsi10,
    order: SelectionOrder::Top,
    count: 1,
};

const ROTATOR: Rotator = Rotator::contrarian(&["SQQQ", "TLT"], "TLT");

#[derive(Debug, Clone, Copy, Default)]
pub struct Variant520_22;

impl KlmVariant for Variant520_22 {
    fn name(&self) -> &'static str {
        "520/22"
    }

    fn description(&self) -> &'static str {
        "KLM 520/22: highest-RSI tech pick, highest-RSI SQQQ/TLT rotator"
    }

    fn core_switcher(&self, snapshot: &IndicatorSnapshot) -> Decision {
        switch_with(snapshot, &TECH, |s| ROTATOR.run(s))
    }
}
