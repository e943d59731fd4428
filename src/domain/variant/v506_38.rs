//! 506/38: original chain with SSO added to the L/S rotator.

use crate::domain::chain::{switch_with, KlmVariant, Rotator, Selection};
use crate::domain::decision::Decision;
use crate::domain::selection::SelectionOrder;
use crate::domain::snapshot::{IndicatorField, IndicatorSnapshot};

const TECH: Selection = Selection {
    candidates: &["TECL", "SOXL", "SVIX"],
    field: IndicatorField::Rsi10,
    order: SelectionOrder::Bottom,
    count: 1,
};

const ROTATOR: Rotator = Rotator::low_volatility(&["UUP", "FTLS", "KMLM", "SSO"], "KMLM");

#[derive(Debug, Clone, Copy, Default)]
pub struct Variant506_38;

impl KlmVariant for Variant506_38 {
    fn name(&self) -> &'static str {
        "506/38"
    }

    fn description(&self) -> &'static str {
        "KLM 506/38: lowest-RSI tech pick, low-volatility rotator over UUP/FTLS/KMLM/SSO"
    }

    fn core_switcher(&self, snapshot: &IndicatorSnapshot) -> Decision {
        switch_with(snapshot, &TECH, |s| ROTATOR.run(s))
    }
}
