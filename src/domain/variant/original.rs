//! The original KLM strategy: the baseline the numbered variants tweak.

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

const ROTATOR: Rotator = Rotator::low_volatility(&["UUP", "FTLS", "KMLM"], "KMLM");

#[derive(Debug, Clone, Copy, Default)]
pub struct Original;

impl KlmVariant for Original {
    fn name(&self) -> &'static str {
        "Original"
    }

    fn description(&self) -> &'static str {
        "Original KLM: LABU pop check, lowest-RSI tech pick, low-volatility L/S rotator"
    }

    fn includes_labu(&self) -> bool {
        true
    }

    fn core_switcher(&self, snapshot: &IndicatorSnapshot) -> Decision {
        switch_with(snapshot, &TECH, |s| ROTATOR.run(s))
    }
}
