//! Nova: UVIX as the volatility hedge and a single-stock momentum pick on tech strength.

use crate::domain::chain::{switch_with, KlmVariant, Rotator, Selection};
use crate::domain::decision::Decision;
use crate::domain::selection::SelectionOrder;
use crate::domain::snapshot::{IndicatorField, IndicatorSnapshot};

const TECH: Selection = Selection {
    candidates: &["FNGO", "TSLA", "MSFT", "AAPL", "NVDA", "GOOGL", "AMZN"],
    field: IndicatorField::Rsi11,
    order: SelectionOrder::Top,
    count: 1,
};

const ROTATOR: Rotator = Rotator::low_volatility(&["UUP", "FTLS", "KMLM"], "KMLM");

#[derive(Debug, Clone, Copy, Default)]
pub struct Nova;

impl KlmVariant for Nova {
    fn name(&self) -> &'static str {
        "Nova"
    }

    fn description(&self) -> &'static str {
        "KLM Nova: UVIX hedge, highest RSI(11) among FNGO and mega-cap equities"
    }

    fn hedge_symbol(&self) -> &'static str {
        "UVIX"
    }

    fn core_switcher(&self, snapshot: &IndicatorSnapshot) -> Decision {
        switch_with(snapshot, &TECH, |s| ROTATOR.run(s))
    }
}
