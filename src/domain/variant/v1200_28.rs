//! 1200/28: LABU pop check, two-way tech allocation, four-symbol volatility rotator.

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

const ROTATOR: Rotator = Rotator::low_volatility(&["FTLS", "KMLM", "SSO", "UUP"], "KMLM");

#[derive(Debug, Clone, Copy, Default)]
pub struct Variant1200_28;

impl KlmVariant for Variant1200_28 {
    fn name(&self) -> &'static str {
        "1200/28"
    }

    fn description(&self) -> &'static str {
        "KLM 1200/28: LABU pop check, equal-weight two lowest-RSI tech picks, FTLS/KMLM/SSO/UUP rotator"
    }

    fn includes_labu(&self) -> bool {
        true
    }

    fn core_switcher(&self, snapshot: &IndicatorSnapshot) -> Decision {
        switch_with(snapshot, &TECH, |s| ROTATOR.run(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::decision::Target;

    #[test]
    fn tech_ties_break_alphabetically() {
        let snap = IndicatorSnapshot::new()
            .with("XLK", IndicatorField::Rsi10, 60.0)
            .with("KMLM", IndicatorField::Rsi10, 50.0)
            .with("TECL", IndicatorField::Rsi10, 40.0)
            .with("SOXL", IndicatorField::Rsi10, 40.0)
            .with("SVIX", IndicatorField::Rsi10, 40.0);
        let d = Variant1200_28.evaluate(&snap);
        assert_eq!(d.target, Target::equal_weight(&["SOXL", "SVIX"]).unwrap());
    }

    #[test]
    fn rotator_volatility_tie() {
        let snap = IndicatorSnapshot::new()
            .with("UUP", IndicatorField::StdevReturn6, 0.5)
            .with("FTLS", IndicatorField::StdevReturn6, 0.5);
        assert_eq!(Variant1200_28.evaluate(&snap).target, Target::Symbol("FTLS".into()));
    }
}
