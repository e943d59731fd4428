//! 1280/26: skips single-popped routing and holds FNGU whenever tech leads.

use crate::domain::chain::{kmlm_switch, prefixed, KlmVariant, Rotator, Switch};
use crate::domain::decision::Decision;
use crate::domain::snapshot::IndicatorSnapshot;

const TECH_SYMBOL: &str = "FNGU";

const ROTATOR: Rotator = Rotator::low_volatility(&["UUP", "FTLS", "KMLM"], "KMLM");

#[derive(Debug, Clone, Copy, Default)]
pub struct Variant1280_26;

impl KlmVariant for Variant1280_26 {
    fn name(&self) -> &'static str {
        "1280/26"
    }

    fn description(&self) -> &'static str {
        "KLM 1280/26: no single-popped stage, FNGU on tech strength, low-volatility rotator"
    }

    fn uses_single_popped(&self) -> bool {
        false
    }

    fn core_switcher(&self, snapshot: &IndicatorSnapshot) -> Decision {
        match kmlm_switch(snapshot) {
            Switch::Tech(context) => {
                Decision::buy(TECH_SYMBOL, format!("{}; tech pick {}", context, TECH_SYMBOL))
            }
            Switch::NonTech(context) => prefixed(ROTATOR.run(snapshot), &context),
        }
    }
}
