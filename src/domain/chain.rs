//! Shared decision chain and the `KlmVariant` trait.
//!
//! Every variant runs the same short-circuiting sequence:
//!
//! 1. Overbought detection (fixed priority list, RSI(10) above threshold)
//! 2. Single-popped routing on the hedge symbol's RSI(21)
//! 3. BSC sub-strategy, or the combined pop bot (oversold RSI(10) checks)
//! 4. The variant's own core switcher, usually XLK vs KMLM falling through
//!    to an L/S rotator or the bond check
//!
//! The first stage that produces a decision ends evaluation. Missing data never
//! fails a stage: an absent symbol or field is "condition not met", and every
//! chain ends in an unconditional fallback.

use crate::domain::decision::{Decision, Target};
use crate::domain::selection::{select_bottom, select_top, Candidate, SelectionOrder};
use crate::domain::snapshot::{IndicatorField, IndicatorSnapshot};

/// RSI(21) level above which the hedge symbol counts as "popped".
pub const SINGLE_POPPED_THRESHOLD: f64 = 65.0;
/// SPY RSI(21) level separating VIXM from SPXL in the BSC sub-strategy.
pub const BSC_SPY_THRESHOLD: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdCheck {
    pub symbol: &'static str,
    pub threshold: f64,
}

/// Overbought checks in priority order; the first RSI(10) strictly above its threshold wins.
pub const OVERBOUGHT_CHECKS: [ThresholdCheck; 11] = [
    ThresholdCheck { symbol: "QQQE", threshold: 79.0 },
    ThresholdCheck { symbol: "VTV", threshold: 79.0 },
    ThresholdCheck { symbol: "VOX", threshold: 79.0 },
    ThresholdCheck { symbol: "TECL", threshold: 79.0 },
    ThresholdCheck { symbol: "VOOG", threshold: 79.0 },
    ThresholdCheck { symbol: "VOOV", threshold: 79.0 },
    ThresholdCheck { symbol: "XLP", threshold: 75.0 },
    ThresholdCheck { symbol: "TQQQ", threshold: 79.0 },
    ThresholdCheck { symbol: "XLY", threshold: 80.0 },
    ThresholdCheck { symbol: "FAS", threshold: 80.0 },
    ThresholdCheck { symbol: "SPY", threshold: 80.0 },
];

/// An oversold check: RSI(10) strictly below `threshold` buys `target`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopCheck {
    pub symbol: &'static str,
    pub threshold: f64,
    pub target: &'static str,
}

pub const POP_BOT_CHECKS: [PopCheck; 3] = [
    PopCheck { symbol: "TQQQ", threshold: 30.0, target: "TECL" },
    PopCheck { symbol: "SOXL", threshold: 30.0, target: "SOXL" },
    PopCheck { symbol: "SPXL", threshold: 30.0, target: "SPXL" },
];

pub const LABU_CHECK: PopCheck = PopCheck {
    symbol: "LABU",
    threshold: 25.0,
    target: "LABU",
};

/// A ranked pick from a fixed candidate set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    pub candidates: &'static [&'static str],
    pub field: IndicatorField,
    pub order: SelectionOrder,
    pub count: usize,
}

impl Selection {
    /// Ranks the candidates that carry `field`. `None` when none of them do.
    pub fn pick(&self, snapshot: &IndicatorSnapshot) -> Option<(Target, String)> {
        let pool = snapshot.candidates(self.candidates, self.field);
        let chosen = self.order.select(&pool, self.count);
        let target = match chosen.as_slice() {
            [] => return None,
            [only] => Target::Symbol(only.symbol.clone()),
            many => {
                let symbols: Vec<&str> = many.iter().map(|c| c.symbol.as_str()).collect();
                Target::equal_weight(&symbols)?
            }
        };
        let detail = format!(
            "{} {} {} among {}",
            self.order.label(),
            self.field,
            describe(&chosen),
            self.candidates.join(", ")
        );
        Some((target, detail))
    }
}

/// L/S rotator configuration: a selection plus the symbol used when no candidate qualifies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotator {
    pub selection: Selection,
    pub fallback: &'static str,
}

impl Rotator {
    /// Lowest `stdev_return_6` wins.
    pub const fn low_volatility(candidates: &'static [&'static str], fallback: &'static str) -> Self {
        Rotator {
            selection: Selection {
                candidates,
                field: IndicatorField::StdevReturn6,
                order: SelectionOrder::Bottom,
                count: 1,
            },
            fallback,
        }
    }

    /// Highest RSI(10) wins.
    pub const fn contrarian(candidates: &'static [&'static str], fallback: &'static str) -> Self {
        Rotator {
            selection: Selection {
                candidates,
                field: IndicatorField::Rsi10,
                order: SelectionOrder::Top,
                count: 1,
            },
            fallback,
        }
    }

    pub fn run(&self, snapshot: &IndicatorSnapshot) -> Decision {
        match self.selection.pick(snapshot) {
            Some((target, detail)) => {
                tracing::debug!(stage = "ls_rotator", %target, "rotator selected");
                Decision::buy_target(target, format!("L/S rotator: {}", detail))
            }
            None => {
                tracing::debug!(stage = "ls_rotator", fallback = self.fallback, "rotator fallback");
                Decision::buy(
                    self.fallback,
                    format!(
                        "L/S rotator: no {} for {}, fallback {}",
                        self.selection.field,
                        self.selection.candidates.join(", "),
                        self.fallback
                    ),
                )
            }
        }
    }
}

const BOND_CHECK_POSITIVE: Selection = Selection {
    candidates: &["KMLM", "SPLV"],
    field: IndicatorField::Rsi10,
    order: SelectionOrder::Bottom,
    count: 1,
};

const BOND_CHECK_NEGATIVE: Selection = Selection {
    candidates: &["TLT", "LABD", "TZA"],
    field: IndicatorField::Rsi10,
    order: SelectionOrder::Top,
    count: 1,
};

/// Bond check: BND's 20-period moving average of returns picks risk-on or defensive.
///
/// A missing BND reading counts as zero and takes the defensive branch.
/// Each branch falls back to its first listed symbol when no candidate has RSI(10).
pub fn bond_check(snapshot: &IndicatorSnapshot) -> Decision {
    let bnd = snapshot
        .get("BND", IndicatorField::MovingAverageReturn20)
        .unwrap_or(0.0);
    let (selection, side) = if bnd > 0.0 {
        (&BOND_CHECK_POSITIVE, "> 0")
    } else {
        (&BOND_CHECK_NEGATIVE, "<= 0")
    };

    tracing::debug!(stage = "bond_check", bnd, "bond check");
    let prefix = format!("Bond check: BND MA_RETURN(20) {:.4} {}", bnd, side);
    match selection.pick(snapshot) {
        Some((target, detail)) => Decision::buy_target(target, format!("{}; {}", prefix, detail)),
        None => {
            let fallback = selection.candidates[0];
            Decision::buy(
                fallback,
                format!("{}; no RSI(10) data, fallback {}", prefix, fallback),
            )
        }
    }
}

/// Outcome of comparing XLK and KMLM RSI(10).
#[derive(Debug, Clone, PartialEq)]
pub enum Switch {
    Tech(String),
    NonTech(String),
}

/// XLK RSI(10) strictly above KMLM RSI(10) selects the tech branch.
/// Either reading missing selects the non-tech branch.
pub fn kmlm_switch(snapshot: &IndicatorSnapshot) -> Switch {
    match (snapshot.rsi("XLK", 10), snapshot.rsi("KMLM", 10)) {
        (Some(xlk), Some(kmlm)) if xlk > kmlm => Switch::Tech(format!(
            "KMLM switcher: XLK RSI(10) {:.2} > KMLM RSI(10) {:.2}",
            xlk, kmlm
        )),
        (Some(xlk), Some(kmlm)) => Switch::NonTech(format!(
            "KMLM switcher: XLK RSI(10) {:.2} <= KMLM RSI(10) {:.2}",
            xlk, kmlm
        )),
        _ => Switch::NonTech("KMLM switcher: XLK/KMLM RSI(10) unavailable".to_string()),
    }
}

/// Runs the standard switcher: tech selection when XLK leads, otherwise `non_tech`.
/// An empty tech selection also falls through to `non_tech`.
pub fn switch_with<F>(snapshot: &IndicatorSnapshot, tech: &Selection, non_tech: F) -> Decision
where
    F: Fn(&IndicatorSnapshot) -> Decision,
{
    match kmlm_switch(snapshot) {
        Switch::Tech(context) => match tech.pick(snapshot) {
            Some((target, detail)) => {
                tracing::debug!(stage = "core_switcher", %target, "tech branch");
                Decision::buy_target(target, format!("{}; tech pick {}", context, detail))
            }
            None => prefixed(
                non_tech(snapshot),
                &format!("{}; no tech candidate data", context),
            ),
        },
        Switch::NonTech(context) => prefixed(non_tech(snapshot), &context),
    }
}

pub fn prefixed(mut decision: Decision, context: &str) -> Decision {
    decision.reasoning = format!("{}; {}", context, decision.reasoning);
    decision
}

fn describe(chosen: &[Candidate]) -> String {
    chosen
        .iter()
        .map(|c| format!("{} {:.2}", c.symbol, c.metric))
        .collect::<Vec<_>>()
        .join(" / ")
}

/// A concrete strategy over the shared chain.
///
/// Only [`KlmVariant::core_switcher`] is required; the other stages are shared
/// and can be tuned through the configuration hooks or overridden outright.
pub trait KlmVariant: Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Symbol bought on overbought conditions and read for single-popped routing.
    fn hedge_symbol(&self) -> &'static str {
        "UVXY"
    }

    fn uses_single_popped(&self) -> bool {
        true
    }

    fn includes_labu(&self) -> bool {
        false
    }

    fn evaluate(&self, snapshot: &IndicatorSnapshot) -> Decision {
        if let Some(decision) = self.overbought_detection(snapshot) {
            return decision;
        }
        if self.uses_single_popped() {
            self.single_popped(snapshot)
        } else {
            self.combined_pop_bot(snapshot)
        }
    }

    fn overbought_detection(&self, snapshot: &IndicatorSnapshot) -> Option<Decision> {
        let hedge = self.hedge_symbol();
        for check in &OVERBOUGHT_CHECKS {
            let Some(rsi) = snapshot.rsi(check.symbol, 10) else {
                continue;
            };
            if rsi > check.threshold {
                tracing::debug!(
                    variant = self.name(),
                    stage = "overbought",
                    symbol = check.symbol,
                    rsi,
                    "overbought trigger"
                );
                return Some(Decision::buy(
                    hedge,
                    format!(
                        "Overbought: {} RSI(10) {:.2} > {} -> {}",
                        check.symbol, rsi, check.threshold, hedge
                    ),
                ));
            }
        }
        None
    }

    fn single_popped(&self, snapshot: &IndicatorSnapshot) -> Decision {
        let hedge = self.hedge_symbol();
        match snapshot.rsi(hedge, 21) {
            Some(rsi) if rsi > SINGLE_POPPED_THRESHOLD => {
                tracing::debug!(variant = self.name(), stage = "single_popped", rsi, "popped");
                prefixed(
                    self.bsc_strategy(snapshot),
                    &format!(
                        "Single popped: {} RSI(21) {:.2} > {}",
                        hedge, rsi, SINGLE_POPPED_THRESHOLD
                    ),
                )
            }
            _ => self.combined_pop_bot(snapshot),
        }
    }

    fn bsc_strategy(&self, snapshot: &IndicatorSnapshot) -> Decision {
        match snapshot.rsi("SPY", 21) {
            Some(rsi) if rsi <= BSC_SPY_THRESHOLD => Decision::buy(
                "SPXL",
                format!("BSC: SPY RSI(21) {:.2} <= {} -> SPXL", rsi, BSC_SPY_THRESHOLD),
            ),
            Some(rsi) => Decision::buy(
                "VIXM",
                format!("BSC: SPY RSI(21) {:.2} > {} -> VIXM", rsi, BSC_SPY_THRESHOLD),
            ),
            None => Decision::buy("VIXM", "BSC: SPY RSI(21) unavailable -> VIXM"),
        }
    }

    fn combined_pop_bot(&self, snapshot: &IndicatorSnapshot) -> Decision {
        let labu = self.includes_labu().then_some(&LABU_CHECK);
        for check in POP_BOT_CHECKS.iter().chain(labu) {
            let Some(rsi) = snapshot.rsi(check.symbol, 10) else {
                continue;
            };
            if rsi < check.threshold {
                tracing::debug!(
                    variant = self.name(),
                    stage = "combined_pop_bot",
                    symbol = check.symbol,
                    rsi,
                    "oversold trigger"
                );
                return Decision::buy(
                    check.target,
                    format!(
                        "Pop bot: {} RSI(10) {:.2} < {} -> {}",
                        check.symbol, rsi, check.threshold, check.target
                    ),
                );
            }
        }
        self.core_switcher(snapshot)
    }

    fn core_switcher(&self, snapshot: &IndicatorSnapshot) -> Decision;
}
