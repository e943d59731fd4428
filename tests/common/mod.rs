#![allow(dead_code)]

pub use klm_engine::domain::decision::{Action, Decision, Target};
pub use klm_engine::domain::snapshot::{IndicatorField, IndicatorSnapshot};
pub use klm_engine::domain::variant::{Variant, VariantId};

/// Snapshot with RSI(10) set for each `(symbol, value)` pair.
pub fn rsi10(pairs: &[(&str, f64)]) -> IndicatorSnapshot {
    pairs.iter().fold(IndicatorSnapshot::new(), |snap, &(s, v)| {
        snap.with(s, IndicatorField::Rsi10, v)
    })
}

/// Quiet market: nothing overbought, nothing popped, nothing oversold.
pub fn quiet_market() -> IndicatorSnapshot {
    rsi10(&[
        ("QQQE", 55.0),
        ("VTV", 52.0),
        ("VOX", 50.0),
        ("VOOG", 56.0),
        ("VOOV", 51.0),
        ("XLP", 48.0),
        ("TQQQ", 58.0),
        ("XLY", 54.0),
        ("FAS", 49.0),
        ("SPY", 53.0),
        ("SOXL", 47.0),
        ("SPXL", 53.0),
        ("LABU", 45.0),
    ])
    .with("UVXY", IndicatorField::Rsi21, 40.0)
    .with("UVIX", IndicatorField::Rsi21, 40.0)
    .with("SPY", IndicatorField::Rsi21, 52.0)
}

/// Quiet market where XLK leads KMLM, with full tech and rotator data.
pub fn tech_market() -> IndicatorSnapshot {
    quiet_market()
        .with("XLK", IndicatorField::Rsi10, 62.0)
        .with("KMLM", IndicatorField::Rsi10, 45.0)
        .with("TECL", IndicatorField::Rsi10, 60.0)
        .with("SVIX", IndicatorField::Rsi10, 52.0)
        .with("FNGO", IndicatorField::Rsi11, 58.0)
        .with("NVDA", IndicatorField::Rsi11, 66.0)
        .with("AAPL", IndicatorField::Rsi11, 49.0)
}

/// Quiet market where KMLM leads XLK, with volatility, RSI and bond data.
pub fn defensive_market() -> IndicatorSnapshot {
    quiet_market()
        .with("XLK", IndicatorField::Rsi10, 41.0)
        .with("KMLM", IndicatorField::Rsi10, 57.0)
        .with("UUP", IndicatorField::StdevReturn6, 0.42)
        .with("FTLS", IndicatorField::StdevReturn6, 0.61)
        .with("KMLM", IndicatorField::StdevReturn6, 0.88)
        .with("SSO", IndicatorField::StdevReturn6, 1.75)
        .with("SQQQ", IndicatorField::Rsi10, 58.0)
        .with("TLT", IndicatorField::Rsi10, 44.0)
        .with("LABD", IndicatorField::Rsi10, 50.0)
        .with("TZA", IndicatorField::Rsi10, 61.0)
        .with("BND", IndicatorField::MovingAverageReturn20, -0.001)
}

pub fn symbol(d: &Decision) -> &str {
    d.target.as_symbol().unwrap_or("<allocation>")
}
