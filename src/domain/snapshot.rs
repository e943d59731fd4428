//! Indicator snapshot: the read-only input to every variant.
//!
//! A snapshot maps each tracked symbol to a record of optional indicator
//! values. Absent symbols and absent fields are both legal; lookups return
//! `None` and each chain stage decides what "not present" means for it.

use chrono::NaiveDate;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::domain::selection::Candidate;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SymbolIndicators {
    pub rsi_10: Option<f64>,
    pub rsi_11: Option<f64>,
    pub rsi_20: Option<f64>,
    pub rsi_21: Option<f64>,
    pub ma_200: Option<f64>,
    pub current_price: Option<f64>,
    pub stdev_return_6: Option<f64>,
    pub moving_average_return_20: Option<f64>,
}

/// Names a single field of [`SymbolIndicators`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorField {
    Rsi10,
    Rsi11,
    Rsi20,
    Rsi21,
    Ma200,
    CurrentPrice,
    StdevReturn6,
    MovingAverageReturn20,
}

impl IndicatorField {
    pub const ALL: [IndicatorField; 8] = [
        IndicatorField::Rsi10,
        IndicatorField::Rsi11,
        IndicatorField::Rsi20,
        IndicatorField::Rsi21,
        IndicatorField::Ma200,
        IndicatorField::CurrentPrice,
        IndicatorField::StdevReturn6,
        IndicatorField::MovingAverageReturn20,
    ];

    /// Column / key name used by file adapters.
    pub fn key(&self) -> &'static str {
        match self {
            IndicatorField::Rsi10 => "rsi_10",
            IndicatorField::Rsi11 => "rsi_11",
            IndicatorField::Rsi20 => "rsi_20",
            IndicatorField::Rsi21 => "rsi_21",
            IndicatorField::Ma200 => "ma_200",
            IndicatorField::CurrentPrice => "current_price",
            IndicatorField::StdevReturn6 => "stdev_return_6",
            IndicatorField::MovingAverageReturn20 => "moving_average_return_20",
        }
    }
}

impl fmt::Display for IndicatorField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorField::Rsi10 => write!(f, "RSI(10)"),
            IndicatorField::Rsi11 => write!(f, "RSI(11)"),
            IndicatorField::Rsi20 => write!(f, "RSI(20)"),
            IndicatorField::Rsi21 => write!(f, "RSI(21)"),
            IndicatorField::Ma200 => write!(f, "MA(200)"),
            IndicatorField::CurrentPrice => write!(f, "PRICE"),
            IndicatorField::StdevReturn6 => write!(f, "STDEV_RETURN(6)"),
            IndicatorField::MovingAverageReturn20 => write!(f, "MA_RETURN(20)"),
        }
    }
}

impl FromStr for IndicatorField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        IndicatorField::ALL
            .into_iter()
            .find(|f| f.key() == key)
            .ok_or_else(|| format!("unknown indicator field: {s}"))
    }
}

impl SymbolIndicators {
    /// Returns the field value, treating NaN as absent.
    pub fn get(&self, field: IndicatorField) -> Option<f64> {
        let value = match field {
            IndicatorField::Rsi10 => self.rsi_10,
            IndicatorField::Rsi11 => self.rsi_11,
            IndicatorField::Rsi20 => self.rsi_20,
            IndicatorField::Rsi21 => self.rsi_21,
            IndicatorField::Ma200 => self.ma_200,
            IndicatorField::CurrentPrice => self.current_price,
            IndicatorField::StdevReturn6 => self.stdev_return_6,
            IndicatorField::MovingAverageReturn20 => self.moving_average_return_20,
        };
        value.filter(|v| !v.is_nan())
    }

    pub fn set(&mut self, field: IndicatorField, value: Option<f64>) {
        let slot = match field {
            IndicatorField::Rsi10 => &mut self.rsi_10,
            IndicatorField::Rsi11 => &mut self.rsi_11,
            IndicatorField::Rsi20 => &mut self.rsi_20,
            IndicatorField::Rsi21 => &mut self.rsi_21,
            IndicatorField::Ma200 => &mut self.ma_200,
            IndicatorField::CurrentPrice => &mut self.current_price,
            IndicatorField::StdevReturn6 => &mut self.stdev_return_6,
            IndicatorField::MovingAverageReturn20 => &mut self.moving_average_return_20,
        };
        *slot = value;
    }

    pub fn with(mut self, field: IndicatorField, value: f64) -> Self {
        self.set(field, Some(value));
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndicatorSnapshot {
    pub as_of: Option<NaiveDate>,
    symbols: HashMap<String, SymbolIndicators>,
}

impl IndicatorSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, symbol: &str, indicators: SymbolIndicators) {
        self.symbols.insert(symbol.to_uppercase(), indicators);
    }

    /// Builder-style helper that sets a single field, creating the symbol entry if needed.
    pub fn with(mut self, symbol: &str, field: IndicatorField, value: f64) -> Self {
        self.symbols
            .entry(symbol.to_uppercase())
            .or_default()
            .set(field, Some(value));
        self
    }

    pub fn with_as_of(mut self, date: NaiveDate) -> Self {
        self.as_of = Some(date);
        self
    }

    /// Case-insensitive: keys are stored upper-cased.
    pub fn symbol(&self, symbol: &str) -> Option<&SymbolIndicators> {
        self.symbols
            .get(symbol)
            .or_else(|| self.symbols.get(&symbol.to_uppercase()))
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.symbol(symbol).is_some()
    }

    pub fn get(&self, symbol: &str, field: IndicatorField) -> Option<f64> {
        self.symbol(symbol).and_then(|s| s.get(field))
    }

    pub fn rsi(&self, symbol: &str, window: usize) -> Option<f64> {
        let field = match window {
            10 => IndicatorField::Rsi10,
            11 => IndicatorField::Rsi11,
            20 => IndicatorField::Rsi20,
            21 => IndicatorField::Rsi21,
            _ => return None,
        };
        self.get(symbol, field)
    }

    /// Builds candidates for `symbols` that carry `field`; symbols without it are dropped.
    pub fn candidates(&self, symbols: &[&str], field: IndicatorField) -> Vec<Candidate> {
        symbols
            .iter()
            .filter_map(|s| self.get(s, field).map(|v| Candidate::new(s, v)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbols in sorted order.
    pub fn symbols(&self) -> Vec<&str> {
        let mut out: Vec<&str> = self.symbols.keys().map(String::as_str).collect();
        out.sort_unstable();
        out
    }
}
