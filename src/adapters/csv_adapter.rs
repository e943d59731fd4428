//! CSV file adapters for indicator snapshots and realized-return feeds.
//!
//! Snapshot files carry a `symbol` column plus any of the indicator field
//! columns (`rsi_10`, `stdev_return_6`, ...). Empty cells mean "absent".
//! Return feeds carry `variant,return` rows applied in file order.

use crate::domain::error::KlmError;
use crate::domain::snapshot::{IndicatorField, IndicatorSnapshot, SymbolIndicators};
use crate::domain::variant::VariantId;
use crate::ports::performance_port::{PerformanceFeedPort, RealizedReturn};
use crate::ports::snapshot_port::SnapshotPort;
use chrono::NaiveDate;
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

pub struct CsvSnapshotAdapter {
    path: PathBuf,
    as_of: Option<NaiveDate>,
}

impl CsvSnapshotAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path, as_of: None }
    }

    pub fn with_as_of(mut self, as_of: Option<NaiveDate>) -> Self {
        self.as_of = as_of;
        self
    }
}

impl SnapshotPort for CsvSnapshotAdapter {
    fn load_snapshot(&self) -> Result<IndicatorSnapshot, KlmError> {
        let content = fs::read_to_string(&self.path).map_err(|e| KlmError::SnapshotParse {
            reason: format!("failed to read {}: {}", self.path.display(), e),
        })?;
        let mut snapshot = parse_snapshot(&content)?;
        snapshot.as_of = self.as_of;
        tracing::info!(
            path = %self.path.display(),
            symbols = snapshot.len(),
            "loaded indicator snapshot"
        );
        Ok(snapshot)
    }
}

pub fn parse_snapshot(content: &str) -> Result<IndicatorSnapshot, KlmError> {
    let mut rdr = csv::Reader::from_reader(content.as_bytes());
    let headers = rdr
        .headers()
        .map_err(|e| KlmError::SnapshotParse {
            reason: format!("CSV header error: {}", e),
        })?
        .clone();

    let symbol_col = headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case("symbol"))
        .ok_or_else(|| KlmError::SnapshotParse {
            reason: "missing symbol column".into(),
        })?;

    // Unrecognised columns are ignored.
    let field_cols: Vec<(usize, IndicatorField)> = headers
        .iter()
        .enumerate()
        .filter_map(|(i, h)| h.parse::<IndicatorField>().ok().map(|f| (i, f)))
        .collect();

    let mut snapshot = IndicatorSnapshot::new();
    let mut seen = HashSet::new();

    for (row, result) in rdr.records().enumerate() {
        let record = result.map_err(|e| KlmError::SnapshotParse {
            reason: format!("CSV parse error: {}", e),
        })?;

        let symbol = record
            .get(symbol_col)
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| KlmError::SnapshotParse {
                reason: format!("row {}: missing symbol", row + 1),
            })?;

        if !seen.insert(symbol.clone()) {
            return Err(KlmError::SnapshotParse {
                reason: format!("duplicate symbol: {}", symbol),
            });
        }

        let mut indicators = SymbolIndicators::default();
        for &(col, field) in &field_cols {
            let cell = record.get(col).map(str::trim).unwrap_or("");
            if cell.is_empty() {
                continue;
            }
            let value: f64 = cell.parse().map_err(|e| KlmError::SnapshotParse {
                reason: format!("{} {}: invalid value {:?}: {}", symbol, field.key(), cell, e),
            })?;
            indicators.set(field, Some(value));
        }
        snapshot.insert(&symbol, indicators);
    }

    Ok(snapshot)
}

pub struct CsvReturnsAdapter {
    path: PathBuf,
}

impl CsvReturnsAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl PerformanceFeedPort for CsvReturnsAdapter {
    fn load_returns(&self) -> Result<Vec<RealizedReturn>, KlmError> {
        let content = fs::read_to_string(&self.path).map_err(|e| KlmError::PerformanceFeed {
            reason: format!("failed to read {}: {}", self.path.display(), e),
        })?;
        let returns = parse_returns(&content)?;
        tracing::info!(
            path = %self.path.display(),
            rows = returns.len(),
            "loaded realized returns"
        );
        Ok(returns)
    }
}

pub fn parse_returns(content: &str) -> Result<Vec<RealizedReturn>, KlmError> {
    let mut rdr = csv::Reader::from_reader(content.as_bytes());
    let headers = rdr
        .headers()
        .map_err(|e| KlmError::PerformanceFeed {
            reason: format!("CSV header error: {}", e),
        })?
        .clone();

    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
            .ok_or_else(|| KlmError::PerformanceFeed {
                reason: format!("missing {} column", name),
            })
    };
    let variant_col = column("variant")?;
    let return_col = column("return")?;

    let mut returns = Vec::new();

    for (row, result) in rdr.records().enumerate() {
        let record = result.map_err(|e| KlmError::PerformanceFeed {
            reason: format!("CSV parse error: {}", e),
        })?;

        let variant: VariantId = record.get(variant_col).unwrap_or("").parse()?;

        let cell = record.get(return_col).map(str::trim).unwrap_or("");
        let value: f64 = cell.parse().map_err(|e| KlmError::PerformanceFeed {
            reason: format!("row {}: invalid return value {:?}: {}", row + 1, cell, e),
        })?;
        // history values must be finite
        if !value.is_finite() {
            return Err(KlmError::PerformanceFeed {
                reason: format!("row {}: non-finite return value {:?}", row + 1, cell),
            });
        }

        returns.push(RealizedReturn { variant, value });
    }

    Ok(returns)
}
