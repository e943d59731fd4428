//! Engine configuration: validation and the resolved settings struct.

use crate::domain::error::KlmError;
use crate::domain::performance::{DEFAULT_WINDOW, HISTORY_CAPACITY};
use crate::domain::variant::VariantId;
use crate::ports::config_port::ConfigPort;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub variant: VariantId,
    pub snapshot: Option<PathBuf>,
    pub window: usize,
    pub returns: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            variant: VariantId::Original,
            snapshot: None,
            window: DEFAULT_WINDOW,
            returns: None,
        }
    }
}

pub fn validate_engine_config(config: &dyn ConfigPort) -> Result<(), KlmError> {
    validate_variant(config)?;
    validate_window(config)?;
    validate_paths(config)?;
    Ok(())
}

/// Validates and resolves `[engine]` / `[performance]` into an [`EngineConfig`].
pub fn build_engine_config(config: &dyn ConfigPort) -> Result<EngineConfig, KlmError> {
    validate_engine_config(config)?;
    let defaults = EngineConfig::default();

    let variant = match non_empty(config, "engine", "variant") {
        Some(name) => name.parse()?,
        None => defaults.variant,
    };

    Ok(EngineConfig {
        variant,
        snapshot: non_empty(config, "engine", "snapshot").map(PathBuf::from),
        window: config.get_int("performance", "window", DEFAULT_WINDOW as i64) as usize,
        returns: non_empty(config, "performance", "returns").map(PathBuf::from),
    })
}

fn validate_variant(config: &dyn ConfigPort) -> Result<(), KlmError> {
    let Some(name) = non_empty(config, "engine", "variant") else {
        return Ok(());
    };
    name.parse::<VariantId>()
        .map(|_| ())
        .map_err(|_| KlmError::ConfigInvalid {
            section: "engine".to_string(),
            key: "variant".to_string(),
            reason: format!("unknown variant {:?}", name),
        })
}

fn validate_window(config: &dyn ConfigPort) -> Result<(), KlmError> {
    let raw = non_empty(config, "performance", "window");
    if raw.is_some_and(|r| r.parse::<i64>().is_err()) {
        return Err(KlmError::ConfigInvalid {
            section: "performance".to_string(),
            key: "window".to_string(),
            reason: "window must be an integer".to_string(),
        });
    }
    let window = config.get_int("performance", "window", DEFAULT_WINDOW as i64);
    if window < 1 || window > HISTORY_CAPACITY as i64 {
        return Err(KlmError::ConfigInvalid {
            section: "performance".to_string(),
            key: "window".to_string(),
            reason: format!("window must be between 1 and {}", HISTORY_CAPACITY),
        });
    }
    Ok(())
}

fn validate_paths(config: &dyn ConfigPort) -> Result<(), KlmError> {
    for (section, key) in [("engine", "snapshot"), ("performance", "returns")] {
        let value = config.get_string(section, key);
        if value.is_some_and(|v| v.trim().is_empty()) {
            return Err(KlmError::ConfigInvalid {
                section: section.to_string(),
                key: key.to_string(),
                reason: "path must not be empty".to_string(),
            });
        }
    }
    Ok(())
}

fn non_empty(config: &dyn ConfigPort, section: &str, key: &str) -> Option<String> {
    config
        .get_string(section, key)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
