//! Domain error types.
//!
//! The decision engine itself is total; these errors only surface at the
//! edges (configuration, snapshot and returns-feed loading, variant lookup).

/// Top-level error type for klm-engine.
#[derive(Debug, thiserror::Error)]
pub enum KlmError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("unknown variant: {name}")]
    UnknownVariant { name: String },

    #[error("snapshot error: {reason}")]
    SnapshotParse { reason: String },

    #[error("performance feed error: {reason}")]
    PerformanceFeed { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&KlmError> for std::process::ExitCode {
    fn from(err: &KlmError) -> Self {
        let code: u8 = match err {
            KlmError::Io(_) => 1,
            KlmError::ConfigParse { .. }
            | KlmError::ConfigMissing { .. }
            | KlmError::ConfigInvalid { .. } => 2,
            KlmError::UnknownVariant { .. } => 3,
            KlmError::SnapshotParse { .. } | KlmError::PerformanceFeed { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
