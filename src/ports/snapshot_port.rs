//! Indicator snapshot source port trait.

use crate::domain::error::KlmError;
use crate::domain::snapshot::IndicatorSnapshot;

/// Produces the indicator snapshot a variant is evaluated against.
pub trait SnapshotPort {
    fn load_snapshot(&self) -> Result<IndicatorSnapshot, KlmError>;
}
