//! Realized-return feed port trait.

use crate::domain::error::KlmError;
use crate::domain::variant::VariantId;

/// One realized per-period return for a variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RealizedReturn {
    pub variant: VariantId,
    pub value: f64,
}

pub trait PerformanceFeedPort {
    /// Returns in the order they should be applied.
    fn load_returns(&self) -> Result<Vec<RealizedReturn>, KlmError>;
}
