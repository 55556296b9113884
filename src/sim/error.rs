//! Errors raised by the aggregation and simulation stages.

use thiserror::Error;

/// Failure of the aggregator, simulator, or sweep driver.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// No record in the trace belonged to the requested zone.
    #[error("no records found for zone \"{zone}\"")]
    EmptySeries { zone: String },

    /// A caller-supplied parameter was outside its valid range.
    #[error("invalid {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

impl SimError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
