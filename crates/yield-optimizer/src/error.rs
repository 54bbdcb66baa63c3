//! Optimizer error types.

use thiserror::Error;
use yield_core::errors::CoreError;

/// Precondition failures detected before any computation runs.
///
/// Degenerate numeric input (zero ceiling, zero total score, NaN) is not an
/// error: each stage falls back to the line's current value instead.
#[derive(Debug, Error)]
pub enum OptimizeError {
    /// No margin goal was chosen.
    #[error("A margin goal (increase or decrease) must be selected before optimizing")]
    MissingMarginGoal,

    /// Parameters failed validation.
    #[error("Invalid optimization parameters: {0}")]
    InvalidParameters(String),
}

/// Failure to commit a proposal. The stored campaign is unchanged.
#[derive(Debug, Error)]
pub enum ApplyError {
    #[error("Failed to apply proposal to campaign {campaign_id}: {source}")]
    Store {
        campaign_id: String,
        #[source]
        source: CoreError,
    },
}

impl ApplyError {
    /// Whether the campaign changed after the proposal was computed.
    #[must_use]
    pub const fn is_stale(&self) -> bool {
        matches!(
            self,
            Self::Store {
                source: CoreError::StaleRevision { .. },
                ..
            }
        )
    }
}
