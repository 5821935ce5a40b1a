//! Error taxonomy for the layout core.
//!
//! Constraint violations are never errors — they come back as
//! `ValidationResult` data. Only structurally invalid configuration and
//! unrecoverable generation failure surface here.

use thiserror::Error;

/// Fatal errors from the layout pipeline.
#[derive(Debug, Clone, Error)]
pub enum LayoutError {
    /// Requested crew size falls outside the supported range.
    #[error("crew size {crew} outside supported range {min}-{max}")]
    CrewOutOfRange { crew: u32, min: u32, max: u32 },

    /// The one-shot self-heal pass could not reach a feasible layout.
    #[error("initial layout generation failed: {}", failed_rules.join(", "))]
    InfeasibleGeneration { failed_rules: Vec<String> },

    /// Score weights summing to zero or less cannot rank anything.
    #[error("score weights must sum to more than zero (got {total})")]
    InvalidWeights { total: f64 },
}
