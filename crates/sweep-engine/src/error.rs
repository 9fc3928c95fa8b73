//! Error types for the sweep engine.
//!
//! The taxonomy separates fatal conditions (configuration problems, zero
//! usable results, cancellation) from per-point failures, which are recorded
//! in the failure log and surfaced as missing-value slots in the table.

use lut_common::LutError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using SweepError.
pub type SweepResult<T> = Result<T, SweepError>;

/// Fatal sweep errors. Per-point failures are *not* represented here; they
/// are absorbed into [`PointFailure`] entries instead.
#[derive(Debug, Error)]
pub enum SweepError {
    /// Invalid axis list, duplicate labels, or unknown parameter keys.
    /// Raised before any invocation is attempted.
    #[error("Invalid sweep configuration: {0}")]
    Configuration(String),

    /// Zero grid points succeeded, or no output shape could be established.
    #[error("Assembly failed: {0}")]
    Assembly(String),

    /// Cooperative shutdown was requested; partial results were discarded.
    #[error("Sweep cancelled before completion")]
    Cancelled,
}

impl From<LutError> for SweepError {
    fn from(err: LutError) -> Self {
        SweepError::Configuration(err.to_string())
    }
}

/// Why one grid point produced no value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FailureReason {
    /// External-process nonzero exit, timeout, or workspace I/O failure.
    Invocation { kind: String, detail: String },
    /// Solver output could not be decoded.
    Parse { detail: String },
    /// Decoded record did not match the established shape signature.
    ShapeMismatch { detail: String },
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureReason::Invocation { kind, detail } => {
                write!(f, "invocation failed ({}): {}", kind, detail)
            }
            FailureReason::Parse { detail } => write!(f, "parse failed: {}", detail),
            FailureReason::ShapeMismatch { detail } => {
                write!(f, "shape mismatch: {}", detail)
            }
        }
    }
}

/// One failed grid point: its index tuple plus the reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointFailure {
    pub index: Vec<usize>,
    pub reason: FailureReason,
}
