//! Error types for the SBDART driver.
//!
//! Only configuration problems are errors here; anything that goes wrong
//! during an individual invocation is reported through the engine's
//! `SolverResponse` so it stays a per-point failure.

use thiserror::Error;

/// Result type alias using DriverError.
pub type DriverResult<T> = Result<T, DriverError>;

/// Errors constructing or configuring the SBDART solver.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("Unknown SBDART parameter: {0}")]
    UnknownParameter(String),

    #[error("Invalid value for '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    #[error("Unsupported IOUT output format: {0}")]
    UnsupportedOutputFormat(i64),

    #[error("Failed to prepare workspace root: {0}")]
    WorkspaceRoot(#[from] std::io::Error),
}
