//! Error types for artifact persistence.

use lut_common::LutError;
use thiserror::Error;

/// Result type alias using StoreError.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors reading or writing a persisted lookup table.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not a lookup-table artifact (bad magic)")]
    BadMagic,

    #[error("Unsupported artifact version: {0}")]
    UnsupportedVersion(u32),

    #[error("Invalid artifact header: {0}")]
    Header(#[from] serde_json::Error),

    #[error("Artifact truncated: expected {expected} payload bytes, found {found}")]
    Truncated { expected: usize, found: usize },

    #[error("Artifact is inconsistent: {0}")]
    Table(#[from] LutError),
}
