//! Error types shared across the radlut workspace.

use thiserror::Error;

/// Result type alias using LutError.
pub type LutResult<T> = Result<T, LutError>;

/// Primary error type for lookup-table data-model operations.
#[derive(Debug, Error)]
pub enum LutError {
    // === Grid construction ===
    #[error("Duplicate axis label: {0}")]
    DuplicateAxisLabel(String),

    #[error("Axis '{0}' has no coordinate values")]
    EmptyAxis(String),

    #[error("Grid has no axes")]
    EmptyGrid,

    // === Parameter sets ===
    #[error("Unknown solver parameter: {0}")]
    UnknownParameter(String),

    #[error("Invalid parameter value for '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    // === Table assembly ===
    #[error("Table shape mismatch: axis '{label}' has {coords} coordinates but dimension length {dim}")]
    ShapeMismatch {
        label: String,
        coords: usize,
        dim: usize,
    },

    #[error("Value buffer length {values} does not match table shape product {expected}")]
    ValueLengthMismatch { values: usize, expected: usize },

    #[error("Index {index:?} out of bounds for shape {shape:?}")]
    IndexOutOfBounds { index: Vec<usize>, shape: Vec<usize> },
}
