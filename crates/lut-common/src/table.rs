//! The assembled lookup table and its coordinate metadata.

use serde::{Deserialize, Serialize};

use crate::error::{LutError, LutResult};

/// Coordinate values along one table axis.
///
/// Grid axes and spectral axes carry numbers; output channel axes carry the
/// channel names (e.g. `["topdn", "topup", ...]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CoordValues {
    Numeric(Vec<f64>),
    Named(Vec<String>),
}

impl CoordValues {
    /// Number of coordinate values.
    pub fn len(&self) -> usize {
        match self {
            CoordValues::Numeric(v) => v.len(),
            CoordValues::Named(v) => v.len(),
        }
    }

    /// Check if the coordinate sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One output axis contributed by the solver response (e.g. wavelength, or
/// the named flux channels).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputAxis {
    pub label: String,
    pub coords: CoordValues,
}

impl OutputAxis {
    pub fn new(label: impl Into<String>, coords: CoordValues) -> Self {
        Self {
            label: label.into(),
            coords,
        }
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }
}

/// The final labeled N-D lookup table.
///
/// Immutable after assembly: grid axes precede output axes in `labels`,
/// `coords` and `shape`, and `values` is dense row-major with
/// `values.len() == shape.iter().product()`.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupTable {
    labels: Vec<String>,
    coords: Vec<CoordValues>,
    shape: Vec<usize>,
    values: Vec<f64>,
}

impl LookupTable {
    /// Package labels, coordinates and the dense value buffer as a table.
    ///
    /// Enforces `shape[j] == coords[j].len()` for every axis and that the
    /// buffer length equals the shape product.
    pub fn new(
        labels: Vec<String>,
        coords: Vec<CoordValues>,
        values: Vec<f64>,
    ) -> LutResult<Self> {
        if labels.len() != coords.len() {
            return Err(LutError::ShapeMismatch {
                label: "<labels>".to_string(),
                coords: coords.len(),
                dim: labels.len(),
            });
        }

        let shape: Vec<usize> = coords.iter().map(CoordValues::len).collect();
        let expected: usize = shape.iter().product();
        if values.len() != expected {
            return Err(LutError::ValueLengthMismatch {
                values: values.len(),
                expected,
            });
        }

        Ok(Self {
            labels,
            coords,
            shape,
            values,
        })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn coords(&self) -> &[CoordValues] {
        &self.coords
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of table dimensions.
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Total number of values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the table holds no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Read one value by full index tuple.
    pub fn get(&self, index: &[usize]) -> LutResult<f64> {
        if index.len() != self.shape.len()
            || index.iter().zip(&self.shape).any(|(&i, &n)| i >= n)
        {
            return Err(LutError::IndexOutOfBounds {
                index: index.to_vec(),
                shape: self.shape.clone(),
            });
        }

        let mut flat = 0;
        for (&i, &n) in index.iter().zip(&self.shape) {
            flat = flat * n + i;
        }
        Ok(self.values[flat])
    }

    /// Count of missing-value (NaN) slots.
    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_nan()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_table() -> LookupTable {
        LookupTable::new(
            vec!["a".into(), "flux".into()],
            vec![
                CoordValues::Numeric(vec![1.0, 2.0]),
                CoordValues::Named(vec!["up".into(), "down".into(), "dir".into()]),
            ],
            (0..6).map(|i| i as f64).collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_shape_follows_coords() {
        let table = small_table();
        assert_eq!(table.shape(), &[2, 3]);
        assert_eq!(table.ndim(), 2);
        assert_eq!(table.len(), 6);
    }

    #[test]
    fn test_value_length_enforced() {
        let result = LookupTable::new(
            vec!["a".into()],
            vec![CoordValues::Numeric(vec![1.0, 2.0])],
            vec![0.0],
        );
        assert!(matches!(result, Err(LutError::ValueLengthMismatch { .. })));
    }

    #[test]
    fn test_get_row_major() {
        let table = small_table();
        assert_eq!(table.get(&[0, 0]).unwrap(), 0.0);
        assert_eq!(table.get(&[0, 2]).unwrap(), 2.0);
        assert_eq!(table.get(&[1, 0]).unwrap(), 3.0);
        assert!(table.get(&[2, 0]).is_err());
        assert!(table.get(&[0]).is_err());
    }

    #[test]
    fn test_missing_count() {
        let table = LookupTable::new(
            vec!["a".into()],
            vec![CoordValues::Numeric(vec![1.0, 2.0, 3.0])],
            vec![1.0, f64::NAN, 3.0],
        )
        .unwrap();
        assert_eq!(table.missing_count(), 1);
    }
}
