//! Parsed per-point output records and the run-wide shape signature.

use lut_common::{CoordValues, OutputAxis};

use crate::solver::ParseError;

/// The parsed numeric result for one grid point.
///
/// Holds one or more output axes (e.g. wavelength plus the named flux
/// channels) and a dense row-major value buffer over those axes. All records
/// in one run must share an identical axis/shape signature; the assembler
/// enforces this against the first successful record.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputRecord {
    axes: Vec<OutputAxis>,
    values: Vec<f64>,
}

impl OutputRecord {
    /// Create a record, checking that the value buffer matches the axis
    /// shape product.
    pub fn new(axes: Vec<OutputAxis>, values: Vec<f64>) -> Result<Self, ParseError> {
        let expected: usize = axes.iter().map(OutputAxis::len).product();
        if values.len() != expected {
            return Err(ParseError::Inconsistent(format!(
                "record holds {} values but output axes imply {}",
                values.len(),
                expected
            )));
        }
        Ok(Self { axes, values })
    }

    /// Build a record with a single named channel axis (scalar outputs).
    pub fn channels(
        axis_label: impl Into<String>,
        names: Vec<String>,
        values: Vec<f64>,
    ) -> Result<Self, ParseError> {
        Self::new(
            vec![OutputAxis::new(axis_label, CoordValues::Named(names))],
            values,
        )
    }

    pub fn axes(&self) -> &[OutputAxis] {
        &self.axes
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Total number of values in one record.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// The output axis layout shared by every record in a run.
///
/// Established from the first successfully parsed record; later records are
/// checked against it by label and length. Coordinate values (e.g. the
/// wavelength grid) are taken from the establishing record.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeSignature {
    axes: Vec<OutputAxis>,
}

impl ShapeSignature {
    /// Capture the signature of a record.
    pub fn of(record: &OutputRecord) -> Self {
        Self {
            axes: record.axes().to_vec(),
        }
    }

    pub fn axes(&self) -> &[OutputAxis] {
        &self.axes
    }

    /// Values per record under this signature.
    pub fn record_len(&self) -> usize {
        self.axes.iter().map(OutputAxis::len).product()
    }

    /// Check a later record against this signature.
    pub fn check(&self, record: &OutputRecord) -> Result<(), String> {
        if record.axes().len() != self.axes.len() {
            return Err(format!(
                "record has {} output axes, signature has {}",
                record.axes().len(),
                self.axes.len()
            ));
        }

        for (got, want) in record.axes().iter().zip(&self.axes) {
            if got.label != want.label {
                return Err(format!(
                    "output axis '{}' where signature expects '{}'",
                    got.label, want.label
                ));
            }
            if got.len() != want.len() {
                return Err(format!(
                    "output axis '{}' has length {}, signature has {}",
                    got.label,
                    got.len(),
                    want.len()
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spectral_record(n: usize) -> OutputRecord {
        let wl: Vec<f64> = (0..n).map(|i| 0.2 + 0.02 * i as f64).collect();
        OutputRecord::new(
            vec![
                OutputAxis::new("wavelength", CoordValues::Numeric(wl)),
                OutputAxis::new(
                    "flux",
                    CoordValues::Named(vec!["topdn".into(), "botdn".into()]),
                ),
            ],
            vec![0.0; n * 2],
        )
        .unwrap()
    }

    #[test]
    fn test_record_rejects_bad_length() {
        let result = OutputRecord::channels(
            "flux",
            vec!["topdn".into(), "botdn".into()],
            vec![1.0],
        );
        assert!(matches!(result, Err(ParseError::Inconsistent(_))));
    }

    #[test]
    fn test_signature_accepts_matching_record() {
        let sig = ShapeSignature::of(&spectral_record(5));
        assert_eq!(sig.record_len(), 10);
        assert!(sig.check(&spectral_record(5)).is_ok());
    }

    #[test]
    fn test_signature_rejects_length_change() {
        let sig = ShapeSignature::of(&spectral_record(5));
        assert!(sig.check(&spectral_record(6)).is_err());
    }

    #[test]
    fn test_signature_rejects_label_change() {
        let sig = ShapeSignature::of(&spectral_record(5));
        let other = OutputRecord::channels(
            "radiance",
            (0..10).map(|i| format!("c{}", i)).collect(),
            vec![0.0; 10],
        )
        .unwrap();
        assert!(sig.check(&other).is_err());
    }
}
