//! Parsers for SBDART stdout record formats.
//!
//! Two formats are supported, selected by the run's IOUT parameter:
//!
//! - IOUT=1: one record per wavelength with columns
//!   `wl ffv topdn topup topdir botdn botup botdir`. Yields a wavelength
//!   axis plus the named flux channel axis.
//! - IOUT=10: a single wavelength-integrated record
//!   `wlinf wlsup ffew topdn topup topdir botdn botup botdir`. Yields just
//!   the flux channel axis.
//!
//! Header and diagnostic lines are skipped; only rows with the expected
//! column count and all-numeric fields are treated as data.

use bytes::Bytes;
use lut_common::{CoordValues, OutputAxis};
use sweep_engine::{OutputRecord, ParseError};

use crate::error::DriverError;

/// Flux channel names, in column order.
pub const FLUX_CHANNELS: [&str; 6] = ["topdn", "topup", "topdir", "botdn", "botup", "botdir"];

/// Which stdout record format the run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// IOUT=1: per-wavelength spectral flux.
    SpectralFlux,
    /// IOUT=10: wavelength-integrated flux.
    IntegratedFlux,
}

impl OutputFormat {
    /// Map an IOUT parameter value to a supported format.
    pub fn from_iout(iout: i64) -> Result<Self, DriverError> {
        match iout {
            1 => Ok(OutputFormat::SpectralFlux),
            10 => Ok(OutputFormat::IntegratedFlux),
            other => Err(DriverError::UnsupportedOutputFormat(other)),
        }
    }

    /// Decode one stdout payload into an output record.
    pub fn parse(&self, payload: &Bytes) -> Result<OutputRecord, ParseError> {
        let text = std::str::from_utf8(payload)
            .map_err(|e| ParseError::Unrecognized(format!("non-UTF8 output: {}", e)))?;
        if text.trim().is_empty() {
            return Err(ParseError::Empty);
        }

        match self {
            OutputFormat::SpectralFlux => parse_spectral(text),
            OutputFormat::IntegratedFlux => parse_integrated(text),
        }
    }
}

/// Split one line into floats, or None if any field is non-numeric.
fn numeric_row(line: &str) -> Option<Vec<f64>> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.is_empty() {
        return None;
    }
    fields.iter().map(|f| f.parse::<f64>().ok()).collect()
}

fn parse_spectral(text: &str) -> Result<OutputRecord, ParseError> {
    let mut wavelengths = Vec::new();
    let mut values = Vec::new();

    for (lineno, line) in text.lines().enumerate() {
        let row = match numeric_row(line) {
            Some(row) => row,
            None => continue,
        };
        if row.len() != 8 {
            continue;
        }

        // Column 0 is wavelength, column 1 the filter function value; the
        // remaining six are the flux channels.
        if !row[0].is_finite() {
            return Err(ParseError::Malformed {
                line: lineno + 1,
                message: format!("non-finite wavelength {}", row[0]),
            });
        }
        wavelengths.push(row[0]);
        values.extend_from_slice(&row[2..8]);
    }

    if wavelengths.is_empty() {
        return Err(ParseError::Unrecognized(
            "no 8-column spectral flux records found".to_string(),
        ));
    }

    OutputRecord::new(
        vec![
            OutputAxis::new("wavelength", CoordValues::Numeric(wavelengths)),
            flux_axis(),
        ],
        values,
    )
}

fn parse_integrated(text: &str) -> Result<OutputRecord, ParseError> {
    for line in text.lines() {
        let row = match numeric_row(line) {
            Some(row) => row,
            None => continue,
        };
        if row.len() != 9 {
            continue;
        }

        // Columns: wlinf wlsup ffew then the six flux channels.
        return OutputRecord::new(vec![flux_axis()], row[3..9].to_vec());
    }

    Err(ParseError::Unrecognized(
        "no 9-column integrated flux record found".to_string(),
    ))
}

fn flux_axis() -> OutputAxis {
    OutputAxis::new(
        "flux",
        CoordValues::Named(FLUX_CHANNELS.iter().map(|s| s.to_string()).collect()),
    )
}
