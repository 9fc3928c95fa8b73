//! Solver parameter sets.
//!
//! A `ParameterSet` maps parameter names to scalar or array values. Sets are
//! merged functionally: overlaying axis values for one grid point produces a
//! fresh set and never mutates the baseline.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// One solver parameter value.
///
/// SBDART namelist inputs are integers, reals, comma-joined real arrays, or
/// raw Fortran tokens (logicals like `t`/`f`, repeat fills like `5*0.0`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
    Text(String),
    Floats(Vec<f64>),
}

impl ParamValue {
    /// Numeric view of scalar values.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Int(v) => Some(*v as f64),
            ParamValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Render the value as it appears on the right-hand side of a namelist
    /// assignment.
    pub fn render(&self) -> String {
        match self {
            ParamValue::Int(v) => v.to_string(),
            ParamValue::Float(v) => format_float(*v),
            ParamValue::Text(v) => v.clone(),
            ParamValue::Floats(vs) => vs
                .iter()
                .map(|v| format_float(*v))
                .collect::<Vec<_>>()
                .join(","),
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Float(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Text(v.to_string())
    }
}

impl From<Vec<f64>> for ParamValue {
    fn from(v: Vec<f64>) -> Self {
        ParamValue::Floats(v)
    }
}

/// Format a float so that whole numbers still carry a decimal point, which
/// keeps Fortran list-directed reads treating them as reals.
fn format_float(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{:.1}", v)
    } else {
        format!("{}", v)
    }
}

/// An ordered mapping from parameter name to value.
///
/// Backed by a `BTreeMap` so rendering order is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    entries: BTreeMap<String, ParamValue>,
}

impl ParameterSet {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a parameter by name.
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entries.get(name)
    }

    /// Check whether a parameter is present.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of parameters in the set.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over (name, value) pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Return a copy of this set with one parameter set or replaced.
    pub fn with(&self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        let mut entries = self.entries.clone();
        entries.insert(name.into(), value.into());
        Self { entries }
    }

    /// Return a copy of this set with every entry of `overrides` overlaid.
    pub fn merged(&self, overrides: &ParameterSet) -> Self {
        let mut entries = self.entries.clone();
        for (name, value) in &overrides.entries {
            entries.insert(name.clone(), value.clone());
        }
        Self { entries }
    }
}

impl FromIterator<(String, ParamValue)> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = (String, ParamValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
