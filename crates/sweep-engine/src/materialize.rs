//! Parameter materialization: baseline plus one grid point's overrides.

use lut_common::{Grid, GridPoint, ParamValue, ParameterSet};

use crate::error::{SweepError, SweepResult};
use crate::solver::PointSolver;

/// Overlay one grid point's axis values on the baseline parameter set.
///
/// Pure merge: the baseline is never mutated, and the returned set is owned
/// exclusively by the invocation that consumes it. Axis values are floats;
/// when the baseline entry is an integer parameter and the axis value is
/// whole, the override stays an integer so Fortran namelist reads keep
/// working.
pub fn materialize(baseline: &ParameterSet, point: &GridPoint) -> ParameterSet {
    let overrides: ParameterSet = point
        .values
        .iter()
        .map(|(label, value)| {
            let coerced = match baseline.get(label) {
                Some(ParamValue::Int(_)) if value.fract() == 0.0 => {
                    ParamValue::Int(*value as i64)
                }
                _ => ParamValue::Float(*value),
            };
            (label.clone(), coerced)
        })
        .collect();
    baseline.merged(&overrides)
}

/// Check every axis label against the solver's recognized parameter names.
///
/// Runs before any dispatch so a misspelled axis fails the whole run instead
/// of wasting one invocation per grid point.
pub fn validate_axis_labels(grid: &Grid, solver: &dyn PointSolver) -> SweepResult<()> {
    for axis in grid.axes() {
        if !solver.recognizes(&axis.label) {
            return Err(SweepError::Configuration(format!(
                "axis label '{}' is not a recognized solver parameter",
                axis.label
            )));
        }
    }
    Ok(())
}
