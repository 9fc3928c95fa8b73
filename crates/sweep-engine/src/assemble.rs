//! Result placement and final table packaging.
//!
//! The assembler is the only consumer of completed results. It serializes
//! the "take next result and write its slot" step, so disjoint index tuples
//! make the merge race-free without any locking.

use chrono::{DateTime, Utc};
use lut_common::{CoordValues, Grid, LookupTable};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{FailureReason, PointFailure, SweepError, SweepResult};
use crate::record::{OutputRecord, ShapeSignature};
use crate::solver::{PointSolver, SolverResponse};

/// Machine-readable summary of one sweep run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Full table shape: grid dims followed by output dims.
    pub shape: Vec<usize>,
    pub attempted: usize,
    pub succeeded: usize,
    /// NaN slots in the final value buffer.
    pub missing_values: usize,
    pub failures: Vec<PointFailure>,
}

/// The terminal artifact of a successful run.
#[derive(Debug, Clone)]
pub struct SweepOutput {
    pub table: LookupTable,
    pub report: SweepReport,
}

/// Accumulates per-point results into the pre-allocated value array.
///
/// The array is allocated NaN-filled as soon as the first successful parse
/// establishes the output shape signature; every slot whose point fails is
/// simply left at the sentinel.
pub struct Assembler<'g> {
    grid: &'g Grid,
    signature: Option<ShapeSignature>,
    values: Vec<f64>,
    failures: Vec<PointFailure>,
    attempted: usize,
    succeeded: usize,
}

impl<'g> Assembler<'g> {
    pub fn new(grid: &'g Grid) -> Self {
        Self {
            grid,
            signature: None,
            values: Vec::new(),
            failures: Vec::new(),
            attempted: 0,
            succeeded: 0,
        }
    }

    /// Absorb one completed invocation: parse on success, log on failure.
    pub fn absorb(&mut self, index: Vec<usize>, response: SolverResponse, solver: &dyn PointSolver) {
        self.attempted += 1;

        match response {
            SolverResponse::Completed { payload } => match solver.parse(&payload) {
                Ok(record) => self.place(index, record),
                Err(err) => {
                    warn!(index = ?index, error = %err, "Solver output failed to parse");
                    self.failures.push(PointFailure {
                        index,
                        reason: FailureReason::Parse {
                            detail: err.to_string(),
                        },
                    });
                }
            },
            SolverResponse::Failed {
                kind,
                detail,
                workspace,
            } => {
                warn!(
                    index = ?index,
                    kind = %kind,
                    detail = %detail,
                    workspace = ?workspace,
                    "Solver invocation failed"
                );
                self.failures.push(PointFailure {
                    index,
                    reason: FailureReason::Invocation {
                        kind: kind.to_string(),
                        detail,
                    },
                });
            }
        }
    }

    /// Write one parsed record into its grid slot.
    fn place(&mut self, index: Vec<usize>, record: OutputRecord) {
        match &self.signature {
            Some(sig) => {
                if let Err(detail) = sig.check(&record) {
                    warn!(index = ?index, detail = %detail, "Record rejected by shape signature");
                    self.failures.push(PointFailure {
                        index,
                        reason: FailureReason::ShapeMismatch { detail },
                    });
                    return;
                }
            }
            None => {
                let sig = ShapeSignature::of(&record);
                debug!(
                    record_len = sig.record_len(),
                    axes = sig.axes().len(),
                    "Established output shape signature"
                );
                self.values = vec![f64::NAN; self.grid.len() * sig.record_len()];
                self.signature = Some(sig);
            }
        }

        // The signature check guarantees the record length matches the slot.
        let record_len = record.len();
        // Index tuples come from the grid's own enumeration, so this cannot
        // fail once the grid has been validated.
        let offset = match self.grid.flat_index(&index) {
            Ok(flat) => flat * record_len,
            Err(err) => {
                self.failures.push(PointFailure {
                    index,
                    reason: FailureReason::ShapeMismatch {
                        detail: err.to_string(),
                    },
                });
                return;
            }
        };

        self.values[offset..offset + record_len].copy_from_slice(record.values());
        self.succeeded += 1;
        debug!(index = ?index, "Placed result");
    }

    /// Package the table, or fail if no point produced a usable result.
    pub fn finish(
        self,
        run_id: Uuid,
        started_at: DateTime<Utc>,
    ) -> SweepResult<SweepOutput> {
        let signature = match self.signature {
            Some(sig) if self.succeeded > 0 => sig,
            _ => {
                return Err(SweepError::Assembly(format!(
                    "no grid point produced a decodable result ({} attempted, {} failures)",
                    self.attempted,
                    self.failures.len()
                )));
            }
        };

        let mut labels = self.grid.labels();
        let mut coords: Vec<CoordValues> = self
            .grid
            .coords()
            .into_iter()
            .map(CoordValues::Numeric)
            .collect();
        for axis in signature.axes() {
            labels.push(axis.label.clone());
            coords.push(axis.coords.clone());
        }

        let table = LookupTable::new(labels, coords, self.values)
            .map_err(|e| SweepError::Assembly(e.to_string()))?;

        let report = SweepReport {
            run_id,
            started_at,
            finished_at: Utc::now(),
            shape: table.shape().to_vec(),
            attempted: self.attempted,
            succeeded: self.succeeded,
            missing_values: table.missing_count(),
            failures: self.failures,
        };

        Ok(SweepOutput { table, report })
    }
}
