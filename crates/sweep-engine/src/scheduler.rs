//! Bounded-concurrency dispatch of grid points to the solver.

use std::sync::Arc;

use chrono::Utc;
use futures::stream::{self, StreamExt};
use lut_common::{Grid, ParameterSet};
use tokio::sync::broadcast;
use tracing::{debug, info};
use uuid::Uuid;

use crate::assemble::{Assembler, SweepOutput};
use crate::error::{SweepError, SweepResult};
use crate::materialize::{materialize, validate_axis_labels};
use crate::solver::PointSolver;

/// Default number of concurrent solver processes.
pub const DEFAULT_WORKERS: usize = 15;

/// Sweep the full grid and assemble one lookup table.
///
/// Every grid point is attempted exactly once: materialize the parameter
/// set, invoke the solver in its own sandbox, and hand the tagged response
/// to the assembler. At most `workers` invocations are in flight at a time;
/// new work is admitted only as slots free up. Completion order is
/// irrelevant because placement uses the index tuple.
///
/// A message on `shutdown` stops admitting points, drops in-flight work
/// (solver processes are killed by their sandboxes) and returns
/// [`SweepError::Cancelled`] instead of a partially-valid table.
pub async fn run_sweep<S>(
    grid: &Grid,
    baseline: &ParameterSet,
    solver: Arc<S>,
    workers: usize,
    mut shutdown: broadcast::Receiver<()>,
) -> SweepResult<SweepOutput>
where
    S: PointSolver + 'static,
{
    if workers == 0 {
        return Err(SweepError::Configuration(
            "worker count must be at least 1".to_string(),
        ));
    }

    // Fail fast: a misspelled axis label must abort before any invocation.
    validate_axis_labels(grid, solver.as_ref())?;

    let run_id = Uuid::new_v4();
    let started_at = Utc::now();
    info!(
        run_id = %run_id,
        points = grid.len(),
        workers,
        shape = ?grid.shape(),
        "Starting grid sweep"
    );

    let mut results = stream::iter(grid.points())
        .map(|point| {
            let solver = Arc::clone(&solver);
            let baseline = baseline.clone();
            async move {
                let params = materialize(&baseline, &point);
                debug!(index = ?point.index, "Dispatching grid point");
                let response = solver.solve(&params).await;
                (point.index, response)
            }
        })
        .buffer_unordered(workers);

    let mut assembler = Assembler::new(grid);
    let mut shutdown_open = true;

    loop {
        tokio::select! {
            received = shutdown.recv(), if shutdown_open => match received {
                // A dropped sender only means nobody can cancel anymore;
                // lagging behind means a signal was actually sent.
                Err(broadcast::error::RecvError::Closed) => shutdown_open = false,
                _ => {
                    info!(run_id = %run_id, "Shutdown requested, discarding partial sweep");
                    return Err(SweepError::Cancelled);
                }
            },
            next = results.next() => match next {
                Some((index, response)) => assembler.absorb(index, response, solver.as_ref()),
                None => break,
            }
        }
    }

    let output = assembler.finish(run_id, started_at)?;
    info!(
        run_id = %run_id,
        shape = ?output.report.shape,
        succeeded = output.report.succeeded,
        failed = output.report.failures.len(),
        missing_values = output.report.missing_values,
        "Sweep complete"
    );

    Ok(output)
}
