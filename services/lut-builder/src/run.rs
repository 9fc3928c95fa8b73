//! One end-to-end build: config in, artifact out.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use lut_store::write_table;
use sbdart_driver::{SbdartConfig, SbdartSolver};
use sweep_engine::{run_sweep, SweepOutput};
use tokio::sync::broadcast;
use tracing::{info, warn};

use crate::config::RunConfig;

/// Execute a configured sweep and persist the resulting table.
pub async fn execute(config: &RunConfig, shutdown: broadcast::Receiver<()>) -> Result<PathBuf> {
    let grid = config.grid()?;
    let baseline = config.baseline_params();

    let solver_config = SbdartConfig::new(
        &config.solver.executable,
        &config.solver.workspace_root,
    )
    .with_timeout(Duration::from_secs(config.solver.timeout_secs))
    .with_keep_workspaces(config.solver.keep_workspaces);

    let solver = Arc::new(
        SbdartSolver::new(solver_config, &baseline)
            .context("Failed to set up the SBDART solver")?,
    );

    info!(
        executable = %config.solver.executable.display(),
        points = grid.len(),
        workers = config.workers,
        "Starting lookup-table build"
    );

    let output = run_sweep(&grid, &baseline, solver, config.workers, shutdown)
        .await
        .context("Grid sweep failed")?;

    persist(config, &output).await
}

/// Write the artifact, plus a failure report sidecar when any point failed.
async fn persist(config: &RunConfig, output: &SweepOutput) -> Result<PathBuf> {
    let report = &output.report;

    write_table(
        &config.output,
        &output.table,
        config.precision,
        report.run_id,
    )
    .await
    .with_context(|| format!("Failed to write artifact: {}", config.output.display()))?;

    if !report.failures.is_empty() {
        let report_path = config.output.with_extension("failures.json");
        let json = serde_json::to_vec_pretty(report)?;
        tokio::fs::write(&report_path, json)
            .await
            .with_context(|| format!("Failed to write failure report: {}", report_path.display()))?;
        warn!(
            failed = report.failures.len(),
            report = %report_path.display(),
            "Some grid points failed; their table slots hold NaN"
        );
    }

    info!(
        run_id = %report.run_id,
        path = %config.output.display(),
        labels = ?output.table.labels(),
        shape = ?report.shape,
        attempted = report.attempted,
        succeeded = report.succeeded,
        missing_values = report.missing_values,
        "Lookup table built"
    );

    Ok(config.output.clone())
}
