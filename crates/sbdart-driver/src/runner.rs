//! Sandboxed SBDART invocation.
//!
//! Every invocation gets a fresh temporary directory under the configured
//! workspace root: the namelist is written there, the executable runs with
//! it as working directory, and the directory is removed on every exit path.
//! When `keep_workspaces` is set, the workspace of a *failed* invocation is
//! retained and its path reported for diagnostics.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use lut_common::ParameterSet;
use sweep_engine::{
    InvocationErrorKind, OutputRecord, ParseError, PointSolver, SolverResponse,
};
use tempfile::TempDir;
use tokio::process::Command;
use tracing::debug;

use crate::error::{DriverError, DriverResult};
use crate::namelist;
use crate::output::OutputFormat;
use crate::params;

/// How to run the external SBDART executable.
#[derive(Debug, Clone)]
pub struct SbdartConfig {
    /// Path to (or name of) the SBDART executable.
    pub executable: PathBuf,
    /// Parent directory for per-invocation workspaces.
    pub workspace_root: PathBuf,
    /// Wall-clock limit for one invocation.
    pub timeout: Duration,
    /// Retain failed invocations' workspaces for diagnostics.
    pub keep_workspaces: bool,
}

impl SbdartConfig {
    pub fn new(executable: impl Into<PathBuf>, workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            workspace_root: workspace_root.into(),
            timeout: Duration::from_secs(300),
            keep_workspaces: false,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_keep_workspaces(mut self, keep: bool) -> Self {
        self.keep_workspaces = keep;
        self
    }
}

/// The SBDART solver, usable as the engine's `PointSolver`.
pub struct SbdartSolver {
    config: SbdartConfig,
    format: OutputFormat,
}

impl SbdartSolver {
    /// Build a solver for one run.
    ///
    /// Validates every baseline parameter against the whitelist, fixes the
    /// output format from the baseline's IOUT value, and creates the
    /// workspace root. All of this fails before any invocation.
    pub fn new(config: SbdartConfig, baseline: &ParameterSet) -> DriverResult<Self> {
        params::validate(baseline)?;

        let iout = match baseline.get("iout") {
            None => 10,
            Some(value) => value
                .as_f64()
                .filter(|v| v.fract() == 0.0)
                .map(|v| v as i64)
                .ok_or_else(|| DriverError::InvalidParameter {
                    param: "iout".to_string(),
                    message: format!("expected an integer, got {}", value),
                })?,
        };
        let format = OutputFormat::from_iout(iout)?;

        std::fs::create_dir_all(&config.workspace_root)?;

        Ok(Self { config, format })
    }

    /// The record format this run parses.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Run one invocation in its own disposable workspace.
    async fn invoke(&self, params: &ParameterSet) -> SolverResponse {
        let workspace = match tempfile::Builder::new()
            .prefix("sbdart-")
            .tempdir_in(&self.config.workspace_root)
        {
            Ok(dir) => dir,
            Err(e) => {
                return SolverResponse::failed(
                    InvocationErrorKind::Io,
                    format!("failed to create workspace: {}", e),
                );
            }
        };

        let input_path = workspace.path().join(namelist::INPUT_FILE);
        if let Err(e) = tokio::fs::write(&input_path, namelist::render(params)).await {
            return self.fail(
                workspace,
                InvocationErrorKind::Io,
                format!("failed to write namelist: {}", e),
            );
        }

        debug!(workspace = %workspace.path().display(), "Running solver");
        let run = Command::new(&self.config.executable)
            .current_dir(workspace.path())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output();

        let output = match tokio::time::timeout(self.config.timeout, run).await {
            Err(_) => {
                return self.fail(
                    workspace,
                    InvocationErrorKind::Timeout,
                    format!("no result within {:?}", self.config.timeout),
                );
            }
            Ok(Err(e)) => {
                return self.fail(
                    workspace,
                    InvocationErrorKind::Io,
                    format!("failed to spawn {}: {}", self.config.executable.display(), e),
                );
            }
            Ok(Ok(output)) => output,
        };

        if !output.status.success() {
            let detail = format!(
                "{}; stderr: {}",
                output.status,
                excerpt(&output.stderr)
            );
            return self.fail(workspace, InvocationErrorKind::NonzeroExit, detail);
        }

        if output.stdout.iter().all(u8::is_ascii_whitespace) {
            return self.fail(
                workspace,
                InvocationErrorKind::EmptyOutput,
                "solver exited cleanly but wrote no output".to_string(),
            );
        }

        // Success path: the workspace drops (and is deleted) here.
        SolverResponse::Completed {
            payload: Bytes::from(output.stdout),
        }
    }

    /// Build a failure response, retaining the workspace when configured.
    fn fail(
        &self,
        workspace: TempDir,
        kind: InvocationErrorKind,
        detail: String,
    ) -> SolverResponse {
        let retained = if self.config.keep_workspaces {
            Some(workspace.into_path())
        } else {
            None
        };
        SolverResponse::Failed {
            kind,
            detail,
            workspace: retained,
        }
    }
}

#[async_trait]
impl PointSolver for SbdartSolver {
    fn recognizes(&self, name: &str) -> bool {
        params::is_recognized(name)
    }

    async fn solve(&self, params: &ParameterSet) -> SolverResponse {
        self.invoke(params).await
    }

    fn parse(&self, payload: &Bytes) -> Result<OutputRecord, ParseError> {
        self.format.parse(payload)
    }
}

/// First few hundred bytes of stderr, lossily decoded.
fn excerpt(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let trimmed = text.trim();
    if trimmed.len() > 400 {
        let cut: String = trimmed.chars().take(400).collect();
        format!("{}...", cut)
    } else {
        trimmed.to_string()
    }
}
