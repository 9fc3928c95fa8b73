//! Run configuration loading.
//!
//! One YAML file fully describes a sweep: the solver executable and its
//! limits, the baseline parameter set, the grid axes (explicit values or
//! generated ranges), and where the artifact goes.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use lut_common::{Axis, Grid, ParamValue, ParameterSet};
use lut_store::Precision;
use serde::Deserialize;
use tracing::debug;

/// Root configuration loaded from a run YAML file.
#[derive(Debug, Clone, Deserialize)]
pub struct RunConfig {
    /// Path the finished artifact is written to.
    pub output: PathBuf,
    /// Value storage precision for the artifact.
    #[serde(default)]
    pub precision: Precision,
    /// Maximum concurrent solver invocations.
    #[serde(default = "default_workers")]
    pub workers: usize,
    pub solver: SolverConfig,
    /// Parameters applied at every grid point unless an axis overrides them.
    #[serde(default)]
    pub baseline: BTreeMap<String, ParamValue>,
    pub axes: Vec<AxisSpec>,
}

fn default_workers() -> usize {
    sweep_engine::DEFAULT_WORKERS
}

/// External solver executable settings.
#[derive(Debug, Clone, Deserialize)]
pub struct SolverConfig {
    pub executable: PathBuf,
    /// Parent directory for per-invocation workspaces.
    #[serde(default = "default_workspace_root")]
    pub workspace_root: PathBuf,
    /// Wall-clock limit per invocation, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Retain failed invocations' workspaces for diagnostics.
    #[serde(default)]
    pub keep_workspaces: bool,
}

fn default_workspace_root() -> PathBuf {
    std::env::temp_dir().join("radlut")
}

fn default_timeout_secs() -> u64 {
    300
}

/// One grid axis: a label plus its coordinate values, either listed
/// explicitly or generated from an inclusive range.
#[derive(Debug, Clone, Deserialize)]
pub struct AxisSpec {
    pub label: String,
    #[serde(flatten)]
    pub values: AxisValues,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisValues {
    /// Explicit coordinate values.
    Values(Vec<f64>),
    /// `count` evenly spaced values from `start` to `stop` inclusive.
    Linspace(RangeSpec),
    /// `count` values whose base-10 logs are evenly spaced from `start`
    /// to `stop` inclusive.
    Logspace(RangeSpec),
}

#[derive(Debug, Clone, Deserialize)]
pub struct RangeSpec {
    pub start: f64,
    pub stop: f64,
    pub count: usize,
}

impl RangeSpec {
    fn expand(&self) -> Vec<f64> {
        match self.count {
            0 => Vec::new(),
            1 => vec![self.start],
            n => {
                let step = (self.stop - self.start) / (n - 1) as f64;
                (0..n).map(|i| self.start + step * i as f64).collect()
            }
        }
    }
}

impl AxisSpec {
    /// Generate the axis coordinate values.
    pub fn expand(&self) -> Vec<f64> {
        match &self.values {
            AxisValues::Values(v) => v.clone(),
            AxisValues::Linspace(range) => range.expand(),
            AxisValues::Logspace(range) => {
                range.expand().into_iter().map(|e| 10f64.powf(e)).collect()
            }
        }
    }
}

impl RunConfig {
    /// Load a run configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: RunConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        if config.axes.is_empty() {
            bail!("Config declares no axes: {}", path.display());
        }

        debug!(
            path = %path.display(),
            axes = config.axes.len(),
            baseline = config.baseline.len(),
            "Loaded run config"
        );
        Ok(config)
    }

    /// Build the sweep grid from the axis specs.
    pub fn grid(&self) -> Result<Grid> {
        let axes = self
            .axes
            .iter()
            .map(|spec| Axis::new(&spec.label, spec.expand()))
            .collect();
        Grid::new(axes).context("Invalid grid axes")
    }

    /// The baseline parameter set.
    pub fn baseline_params(&self) -> ParameterSet {
        self.baseline
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }
}
