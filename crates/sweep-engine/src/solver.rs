//! The solver abstraction the engine dispatches against.
//!
//! One implementation wraps one external radiative-transfer program. The
//! engine only needs three things from it: which parameter names it
//! recognizes, how to run it for one materialized parameter set, and how to
//! decode one raw response into a fixed-shape numeric record.

use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use lut_common::ParameterSet;
use thiserror::Error;

use crate::record::OutputRecord;

/// Raw outcome of one solver invocation.
///
/// Failures carry a machine-readable kind plus a human-readable detail; if
/// the invocation workspace was retained for diagnostics its path is included.
#[derive(Debug, Clone)]
pub enum SolverResponse {
    Completed {
        payload: Bytes,
    },
    Failed {
        kind: InvocationErrorKind,
        detail: String,
        workspace: Option<PathBuf>,
    },
}

impl SolverResponse {
    /// Build a failed response without a retained workspace.
    pub fn failed(kind: InvocationErrorKind, detail: impl Into<String>) -> Self {
        SolverResponse::Failed {
            kind,
            detail: detail.into(),
            workspace: None,
        }
    }

    /// Whether the invocation ran to completion with output.
    pub fn is_completed(&self) -> bool {
        matches!(self, SolverResponse::Completed { .. })
    }
}

/// Classification of invocation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationErrorKind {
    /// Process could not be spawned or workspace I/O failed.
    Io,
    /// Process exited with a nonzero status.
    NonzeroExit,
    /// Process exceeded the configured time limit.
    Timeout,
    /// Process exited cleanly but produced no output.
    EmptyOutput,
}

impl std::fmt::Display for InvocationErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io => write!(f, "io"),
            Self::NonzeroExit => write!(f, "nonzero_exit"),
            Self::Timeout => write!(f, "timeout"),
            Self::EmptyOutput => write!(f, "empty_output"),
        }
    }
}

/// Errors decoding one solver payload into an output record.
#[derive(Debug, Clone, Error)]
pub enum ParseError {
    #[error("Empty solver payload")]
    Empty,

    #[error("Unrecognized payload format: {0}")]
    Unrecognized(String),

    #[error("Malformed record at line {line}: {message}")]
    Malformed { line: usize, message: String },

    #[error("Inconsistent record: {0}")]
    Inconsistent(String),
}

/// One external solver, invoked once per grid point.
///
/// Implementations must be safe to call concurrently: every invocation gets
/// an exclusively-owned workspace and shares no mutable state with any other.
#[async_trait]
pub trait PointSolver: Send + Sync {
    /// Whether `name` is a parameter this solver accepts. Used to fail fast
    /// on axis labels that would never reach the solver meaningfully.
    fn recognizes(&self, name: &str) -> bool;

    /// Run the solver once for a fully materialized parameter set.
    ///
    /// Never returns an error: invocation problems are reported through
    /// [`SolverResponse::Failed`] so one bad point cannot abort the sweep.
    async fn solve(&self, params: &ParameterSet) -> SolverResponse;

    /// Decode one completed response payload into a numeric record.
    fn parse(&self, payload: &Bytes) -> Result<OutputRecord, ParseError>;
}
