//! Shared mock solver for sweep integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use lut_common::ParameterSet;
use sweep_engine::{OutputRecord, ParseError, PointSolver, SolverResponse};

type RespondFn = Box<dyn Fn(&ParameterSet) -> SolverResponse + Send + Sync>;

/// In-process stand-in for an external solver.
///
/// Responds through a caller-supplied closure and keeps counters so tests
/// can assert exactly-once dispatch and bounded concurrency.
pub struct MockSolver {
    recognized: Vec<String>,
    delay: Duration,
    respond: RespondFn,
    pub calls: AtomicUsize,
    in_flight: AtomicUsize,
    pub peak_in_flight: AtomicUsize,
}

impl MockSolver {
    pub fn new(recognized: &[&str], respond: RespondFn) -> Self {
        Self {
            recognized: recognized.iter().map(|s| s.to_string()).collect(),
            delay: Duration::from_millis(0),
            respond,
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            peak_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Response helper: a completed payload carrying one scalar.
    pub fn scalar_payload(value: f64) -> SolverResponse {
        SolverResponse::Completed {
            payload: Bytes::from(format!("{}", value)),
        }
    }
}

#[async_trait]
impl PointSolver for MockSolver {
    fn recognizes(&self, name: &str) -> bool {
        self.recognized.iter().any(|r| r == name)
    }

    async fn solve(&self, params: &ParameterSet) -> SolverResponse {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let response = (self.respond)(params);

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        response
    }

    fn parse(&self, payload: &Bytes) -> Result<OutputRecord, ParseError> {
        let text = std::str::from_utf8(payload)
            .map_err(|e| ParseError::Unrecognized(e.to_string()))?;
        let value: f64 = text
            .trim()
            .parse()
            .map_err(|_| ParseError::Unrecognized(format!("not a scalar: {:?}", text)))?;
        OutputRecord::channels("flux", vec!["botdn".to_string()], vec![value])
    }
}

/// Pull a scalar parameter out of a materialized set.
pub fn param_f64(params: &ParameterSet, name: &str) -> f64 {
    params
        .get(name)
        .and_then(|v| v.as_f64())
        .unwrap_or_else(|| panic!("missing parameter {}", name))
}
