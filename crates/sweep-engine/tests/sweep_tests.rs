//! End-to-end sweep tests against an in-process mock solver.

mod common;

use std::sync::atomic::Ordering;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use lut_common::{Axis, Grid, LutError, ParameterSet};
use sweep_engine::{run_sweep, FailureReason, SweepError};
use tokio::sync::broadcast;

use common::{param_f64, MockSolver};

fn axes_2x3() -> Vec<Axis> {
    vec![
        Axis::new("a", vec![1.0, 2.0]),
        Axis::new("b", vec![10.0, 20.0, 30.0]),
    ]
}

fn baseline() -> ParameterSet {
    ParameterSet::new().with("a", 0.0).with("b", 0.0)
}

fn shutdown_rx() -> broadcast::Receiver<()> {
    broadcast::channel(1).1
}

#[tokio::test]
async fn test_all_points_succeed() {
    let grid = Grid::new(axes_2x3()).unwrap();
    let solver = Arc::new(MockSolver::new(
        &["a", "b"],
        Box::new(|_| MockSolver::scalar_payload(1.0)),
    ));

    let output = run_sweep(&grid, &baseline(), Arc::clone(&solver), 4, shutdown_rx())
        .await
        .unwrap();

    assert_eq!(output.table.shape(), &[2, 3, 1]);
    assert!(output.table.values().iter().all(|&v| v == 1.0));
    assert_eq!(output.report.attempted, 6);
    assert_eq!(output.report.succeeded, 6);
    assert!(output.report.failures.is_empty());
    assert_eq!(solver.calls.load(Ordering::SeqCst), 6);
}

#[tokio::test]
async fn test_each_point_attempted_exactly_once() {
    let grid = Grid::new(axes_2x3()).unwrap();
    let seen: Arc<Mutex<Vec<(i64, i64)>>> = Arc::new(Mutex::new(Vec::new()));
    let seen_in_solver = Arc::clone(&seen);

    let solver = Arc::new(MockSolver::new(
        &["a", "b"],
        Box::new(move |params| {
            let a = param_f64(params, "a") as i64;
            let b = param_f64(params, "b") as i64;
            seen_in_solver.lock().unwrap().push((a, b));
            MockSolver::scalar_payload(0.0)
        }),
    ));

    run_sweep(&grid, &baseline(), solver, 3, shutdown_rx())
        .await
        .unwrap();

    let mut seen = seen.lock().unwrap().clone();
    seen.sort_unstable();
    let expected: Vec<(i64, i64)> = [1, 2]
        .iter()
        .flat_map(|&a| [10, 20, 30].iter().map(move |&b| (a, b)))
        .collect();
    assert_eq!(seen, expected);
}

#[tokio::test]
async fn test_single_crash_leaves_one_sentinel() {
    let grid = Grid::new(axes_2x3()).unwrap();
    let solver = Arc::new(MockSolver::new(
        &["a", "b"],
        Box::new(|params| {
            // Simulated solver crash at grid point (1, 2) = (a=2, b=30).
            if param_f64(params, "a") == 2.0 && param_f64(params, "b") == 30.0 {
                sweep_engine::SolverResponse::failed(
                    sweep_engine::InvocationErrorKind::NonzeroExit,
                    "exit status 139",
                )
            } else {
                MockSolver::scalar_payload(1.0)
            }
        }),
    ));

    let output = run_sweep(&grid, &baseline(), solver, 4, shutdown_rx())
        .await
        .unwrap();

    assert_eq!(output.table.shape(), &[2, 3, 1]);
    assert!(output.table.get(&[1, 2, 0]).unwrap().is_nan());
    assert_eq!(output.report.missing_values, 1);
    assert_eq!(output.report.failures.len(), 1);
    assert_eq!(output.report.failures[0].index, vec![1, 2]);
    assert!(matches!(
        output.report.failures[0].reason,
        FailureReason::Invocation { .. }
    ));
}

#[tokio::test]
async fn test_duplicate_axis_label_rejected_before_any_invocation() {
    let result = Grid::new(vec![
        Axis::new("a", vec![1.0, 2.0]),
        Axis::new("a", vec![3.0]),
    ]);
    assert!(matches!(result, Err(LutError::DuplicateAxisLabel(_))));
}

#[tokio::test]
async fn test_unknown_axis_label_fails_fast() {
    let grid = Grid::new(vec![
        Axis::new("a", vec![1.0]),
        Axis::new("bogus", vec![1.0, 2.0]),
    ])
    .unwrap();
    let solver = Arc::new(MockSolver::new(
        &["a", "b"],
        Box::new(|_| MockSolver::scalar_payload(1.0)),
    ));

    let result = run_sweep(&grid, &baseline(), Arc::clone(&solver), 4, shutdown_rx()).await;

    assert!(matches!(result, Err(SweepError::Configuration(_))));
    // Fail fast means zero invocations were attempted.
    assert_eq!(solver.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_concurrency_does_not_change_table() {
    let respond = || {
        Box::new(|params: &ParameterSet| {
            MockSolver::scalar_payload(param_f64(params, "a") * 100.0 + param_f64(params, "b"))
        }) as Box<dyn Fn(&ParameterSet) -> sweep_engine::SolverResponse + Send + Sync>
    };

    let grid = Grid::new(axes_2x3()).unwrap();

    let serial = run_sweep(
        &grid,
        &baseline(),
        Arc::new(MockSolver::new(&["a", "b"], respond()).with_delay(Duration::from_millis(2))),
        1,
        shutdown_rx(),
    )
    .await
    .unwrap();

    let parallel = run_sweep(
        &grid,
        &baseline(),
        Arc::new(MockSolver::new(&["a", "b"], respond()).with_delay(Duration::from_millis(2))),
        15,
        shutdown_rx(),
    )
    .await
    .unwrap();

    assert_eq!(serial.table.labels(), parallel.table.labels());
    assert_eq!(serial.table.coords(), parallel.table.coords());
    assert_eq!(serial.table.values(), parallel.table.values());
    assert_eq!(serial.table.get(&[1, 2, 0]).unwrap(), 230.0);
}

#[tokio::test]
async fn test_in_flight_work_is_bounded() {
    let grid = Grid::new(vec![
        Axis::new("a", vec![1.0, 2.0, 3.0, 4.0]),
        Axis::new("b", vec![1.0, 2.0, 3.0]),
    ])
    .unwrap();
    let solver = Arc::new(
        MockSolver::new(&["a", "b"], Box::new(|_| MockSolver::scalar_payload(1.0)))
            .with_delay(Duration::from_millis(20)),
    );

    run_sweep(&grid, &baseline(), Arc::clone(&solver), 3, shutdown_rx())
        .await
        .unwrap();

    assert_eq!(solver.calls.load(Ordering::SeqCst), 12);
    assert!(solver.peak_in_flight.load(Ordering::SeqCst) <= 3);
}

#[tokio::test]
async fn test_zero_successes_aborts_without_table() {
    let grid = Grid::new(axes_2x3()).unwrap();
    let solver = Arc::new(MockSolver::new(
        &["a", "b"],
        Box::new(|_| {
            sweep_engine::SolverResponse::failed(
                sweep_engine::InvocationErrorKind::Timeout,
                "no output within 60s",
            )
        }),
    ));

    let result = run_sweep(&grid, &baseline(), solver, 4, shutdown_rx()).await;
    assert!(matches!(result, Err(SweepError::Assembly(_))));
}

#[tokio::test]
async fn test_dropped_shutdown_sender_does_not_cancel() {
    let grid = Grid::new(axes_2x3()).unwrap();
    let solver = Arc::new(MockSolver::new(
        &["a", "b"],
        Box::new(|_| MockSolver::scalar_payload(1.0)),
    ));

    // No sender alive at all: the sweep must still run to completion.
    let (tx, rx) = broadcast::channel(1);
    drop(tx);

    let output = run_sweep(&grid, &baseline(), Arc::clone(&solver), 4, rx)
        .await
        .unwrap();

    assert_eq!(output.report.succeeded, 6);
    assert_eq!(solver.calls.load(Ordering::SeqCst), 6);
}

#[tokio::test]
async fn test_shutdown_discards_partial_results() {
    let grid = Grid::new(axes_2x3()).unwrap();
    let solver = Arc::new(
        MockSolver::new(&["a", "b"], Box::new(|_| MockSolver::scalar_payload(1.0)))
            .with_delay(Duration::from_secs(30)),
    );

    let (tx, rx) = broadcast::channel(1);
    let handle = tokio::spawn({
        let solver = Arc::clone(&solver);
        let grid = grid.clone();
        let baseline = baseline();
        async move { run_sweep(&grid, &baseline, solver, 2, rx).await }
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    tx.send(()).unwrap();

    let result = handle.await.unwrap();
    assert!(matches!(result, Err(SweepError::Cancelled)));
}
