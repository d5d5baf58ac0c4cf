//! Sort controller lifecycle tests
//!
//! These run real paced runs on Tokio's blocking pool, so delays are kept
//! small and every wait is bounded by a timeout.

use std::time::{Duration, Instant};

use sortviz::{
    AlgorithmKind, ControllerState, SortController, SortVizError, ValueRange, VisualizerConfig,
};
use tokio::time::timeout;

const BOUND: Duration = Duration::from_secs(10);

fn config(pacing_delay_ms: u64) -> VisualizerConfig {
    VisualizerConfig {
        pacing_delay_ms,
        ..Default::default()
    }
}

/// Reversed input: every algorithm has work to do from the first step
fn reversed(len: u32) -> Vec<u32> {
    (0..len).map(|i| 450 - i).collect()
}

#[tokio::test]
async fn test_every_algorithm_completes() {
    for kind in AlgorithmKind::ALL {
        let controller = SortController::new(&config(0)).unwrap();
        controller.set_algorithm(kind).unwrap();

        assert!(controller.start());
        timeout(BOUND, controller.wait_idle()).await.unwrap();

        let snapshot = controller.snapshot();
        assert!(snapshot.is_sorted(), "{kind}");
        assert_eq!(snapshot.len(), 100);
        let outcome = controller.last_outcome().unwrap();
        assert_eq!(outcome.algorithm, kind);
        assert!(!outcome.cancelled);
    }
}

#[tokio::test]
async fn test_double_start_runs_once() {
    let controller = SortController::from_values(&config(1), reversed(30)).unwrap();

    assert!(controller.start());
    assert!(!controller.start());
    assert_eq!(controller.state(), ControllerState::Running);

    timeout(BOUND, controller.wait_idle()).await.unwrap();

    let outcome = controller.last_outcome().unwrap();
    assert_eq!(outcome.run_id, 1);
    // 30 reversed elements: one swap per inversion, from a single run
    assert_eq!(outcome.steps, 30 * 29 / 2);
    assert!(controller.snapshot().is_sorted());
}

#[tokio::test]
async fn test_commands_rejected_while_running() {
    let controller = SortController::from_values(&config(50), reversed(40)).unwrap();
    controller.start();
    tokio::time::sleep(Duration::from_millis(20)).await;

    let before = controller.snapshot();
    let err = controller.randomize().unwrap_err();
    assert!(matches!(err, SortVizError::InvalidOperation { operation: "randomize" }));
    let err = controller.set_algorithm(AlgorithmKind::QuickSort).unwrap_err();
    assert!(matches!(err, SortVizError::InvalidOperation { .. }));
    assert_eq!(controller.algorithm(), AlgorithmKind::BubbleSort);

    controller.cancel();
    timeout(BOUND, controller.wait_idle()).await.unwrap();

    // Only the run's own steps touched the array; randomize wrote nothing
    let mut a = before.into_vec();
    let mut b = controller.snapshot().into_vec();
    a.sort_unstable();
    b.sort_unstable();
    assert_eq!(a, b);
}

#[tokio::test]
async fn test_cancel_reaches_idle_within_one_interval() {
    let pacing = Duration::from_millis(300);
    let controller =
        SortController::from_values(&config(pacing.as_millis() as u64), reversed(50)).unwrap();
    controller.start();
    tokio::time::sleep(Duration::from_millis(50)).await;

    let requested = Instant::now();
    assert!(controller.cancel());
    timeout(BOUND, controller.wait_idle()).await.unwrap();
    assert!(requested.elapsed() < pacing);

    let outcome = controller.last_outcome().unwrap();
    assert!(outcome.cancelled);
    assert!(outcome.steps >= 1);

    let snapshot = controller.snapshot();
    assert_eq!(snapshot.len(), 50);
    assert!(!snapshot.is_sorted());
    let range = ValueRange::default();
    assert!(snapshot.values().iter().all(|v| range.contains(*v)));
}

#[tokio::test]
async fn test_selection_applies_to_next_run() {
    let controller = SortController::from_values(&config(0), reversed(20)).unwrap();
    controller.set_algorithm(AlgorithmKind::MergeSort).unwrap();
    controller.start();
    timeout(BOUND, controller.wait_idle()).await.unwrap();
    assert_eq!(
        controller.last_outcome().unwrap().algorithm,
        AlgorithmKind::MergeSort
    );

    controller.set_algorithm(AlgorithmKind::InsertionSort).unwrap();
    controller.randomize().unwrap();
    controller.start();
    timeout(BOUND, controller.wait_idle()).await.unwrap();

    let outcome = controller.last_outcome().unwrap();
    assert_eq!(outcome.algorithm, AlgorithmKind::InsertionSort);
    assert_eq!(outcome.run_id, 2);
    assert!(controller.snapshot().is_sorted());
}

#[tokio::test]
async fn test_snapshots_stay_valid_during_run() {
    let controller = SortController::new(&config(1)).unwrap();
    controller.set_algorithm(AlgorithmKind::QuickSort).unwrap();
    let range = controller.value_range();
    controller.start();

    // Reader on its own cadence, never waiting for the run
    while controller.is_running() {
        let snapshot = controller.snapshot();
        assert_eq!(snapshot.len(), 100);
        assert!(snapshot.values().iter().all(|v| range.contains(*v)));
        tokio::time::sleep(Duration::from_millis(3)).await;
    }
    assert!(controller.snapshot().is_sorted());
}

#[tokio::test]
async fn test_state_transitions_are_published() {
    let controller = SortController::from_values(&config(0), reversed(10)).unwrap();
    let mut rx = controller.subscribe();
    assert_eq!(*rx.borrow_and_update(), ControllerState::Idle);

    controller.start();
    timeout(BOUND, controller.wait_idle()).await.unwrap();
    assert!(rx.has_changed().unwrap());
    assert_eq!(*rx.borrow(), ControllerState::Idle);
}
