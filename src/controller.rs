//! Sort Controller - run lifecycle
//!
//! ```text
//!          start()                      completion | cancel()
//!   Idle ───────────► Running ─────────────────────────────► Idle
//!     ▲                  │ start()            : no-op
//!     │                  │ randomize()        : InvalidOperation
//!     └─ randomize()     │ set_algorithm()    : InvalidOperation
//!        set_algorithm() ▼
//! ```
//!
//! All transitions happen under one lock, so the algorithm captured by
//! `start()` and the array reseeded by `randomize()` can never race with a
//! run. The run itself executes on Tokio's blocking pool (or its own thread
//! outside a runtime) and only takes the lock again to publish its outcome.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info, info_span, warn};

use crate::algorithms::{AlgorithmKind, SortBuffer};
use crate::array_state::{ArrayState, Snapshot};
use crate::config::{ValueRange, VisualizerConfig};
use crate::error::SortVizError;
use crate::step::{CancelSignal, PacedEmitter, RedrawSignal};

// ─────────────────────────────────────────────────────────────────────────────
// State + Outcome
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ControllerState {
    Idle,
    Running,
}

impl std::fmt::Display for ControllerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "IDLE"),
            Self::Running => write!(f, "RUNNING"),
        }
    }
}

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunOutcome {
    pub run_id: u64,
    pub algorithm: AlgorithmKind,
    pub steps: u64,
    pub elapsed_ms: u64,
    pub cancelled: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// Controller
// ─────────────────────────────────────────────────────────────────────────────

struct ActiveRun {
    id: u64,
    cancel: CancelSignal,
}

struct Inner {
    algorithm: AlgorithmKind,
    active: Option<ActiveRun>,
    last_outcome: Option<RunOutcome>,
}

struct Shared {
    array: ArrayState,
    range: ValueRange,
    pacing: Duration,
    redraw: RedrawSignal,
    next_run_id: AtomicU64,
    inner: Mutex<Inner>,
    state_tx: watch::Sender<ControllerState>,
}

/// Single-writer owner of the array under sort
///
/// Cheap to clone; clones control the same array.
#[derive(Clone)]
pub struct SortController {
    shared: Arc<Shared>,
}

impl SortController {
    /// Validate `config` and seed a random array
    pub fn new(config: &VisualizerConfig) -> Result<Self, SortVizError> {
        config.validate()?;
        let array = ArrayState::random(config.array_size, config.value_range)?;
        Ok(Self::with_array(config, array))
    }

    /// Start from known values instead of a random array.
    ///
    /// `config.array_size` is ignored; the values fix the length. Every value
    /// must lie in `config.value_range`.
    pub fn from_values(
        config: &VisualizerConfig,
        values: impl IntoIterator<Item = u32>,
    ) -> Result<Self, SortVizError> {
        config.validate()?;
        let array = ArrayState::from_values(values)?;
        let range = config.value_range;
        if let Some(value) = array.snapshot().values().iter().find(|v| !range.contains(**v)) {
            return Err(SortVizError::invalid_config(format!(
                "value {} outside value_range [{}, {}]",
                value, range.min, range.max
            )));
        }
        Ok(Self::with_array(config, array))
    }

    fn with_array(config: &VisualizerConfig, array: ArrayState) -> Self {
        let (state_tx, _) = watch::channel(ControllerState::Idle);
        Self {
            shared: Arc::new(Shared {
                array,
                range: config.value_range,
                pacing: config.pacing_delay(),
                redraw: RedrawSignal::new(),
                next_run_id: AtomicU64::new(1),
                inner: Mutex::new(Inner {
                    algorithm: config.algorithm,
                    active: None,
                    last_outcome: None,
                }),
                state_tx,
            }),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Commands
    // ─────────────────────────────────────────────────────────────────────

    /// Begin a run with the selected algorithm.
    ///
    /// Returns false (and does nothing) if a run is already active. The run
    /// goes to the current Tokio runtime's blocking pool, or to a dedicated
    /// thread when called outside a runtime.
    pub fn start(&self) -> bool {
        let runtime = tokio::runtime::Handle::try_current().ok();
        let shared = &self.shared;
        let mut inner = shared.inner.lock();
        if inner.active.is_some() {
            debug!("start ignored, run already active");
            return false;
        }

        let algorithm = inner.algorithm;
        let run_id = shared.next_run_id.fetch_add(1, Ordering::Relaxed);
        let cancel = CancelSignal::new();
        inner.active = Some(ActiveRun {
            id: run_id,
            cancel: cancel.clone(),
        });
        shared.redraw.reset();
        shared.state_tx.send_replace(ControllerState::Running);
        drop(inner);

        info!(run_id, algorithm = algorithm.name(), "Run started");
        let worker = Arc::clone(shared);
        let job = move || worker.execute(run_id, algorithm, cancel);
        match runtime {
            Some(handle) => {
                handle.spawn_blocking(job);
            }
            None => {
                let spawned = std::thread::Builder::new()
                    .name(format!("sortviz-run-{run_id}"))
                    .spawn(job);
                if let Err(e) = spawned {
                    warn!(run_id, error = %e, "Failed to spawn run thread");
                    shared.abandon(run_id);
                    return false;
                }
            }
        }
        true
    }

    /// Ask the active run to stop at its next step.
    ///
    /// Returns false if nothing was running. The controller reports Idle once
    /// the run has unwound.
    pub fn cancel(&self) -> bool {
        let inner = self.shared.inner.lock();
        match &inner.active {
            Some(run) => {
                info!(run_id = run.id, "Cancel requested");
                run.cancel.cancel();
                true
            }
            None => false,
        }
    }

    /// Reseed the array with new random values (Idle only)
    pub fn randomize(&self) -> Result<(), SortVizError> {
        let inner = self.shared.inner.lock();
        if inner.active.is_some() {
            warn!("randomize rejected, run active");
            return Err(SortVizError::InvalidOperation {
                operation: "randomize",
            });
        }
        self.shared.array.randomize(self.shared.range)?;
        self.shared.redraw.clear_highlight();
        debug!(len = self.shared.array.len(), "Array randomized");
        Ok(())
    }

    /// Select the algorithm for the next run (Idle only)
    pub fn set_algorithm(&self, kind: AlgorithmKind) -> Result<(), SortVizError> {
        let mut inner = self.shared.inner.lock();
        if inner.active.is_some() {
            warn!(requested = kind.name(), "algorithm change rejected, run active");
            return Err(SortVizError::InvalidOperation {
                operation: "change algorithm",
            });
        }
        inner.algorithm = kind;
        debug!(algorithm = kind.name(), "Algorithm selected");
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────

    pub fn state(&self) -> ControllerState {
        *self.shared.state_tx.borrow()
    }

    pub fn is_running(&self) -> bool {
        self.state() == ControllerState::Running
    }

    pub fn algorithm(&self) -> AlgorithmKind {
        self.shared.inner.lock().algorithm
    }

    /// Copy of the array; never blocks on the run
    pub fn snapshot(&self) -> Snapshot {
        self.shared.array.snapshot()
    }

    pub fn len(&self) -> usize {
        self.shared.array.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.array.is_empty()
    }

    pub fn value_range(&self) -> ValueRange {
        self.shared.range
    }

    pub fn pacing_delay(&self) -> Duration {
        self.shared.pacing
    }

    /// Signal published by the active run's emitter
    pub fn redraw(&self) -> &RedrawSignal {
        &self.shared.redraw
    }

    pub fn last_outcome(&self) -> Option<RunOutcome> {
        self.shared.inner.lock().last_outcome.clone()
    }

    /// Watch state transitions
    pub fn subscribe(&self) -> watch::Receiver<ControllerState> {
        self.shared.state_tx.subscribe()
    }

    /// Resolve once no run is active
    pub async fn wait_idle(&self) {
        let mut rx = self.subscribe();
        // The sender lives as long as `self`, so this cannot fail
        let _ = rx.wait_for(|state| *state == ControllerState::Idle).await;
    }
}

impl std::fmt::Debug for SortController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SortController")
            .field("state", &self.state())
            .field("algorithm", &self.algorithm())
            .field("len", &self.len())
            .finish()
    }
}

impl Shared {
    /// Body of one run, on the blocking pool
    fn execute(&self, run_id: u64, algorithm: AlgorithmKind, cancel: CancelSignal) {
        let span = info_span!("run", run_id, algorithm = algorithm.name());
        let _enter = span.enter();

        let emitter = PacedEmitter::new(self.pacing, cancel, self.redraw.clone());
        let started = Instant::now();
        let result = algorithm.run(&SortBuffer::new(&self.array, &emitter));

        let outcome = RunOutcome {
            run_id,
            algorithm,
            steps: self.redraw.steps(),
            elapsed_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            cancelled: result.is_err(),
        };
        if outcome.cancelled {
            info!(steps = outcome.steps, "Run cancelled");
        } else {
            info!(steps = outcome.steps, elapsed_ms = outcome.elapsed_ms, "Run completed");
        }

        let mut inner = self.inner.lock();
        if inner.active.as_ref().map(|run| run.id) == Some(run_id) {
            inner.active = None;
        }
        inner.last_outcome = Some(outcome);
        self.state_tx.send_replace(ControllerState::Idle);
    }

    /// Roll back a run that never got a thread
    fn abandon(&self, run_id: u64) {
        let mut inner = self.inner.lock();
        if inner.active.as_ref().map(|run| run.id) == Some(run_id) {
            inner.active = None;
            self.state_tx.send_replace(ControllerState::Idle);
        }
    }
}
