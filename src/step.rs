//! Step Emitter - instrumentation between algorithms and the host
//!
//! Every mutation of the array is reported as a [`Step`]. The emitter decides
//! what a step costs: [`PacedEmitter`] sleeps for the pacing delay and wakes
//! early on cancellation, [`RecordingEmitter`] appends to a list and returns
//! immediately.
//!
//! ```text
//! algorithm ──swap/write──► ArrayState ──Step──► StepEmitter
//!                                                  │  ├─ RedrawSignal (render loop reads)
//!                                                  │  └─ CancelSignal (checked, then slept on)
//!                                                  ▼
//!                                     Ok(()) continue │ Err(Cancelled) unwind
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};
use tracing::trace;

// ─────────────────────────────────────────────────────────────────────────────
// Steps
// ─────────────────────────────────────────────────────────────────────────────

/// One observable mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Swap { i: usize, j: usize },
    Write { index: usize, value: u32 },
}

impl Step {
    /// Indices touched by this step
    pub fn indices(&self) -> (usize, Option<usize>) {
        match *self {
            Self::Swap { i, j } => (i, Some(j)),
            Self::Write { index, .. } => (index, None),
        }
    }

    pub fn touches(&self, index: usize) -> bool {
        let (a, b) = self.indices();
        a == index || b == Some(index)
    }

    pub fn is_swap(&self) -> bool {
        matches!(self, Self::Swap { .. })
    }
}

/// Control signal: the active run was asked to stop.
///
/// Not an error. Algorithms propagate it with `?` and the controller turns it
/// into a cancelled [`crate::controller::RunOutcome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

pub type StepResult = Result<(), Cancelled>;

/// Hook invoked after every observable mutation
pub trait StepEmitter: Send + Sync {
    fn on_step(&self, step: Step) -> StepResult;
}

// ─────────────────────────────────────────────────────────────────────────────
// Cancel Signal
// ─────────────────────────────────────────────────────────────────────────────

/// One-shot cancellation flag with a blocking, wakeable wait
#[derive(Clone, Default)]
pub struct CancelSignal {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl CancelSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation and wake any paced wait
    pub fn cancel(&self) {
        let (flag, wake) = &*self.inner;
        *flag.lock() = true;
        wake.notify_all();
    }

    pub fn is_cancelled(&self) -> bool {
        *self.inner.0.lock()
    }

    /// Block for up to `timeout`; returns true if cancelled meanwhile
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let (flag, wake) = &*self.inner;
        if timeout.is_zero() {
            return *flag.lock();
        }
        let deadline = Instant::now() + timeout;
        let mut cancelled = flag.lock();
        while !*cancelled {
            if wake.wait_until(&mut cancelled, deadline).timed_out() {
                break;
            }
        }
        *cancelled
    }
}

impl std::fmt::Debug for CancelSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CancelSignal")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Redraw Signal
// ─────────────────────────────────────────────────────────────────────────────

/// "Redraw requested" published by the run, sampled by the render loop.
///
/// Carries the step count of the current run and the most recent step so the
/// renderer can highlight touched bars without touching the run.
#[derive(Clone, Default)]
pub struct RedrawSignal {
    steps: Arc<AtomicU64>,
    last: Arc<Mutex<Option<Step>>>,
}

impl RedrawSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notify(&self, step: Step) {
        self.steps.fetch_add(1, Ordering::Release);
        *self.last.lock() = Some(step);
    }

    /// Steps published since the last reset
    pub fn steps(&self) -> u64 {
        self.steps.load(Ordering::Acquire)
    }

    pub fn last_step(&self) -> Option<Step> {
        *self.last.lock()
    }

    /// Called by the controller when a new run starts
    pub fn reset(&self) {
        self.steps.store(0, Ordering::Release);
        *self.last.lock() = None;
    }

    /// Forget the highlighted step but keep the count
    pub fn clear_highlight(&self) {
        *self.last.lock() = None;
    }
}

impl std::fmt::Debug for RedrawSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedrawSignal")
            .field("steps", &self.steps())
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Emitters
// ─────────────────────────────────────────────────────────────────────────────

/// Production emitter: signal redraw, then sleep for the pacing delay
#[derive(Debug, Clone)]
pub struct PacedEmitter {
    delay: Duration,
    cancel: CancelSignal,
    redraw: RedrawSignal,
}

impl PacedEmitter {
    pub fn new(delay: Duration, cancel: CancelSignal, redraw: RedrawSignal) -> Self {
        Self {
            delay,
            cancel,
            redraw,
        }
    }
}

impl StepEmitter for PacedEmitter {
    fn on_step(&self, step: Step) -> StepResult {
        self.redraw.notify(step);
        trace!(?step, "step");

        // Checked before sleeping so a cancelled run never pays another delay
        if self.cancel.is_cancelled() || self.cancel.wait_timeout(self.delay) {
            return Err(Cancelled);
        }
        Ok(())
    }
}

/// Test emitter: records every step, never sleeps
#[derive(Debug, Default)]
pub struct RecordingEmitter {
    steps: Mutex<Vec<Step>>,
    cancel_after: Option<usize>,
}

impl RecordingEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel the run once `limit` steps have been recorded
    pub fn cancel_after(limit: usize) -> Self {
        Self {
            steps: Mutex::new(Vec::new()),
            cancel_after: Some(limit),
        }
    }

    pub fn steps(&self) -> Vec<Step> {
        self.steps.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.steps.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn swap_count(&self) -> usize {
        self.steps.lock().iter().filter(|s| s.is_swap()).count()
    }

    pub fn write_count(&self) -> usize {
        self.len() - self.swap_count()
    }
}

impl StepEmitter for RecordingEmitter {
    fn on_step(&self, step: Step) -> StepResult {
        let mut steps = self.steps.lock();
        steps.push(step);
        match self.cancel_after {
            Some(limit) if steps.len() >= limit => Err(Cancelled),
            _ => Ok(()),
        }
    }
}
