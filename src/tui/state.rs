//! AppState - view state of the terminal UI
//!
//! Holds only what the controller does not: the activity log, elapsed-time
//! bookkeeping and the quit flag. Everything about the array and the run is
//! read from the controller on each tick.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::controller::{ControllerState, RunOutcome, SortController};
use crate::error::SortVizError;

/// Main application state
#[derive(Debug)]
pub struct AppState {
    // Activity log
    pub events: VecDeque<ActivityEvent>,
    pub max_events: usize,

    // Run timing
    pub run_started: Option<Instant>,
    pub elapsed: Duration,

    // Last observed controller state, to detect transitions between ticks
    pub observed: ControllerState,
    pub last_reported_run: Option<u64>,

    pub should_quit: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            events: VecDeque::new(),
            max_events: 50,
            run_started: None,
            elapsed: Duration::ZERO,
            observed: ControllerState::Idle,
            last_reported_run: None,
            should_quit: false,
        }
    }
}

impl AppState {
    /// Add an activity event, newest first
    pub fn push_event(&mut self, event: ActivityEvent) {
        self.events.push_front(event);
        if self.events.len() > self.max_events {
            self.events.pop_back();
        }
    }

    /// Sync with the controller once per render tick
    pub fn observe(&mut self, controller: &SortController) {
        let state = controller.state();
        if state == ControllerState::Running && self.observed == ControllerState::Idle {
            self.run_started = Some(Instant::now());
        }
        self.observed = state;

        if let Some(start) = self.run_started {
            if state == ControllerState::Running {
                self.elapsed = start.elapsed();
            }
        }

        if let Some(outcome) = controller.last_outcome() {
            if self.last_reported_run != Some(outcome.run_id) {
                self.last_reported_run = Some(outcome.run_id);
                self.elapsed = Duration::from_millis(outcome.elapsed_ms);
                self.push_event(ActivityEvent::finished(&outcome));
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Activity Events
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct ActivityEvent {
    pub event_type: ActivityEventType,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityEventType {
    Info,
    RunStarted,
    RunCompleted,
    RunCancelled,
    Rejected,
}

impl ActivityEvent {
    fn new(event_type: ActivityEventType, message: impl Into<String>) -> Self {
        Self {
            event_type,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(ActivityEventType::Info, message)
    }

    pub fn run_started(algorithm: &str) -> Self {
        Self::new(ActivityEventType::RunStarted, format!("Started {}", algorithm))
    }

    pub fn finished(outcome: &RunOutcome) -> Self {
        if outcome.cancelled {
            Self::new(
                ActivityEventType::RunCancelled,
                format!(
                    "{} cancelled after {} steps",
                    outcome.algorithm, outcome.steps
                ),
            )
        } else {
            Self::new(
                ActivityEventType::RunCompleted,
                format!(
                    "{} completed: {} steps in {} ms",
                    outcome.algorithm, outcome.steps, outcome.elapsed_ms
                ),
            )
        }
    }

    pub fn rejected(error: &SortVizError) -> Self {
        Self::new(ActivityEventType::Rejected, error.to_string())
    }

    pub fn icon(&self) -> &'static str {
        match self.event_type {
            ActivityEventType::Info => "ℹ",
            ActivityEventType::RunStarted => "▶",
            ActivityEventType::RunCompleted => "✔",
            ActivityEventType::RunCancelled => "■",
            ActivityEventType::Rejected => "✖",
        }
    }
}
