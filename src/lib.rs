//! Sortviz - animated in-place sorting in the terminal
//!
//! Layers, leaf first:
//! - [`array_state`]: fixed-length atomic buffer with copy snapshots
//! - [`step`]: the emitter hook called after every mutation (pacing, redraw, cancel)
//! - [`algorithms`]: five sorts written only against the instrumented buffer
//! - [`controller`]: single-writer run lifecycle
//! - [`tui`]: fixed-interval render loop and key handling

pub mod algorithms;
pub mod array_state;
pub mod config;
pub mod controller;
pub mod error;
pub mod step;
pub mod tui;

pub use algorithms::{AlgorithmKind, SortBuffer};
pub use array_state::{ArrayState, Snapshot};
pub use config::{ValueRange, VisualizerConfig};
pub use controller::{ControllerState, RunOutcome, SortController};
pub use error::{FixSuggestion, SortVizError};
pub use step::{
    CancelSignal, Cancelled, PacedEmitter, RecordingEmitter, RedrawSignal, Step, StepEmitter,
    StepResult,
};
