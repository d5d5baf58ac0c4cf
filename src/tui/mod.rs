//! TUI Module - terminal host for the visualizer
//!
//! Architecture:
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     UI LAYER (widgets/, theme.rs)                   │
//! │  Pure rendering from copies: snapshot, last step, step count.       │
//! └─────────────────────────────────────────────────────────────────────┘
//!                               ▲
//!                               │ sampled every render tick
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                 RENDER LOOP (app.rs, events.rs, state.rs)           │
//! │  Fixed interval, independent of pacing. Keys → controller commands. │
//! └─────────────────────────────────────────────────────────────────────┘
//!                               ▲
//!                               │ start / cancel / randomize / select
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      SortController (single writer)                 │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

mod app;
mod events;
mod state;
mod theme;

pub mod widgets;

pub use app::TuiApp;
pub use events::{handle_key_event, Action};
pub use state::{ActivityEvent, ActivityEventType, AppState};
pub use theme::BarTheme;

use crate::config::VisualizerConfig;
use crate::controller::SortController;

/// Run the interactive visualizer
pub async fn run(config: &VisualizerConfig) -> anyhow::Result<()> {
    let controller = SortController::new(config)?;
    let app = TuiApp::new(controller, config.render_interval());
    app.run().await
}
