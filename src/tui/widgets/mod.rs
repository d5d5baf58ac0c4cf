//! TUI Widgets
//!
//! Stateless renderers. They receive copies (snapshot, last step) and never
//! see the controller.

mod bars;

pub use bars::Bars;

/// Common widget utilities
pub mod utils {
    use std::time::Duration;

    /// Format a run duration as MM:SS.mmm
    pub fn format_elapsed(elapsed: Duration) -> String {
        let millis = elapsed.as_millis();
        format!(
            "{:02}:{:02}.{:03}",
            millis / 60_000,
            (millis % 60_000) / 1000,
            millis % 1000
        )
    }
}
