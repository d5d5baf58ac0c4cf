//! Error types with fix suggestions

use thiserror::Error;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

/// All errors surfaced by the visualizer.
///
/// Cancelling a run is not an error; see [`crate::step::Cancelled`].
#[derive(Error, Debug)]
pub enum SortVizError {
    // ─────────────────────────────────────────────────────────────
    // Construction (SV-010 to SV-012)
    // ─────────────────────────────────────────────────────────────
    #[error("SV-010: Invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    #[error("SV-011: Config parse error: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    #[error("SV-012: IO error: {0}")]
    Io(#[from] std::io::Error),

    // ─────────────────────────────────────────────────────────────
    // Runtime commands (SV-020)
    // ─────────────────────────────────────────────────────────────
    #[error("SV-020: Cannot {operation} while a sort is running")]
    InvalidOperation { operation: &'static str },
}

impl SortVizError {
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}

impl FixSuggestion for SortVizError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            SortVizError::InvalidConfiguration { .. } => {
                Some("Use a positive array size and a value range with min <= max")
            }
            SortVizError::ConfigParse(_) => {
                Some("Check YAML syntax and keys: array_size, value_range, pacing_delay_ms, render_interval_ms, algorithm")
            }
            SortVizError::Io(_) => Some("Check file path and permissions"),
            SortVizError::InvalidOperation { .. } => {
                Some("Wait for the current run to finish or cancel it first")
            }
        }
    }
}
