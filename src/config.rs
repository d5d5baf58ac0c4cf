//! Visualizer configuration
//!
//! Loaded from an optional YAML file, then overridden field by field from the
//! command line, then validated once before anything is constructed.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::algorithms::AlgorithmKind;
use crate::error::SortVizError;

/// Default number of bars
pub const DEFAULT_ARRAY_SIZE: usize = 100;
/// Default smallest bar height
pub const DEFAULT_MIN_VALUE: u32 = 50;
/// Default tallest bar height
pub const DEFAULT_MAX_VALUE: u32 = 450;
/// Default sleep after each step (10 ms)
pub const DEFAULT_PACING_DELAY_MS: u64 = 10;
/// Default redraw cadence; same value as the pacing delay but scheduled independently
pub const DEFAULT_RENDER_INTERVAL_MS: u64 = 10;

/// Inclusive range of element values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValueRange {
    pub min: u32,
    pub max: u32,
}

impl Default for ValueRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_VALUE,
            max: DEFAULT_MAX_VALUE,
        }
    }
}

impl ValueRange {
    pub fn new(min: u32, max: u32) -> Result<Self, SortVizError> {
        let range = Self { min, max };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(&self) -> Result<(), SortVizError> {
        if self.min > self.max {
            return Err(SortVizError::invalid_config(format!(
                "value_range is empty (min {} > max {})",
                self.min, self.max
            )));
        }
        Ok(())
    }

    pub fn contains(&self, value: u32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Complete visualizer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VisualizerConfig {
    /// Number of elements, fixed for the lifetime of the array
    pub array_size: usize,
    pub value_range: ValueRange,
    /// Sleep after every step; 0 disables pacing
    pub pacing_delay_ms: u64,
    /// Render loop tick
    pub render_interval_ms: u64,
    /// Algorithm selected at startup
    pub algorithm: AlgorithmKind,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            array_size: DEFAULT_ARRAY_SIZE,
            value_range: ValueRange::default(),
            pacing_delay_ms: DEFAULT_PACING_DELAY_MS,
            render_interval_ms: DEFAULT_RENDER_INTERVAL_MS,
            algorithm: AlgorithmKind::default(),
        }
    }
}

impl VisualizerConfig {
    /// Parse a YAML document (missing keys fall back to defaults)
    pub fn from_yaml_str(yaml: &str) -> Result<Self, SortVizError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Read and parse a YAML config file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, SortVizError> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Reject configurations the visualizer cannot be constructed with
    pub fn validate(&self) -> Result<(), SortVizError> {
        if self.array_size == 0 {
            return Err(SortVizError::invalid_config("array_size must be positive"));
        }
        self.value_range.validate()?;
        if self.render_interval_ms == 0 {
            return Err(SortVizError::invalid_config(
                "render_interval_ms must be positive",
            ));
        }
        Ok(())
    }

    pub fn pacing_delay(&self) -> Duration {
        Duration::from_millis(self.pacing_delay_ms)
    }

    pub fn render_interval(&self) -> Duration {
        Duration::from_millis(self.render_interval_ms)
    }
}
