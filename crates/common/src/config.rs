use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::types::CellCoord;

pub const DEFAULT_ROWS: usize = 30;
pub const DEFAULT_COLS: usize = 40;
pub const DEFAULT_LIVE_PROBABILITY: f64 = 0.15;
pub const DEFAULT_GENERATION_INTERVAL_MS: u64 = 1000;
/// Largest grid a config may ask for (4096 x 4096 cells).
pub const MAX_CELLS: usize = 1 << 24;

/// Errors from building or loading a grid configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("grid dimensions must be positive, got {rows}x{cols}")]
    ZeroDimension { rows: usize, cols: usize },
    #[error("grid of {rows}x{cols} exceeds the limit of {max} cells")]
    TooManyCells { rows: usize, cols: usize, max: usize },
    #[error("live probability must be within [0, 1], got {0}")]
    InvalidProbability(f64),
    #[error("generation interval must be greater than zero")]
    ZeroInterval,
    #[error("unknown pattern: {0}")]
    UnknownPattern(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// How the initial live cells are chosen when no random fill is wanted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PatternSpec {
    /// One of the built-in patterns, by name.
    Named(String),
    /// Explicit list of live coordinates.
    Cells(Vec<CellCoord>),
}

/// Startup configuration. Read once; a running grid is never reconfigured
/// in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub rows: usize,
    pub cols: usize,
    /// Chance that a cell starts alive under random seeding.
    pub live_probability: f64,
    /// RNG seed for reproducible random fills.
    pub seed: Option<u64>,
    pub generation_interval_ms: u64,
    /// Start with automatic stepping suppressed.
    pub manual_update: bool,
    /// Fixed pattern. When set, random seeding is not used.
    pub pattern: Option<PatternSpec>,
    pub pattern_offset: CellCoord,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            live_probability: DEFAULT_LIVE_PROBABILITY,
            seed: None,
            generation_interval_ms: DEFAULT_GENERATION_INTERVAL_MS,
            manual_update: false,
            pattern: None,
            pattern_offset: CellCoord::default(),
        }
    }
}

impl GridConfig {
    /// Load from a file. `.json` files go through serde_json, everything
    /// else is read as YAML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&text)?,
            _ => Self::from_yaml_str(&text)?,
        };
        tracing::debug!(path = %path.display(), "loaded grid config");
        Ok(config)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reject configurations that cannot produce a grid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::ZeroDimension {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if !self.rows.checked_mul(self.cols).is_some_and(|n| n <= MAX_CELLS) {
            return Err(ConfigError::TooManyCells {
                rows: self.rows,
                cols: self.cols,
                max: MAX_CELLS,
            });
        }
        if !(0.0..=1.0).contains(&self.live_probability) {
            return Err(ConfigError::InvalidProbability(self.live_probability));
        }
        if self.generation_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        Ok(())
    }

    pub fn generation_interval(&self) -> Duration {
        Duration::from_millis(self.generation_interval_ms)
    }

    /// Same settings with different dimensions.
    pub fn with_dimensions(&self, rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            ..self.clone()
        }
    }
}
