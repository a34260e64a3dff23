//! Shared types for the lifegrid workspace: cell coordinates and states,
//! startup configuration, configuration errors.

pub mod config;
pub mod types;

pub use config::{ConfigError, GridConfig, PatternSpec};
pub use types::{CellCoord, CellState};
