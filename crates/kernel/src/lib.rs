//! Automaton kernel: the grid of cells and the generation step.
//!
//! # Invariants
//! - Every coordinate in `[0, rows) x [0, cols)` has exactly one cell.
//! - A step computes every next state from the pre-step grid, then commits.
//! - Out-of-range lookups are absent, never errors.

pub mod grid;
pub mod patterns;
pub mod seed;

pub use grid::{Cell, Grid, ScanOrder, StepReport};
pub use patterns::Pattern;
pub use seed::Seeding;
