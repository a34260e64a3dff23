//! Simulation driver: decides when the grid steps and keeps presentation in
//! step with it.
//!
//! # Invariants
//! - A generation step always runs to completion before control returns.
//! - Manual mode is a gate on timer ticks only; explicit steps always run.
//! - Resizing rebuilds the grid; a live grid is never reshaped in place.

mod history;
mod scheduler;
mod simulation;

pub use history::{StepHistory, StepSample};
pub use scheduler::{MAX_CATCH_UP_TICKS, TickOutcome, TickScheduler};
pub use simulation::{Control, Simulation};
