//! Control input: every driver (keyboard, stdin, UI buttons) is mapped onto
//! the same `Action` vocabulary.
//!
//! # Invariants
//! - The simulation consumes actions, never raw input events.

pub mod action;

pub use action::{Action, ActionParseError};
