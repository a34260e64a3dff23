//! Rendering Adapter: presentation layered on top of cell state.
//!
//! # Invariants
//! - Presentation never mutates the grid.
//! - After a sync, a cell is visible exactly when it is alive.

mod renderer;
mod sprites;

pub use renderer::{Renderer, TextRenderer};
pub use sprites::{CellPresenter, Sprite, SpriteLayer, SpriteLayout};
