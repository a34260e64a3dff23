//! Developer Tooling: read-only grid inspection.

mod inspector;

pub use inspector::{CellInfo, GridInspector, GridSummary};
