use lifegrid_common::{CellCoord, CellState};
use lifegrid_kernel::Grid;
use serde::Serialize;

/// Grid inspector for developer tooling.
///
/// Read-only queries against a grid for debugging and status output.
pub struct GridInspector;

impl GridInspector {
    pub fn summary(grid: &Grid) -> GridSummary {
        let population = grid.population();
        let density = if grid.is_empty() {
            0.0
        } else {
            population as f64 / grid.len() as f64
        };
        GridSummary {
            generation: grid.generation(),
            rows: grid.rows(),
            cols: grid.cols(),
            population,
            density,
            state_hash: grid.state_hash(),
        }
    }

    /// State and neighborhood of one cell.
    pub fn inspect_cell(grid: &Grid, coord: CellCoord) -> Option<CellInfo> {
        grid.get(coord).map(|cell| CellInfo {
            coord,
            index: cell.index(),
            state: cell.state(),
            neighbors: grid.neighbors(coord).count(),
            live_neighbors: grid.live_neighbor_count(coord),
        })
    }

    /// Live cells in row-major order.
    pub fn list_live(grid: &Grid) -> Vec<CellCoord> {
        grid.live_cells()
    }
}

/// Summary of grid state for the inspector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridSummary {
    pub generation: u64,
    pub rows: usize,
    pub cols: usize,
    pub population: usize,
    pub density: f64,
    pub state_hash: u64,
}

impl std::fmt::Display for GridSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Grid: generation={} size={}x{} population={} density={:.1}% hash={:#018x}",
            self.generation,
            self.rows,
            self.cols,
            self.population,
            self.density * 100.0,
            self.state_hash
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellInfo {
    pub coord: CellCoord,
    pub index: usize,
    pub state: CellState,
    pub neighbors: usize,
    pub live_neighbors: usize,
}

impl std::fmt::Display for CellInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Cell {} #{} state={:?} neighbors={} live={}",
            self.coord, self.index, self.state, self.neighbors, self.live_neighbors
        )
    }
}
