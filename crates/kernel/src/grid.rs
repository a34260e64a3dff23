use lifegrid_common::{CellCoord, CellState};
use serde::{Deserialize, Serialize};

/// Relative positions of the eight neighbors, row-major.
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// One cell of the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    coord: CellCoord,
    index: usize,
    state: CellState,
    /// Only meaningful between the compute and commit phases of a step.
    next_state: CellState,
}

impl Cell {
    fn new(coord: CellCoord, cols: usize) -> Self {
        Self {
            coord,
            index: coord.index(cols),
            state: CellState::Unset,
            next_state: CellState::Unset,
        }
    }

    pub fn coord(&self) -> CellCoord {
        self.coord
    }

    /// Flat row-major index.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn state(&self) -> CellState {
        self.state
    }

    pub fn next_state(&self) -> CellState {
        self.next_state
    }

    pub fn is_alive(&self) -> bool {
        self.state.is_alive()
    }
}

/// Order in which the compute phase visits cells.
///
/// The committed result is the same for every order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanOrder {
    #[default]
    RowMajor,
    Reverse,
}

/// Counts produced by one generation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepReport {
    pub generation: u64,
    pub births: usize,
    pub deaths: usize,
    pub population: usize,
}

/// Birth/survival rule for a single cell.
///
/// `Unset` and `Dead` behave identically.
pub fn next_state(current: CellState, live_neighbors: usize) -> CellState {
    match (current, live_neighbors) {
        (CellState::Alive, 2 | 3) => CellState::Alive,
        (CellState::Alive, _) => CellState::Dead,
        (_, 3) => CellState::Alive,
        _ => CellState::Dead,
    }
}

/// Fixed-size rectangular grid of cells, stored row-major.
///
/// No wraparound: cells on the border simply have fewer neighbors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    generation: u64,
}

impl Grid {
    /// Create a grid with every cell `Unset`. Zero dimensions give an empty grid.
    ///
    /// # Panics
    ///
    /// Panics if `rows * cols` overflows `usize`. Configs are bounded by
    /// `GridConfig::validate` before they reach here.
    pub fn new(rows: usize, cols: usize) -> Self {
        let Some(len) = rows.checked_mul(cols) else {
            panic!("grid of {rows}x{cols} cells overflows usize");
        };
        let mut cells = Vec::with_capacity(len);
        for row in 0..rows {
            for col in 0..cols {
                cells.push(Cell::new(CellCoord::new(row, col), cols));
            }
        }
        Self {
            rows,
            cols,
            cells,
            generation: 0,
        }
    }

    /// Create a grid and mark the given coordinates alive. Coordinates outside
    /// the grid are ignored.
    pub fn with_alive<I, C>(rows: usize, cols: usize, alive: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<CellCoord>,
    {
        let mut grid = Self::new(rows, cols);
        for coord in alive {
            grid.set_state(coord.into(), CellState::Alive);
        }
        grid
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of cells (`rows * cols`).
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Completed generation steps since construction or the last `clear`.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn contains(&self, coord: CellCoord) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    /// Cell at `coord`, or `None` outside the grid.
    pub fn get(&self, coord: CellCoord) -> Option<&Cell> {
        if self.contains(coord) {
            self.cells.get(coord.index(self.cols))
        } else {
            None
        }
    }

    /// Signed lookup; negative positions are simply absent.
    pub fn get_at(&self, row: isize, col: isize) -> Option<&Cell> {
        CellCoord::new(0, 0)
            .offset(row, col)
            .and_then(|coord| self.get(coord))
    }

    pub fn state(&self, coord: CellCoord) -> Option<CellState> {
        self.get(coord).map(Cell::state)
    }

    /// Returns false if `coord` is outside the grid.
    pub fn set_state(&mut self, coord: CellCoord, state: CellState) -> bool {
        if !self.contains(coord) {
            return false;
        }
        let idx = coord.index(self.cols);
        self.cells[idx].state = state;
        true
    }

    /// Flip a cell between alive and dead. Returns the new state.
    pub fn toggle(&mut self, coord: CellCoord) -> Option<CellState> {
        let current = self.state(coord)?;
        let flipped = if current.is_alive() {
            CellState::Dead
        } else {
            CellState::Alive
        };
        self.set_state(coord, flipped);
        Some(flipped)
    }

    /// Reset every cell to `Unset` and the generation counter to zero.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.state = CellState::Unset;
            cell.next_state = CellState::Unset;
        }
        self.generation = 0;
    }

    /// The in-bounds cells around `coord`, excluding `coord` itself, in
    /// row-major offset order. Between 0 and 8 items.
    pub fn neighbors(&self, coord: CellCoord) -> impl Iterator<Item = &Cell> + '_ {
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(move |&(dr, dc)| coord.offset(dr, dc).and_then(|c| self.get(c)))
    }

    pub fn live_neighbor_count(&self, coord: CellCoord) -> usize {
        self.neighbors(coord).filter(|c| c.is_alive()).count()
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    /// Coordinates of live cells, row-major.
    pub fn live_cells(&self) -> Vec<CellCoord> {
        self.cells
            .iter()
            .filter(|c| c.is_alive())
            .map(Cell::coord)
            .collect()
    }

    /// Advance one generation, computing in row-major order.
    pub fn step(&mut self) -> StepReport {
        self.step_in_order(ScanOrder::RowMajor)
    }

    /// Advance one generation.
    ///
    /// Phase one writes every cell's `next_state` while reading only `state`.
    /// Phase two commits `next_state` into `state` and resets it to `Unset`.
    pub fn step_in_order(&mut self, order: ScanOrder) -> StepReport {
        let _span = tracing::info_span!("grid_step", generation = self.generation).entered();

        let len = self.cells.len();
        match order {
            ScanOrder::RowMajor => (0..len).for_each(|idx| self.compute_next(idx)),
            ScanOrder::Reverse => (0..len).rev().for_each(|idx| self.compute_next(idx)),
        }

        let mut births = 0;
        let mut deaths = 0;
        for cell in &mut self.cells {
            let was_alive = cell.state.is_alive();
            cell.state = if cell.next_state.is_alive() {
                CellState::Alive
            } else {
                CellState::Dead
            };
            cell.next_state = CellState::Unset;
            match (was_alive, cell.state.is_alive()) {
                (false, true) => births += 1,
                (true, false) => deaths += 1,
                _ => {}
            }
        }
        self.generation += 1;

        let report = StepReport {
            generation: self.generation,
            births,
            deaths,
            population: self.population(),
        };
        tracing::debug!(
            generation = report.generation,
            births,
            deaths,
            population = report.population,
            "generation committed"
        );
        report
    }

    fn compute_next(&mut self, idx: usize) {
        let cell = &self.cells[idx];
        let next = next_state(cell.state, self.live_neighbor_count(cell.coord));
        self.cells[idx].next_state = next;
    }

    /// Deterministic FNV-1a hash of dimensions, generation and live cells.
    pub fn state_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325;
        let mix = |h: &mut u64, bytes: &[u8]| {
            for &b in bytes {
                *h ^= b as u64;
                *h = h.wrapping_mul(0x0100_0000_01b3);
            }
        };
        mix(&mut h, &(self.rows as u64).to_le_bytes());
        mix(&mut h, &(self.cols as u64).to_le_bytes());
        mix(&mut h, &self.generation.to_le_bytes());
        for cell in self.cells.iter().filter(|c| c.is_alive()) {
            mix(&mut h, &(cell.index as u64).to_le_bytes());
        }
        h
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::Seeding;

    fn c(row: usize, col: usize) -> CellCoord {
        CellCoord::new(row, col)
    }

    fn grid(rows: usize, cols: usize, alive: &[(usize, usize)]) -> Grid {
        Grid::with_alive(rows, cols, alive.iter().copied())
    }

    #[test]
    fn new_grid_is_row_major_and_unset() {
        let g = Grid::new(3, 4);
        assert_eq!(g.len(), 12);
        for (i, cell) in g.cells().iter().enumerate() {
            assert_eq!(cell.index(), i);
            assert_eq!(cell.coord(), c(i / 4, i % 4));
            assert_eq!(cell.state(), CellState::Unset);
        }
    }

    #[test]
    #[should_panic(expected = "overflows usize")]
    fn overflowing_dimensions_panic_before_allocating() {
        Grid::new(usize::MAX, 2);
    }

    #[test]
    fn out_of_range_lookup_is_absent() {
        let g = Grid::new(3, 3);
        assert!(g.get(c(3, 0)).is_none());
        assert!(g.get(c(0, 3)).is_none());
        assert!(g.get_at(-1, 0).is_none());
        assert!(g.get_at(0, -1).is_none());
        assert!(g.get_at(2, 2).is_some());
    }

    #[test]
    fn interior_cells_have_eight_neighbors() {
        let g = Grid::new(5, 6);
        for row in 1..4 {
            for col in 1..5 {
                assert_eq!(g.neighbors(c(row, col)).count(), 8, "at ({row}, {col})");
            }
        }
    }

    #[test]
    fn corner_cells_have_three_neighbors() {
        let g = Grid::new(5, 6);
        for corner in [c(0, 0), c(0, 5), c(4, 0), c(4, 5)] {
            assert_eq!(g.neighbors(corner).count(), 3, "at {corner}");
        }
    }

    #[test]
    fn edge_cells_have_five_neighbors() {
        let g = Grid::new(5, 6);
        for col in 1..5 {
            assert_eq!(g.neighbors(c(0, col)).count(), 5);
            assert_eq!(g.neighbors(c(4, col)).count(), 5);
        }
        for row in 1..4 {
            assert_eq!(g.neighbors(c(row, 0)).count(), 5);
            assert_eq!(g.neighbors(c(row, 5)).count(), 5);
        }
    }

    #[test]
    fn neighbors_are_in_row_major_offset_order() {
        let g = Grid::new(3, 3);
        let coords: Vec<CellCoord> = g.neighbors(c(1, 1)).map(Cell::coord).collect();
        assert_eq!(
            coords,
            vec![c(0, 0), c(0, 1), c(0, 2), c(1, 0), c(1, 2), c(2, 0), c(2, 1), c(2, 2)]
        );
        let corner: Vec<CellCoord> = g.neighbors(c(0, 0)).map(Cell::coord).collect();
        assert_eq!(corner, vec![c(0, 1), c(1, 0), c(1, 1)]);
    }

    #[test]
    fn tiny_grids_are_valid() {
        let mut empty = Grid::new(0, 0);
        assert!(empty.is_empty());
        let report = empty.step();
        assert_eq!(report.population, 0);
        assert_eq!(empty.generation(), 1);

        let mut single = grid(1, 1, &[(0, 0)]);
        assert_eq!(single.neighbors(c(0, 0)).count(), 0);
        assert_eq!(single.live_neighbor_count(c(0, 0)), 0);
        single.step();
        assert_eq!(single.state(c(0, 0)), Some(CellState::Dead));
    }

    #[test]
    fn live_neighbor_count_ignores_self() {
        let g = grid(3, 3, &[(1, 1), (0, 0), (2, 2)]);
        assert_eq!(g.live_neighbor_count(c(1, 1)), 2);
        assert_eq!(g.live_neighbor_count(c(0, 1)), 2);
    }

    #[test]
    fn rule_table() {
        for n in 0..=8 {
            let survive = next_state(CellState::Alive, n);
            let born = next_state(CellState::Dead, n);
            let born_unset = next_state(CellState::Unset, n);
            assert_eq!(survive.is_alive(), n == 2 || n == 3, "alive with {n}");
            assert_eq!(born.is_alive(), n == 3, "dead with {n}");
            assert_eq!(born_unset, born, "unset with {n}");
        }
    }

    /// Center of a 5x5 grid with the first `k` neighbor offsets alive.
    fn center_with_neighbors(center_alive: bool, k: usize) -> Grid {
        let center = c(2, 2);
        let mut g = Grid::new(5, 5);
        if center_alive {
            g.set_state(center, CellState::Alive);
        }
        for &(dr, dc) in NEIGHBOR_OFFSETS.iter().take(k) {
            g.set_state(center.offset(dr, dc).unwrap(), CellState::Alive);
        }
        g
    }

    #[test]
    fn birth_needs_exactly_three() {
        for (k, expect) in [(2, false), (3, true), (4, false)] {
            let mut g = center_with_neighbors(false, k);
            assert_eq!(g.live_neighbor_count(c(2, 2)), k);
            g.step();
            assert_eq!(g.get(c(2, 2)).unwrap().is_alive(), expect, "k={k}");
        }
    }

    #[test]
    fn survival_needs_two_or_three() {
        for k in 0..=8 {
            let mut g = center_with_neighbors(true, k);
            g.step();
            assert_eq!(
                g.get(c(2, 2)).unwrap().is_alive(),
                k == 2 || k == 3,
                "k={k}"
            );
        }
    }

    #[test]
    fn blinker_has_period_two() {
        let horizontal: &[(usize, usize)] = &[(2, 1), (2, 2), (2, 3)];
        let mut g = grid(5, 5, horizontal);
        let start = g.live_cells();

        let report = g.step();
        assert_eq!(g.live_cells(), vec![c(1, 2), c(2, 2), c(3, 2)]);
        assert_eq!(report.births, 2);
        assert_eq!(report.deaths, 2);
        assert_eq!(report.population, 3);

        g.step();
        assert_eq!(g.live_cells(), start);
    }

    #[test]
    fn block_is_still_life() {
        let mut g = grid(6, 6, &[(2, 2), (2, 3), (3, 2), (3, 3)]);
        let start = g.live_cells();
        for _ in 0..20 {
            let report = g.step();
            assert_eq!(report.births + report.deaths, 0);
            assert_eq!(g.live_cells(), start);
        }
    }

    #[test]
    fn commit_resets_next_state_and_marks_dead() {
        let mut g = grid(4, 4, &[(1, 1), (1, 2), (2, 1)]);
        g.step();
        for cell in g.cells() {
            assert_eq!(cell.next_state(), CellState::Unset);
            assert_ne!(cell.state(), CellState::Unset);
        }
        assert_eq!(g.generation(), 1);
    }

    #[test]
    fn scan_order_does_not_change_result() {
        for seed in 0..8 {
            let start = Seeding::random(0.35, Some(seed)).build(20, 17);
            let mut forward = start.clone();
            let mut backward = start.clone();
            for _ in 0..5 {
                forward.step_in_order(ScanOrder::RowMajor);
                backward.step_in_order(ScanOrder::Reverse);
                assert_eq!(forward, backward, "seed {seed}");
            }
        }
    }

    #[test]
    fn in_place_update_would_differ() {
        // Writing states directly during the scan lets later cells see
        // already-updated neighbors.
        fn naive(grid: &mut Grid) {
            for idx in 0..grid.len() {
                let cell = &grid.cells[idx];
                let next = next_state(cell.state, grid.live_neighbor_count(cell.coord));
                grid.cells[idx].state = next;
            }
        }

        let start = grid(5, 5, &[(2, 1), (2, 2), (2, 3)]);
        let mut correct = start.clone();
        let mut wrong = start;
        correct.step();
        naive(&mut wrong);
        assert_ne!(correct.live_cells(), wrong.live_cells());
    }

    #[test]
    fn stepping_same_snapshot_is_deterministic() {
        let snapshot = Seeding::random(0.3, Some(99)).build(16, 16);
        let mut a = snapshot.clone();
        let mut b = snapshot.clone();
        for _ in 0..10 {
            a.step();
            b.step();
        }
        assert_eq!(a, b);
        assert_eq!(a.state_hash(), b.state_hash());
    }

    #[test]
    fn state_hash_tracks_live_set() {
        let a = grid(4, 4, &[(0, 0)]);
        let b = grid(4, 4, &[(0, 1)]);
        assert_ne!(a.state_hash(), b.state_hash());
        assert_eq!(a.state_hash(), a.clone().state_hash());
    }

    #[test]
    fn toggle_and_clear() {
        let mut g = Grid::new(2, 2);
        assert_eq!(g.toggle(c(0, 0)), Some(CellState::Alive));
        assert_eq!(g.toggle(c(0, 0)), Some(CellState::Dead));
        assert_eq!(g.toggle(c(5, 5)), None);
        assert!(!g.set_state(c(2, 0), CellState::Alive));

        g.set_state(c(1, 1), CellState::Alive);
        g.step();
        g.clear();
        assert_eq!(g.generation(), 0);
        assert!(g.cells().iter().all(|cell| cell.state() == CellState::Unset));
    }
}
