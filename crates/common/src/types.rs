use serde::{Deserialize, Serialize};

/// Position of a cell in the grid, row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct CellCoord {
    pub row: usize,
    pub col: usize,
}

impl CellCoord {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Apply a signed offset. Returns `None` if either axis would go negative.
    ///
    /// Upper bounds are not checked here; the grid decides what exists.
    pub fn offset(self, dr: isize, dc: isize) -> Option<Self> {
        Some(Self {
            row: self.row.checked_add_signed(dr)?,
            col: self.col.checked_add_signed(dc)?,
        })
    }

    /// Translate by another coordinate (used to place patterns). Returns
    /// `None` if either axis would overflow.
    pub fn translate(self, by: CellCoord) -> Option<Self> {
        Some(Self {
            row: self.row.checked_add(by.row)?,
            col: self.col.checked_add(by.col)?,
        })
    }

    /// Flat row-major index for a grid with `cols` columns.
    pub fn index(self, cols: usize) -> usize {
        self.row * cols + self.col
    }
}

impl From<(usize, usize)> for CellCoord {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for CellCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Life state of a cell.
///
/// `Unset` is the state a cell is created with. The rules treat it exactly
/// like `Dead`; it only records that the cell has never been committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Unset,
    Alive,
    Dead,
}

impl CellState {
    pub fn is_alive(self) -> bool {
        self == CellState::Alive
    }
}
