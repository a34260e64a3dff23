use lifegrid_common::{CellCoord, ConfigError};

/// A named, fixed arrangement of live cells relative to `(0, 0)`.
///
/// Oscillators are shifted so that no phase needs a negative coordinate.
#[derive(Debug)]
pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(usize, usize)],
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "glider",
        cells: &[(0, 0), (0, 2), (1, 1), (1, 2), (2, 1)],
    },
    Pattern {
        name: "blinker",
        cells: &[(1, 0), (1, 1), (1, 2)],
    },
    Pattern {
        name: "block",
        cells: &[(0, 0), (0, 1), (1, 0), (1, 1)],
    },
    Pattern {
        name: "toad",
        cells: &[(1, 1), (1, 2), (1, 3), (2, 0), (2, 1), (2, 2)],
    },
    Pattern {
        name: "beacon",
        cells: &[(0, 0), (0, 1), (1, 0), (1, 1), (2, 2), (2, 3), (3, 2), (3, 3)],
    },
    Pattern {
        name: "r-pentomino",
        cells: &[(0, 1), (0, 2), (1, 0), (1, 1), (2, 1)],
    },
];

impl Pattern {
    /// Case-insensitive lookup among the built-in patterns.
    pub fn lookup(name: &str) -> Result<&'static Pattern, ConfigError> {
        PATTERNS
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| ConfigError::UnknownPattern(name.to_string()))
    }

    pub fn all() -> &'static [Pattern] {
        PATTERNS
    }

    /// Live coordinates translated by `offset`. Cells whose position would
    /// overflow `usize` are dropped.
    pub fn placed(&self, offset: CellCoord) -> impl Iterator<Item = CellCoord> + '_ {
        self.cells
            .iter()
            .filter_map(move |&cell| CellCoord::from(cell).translate(offset))
    }

    /// `(rows, cols)` of the bounding box anchored at `(0, 0)`.
    pub fn extent(&self) -> (usize, usize) {
        let rows = self.cells.iter().map(|&(r, _)| r + 1).max().unwrap_or(0);
        let cols = self.cells.iter().map(|&(_, c)| c + 1).max().unwrap_or(0);
        (rows, cols)
    }
}
