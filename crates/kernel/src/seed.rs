use lifegrid_common::{CellCoord, CellState, ConfigError, GridConfig, PatternSpec};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::grid::Grid;
use crate::patterns::Pattern;

/// How a freshly built grid gets its live cells. Chosen once, at
/// construction; the two strategies never mix.
#[derive(Debug, Clone, PartialEq)]
pub enum Seeding {
    /// Each cell is alive with `live_probability`. A fixed `seed` makes the
    /// fill reproducible; without one the RNG is seeded from entropy.
    Random {
        live_probability: f64,
        seed: Option<u64>,
    },
    /// Exactly these cells are alive.
    Pattern(Vec<CellCoord>),
}

impl Seeding {
    pub fn random(live_probability: f64, seed: Option<u64>) -> Self {
        Self::Random {
            live_probability,
            seed,
        }
    }

    pub fn pattern<I>(cells: I) -> Self
    where
        I: IntoIterator<Item = CellCoord>,
    {
        Self::Pattern(cells.into_iter().collect())
    }

    /// Resolve the seeding strategy described by a config. A configured
    /// pattern wins over random fill.
    ///
    /// Pattern cells are shifted by `pattern_offset`; a cell whose shifted
    /// position overflows is skipped like any other cell outside the grid.
    pub fn from_config(config: &GridConfig) -> Result<Self, ConfigError> {
        let offset = config.pattern_offset;
        Ok(match &config.pattern {
            Some(PatternSpec::Named(name)) => {
                let cells = Pattern::lookup(name)?.cells.iter().map(|&c| CellCoord::from(c));
                Self::placed(cells, offset)
            }
            Some(PatternSpec::Cells(cells)) => Self::placed(cells.iter().copied(), offset),
            None => Self::random(config.live_probability, config.seed),
        })
    }

    fn placed(cells: impl Iterator<Item = CellCoord>, offset: CellCoord) -> Self {
        Self::pattern(cells.filter_map(|cell| {
            let shifted = cell.translate(offset);
            if shifted.is_none() {
                tracing::warn!(%cell, %offset, "pattern cell offset past addressable range, skipped");
            }
            shifted
        }))
    }

    /// Build a new grid of the given size seeded with this strategy.
    pub fn build(&self, rows: usize, cols: usize) -> Grid {
        let mut grid = Grid::new(rows, cols);
        match self {
            Seeding::Random {
                live_probability,
                seed,
            } => {
                let p = match *live_probability {
                    p if p.is_nan() => 0.0,
                    p => p.clamp(0.0, 1.0),
                };
                let mut rng = match seed {
                    Some(s) => ChaCha8Rng::seed_from_u64(*s),
                    None => ChaCha8Rng::from_entropy(),
                };
                for row in 0..rows {
                    for col in 0..cols {
                        if rng.gen_bool(p) {
                            grid.set_state(CellCoord::new(row, col), CellState::Alive);
                        }
                    }
                }
            }
            Seeding::Pattern(cells) => {
                for &coord in cells {
                    if !grid.set_state(coord, CellState::Alive) {
                        tracing::warn!(%coord, rows, cols, "pattern cell outside grid, skipped");
                    }
                }
            }
        }
        tracing::info!(rows, cols, population = grid.population(), "grid seeded");
        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_grid() {
        let a = Seeding::random(0.15, Some(42)).build(30, 40);
        let b = Seeding::random(0.15, Some(42)).build(30, 40);
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_diverge() {
        let a = Seeding::random(0.5, Some(1)).build(30, 40);
        let b = Seeding::random(0.5, Some(2)).build(30, 40);
        assert_ne!(a.live_cells(), b.live_cells());
    }

    #[test]
    fn probability_extremes() {
        let none = Seeding::random(0.0, Some(3)).build(10, 10);
        assert_eq!(none.population(), 0);
        let all = Seeding::random(1.0, Some(3)).build(10, 10);
        assert_eq!(all.population(), 100);
    }

    #[test]
    fn random_fill_is_roughly_proportional() {
        let g = Seeding::random(0.15, Some(7)).build(100, 100);
        let density = g.population() as f64 / g.len() as f64;
        assert!((0.12..0.18).contains(&density), "density {density}");
    }

    #[test]
    fn dead_cells_stay_unset_after_random_fill() {
        let g = Seeding::random(0.2, Some(11)).build(10, 10);
        assert!(
            g.cells()
                .iter()
                .all(|c| c.is_alive() || c.state() == CellState::Unset)
        );
    }

    #[test]
    fn pattern_marks_exact_cells_and_skips_outside() {
        let seeding = Seeding::pattern([
            CellCoord::new(0, 0),
            CellCoord::new(1, 1),
            CellCoord::new(9, 9),
        ]);
        let g = seeding.build(3, 3);
        assert_eq!(g.live_cells(), vec![CellCoord::new(0, 0), CellCoord::new(1, 1)]);
    }

    #[test]
    fn from_config_prefers_pattern() {
        let config = GridConfig {
            pattern: Some(PatternSpec::Named("block".into())),
            pattern_offset: CellCoord::new(2, 3),
            ..GridConfig::default()
        };
        let seeding = Seeding::from_config(&config).unwrap();
        assert_eq!(
            seeding,
            Seeding::Pattern(vec![
                CellCoord::new(2, 3),
                CellCoord::new(2, 4),
                CellCoord::new(3, 3),
                CellCoord::new(3, 4),
            ])
        );
    }

    #[test]
    fn from_config_explicit_cells_are_offset() {
        let config = GridConfig {
            pattern: Some(PatternSpec::Cells(vec![CellCoord::new(0, 0)])),
            pattern_offset: CellCoord::new(1, 1),
            ..GridConfig::default()
        };
        let seeding = Seeding::from_config(&config).unwrap();
        assert_eq!(seeding, Seeding::Pattern(vec![CellCoord::new(1, 1)]));
    }

    #[test]
    fn from_config_overflowing_offset_skips_cells() {
        let config = GridConfig::from_yaml_str(
            "pattern: glider\npattern_offset: { row: 18446744073709551615, col: 0 }\n",
        )
        .unwrap();
        assert!(config.validate().is_ok());

        // Only the glider's top row survives the shift; it lands far outside
        // any real grid.
        let seeding = Seeding::from_config(&config).unwrap();
        assert_eq!(
            seeding,
            Seeding::Pattern(vec![
                CellCoord::new(usize::MAX, 0),
                CellCoord::new(usize::MAX, 2),
            ])
        );
        assert_eq!(seeding.build(10, 10).population(), 0);
    }

    #[test]
    fn from_config_unknown_pattern() {
        let config = GridConfig {
            pattern: Some(PatternSpec::Named("nope".into())),
            ..GridConfig::default()
        };
        assert!(matches!(
            Seeding::from_config(&config),
            Err(ConfigError::UnknownPattern(_))
        ));
    }

    #[test]
    fn from_config_random_defaults() {
        let config = GridConfig {
            seed: Some(5),
            ..GridConfig::default()
        };
        assert_eq!(
            Seeding::from_config(&config).unwrap(),
            Seeding::random(0.15, Some(5))
        );
    }
}
