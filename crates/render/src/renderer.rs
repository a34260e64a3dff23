use lifegrid_kernel::Grid;

/// Renderer-agnostic interface. Reads the grid, produces output, never
/// mutates anything.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given grid.
    fn render(&self, grid: &Grid) -> Self::Output;
}

/// Plain-text frame renderer for terminals and logs.
#[derive(Debug, Clone)]
pub struct TextRenderer {
    pub alive: char,
    pub dead: char,
    /// Print the `generation=.. population=..` line above the cells.
    pub header: bool,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            alive: '#',
            dead: '.',
            header: true,
        }
    }
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Renderer for TextRenderer {
    type Output = String;

    fn render(&self, grid: &Grid) -> String {
        let mut out = String::with_capacity((grid.cols() + 1) * grid.rows() + 64);
        if self.header {
            out.push_str(&format!(
                "generation={} population={} ({}x{})\n",
                grid.generation(),
                grid.population(),
                grid.rows(),
                grid.cols()
            ));
        }
        for row in grid.cells().chunks(grid.cols().max(1)) {
            for cell in row {
                out.push(if cell.is_alive() { self.alive } else { self.dead });
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifegrid_common::CellCoord;

    #[test]
    fn renders_rows_and_header() {
        let grid = Grid::with_alive(2, 3, [CellCoord::new(0, 1), CellCoord::new(1, 2)]);
        let out = TextRenderer::new().render(&grid);
        assert_eq!(out, "generation=0 population=2 (2x3)\n.#.\n..#\n");
    }

    #[test]
    fn custom_glyphs_without_header() {
        let grid = Grid::with_alive(1, 2, [CellCoord::new(0, 0)]);
        let renderer = TextRenderer {
            alive: 'O',
            dead: ' ',
            header: false,
        };
        assert_eq!(renderer.render(&grid), "O \n");
    }

    #[test]
    fn empty_grid_renders_header_only() {
        let grid = Grid::new(0, 0);
        let out = TextRenderer::new().render(&grid);
        assert_eq!(out, "generation=0 population=0 (0x0)\n");
    }
}
