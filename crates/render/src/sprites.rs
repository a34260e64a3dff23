use lifegrid_common::CellCoord;
use lifegrid_kernel::Grid;

/// Anything that shows one visual per cell and can toggle its visibility.
///
/// The simulation calls `sync` after every committed generation. The
/// presenter only ever learns "visible or not".
pub trait CellPresenter {
    /// Drop all visuals and lay out a fresh `rows x cols` set, all hidden.
    fn reset(&mut self, rows: usize, cols: usize);

    /// Show or hide the visual for `coord`. Out-of-range coordinates are ignored.
    fn set_visible(&mut self, coord: CellCoord, visible: bool);

    /// Make every cell visible exactly when it is alive.
    fn sync(&mut self, grid: &Grid) {
        for cell in grid.cells() {
            self.set_visible(cell.coord(), cell.is_alive());
        }
    }
}

/// Screen placement of cell sprites, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteLayout {
    pub cell_width: f32,
    pub cell_height: f32,
    pub x_offset: f32,
    pub y_offset: f32,
}

impl Default for SpriteLayout {
    fn default() -> Self {
        Self {
            cell_width: 20.0,
            cell_height: 20.0,
            x_offset: 1.0,
            y_offset: 1.0,
        }
    }
}

impl SpriteLayout {
    /// Top-left corner of the sprite for `coord`.
    pub fn position(&self, coord: CellCoord) -> (f32, f32) {
        (
            self.x_offset + coord.col as f32 * self.cell_width,
            self.y_offset + coord.row as f32 * self.cell_height,
        )
    }

    /// Pixel size needed to show a `rows x cols` grid.
    pub fn canvas_size(&self, rows: usize, cols: usize) -> (f32, f32) {
        (
            self.x_offset + cols as f32 * self.cell_width,
            self.y_offset + rows as f32 * self.cell_height,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub x: f32,
    pub y: f32,
    pub visible: bool,
}

/// In-memory sprite sheet: one positioned sprite per cell.
#[derive(Debug, Clone, Default)]
pub struct SpriteLayer {
    layout: SpriteLayout,
    rows: usize,
    cols: usize,
    sprites: Vec<Sprite>,
}

impl SpriteLayer {
    pub fn new(layout: SpriteLayout) -> Self {
        Self {
            layout,
            ..Self::default()
        }
    }

    pub fn layout(&self) -> SpriteLayout {
        self.layout
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn sprite(&self, coord: CellCoord) -> Option<&Sprite> {
        if coord.row < self.rows && coord.col < self.cols {
            self.sprites.get(coord.index(self.cols))
        } else {
            None
        }
    }

    pub fn sprites(&self) -> &[Sprite] {
        &self.sprites
    }

    pub fn visible_count(&self) -> usize {
        self.sprites.iter().filter(|s| s.visible).count()
    }
}

impl CellPresenter for SpriteLayer {
    fn reset(&mut self, rows: usize, cols: usize) {
        self.rows = rows;
        self.cols = cols;
        self.sprites.clear();
        self.sprites.reserve(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                let (x, y) = self.layout.position(CellCoord::new(row, col));
                self.sprites.push(Sprite {
                    x,
                    y,
                    visible: false,
                });
            }
        }
        tracing::debug!(rows, cols, "sprite layer reset");
    }

    fn set_visible(&mut self, coord: CellCoord, visible: bool) {
        if coord.row < self.rows && coord.col < self.cols {
            self.sprites[coord.index(self.cols)].visible = visible;
        }
    }
}
