//! Pannable background grid.
//!
//! Offsets and transformed coordinates saturate at the edges of `i64`.

/// Spacing between grid lines, in pixels.
pub const DEFAULT_CELL_SIZE: i64 = 20;

/// The visible window onto the world, plus grid spacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    /// World x coordinate at the screen's left edge
    pub offset_x: i64,
    /// World y coordinate at the screen's top edge
    pub offset_y: i64,
    pub cell_size: i64,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            offset_x: 0,
            offset_y: 0,
            cell_size: DEFAULT_CELL_SIZE,
        }
    }
}

impl Grid {
    /// Create a grid with the given cell size (at least 1).
    pub fn with_cell_size(cell_size: i64) -> Self {
        Self {
            cell_size: cell_size.max(1),
            ..Self::default()
        }
    }

    /// Move the view by (`dx`, `dy`) world units.
    pub fn pan(&mut self, dx: i64, dy: i64) {
        self.offset_x = self.offset_x.saturating_add(dx);
        self.offset_y = self.offset_y.saturating_add(dy);
    }

    pub fn screen_to_world(&self, (x, y): (i64, i64)) -> (i64, i64) {
        (x.saturating_add(self.offset_x), y.saturating_add(self.offset_y))
    }

    pub fn world_to_screen(&self, (x, y): (i64, i64)) -> (i64, i64) {
        (x.saturating_sub(self.offset_x), y.saturating_sub(self.offset_y))
    }

    /// Screen x positions of vertical grid lines across `width` pixels.
    pub fn vertical_lines(&self, width: i64) -> Vec<i64> {
        self.lines(self.offset_x, width)
    }

    /// Screen y positions of horizontal grid lines across `height` pixels.
    pub fn horizontal_lines(&self, height: i64) -> Vec<i64> {
        self.lines(self.offset_y, height)
    }

    fn lines(&self, offset: i64, extent: i64) -> Vec<i64> {
        let cell = self.cell_size.max(1);
        // First screen position on a world multiple of the cell size
        let first = (cell - offset.rem_euclid(cell)) % cell;
        (first..extent.max(0)).step_by(cell as usize).collect()
    }
}
