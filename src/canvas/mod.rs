//! Freeform placement canvas.
//!
//! A pannable grid on which named boxes are dropped at arbitrary positions.
//! Boxes live in world coordinates; the grid offset maps them to the screen.

mod grid;

pub use grid::{Grid, DEFAULT_CELL_SIZE};

use crate::circuit::{COMPONENT_WIDTH, MIN_COMPONENT_HEIGHT};

/// Longest label a placed box keeps.
pub const MAX_LABEL_LEN: usize = 16;

/// A named box placed on the canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedBox {
    pub name: String,
    /// Centre in world coordinates
    pub world: (i64, i64),
}

/// Screen-space rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

/// Grid plus the boxes placed on it.
#[derive(Debug, Clone, Default)]
pub struct Canvas {
    pub grid: Grid,
    boxes: Vec<PlacedBox>,
}

impl Canvas {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            boxes: Vec::new(),
        }
    }

    /// Place a box centred on a screen position. Long names are cut to [`MAX_LABEL_LEN`] characters.
    pub fn place(&mut self, screen: (i64, i64), name: &str) -> &PlacedBox {
        let name: String = name.chars().take(MAX_LABEL_LEN).collect();
        let world = self.grid.screen_to_world(screen);
        self.boxes.push(PlacedBox { name, world });
        &self.boxes[self.boxes.len() - 1]
    }

    pub fn boxes(&self) -> &[PlacedBox] {
        &self.boxes
    }

    /// Where a box appears on screen under the current offset.
    pub fn screen_rect(&self, placed: &PlacedBox) -> Rect {
        let (sx, sy) = self.grid.world_to_screen(placed.world);
        Rect {
            x: sx.saturating_sub(COMPONENT_WIDTH / 2),
            y: sy.saturating_sub(MIN_COMPONENT_HEIGHT / 2),
            width: COMPONENT_WIDTH,
            height: MIN_COMPONENT_HEIGHT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boxes_stay_put_in_world_when_panning() {
        let mut canvas = Canvas::default();
        canvas.grid.pan(40, -20);
        let placed = canvas.place((100, 100), "adder").clone();
        assert_eq!(placed.world, (140, 80));
        assert_eq!(
            canvas.screen_rect(&placed),
            Rect { x: 70, y: 85, width: 60, height: 30 }
        );

        canvas.grid.pan(10, 0);
        assert_eq!(canvas.screen_rect(&placed).x, 60);
    }

    #[test]
    fn test_labels_are_truncated() {
        let mut canvas = Canvas::default();
        let placed = canvas.place((0, 0), "a-very-long-component-name");
        assert_eq!(placed.name, "a-very-long-comp");
        assert_eq!(canvas.boxes().len(), 1);
    }

    #[test]
    fn test_far_away_boxes_saturate() {
        let mut canvas = Canvas::default();
        canvas.grid.pan(i64::MIN, 0);
        let placed = canvas.place((-100, 0), "far").clone();
        assert_eq!(placed.world, (i64::MIN, 0));

        canvas.grid.pan(i64::MAX, 0);
        let rect = canvas.screen_rect(&placed);
        assert_eq!(rect.x, i64::MIN);
        assert_eq!(rect.y, -15);
    }
}
