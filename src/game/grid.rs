use super::state::Position;

/// The discrete cell grid every entity lives on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
}

impl Grid {
    /// Create a grid with the given number of cells per axis
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Derive a grid from a pixel canvas, dropping any partial cell at the edges
    ///
    /// A zero cell size is treated as one pixel per cell, and each axis keeps
    /// at least one cell.
    pub fn from_canvas(canvas_width: u32, canvas_height: u32, cell_size: u32) -> Self {
        let cell = cell_size.max(1);
        Self {
            width: (canvas_width / cell).max(1) as usize,
            height: (canvas_height / cell).max(1) as usize,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Check if a position is within the grid bounds
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width as i32 && pos.y >= 0 && pos.y < self.height as i32
    }
}
