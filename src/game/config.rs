use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use super::grid::Grid;

/// Configuration for the console and its game
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the screen canvas in pixels
    pub canvas_width: u32,
    /// Height of the screen canvas in pixels
    pub canvas_height: u32,
    /// Side of one grid cell in pixels
    pub cell_size: u32,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Column of the snake's head when a game starts
    pub start_column: usize,
    /// Points awarded per food eaten
    pub food_reward: u32,
    /// Milliseconds between simulation ticks
    pub tick_ms: u64,
    /// Length of the boot animation after power-on
    pub boot_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_width: 160,
            canvas_height: 144,
            cell_size: 8,
            initial_snake_length: 3,
            start_column: 5,
            food_reward: 10,
            tick_ms: 150,
            boot_ms: 1200,
        }
    }
}

impl GameConfig {
    /// Load a configuration from a JSON file; missing fields keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file {:?}", path))
    }

    /// The cell grid covered by the canvas
    pub fn grid(&self) -> Grid {
        Grid::from_canvas(self.canvas_width, self.canvas_height, self.cell_size)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }

    pub fn boot_duration(&self) -> Duration {
        Duration::from_millis(self.boot_ms)
    }
}
