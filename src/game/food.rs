use rand::Rng;

use super::grid::Grid;
use super::state::{Position, Snake};

/// Pick a uniformly random cell not covered by the snake
///
/// Returns `None` when the snake fills the whole grid.
pub fn place_food<R: Rng + ?Sized>(grid: &Grid, snake: &Snake, rng: &mut R) -> Option<Position> {
    if snake.body.len() >= grid.cell_count() {
        return None;
    }

    loop {
        let x = rng.gen_range(0..grid.width()) as i32;
        let y = rng.gen_range(0..grid.height()) as i32;
        let pos = Position::new(x, y);

        if !snake.occupies(pos) {
            return Some(pos);
        }
    }
}
