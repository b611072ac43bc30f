use super::grid::{Cell, GridSize};
use super::snake::Snake;
use crate::consts;
use rand::{seq::IteratorRandom, Rng};

/// Pick a cell for the next piece of food that is not covered by `snake`.
///
/// Uniformly random cells are tried first, which almost always succeeds
/// while the snake is short.  Once [`consts::FOOD_SPAWN_ATTEMPTS`] samples
/// have all landed on the snake, a random cell is chosen from a scan of the
/// remaining free cells instead.  Returns `None` when the snake covers the
/// whole grid.
pub(crate) fn spawn_food<R: Rng>(rng: &mut R, grid: GridSize, snake: &Snake) -> Option<Cell> {
    let width = i32::from(grid.width());
    let height = i32::from(grid.height());
    for _ in 0..consts::FOOD_SPAWN_ATTEMPTS {
        let cell = Cell::new(rng.random_range(0..width), rng.random_range(0..height));
        if !snake.occupies(cell) {
            return Some(cell);
        }
    }
    grid.cells().filter(|&c| !snake.occupies(c)).choose(rng)
}
