use super::direction::Direction;
use super::grid::{Cell, GridSize};
use super::{EndCause, RunState};

/// An owned, read-only copy of everything a renderer needs to draw one
/// frame.  Changing it has no effect on the engine it came from.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Snapshot {
    pub grid: GridSize,

    /// Snake cells, head first
    pub snake: Vec<Cell>,

    /// `None` before the first run and when the board is full
    pub food: Option<Cell>,

    pub direction: Direction,
    pub score: u32,
    pub high_score: u32,
    pub state: RunState,

    /// Why the most recent run ended, if it has
    pub end_cause: Option<EndCause>,
}

impl Snapshot {
    pub fn head(&self) -> Option<Cell> {
        self.snake.first().copied()
    }

    /// The body cells after the head
    pub fn body(&self) -> &[Cell] {
        self.snake.get(1..).unwrap_or_default()
    }
}
