use super::grid::Cell;

/// A direction of travel on the grid.  `Up` decreases y; `Down` increases it.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// The (dx, dy) displacement of a single step
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Can a snake currently heading in `self` turn to `next` without
    /// doubling back on itself?
    pub fn can_turn_to(self, next: Direction) -> bool {
        next != self.opposite()
    }

    /// Move `cell` one step in this direction
    pub fn advance(self, cell: Cell) -> Cell {
        let (dx, dy) = self.offset();
        Cell::new(cell.x + dx, cell.y + dy)
    }
}
