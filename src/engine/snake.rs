use super::grid::Cell;
use crate::consts;
use std::collections::VecDeque;

/// The snake's cells.
///
/// The head is stored apart from the rest of the body so that a snake can
/// never be empty.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Snake {
    /// The position of the snake's head (index 0)
    head: Cell,

    /// The cells behind the head, from the neck (index 1) to the tail
    body: VecDeque<Cell>,
}

impl Snake {
    /// Create a snake from its cells, head first.  Returns `None` if `cells`
    /// is empty.
    #[cfg(test)]
    pub(crate) fn from_cells<I: IntoIterator<Item = Cell>>(cells: I) -> Option<Snake> {
        let mut iter = cells.into_iter();
        let head = iter.next()?;
        Some(Snake {
            head,
            body: iter.collect(),
        })
    }

    /// The snake every run begins with
    pub(crate) fn initial() -> Snake {
        let [head, body @ ..] = consts::INITIAL_SNAKE;
        Snake {
            head,
            body: VecDeque::from(body),
        }
    }

    pub fn head(&self) -> Cell {
        self.head
    }

    /// The last cell of the snake
    pub fn tail(&self) -> Cell {
        self.body.back().copied().unwrap_or(self.head)
    }

    /// Iterate over all cells, head first
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        std::iter::once(self.head).chain(self.body.iter().copied())
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.head == cell || self.body.contains(&cell)
    }

    /// Does the head overlap any other cell of the snake?
    pub fn bites_itself(&self) -> bool {
        self.body.contains(&self.head)
    }

    /// Make `cell` the new head, keeping every existing cell
    pub(crate) fn push_head(&mut self, cell: Cell) {
        self.body.push_front(self.head);
        self.head = cell;
    }

    /// Remove the last cell, unless the snake consists only of its head
    pub(crate) fn drop_tail(&mut self) {
        let _ = self.body.pop_back();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_layout() {
        let snake = Snake::initial();
        assert_eq!(snake.cells().count(), 3);
        assert_eq!(snake.head(), Cell::new(5, 10));
        assert_eq!(snake.tail(), Cell::new(3, 10));
        assert_eq!(
            snake.cells().collect::<Vec<_>>(),
            [Cell::new(5, 10), Cell::new(4, 10), Cell::new(3, 10)]
        );
    }

    #[test]
    fn from_no_cells() {
        assert_eq!(Snake::from_cells(Vec::new()), None);
    }

    #[test]
    fn push_head_then_drop_tail_keeps_length() {
        let mut snake = Snake::initial();
        snake.push_head(Cell::new(6, 10));
        assert_eq!(snake.cells().count(), 4);
        snake.drop_tail();
        assert_eq!(snake.cells().count(), 3);
        assert_eq!(
            snake.cells().collect::<Vec<_>>(),
            [Cell::new(6, 10), Cell::new(5, 10), Cell::new(4, 10)]
        );
        assert!(!snake.occupies(Cell::new(3, 10)));
    }

    #[test]
    fn lone_head_moves() {
        let mut snake = Snake::from_cells([Cell::new(1, 1)]).unwrap();
        snake.push_head(Cell::new(2, 1));
        snake.drop_tail();
        assert_eq!(snake.cells().count(), 1);
        assert_eq!(snake.head(), Cell::new(2, 1));
        assert_eq!(snake.tail(), Cell::new(2, 1));
    }

    #[test]
    fn bites_itself() {
        let mut snake = Snake::from_cells([
            Cell::new(2, 2),
            Cell::new(2, 3),
            Cell::new(3, 3),
            Cell::new(3, 2),
            Cell::new(3, 1),
        ])
        .unwrap();
        assert!(!snake.bites_itself());
        snake.push_head(Cell::new(3, 2));
        snake.drop_tail();
        assert!(snake.bites_itself());
    }
}
