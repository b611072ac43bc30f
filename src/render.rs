//! Drawing a [`Snapshot`] to the terminal
use crate::consts;
use crate::engine::{Cell, Direction, EndCause, RunState, Snapshot};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Margin, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Widget},
};

impl Widget for &Snapshot {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [score_area, board_area, msg_area, hint_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);
        Line::styled(
            format!(" Score: {}  Best: {}", self.score, self.high_score),
            consts::SCORE_BAR_STYLE,
        )
        .render(score_area, buf);

        let block_size = Size {
            width: self
                .grid
                .width()
                .saturating_mul(consts::CELL_WIDTH)
                .saturating_add(2),
            height: self.grid.height().saturating_add(2),
        };
        let block_area = center_rect(board_area, block_size);
        Block::bordered().render(block_area, buf);

        let mut board = Canvas {
            area: block_area.inner(Margin::new(1, 1)),
            buf,
        };
        for &cell in self.body() {
            board.draw_cell(cell, consts::SNAKE_BODY_SYMBOL, consts::SNAKE_BODY_STYLE);
        }
        if let Some(food) = self.food {
            board.draw_cell(food, consts::FOOD_SYMBOL, consts::FOOD_STYLE);
        }
        // Draw the head last so that, if it's a collision, we overwrite
        // whatever it's colliding with
        if let Some(head) = self.head() {
            if self.end_cause == Some(EndCause::SelfCollision) {
                board.draw_cell(head, consts::COLLISION_SYMBOL, consts::COLLISION_STYLE);
            } else {
                board.draw_cell(head, head_symbol(self.direction), consts::SNAKE_HEAD_STYLE);
            }
        }

        match self.state {
            RunState::Idle => {
                Line::from_iter([
                    Span::raw(" Press "),
                    Span::styled("Enter", consts::KEY_STYLE),
                    Span::raw(" to start, "),
                    Span::styled("q", consts::KEY_STYLE),
                    Span::raw(" to quit"),
                ])
                .render(hint_area, buf);
            }
            RunState::Running => {
                Line::from_iter([
                    Span::raw(" Restart ("),
                    Span::styled("r", consts::KEY_STYLE),
                    Span::raw(")  Quit ("),
                    Span::styled("q", consts::KEY_STYLE),
                    Span::raw(")"),
                ])
                .render(hint_area, buf);
            }
            RunState::GameOver => {
                Span::from(format!(" Game Over! Score: {}", self.score)).render(msg_area, buf);
                Line::from_iter([
                    Span::raw(" Play again ("),
                    Span::styled("Enter", consts::KEY_STYLE),
                    Span::raw(")  Quit ("),
                    Span::styled("q", consts::KEY_STYLE),
                    Span::raw(")"),
                ])
                .render(hint_area, buf);
            }
        }
    }
}

/// Return the glyph for the snake's head when it is moving in `direction`
fn head_symbol(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => consts::SNAKE_HEAD_UP_SYMBOL,
        Direction::Down => consts::SNAKE_HEAD_DOWN_SYMBOL,
        Direction::Left => consts::SNAKE_HEAD_LEFT_SYMBOL,
        Direction::Right => consts::SNAKE_HEAD_RIGHT_SYMBOL,
    }
}

/// Return a `Rect` of the given size centered within `area`, shrunk to fit
fn center_rect(area: Rect, size: Size) -> Rect {
    let [area] = Layout::horizontal([size.width])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([size.height])
        .flex(Flex::Center)
        .areas(area);
    area
}

/// The inside of the board, addressed in grid cells
#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    /// Draw `symbol` over the columns belonging to `cell`.  Cells that fall
    /// outside the canvas, such as a head that has just hit a wall, are
    /// skipped.
    fn draw_cell(&mut self, cell: Cell, symbol: &str, style: Style) {
        let (Ok(col), Ok(row)) = (u16::try_from(cell.x), u16::try_from(cell.y)) else {
            return;
        };
        let Some(x) = col
            .checked_mul(consts::CELL_WIDTH)
            .and_then(|dx| self.area.x.checked_add(dx))
        else {
            return;
        };
        let Some(y) = self.area.y.checked_add(row) else {
            return;
        };
        if x >= self.area.right() || y >= self.area.bottom() {
            return;
        }
        let max_width = usize::from(self.area.right() - x);
        let _ = self
            .buf
            .set_stringn(x, y, symbol, max_width, Style::reset().patch(style));
    }
}
