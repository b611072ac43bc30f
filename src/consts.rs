//! Assorted constants & hard-coded configuration
use crate::engine::Cell;
use ratatui::style::{Color, Modifier, Style};
use std::time::Duration;

/// Milliseconds between movements of the snake in the reference
/// configuration
pub const TICK_MS: u64 = 100;

pub const TICK_PERIOD: Duration = Duration::from_millis(TICK_MS);

/// Default board width in pixels
pub const BOARD_WIDTH_PX: u32 = 400;

/// Default board height in pixels
pub const BOARD_HEIGHT_PX: u32 = 400;

/// Default edge length of one grid cell in pixels
pub const CELL_SIZE_PX: u32 = 20;

/// The snake at the start of every run, head first.  The body trails off in
/// the negative-x direction behind a right-facing head.
pub const INITIAL_SNAKE: [Cell; 3] = [Cell::new(5, 10), Cell::new(4, 10), Cell::new(3, 10)];

/// Points awarded for each piece of food eaten
pub const FOOD_REWARD: u32 = 10;

/// How many random cells to try before falling back to a scan of the free
/// cells when placing food
pub const FOOD_SPAWN_ATTEMPTS: usize = 64;

/// Key under which the high score is persisted
pub const HIGH_SCORE_KEY: &str = "snakeHighScore";

/// Number of terminal columns used to draw a single grid cell
pub const CELL_WIDTH: u16 = 2;

/// Glyphs for the snake's head, drawn facing the direction of travel
pub const SNAKE_HEAD_UP_SYMBOL: &str = "▲▲";
pub const SNAKE_HEAD_DOWN_SYMBOL: &str = "▼▼";
pub const SNAKE_HEAD_LEFT_SYMBOL: &str = "◀▌";
pub const SNAKE_HEAD_RIGHT_SYMBOL: &str = "▐▶";

/// Glyph for the parts of the snake's body
pub const SNAKE_BODY_SYMBOL: &str = "██";

/// Glyph for the food
pub const FOOD_SYMBOL: &str = "()";

/// Glyph for the snake's head when it has run into its own body
pub const COLLISION_SYMBOL: &str = "××";

/// Style for the snake's head
pub const SNAKE_HEAD_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Style for the snake's body
pub const SNAKE_BODY_STYLE: Style = Style::new().fg(Color::LightGreen);

/// Style for the food
pub const FOOD_STYLE: Style = Style::new().fg(Color::LightRed);

/// Style for [`COLLISION_SYMBOL`]
pub const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Style for key codes shown in the interface
pub const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the score bar at the top of the game screen
pub const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);
