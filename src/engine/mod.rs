//! The game-state update engine
mod direction;
mod food;
mod grid;
mod snake;
mod snapshot;
pub use self::direction::Direction;
pub use self::grid::{Cell, GridError, GridSize};
pub use self::snake::Snake;
pub use self::snapshot::Snapshot;
use self::food::spawn_food;
use crate::consts;
use crate::storage::HighScoreStore;
use rand::Rng;
use std::fmt;

/// The complete state of one game of snake.
///
/// The engine knows nothing about time: whatever drives it calls
/// [`GameEngine::tick()`] once per period while the game is running and
/// forwards player input through [`GameEngine::set_direction()`],
/// [`GameEngine::start()`], and [`GameEngine::restart()`].  Calls that make
/// no sense in the current [`RunState`] are ignored.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GameEngine<S, R = rand::rngs::ThreadRng> {
    grid: GridSize,
    snake: Snake,
    food: Option<Cell>,

    /// The direction the snake moved in on the last tick
    direction: Direction,

    /// The direction the snake will move in on the next tick
    pending_direction: Direction,

    score: u32,
    high_score: u32,
    state: RunState,
    end_cause: Option<EndCause>,
    store: S,
    rng: R,
}

impl<S: HighScoreStore> GameEngine<S, rand::rngs::ThreadRng> {
    pub fn new(grid: GridSize, store: S) -> Self {
        GameEngine::with_rng(grid, store, rand::rng())
    }
}

impl<S: HighScoreStore, R: Rng> GameEngine<S, R> {
    /// Create an idle engine, reading the high score from `store`
    pub fn with_rng(grid: GridSize, mut store: S, rng: R) -> GameEngine<S, R> {
        let high_score = store.load_high_score();
        GameEngine {
            grid,
            snake: Snake::initial(),
            food: None,
            direction: Direction::Right,
            pending_direction: Direction::Right,
            score: 0,
            high_score,
            state: RunState::Idle,
            end_cause: None,
            store,
            rng,
        }
    }

    /// Begin a new run from the starting layout.  Returns `false` without
    /// changing anything if a run is already in progress.
    pub fn start(&mut self) -> bool {
        if self.running() {
            return false;
        }
        self.score = 0;
        self.direction = Direction::Right;
        self.pending_direction = Direction::Right;
        self.snake = Snake::initial();
        self.end_cause = None;
        self.food = spawn_food(&mut self.rng, self.grid, &self.snake);
        self.state = RunState::Running;
        log::info!("Starting new run; high score is {}", self.high_score);
        true
    }

    /// Abandon any run in progress and start a new one
    pub fn restart(&mut self) {
        self.stop();
        let started = self.start();
        debug_assert!(started, "start() should succeed after stop()");
    }

    /// Advance the game by one step.  Returns `None` if no run is in
    /// progress.
    pub fn tick(&mut self) -> Option<TickOutcome> {
        if !self.running() {
            return None;
        }
        self.direction = self.pending_direction;
        let head = self.direction.advance(self.snake.head());
        self.snake.push_head(head);
        let ate_food = self.food == Some(head);
        if ate_food {
            self.score += consts::FOOD_REWARD;
            if self.score > self.high_score {
                self.high_score = self.score;
                self.store.save_high_score(self.score);
            }
            self.food = spawn_food(&mut self.rng, self.grid, &self.snake);
        } else {
            self.snake.drop_tail();
        }
        let ended = if !self.grid.contains(head) {
            Some(EndCause::Wall)
        } else if self.snake.bites_itself() {
            Some(EndCause::SelfCollision)
        } else if ate_food && self.food.is_none() {
            Some(EndCause::BoardFull)
        } else {
            None
        };
        if let Some(cause) = ended {
            self.finish(cause);
        }
        Some(TickOutcome {
            ate_food,
            ended,
            snapshot: self.snapshot(),
        })
    }
}

impl<S, R> GameEngine<S, R> {
    /// Request that the snake turn to `direction` on the next tick.  Ignored
    /// unless a run is in progress or if it would reverse the snake onto
    /// itself.
    pub fn set_direction(&mut self, direction: Direction) {
        if self.running() && self.direction.can_turn_to(direction) {
            self.pending_direction = direction;
        }
    }

    /// End the run in progress, if any
    pub fn stop(&mut self) {
        if self.running() {
            self.finish(EndCause::Stopped);
        }
    }

    fn finish(&mut self, cause: EndCause) {
        self.state = RunState::GameOver;
        self.end_cause = Some(cause);
        log::info!("Game over ({cause}) with a score of {}", self.score);
    }

    pub fn running(&self) -> bool {
        self.state == RunState::Running
    }

    pub fn grid(&self) -> GridSize {
        self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn end_cause(&self) -> Option<EndCause> {
        self.end_cause
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            grid: self.grid,
            snake: self.snake.cells().collect(),
            food: self.food,
            direction: self.direction,
            score: self.score,
            high_score: self.high_score,
            state: self.state,
            end_cause: self.end_cause,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum RunState {
    /// No run has been started yet
    Idle,
    Running,
    /// The last run has ended; [`GameEngine::start()`] begins another
    GameOver,
}

/// Why a run ended
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum EndCause {
    /// The head left the grid
    Wall,
    /// The head ran into the snake's body
    SelfCollision,
    /// The snake covers every cell, leaving nowhere to put food
    BoardFull,
    /// The run was abandoned, e.g. by a restart
    Stopped,
}

impl EndCause {
    pub fn as_str(self) -> &'static str {
        match self {
            EndCause::Wall => "hit a wall",
            EndCause::SelfCollision => "hit itself",
            EndCause::BoardFull => "board full",
            EndCause::Stopped => "stopped",
        }
    }
}

impl fmt::Display for EndCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// What happened during a single [`GameEngine::tick()`]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TickOutcome {
    pub ate_food: bool,

    /// Set if the run ended on this tick
    pub ended: Option<EndCause>,

    /// The state after the tick
    pub snapshot: Snapshot,
}
