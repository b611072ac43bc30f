use crate::command::Command;
use crate::engine::GameEngine;
use crate::storage::HighScoreStore;
use crossterm::event::{poll, read, Event};
use rand::Rng;
use ratatui::{backend::Backend, Terminal};
use std::io;
use std::time::{Duration, Instant};

/// Runs a [`GameEngine`] in the terminal: draws its snapshot, feeds it key
/// presses, and calls [`GameEngine::tick()`] once per tick period while a
/// run is in progress.
///
/// At most one tick is ever scheduled.  The deadline is cleared when a run
/// ends and replaced when a new one starts.
#[derive(Clone, Debug)]
pub struct App<S, R = rand::rngs::ThreadRng> {
    engine: GameEngine<S, R>,
    tick_period: Duration,
    next_tick: Option<Instant>,
    quitting: bool,
}

impl<S: HighScoreStore, R: Rng> App<S, R> {
    pub fn new(engine: GameEngine<S, R>, tick_period: Duration) -> App<S, R> {
        App {
            engine,
            tick_period,
            next_tick: None,
            quitting: false,
        }
    }

    /// Draw and process input until the player quits
    ///
    /// # Errors
    ///
    /// Returns `Err` if drawing to the terminal or reading input fails.
    pub fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting {
            self.draw(&mut terminal)?;
            self.process_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> io::Result<()> {
        let snapshot = self.engine.snapshot();
        terminal.draw(|frame| frame.render_widget(&snapshot, frame.area()))?;
        Ok(())
    }

    /// Wait for either the next tick or the next input event, whichever
    /// comes first, and handle it
    fn process_input(&mut self) -> io::Result<()> {
        if let Some(when) = self.next_tick {
            let wait = when.saturating_duration_since(Instant::now());
            if wait.is_zero() || !poll(wait)? {
                self.on_tick(when);
                return Ok(());
            }
        }
        self.handle_event(read()?);
        Ok(())
    }

    fn on_tick(&mut self, scheduled: Instant) {
        match self.engine.tick() {
            Some(outcome) if outcome.ended.is_none() => {
                // Catch up from the scheduled time so that slow frames don't
                // stretch the period, but never schedule into the past
                let next = scheduled + self.tick_period;
                self.next_tick = Some(next.max(Instant::now()));
            }
            Some(outcome) => {
                log::debug!("Run ended after {} points", outcome.snapshot.score);
                self.next_tick = None;
            }
            None => self.next_tick = None,
        }
    }

    fn handle_event(&mut self, event: Event) {
        if let Some(cmd) = event.as_key_press_event().and_then(Command::from_key_event) {
            self.handle_command(cmd);
        }
    }

    pub fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Quit => self.quitting = true,
            Command::Start => {
                if self.engine.start() {
                    self.schedule_first_tick();
                }
            }
            Command::Restart => {
                self.next_tick = None;
                self.engine.restart();
                self.schedule_first_tick();
            }
            Command::Up | Command::Down | Command::Left | Command::Right => {
                if let Some(d) = cmd.direction() {
                    self.engine.set_direction(d);
                }
            }
        }
    }

    fn schedule_first_tick(&mut self) {
        self.next_tick = Some(Instant::now() + self.tick_period);
    }
}

impl<S, R> App<S, R> {
    pub fn engine(&self) -> &GameEngine<S, R> {
        &self.engine
    }

    /// When the next tick is due, if a run is in progress
    pub fn next_tick(&self) -> Option<Instant> {
        self.next_tick
    }

    pub fn quitting(&self) -> bool {
        self.quitting
    }
}
