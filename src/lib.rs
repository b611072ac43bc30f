//! A grid snake game: a tick-driven state engine plus a terminal front end.
//!
//! [`engine::GameEngine`] holds all of the game state and advances it one
//! tick at a time.  It does not know about time, keys, or screens; those
//! are supplied by [`app::App`], which drives it from a timer and
//! [`command::Command`]s, and by the [`ratatui::widgets::Widget`]
//! implementation in [`render`], which paints [`engine::Snapshot`]s.  The
//! high score is kept by a [`storage::HighScoreStore`].
pub mod app;
pub mod command;
pub mod config;
pub mod consts;
pub mod engine;
pub mod render;
pub mod storage;
