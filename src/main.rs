use anyhow::Context;
use gridsnake::app::App;
use gridsnake::config::{Config, FileConfig};
use gridsnake::engine::GameEngine;
use simplelog::WriteLogger;
use std::io::ErrorKind;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("gridsnake: {e:?}");
            ExitCode::from(2)
        }
    }
}

fn run() -> anyhow::Result<()> {
    let config_path = Config::default_path()?;
    let config = Config::load(&config_path, true)
        .with_context(|| format!("failed to load {}", config_path.display()))?;
    if let Err(e) = init_logging(&config.files) {
        eprintln!("gridsnake: not logging: {e:#}");
    }
    log::info!("Using configuration from {}", config_path.display());
    let grid = config.board.grid().context("invalid board configuration")?;
    let store = config.files.open_store()?;
    let engine = GameEngine::new(grid, store);
    let terminal = ratatui::init();
    let r = App::new(engine, config.board.tick_period()).run(terminal);
    ratatui::restore();
    match r {
        Err(e) if e.kind() == ErrorKind::BrokenPipe => Ok(()),
        r => r.context("terminal I/O failed"),
    }
}

/// Send log messages to the configured file.  The terminal belongs to the
/// game, so logging goes nowhere else.
fn init_logging(files: &FileConfig) -> anyhow::Result<()> {
    if let Some(file) = files.open_log()? {
        WriteLogger::init(files.log_level.into(), simplelog::Config::default(), file)
            .context("failed to install logger")?;
    }
    Ok(())
}
