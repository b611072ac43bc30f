use crate::consts;
use crate::engine::{GridError, GridSize};
use crate::storage::{JsonFileStore, MemoryStore, Storage};
use serde::Deserialize;
use simplelog::LevelFilter;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
pub struct Config {
    /// Dimensions & speed of the board
    #[serde(default)]
    pub board: BoardConfig,

    /// Settings about data files
    #[serde(default)]
    pub files: FileConfig,
}

impl Config {
    /// Return the default configuration file path
    ///
    /// # Errors
    ///
    /// Returns `Err` if the local configuration directory cannot be
    /// determined.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("gridsnake").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }
}

#[derive(Clone, Copy, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct BoardConfig {
    pub width_px: u32,
    pub height_px: u32,

    /// Edge length of a single cell; the grid is the board divided by this
    pub cell_px: u32,

    /// Milliseconds between ticks
    pub tick_ms: u64,
}

impl BoardConfig {
    /// # Errors
    ///
    /// Returns `Err` if the board dimensions do not describe a usable grid.
    pub fn grid(&self) -> Result<GridSize, GridError> {
        GridSize::from_board(self.width_px, self.height_px, self.cell_px)
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }
}

impl Default for BoardConfig {
    fn default() -> BoardConfig {
        BoardConfig {
            width_px: consts::BOARD_WIDTH_PX,
            height_px: consts::BOARD_HEIGHT_PX,
            cell_px: consts::CELL_SIZE_PX,
            tick_ms: consts::TICK_MS,
        }
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct FileConfig {
    /// Path at which the high score should be stored
    pub high_score_file: Option<PathBuf>,

    /// Whether to load & save the high score in a file
    pub save_high_score: bool,

    /// Path to write the log to
    pub log_file: Option<PathBuf>,

    /// Least severe level of messages to log
    pub log_level: LogLevel,
}

impl FileConfig {
    /// Return the store for the high score described by this configuration
    ///
    /// # Errors
    ///
    /// Returns `Err` if the high score should be saved, no path was
    /// configured, and the default path cannot be determined.
    pub fn open_store(&self) -> Result<Storage, ConfigError> {
        if !self.save_high_score {
            return Ok(MemoryStore::new().into());
        }
        let path = match self.high_score_file {
            Some(ref p) => p.clone(),
            None => JsonFileStore::default_path().ok_or(ConfigError::NoDataPath)?,
        };
        Ok(JsonFileStore::new(path).into())
    }

    /// Return the path to log to: the configured file or, if that is not
    /// set, `gridsnake.log` in the local data directory
    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_file.clone().or_else(|| {
            dirs::data_local_dir().map(|p| p.join("gridsnake").join("gridsnake.log"))
        })
    }

    /// Open the log file for appending, creating it and its parent
    /// directories as needed.  Returns `None` if logging is turned off.
    ///
    /// # Errors
    ///
    /// Returns `Err` if no log path is configured and the default cannot be
    /// determined, or if the file cannot be opened.
    pub fn open_log(&self) -> Result<Option<fs_err::File>, ConfigError> {
        if self.log_level == LogLevel::Off {
            return Ok(None);
        }
        let path = self.log_path().ok_or(ConfigError::NoDataPath)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::create_dir_all(parent).map_err(ConfigError::OpenLog)?;
        }
        fs_err::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map(Some)
            .map_err(ConfigError::OpenLog)
    }
}

impl Default for FileConfig {
    fn default() -> FileConfig {
        FileConfig {
            high_score_file: None,
            save_high_score: true,
            log_file: None,
            log_level: LogLevel::Info,
        }
    }
}

/// Severity threshold for the log file
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(value: LogLevel) -> LevelFilter {
        match value {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to determine path to local data directory")]
    NoDataPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
    #[error("failed to open log file")]
    OpenLog(#[source] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn load_str(src: &str) -> Config {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(src.as_bytes()).unwrap();
        file.flush().unwrap();
        Config::load(file.path(), false).unwrap()
    }

    #[test]
    fn empty_file() {
        assert_eq!(load_str(""), Config::default());
    }

    #[test]
    fn missing_file_allowed() {
        let tmpdir = tempfile::tempdir().unwrap();
        let cfg = Config::load(&tmpdir.path().join("config.toml"), true).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn missing_file_not_allowed() {
        let tmpdir = tempfile::tempdir().unwrap();
        let r = Config::load(&tmpdir.path().join("config.toml"), false);
        assert!(matches!(r, Err(ConfigError::Read(_))));
    }

    #[test]
    fn default_board() {
        let board = BoardConfig::default();
        assert_eq!(board.grid(), Ok(GridSize::default()));
        assert_eq!(board.tick_ms, consts::TICK_MS);
        assert_eq!(board.tick_period(), consts::TICK_PERIOD);
    }

    #[test]
    fn full_file() {
        let cfg = load_str(concat!(
            "[board]\n",
            "width-px = 300\n",
            "height-px = 240\n",
            "cell-px = 10\n",
            "tick-ms = 150\n",
            "\n",
            "[files]\n",
            "high-score-file = \"/tmp/scores.json\"\n",
            "save-high-score = true\n",
            "log-file = \"/tmp/gridsnake.log\"\n",
            "log-level = \"debug\"\n",
        ));
        assert_eq!(
            cfg,
            Config {
                board: BoardConfig {
                    width_px: 300,
                    height_px: 240,
                    cell_px: 10,
                    tick_ms: 150,
                },
                files: FileConfig {
                    high_score_file: Some(PathBuf::from("/tmp/scores.json")),
                    save_high_score: true,
                    log_file: Some(PathBuf::from("/tmp/gridsnake.log")),
                    log_level: LogLevel::Debug,
                },
            }
        );
        let grid = cfg.board.grid().unwrap();
        assert_eq!((grid.width(), grid.height()), (30, 24));
        assert_eq!(cfg.board.tick_period(), Duration::from_millis(150));
        assert_eq!(
            cfg.files.open_store().unwrap(),
            Storage::from(JsonFileStore::new("/tmp/scores.json"))
        );
        assert_eq!(
            cfg.files.log_path(),
            Some(PathBuf::from("/tmp/gridsnake.log"))
        );
    }

    #[test]
    fn partial_board() {
        let cfg = load_str("[board]\ncell-px = 40\n");
        assert_eq!(
            cfg.board,
            BoardConfig {
                cell_px: 40,
                ..BoardConfig::default()
            }
        );
        assert!(cfg.board.grid().is_err());
    }

    #[test]
    fn no_saving() {
        let cfg = load_str("[files]\nsave-high-score = false\n");
        assert_eq!(cfg.files.open_store().unwrap(), Storage::from(MemoryStore::new()));
    }

    #[test]
    fn bad_log_level() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[files]\nlog-level = \"loud\"\n").unwrap();
        file.flush().unwrap();
        let r = Config::load(file.path(), false);
        assert!(matches!(r, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn log_file_is_appended_to() {
        let tmpdir = tempfile::tempdir().unwrap();
        let path = tmpdir.path().join("logs").join("gridsnake.log");
        let files = FileConfig {
            log_file: Some(path.clone()),
            ..FileConfig::default()
        };
        let mut first = files.open_log().unwrap().unwrap();
        first.write_all(b"first run\n").unwrap();
        drop(first);
        let mut second = files.open_log().unwrap().unwrap();
        second.write_all(b"second run\n").unwrap();
        drop(second);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "first run\nsecond run\n"
        );
    }

    #[test]
    fn log_off_opens_nothing() {
        let tmpdir = tempfile::tempdir().unwrap();
        let path = tmpdir.path().join("gridsnake.log");
        let files = FileConfig {
            log_file: Some(path.clone()),
            log_level: LogLevel::Off,
            ..FileConfig::default()
        };
        assert!(files.open_log().unwrap().is_none());
        assert!(!path.exists());
    }

    #[test]
    fn unopenable_log_file() {
        let tmpdir = tempfile::tempdir().unwrap();
        let blocker = tmpdir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();
        let files = FileConfig {
            log_file: Some(blocker.join("gridsnake.log")),
            ..FileConfig::default()
        };
        assert!(matches!(files.open_log(), Err(ConfigError::OpenLog(_))));
    }
}
