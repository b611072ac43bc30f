//! Durable storage for the high score
use crate::consts;
use enum_dispatch::enum_dispatch;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A place to keep the high score between sessions.
///
/// The engine reads the stored value once when it is created and writes
/// through every time the score climbs past it.  Implementations deal with
/// their own failures; a value that cannot be read counts as 0.
#[enum_dispatch]
pub trait HighScoreStore {
    /// Return the stored high score, or 0 if there is none
    fn load_high_score(&mut self) -> u32;

    /// Replace the stored high score with `score`
    fn save_high_score(&mut self, score: u32);
}

/// The store selected by the configuration
#[enum_dispatch(HighScoreStore)]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Storage {
    JsonFileStore,
    MemoryStore,
}

/// Keeps the high score in memory only, remembering every value written
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MemoryStore {
    high_score: Option<u32>,
    writes: Vec<u32>,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }

    /// Create a store that already holds `score`
    pub fn with_high_score(score: u32) -> MemoryStore {
        MemoryStore {
            high_score: Some(score),
            writes: Vec::new(),
        }
    }

    /// Every score saved to this store, oldest first
    pub fn writes(&self) -> &[u32] {
        &self.writes
    }
}

impl HighScoreStore for MemoryStore {
    fn load_high_score(&mut self) -> u32 {
        self.high_score.unwrap_or(0)
    }

    fn save_high_score(&mut self, score: u32) {
        self.high_score = Some(score);
        self.writes.push(score);
    }
}

/// Keeps scores in a JSON object mapping keys to integers.  Keys other than
/// the one being written are left as they are found, whatever their values.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> JsonFileStore {
        JsonFileStore { path: path.into() }
    }

    /// Return the default location of the scores file, or `None` if the
    /// local data directory cannot be determined
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|p| p.join("gridsnake").join("highscores.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the value stored under `key`.  A value that is not a `u32` counts
    /// as absent.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file exists but cannot be read or parsed.
    pub fn get(&self, key: &str) -> Result<Option<u32>, LoadError> {
        Ok(self
            .read_entries()?
            .get(key)
            .and_then(Value::as_u64)
            .and_then(|v| u32::try_from(v).ok()))
    }

    /// Store `value` under `key`, creating the file and its parent
    /// directories as needed.  An unreadable existing file is replaced.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file cannot be written.
    pub fn set(&self, key: &str, value: u32) -> Result<(), SaveError> {
        let mut entries = match self.read_entries() {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!(
                    "Discarding unreadable scores file {}: {:#}",
                    self.path.display(),
                    anyhow::Error::new(e)
                );
                Map::new()
            }
        };
        let _ = entries.insert(key.to_owned(), Value::from(value));
        self.write_entries(&entries)
    }

    fn read_entries(&self) -> Result<Map<String, Value>, LoadError> {
        let src = match fs_err::read(&self.path) {
            Ok(src) => src,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(LoadError::read(e)),
        };
        serde_json::from_slice(&src).map_err(LoadError::deserialize)
    }

    fn write_entries(&self, entries: &Map<String, Value>) -> Result<(), SaveError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::create_dir_all(parent).map_err(SaveError::mkdir)?;
        }
        let mut src = serde_json::to_string_pretty(entries).map_err(SaveError::serialize)?;
        src.push('\n');
        fs_err::write(&self.path, &src).map_err(SaveError::write)?;
        Ok(())
    }
}

impl HighScoreStore for JsonFileStore {
    fn load_high_score(&mut self) -> u32 {
        match self.get(consts::HIGH_SCORE_KEY) {
            Ok(score) => score.unwrap_or(0),
            Err(e) => {
                log::warn!("{:#}", anyhow::Error::new(e));
                0
            }
        }
    }

    fn save_high_score(&mut self, score: u32) {
        if let Err(e) = self.set(consts::HIGH_SCORE_KEY, score) {
            log::error!("{:#}", anyhow::Error::new(e));
        }
    }
}

#[derive(Debug, Error)]
#[error("Failed to save high score to disk")]
pub struct SaveError(#[source] SaveErrorSource);

impl SaveError {
    fn mkdir(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Mkdir(e))
    }

    fn serialize(e: serde_json::Error) -> Self {
        SaveError(SaveErrorSource::Serialize(e))
    }

    fn write(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Write(e))
    }
}

#[derive(Debug, Error)]
enum SaveErrorSource {
    #[error("failed to create parent directories")]
    Mkdir(#[source] std::io::Error),
    #[error("failed to serialize scores")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write scores file")]
    Write(#[source] std::io::Error),
}

#[derive(Debug, Error)]
#[error("Failed to read high score from disk")]
pub struct LoadError(#[source] LoadErrorSource);

impl LoadError {
    fn read(e: std::io::Error) -> Self {
        LoadError(LoadErrorSource::Read(e))
    }

    fn deserialize(e: serde_json::Error) -> Self {
        LoadError(LoadErrorSource::Deserialize(e))
    }
}

#[derive(Debug, Error)]
enum LoadErrorSource {
    #[error("failed to read scores file")]
    Read(#[source] std::io::Error),
    #[error("failed to deserialize scores")]
    Deserialize(#[source] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn memory_store_records_writes() {
        let mut store = MemoryStore::with_high_score(20);
        assert_eq!(store.load_high_score(), 20);
        store.save_high_score(30);
        store.save_high_score(40);
        assert_eq!(store.load_high_score(), 40);
        assert_eq!(store.writes(), [30, 40]);
    }

    #[test]
    fn empty_memory_store() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load_high_score(), 0);
        assert!(store.writes().is_empty());
    }

    #[test]
    fn missing_file_loads_zero() {
        let tmpdir = tempdir().unwrap();
        let mut store = JsonFileStore::new(tmpdir.path().join("nope.json"));
        assert_eq!(store.load_high_score(), 0);
        assert!(!store.path().exists());
    }

    #[test]
    fn save_then_load() {
        let tmpdir = tempdir().unwrap();
        let path = tmpdir.path().join("sub").join("highscores.json");
        let mut store = JsonFileStore::new(&path);
        store.save_high_score(120);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "{\n  \"snakeHighScore\": 120\n}\n"
        );
        let mut reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.load_high_score(), 120);
    }

    #[test]
    fn other_keys_are_kept() {
        let tmpdir = tempdir().unwrap();
        let path = tmpdir.path().join("highscores.json");
        std::fs::write(&path, r#"{"otherGame": 7, "snakeHighScore": 30}"#).unwrap();
        let mut store = JsonFileStore::new(&path);
        assert_eq!(store.load_high_score(), 30);
        store.save_high_score(50);
        assert_eq!(store.get("otherGame").unwrap(), Some(7));
        assert_eq!(store.get(consts::HIGH_SCORE_KEY).unwrap(), Some(50));
    }

    #[test]
    fn non_integer_keys_are_kept() {
        let tmpdir = tempdir().unwrap();
        let path = tmpdir.path().join("highscores.json");
        std::fs::write(
            &path,
            r#"{"theme": "dark", "recent": [1, 2], "snakeHighScore": 30}"#,
        )
        .unwrap();
        let mut store = JsonFileStore::new(&path);
        assert_eq!(store.load_high_score(), 30);
        store.save_high_score(40);
        let saved: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(
            saved,
            serde_json::json!({"theme": "dark", "recent": [1, 2], "snakeHighScore": 40})
        );
    }

    #[test]
    fn non_integer_high_score_loads_zero() {
        let tmpdir = tempdir().unwrap();
        let path = tmpdir.path().join("highscores.json");
        std::fs::write(&path, r#"{"snakeHighScore": "lots"}"#).unwrap();
        let mut store = JsonFileStore::new(&path);
        assert_eq!(store.get(consts::HIGH_SCORE_KEY).unwrap(), None);
        assert_eq!(store.load_high_score(), 0);
    }

    #[test]
    fn malformed_file() {
        let tmpdir = tempdir().unwrap();
        let path = tmpdir.path().join("highscores.json");
        std::fs::write(&path, "not-json").unwrap();
        let mut store = JsonFileStore::new(&path);
        assert!(store.get(consts::HIGH_SCORE_KEY).is_err());
        assert_eq!(store.load_high_score(), 0);
        store.save_high_score(10);
        assert_eq!(store.get(consts::HIGH_SCORE_KEY).unwrap(), Some(10));
    }

    #[test]
    fn storage_dispatch() {
        let mut storage = Storage::from(MemoryStore::with_high_score(5));
        assert_eq!(storage.load_high_score(), 5);
        storage.save_high_score(15);
        let Storage::MemoryStore(inner) = storage else {
            panic!("Storage variant changed");
        };
        assert_eq!(inner.writes(), [15]);
    }
}
