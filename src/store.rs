//! Durable key-value storage used to resume an interrupted game.
//!
//! Two entries are kept: [`TEAMS_KEY`] holds the teams as JSON (`id`, `name`, `score`) and
//! [`SESSION_KEY`] holds `{gameState, currentRound, advancingTeamIds}`. Persistence is a
//! best-effort resume aid: there is no transaction across the two entries.

use crate::models::{GamePhase, Team, TeamId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const TEAMS_KEY: &str = "gameTeams";
pub const SESSION_KEY: &str = "gameSession";

/// Errors from reading or writing the durable store.
#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "storage I/O error: {}", e),
            StoreError::Json(e) => write!(f, "stored data is not valid: {}", e),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Json(e)
    }
}

/// A string key-value store that survives restarts.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-process store; nothing survives the process. Handy for tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per entry inside a directory.
#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Use `dir` as the store root, creating it if needed.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        std::fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        match std::fs::remove_file(self.path_for(key)) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

/// The persisted `gameSession` entry.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub game_state: GamePhase,
    pub current_round: u32,
    #[serde(default)]
    pub advancing_team_ids: Vec<TeamId>,
}

pub fn save_teams<S: KeyValueStore + ?Sized>(store: &mut S, teams: &[Team]) -> Result<(), StoreError> {
    store.set(TEAMS_KEY, serde_json::to_string(teams)?)
}

pub fn save_session<S: KeyValueStore + ?Sized>(
    store: &mut S,
    record: &SessionRecord,
) -> Result<(), StoreError> {
    store.set(SESSION_KEY, serde_json::to_string(record)?)
}

/// `Ok(None)` when no teams were saved; `Err` when the entry cannot be read or parsed.
pub fn load_teams<S: KeyValueStore + ?Sized>(store: &S) -> Result<Option<Vec<Team>>, StoreError> {
    store
        .get(TEAMS_KEY)?
        .map(|raw| serde_json::from_str(&raw).map_err(StoreError::from))
        .transpose()
}

pub fn load_session<S: KeyValueStore + ?Sized>(store: &S) -> Result<Option<SessionRecord>, StoreError> {
    store
        .get(SESSION_KEY)?
        .map(|raw| serde_json::from_str(&raw).map_err(StoreError::from))
        .transpose()
}

/// Remove both entries (fresh start).
pub fn clear<S: KeyValueStore + ?Sized>(store: &mut S) -> Result<(), StoreError> {
    store.remove(TEAMS_KEY)?;
    store.remove(SESSION_KEY)
}
