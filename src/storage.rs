//! Game snapshot persistence.

use derive_more::{Display, Error};
use std::path::{Path, PathBuf};
use strictly_gomoku::GameState;
use tracing::{debug, info, instrument, warn};

/// Loads and saves the single game snapshot.
pub trait StateStore {
    /// Loads the snapshot, or a new game if none exists yet.
    fn load(&self) -> Result<GameState, StorageError>;

    /// Replaces the snapshot with `state`.
    fn save(&self, state: &GameState) -> Result<(), StorageError>;

    /// Deletes the snapshot. Returns whether one existed.
    fn reset(&self) -> Result<bool, StorageError>;
}

/// Pretty-printed JSON snapshot on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store backed by `path`.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn new(path: impl AsRef<Path>) -> Self {
        debug!("Creating JsonFileStore");
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Snapshot location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl StateStore for JsonFileStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> Result<GameState, StorageError> {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No snapshot, starting new game");
                return Ok(GameState::new());
            }
            Err(e) => {
                return Err(StorageError::new(format!(
                    "Failed to read game state from '{}': {}",
                    self.path.display(),
                    e
                )));
            }
        };

        let state: GameState = serde_json::from_str(&json).map_err(|e| {
            StorageError::new(format!(
                "Corrupt game state in '{}': {}",
                self.path.display(),
                e
            ))
        })?;

        if let Err(violations) = state.check_invariants() {
            let reasons: Vec<String> = violations.iter().map(ToString::to_string).collect();
            warn!(?reasons, "Snapshot fails game invariants");
            return Err(StorageError::new(format!(
                "Inconsistent game state in '{}': {}",
                self.path.display(),
                reasons.join("; ")
            )));
        }
        debug!(moves = state.moves().len(), "Snapshot loaded");
        Ok(state)
    }

    #[instrument(skip(self, state), fields(path = %self.path.display(), moves = state.moves().len()))]
    fn save(&self, state: &GameState) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(state)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        // Readers never observe a half-written snapshot.
        let tmp = self.temp_path();
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;

        debug!("Snapshot saved");
        Ok(())
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn reset(&self) -> Result<bool, StorageError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                info!("Snapshot deleted");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

/// Storage error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Storage error: {} at {}:{}", message, file, line)]
pub struct StorageError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StorageError {
    /// Creates a new storage error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<std::io::Error> for StorageError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("I/O error: {}", err))
    }
}

impl From<serde_json::Error> for StorageError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("JSON error: {}", err))
    }
}
