//! Text rendering of the board, and the render artifact written after moves.
//!
//! The artifact carries a `.hash` sidecar holding the content hash it was
//! drawn from. A refresh whose hash matches the sidecar skips the write.

use derive_new::new;
use std::path::{Path, PathBuf};
use strictly_gomoku::{ContentHash, GameState, MemoSlot, Player, Square};
use tracing::{debug, info, instrument};

use crate::storage::StorageError;

/// Renders the board grid followed by stone counts and the status line.
///
/// Everything here is derived from board contents, so two states with the
/// same content hash render identically.
pub fn render_board(state: &GameState) -> String {
    let board = state.board();
    let count = |player| {
        board
            .squares()
            .filter(|square| *square == Square::Occupied(player))
            .count()
    };
    format!(
        "{}\n{} ({}): {}   {} ({}): {}\n{}\n",
        board,
        Player::White,
        Player::White.piece(),
        count(Player::White),
        Player::Black,
        Player::Black.piece(),
        count(Player::Black),
        state.status_line()
    )
}

/// What [`RenderArtifact::refresh`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderStatus {
    /// The artifact was (re)written.
    Written(PathBuf),
    /// The artifact already showed this board.
    Unchanged(PathBuf),
}

impl RenderStatus {
    /// Path of the artifact.
    pub fn path(&self) -> &Path {
        match self {
            RenderStatus::Written(path) | RenderStatus::Unchanged(path) => path,
        }
    }
}

/// Board render file on disk.
#[derive(Debug, Clone, new)]
pub struct RenderArtifact {
    path: PathBuf,
}

impl RenderArtifact {
    /// Artifact location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Location of the hash sidecar.
    pub fn hash_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".hash");
        PathBuf::from(name)
    }

    /// Hash recorded by the last write, if any.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn last_rendered(&self) -> Result<MemoSlot<()>, StorageError> {
        let mut slot = MemoSlot::empty();
        match std::fs::read_to_string(self.hash_path()) {
            Ok(text) => {
                slot.store(ContentHash::from_hex(text), ());
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        Ok(slot)
    }

    /// Writes the artifact unless it already shows the current board.
    #[instrument(skip(self, state), fields(path = %self.path.display()))]
    pub fn refresh(&self, state: &GameState) -> Result<RenderStatus, StorageError> {
        let current = state.current_hash();
        let fresh = self.last_rendered()?.lookup(&current).is_some() && self.path.exists();
        if fresh {
            debug!(hash = %current, "Render up to date");
            return Ok(RenderStatus::Unchanged(self.path.clone()));
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, render_board(state))?;
        std::fs::write(self.hash_path(), current.as_str())?;

        info!(hash = %current, "Board render written");
        Ok(RenderStatus::Written(self.path.clone()))
    }
}
