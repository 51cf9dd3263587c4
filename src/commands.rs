//! Command handlers: load the snapshot, act, persist, report.
//!
//! Each handler returns a report value; printing is left to the binary.

use derive_more::{Display, Error, From};
use derive_new::new;
use std::fmt;
use strictly_gomoku::{GameState, MoveError, MoveOutcome};
use tracing::{info, instrument, warn};

use crate::analysis::{AnalysisError, AnalysisReport, Analyst, request_analysis};
use crate::config::ConfigError;
use crate::render::{RenderArtifact, RenderStatus};
use crate::storage::{StateStore, StorageError};

/// Shown after a rejected move.
pub const MOVE_FORMAT_HELP: &str = "\
Correct format: <Column>-<Row>-<Piece>
Examples:
  H-08-X  (Black stone at center)
  A-01-O  (White stone at top-left)
  O-15-X  (Black stone at bottom-right)

Rules:
  Columns: A-O (A=left, O=right)
  Rows: 01-15 (01=top, 15=bottom)
  Pieces: X=Black, O=White";

/// Failure of a command.
#[derive(Debug, Display, Error, From)]
pub enum CommandError {
    /// Snapshot could not be read or written.
    #[display("failed to access game state: {}", _0)]
    Storage(StorageError),
    /// The move was rejected; the snapshot is untouched.
    #[display("invalid move: {}", _0)]
    Rejected(MoveError),
    /// Analysis could not be produced.
    #[display("{}", _0)]
    Analysis(AnalysisError),
}

impl CommandError {
    /// Process exit code for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            CommandError::Rejected(_) => 1,
            CommandError::Storage(_) => 2,
            CommandError::Analysis(_) => 3,
        }
    }

    /// The rejection, if this is one.
    pub fn rejection(&self) -> Option<&MoveError> {
        match self {
            CommandError::Rejected(e) => Some(e),
            _ => None,
        }
    }
}

/// Result of an accepted move.
#[derive(Debug, new)]
pub struct MoveReport {
    /// Move text as accepted.
    pub notation: String,
    /// Record and status after the move.
    pub outcome: MoveOutcome,
    /// Status line after the move.
    pub status_line: String,
    /// Render refresh result, when rendering is enabled.
    pub render: Option<Result<RenderStatus, StorageError>>,
}

impl fmt::Display for MoveReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Move {} successful!", self.notation)?;
        write!(f, "Status: {}", self.status_line)?;
        match &self.render {
            Some(Ok(RenderStatus::Written(path))) => {
                write!(f, "\nBoard render updated: {}", path.display())
            }
            Some(Ok(RenderStatus::Unchanged(path))) => {
                write!(f, "\nBoard render unchanged: {}", path.display())
            }
            Some(Err(e)) => write!(f, "\nWarning: board render failed: {}", e),
            None => Ok(()),
        }
    }
}

/// Status report: outcome, move count, last move and the board.
pub fn status_report(state: &GameState) -> String {
    let mut report = format!(
        "Game Status: {}\nTotal Moves: {}\n",
        state.status_line(),
        state.moves().len()
    );
    if let Some(last) = state.last_move() {
        report.push_str(&format!("Last Move: {}\n", last));
    }
    report.push_str(&format!("\nCurrent Board:\n{}", state.board()));
    report
}

/// History report, one line per move.
pub fn history_report(state: &GameState) -> String {
    if state.moves().is_empty() {
        return "No moves have been made yet.".to_string();
    }
    let rule = "-".repeat(40);
    format!(
        "Move History ({} moves):\n{}\n{}\n{}\nCurrent Status: {}",
        state.moves().len(),
        rule,
        state.history_lines().join("\n"),
        rule,
        state.status_line()
    )
}

/// Command handlers over a snapshot store.
#[derive(Debug, new)]
pub struct GameCommands<S> {
    store: S,
    render: Option<RenderArtifact>,
}

impl<S: StateStore> GameCommands<S> {
    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Applies a move, persists, and refreshes the render.
    ///
    /// A failed render refresh is reported in the [`MoveReport`], not as an
    /// error: the move has already been saved.
    #[instrument(skip(self))]
    pub fn play(&self, text: &str) -> Result<MoveReport, CommandError> {
        let mut state = self.store.load()?;
        let outcome = state.apply_move(text)?;
        self.store.save(&state)?;
        info!(record = %outcome.record, "Move saved");

        let render = self.render.as_ref().map(|artifact| {
            artifact.refresh(&state).inspect_err(|e| {
                warn!(error = %e, "Board render failed");
            })
        });

        Ok(MoveReport::new(
            outcome.record.notation(),
            outcome,
            state.status_line(),
            render,
        ))
    }

    /// Current status.
    #[instrument(skip(self))]
    pub fn status(&self) -> Result<String, CommandError> {
        Ok(status_report(&self.store.load()?))
    }

    /// Move history.
    #[instrument(skip(self))]
    pub fn history(&self) -> Result<String, CommandError> {
        Ok(history_report(&self.store.load()?))
    }

    /// Analysis of the current position, cached by board hash.
    ///
    /// `connect` is only called on a cache miss. A fresh result is
    /// persisted with the snapshot.
    #[instrument(skip_all)]
    pub async fn analyze<A, F>(&self, connect: F) -> Result<AnalysisReport, CommandError>
    where
        A: Analyst,
        F: FnOnce() -> Result<A, ConfigError>,
    {
        let mut state = self.store.load()?;
        let report = request_analysis(&mut state, connect).await?;
        if !report.is_cached() {
            self.store.save(&state)?;
        }
        Ok(report)
    }

    /// Discards the snapshot. Returns whether one existed.
    #[instrument(skip(self))]
    pub fn reset(&self) -> Result<bool, CommandError> {
        Ok(self.store.reset()?)
    }
}
