//! The game state machine.
//!
//! [`GameState::apply_move`] is the only mutating operation. It validates
//! fully before touching anything, so a rejected move leaves the state
//! exactly as it was.

use crate::action::{MoveError, MoveOutcome, MoveRecord};
use crate::cache::{ContentHash, MemoSlot};
use crate::position::parse_move;
use crate::rules::{has_five_in_row, is_full};
use crate::{Board, GameStatus, Player, Position, Square};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Complete game state, persisted whole between invocations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    moves: Vec<MoveRecord>,
    current_turn: Player,
    status: GameStatus,
    #[serde(default, rename = "current_board_hash")]
    board_hash: Option<ContentHash>,
    #[serde(default)]
    analysis: MemoSlot<String>,
}

impl GameState {
    /// Creates a new game: empty board, White to move.
    #[instrument]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            moves: Vec::new(),
            current_turn: Player::White,
            status: GameStatus::InProgress,
            board_hash: None,
            analysis: MemoSlot::empty(),
        }
    }

    /// Rebuilds a game from move texts, stopping at the first rejection.
    #[instrument(skip(moves))]
    pub fn replay<'a>(moves: impl IntoIterator<Item = &'a str>) -> Result<Self, MoveError> {
        let mut state = Self::new();
        for text in moves {
            state.apply_move(text)?;
        }
        Ok(state)
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Move history, oldest first.
    pub fn moves(&self) -> &[MoveRecord] {
        &self.moves
    }

    /// The most recent move.
    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.moves.last()
    }

    /// Player to move. Frozen once the game is over.
    pub fn current_turn(&self) -> Player {
        self.current_turn
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// True once no further moves are accepted.
    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }

    /// Hash stored by the last accepted move, if any.
    pub fn stored_hash(&self) -> Option<&ContentHash> {
        self.board_hash.as_ref()
    }

    /// Hash of the current board contents.
    pub fn current_hash(&self) -> ContentHash {
        self.board.content_hash()
    }

    /// Cached analysis text, only while it matches the current board.
    pub fn cached_analysis(&self) -> Option<&str> {
        self.analysis.lookup(&self.current_hash()).map(String::as_str)
    }

    /// Stores analysis text tagged with the current board hash.
    #[instrument(skip(self, text), fields(len = text.len()))]
    pub fn store_analysis(&mut self, text: String) -> &str {
        let key = self.current_hash();
        debug!(hash = %key, "Caching analysis");
        self.analysis.store(key, text)
    }

    /// The raw analysis slot, fresh or stale.
    pub fn analysis_slot(&self) -> &MemoSlot<String> {
        &self.analysis
    }

    /// Validates and applies a move such as `H-08-X`.
    ///
    /// Checks, first failure wins: game over, malformed text, wrong turn,
    /// out of bounds, occupied square.
    ///
    /// # Errors
    ///
    /// Returns the [`MoveError`] for the first failed check. The state is
    /// left unchanged.
    #[instrument(skip(self), fields(turn = %self.current_turn, moves = self.moves.len()))]
    pub fn apply_move(&mut self, text: &str) -> Result<MoveOutcome, MoveError> {
        if let Some(outcome) = self.status.outcome() {
            warn!(%outcome, "Move attempted after game end");
            return Err(MoveError::GameAlreadyOver(outcome));
        }

        let (position, player) = parse_move(text).inspect_err(|e| {
            warn!(error = %e, "Malformed move");
        })?;

        if player != self.current_turn {
            warn!(expected = %self.current_turn, attempted = %player, "Wrong turn");
            return Err(MoveError::WrongTurn {
                expected: self.current_turn,
                attempted: player,
            });
        }

        if !self.board.contains(position) {
            return Err(MoveError::OutOfBounds(position));
        }

        if !self.board.is_empty(position) {
            warn!(%position, "Square occupied");
            return Err(MoveError::SquareOccupied(position));
        }

        Ok(self.place(position, player))
    }

    /// Applies an already validated move.
    fn place(&mut self, position: Position, player: Player) -> MoveOutcome {
        self.board.set(position, Square::Occupied(player));
        let record = MoveRecord::new(player, position, self.moves.len() as u32 + 1);
        self.moves.push(record);

        if has_five_in_row(&self.board, position, player) {
            self.status = GameStatus::Won(player);
            info!(%player, %position, "Five in a row");
        } else if is_full(&self.board) {
            self.status = GameStatus::Draw;
            info!("Board full, draw");
        } else {
            self.current_turn = player.opponent();
        }

        self.board_hash = Some(self.board.content_hash());
        self.analysis.clear();

        debug_assert!(
            self.check_invariants().is_ok(),
            "invariants violated after {}: {:?}",
            record,
            self.check_invariants()
        );

        debug!(%record, status = ?self.status, "Move applied");
        MoveOutcome {
            record,
            status: self.status,
        }
    }

    /// One line per move, e.g. `1. H-08-O (WHITE)`.
    pub fn history_lines(&self) -> Vec<String> {
        self.moves.iter().map(ToString::to_string).collect()
    }

    /// Human-readable status.
    pub fn status_line(&self) -> String {
        match self.status {
            GameStatus::InProgress => format!("{} to move", self.current_turn),
            GameStatus::Won(player) => format!("Game Over - {} wins!", player),
            GameStatus::Draw => "Game Over - Draw!".to_string(),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game() {
        let state = GameState::new();
        assert_eq!(state.current_turn(), Player::White);
        assert_eq!(state.status(), GameStatus::InProgress);
        assert!(state.moves().is_empty());
        assert!(state.stored_hash().is_none());
        assert_eq!(state.status_line(), "WHITE to move");
    }

    #[test]
    fn test_accepted_move_records_and_flips_turn() {
        let mut state = GameState::new();
        let outcome = state.apply_move("H-08-O").unwrap();
        assert_eq!(outcome.record.number(), 1);
        assert_eq!(outcome.record.player(), Player::White);
        assert_eq!(outcome.status, GameStatus::InProgress);
        assert_eq!(state.current_turn(), Player::Black);
        assert_eq!(
            state.board().get("H-08".parse().unwrap()),
            Square::Occupied(Player::White)
        );
        assert_eq!(state.stored_hash(), Some(&state.current_hash()));
    }

    #[test]
    fn test_rejection_order_game_over_first() {
        let mut state = GameState::replay([
            "A-01-O", "A-02-X", "B-01-O", "B-02-X", "C-01-O", "C-02-X", "D-01-O", "D-02-X",
            "E-01-O",
        ])
        .unwrap();
        // Even garbage reports game over first.
        assert_eq!(
            state.apply_move("garbage"),
            Err(MoveError::GameAlreadyOver(crate::Outcome::Won(Player::White)))
        );
    }

    #[test]
    fn test_rejection_order_malformed_before_turn() {
        let mut state = GameState::new();
        assert!(matches!(
            state.apply_move("Z-08-X"),
            Err(MoveError::MalformedMove(_))
        ));
    }

    #[test]
    fn test_rejection_order_turn_before_occupied() {
        let mut state = GameState::new();
        state.apply_move("H-08-O").unwrap();
        assert_eq!(
            state.apply_move("H-08-O"),
            Err(MoveError::WrongTurn {
                expected: Player::Black,
                attempted: Player::White
            })
        );
    }

    #[test]
    fn test_move_drops_cached_analysis() {
        let mut state = GameState::new();
        state.store_analysis("opening".to_string());
        assert_eq!(state.cached_analysis(), Some("opening"));

        state.apply_move("H-08-O").unwrap();
        assert_eq!(state.cached_analysis(), None);
        assert!(state.analysis_slot().is_empty());
    }

    #[test]
    fn test_stale_analysis_is_ignored_even_if_kept() {
        let mut state = GameState::new();
        state.store_analysis("opening".to_string());
        let mut moved = state.clone();
        moved.board.set("A-01".parse().unwrap(), Square::Occupied(Player::White));
        assert_eq!(moved.cached_analysis(), None);
        assert!(!moved.analysis_slot().is_empty());
    }

    #[test]
    fn test_state_json_round_trip() {
        let mut state = GameState::replay(["H-08-O", "I-08-X"]).unwrap();
        state.store_analysis("even".to_string());
        let json = serde_json::to_string_pretty(&state).unwrap();
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
        assert_eq!(back.cached_analysis(), Some("even"));
    }
}
