//! Moves as first-class records, and the reasons a move is rejected.

use crate::position::CoordinateError;
use crate::{GameStatus, Outcome, Player, Position};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An accepted move, as appended to the game history.
///
/// Records are immutable once appended; `number` is 1-based and equals
/// the history length at acceptance time plus one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveRecord {
    player: Player,
    position: Position,
    #[serde(rename = "move_num")]
    number: u32,
    piece: char,
}

impl MoveRecord {
    pub(crate) fn new(player: Player, position: Position, number: u32) -> Self {
        Self {
            player,
            position,
            number,
            piece: player.piece(),
        }
    }

    /// The player who moved.
    pub fn player(&self) -> Player {
        self.player
    }

    /// Where the stone was placed.
    pub fn position(&self) -> Position {
        self.position
    }

    /// 1-based sequence number.
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Piece character (`X` or `O`).
    pub fn piece(&self) -> char {
        self.piece
    }

    /// Move text that reproduces this record, e.g. `H-08-X`.
    pub fn notation(&self) -> String {
        format!("{}-{}", self.position, self.piece)
    }
}

/// `1. H-08-O (WHITE)`
impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {} ({})", self.number, self.notation(), self.player)
    }
}

/// Result of an accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    /// The record appended to history.
    pub record: MoveRecord,
    /// Game status after the move.
    pub status: GameStatus,
}

/// Broad class of a rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum RejectionKind {
    /// The move text could not be parsed.
    #[display("malformed input")]
    MalformedInput,
    /// The move parsed but the rules forbid it.
    #[display("illegal move")]
    IllegalMove,
}

/// Why a move was rejected. Rejections never change the game state.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The game has already finished.
    #[display("game is over, {}", _0)]
    GameAlreadyOver(Outcome),

    /// The move text is not `<Column>-<Row>-<Piece>`.
    #[display("{}", _0)]
    MalformedMove(CoordinateError),

    /// The piece belongs to the player not on turn.
    #[display("it's {}'s turn, not {}'s turn", expected, attempted)]
    WrongTurn {
        /// Player to move.
        expected: Player,
        /// Owner of the submitted piece.
        attempted: Player,
    },

    /// Position outside the board.
    #[display("position {} is out of bounds", _0)]
    OutOfBounds(Position),

    /// The square at the position is already occupied.
    #[display("position {} is already occupied", _0)]
    SquareOccupied(Position),
}

impl MoveError {
    /// Classifies the rejection.
    pub fn kind(&self) -> RejectionKind {
        match self {
            MoveError::MalformedMove(_) => RejectionKind::MalformedInput,
            MoveError::GameAlreadyOver(_)
            | MoveError::WrongTurn { .. }
            | MoveError::OutOfBounds(_)
            | MoveError::SquareOccupied(_) => RejectionKind::IllegalMove,
        }
    }
}

impl std::error::Error for MoveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MoveError::MalformedMove(e) => Some(e),
            _ => None,
        }
    }
}

impl From<CoordinateError> for MoveError {
    fn from(err: CoordinateError) -> Self {
        MoveError::MalformedMove(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_display() {
        let record = MoveRecord::new(Player::White, "H-08".parse().unwrap(), 1);
        assert_eq!(record.to_string(), "1. H-08-O (WHITE)");
        assert_eq!(record.notation(), "H-08-O");
    }

    #[test]
    fn test_record_serialized_field_names() {
        let record = MoveRecord::new(Player::Black, "I-08".parse().unwrap(), 2);
        let json = serde_json::to_value(record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "player": "BLACK",
                "position": "I-08",
                "move_num": 2,
                "piece": "X"
            })
        );
    }

    #[test]
    fn test_game_over_messages_differ() {
        let won = MoveError::GameAlreadyOver(Outcome::Won(Player::White));
        let draw = MoveError::GameAlreadyOver(Outcome::Draw);
        assert_eq!(won.to_string(), "game is over, WHITE has won");
        assert_eq!(draw.to_string(), "game is over, draw");
    }

    #[test]
    fn test_kind() {
        let malformed = MoveError::from(CoordinateError::InvalidFormat("Z".into()));
        assert_eq!(malformed.kind(), RejectionKind::MalformedInput);
        let occupied = MoveError::SquareOccupied("H-08".parse().unwrap());
        assert_eq!(occupied.kind(), RejectionKind::IllegalMove);
    }
}
