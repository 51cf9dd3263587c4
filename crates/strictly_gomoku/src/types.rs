//! Core domain types for five-in-a-row.

use crate::cache::ContentHash;
use crate::position::Position;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Side length of the board.
pub const BOARD_SIZE: usize = 15;

/// Number of contiguous stones that wins the game.
pub const WIN_LENGTH: usize = 5;

/// Player in the game.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Player {
    /// Black stones, written `X`.
    #[display("BLACK")]
    Black,
    /// White stones, written `O`. White moves first.
    #[display("WHITE")]
    White,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    /// The piece character used in move text and on the board.
    pub fn piece(self) -> char {
        match self {
            Player::Black => 'X',
            Player::White => 'O',
        }
    }

    /// Maps a piece character back to its owner.
    pub fn from_piece(piece: char) -> Option<Self> {
        match piece {
            'X' => Some(Player::Black),
            'O' => Some(Player::White),
            _ => None,
        }
    }
}

/// A point on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Square {
    /// No stone.
    #[default]
    Empty,
    /// Stone owned by a player.
    Occupied(Player),
}

impl Square {
    /// Marker for an empty point.
    pub const EMPTY_MARKER: char = '+';

    /// Canonical one-character marker.
    pub fn marker(self) -> char {
        match self {
            Square::Empty => Self::EMPTY_MARKER,
            Square::Occupied(player) => player.piece(),
        }
    }

    /// Parses a canonical marker.
    pub fn from_marker(marker: char) -> Option<Self> {
        if marker == Self::EMPTY_MARKER {
            Some(Square::Empty)
        } else {
            Player::from_piece(marker).map(Square::Occupied)
        }
    }
}

/// 15x15 board.
///
/// Serialized as fifteen strings of fifteen markers so a persisted snapshot
/// stays readable. Any other shape fails to deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<String>", try_from = "Vec<String>")]
pub struct Board {
    squares: [[Square; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [[Square::Empty; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Whether the position addresses a cell of this board.
    pub fn contains(&self, pos: Position) -> bool {
        pos.row() < BOARD_SIZE && pos.column() < BOARD_SIZE
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.row()][pos.column()]
    }

    /// Sets the square at the given position.
    pub(crate) fn set(&mut self, pos: Position, square: Square) {
        self.squares[pos.row()][pos.column()] = square;
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Rows, top to bottom.
    pub fn rows(&self) -> &[[Square; BOARD_SIZE]; BOARD_SIZE] {
        &self.squares
    }

    /// All squares in row-major order.
    pub fn squares(&self) -> impl Iterator<Item = Square> + '_ {
        self.squares.iter().flatten().copied()
    }

    /// Number of stones on the board.
    pub fn stone_count(&self) -> usize {
        self.squares().filter(|s| *s != Square::Empty).count()
    }

    /// SHA-256 digest of the cell markers in row-major order.
    ///
    /// Depends on board contents only, never on turn or history.
    pub fn content_hash(&self) -> ContentHash {
        let mut hasher = Sha256::new();
        for square in self.squares() {
            let mut buf = [0u8; 4];
            hasher.update(square.marker().encode_utf8(&mut buf).as_bytes());
        }
        ContentHash::from_digest(&hasher.finalize())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Labelled grid: column letters across the top, two-digit row labels down the side.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for column in 0..BOARD_SIZE {
            write!(f, " {}", Position::column_label(column))?;
        }
        writeln!(f)?;
        for (row, squares) in self.squares.iter().enumerate() {
            write!(f, "{:02} ", row + 1)?;
            for square in squares {
                write!(f, " {}", square.marker())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// A persisted board had the wrong shape or an unknown marker.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("invalid board layout: {}", _0)]
pub struct BoardLayoutError(String);

impl std::error::Error for BoardLayoutError {}

impl From<Board> for Vec<String> {
    fn from(board: Board) -> Self {
        board
            .squares
            .iter()
            .map(|row| row.iter().map(|s| s.marker()).collect())
            .collect()
    }
}

impl TryFrom<Vec<String>> for Board {
    type Error = BoardLayoutError;

    fn try_from(rows: Vec<String>) -> Result<Self, Self::Error> {
        if rows.len() != BOARD_SIZE {
            return Err(BoardLayoutError(format!(
                "expected {} rows, found {}",
                BOARD_SIZE,
                rows.len()
            )));
        }
        let mut board = Board::new();
        for (r, line) in rows.iter().enumerate() {
            let markers: Vec<char> = line.chars().collect();
            if markers.len() != BOARD_SIZE {
                return Err(BoardLayoutError(format!(
                    "row {} has {} cells",
                    r + 1,
                    markers.len()
                )));
            }
            for (c, marker) in markers.into_iter().enumerate() {
                board.squares[r][c] = Square::from_marker(marker).ok_or_else(|| {
                    BoardLayoutError(format!("unknown marker {:?} in row {}", marker, r + 1))
                })?;
            }
        }
        Ok(board)
    }
}

/// Current status of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// Game ended in a win.
    Won(Player),
    /// Board filled without five in a row.
    Draw,
}

impl GameStatus {
    /// True once no further moves are accepted.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    /// Winner, if the game was won.
    pub fn winner(&self) -> Option<Player> {
        match self {
            GameStatus::Won(player) => Some(*player),
            _ => None,
        }
    }

    /// The final outcome of a terminal game.
    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            GameStatus::InProgress => None,
            GameStatus::Won(player) => Some(Outcome::Won(*player)),
            GameStatus::Draw => Some(Outcome::Draw),
        }
    }
}

/// Outcome of a finished game.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Player won the game.
    #[display("{} has won", _0)]
    Won(Player),
    /// Game ended in a draw.
    #[display("draw")]
    Draw,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::Won(player) => Some(*player),
            Outcome::Draw => None,
        }
    }

    /// Returns true if the game was a draw.
    pub fn is_draw(&self) -> bool {
        matches!(self, Outcome::Draw)
    }
}
