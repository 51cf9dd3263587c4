//! Coordinate codec: `H-08` is column H, row 8, stored zero-based.
//!
//! Columns run `A`..=`O` left to right, rows `01`..=`15` top to bottom.
//! Parsing is strict: uppercase column letter, exactly two row digits,
//! single hyphen separators. [`Position::notation`] is the exact inverse.

use crate::types::{BOARD_SIZE, Player};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::instrument;

/// Text that is not a valid coordinate or move.
///
/// Carries the offending part of the input.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum CoordinateError {
    /// Input did not match `<Column>-<Row>` or `<Column>-<Row>-<Piece>`.
    #[display("invalid format: {:?}", _0)]
    InvalidFormat(String),
}

impl std::error::Error for CoordinateError {}

/// A point on the 15x15 board, zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Position {
    row: u8,
    column: u8,
}

impl Position {
    /// Creates a position, or `None` when either index is off the board.
    pub fn new(row: usize, column: usize) -> Option<Self> {
        if row < BOARD_SIZE && column < BOARD_SIZE {
            Some(Self {
                row: row as u8,
                column: column as u8,
            })
        } else {
            None
        }
    }

    /// Zero-based row (0 is `01`).
    pub fn row(self) -> usize {
        self.row as usize
    }

    /// Zero-based column (0 is `A`).
    pub fn column(self) -> usize {
        self.column as usize
    }

    /// Letter for a zero-based column index.
    pub fn column_label(column: usize) -> char {
        (b'A' + column as u8) as char
    }

    /// Parses `<Column>-<Row>`, e.g. `H-08`.
    #[instrument]
    pub fn parse(text: &str) -> Result<Self, CoordinateError> {
        let mut tokens = text.split('-');
        match (tokens.next(), tokens.next(), tokens.next()) {
            (Some(column), Some(row), None) => Self::from_tokens(column, row),
            _ => Err(CoordinateError::InvalidFormat(text.to_string())),
        }
    }

    fn from_tokens(column: &str, row: &str) -> Result<Self, CoordinateError> {
        let column_index = match column.as_bytes() {
            [letter @ b'A'..=b'O'] => (letter - b'A') as usize,
            _ => return Err(CoordinateError::InvalidFormat(column.to_string())),
        };

        let row_number = match row.as_bytes() {
            [tens @ b'0'..=b'9', ones @ b'0'..=b'9'] => {
                ((tens - b'0') * 10 + (ones - b'0')) as usize
            }
            _ => return Err(CoordinateError::InvalidFormat(row.to_string())),
        };

        if !(1..=BOARD_SIZE).contains(&row_number) {
            return Err(CoordinateError::InvalidFormat(row.to_string()));
        }

        Self::new(row_number - 1, column_index)
            .ok_or_else(|| CoordinateError::InvalidFormat(format!("{}-{}", column, row)))
    }

    /// Formats as `<Column>-<Row>`.
    pub fn notation(self) -> String {
        self.to_string()
    }

    /// Every position in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE).flat_map(|row| {
            (0..BOARD_SIZE).map(move |column| Position {
                row: row as u8,
                column: column as u8,
            })
        })
    }

    /// Steps `distance` cells along `(d_row, d_column)`, or `None` past the edge.
    pub fn offset(self, d_row: isize, d_column: isize, distance: isize) -> Option<Self> {
        let row = self.row() as isize + d_row * distance;
        let column = self.column() as isize + d_column * distance;
        if row < 0 || column < 0 {
            return None;
        }
        Self::new(row as usize, column as usize)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", Self::column_label(self.column()), self.row() + 1)
    }
}

impl FromStr for Position {
    type Err = CoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Position> for String {
    fn from(pos: Position) -> Self {
        pos.notation()
    }
}

impl TryFrom<String> for Position {
    type Error = CoordinateError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        Self::parse(&text)
    }
}

/// A parsed `<Column>-<Row>-<Piece>` move string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveText {
    /// Target point.
    pub position: Position,
    /// Owner of the piece character (`X` black, `O` white).
    pub player: Player,
}

impl MoveText {
    /// Creates a move text from its parts.
    pub fn new(position: Position, player: Player) -> Self {
        Self { position, player }
    }
}

impl fmt::Display for MoveText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.position, self.player.piece())
    }
}

impl FromStr for MoveText {
    type Err = CoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_move(s).map(|(position, player)| MoveText { position, player })
    }
}

/// Parses `<Column>-<Row>-<Piece>`, e.g. `H-08-X`.
#[instrument]
pub fn parse_move(text: &str) -> Result<(Position, Player), CoordinateError> {
    let mut tokens = text.split('-');
    let (column, row, piece) = match (tokens.next(), tokens.next(), tokens.next(), tokens.next()) {
        (Some(column), Some(row), Some(piece), None) => (column, row, piece),
        _ => return Err(CoordinateError::InvalidFormat(text.to_string())),
    };

    let player = match piece.as_bytes() {
        [b] => Player::from_piece(*b as char),
        _ => None,
    }
    .ok_or_else(|| CoordinateError::InvalidFormat(piece.to_string()))?;

    let position = Position::from_tokens(column, row)?;
    Ok((position, player))
}
