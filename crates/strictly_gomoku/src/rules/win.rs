//! Win detection: run-length scan along the four axes through a stone.

use crate::{Board, Player, Position, Square, WIN_LENGTH};
use strum::IntoEnumIterator;
use tracing::instrument;

/// An undirected line through a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter)]
pub enum Axis {
    /// Left to right.
    Horizontal,
    /// Top to bottom.
    Vertical,
    /// Top-left to bottom-right.
    Diagonal,
    /// Top-right to bottom-left.
    AntiDiagonal,
}

impl Axis {
    /// Unit step `(d_row, d_column)` in the positive direction.
    pub fn step(self) -> (isize, isize) {
        match self {
            Axis::Horizontal => (0, 1),
            Axis::Vertical => (1, 0),
            Axis::Diagonal => (1, 1),
            Axis::AntiDiagonal => (1, -1),
        }
    }
}

/// Length of the contiguous run of `player` stones through `pos` on `axis`.
///
/// The stone at `pos` counts as one whether or not it is on the board yet.
pub fn run_length(board: &Board, pos: Position, player: Player, axis: Axis) -> usize {
    let (d_row, d_column) = axis.step();
    1 + count_direction(board, pos, player, d_row, d_column)
        + count_direction(board, pos, player, -d_row, -d_column)
}

fn count_direction(board: &Board, pos: Position, player: Player, d_row: isize, d_column: isize) -> usize {
    (1..)
        .map_while(|distance| pos.offset(d_row, d_column, distance))
        .take_while(|p| board.get(*p) == Square::Occupied(player))
        .count()
}

/// Checks whether the stone just placed at `pos` completes five or more.
///
/// Axes are independent; overlines of six or more also win.
#[instrument(skip(board))]
pub fn has_five_in_row(board: &Board, pos: Position, player: Player) -> bool {
    Axis::iter().any(|axis| run_length(board, pos, player, axis) >= WIN_LENGTH)
}

/// Checks every stone of `player` for a winning run.
#[instrument(skip(board))]
pub fn has_five_anywhere(board: &Board, player: Player) -> bool {
    Position::all()
        .filter(|p| board.get(*p) == Square::Occupied(player))
        .any(|p| has_five_in_row(board, p, player))
}
