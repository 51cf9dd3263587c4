//! Draw detection for five-in-a-row.

use super::win::has_five_anywhere;
use crate::{Board, Player, Square};
use tracing::instrument;

/// Checks if the board is full (all squares occupied).
#[instrument(skip(board))]
pub fn is_full(board: &Board) -> bool {
    board.squares().all(|s| s != Square::Empty)
}

/// A full board with no five in a row for either player.
#[instrument(skip(board))]
pub fn is_draw(board: &Board) -> bool {
    is_full(board)
        && !has_five_anywhere(board, Player::Black)
        && !has_five_anywhere(board, Player::White)
}
