//! Terminal consistency invariant: the status agrees with the board.

use super::Invariant;
use crate::rules::{has_five_anywhere, has_five_in_row, is_draw};
use crate::{GameState, GameStatus};

/// Invariant: a won game has a five through the winner's last stone, a drawn
/// game is a full board without five, an unfinished game has no five.
pub struct TerminalConsistentInvariant;

impl Invariant<GameState> for TerminalConsistentInvariant {
    fn holds(game: &GameState) -> bool {
        let board = game.board();
        match game.status() {
            GameStatus::Won(winner) => game.last_move().is_some_and(|last| {
                last.player() == winner && has_five_in_row(board, last.position(), winner)
            }),
            GameStatus::Draw => is_draw(board),
            GameStatus::InProgress => game
                .last_move()
                .is_none_or(|last| !has_five_anywhere(board, last.player())),
        }
    }

    fn description() -> &'static str {
        "Game status is consistent with the board"
    }
}
