//! Alternating turn invariant: White opens, players strictly alternate.

use super::Invariant;
use crate::{GameState, Player};

/// Invariant: move `n` belongs to White when `n` is odd and Black when even,
/// and an unfinished game has the next colour on turn.
pub struct AlternatingTurnInvariant;

impl Invariant<GameState> for AlternatingTurnInvariant {
    fn holds(game: &GameState) -> bool {
        let alternates = game.moves().iter().enumerate().all(|(i, record)| {
            let expected = if i % 2 == 0 { Player::White } else { Player::Black };
            record.player() == expected
        });

        let turn_ok = if game.is_over() {
            // Frozen on the player who made the final move.
            game.last_move()
                .is_none_or(|last| last.player() == game.current_turn())
        } else {
            match game.last_move() {
                Some(last) => last.player().opponent() == game.current_turn(),
                None => game.current_turn() == Player::White,
            }
        };

        alternates && turn_ok
    }

    fn description() -> &'static str {
        "Players alternate starting with White"
    }
}
