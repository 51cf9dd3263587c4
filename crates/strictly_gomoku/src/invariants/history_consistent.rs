//! History consistency invariant: every record matches exactly one stone.

use super::Invariant;
use crate::{GameState, Square};

/// Invariant: history length equals the number of stones, and each record's
/// stone is on the board with sequence numbers `1..=n` in order.
pub struct HistoryConsistentInvariant;

impl Invariant<GameState> for HistoryConsistentInvariant {
    fn holds(game: &GameState) -> bool {
        let board = game.board();
        game.moves().len() == board.stone_count()
            && game.moves().iter().enumerate().all(|(i, record)| {
                record.number() as usize == i + 1
                    && record.piece() == record.player().piece()
                    && board.get(record.position()) == Square::Occupied(record.player())
            })
    }

    fn description() -> &'static str {
        "History length and records match the stones on the board"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_game_holds() {
        assert!(HistoryConsistentInvariant::holds(&GameState::new()));
    }

    #[test]
    fn test_multiple_moves_hold() {
        let game = GameState::replay(["H-08-O", "I-08-X", "H-09-O", "I-09-X"]).unwrap();
        assert!(HistoryConsistentInvariant::holds(&game));
        assert_eq!(game.moves().len(), 4);
    }

    #[test]
    fn test_corrupted_board_violates() {
        let game = GameState::replay(["H-08-O"]).unwrap();
        let mut json = serde_json::to_value(&game).unwrap();
        // Extra stone without a history entry.
        json["board"][0] = serde_json::json!(format!("X{}", "+".repeat(14)));
        let corrupted: GameState = serde_json::from_value(json).unwrap();
        assert!(!HistoryConsistentInvariant::holds(&corrupted));
        assert_eq!(corrupted.board().stone_count(), 2);
    }
}
