//! End-to-end scenarios for the five-in-a-row state machine.

use strictly_gomoku::{
    BOARD_SIZE, GameState, GameStatus, MoveError, Player, Position, Square,
};

fn snapshot(state: &GameState) -> String {
    serde_json::to_string(state).unwrap()
}

#[test]
fn test_center_occupied_then_adjacent() {
    let mut game = GameState::new();

    game.apply_move("H-08-O").unwrap();
    assert_eq!(game.current_turn(), Player::Black);
    assert_eq!(game.status(), GameStatus::InProgress);

    let before = snapshot(&game);
    let result = game.apply_move("H-08-X");
    assert_eq!(
        result,
        Err(MoveError::SquareOccupied(Position::parse("H-08").unwrap()))
    );
    assert_eq!(snapshot(&game), before);

    game.apply_move("I-08-X").unwrap();
    assert_eq!(game.current_turn(), Player::White);
    assert_eq!(game.moves().len(), 2);
}

#[test]
fn test_top_row_win() {
    let mut game = GameState::new();
    let white = ["A-01-O", "B-01-O", "C-01-O", "D-01-O"];
    let black = ["H-08-X", "H-09-X", "H-10-X", "J-12-X"];

    for (w, b) in white.iter().zip(black.iter()) {
        game.apply_move(w).unwrap();
        game.apply_move(b).unwrap();
        assert!(!game.is_over());
    }

    let outcome = game.apply_move("E-01-O").unwrap();
    assert_eq!(outcome.status, GameStatus::Won(Player::White));
    assert!(game.is_over());
    assert_eq!(game.status().winner(), Some(Player::White));
    assert_eq!(game.status_line(), "Game Over - WHITE wins!");
}

#[test]
fn test_win_exactness_row_08() {
    let mut game = GameState::new();
    let black = ["A-02-X", "B-02-X", "C-02-X", "D-02-X"];
    for (i, column) in ["A", "B", "C", "D", "E"].iter().enumerate() {
        let outcome = game.apply_move(&format!("{}-08-O", column)).unwrap();
        if i < 4 {
            assert_eq!(outcome.status, GameStatus::InProgress, "won early at {}", column);
            game.apply_move(black[i]).unwrap();
        } else {
            assert_eq!(outcome.status, GameStatus::Won(Player::White));
        }
    }
}

#[test]
fn test_turn_alternation_and_frozen_turn() {
    let mut game = GameState::new();
    let moves = [
        "A-05-O", "O-15-X", "B-05-O", "O-14-X", "C-05-O", "O-13-X", "D-05-O", "N-15-X",
    ];
    let mut expected = Player::White;
    for text in moves {
        assert_eq!(game.current_turn(), expected);
        game.apply_move(text).unwrap();
        expected = expected.opponent();
    }
    game.apply_move("E-05-O").unwrap();
    assert_eq!(game.current_turn(), Player::White);

    let before = snapshot(&game);
    let err = game.apply_move("F-09-X").unwrap_err();
    assert!(matches!(err, MoveError::GameAlreadyOver(_)));
    assert_eq!(snapshot(&game), before);
}

#[test]
fn test_rejections_leave_state_identical() {
    let mut game = GameState::replay(["H-08-O", "I-08-X"]).unwrap();
    game.store_analysis("balanced".to_string());
    let before = snapshot(&game);

    for bad in ["H-08-O", "I-08-O", "J-08-X", "P-01-O", "H-8-O", "H-08-Q", "", "J-08-O-X"] {
        assert!(game.apply_move(bad).is_err(), "{} should be rejected", bad);
        assert_eq!(snapshot(&game), before, "state changed by {}", bad);
    }
    assert_eq!(game.cached_analysis(), Some("balanced"));
}

#[test]
fn test_hash_changes_on_every_accepted_move() {
    let mut game = GameState::new();
    let mut seen = vec![game.current_hash()];
    for text in ["H-08-O", "I-08-X", "H-09-O", "I-09-X", "A-15-O"] {
        game.store_analysis(format!("before {}", text));
        game.apply_move(text).unwrap();
        let hash = game.current_hash();
        assert!(!seen.contains(&hash));
        assert_eq!(game.stored_hash(), Some(&hash));
        assert_eq!(game.cached_analysis(), None);
        seen.push(hash);
    }
}

#[test]
fn test_full_board_draw() {
    // Row-by-row fill using a pattern with no run longer than two, ordered so
    // colours alternate and White moves first.
    let colour = |pos: Position| {
        if (pos.column() / 2 + pos.row()) % 2 == 0 {
            Player::White
        } else {
            Player::Black
        }
    };
    let mut whites: Vec<Position> = Position::all().filter(|p| colour(*p) == Player::White).collect();
    let mut blacks: Vec<Position> = Position::all().filter(|p| colour(*p) == Player::Black).collect();
    assert_eq!(whites.len(), blacks.len() + 1);

    let mut game = GameState::new();
    whites.reverse();
    blacks.reverse();
    while let Some(w) = whites.pop() {
        let outcome = game.apply_move(&format!("{}-O", w)).unwrap();
        if let Some(b) = blacks.pop() {
            assert_eq!(outcome.status, GameStatus::InProgress);
            game.apply_move(&format!("{}-X", b)).unwrap();
        } else {
            assert_eq!(outcome.status, GameStatus::Draw);
        }
    }

    assert_eq!(game.status(), GameStatus::Draw);
    assert_eq!(game.status().winner(), None);
    assert_eq!(game.moves().len(), BOARD_SIZE * BOARD_SIZE);
    assert!(game.board().squares().all(|s| s != Square::Empty));
    assert_eq!(game.status_line(), "Game Over - Draw!");
    assert!(game.check_invariants().is_ok());
    assert!(matches!(
        game.apply_move("A-01-X"),
        Err(MoveError::GameAlreadyOver(strictly_gomoku::Outcome::Draw))
    ));
}

#[test]
fn test_history_lines() {
    let game = GameState::replay(["H-08-O", "I-08-X"]).unwrap();
    assert_eq!(
        game.history_lines(),
        vec!["1. H-08-O (WHITE)".to_string(), "2. I-08-X (BLACK)".to_string()]
    );
    assert_eq!(game.last_move().unwrap().notation(), "I-08-X");
}
