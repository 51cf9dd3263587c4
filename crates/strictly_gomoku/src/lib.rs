//! Pure five-in-a-row game logic.
//!
//! - **Codec**: `H-08` / `H-08-X` text to [`Position`] / [`MoveText`] and back
//! - **Board**: fixed 15x15 grid of [`Square`]s with a content hash
//! - **State machine**: [`GameState::apply_move`] validates, places, detects
//!   wins and draws, and advances the turn
//! - **Cache gate**: [`MemoSlot`] keeps derived artifacts tagged with the
//!   [`ContentHash`] they were computed from
//!
//! # Example
//!
//! ```
//! use strictly_gomoku::{GameState, GameStatus, Player};
//!
//! let mut game = GameState::new();
//! game.apply_move("H-08-O").unwrap();
//! assert_eq!(game.current_turn(), Player::Black);
//! assert_eq!(game.status(), GameStatus::InProgress);
//! assert!(game.apply_move("H-08-X").is_err());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod cache;
mod game;
mod position;
mod types;

pub mod invariants;
pub mod rules;

pub use action::{MoveError, MoveOutcome, MoveRecord, RejectionKind};
pub use cache::{ContentHash, Memo, MemoSlot};
pub use game::GameState;
pub use position::{CoordinateError, MoveText, Position, parse_move};
pub use types::{BOARD_SIZE, Board, BoardLayoutError, GameStatus, Outcome, Player, Square, WIN_LENGTH};
