//! Game rules for five-in-a-row.
//!
//! Pure functions over a [`Board`](crate::Board). Rules are separated from
//! the state machine so invariants and tests can evaluate boards directly.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{Axis, has_five_anywhere, has_five_in_row, run_length};
