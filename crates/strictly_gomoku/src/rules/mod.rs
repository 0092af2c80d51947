//! Game rules for gomoku.
//!
//! Pure functions over a [`crate::Board`]. Rules are separated from board
//! storage so they can be tested and reused independently.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{Direction, WinningRun, check_winner, find_winning_run};
