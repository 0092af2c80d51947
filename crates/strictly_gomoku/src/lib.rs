//! Strictly Gomoku - pure N-in-a-row board logic
//!
//! This crate holds everything about a gomoku position that does not need
//! I/O or an async runtime:
//!
//! - **Geometry**: move index ↔ `(x, y)` conversions ([`BoardConfig`])
//! - **Board**: stones, available cells, turn tracking ([`Board`])
//! - **Rules**: win and draw detection ([`rules`])
//! - **Invariants**: properties checked after every move ([`invariants`])
//! - **Encoding**: the `[4, width, height]` tensor fed to a policy ([`encode`])
//! - **Rendering**: ASCII art ([`ascii_art`])
//!
//! # Example
//!
//! ```
//! use strictly_gomoku::{Board, BoardConfig, GameStatus, Player};
//!
//! let mut board = Board::started(BoardConfig::new(6, 6, 4), Player::First)?;
//! board.do_moves(&[0, 6, 1, 7, 2, 8, 3])?;
//! assert_eq!(board.game_end(), GameStatus::Won(Player::First));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod encoding;
mod error;
mod geometry;
pub mod invariants;
mod render;
pub mod rules;
mod types;

pub use board::Board;
pub use encoding::{CHANNELS, Channel, StateTensor, encode};
pub use error::{ConfigError, MoveError};
pub use geometry::{BoardConfig, DEFAULT_BOARD_SIZE, DEFAULT_N_IN_ROW, Location, MAX_CELLS};
pub use render::ascii_art;
pub use rules::{Direction, WinningRun};
pub use types::{GameStatus, MoveIndex, Player};
