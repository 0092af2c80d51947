//! Error types for board configuration and move application.

use crate::types::MoveIndex;

/// The board geometry cannot produce a playable game.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ConfigError {
    /// Width or height is zero.
    #[display("Board dimensions must be positive (got {}x{})", width, height)]
    ZeroDimension {
        /// Configured width.
        width: usize,
        /// Configured height.
        height: usize,
    },

    /// The winning run length is zero.
    #[display("Winning row size must be positive")]
    ZeroRunLength,

    /// The board is narrower than a winning run.
    #[display("Width ({}) can not be less than winning row size {}", width, n_in_row)]
    WidthTooSmall {
        /// Configured width.
        width: usize,
        /// Configured winning run length.
        n_in_row: usize,
    },

    /// The board is shorter than a winning run.
    #[display("Height ({}) can not be less than winning row size {}", height, n_in_row)]
    HeightTooSmall {
        /// Configured height.
        height: usize,
        /// Configured winning run length.
        n_in_row: usize,
    },

    /// The board has more cells than a game can hold.
    #[display("Board {}x{} exceeds the limit of {} cells", width, height, max_cells)]
    TooManyCells {
        /// Configured width.
        width: usize,
        /// Configured height.
        height: usize,
        /// Largest supported cell count.
        max_cells: usize,
    },

    /// A start player id other than 0 or 1.
    #[display("Start player should be either 0 or 1 (got {})", _0)]
    InvalidStartPlayer(usize),
}

impl std::error::Error for ConfigError {}

/// A move that the board refuses to apply.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The index is outside `[0, width * height)`.
    #[display("Move {} is outside the board ({} cells)", index, cells)]
    OutOfRange {
        /// Offending move index.
        index: MoveIndex,
        /// Number of cells on the board.
        cells: usize,
    },

    /// The cell already holds a stone.
    #[display("Cell {} is already occupied", _0)]
    Occupied(MoveIndex),

    /// `init_board` has not been called yet.
    #[display("Board has not been initialised")]
    NotStarted,
}

impl std::error::Error for MoveError {}
