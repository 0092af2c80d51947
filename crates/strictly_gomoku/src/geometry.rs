//! Board geometry: dimensions, winning run length and move addressing.
//!
//! Cells are addressed either by a linear [`MoveIndex`] or by a
//! [`Location`]. Row `y = 0` is the first row rendered.
//!
//! ```text
//! width = 3, height = 3
//!
//!   x: 0 1 2
//! y 0  0 1 2
//! y 1  3 4 5
//! y 2  6 7 8
//! ```
//!
//! Index 5 is at `{x: 2, y: 1}`.

use crate::error::ConfigError;
use crate::types::MoveIndex;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Default board width and height.
pub const DEFAULT_BOARD_SIZE: usize = 8;

/// Default number of stones in a row needed to win.
pub const DEFAULT_N_IN_ROW: usize = 5;

/// Largest playable cell count, e.g. a 256×256 board.
pub const MAX_CELLS: usize = 1 << 16;

/// A cell coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// Column.
    pub x: usize,
    /// Row.
    pub y: usize,
}

impl Location {
    /// Creates a location.
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}

/// Immutable board geometry.
///
/// This is plain `Copy` data and may be shared freely between games;
/// all mutable state lives in [`crate::Board`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
    /// Stones in a row needed to win.
    pub n_in_row: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_BOARD_SIZE,
            height: DEFAULT_BOARD_SIZE,
            n_in_row: DEFAULT_N_IN_ROW,
        }
    }
}

impl BoardConfig {
    /// Creates a geometry. Validation happens in [`BoardConfig::validate`].
    pub fn new(width: usize, height: usize, n_in_row: usize) -> Self {
        Self {
            width,
            height,
            n_in_row,
        }
    }

    /// Total number of cells, saturating for geometries that fail
    /// [`BoardConfig::validate`].
    pub fn cells(&self) -> usize {
        self.width.saturating_mul(self.height)
    }

    /// Checks that a game on this board can be won.
    #[instrument]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroDimension {
                width: self.width,
                height: self.height,
            });
        }
        if self.n_in_row == 0 {
            return Err(ConfigError::ZeroRunLength);
        }
        if self.width < self.n_in_row {
            return Err(ConfigError::WidthTooSmall {
                width: self.width,
                n_in_row: self.n_in_row,
            });
        }
        if self.height < self.n_in_row {
            return Err(ConfigError::HeightTooSmall {
                height: self.height,
                n_in_row: self.n_in_row,
            });
        }
        match self.width.checked_mul(self.height) {
            Some(cells) if cells <= MAX_CELLS => Ok(()),
            _ => Err(ConfigError::TooManyCells {
                width: self.width,
                height: self.height,
                max_cells: MAX_CELLS,
            }),
        }
    }

    /// True iff `index` addresses a cell of this board.
    pub fn is_valid_move(&self, index: MoveIndex) -> bool {
        index < self.cells()
    }

    /// Converts a move index to its location, or `None` if out of range.
    pub fn move_to_location(&self, index: MoveIndex) -> Option<Location> {
        if !self.is_valid_move(index) {
            return None;
        }
        Some(Location {
            x: index % self.width,
            y: index / self.width,
        })
    }

    /// Converts a location to its move index, or `None` if out of range.
    pub fn location_to_move(&self, location: Location) -> Option<MoveIndex> {
        if location.x >= self.width || location.y >= self.height {
            return None;
        }
        location
            .y
            .checked_mul(self.width)?
            .checked_add(location.x)
    }

    /// Like [`BoardConfig::location_to_move`] for untrusted signed input.
    pub fn location_to_move_signed(&self, x: i64, y: i64) -> Option<MoveIndex> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        self.location_to_move(Location { x, y })
    }
}
