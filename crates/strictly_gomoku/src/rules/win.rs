//! Win detection for gomoku.
//!
//! Every occupied cell is tried as the first cell of a run in each of the
//! four [`Direction`]s, scanning forward only. A run is only tried when it
//! fits on the board from that anchor, so no scan ever wraps around an edge
//! and every run is examined from exactly one anchor.

use crate::geometry::{BoardConfig, Location};
use crate::types::{MoveIndex, Player};
use crate::Board;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{instrument, trace};

/// Direction of a run, as seen from its anchor cell.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
pub enum Direction {
    /// Left to right along a row. Index step `+1`.
    #[display("horizontal")]
    Horizontal,
    /// Down a column. Index step `+width`.
    #[display("vertical")]
    Vertical,
    /// Diagonal like `\`. Index step `+(width + 1)`.
    #[display("diagonal")]
    Diagonal,
    /// Diagonal like `/`, scanned upward. Index step `+(1 - width)`.
    #[display("anti-diagonal")]
    AntiDiagonal,
}

impl Direction {
    /// Scan order used at every anchor.
    pub const ALL: [Direction; 4] = [
        Direction::Horizontal,
        Direction::Vertical,
        Direction::Diagonal,
        Direction::AntiDiagonal,
    ];

    /// True if a full run starting at `anchor` stays on the board.
    fn fits(self, anchor: Location, config: &BoardConfig) -> bool {
        let n = config.n_in_row;
        let fits_right = anchor.x + n <= config.width;
        let fits_down = anchor.y + n <= config.height;
        match self {
            Direction::Horizontal => fits_right,
            Direction::Vertical => fits_down,
            Direction::Diagonal => fits_right && fits_down,
            Direction::AntiDiagonal => fits_right && anchor.y + 1 >= n,
        }
    }

    /// The `step`-th cell after `anchor`. Only valid when the run fits.
    fn step(self, anchor: Location, step: usize) -> Location {
        match self {
            Direction::Horizontal => Location::new(anchor.x + step, anchor.y),
            Direction::Vertical => Location::new(anchor.x, anchor.y + step),
            Direction::Diagonal => Location::new(anchor.x + step, anchor.y + step),
            Direction::AntiDiagonal => Location::new(anchor.x + step, anchor.y - step),
        }
    }
}

/// A completed run of stones.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct WinningRun {
    /// Owner of the run.
    player: Player,
    /// Direction from the anchor.
    direction: Direction,
    /// Cells of the run, anchor first.
    cells: Vec<MoveIndex>,
}

/// Checks if there is a winner on the board.
///
/// Returns `Some(player)` for the first run found, `None` otherwise.
#[instrument(level = "trace", skip(board))]
pub fn check_winner(board: &Board) -> Option<Player> {
    find_winning_run(board).map(|run| run.player)
}

/// Finds the first winning run in scan order.
///
/// Anchors are visited in ascending index order; at each anchor the
/// directions are tried in [`Direction::ALL`] order.
#[instrument(level = "trace", skip(board))]
pub fn find_winning_run(board: &Board) -> Option<WinningRun> {
    let config = board.config();
    let n = config.n_in_row;

    for (index, player) in board.stones() {
        // A player with fewer than n stones cannot own a run.
        if board.stone_count(player) < n {
            continue;
        }
        let Some(anchor) = config.move_to_location(index) else {
            continue;
        };

        for direction in Direction::ALL {
            if !direction.fits(anchor, config) {
                continue;
            }
            let run = (1..n).all(|step| {
                board.occupant_at(direction.step(anchor, step)) == Some(player)
            });
            if run {
                let cells = (0..n)
                    .filter_map(|step| config.location_to_move(direction.step(anchor, step)))
                    .collect();
                trace!(%player, %direction, index, "Winning run found");
                return Some(WinningRun {
                    player,
                    direction,
                    cells,
                });
            }
        }
    }

    None
}
