//! Occupancy partition: every cell is either occupied or available.

use super::{Invariant, InvariantViolation};
use crate::Board;

/// Invariant: occupied cells and available cells partition the board.
///
/// For every valid index exactly one of "holds a stone" and "is available"
/// is true, and no available index lies off the board.
pub struct OccupancyPartitionInvariant;

impl Invariant<Board> for OccupancyPartitionInvariant {
    const NAME: &'static str = "occupancy partition";

    fn find_violation(board: &Board) -> Option<InvariantViolation> {
        let cells = board.config().cells();
        for index in 0..cells {
            let detail = match (board.occupant(index), board.is_available(index)) {
                (Some(player), true) => {
                    format!("cell {} holds player {} but is available", index, player)
                }
                (None, false) => format!("cell {} is neither occupied nor available", index),
                _ => continue,
            };
            return Some(InvariantViolation::at_cell(Self::NAME, index, detail));
        }
        board.available_moves().range(cells..).next().map(|&index| {
            let detail = format!("available cell {} is off the board", index);
            InvariantViolation::at_cell(Self::NAME, index, detail)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BoardConfig, Player};

    #[test]
    fn test_holds_through_a_game() {
        let mut board = Board::started(BoardConfig::new(6, 6, 4), Player::First).unwrap();
        for index in [14, 15, 20, 0, 35, 7] {
            board.do_move(index).unwrap();
            assert!(OccupancyPartitionInvariant::holds(&board));
        }
    }
}
