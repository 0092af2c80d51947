//! Last move invariant: the recorded last move holds a stone.

use super::{Invariant, InvariantViolation};
use crate::Board;

/// Invariant: `last_move`, when set, is an occupied cell.
pub struct LastMoveOccupiedInvariant;

impl Invariant<Board> for LastMoveOccupiedInvariant {
    const NAME: &'static str = "last move occupied";

    fn find_violation(board: &Board) -> Option<InvariantViolation> {
        let index = board.last_move()?;
        board.occupant(index).is_none().then(|| {
            InvariantViolation::at_cell(Self::NAME, index, format!("last move {} is empty", index))
        })
    }
}
