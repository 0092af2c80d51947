//! Draw (tie) detection.

use super::win::check_winner;
use crate::Board;
use tracing::instrument;

/// Checks if every cell holds a stone.
#[instrument(level = "trace", skip(board))]
pub fn is_full(board: &Board) -> bool {
    board.available_moves().is_empty() && board.move_count() == board.config().cells()
}

/// A full board with no winning run is a tie.
#[instrument(level = "trace", skip(board))]
pub fn is_draw(board: &Board) -> bool {
    is_full(board) && check_winner(board).is_none()
}
