//! History consistency: the move list agrees with the stones on the board.

use super::{Invariant, InvariantViolation};
use crate::{Board, Player};
use std::collections::BTreeSet;

/// Invariant: history and board agree.
///
/// - Every history entry is occupied and appears once
/// - History length equals the number of stones
/// - The last history entry is the last move
/// - Per-player stone counts match the board
pub struct HistoryConsistentInvariant;

impl Invariant<Board> for HistoryConsistentInvariant {
    const NAME: &'static str = "history consistent";

    fn find_violation(board: &Board) -> Option<InvariantViolation> {
        let history = board.history();
        let mut seen = BTreeSet::new();
        for &index in history {
            if !seen.insert(index) {
                return Some(InvariantViolation::at_cell(
                    Self::NAME,
                    index,
                    format!("cell {} appears twice in history", index),
                ));
            }
            if board.occupant(index).is_none() {
                return Some(InvariantViolation::at_cell(
                    Self::NAME,
                    index,
                    format!("history cell {} is empty", index),
                ));
            }
        }

        let stones = board.stones().count();
        if stones != history.len() {
            return Some(InvariantViolation::global(
                Self::NAME,
                format!("{} stones but {} history entries", stones, history.len()),
            ));
        }
        if board.last_move() != history.last().copied() {
            return Some(InvariantViolation::global(
                Self::NAME,
                format!(
                    "last move {:?} differs from last history entry {:?}",
                    board.last_move(),
                    history.last()
                ),
            ));
        }
        Player::ALL.iter().find_map(|&player| {
            let counted = board.stones().filter(|&(_, owner)| owner == player).count();
            (counted != board.stone_count(player)).then(|| {
                InvariantViolation::global(
                    Self::NAME,
                    format!(
                        "player {} has {} stones but a count of {}",
                        player,
                        counted,
                        board.stone_count(player)
                    ),
                )
            })
        })
    }
}
