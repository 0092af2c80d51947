//! Board invariants.
//!
//! Each invariant inspects a [`Board`](crate::Board) and, when it does not
//! hold, reports the first offending cell. They are checked in debug builds
//! after every move and can be tested independently.

mod history_consistent;
mod last_move_occupied;
mod occupancy_partition;

pub use history_consistent::HistoryConsistentInvariant;
pub use last_move_occupied::LastMoveOccupiedInvariant;
pub use occupancy_partition::OccupancyPartitionInvariant;

use crate::types::MoveIndex;

/// A property of a state that every legal move must preserve.
pub trait Invariant<S> {
    /// Short name used in violation reports.
    const NAME: &'static str;

    /// Returns the first violation found, or `None` if the property holds.
    fn find_violation(state: &S) -> Option<InvariantViolation>;

    /// True iff no violation is found.
    fn holds(state: &S) -> bool {
        Self::find_violation(state).is_none()
    }
}

/// Where and how an invariant failed.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("{}: {}", invariant, detail)]
pub struct InvariantViolation {
    /// Name of the violated invariant.
    pub invariant: &'static str,
    /// The cell that exposed the violation, when there is one.
    pub cell: Option<MoveIndex>,
    /// What was wrong.
    pub detail: String,
}

impl InvariantViolation {
    /// A violation tied to a specific cell.
    pub fn at_cell(invariant: &'static str, cell: MoveIndex, detail: impl Into<String>) -> Self {
        Self {
            invariant,
            cell: Some(cell),
            detail: detail.into(),
        }
    }

    /// A violation of board-wide bookkeeping.
    pub fn global(invariant: &'static str, detail: impl Into<String>) -> Self {
        Self {
            invariant,
            cell: None,
            detail: detail.into(),
        }
    }
}

/// Several invariants checked together.
pub trait InvariantSet<S> {
    /// Runs every invariant, collecting all violations.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let violations: Vec<_> = [
            I1::find_violation(state),
            I2::find_violation(state),
            I3::find_violation(state),
        ]
        .into_iter()
        .flatten()
        .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// All board invariants.
pub type BoardInvariants = (
    OccupancyPartitionInvariant,
    LastMoveOccupiedInvariant,
    HistoryConsistentInvariant,
);
