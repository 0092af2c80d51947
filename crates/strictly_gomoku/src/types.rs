//! Core domain types for gomoku.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Linear index of a cell: `x + y * width`.
pub type MoveIndex = usize;

/// One of the two players.
///
/// Player ids are fixed: `First` is id 0 and plays `X`, `Second` is id 1
/// and plays `O`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
pub enum Player {
    /// Player 0.
    #[display("0")]
    First,
    /// Player 1.
    #[display("1")]
    Second,
}

impl Player {
    /// The fixed players list, in id order.
    pub const ALL: [Player; 2] = [Player::First, Player::Second];

    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }

    /// Numeric player id (0 or 1).
    pub fn index(self) -> usize {
        match self {
            Player::First => 0,
            Player::Second => 1,
        }
    }

    /// Looks up a player by id. Only 0 and 1 are valid.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Board symbol for this player's stones.
    pub fn symbol(self) -> char {
        match self {
            Player::First => 'X',
            Player::Second => 'O',
        }
    }
}

impl TryFrom<usize> for Player {
    type Error = ConfigError;

    /// Parses a configured start player id.
    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Self::from_index(index).ok_or(ConfigError::InvalidStartPlayer(index))
    }
}

/// Current status of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// Game ended in a win.
    Won(Player),
    /// Game ended in a tie without a winning run.
    Draw,
}

impl GameStatus {
    /// True once the game has a winner or is tied.
    pub fn is_ended(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    /// The winner, if there is one.
    pub fn winner(self) -> Option<Player> {
        match self {
            GameStatus::Won(player) => Some(player),
            GameStatus::InProgress | GameStatus::Draw => None,
        }
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameStatus::InProgress => write!(f, "in progress"),
            GameStatus::Won(player) => write!(f, "player {} wins", player),
            GameStatus::Draw => write!(f, "tie"),
        }
    }
}
