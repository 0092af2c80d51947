//! Agent trait and implementations.

mod human;
mod policy;
mod random;

pub use human::{HumanAgent, StdioHumanAgent, parse_answer};
pub use policy::{Policy, PolicyAgent};
pub use random::RandomAgent;

use anyhow::Result;
use strictly_gomoku::{Board, MoveIndex, Player};

/// Something that can play one side of a game.
///
/// The orchestrator assigns each agent its player id once per game, then
/// asks the agent to move whenever it is that player's turn.
#[async_trait::async_trait]
pub trait Agent: Send {
    /// Tells the agent which player it controls for the coming game.
    fn set_player_index(&mut self, player: Player);

    /// Picks the next move.
    ///
    /// Returns `Ok(None)` when the agent could not produce a move (for
    /// example unparseable input). An `Err` aborts the game.
    async fn get_action(&mut self, board: &Board) -> Result<Option<MoveIndex>>;

    /// Interactive agents are asked again after an illegal move; for other
    /// agents an illegal move ends the game with an error.
    fn is_interactive(&self) -> bool {
        false
    }

    /// Returns the agent's display name.
    fn name(&self) -> &str;
}
