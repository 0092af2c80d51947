//! Agent that plays a uniformly random available move.

use super::Agent;
use anyhow::Result;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng as _;
use strictly_gomoku::{Board, MoveIndex, Player};
use tracing::debug;

/// Picks uniformly among the available cells.
pub struct RandomAgent {
    name: String,
    player: Option<Player>,
    rng: StdRng,
}

impl RandomAgent {
    /// Creates a random agent seeded from the operating system.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            player: None,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Creates a reproducible random agent.
    pub fn seeded(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            player: None,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

#[async_trait::async_trait]
impl Agent for RandomAgent {
    fn set_player_index(&mut self, player: Player) {
        self.player = Some(player);
    }

    async fn get_action(&mut self, board: &Board) -> Result<Option<MoveIndex>> {
        let moves: Vec<MoveIndex> = board.available_moves().iter().copied().collect();
        let choice = moves.choose(&mut self.rng).copied();
        debug!(agent = %self.name, player = ?self.player, ?choice, "Random move");
        Ok(choice)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
