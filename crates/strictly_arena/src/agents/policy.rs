//! Agent driven by an external policy over encoded board states.

use super::Agent;
use anyhow::Result;
use strictly_gomoku::{Board, MoveIndex, Player, StateTensor, encode};
use tracing::{debug, instrument};

/// A move-selection policy, typically backed by a trained model.
///
/// The policy sees only the encoded state (see [`strictly_gomoku::encode`])
/// and answers with a move index. It is trusted: an unavailable answer is
/// treated as a bug and ends the game.
pub trait Policy: Send {
    /// Chooses a move for the encoded position.
    fn select(&mut self, state: &StateTensor) -> Result<MoveIndex>;
}

impl<F> Policy for F
where
    F: FnMut(&StateTensor) -> Result<MoveIndex> + Send,
{
    fn select(&mut self, state: &StateTensor) -> Result<MoveIndex> {
        self(state)
    }
}

/// Agent that encodes the board and defers to a [`Policy`].
pub struct PolicyAgent<P> {
    name: String,
    player: Option<Player>,
    policy: P,
}

impl<P: Policy> PolicyAgent<P> {
    /// Wraps `policy` as an agent.
    pub fn new(name: impl Into<String>, policy: P) -> Self {
        Self {
            name: name.into(),
            player: None,
            policy,
        }
    }

    /// The wrapped policy.
    pub fn policy(&self) -> &P {
        &self.policy
    }
}

#[async_trait::async_trait]
impl<P: Policy> Agent for PolicyAgent<P> {
    fn set_player_index(&mut self, player: Player) {
        self.player = Some(player);
    }

    #[instrument(skip(self, board), fields(agent = %self.name))]
    async fn get_action(&mut self, board: &Board) -> Result<Option<MoveIndex>> {
        let state = encode(board);
        let index = self.policy.select(&state)?;
        debug!(player = ?self.player, index, "Policy chose move");
        Ok(Some(index))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
