//! Game events and observers.

use strictly_gomoku::{GameStatus, Location, MoveIndex, Player};
use tokio::sync::mpsc;

/// Things that happen during a game, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// The board was reset and play begins.
    Started {
        /// Player moving first.
        start_player: Player,
    },
    /// ASCII rendering of the current board.
    BoardRendered(String),
    /// A stone was placed.
    MoveMade {
        /// Agent name.
        agent: String,
        /// Player who moved.
        player: Player,
        /// Move index.
        index: MoveIndex,
        /// Move location.
        location: Location,
    },
    /// An agent answered with an unavailable move.
    MoveRejected {
        /// Agent name.
        agent: String,
        /// What it answered.
        attempted: Option<MoveIndex>,
    },
    /// An agent ran out of time and lost its turn.
    TurnForfeited {
        /// Agent name.
        agent: String,
        /// Player who lost the turn.
        player: Player,
    },
    /// The game ended.
    GameOver {
        /// Final status, never `InProgress`.
        status: GameStatus,
        /// Name of the winning agent, if any.
        winner: Option<String>,
    },
}

/// Receives game events synchronously as the game runs.
pub trait GameObserver: Send {
    /// Called once per event, before the game continues.
    fn on_event(&mut self, event: &GameEvent);
}

impl GameObserver for mpsc::UnboundedSender<GameEvent> {
    fn on_event(&mut self, event: &GameEvent) {
        // a dropped receiver just means nobody is listening
        let _ = self.send(event.clone());
    }
}
