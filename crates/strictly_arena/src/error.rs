//! Errors that end a game early.

use strictly_gomoku::{ConfigError, MoveError, MoveIndex};

/// Why a game could not be played to completion.
#[derive(Debug, derive_more::Display, derive_more::From)]
pub enum PlayError {
    /// The board geometry is not playable.
    #[display("Invalid board configuration: {}", _0)]
    #[from]
    Config(ConfigError),

    /// The board refused a move the orchestrator had already checked.
    #[display("Board rejected move: {}", _0)]
    #[from]
    Move(MoveError),

    /// A non-interactive agent broke the move contract.
    #[display("Agent {} returned illegal move {:?}", agent, index)]
    IllegalMove {
        /// Agent name.
        agent: String,
        /// The move it returned, if any.
        index: Option<MoveIndex>,
    },

    /// An agent failed to produce an answer.
    #[display("Agent {} failed: {}", agent, message)]
    Agent {
        /// Agent name.
        agent: String,
        /// Failure description.
        message: String,
    },

    /// The game was cancelled between turns.
    #[display("Game cancelled")]
    Cancelled,

    /// A spawned game task panicked or was aborted.
    #[display("Game task failed: {}", _0)]
    Task(String),
}

impl std::error::Error for PlayError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_illegal_move_display() {
        let err = PlayError::IllegalMove {
            agent: "policy".to_string(),
            index: Some(3),
        };
        assert_eq!(err.to_string(), "Agent policy returned illegal move Some(3)");
    }

    #[test]
    fn test_from_config_error() {
        let err: PlayError = ConfigError::ZeroRunLength.into();
        assert!(matches!(err, PlayError::Config(_)));
    }
}
