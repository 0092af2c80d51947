//! Game orchestration between two agents.

use crate::agents::Agent;
use crate::error::PlayError;
use crate::event::{GameEvent, GameObserver};
use std::time::Duration;
use strictly_gomoku::{Board, BoardConfig, GameStatus, MoveError, MoveIndex, Player, ascii_art};
use tokio::sync::watch;
use tracing::{debug, error, info, instrument, warn};

/// Where a [`Game`] is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No game has been played yet.
    NotStarted,
    /// Agents are taking turns.
    InProgress,
    /// The last game finished with this status.
    Ended(GameStatus),
    /// The last game stopped on an error or cancellation.
    Aborted,
}

/// Consecutive forfeited turns after which the game ends in a tie.
const FORFEITS_TO_DRAW: usize = 2;

/// Optional limits on a game.
#[derive(Debug, Clone, Default, derive_new::new)]
pub struct GameOptions {
    /// Time allowed per `get_action` call. On expiry the turn is forfeited.
    pub turn_timeout: Option<Duration>,
    /// Cancellation flag. `true` stops the game, also while an agent is
    /// still thinking.
    pub cancel: Option<watch::Receiver<bool>>,
}

/// Runs games on a board it owns exclusively.
pub struct Game {
    board: Board,
    phase: Phase,
    options: GameOptions,
    observer: Option<Box<dyn GameObserver>>,
}

impl Game {
    /// Creates a game around `board`.
    pub fn new(board: Board) -> Self {
        Self {
            board,
            phase: Phase::NotStarted,
            options: GameOptions::default(),
            observer: None,
        }
    }

    /// Creates a game on a fresh board with the given geometry.
    pub fn with_config(config: BoardConfig) -> Self {
        Self::new(Board::new(config))
    }

    /// Sets timeout and cancellation options.
    pub fn with_options(mut self, options: GameOptions) -> Self {
        self.options = options;
        self
    }

    /// Registers an observer for game events.
    pub fn with_observer(mut self, observer: impl GameObserver + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Renders the board as ASCII art.
    pub fn as_ascii_art(&self) -> String {
        ascii_art(&self.board)
    }

    /// Plays one game to the end.
    ///
    /// `agent1` plays [`Player::First`] and `agent2` plays
    /// [`Player::Second`]; `start_player` moves first. With `show_board`
    /// the board is rendered to the observer after every move.
    ///
    /// # Errors
    ///
    /// - [`PlayError::Config`] if the board geometry is not playable
    /// - [`PlayError::IllegalMove`] if a non-interactive agent answers with
    ///   an unavailable move
    /// - [`PlayError::Agent`] if an agent fails
    /// - [`PlayError::Cancelled`] if cancellation is signalled
    ///
    /// Two forfeited turns in a row end the game as [`GameStatus::Draw`].
    #[instrument(skip_all, fields(agent1 = %agent1.name(), agent2 = %agent2.name(), %start_player))]
    pub async fn start_play(
        &mut self,
        agent1: &mut dyn Agent,
        agent2: &mut dyn Agent,
        start_player: Player,
        show_board: bool,
    ) -> Result<GameStatus, PlayError> {
        let result = self.play(agent1, agent2, start_player, show_board).await;
        if let Err(e) = &result {
            error!(error = %e, "Game aborted");
            self.phase = Phase::Aborted;
        }
        result
    }

    async fn play(
        &mut self,
        agent1: &mut dyn Agent,
        agent2: &mut dyn Agent,
        start_player: Player,
        show_board: bool,
    ) -> Result<GameStatus, PlayError> {
        self.board.init_board(start_player)?;
        agent1.set_player_index(Player::First);
        agent2.set_player_index(Player::Second);
        let mut agents: [&mut dyn Agent; 2] = [agent1, agent2];

        self.phase = Phase::InProgress;
        info!("Starting game");
        self.emit(GameEvent::Started { start_player });
        if show_board {
            self.emit_board();
        }

        let mut forfeits_in_a_row = 0;
        loop {
            if self.is_cancelled() {
                warn!("Cancellation requested");
                return Err(PlayError::Cancelled);
            }

            let player = self.board.current_player();
            let agent = &mut *agents[player.index()];
            let Some(index) = self.request_move(agent, player).await? else {
                forfeits_in_a_row += 1;
                if forfeits_in_a_row >= FORFEITS_TO_DRAW {
                    info!(forfeits = forfeits_in_a_row, "Both agents forfeited, ending in a tie");
                    return Ok(self.finish(GameStatus::Draw, None));
                }
                continue;
            };
            forfeits_in_a_row = 0;

            self.board.do_move(index)?;
            let location = self
                .board
                .config()
                .move_to_location(index)
                .ok_or(MoveError::OutOfRange {
                    index,
                    cells: self.board.config().cells(),
                })?;
            debug!(agent = %agent.name(), %player, index, %location, "Move made");
            self.emit(GameEvent::MoveMade {
                agent: agent.name().to_string(),
                player,
                index,
                location,
            });
            if show_board {
                self.emit_board();
            }

            let status = self.board.game_end();
            if status.is_ended() {
                let winner = status
                    .winner()
                    .map(|player| agents[player.index()].name().to_string());
                return Ok(self.finish(status, winner));
            }
        }
    }

    fn finish(&mut self, status: GameStatus, winner: Option<String>) -> GameStatus {
        info!(%status, winner = ?winner, moves = self.board.move_count(), "Game end");
        self.phase = Phase::Ended(status);
        self.emit(GameEvent::GameOver { status, winner });
        status
    }

    /// Asks `agent` for a move until it gives an available one.
    ///
    /// Returns `Ok(None)` if the turn was forfeited on timeout.
    async fn request_move(
        &mut self,
        agent: &mut dyn Agent,
        player: Player,
    ) -> Result<Option<MoveIndex>, PlayError> {
        loop {
            debug!(agent = %agent.name(), %player, "Waiting for move");
            let outcome = tokio::select! {
                outcome = timed_action(agent, &self.board, self.options.turn_timeout) => outcome,
                () = cancelled(self.options.cancel.clone()) => {
                    warn!(%player, "Cancelled while waiting for move");
                    return Err(PlayError::Cancelled);
                }
            };
            let answer = match outcome {
                Ok(answer) => answer,
                Err(limit) => {
                    warn!(agent = %agent.name(), %player, ?limit, "Turn timed out, forfeiting");
                    self.board.pass_turn();
                    self.emit(GameEvent::TurnForfeited {
                        agent: agent.name().to_string(),
                        player,
                    });
                    return Ok(None);
                }
            };

            let answer = answer.map_err(|e| PlayError::Agent {
                agent: agent.name().to_string(),
                message: format!("{:#}", e),
            })?;

            match answer {
                Some(index) if self.board.is_available(index) => return Ok(Some(index)),
                attempted => {
                    self.emit(GameEvent::MoveRejected {
                        agent: agent.name().to_string(),
                        attempted,
                    });
                    if !agent.is_interactive() {
                        return Err(PlayError::IllegalMove {
                            agent: agent.name().to_string(),
                            index: attempted,
                        });
                    }
                    warn!(agent = %agent.name(), ?attempted, "Invalid move, asking again");
                    if self.is_cancelled() {
                        return Err(PlayError::Cancelled);
                    }
                }
            }
        }
    }

    fn is_cancelled(&self) -> bool {
        self.options
            .cancel
            .as_ref()
            .is_some_and(|cancel| *cancel.borrow())
    }

    fn emit_board(&mut self) {
        let art = self.as_ascii_art();
        self.emit(GameEvent::BoardRendered(art));
    }

    fn emit(&mut self, event: GameEvent) {
        if let Some(observer) = self.observer.as_mut() {
            observer.on_event(&event);
        }
    }
}

/// Runs `get_action` under the optional time limit. `Err` carries the limit
/// that expired.
async fn timed_action(
    agent: &mut dyn Agent,
    board: &Board,
    limit: Option<Duration>,
) -> Result<anyhow::Result<Option<MoveIndex>>, Duration> {
    match limit {
        Some(limit) => tokio::time::timeout(limit, agent.get_action(board))
            .await
            .map_err(|_| limit),
        None => Ok(agent.get_action(board).await),
    }
}

/// Resolves once the flag is raised. Never resolves without a flag, or once
/// every sender is gone.
async fn cancelled(cancel: Option<watch::Receiver<bool>>) {
    if let Some(mut cancel) = cancel {
        if cancel.wait_for(|&raised| raised).await.is_ok() {
            return;
        }
    }
    std::future::pending::<()>().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::RandomAgent;

    #[tokio::test]
    async fn test_phase_transitions() {
        let mut game = Game::with_config(BoardConfig::new(3, 3, 3));
        assert_eq!(game.phase(), Phase::NotStarted);

        let mut a = RandomAgent::seeded("a", 1);
        let mut b = RandomAgent::seeded("b", 2);
        let status = game
            .start_play(&mut a, &mut b, Player::First, false)
            .await
            .unwrap();
        assert!(status.is_ended());
        assert_eq!(game.phase(), Phase::Ended(status));
        assert_eq!(game.board().game_end(), status);
    }

    #[tokio::test]
    async fn test_config_error_aborts() {
        let mut game = Game::with_config(BoardConfig::new(3, 3, 5));
        let mut a = RandomAgent::seeded("a", 1);
        let mut b = RandomAgent::seeded("b", 2);
        let result = game.start_play(&mut a, &mut b, Player::First, false).await;
        assert!(matches!(result, Err(PlayError::Config(_))));
        assert_eq!(game.phase(), Phase::Aborted);
    }

    #[test]
    fn test_ascii_art_delegates_to_board() {
        let game = Game::with_config(BoardConfig::new(3, 3, 3));
        assert_eq!(game.as_ascii_art(), ascii_art(game.board()));
    }
}
