//! Many independent games played concurrently.

use crate::agents::Agent;
use crate::error::PlayError;
use crate::game::{Game, GameOptions};
use serde::{Deserialize, Serialize};
use strictly_gomoku::{BoardConfig, GameStatus, Player};
use tokio::task::JoinSet;
use tracing::{info, instrument};

/// Tally of a finished series.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesReport {
    /// Games played.
    pub games: usize,
    /// Wins by player id.
    pub wins: [usize; 2],
    /// Games ending in a tie.
    pub draws: usize,
}

impl SeriesReport {
    /// Records one result.
    pub fn record(&mut self, status: GameStatus) {
        self.games += 1;
        match status {
            GameStatus::Won(player) => self.wins[player.index()] += 1,
            GameStatus::Draw => self.draws += 1,
            GameStatus::InProgress => {}
        }
    }

    /// Wins for `player`.
    pub fn wins_for(&self, player: Player) -> usize {
        self.wins[player.index()]
    }
}

/// Plays `games` games on boards of geometry `config`.
///
/// `make_agents` is called with the game number and returns the agents for
/// player 0 and player 1. Each game runs in its own task on its own board.
/// The starting player alternates, beginning with player 0.
///
/// # Errors
///
/// Returns the first error any game produced.
#[instrument(skip(options, make_agents), fields(width = config.width, height = config.height, n_in_row = config.n_in_row))]
pub async fn run_series<F>(
    config: BoardConfig,
    games: usize,
    options: GameOptions,
    mut make_agents: F,
) -> Result<SeriesReport, PlayError>
where
    F: FnMut(usize) -> (Box<dyn Agent>, Box<dyn Agent>),
{
    config.validate()?;

    let mut set = JoinSet::new();
    for game_number in 0..games {
        let (mut agent1, mut agent2) = make_agents(game_number);
        let options = options.clone();
        let start_player = Player::ALL[game_number % 2];
        set.spawn(async move {
            let mut game = Game::with_config(config).with_options(options);
            game.start_play(agent1.as_mut(), agent2.as_mut(), start_player, false)
                .await
        });
    }

    let mut report = SeriesReport::default();
    while let Some(joined) = set.join_next().await {
        let status = joined.map_err(|e| PlayError::Task(e.to_string()))??;
        report.record(status);
    }

    info!(
        games = report.games,
        wins_0 = report.wins[0],
        wins_1 = report.wins[1],
        draws = report.draws,
        "Series complete"
    );
    Ok(report)
}
