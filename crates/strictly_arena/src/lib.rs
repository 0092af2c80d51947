//! Strictly Arena - gomoku games between pluggable agents
//!
//! Builds on [`strictly_gomoku`] to run complete games:
//!
//! - **Agents**: the [`Agent`] trait with human, random and policy players
//! - **Game**: the turn loop with timeouts, cancellation and events ([`Game`])
//! - **Series**: many games in parallel ([`run_series`])
//! - **Config**: TOML settings for the `gomoku` binary ([`ArenaConfig`])
//!
//! # Example
//!
//! ```
//! use strictly_arena::{Game, RandomAgent};
//! use strictly_gomoku::{BoardConfig, Player};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), strictly_arena::PlayError> {
//! let mut game = Game::with_config(BoardConfig::new(6, 6, 4));
//! let mut a = RandomAgent::seeded("a", 1);
//! let mut b = RandomAgent::seeded("b", 2);
//! let status = game.start_play(&mut a, &mut b, Player::First, false).await?;
//! assert!(status.is_ended());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod agents;
mod config;
mod error;
mod event;
mod game;
mod series;

pub use agents::{Agent, HumanAgent, Policy, PolicyAgent, RandomAgent, StdioHumanAgent, parse_answer};
pub use config::{ArenaConfig, ArenaConfigError, ArenaConfigErrorKind};
pub use error::PlayError;
pub use event::{GameEvent, GameObserver};
pub use game::{Game, GameOptions, Phase};
pub use series::{SeriesReport, run_series};
