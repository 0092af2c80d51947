//! Command-line interface for the gomoku binary.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use strictly_arena::ArenaConfig;
use strictly_gomoku::BoardConfig;

/// Gomoku - N-in-a-row on a configurable board
#[derive(Parser, Debug)]
#[command(name = "gomoku")]
#[command(about = "Play gomoku against a random agent or watch agents play", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play one game, human against a random agent
    Play {
        /// Settings shared with the config file
        #[command(flatten)]
        settings: SettingsArgs,

        /// Watch two random agents instead of playing
        #[arg(long)]
        watch: bool,

        /// Do not render the board after each move
        #[arg(short, long)]
        quiet: bool,
    },

    /// Play many random-vs-random games and print the tally
    Series {
        /// Settings shared with the config file
        #[command(flatten)]
        settings: SettingsArgs,

        /// Number of games
        #[arg(short, long, default_value = "100")]
        games: usize,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Overrides for [`ArenaConfig`] values.
#[derive(Args, Debug, Default)]
pub struct SettingsArgs {
    /// Board width
    #[arg(long)]
    pub width: Option<usize>,

    /// Board height
    #[arg(long)]
    pub height: Option<usize>,

    /// Stones in a row needed to win
    #[arg(short, long)]
    pub n_in_row: Option<usize>,

    /// Player moving first (0 or 1)
    #[arg(short, long)]
    pub start_player: Option<usize>,

    /// Per-turn time limit in milliseconds
    #[arg(long)]
    pub turn_timeout_ms: Option<u64>,

    /// Seed for random agents
    #[arg(long)]
    pub seed: Option<u64>,
}

impl SettingsArgs {
    /// Applies the given flags on top of `config`.
    pub fn apply(&self, config: ArenaConfig) -> ArenaConfig {
        let base = *config.board();
        let board = BoardConfig::new(
            self.width.unwrap_or(base.width),
            self.height.unwrap_or(base.height),
            self.n_in_row.unwrap_or(base.n_in_row),
        );
        let mut config = config.with_board(board);
        if let Some(start_player) = self.start_player {
            config = config.with_start_player(start_player);
        }
        if self.turn_timeout_ms.is_some() {
            config = config.with_turn_timeout_ms(self.turn_timeout_ms);
        }
        if self.seed.is_some() {
            config = config.with_seed(self.seed);
        }
        config
    }
}
