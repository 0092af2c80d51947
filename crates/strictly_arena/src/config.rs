//! Arena configuration loaded from TOML.
//!
//! ```toml
//! start_player = 0
//! show_board = true
//! turn_timeout_ms = 30000
//! seed = 7
//!
//! [board]
//! width = 8
//! height = 8
//! n_in_row = 5
//! ```
//!
//! Every key is optional.

use derive_getters::Getters;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use strictly_gomoku::{BoardConfig, ConfigError, Player};
use tracing::{debug, info, instrument};

/// Settings for playing games from the command line.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Board geometry.
    board: BoardConfig,

    /// Id of the player who moves first (0 or 1).
    start_player: usize,

    /// Render the board after every move.
    show_board: bool,

    /// Per-turn time limit in milliseconds. Unset means no limit.
    turn_timeout_ms: Option<u64>,

    /// Seed for random agents. Unset means seeded from the OS.
    seed: Option<u64>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            board: BoardConfig::default(),
            start_player: 0,
            show_board: true,
            turn_timeout_ms: None,
            seed: None,
        }
    }
}

impl ArenaConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ArenaConfigError> {
        debug!("Loading config from file");
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ArenaConfigError::new(ArenaConfigErrorKind::Read {
                path: path.display().to_string(),
                message: e.to_string(),
            })
        })?;

        let config = Self::from_toml(&content)?;
        info!(
            width = config.board.width,
            height = config.board.height,
            n_in_row = config.board.n_in_row,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ArenaConfigError> {
        toml::from_str(content)
            .map_err(|e| ArenaConfigError::new(ArenaConfigErrorKind::Parse(e.to_string())))
    }

    /// Checks that the board is playable and the start player exists.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ArenaConfigError> {
        self.board.validate()?;
        self.start()?;
        Ok(())
    }

    /// The start player as a [`Player`].
    pub fn start(&self) -> Result<Player, ArenaConfigError> {
        Ok(Player::try_from(self.start_player)?)
    }

    /// The per-turn time limit.
    pub fn turn_timeout(&self) -> Option<Duration> {
        self.turn_timeout_ms.map(Duration::from_millis)
    }

    /// Replaces the board geometry.
    pub fn with_board(mut self, board: BoardConfig) -> Self {
        self.board = board;
        self
    }

    /// Replaces the start player id.
    pub fn with_start_player(mut self, start_player: usize) -> Self {
        self.start_player = start_player;
        self
    }

    /// Turns board rendering on or off.
    pub fn with_show_board(mut self, show_board: bool) -> Self {
        self.show_board = show_board;
        self
    }

    /// Replaces the per-turn time limit.
    pub fn with_turn_timeout_ms(mut self, turn_timeout_ms: Option<u64>) -> Self {
        self.turn_timeout_ms = turn_timeout_ms;
        self
    }

    /// Replaces the random seed.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
}

/// What went wrong with an [`ArenaConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ArenaConfigErrorKind {
    /// The file could not be read.
    #[display("Failed to read {}: {}", path, message)]
    Read {
        /// Path as given.
        path: String,
        /// I/O error text.
        message: String,
    },

    /// The file is not valid TOML for this schema.
    #[display("Failed to parse config: {}", _0)]
    Parse(String),

    /// The values parse but cannot be played.
    #[display("Invalid settings: {}", _0)]
    Settings(ConfigError),
}

/// Configuration error, tagged with the place it was raised.
#[derive(Debug, Clone, Display)]
#[display("Config error: {} at {}:{}", kind, file, line)]
pub struct ArenaConfigError {
    /// What went wrong.
    pub kind: ArenaConfigErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ArenaConfigError {
    /// Creates an error located at the caller.
    #[track_caller]
    pub fn new(kind: ArenaConfigErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<ConfigError> for ArenaConfigError {
    #[track_caller]
    fn from(error: ConfigError) -> Self {
        Self::new(ArenaConfigErrorKind::Settings(error))
    }
}

impl std::error::Error for ArenaConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ArenaConfigErrorKind::Settings(error) => Some(error),
            _ => None,
        }
    }
}
