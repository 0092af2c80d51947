//! Mutable game state: stones, available cells, turn and history.

use crate::error::{ConfigError, MoveError};
use crate::geometry::{BoardConfig, Location};
use crate::invariants::{BoardInvariants, InvariantSet};
use crate::rules;
use crate::types::{GameStatus, MoveIndex, Player};
use std::collections::BTreeSet;
use tracing::{debug, instrument};

/// A gomoku board and the state of the game played on it.
///
/// Lifecycle: [`Board::new`] fixes the geometry, [`Board::init_board`]
/// clears the stones and picks the starting player, then each
/// [`Board::do_move`] places one stone for the player to move.
///
/// Every valid index is either occupied or available, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    config: BoardConfig,
    /// Occupant of each cell, indexed by move.
    cells: Vec<Option<Player>>,
    availables: BTreeSet<MoveIndex>,
    current_player: Player,
    last_move: Option<MoveIndex>,
    history: Vec<MoveIndex>,
    stone_counts: [usize; 2],
}

impl Board {
    /// Creates an empty, uninitialised board.
    ///
    /// No move is available and no cell storage exists until
    /// [`Board::init_board`] has validated the geometry.
    pub fn new(config: BoardConfig) -> Self {
        Self {
            config,
            cells: Vec::new(),
            availables: BTreeSet::new(),
            current_player: Player::First,
            last_move: None,
            history: Vec::new(),
            stone_counts: [0; 2],
        }
    }

    /// Creates a board and initialises it in one step.
    pub fn started(config: BoardConfig, start_player: Player) -> Result<Self, ConfigError> {
        let mut board = Self::new(config);
        board.init_board(start_player)?;
        Ok(board)
    }

    /// Clears all stones and hands the first turn to `start_player`.
    ///
    /// # Errors
    ///
    /// Fails if the geometry can never produce a win, e.g. when the board is
    /// narrower or shorter than the winning run.
    #[instrument(skip(self), fields(width = self.config.width, height = self.config.height))]
    pub fn init_board(&mut self, start_player: Player) -> Result<(), ConfigError> {
        self.config.validate()?;
        self.cells = vec![None; self.config.cells()];
        self.availables = (0..self.config.cells()).collect();
        self.current_player = start_player;
        self.last_move = None;
        self.history.clear();
        self.stone_counts = [0; 2];
        debug!(%start_player, "Board initialised");
        Ok(())
    }

    /// Returns the board geometry.
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Board width.
    pub fn width(&self) -> usize {
        self.config.width
    }

    /// Board height.
    pub fn height(&self) -> usize {
        self.config.height
    }

    /// Stones in a row needed to win.
    pub fn n_in_row(&self) -> usize {
        self.config.n_in_row
    }

    /// The player whose turn it is.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// The most recent move, or `None` before the first move.
    pub fn last_move(&self) -> Option<MoveIndex> {
        self.last_move
    }

    /// Moves in the order they were played.
    pub fn history(&self) -> &[MoveIndex] {
        &self.history
    }

    /// Number of stones on the board.
    pub fn move_count(&self) -> usize {
        self.history.len()
    }

    /// Number of stones `player` has on the board.
    pub fn stone_count(&self, player: Player) -> usize {
        self.stone_counts[player.index()]
    }

    /// Unoccupied cells in ascending index order.
    pub fn available_moves(&self) -> &BTreeSet<MoveIndex> {
        &self.availables
    }

    /// True iff `index` is currently free to play.
    pub fn is_available(&self, index: MoveIndex) -> bool {
        self.availables.contains(&index)
    }

    /// The player occupying `index`, if any.
    pub fn occupant(&self, index: MoveIndex) -> Option<Player> {
        self.cells.get(index).copied().flatten()
    }

    /// The player occupying `location`, if any.
    pub fn occupant_at(&self, location: Location) -> Option<Player> {
        self.config
            .location_to_move(location)
            .and_then(|index| self.occupant(index))
    }

    /// Occupied cells with their owners, in ascending index order.
    pub fn stones(&self) -> impl Iterator<Item = (MoveIndex, Player)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(index, cell)| cell.map(|player| (index, player)))
    }

    /// Places a stone for the player to move and passes the turn.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError`] if the index is off the board, the cell is
    /// taken, or the board was never initialised. The board is unchanged
    /// on error.
    #[instrument(level = "trace", skip(self), fields(player = %self.current_player))]
    pub fn do_move(&mut self, index: MoveIndex) -> Result<(), MoveError> {
        if !self.config.is_valid_move(index) {
            return Err(MoveError::OutOfRange {
                index,
                cells: self.config.cells(),
            });
        }
        if self.occupant(index).is_some() {
            return Err(MoveError::Occupied(index));
        }
        if !self.availables.remove(&index) {
            return Err(MoveError::NotStarted);
        }

        let player = self.current_player;
        self.cells[index] = Some(player);
        self.stone_counts[player.index()] += 1;
        self.history.push(index);
        self.last_move = Some(index);
        self.current_player = player.opponent();

        debug_assert_eq!(
            BoardInvariants::check_all(self),
            Ok(()),
            "after move {}",
            index
        );
        Ok(())
    }

    /// Plays `moves` in order, stopping at the first illegal one.
    pub fn do_moves(&mut self, moves: &[MoveIndex]) -> Result<(), MoveError> {
        moves.iter().try_for_each(|&index| self.do_move(index))
    }

    /// Hands the turn to the opponent without placing a stone.
    #[instrument(level = "debug", skip(self), fields(player = %self.current_player))]
    pub fn pass_turn(&mut self) {
        self.current_player = self.current_player.opponent();
    }

    /// Reports whether the game is over and who won.
    #[instrument(level = "trace", skip(self))]
    pub fn game_end(&self) -> GameStatus {
        if let Some(winner) = rules::check_winner(self) {
            GameStatus::Won(winner)
        } else if rules::is_full(self) {
            GameStatus::Draw
        } else {
            GameStatus::InProgress
        }
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&crate::render::ascii_art(self))
    }
}
