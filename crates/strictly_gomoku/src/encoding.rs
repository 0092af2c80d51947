//! Board-state tensor for an external policy.
//!
//! [`encode`] projects a [`Board`] onto a `[4, width, height]` tensor of
//! `f32`, stored row-major and indexed `[channel][x][y]`. Channel order and
//! fill values are a wire contract with pretrained consumers:
//!
//! | Channel | Contents |
//! |---------|----------|
//! | 0 | 1.0 on stones of the player to move |
//! | 1 | 1.0 on stones of the player who moved last |
//! | 2 | 1.0 on the last move only |
//! | 3 | all 1.0 when [`Player::Second`] is to move, else all 0.0 |
//!
//! Channels 0 and 1 are seen from the player who produced the position:
//! channel 1 holds their own stones and channel 0 their opponent's.

use crate::types::Player;
use crate::Board;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Number of planes in an encoded state.
pub const CHANNELS: usize = 4;

/// Meaning of each plane of a [`StateTensor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter)]
pub enum Channel {
    /// Stones of the player to move.
    ToMove,
    /// Stones of the player who moved last.
    Moved,
    /// The last move.
    LastMove,
    /// Turn parity flag.
    Parity,
}

impl Channel {
    /// Plane index of this channel.
    pub fn index(self) -> usize {
        match self {
            Channel::ToMove => 0,
            Channel::Moved => 1,
            Channel::LastMove => 2,
            Channel::Parity => 3,
        }
    }
}

/// Dense `[channels, width, height]` tensor owning a single buffer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateTensor {
    shape: [usize; 3],
    data: Vec<f32>,
}

impl StateTensor {
    fn zeros(channels: usize, width: usize, height: usize) -> Self {
        Self {
            shape: [channels, width, height],
            data: vec![0.0; channels * width * height],
        }
    }

    /// `[channels, width, height]`.
    pub fn shape(&self) -> [usize; 3] {
        self.shape
    }

    fn offset(&self, channel: usize, x: usize, y: usize) -> Option<usize> {
        let [channels, width, height] = self.shape;
        if channel >= channels || x >= width || y >= height {
            return None;
        }
        Some((channel * width + x) * height + y)
    }

    /// Value at `[channel][x][y]`, or `None` out of bounds.
    pub fn get(&self, channel: usize, x: usize, y: usize) -> Option<f32> {
        self.offset(channel, x, y).map(|offset| self.data[offset])
    }

    fn set(&mut self, channel: usize, x: usize, y: usize, value: f32) {
        if let Some(offset) = self.offset(channel, x, y) {
            self.data[offset] = value;
        }
    }

    /// One plane, indexed `x * height + y`.
    pub fn plane(&self, channel: usize) -> Option<&[f32]> {
        let [channels, width, height] = self.shape;
        if channel >= channels {
            return None;
        }
        let len = width * height;
        Some(&self.data[channel * len..(channel + 1) * len])
    }

    fn fill_plane(&mut self, channel: usize, value: f32) {
        let [_, width, height] = self.shape;
        let len = width * height;
        self.data[channel * len..(channel + 1) * len].fill(value);
    }

    /// The whole buffer in row-major order.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Consumes the tensor, returning its buffer.
    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }
}

/// Encodes `board` from the perspective described in the module docs.
///
/// A board whose geometry does not validate encodes as a `[4, 0, 0]` tensor.
#[instrument(level = "trace", skip(board), fields(moves = board.move_count()))]
pub fn encode(board: &Board) -> StateTensor {
    let config = board.config();
    let (width, height) = match config.validate() {
        Ok(()) => (config.width, config.height),
        Err(_) => (0, 0),
    };
    let mut tensor = StateTensor::zeros(CHANNELS, width, height);
    let to_move = board.current_player();

    for (index, player) in board.stones() {
        let Some(location) = config.move_to_location(index) else {
            continue;
        };
        let channel = if player == to_move {
            Channel::ToMove
        } else {
            Channel::Moved
        };
        tensor.set(channel.index(), location.x, location.y, 1.0);
    }

    if let Some(location) = board
        .last_move()
        .and_then(|index| config.move_to_location(index))
    {
        tensor.set(Channel::LastMove.index(), location.x, location.y, 1.0);
    }

    if to_move == Player::Second {
        tensor.fill_plane(Channel::Parity.index(), 1.0);
    }

    tensor
}
