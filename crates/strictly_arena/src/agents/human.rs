//! Human player that types coordinates.

use super::Agent;
use anyhow::{Result, bail};
use strictly_gomoku::{Board, BoardConfig, MoveIndex, Player};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Stdin, Stdout};
use tracing::{debug, instrument};

/// Human agent reading from the process's stdin and prompting on stdout.
pub type StdioHumanAgent = HumanAgent<BufReader<Stdin>, Stdout>;

/// Human player answering prompts line by line.
///
/// Accepted answers, all as `x` then `y`:
/// - `[x, y]`
/// - `x, y`
/// - `x y`
/// - `xy` (single digits only)
///
/// Invalid or unavailable answers are reported and the prompt repeats.
pub struct HumanAgent<R, W> {
    name: String,
    player: Option<Player>,
    input: R,
    output: W,
}

impl StdioHumanAgent {
    /// Creates a human agent bound to stdin and stdout.
    pub fn stdio(name: impl Into<String>) -> Self {
        Self::new(name, BufReader::new(tokio::io::stdin()), tokio::io::stdout())
    }
}

impl<R, W> HumanAgent<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    /// Creates a human agent over arbitrary input and output streams.
    pub fn new(name: impl Into<String>, input: R, output: W) -> Self {
        Self {
            name: name.into(),
            player: None,
            input,
            output,
        }
    }

    /// The prompt stream.
    pub fn output(&self) -> &W {
        &self.output
    }

    async fn prompt(&mut self) -> Result<()> {
        let player = self
            .player
            .map_or_else(|| "?".to_string(), |player| player.to_string());
        self.output
            .write_all(format!("Your move player {}: ", player).as_bytes())
            .await?;
        self.output.flush().await?;
        Ok(())
    }
}

/// Parses a typed answer into a move on a board with geometry `config`.
///
/// Accepts `[x, y]` (whole numbers, `1.0` included), `x, y` with one comma,
/// `x y`, and two digits `xy`. Returns `None` for empty or unparseable input and for coordinates off
/// the board.
#[instrument(level = "debug")]
pub fn parse_answer(answer: &str, config: &BoardConfig) -> Option<MoveIndex> {
    let answer = answer.trim();
    if answer.is_empty() {
        return None;
    }

    let coords: Vec<i64> = if answer.starts_with('[') {
        let values: Vec<f64> = serde_json::from_str(answer).ok()?;
        values
            .into_iter()
            .map(|v| (v.fract() == 0.0).then_some(v as i64))
            .collect::<Option<_>>()?
    } else if answer.len() == 2 && answer.chars().all(|c| c.is_ascii_digit()) {
        answer
            .chars()
            .map(|c| c.to_digit(10).map(i64::from))
            .collect::<Option<_>>()?
    } else if let Some((x, y)) = answer.split_once(',') {
        vec![x.trim().parse().ok()?, y.trim().parse().ok()?]
    } else {
        answer
            .split_whitespace()
            .map(|token| token.parse().ok())
            .collect::<Option<_>>()?
    };

    let &[x, y] = coords.as_slice() else {
        return None;
    };
    config.location_to_move_signed(x, y)
}

#[async_trait::async_trait]
impl<R, W> Agent for HumanAgent<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    fn set_player_index(&mut self, player: Player) {
        self.player = Some(player);
    }

    async fn get_action(&mut self, board: &Board) -> Result<Option<MoveIndex>> {
        loop {
            self.prompt().await?;

            let mut line = String::new();
            if self.input.read_line(&mut line).await? == 0 {
                bail!("Input closed before {} made a move", self.name);
            }

            match parse_answer(&line, board.config()) {
                Some(index) if board.is_available(index) => {
                    debug!(human = %self.name, index, "Human chose move");
                    return Ok(Some(index));
                }
                _ => {
                    self.output
                        .write_all(format!("invalid move {}\n", line.trim()).as_bytes())
                        .await?;
                }
            }
        }
    }

    fn is_interactive(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        &self.name
    }
}
