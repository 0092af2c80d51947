//! End-to-end games between scripted, human, random and policy agents.

use anyhow::Result;
use std::collections::VecDeque;
use std::time::Duration;
use strictly_arena::{
    Agent, Game, GameEvent, GameOptions, HumanAgent, Phase, PlayError, PolicyAgent, RandomAgent,
    run_series,
};
use strictly_gomoku::{Board, BoardConfig, GameStatus, MoveIndex, Player, StateTensor};
use tokio::sync::{mpsc, watch};

/// Plays a fixed list of answers, then the lowest available cell.
struct ScriptedAgent {
    name: String,
    script: VecDeque<Option<MoveIndex>>,
    interactive: bool,
}

impl ScriptedAgent {
    fn new(name: &str, moves: &[MoveIndex]) -> Self {
        Self::answers(name, moves.iter().copied().map(Some).collect())
    }

    fn answers(name: &str, script: Vec<Option<MoveIndex>>) -> Self {
        Self {
            name: name.to_string(),
            script: script.into(),
            interactive: false,
        }
    }

    fn interactive(mut self) -> Self {
        self.interactive = true;
        self
    }
}

#[async_trait::async_trait]
impl Agent for ScriptedAgent {
    fn set_player_index(&mut self, _player: Player) {}

    async fn get_action(&mut self, board: &Board) -> Result<Option<MoveIndex>> {
        Ok(match self.script.pop_front() {
            Some(answer) => answer,
            None => board.available_moves().iter().next().copied(),
        })
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Never answers in time.
struct SleepyAgent;

#[async_trait::async_trait]
impl Agent for SleepyAgent {
    fn set_player_index(&mut self, _player: Player) {}

    async fn get_action(&mut self, _board: &Board) -> Result<Option<MoveIndex>> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(None)
    }

    fn name(&self) -> &str {
        "sleepy"
    }
}

/// Moves, then raises the cancellation flag.
struct CancellingAgent {
    cancel: watch::Sender<bool>,
}

#[async_trait::async_trait]
impl Agent for CancellingAgent {
    fn set_player_index(&mut self, _player: Player) {}

    async fn get_action(&mut self, board: &Board) -> Result<Option<MoveIndex>> {
        self.cancel.send(true)?;
        Ok(board.available_moves().iter().next().copied())
    }

    fn name(&self) -> &str {
        "canceller"
    }
}

fn small() -> BoardConfig {
    BoardConfig::new(3, 3, 3)
}

fn drain(rx: &mut mpsc::UnboundedReceiver<GameEvent>) -> Vec<GameEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[tokio::test]
async fn test_scripted_game_is_won_by_row() {
    let mut game = Game::with_config(small());
    let mut a = ScriptedAgent::new("a", &[0, 1, 2]);
    let mut b = ScriptedAgent::new("b", &[3, 4]);

    let status = game
        .start_play(&mut a, &mut b, Player::First, false)
        .await
        .unwrap();

    assert_eq!(status, GameStatus::Won(Player::First));
    assert_eq!(game.phase(), Phase::Ended(status));
    assert_eq!(game.board().history(), &[0, 3, 1, 4, 2]);
}

#[tokio::test]
async fn test_full_board_is_a_tie() {
    // X X O
    // O O X
    // X O X
    let mut game = Game::with_config(small());
    let mut a = ScriptedAgent::new("a", &[0, 1, 5, 6, 8]);
    let mut b = ScriptedAgent::new("b", &[2, 3, 4, 7]);

    let status = game
        .start_play(&mut a, &mut b, Player::First, false)
        .await
        .unwrap();

    assert_eq!(status, GameStatus::Draw);
    assert!(game.board().available_moves().is_empty());
}

#[tokio::test]
async fn test_start_player_moves_first() {
    let mut game = Game::with_config(small());
    let mut a = ScriptedAgent::new("a", &[0, 1, 8]);
    let mut b = ScriptedAgent::new("b", &[3, 4, 5]);

    let status = game
        .start_play(&mut a, &mut b, Player::Second, false)
        .await
        .unwrap();

    assert_eq!(status, GameStatus::Won(Player::Second));
    assert_eq!(game.board().history(), &[3, 0, 4, 1, 5]);
}

#[tokio::test]
async fn test_events_arrive_in_order() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut game = Game::with_config(small()).with_observer(tx);
    let mut a = ScriptedAgent::new("a", &[0, 1, 2]);
    let mut b = ScriptedAgent::new("b", &[3, 4]);

    game.start_play(&mut a, &mut b, Player::First, true)
        .await
        .unwrap();
    let events = drain(&mut rx);

    assert_eq!(
        events.first(),
        Some(&GameEvent::Started {
            start_player: Player::First
        })
    );
    assert!(matches!(events[1], GameEvent::BoardRendered(_)));
    let moves: Vec<_> = events
        .iter()
        .filter_map(|event| match event {
            GameEvent::MoveMade { agent, index, .. } => Some((agent.as_str(), *index)),
            _ => None,
        })
        .collect();
    assert_eq!(moves, vec![("a", 0), ("b", 3), ("a", 1), ("b", 4), ("a", 2)]);
    let renders = events
        .iter()
        .filter(|event| matches!(event, GameEvent::BoardRendered(_)))
        .count();
    assert_eq!(renders, 6);
    assert_eq!(
        events.last(),
        Some(&GameEvent::GameOver {
            status: GameStatus::Won(Player::First),
            winner: Some("a".to_string()),
        })
    );
}

#[tokio::test]
async fn test_quiet_game_renders_nothing() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut game = Game::with_config(small()).with_observer(tx);
    let mut a = RandomAgent::seeded("a", 5);
    let mut b = RandomAgent::seeded("b", 6);

    game.start_play(&mut a, &mut b, Player::First, false)
        .await
        .unwrap();

    assert!(
        drain(&mut rx)
            .iter()
            .all(|event| !matches!(event, GameEvent::BoardRendered(_)))
    );
}

#[tokio::test]
async fn test_illegal_move_from_program_is_fatal() {
    let mut game = Game::with_config(small());
    let mut a = ScriptedAgent::new("a", &[0]);
    let mut b = ScriptedAgent::new("b", &[0]);

    let result = game.start_play(&mut a, &mut b, Player::First, false).await;

    match result {
        Err(PlayError::IllegalMove { agent, index }) => {
            assert_eq!(agent, "b");
            assert_eq!(index, Some(0));
        }
        other => panic!("expected illegal move, got {:?}", other),
    }
    assert_eq!(game.phase(), Phase::Aborted);
    assert_eq!(game.board().history(), &[0]);
}

#[tokio::test]
async fn test_missing_answer_from_program_is_fatal() {
    let mut game = Game::with_config(small());
    let mut a = ScriptedAgent::answers("a", vec![None]);
    let mut b = ScriptedAgent::new("b", &[]);

    let result = game.start_play(&mut a, &mut b, Player::First, false).await;

    assert!(matches!(
        result,
        Err(PlayError::IllegalMove { index: None, .. })
    ));
}

#[tokio::test]
async fn test_interactive_agent_is_asked_again() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut game = Game::with_config(small()).with_observer(tx);
    let mut a = ScriptedAgent::new("a", &[0, 1, 2]);
    let mut b = ScriptedAgent::answers("b", vec![Some(0), Some(99), None, Some(3), Some(4)])
        .interactive();

    let status = game
        .start_play(&mut a, &mut b, Player::First, false)
        .await
        .unwrap();

    assert_eq!(status, GameStatus::Won(Player::First));
    let rejected: Vec<_> = drain(&mut rx)
        .into_iter()
        .filter_map(|event| match event {
            GameEvent::MoveRejected { agent, attempted } => Some((agent, attempted)),
            _ => None,
        })
        .collect();
    assert_eq!(
        rejected,
        vec![
            ("b".to_string(), Some(0)),
            ("b".to_string(), Some(99)),
            ("b".to_string(), None),
        ]
    );
}

#[tokio::test]
async fn test_timeout_forfeits_turn() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let options = GameOptions::new(Some(Duration::from_millis(20)), None);
    let mut game = Game::with_config(small())
        .with_options(options)
        .with_observer(tx);
    let mut a = SleepyAgent;
    let mut b = ScriptedAgent::new("b", &[0, 1, 2]);

    let status = game
        .start_play(&mut a, &mut b, Player::First, false)
        .await
        .unwrap();

    assert_eq!(status, GameStatus::Won(Player::Second));
    assert_eq!(game.board().stone_count(Player::First), 0);
    let forfeits = drain(&mut rx)
        .iter()
        .filter(|event| {
            matches!(
                event,
                GameEvent::TurnForfeited {
                    player: Player::First,
                    ..
                }
            )
        })
        .count();
    assert_eq!(forfeits, 3);
}

#[tokio::test]
async fn test_two_forfeits_in_a_row_end_in_a_tie() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let options = GameOptions::new(Some(Duration::from_millis(20)), None);
    let mut game = Game::with_config(small())
        .with_options(options)
        .with_observer(tx);
    let mut a = SleepyAgent;
    let mut b = SleepyAgent;

    let status = tokio::time::timeout(
        Duration::from_secs(5),
        game.start_play(&mut a, &mut b, Player::First, false),
    )
    .await
    .expect("game should end on its own")
    .unwrap();

    assert_eq!(status, GameStatus::Draw);
    assert_eq!(game.phase(), Phase::Ended(GameStatus::Draw));
    assert_eq!(game.board().move_count(), 0);
    let events = drain(&mut rx);
    let forfeits = events
        .iter()
        .filter(|event| matches!(event, GameEvent::TurnForfeited { .. }))
        .count();
    assert_eq!(forfeits, 2);
    assert!(matches!(
        events.last(),
        Some(GameEvent::GameOver {
            status: GameStatus::Draw,
            winner: None
        })
    ));
}

#[tokio::test]
async fn test_cancelled_before_first_turn() {
    let (_tx, rx) = watch::channel(true);
    let mut game = Game::with_config(small()).with_options(GameOptions::new(None, Some(rx)));
    let mut a = ScriptedAgent::new("a", &[]);
    let mut b = ScriptedAgent::new("b", &[]);

    let result = game.start_play(&mut a, &mut b, Player::First, false).await;

    assert!(matches!(result, Err(PlayError::Cancelled)));
    assert_eq!(game.phase(), Phase::Aborted);
    assert_eq!(game.board().move_count(), 0);
}

#[tokio::test]
async fn test_cancelled_between_turns() {
    let (tx, rx) = watch::channel(false);
    let mut game = Game::with_config(small()).with_options(GameOptions::new(None, Some(rx)));
    let mut a = CancellingAgent { cancel: tx };
    let mut b = ScriptedAgent::new("b", &[]);

    let result = game.start_play(&mut a, &mut b, Player::First, false).await;

    assert!(matches!(result, Err(PlayError::Cancelled)));
    // the move in flight still lands
    assert_eq!(game.board().history(), &[0]);
}

#[tokio::test]
async fn test_cancel_interrupts_pending_turn() {
    let (tx, rx) = watch::channel(false);
    let mut game = Game::with_config(small()).with_options(GameOptions::new(None, Some(rx)));
    let mut a = SleepyAgent;
    let mut b = ScriptedAgent::new("b", &[]);

    let (_, result) = tokio::join!(
        async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            tx.send(true).unwrap();
        },
        tokio::time::timeout(
            Duration::from_secs(1),
            game.start_play(&mut a, &mut b, Player::First, false),
        ),
    );

    let result = result.expect("cancel should not wait for the agent");
    assert!(matches!(result, Err(PlayError::Cancelled)));
    assert_eq!(game.phase(), Phase::Aborted);
    assert_eq!(game.board().move_count(), 0);
}

#[tokio::test]
async fn test_board_too_small_for_run() {
    let mut game = Game::with_config(BoardConfig::new(4, 8, 5));
    let mut a = ScriptedAgent::new("a", &[]);
    let mut b = ScriptedAgent::new("b", &[]);

    let result = game.start_play(&mut a, &mut b, Player::First, false).await;

    assert!(matches!(result, Err(PlayError::Config(_))));
}

#[tokio::test]
async fn test_game_can_be_replayed() {
    let mut game = Game::with_config(small());
    for start in Player::ALL {
        let mut a = RandomAgent::seeded("a", 11);
        let mut b = RandomAgent::seeded("b", 12);
        let status = game.start_play(&mut a, &mut b, start, false).await.unwrap();
        assert!(status.is_ended());
    }
}

#[tokio::test]
async fn test_human_agent_over_byte_streams() {
    let input: &[u8] = b"garbage\n[0, 0]\n1 1\n10\n2,0\n";
    let mut human = HumanAgent::new("human", input, Vec::new());
    let mut b = ScriptedAgent::new("b", &[4, 5]);
    let mut game = Game::with_config(small());

    let status = game
        .start_play(&mut human, &mut b, Player::First, false)
        .await
        .unwrap();

    assert_eq!(status, GameStatus::Won(Player::First));
    assert_eq!(game.board().history(), &[0, 4, 1, 5, 2]);
    let transcript = String::from_utf8(human.output().clone()).unwrap();
    assert!(transcript.starts_with("Your move player 0: "));
    assert!(transcript.contains("invalid move garbage\n"));
    assert!(transcript.contains("invalid move 1 1\n"));
}

#[tokio::test]
async fn test_human_input_closed_is_agent_error() {
    let input: &[u8] = b"";
    let mut human = HumanAgent::new("human", input, Vec::new());
    let mut b = ScriptedAgent::new("b", &[]);
    let mut game = Game::with_config(small());

    let result = game.start_play(&mut human, &mut b, Player::First, false).await;

    match result {
        Err(PlayError::Agent { agent, .. }) => assert_eq!(agent, "human"),
        other => panic!("expected agent error, got {:?}", other),
    }
}

/// First empty cell in row-major order, read from the tensor alone.
fn first_empty(state: &StateTensor) -> Result<MoveIndex> {
    let [_, width, height] = state.shape();
    for y in 0..height {
        for x in 0..width {
            if state.get(0, x, y) == Some(0.0) && state.get(1, x, y) == Some(0.0) {
                return Ok(y * width + x);
            }
        }
    }
    anyhow::bail!("no empty cell")
}

#[tokio::test]
async fn test_policy_agent_plays_from_tensor() {
    let mut game = Game::with_config(BoardConfig::new(6, 6, 4));
    let mut policy = PolicyAgent::new("policy", first_empty);
    let mut b = RandomAgent::seeded("random", 3);

    let status = game
        .start_play(&mut policy, &mut b, Player::First, false)
        .await
        .unwrap();

    assert!(status.is_ended());
}

#[tokio::test]
async fn test_policy_answering_occupied_cell_is_fatal() {
    let mut game = Game::with_config(small());
    let mut a = ScriptedAgent::new("a", &[0]);
    let mut policy = PolicyAgent::new("stuck", |_: &StateTensor| -> Result<MoveIndex> { Ok(0) });

    let result = game.start_play(&mut a, &mut policy, Player::First, false).await;

    assert!(matches!(
        result,
        Err(PlayError::IllegalMove { index: Some(0), .. })
    ));
}

#[tokio::test]
async fn test_series_tallies_every_game() {
    let report = run_series(small(), 12, GameOptions::default(), |n| {
        let a: Box<dyn Agent> = Box::new(RandomAgent::seeded("a", 2 * n as u64));
        let b: Box<dyn Agent> = Box::new(RandomAgent::seeded("b", 2 * n as u64 + 1));
        (a, b)
    })
    .await
    .unwrap();

    assert_eq!(report.games, 12);
    assert_eq!(report.wins[0] + report.wins[1] + report.draws, 12);
}

#[tokio::test]
async fn test_series_alternates_start_player() {
    // whoever starts, player 0 completes the top row first
    let report = run_series(small(), 4, GameOptions::default(), |_| {
        let a: Box<dyn Agent> = Box::new(ScriptedAgent::new("a", &[0, 1, 2]));
        let b: Box<dyn Agent> = Box::new(ScriptedAgent::new("b", &[3, 4, 8]));
        (a, b)
    })
    .await
    .unwrap();

    assert_eq!(report.wins, [4, 0]);
    assert_eq!(report.draws, 0);
}

#[tokio::test]
async fn test_series_rejects_bad_geometry() {
    let result = run_series(BoardConfig::new(2, 2, 3), 3, GameOptions::default(), |_| {
        let a: Box<dyn Agent> = Box::new(ScriptedAgent::new("a", &[]));
        let b: Box<dyn Agent> = Box::new(ScriptedAgent::new("b", &[]));
        (a, b)
    })
    .await;

    assert!(matches!(result, Err(PlayError::Config(_))));
}
