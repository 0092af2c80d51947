//! Gomoku - terminal runner
//!
//! Plays a human against a random agent, watches two random agents, or
//! runs a series of games.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command, SettingsArgs};
use strictly_arena::{
    Agent, ArenaConfig, Game, GameEvent, GameObserver, GameOptions, PlayError, RandomAgent,
    StdioHumanAgent, run_series,
};
use tokio::sync::watch;
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // stdout belongs to the game, logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => ArenaConfig::from_file(path)?,
        None => ArenaConfig::default(),
    };

    match cli.command {
        Command::Play {
            settings,
            watch,
            quiet,
        } => run_play(config, settings, watch, quiet).await,
        Command::Series {
            settings,
            games,
            json,
        } => run_many(config, settings, games, json).await,
    }
}

/// Prints game events for a person at the terminal.
struct ConsoleObserver;

impl GameObserver for ConsoleObserver {
    fn on_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::BoardRendered(art) => println!("{}", art),
            GameEvent::TurnForfeited { agent, player } => {
                println!("{} (player {}) ran out of time", agent, player)
            }
            GameEvent::GameOver { winner, .. } => match winner {
                Some(name) => println!("Game end. Winner is {}", name),
                None => println!("Game end. Tie"),
            },
            _ => {}
        }
    }
}

/// Cancellation flag raised on Ctrl-C.
fn cancel_on_ctrl_c() -> watch::Receiver<bool> {
    let (tx, rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, stopping the game");
            let _ = tx.send(true);
        }
    });
    rx
}

fn random_agent(name: &str, seed: Option<u64>) -> RandomAgent {
    match seed {
        Some(seed) => RandomAgent::seeded(name, seed),
        None => RandomAgent::new(name),
    }
}

/// Play a single game
#[instrument(skip(config, settings))]
async fn run_play(config: ArenaConfig, settings: SettingsArgs, watch: bool, quiet: bool) -> Result<()> {
    let config = settings.apply(config);
    let config = if quiet { config.with_show_board(false) } else { config };
    config.validate()?;
    let start_player = config.start()?;
    let show_board = *config.show_board();
    info!(?config, "Starting game");

    let options = GameOptions::new(config.turn_timeout(), Some(cancel_on_ctrl_c()));
    let mut game = Game::with_config(*config.board())
        .with_options(options)
        .with_observer(ConsoleObserver);

    let seed = *config.seed();
    let mut agent1: Box<dyn Agent> = if watch {
        Box::new(random_agent("Random 0", seed))
    } else {
        Box::new(StdioHumanAgent::stdio("Human"))
    };
    let mut agent2 = random_agent("Random 1", seed.map(|s| s.wrapping_add(1)));

    match game
        .start_play(agent1.as_mut(), &mut agent2, start_player, show_board)
        .await
    {
        Ok(_) => Ok(()),
        Err(PlayError::Cancelled) => {
            println!("Game cancelled");
            // the stdin reader thread would keep the runtime alive
            std::process::exit(130);
        }
        Err(e) => Err(e.into()),
    }
}

/// Play a series of random games
#[instrument(skip(config, settings))]
async fn run_many(config: ArenaConfig, settings: SettingsArgs, games: usize, json: bool) -> Result<()> {
    let config = settings.apply(config);
    config.validate()?;
    let seed = *config.seed();

    let options = GameOptions::new(config.turn_timeout(), Some(cancel_on_ctrl_c()));
    let report = run_series(*config.board(), games, options, |game_number| {
        let offset = 2 * game_number as u64;
        let agent1: Box<dyn Agent> = Box::new(random_agent(
            "Random 0",
            seed.map(|s| s.wrapping_add(offset)),
        ));
        let agent2: Box<dyn Agent> = Box::new(random_agent(
            "Random 1",
            seed.map(|s| s.wrapping_add(offset + 1)),
        ));
        (agent1, agent2)
    })
    .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "{} games: player 0 won {}, player 1 won {}, {} ties",
            report.games, report.wins[0], report.wins[1], report.draws
        );
    }
    Ok(())
}
