//! RPS Judge - interactive Rock-Paper-Scissors-Bomb referee.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command, Settings};
use rps_judge::{
    JsonFileStore, JudgeConfig, MemoryStore, RandomMoveProvider, SessionManager, SessionStore,
    build_provider, render_status, run_repl,
};
use std::sync::Arc;
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    initialize_tracing();

    let cli = Cli::parse();

    match cli.command {
        Command::Play { session, settings } => run_play(session, settings).await,
        Command::State { session, settings } => run_state(session, settings).await,
        Command::Sessions { settings } => run_sessions(settings),
    }
}

/// Logs go to stderr so they never interleave with the game on stdout.
fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Loads the config file (defaults when absent) and applies flag overrides.
#[instrument(skip(settings), fields(config_path = %settings.config.display()))]
fn load_config(settings: &Settings) -> Result<JudgeConfig> {
    let mut config = if settings.config.exists() {
        JudgeConfig::from_file(&settings.config)?
    } else {
        info!("Config file not found, using defaults");
        JudgeConfig::default()
    };

    if let Some(win_target) = settings.win_target {
        config = config.with_win_target(win_target);
    }
    if let Some(max_rounds) = settings.max_rounds {
        config = config.with_max_rounds(max_rounds);
    }
    if let Some(kind) = settings.bot {
        config = config.with_bot_kind(kind);
    }
    if let Some(seed) = settings.seed {
        config = config.with_seed(seed);
    }
    if let Some(path) = &settings.store {
        config = config.with_store_path(path.clone());
    }

    Ok(config)
}

fn open_store(config: &JudgeConfig) -> Arc<dyn SessionStore> {
    match config.store().path() {
        Some(path) => Arc::new(JsonFileStore::new(path)),
        None => Arc::new(MemoryStore::new()),
    }
}

/// Plays interactively on stdin/stdout.
#[instrument(skip(settings))]
async fn run_play(session: String, settings: Settings) -> Result<()> {
    let config = load_config(&settings)?;
    let provider = build_provider(config.bot())?;
    let manager = SessionManager::new(config.match_config()?, provider, open_store(&config))?;

    info!(session = %session, "Starting match");
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    run_repl(&manager, &session, stdin, &mut stdout).await?;
    Ok(())
}

/// Prints one session's standing without playing.
#[instrument(skip(settings))]
async fn run_state(session: String, settings: Settings) -> Result<()> {
    let config = load_config(&settings)?;
    let match_config = config.match_config()?;
    // Never asked for a move; any provider will do.
    let provider = Arc::new(RandomMoveProvider::new());
    let manager = SessionManager::new(match_config, provider, open_store(&config))?;

    let state = manager.state(&session).await?;
    println!("{}", render_status(&state, &match_config));
    Ok(())
}

/// Lists the sessions in the configured store.
#[instrument(skip(settings))]
fn run_sessions(settings: Settings) -> Result<()> {
    let config = load_config(&settings)?;
    let ids = open_store(&config).ids()?;

    if ids.is_empty() {
        println!("No stored sessions");
    }
    for id in ids {
        println!("{}", id);
    }
    Ok(())
}
