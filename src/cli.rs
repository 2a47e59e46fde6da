//! Command-line interface for rps_judge.

use clap::{Args, Parser, Subcommand};
use rps_judge::BotKind;
use std::path::PathBuf;

/// RPS Judge - Rock-Paper-Scissors with a single-use bomb
#[derive(Parser, Debug)]
#[command(name = "rps_judge")]
#[command(about = "Referee a best-of-five Rock-Paper-Scissors-Bomb match", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a match interactively on stdin
    Play {
        /// Session to play in
        #[arg(short, long, default_value = "local")]
        session: String,

        /// Configuration and overrides
        #[command(flatten)]
        settings: Settings,
    },

    /// Print the current standing of a session
    State {
        /// Session to show
        #[arg(short, long)]
        session: String,

        /// Configuration and overrides
        #[command(flatten)]
        settings: Settings,
    },

    /// List every known session in the store
    Sessions {
        /// Configuration and overrides
        #[command(flatten)]
        settings: Settings,
    },
}

/// Options shared by every command. Flags override the config file.
#[derive(Args, Debug, Clone)]
pub struct Settings {
    /// Path to judge config file
    #[arg(short, long, default_value = "rps_judge.toml")]
    pub config: PathBuf,

    /// Wins needed to end the match early
    #[arg(long)]
    pub win_target: Option<u32>,

    /// Rounds before the match is decided on score
    #[arg(long)]
    pub max_rounds: Option<u32>,

    /// Opponent implementation
    #[arg(long, value_enum)]
    pub bot: Option<BotKind>,

    /// Seed for the bot's random choices
    #[arg(long)]
    pub seed: Option<u64>,

    /// JSON file holding every session
    #[arg(long)]
    pub store: Option<PathBuf>,
}
