//! RPS Judge library - host side of the Rock-Paper-Scissors-Bomb referee
//!
//! The turn rules live in [`rps_engine`]; this crate wires them to real
//! opponents, storage and a terminal.
//!
//! # Architecture
//!
//! - **Bot**: move providers (random, language model) and the fallback policy
//! - **Session**: one match per session id, written through to a store
//! - **Store**: in-memory or JSON file persistence of flat match records
//! - **Render / REPL**: text views and the interactive play loop
//!
//! # Example
//!
//! ```no_run
//! use rps_judge::{RandomMoveProvider, SessionManager, MatchConfig};
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let manager = SessionManager::in_memory(
//!     MatchConfig::default(),
//!     Arc::new(RandomMoveProvider::seeded(7)),
//! )?;
//! let outcome = manager.play_turn("alice", "rock").await?;
//! println!("{}", outcome.result());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod bot;
mod judge_config;
mod llm_client;
mod render;
mod repl;
mod session;
mod store;

// Crate-level exports - Configuration
pub use judge_config::{BotConfig, BotKind, ConfigError, JudgeConfig, StoreConfig};

// Crate-level exports - Bots
pub use bot::{FallbackMoveProvider, LlmMoveProvider, bot_prompt, build_provider, parse_reply};

// Crate-level exports - LLM client
pub use llm_client::{LlmClient, LlmConfig, LlmError, LlmProvider};

// Crate-level exports - Session management
pub use session::{SessionError, SessionId, SessionManager};
pub use store::{JsonFileStore, MemoryStore, SessionStore, StoreError};

// Crate-level exports - Presentation
pub use render::{next_move_hint, render_new_game, render_round, render_status, result_label};
pub use repl::{SpecialCommand, run_repl};

// Crate-level exports - Engine types
pub use rps_engine::{
    Decision, Match, MatchConfig, MatchEnd, MatchError, MatchState, Move, MoveProvider, Phase,
    ProviderError, RandomMoveProvider, Scoreline, ScriptedMoveProvider, Side, TurnOutcome,
    TurnResult,
};
