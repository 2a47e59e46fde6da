//! Turn resolution engine for Rock-Paper-Scissors with a single-use bomb.
//!
//! The engine is a deterministic state machine. It takes move tokens that an
//! upstream classifier already reduced to a short spelling, asks a
//! [`MoveProvider`] for the bot's move, and resolves the turn against a rule
//! table that covers all sixteen pairings.
//!
//! # Example
//!
//! ```
//! use rps_engine::{Match, Move, TurnResult};
//!
//! let mut game = Match::default();
//! let outcome = game.commit_turn("p", Move::Rock).unwrap();
//! assert_eq!(outcome.result(), TurnResult::UserWin);
//! assert_eq!(game.state().round(), 2);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod contracts;
mod error;
mod game;
mod invariants;
mod outcome;
mod provider;
mod resolution;
mod rules;
mod state;
mod types;
mod validation;

pub use config::{MAX_ROUNDS, MatchConfig, WIN_TARGET};
pub use contracts::{BotBombAvailable, Contract, MatchIsActive, TurnContract};
pub use error::{MatchError, ProviderError};
pub use game::Match;
pub use invariants::{
    Invariant, InvariantSet, InvariantViolation, MatchInvariants, ReasonMatchesStatusInvariant,
    TallyBoundedInvariant, TerminationInvariant,
};
pub use outcome::{MatchEnd, Scoreline, TurnOutcome};
pub use provider::{MoveProvider, RandomMoveProvider, ScriptedMoveProvider, legal_moves};
pub use resolution::resolve;
pub use rules::{beats, rule_text};
pub use state::MatchState;
pub use types::{Clash, Decision, Move, Phase, Side, TurnResult};
pub use validation::{Classification, classify, parse_move};
