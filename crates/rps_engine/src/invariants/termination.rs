//! Termination invariant: the game-over flag agrees with the thresholds.

use super::Invariant;
use crate::game::{Match, evaluate_end};

/// Invariant: `game_over` is set exactly when a side reached the win target
/// or the round counter passed the round cap.
pub struct TerminationInvariant;

impl Invariant<Match> for TerminationInvariant {
    fn holds(game: &Match) -> bool {
        game.state().game_over() == evaluate_end(game.config(), game.state()).is_some()
    }

    fn description() -> &'static str {
        "Game over exactly when the win target or round cap is reached"
    }
}
