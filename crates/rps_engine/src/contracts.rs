//! Contract-based validation for turns.
//!
//! Contracts define correctness through preconditions and postconditions:
//! {P} turn {Q}.

use crate::error::{MatchError, ProviderError};
use crate::game::Match;
use crate::invariants::{InvariantSet, MatchInvariants, describe};
use crate::types::Move;
use tracing::{instrument, warn};

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MatchError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), MatchError>;
}

// ─────────────────────────────────────────────────────────────
//  Turn Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the match must still be active.
pub struct MatchIsActive;

impl MatchIsActive {
    /// Fails with [`MatchError::MatchAlreadyOver`] on a terminal match.
    #[instrument(skip(game))]
    pub fn check(game: &Match) -> Result<(), MatchError> {
        if game.state().game_over() {
            warn!(reason = %game.state().game_over_reason(), "Turn submitted to finished match");
            Err(MatchError::MatchAlreadyOver)
        } else {
            Ok(())
        }
    }
}

/// Precondition: the bot only plays its bomb while it still has it.
pub struct BotBombAvailable;

impl BotBombAvailable {
    /// Fails with [`MatchError::MoveProviderFailure`] when the provider
    /// returned a spent bomb.
    #[instrument(skip(game))]
    pub fn check(bot_move: &Move, game: &Match) -> Result<(), MatchError> {
        if bot_move.is_bomb() && game.state().bot_bomb_used() {
            warn!("Provider returned bomb after it was spent");
            Err(ProviderError::new("provider returned bomb after it was spent").into())
        } else {
            Ok(())
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Turn Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for committing a turn, keyed on the bot's move.
///
/// Preconditions:
/// - Match is active
/// - Bot bomb is not replayed
///
/// Postconditions:
/// - Round advanced by exactly one
/// - Scores and draws never decrease, and at most one of them moved by one
/// - Bomb flags never revert
/// - All match invariants hold
pub struct TurnContract;

impl Contract<Match, Move> for TurnContract {
    fn pre(game: &Match, bot_move: &Move) -> Result<(), MatchError> {
        MatchIsActive::check(game)?;
        BotBombAvailable::check(bot_move, game)?;
        Ok(())
    }

    fn post(before: &Match, after: &Match) -> Result<(), MatchError> {
        let (b, a) = (before.state(), after.state());
        let mut failures = Vec::new();

        if a.round() != b.round() + 1 {
            failures.push("round did not advance by one".to_string());
        }

        let deltas = [
            (b.user_score(), a.user_score()),
            (b.bot_score(), a.bot_score()),
            (b.draws(), a.draws()),
        ];
        if deltas.iter().any(|(old, new)| new < old) {
            failures.push("a tally decreased".to_string());
        }
        let moved: u32 = deltas.iter().map(|(old, new)| new.saturating_sub(*old)).sum();
        if moved > 1 {
            failures.push("more than one tally moved".to_string());
        }

        if (b.user_bomb_used() && !a.user_bomb_used()) || (b.bot_bomb_used() && !a.bot_bomb_used())
        {
            failures.push("a bomb flag was cleared".to_string());
        }

        if let Err(violations) = MatchInvariants::check_all(after) {
            failures.push(describe(&violations));
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(MatchError::InvalidState(format!(
                "Postcondition failed: {}",
                failures.join("; ")
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precondition_active_match() {
        let game = Match::default();
        assert!(TurnContract::pre(&game, &Move::Rock).is_ok());
    }

    #[test]
    fn test_precondition_finished_match() {
        let mut game = Match::default();
        for _ in 0..3 {
            game.commit_turn("paper", Move::Rock).unwrap();
        }
        assert_eq!(
            TurnContract::pre(&game, &Move::Rock),
            Err(MatchError::MatchAlreadyOver)
        );
    }

    #[test]
    fn test_precondition_spent_bot_bomb() {
        let mut game = Match::default();
        game.commit_turn("rock", Move::Bomb).unwrap();
        assert!(matches!(
            TurnContract::pre(&game, &Move::Bomb),
            Err(MatchError::MoveProviderFailure(_))
        ));
    }

    #[test]
    fn test_postcondition_holds_after_turn() {
        let before = Match::default();
        let mut after = before.clone();
        after.commit_turn("scissors", Move::Paper).unwrap();
        assert!(TurnContract::post(&before, &after).is_ok());
    }

    #[test]
    fn test_postcondition_detects_corruption() {
        let before = Match::default();
        let mut after = before.clone();
        after.commit_turn("scissors", Move::Paper).unwrap();
        after.state.bot_score = 1;

        assert!(matches!(
            TurnContract::post(&before, &after),
            Err(MatchError::InvalidState(_))
        ));
    }
}
