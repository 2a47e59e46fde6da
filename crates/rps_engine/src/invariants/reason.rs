//! Reason invariant: a finished match always says why.

use super::Invariant;
use crate::game::Match;

/// Invariant: `game_over_reason` is non-empty exactly when `game_over` is set.
pub struct ReasonMatchesStatusInvariant;

impl Invariant<Match> for ReasonMatchesStatusInvariant {
    fn holds(game: &Match) -> bool {
        let state = game.state();
        state.game_over() != state.game_over_reason().is_empty()
    }

    fn description() -> &'static str {
        "Game-over reason is present exactly when the match is over"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_match_without_reason_holds() {
        assert!(ReasonMatchesStatusInvariant::holds(&Match::default()));
    }

    #[test]
    fn test_reason_on_active_match_violates() {
        let mut game = Match::default();
        game.state.game_over_reason = "User wins".to_string();
        assert!(!ReasonMatchesStatusInvariant::holds(&game));
    }
}
