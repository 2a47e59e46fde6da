//! Tally invariant: scored turns never outnumber played turns.

use super::Invariant;
use crate::game::Match;

/// Invariant: `round >= 1` and wins plus draws fit in the turns played.
///
/// Wasted turns consume a round without scoring, so the tally may fall
/// short of the turn count but never exceed it.
pub struct TallyBoundedInvariant;

impl Invariant<Match> for TallyBoundedInvariant {
    fn holds(game: &Match) -> bool {
        let state = game.state();
        let tally = u64::from(state.user_score())
            + u64::from(state.bot_score())
            + u64::from(state.draws());
        state.round() >= 1 && tally <= u64::from(state.turns_played())
    }

    fn description() -> &'static str {
        "Wins and draws never exceed turns played"
    }
}
