//! Turn resolution from classified moves.

use crate::rules::beats;
use crate::types::{Clash, Decision, Move, TurnResult};
use tracing::{debug, instrument};

/// Resolves a turn from the user's classified move and the bot's move.
///
/// Any decision other than [`Decision::Valid`] wastes the turn regardless of
/// what the bot played.
#[instrument]
pub fn resolve(user_move: Option<Move>, user_decision: Decision, bot_move: Move) -> TurnResult {
    let result = match (user_decision, user_move) {
        (Decision::Valid, Some(user_move)) => match beats(user_move, bot_move) {
            Clash::Win => TurnResult::UserWin,
            Clash::Lose => TurnResult::BotWin,
            Clash::Draw => TurnResult::Draw,
        },
        _ => TurnResult::Wasted,
    };

    debug!(%result, "Resolved turn");
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_paper_beats_rock() {
        assert_eq!(
            resolve(Some(Move::Paper), Decision::Valid, Move::Rock),
            TurnResult::UserWin
        );
    }

    #[test]
    fn test_bot_bomb_beats_user_scissors() {
        assert_eq!(
            resolve(Some(Move::Scissors), Decision::Valid, Move::Bomb),
            TurnResult::BotWin
        );
    }

    #[test]
    fn test_bomb_vs_bomb_draws() {
        assert_eq!(
            resolve(Some(Move::Bomb), Decision::Valid, Move::Bomb),
            TurnResult::Draw
        );
    }

    #[test]
    fn test_non_valid_decisions_waste_turn_against_any_bot_move() {
        for bot_move in Move::iter() {
            assert_eq!(
                resolve(Some(Move::Bomb), Decision::Invalid, bot_move),
                TurnResult::Wasted
            );
            assert_eq!(resolve(None, Decision::Unclear, bot_move), TurnResult::Wasted);
        }
    }
}
