//! Core domain types for RPS+Bomb.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// A move either side can play.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Move {
    /// Beats scissors.
    Rock,
    /// Beats rock.
    Paper,
    /// Beats paper.
    Scissors,
    /// Beats every other move. Usable once per side per match.
    Bomb,
}

impl Move {
    /// The three moves that are always available.
    pub const STANDARD: [Move; 3] = [Move::Rock, Move::Paper, Move::Scissors];

    /// Returns true for the single-use move.
    pub fn is_bomb(self) -> bool {
        matches!(self, Move::Bomb)
    }
}

/// One of the two seats at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// The human player.
    User,
    /// The automated opponent.
    Bot,
}

/// Classification of a submitted move token.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    /// Token names a move the side may play.
    Valid,
    /// Token names the bomb, but the side already spent it.
    Invalid,
    /// Token does not name any move.
    Unclear,
}

/// Outcome of a single turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TurnResult {
    /// User's move beat the bot's.
    UserWin,
    /// Bot's move beat the user's.
    BotWin,
    /// Neither move won.
    Draw,
    /// User input was invalid or unclear; the round is consumed with no score.
    Wasted,
}

impl TurnResult {
    /// The side credited with this turn, if any.
    pub fn winner(self) -> Option<Side> {
        match self {
            TurnResult::UserWin => Some(Side::User),
            TurnResult::BotWin => Some(Side::Bot),
            TurnResult::Draw | TurnResult::Wasted => None,
        }
    }
}

/// How one move fares against another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Clash {
    /// The first move wins.
    Win,
    /// The first move loses.
    Lose,
    /// Neither move wins.
    Draw,
}

impl Clash {
    /// The same clash seen from the other side.
    pub fn inverse(self) -> Self {
        match self {
            Clash::Win => Clash::Lose,
            Clash::Lose => Clash::Win,
            Clash::Draw => Clash::Draw,
        }
    }
}

/// Active matches accept turns; terminal matches only accept a reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Turns may be played.
    Active,
    /// The match has ended.
    Terminal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_move_display_is_lowercase() {
        let names: Vec<String> = Move::iter().map(|m| m.to_string()).collect();
        assert_eq!(names, vec!["rock", "paper", "scissors", "bomb"]);
    }

    #[test]
    fn test_decision_display_matches_judge_labels() {
        assert_eq!(Decision::Valid.to_string(), "VALID");
        assert_eq!(Decision::Invalid.to_string(), "INVALID");
        assert_eq!(Decision::Unclear.to_string(), "UNCLEAR");
    }

    #[test]
    fn test_turn_result_serializes_snake_case() {
        let json = serde_json::to_string(&TurnResult::UserWin).unwrap();
        assert_eq!(json, "\"user_win\"");
    }

    #[test]
    fn test_clash_inverse() {
        assert_eq!(Clash::Win.inverse(), Clash::Lose);
        assert_eq!(Clash::Lose.inverse(), Clash::Win);
        assert_eq!(Clash::Draw.inverse(), Clash::Draw);
    }

    #[test]
    fn test_winner_of_result() {
        assert_eq!(TurnResult::UserWin.winner(), Some(Side::User));
        assert_eq!(TurnResult::BotWin.winner(), Some(Side::Bot));
        assert_eq!(TurnResult::Wasted.winner(), None);
    }
}
