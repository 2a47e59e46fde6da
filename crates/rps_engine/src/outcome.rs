//! Snapshots returned to the host after each turn.

use crate::rules::rule_text;
use crate::state::MatchState;
use crate::types::{Decision, Move, Side, TurnResult};
use serde::{Deserialize, Serialize};

/// Scores at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, derive_new::new)]
pub struct Scoreline {
    /// User wins.
    pub user: u32,
    /// Bot wins.
    pub bot: u32,
    /// Draws.
    pub draws: u32,
}

impl From<&MatchState> for Scoreline {
    fn from(state: &MatchState) -> Self {
        Self::new(state.user_score(), state.bot_score(), state.draws())
    }
}

impl std::fmt::Display for Scoreline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "You {} | Bot {} | Draws {}", self.user, self.bot, self.draws)
    }
}

/// Why a match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchEnd {
    /// A side reached the win target.
    TargetReached {
        /// The side that reached it.
        winner: Side,
        /// The target.
        target: u32,
    },
    /// The round cap was hit and one side was ahead.
    HigherScore {
        /// The side ahead.
        winner: Side,
        /// The round cap.
        rounds: u32,
    },
    /// The round cap was hit with level scores.
    Tied {
        /// The round cap.
        rounds: u32,
    },
}

impl MatchEnd {
    /// The winning side, `None` for a tie.
    pub fn winner(&self) -> Option<Side> {
        match self {
            MatchEnd::TargetReached { winner, .. } | MatchEnd::HigherScore { winner, .. } => {
                Some(*winner)
            }
            MatchEnd::Tied { .. } => None,
        }
    }
}

impl std::fmt::Display for MatchEnd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchEnd::TargetReached { winner, target } => {
                write!(f, "{} wins: reached {} wins", winner, target)
            }
            MatchEnd::HigherScore { winner, rounds } => {
                write!(f, "{} wins: higher score after {} rounds", winner, rounds)
            }
            MatchEnd::Tied { rounds } => write!(f, "Match tied after {} rounds", rounds),
        }
    }
}

/// Everything that happened in one turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnOutcome {
    pub(crate) round: u32,
    pub(crate) user_move: Option<Move>,
    pub(crate) decision: Decision,
    pub(crate) bot_move: Move,
    pub(crate) result: TurnResult,
    pub(crate) before: Scoreline,
    pub(crate) after: Scoreline,
    pub(crate) user_bomb_used: bool,
    pub(crate) bot_bomb_used: bool,
    pub(crate) game_over: bool,
    pub(crate) ending: Option<MatchEnd>,
}

impl TurnOutcome {
    /// The round this turn was played in.
    pub fn round(&self) -> u32 {
        self.round
    }

    /// The user's recognized move, `None` when unclear.
    pub fn user_move(&self) -> Option<Move> {
        self.user_move
    }

    /// Classification of the user's token.
    pub fn decision(&self) -> Decision {
        self.decision
    }

    /// The bot's move.
    pub fn bot_move(&self) -> Move {
        self.bot_move
    }

    /// Turn result.
    pub fn result(&self) -> TurnResult {
        self.result
    }

    /// Scores before the turn.
    pub fn before(&self) -> Scoreline {
        self.before
    }

    /// Scores after the turn.
    pub fn after(&self) -> Scoreline {
        self.after
    }

    /// User bomb flag after the turn.
    pub fn user_bomb_used(&self) -> bool {
        self.user_bomb_used
    }

    /// Bot bomb flag after the turn.
    pub fn bot_bomb_used(&self) -> bool {
        self.bot_bomb_used
    }

    /// Whether this turn ended the match.
    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// How the match ended, when it did.
    pub fn ending(&self) -> Option<MatchEnd> {
        self.ending
    }

    /// Judge's explanation of the decision.
    pub fn explanation(&self) -> String {
        match (self.decision, self.user_move) {
            (Decision::Valid, Some(user_move)) => rule_text(user_move, self.bot_move),
            (Decision::Invalid, _) => "bomb already used".to_string(),
            _ => "move not recognized".to_string(),
        }
    }
}
