//! The mutable match record.

use crate::types::{Phase, Side};
use serde::{Deserialize, Serialize};

/// Complete state of one match.
///
/// Serializes as a flat record so it can be stored in any key-value or
/// session store. Mutation happens only through [`crate::Match`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchState {
    pub(crate) round: u32,
    pub(crate) user_score: u32,
    pub(crate) bot_score: u32,
    pub(crate) draws: u32,
    pub(crate) user_bomb_used: bool,
    pub(crate) bot_bomb_used: bool,
    pub(crate) game_over: bool,
    pub(crate) game_over_reason: String,
}

impl MatchState {
    /// Creates the state of a fresh match.
    pub fn new() -> Self {
        Self {
            round: 1,
            user_score: 0,
            bot_score: 0,
            draws: 0,
            user_bomb_used: false,
            bot_bomb_used: false,
            game_over: false,
            game_over_reason: String::new(),
        }
    }

    /// Round about to be played (or one past the last round once over).
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Turns won by the user.
    pub fn user_score(&self) -> u32 {
        self.user_score
    }

    /// Turns won by the bot.
    pub fn bot_score(&self) -> u32 {
        self.bot_score
    }

    /// Turns drawn.
    pub fn draws(&self) -> u32 {
        self.draws
    }

    /// Whether the user has spent their bomb.
    pub fn user_bomb_used(&self) -> bool {
        self.user_bomb_used
    }

    /// Whether the bot has spent its bomb.
    pub fn bot_bomb_used(&self) -> bool {
        self.bot_bomb_used
    }

    /// Whether the match has ended.
    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Why the match ended. Empty while the match is active.
    pub fn game_over_reason(&self) -> &str {
        &self.game_over_reason
    }

    /// Active or terminal.
    pub fn phase(&self) -> Phase {
        if self.game_over {
            Phase::Terminal
        } else {
            Phase::Active
        }
    }

    /// Score of one side.
    pub fn score_of(&self, side: Side) -> u32 {
        match side {
            Side::User => self.user_score,
            Side::Bot => self.bot_score,
        }
    }

    /// Whether one side has spent its bomb.
    pub fn bomb_used_by(&self, side: Side) -> bool {
        match side {
            Side::User => self.user_bomb_used,
            Side::Bot => self.bot_bomb_used,
        }
    }

    /// Number of turns already resolved.
    pub fn turns_played(&self) -> u32 {
        self.round.saturating_sub(1)
    }
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new()
    }
}
