//! The match state machine.
//!
//! A match is either active or terminal. Turns move an active match forward
//! and may end it; only [`Match::reset`] brings a terminal match back.

use crate::config::MatchConfig;
use crate::contracts::{Contract, MatchIsActive, TurnContract};
use crate::error::MatchError;
use crate::invariants::{InvariantSet, MatchInvariants, describe};
use crate::outcome::{MatchEnd, Scoreline, TurnOutcome};
use crate::provider::MoveProvider;
use crate::resolution::resolve;
use crate::state::MatchState;
use crate::types::{Decision, Move, Phase, Side, TurnResult};
use crate::validation::classify;
use std::cmp::Ordering;
use tracing::{debug, info, instrument, warn};

/// One match between a user and a bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub(crate) config: MatchConfig,
    pub(crate) state: MatchState,
}

impl Match {
    /// Creates a fresh match.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::InvalidConfiguration`] for non-positive thresholds.
    #[instrument]
    pub fn new(config: MatchConfig) -> Result<Self, MatchError> {
        config.validate()?;
        info!(
            win_target = config.win_target(),
            max_rounds = config.max_rounds(),
            "Creating match"
        );
        Ok(Self {
            config,
            state: MatchState::new(),
        })
    }

    /// Rebuilds a match from a stored record.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::InvalidConfiguration`] for non-positive thresholds
    /// and [`MatchError::InvalidState`] if the record violates an invariant.
    #[instrument(skip(state), fields(round = state.round(), game_over = state.game_over()))]
    pub fn restore(config: MatchConfig, state: MatchState) -> Result<Self, MatchError> {
        config.validate()?;
        let game = Self { config, state };
        MatchInvariants::check_all(&game).map_err(|violations| {
            let message = describe(&violations);
            warn!(%message, "Rejected stored match");
            MatchError::InvalidState(message)
        })?;
        debug!("Match restored");
        Ok(game)
    }

    /// Termination thresholds.
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Read-only view of the current state.
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// Owned copy of the current state.
    pub fn snapshot(&self) -> MatchState {
        self.state.clone()
    }

    /// Active or terminal.
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// Restores the match to its starting state. Always succeeds.
    #[instrument(skip(self), fields(round = self.state.round, game_over = self.state.game_over))]
    pub fn reset(&mut self) {
        self.state = MatchState::new();
        info!("Match reset");
    }

    /// Plays one turn, asking `provider` for the bot's move first.
    ///
    /// The provider never sees the user's token. If it fails, the match is
    /// left exactly as it was.
    ///
    /// # Errors
    ///
    /// - [`MatchError::MatchAlreadyOver`] on a terminal match (provider not called)
    /// - [`MatchError::MoveProviderFailure`] if the provider errors or returns
    ///   a bomb it no longer has
    #[instrument(skip(self, raw_token, provider), fields(provider_name = provider.name(), round = self.state.round))]
    pub async fn apply_turn<P>(
        &mut self,
        raw_token: &str,
        provider: &P,
    ) -> Result<TurnOutcome, MatchError>
    where
        P: MoveProvider + ?Sized,
    {
        MatchIsActive::check(self)?;

        let bomb_available = !self.state.bot_bomb_used;
        let bot_move = provider.provide_move(bomb_available).await.map_err(|e| {
            warn!(error = %e, "Move provider failed; match unchanged");
            MatchError::from(e)
        })?;
        debug!(%bot_move, "Bot move received");

        self.commit_turn(raw_token, bot_move)
    }

    /// Plays one turn against a bot move that was already chosen.
    ///
    /// # Errors
    ///
    /// - [`MatchError::MatchAlreadyOver`] on a terminal match
    /// - [`MatchError::MoveProviderFailure`] if `bot_move` is a spent bomb
    #[instrument(skip(self), fields(round = self.state.round))]
    pub fn commit_turn(
        &mut self,
        raw_token: &str,
        bot_move: Move,
    ) -> Result<TurnOutcome, MatchError> {
        TurnContract::pre(self, &bot_move)?;

        #[cfg(debug_assertions)]
        let before_turn = self.clone();

        let round = self.state.round;
        let before = Scoreline::from(&self.state);

        let classification = classify(raw_token, self.state.user_bomb_used);
        let result = resolve(classification.play, classification.decision, bot_move);

        match result {
            TurnResult::UserWin => self.state.user_score += 1,
            TurnResult::BotWin => self.state.bot_score += 1,
            TurnResult::Draw => self.state.draws += 1,
            TurnResult::Wasted => {}
        }

        if classification.decision == Decision::Valid && classification.play == Some(Move::Bomb) {
            debug!("User spent bomb");
            self.state.user_bomb_used = true;
        }
        if bot_move.is_bomb() {
            debug!("Bot spent bomb");
            self.state.bot_bomb_used = true;
        }

        self.state.round += 1;

        let ending = evaluate_end(&self.config, &self.state);
        if let Some(end) = ending {
            self.state.game_over = true;
            self.state.game_over_reason = end.to_string();
            info!(reason = %end, "Match over");
        }

        #[cfg(debug_assertions)]
        TurnContract::post(&before_turn, self)?;

        info!(
            round,
            user_move = ?classification.play,
            decision = %classification.decision,
            %bot_move,
            %result,
            user_score = self.state.user_score,
            bot_score = self.state.bot_score,
            draws = self.state.draws,
            "Turn committed"
        );

        Ok(TurnOutcome {
            round,
            user_move: classification.play,
            decision: classification.decision,
            bot_move,
            result,
            before,
            after: Scoreline::from(&self.state),
            user_bomb_used: self.state.user_bomb_used,
            bot_bomb_used: self.state.bot_bomb_used,
            game_over: self.state.game_over,
            ending,
        })
    }
}

impl Default for Match {
    fn default() -> Self {
        Self {
            config: MatchConfig::default(),
            state: MatchState::new(),
        }
    }
}

/// Decides whether the match is over given the state after a turn.
///
/// Reaching the win target takes precedence over the round cap.
pub(crate) fn evaluate_end(config: &MatchConfig, state: &MatchState) -> Option<MatchEnd> {
    let target = config.win_target();
    if state.user_score() >= target {
        return Some(MatchEnd::TargetReached {
            winner: Side::User,
            target,
        });
    }
    if state.bot_score() >= target {
        return Some(MatchEnd::TargetReached {
            winner: Side::Bot,
            target,
        });
    }

    let rounds = config.max_rounds();
    if state.round() <= rounds {
        return None;
    }

    Some(match state.user_score().cmp(&state.bot_score()) {
        Ordering::Greater => MatchEnd::HigherScore {
            winner: Side::User,
            rounds,
        },
        Ordering::Less => MatchEnd::HigherScore {
            winner: Side::Bot,
            rounds,
        },
        Ordering::Equal => MatchEnd::Tied { rounds },
    })
}
