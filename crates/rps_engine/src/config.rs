//! Match configuration.

use crate::error::MatchError;
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

/// Wins needed to end a match early.
pub const WIN_TARGET: u32 = 3;

/// Rounds played before the match is decided on score.
pub const MAX_ROUNDS: u32 = 5;

/// Termination thresholds for a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    #[serde(default = "default_win_target")]
    win_target: u32,
    #[serde(default = "default_max_rounds")]
    max_rounds: u32,
}

fn default_win_target() -> u32 {
    WIN_TARGET
}

fn default_max_rounds() -> u32 {
    MAX_ROUNDS
}

impl MatchConfig {
    /// Creates a configuration, rejecting non-positive thresholds.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::InvalidConfiguration`] if either value is zero.
    #[instrument]
    pub fn new(win_target: u32, max_rounds: u32) -> Result<Self, MatchError> {
        let config = Self {
            win_target,
            max_rounds,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks that both thresholds are positive.
    ///
    /// Deserialized configs bypass [`MatchConfig::new`], so callers loading
    /// from a file should validate explicitly.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::InvalidConfiguration`] if either value is zero.
    pub fn validate(&self) -> Result<(), MatchError> {
        if self.win_target == 0 {
            warn!("Rejected win target of zero");
            return Err(MatchError::InvalidConfiguration(
                "win_target must be positive".to_string(),
            ));
        }
        if self.max_rounds == 0 {
            warn!("Rejected max rounds of zero");
            return Err(MatchError::InvalidConfiguration(
                "max_rounds must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Score needed for early termination.
    pub fn win_target(&self) -> u32 {
        self.win_target
    }

    /// Round cap before the match is decided on score.
    pub fn max_rounds(&self) -> u32 {
        self.max_rounds
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            win_target: WIN_TARGET,
            max_rounds: MAX_ROUNDS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MatchConfig::default();
        assert_eq!(config.win_target(), 3);
        assert_eq!(config.max_rounds(), 5);
    }

    #[test]
    fn test_zero_thresholds_rejected() {
        assert!(matches!(
            MatchConfig::new(0, 5),
            Err(MatchError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            MatchConfig::new(3, 0),
            Err(MatchError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let config: MatchConfig = serde_json::from_str(r#"{"max_rounds": 7}"#).unwrap();
        assert_eq!(config.win_target(), 3);
        assert_eq!(config.max_rounds(), 7);
    }
}
