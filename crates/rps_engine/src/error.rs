//! Error types for the match engine.

use derive_more::{Display, Error, From};
use tracing::{error, instrument};

/// Failure reported by a [`crate::MoveProvider`].
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Move provider error: {} at {}:{}", message, file, line)]
pub struct ProviderError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ProviderError {
    /// Creates a new provider error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        let message = message.into();
        error!(error_message = %message, "Move provider error created");
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Errors raised by match-level operations.
///
/// Unclear or invalid move tokens are not errors; they produce a wasted turn.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum MatchError {
    /// A turn was submitted after the match ended. Reset to play again.
    #[display("Match is already over")]
    #[from(ignore)]
    MatchAlreadyOver,

    /// The move provider failed or broke its contract. The match is unchanged.
    #[display("Move provider failed: {}", _0)]
    MoveProviderFailure(ProviderError),

    /// Win target or round cap is not positive.
    #[display("Invalid configuration: {}", _0)]
    #[from(ignore)]
    InvalidConfiguration(#[error(not(source))] String),

    /// A restored record violates the match invariants.
    #[display("Invalid match state: {}", _0)]
    #[from(ignore)]
    InvalidState(#[error(not(source))] String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_tracks_location() {
        let err = ProviderError::new("timed out");
        assert_eq!(err.message, "timed out");
        assert!(err.file.ends_with("error.rs"));
        assert!(err.to_string().contains("timed out"));
    }

    #[test]
    fn test_provider_error_converts_into_match_error() {
        let err: MatchError = ProviderError::new("boom").into();
        assert!(matches!(err, MatchError::MoveProviderFailure(_)));
    }
}
