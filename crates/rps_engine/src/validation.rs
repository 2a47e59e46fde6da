//! Move token classification.
//!
//! Tokens arrive already reduced by an upstream intent classifier; this stage
//! only maps the accepted spellings onto a [`Move`] and applies the
//! single-use bomb rule.

use crate::types::{Decision, Move};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

const ROCK: &[&str] = &["rock", "r", "stone", "✊", "👊", "🪨"];
const PAPER: &[&str] = &["paper", "p", "✋", "🖐", "🖐\u{fe0f}", "📄"];
const SCISSORS: &[&str] = &["scissors", "scissor", "s", "✌", "✌\u{fe0f}", "✂", "✂\u{fe0f}"];
const BOMB: &[&str] = &["bomb", "b", "💣"];

/// A classified token: the move it names (if any) and whether it may be played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
pub struct Classification {
    /// The recognized move, `None` when the token is unclear.
    pub play: Option<Move>,
    /// Whether the move may be played.
    pub decision: Decision,
}

/// Maps an accepted spelling to a move.
///
/// Matching is case-insensitive and ignores surrounding whitespace.
pub fn parse_move(raw: &str) -> Option<Move> {
    let token = raw.trim().to_lowercase();
    let table: [(&[&str], Move); 4] = [
        (ROCK, Move::Rock),
        (PAPER, Move::Paper),
        (SCISSORS, Move::Scissors),
        (BOMB, Move::Bomb),
    ];

    table
        .iter()
        .find(|(spellings, _)| spellings.contains(&token.as_str()))
        .map(|(_, mov)| *mov)
}

/// Classifies a raw token for a side whose bomb may already be spent.
#[instrument]
pub fn classify(raw: &str, bomb_already_used: bool) -> Classification {
    let classification = match parse_move(raw) {
        None => Classification::new(None, Decision::Unclear),
        Some(Move::Bomb) if bomb_already_used => {
            Classification::new(Some(Move::Bomb), Decision::Invalid)
        }
        Some(mov) => Classification::new(Some(mov), Decision::Valid),
    };

    debug!(play = ?classification.play, decision = %classification.decision, "Classified token");
    classification
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortcuts() {
        assert_eq!(parse_move("r"), Some(Move::Rock));
        assert_eq!(parse_move("p"), Some(Move::Paper));
        assert_eq!(parse_move("s"), Some(Move::Scissors));
        assert_eq!(parse_move("b"), Some(Move::Bomb));
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        assert_eq!(parse_move("  ROCK "), Some(Move::Rock));
        assert_eq!(parse_move("Scissors"), Some(Move::Scissors));
    }

    #[test]
    fn test_emoji() {
        assert_eq!(parse_move("✊"), Some(Move::Rock));
        assert_eq!(parse_move("🖐️"), Some(Move::Paper));
        assert_eq!(parse_move("✌️"), Some(Move::Scissors));
        assert_eq!(parse_move("💣"), Some(Move::Bomb));
    }

    #[test]
    fn test_unrecognized_is_unclear() {
        for raw in ["", "rok", "rock paper", "unclear", "lizard"] {
            assert_eq!(
                classify(raw, false),
                Classification::new(None, Decision::Unclear),
                "{raw:?}"
            );
        }
    }

    #[test]
    fn test_paper_shortcut_is_valid() {
        assert_eq!(
            classify("p", false),
            Classification::new(Some(Move::Paper), Decision::Valid)
        );
    }

    #[test]
    fn test_spent_bomb_is_invalid() {
        assert_eq!(
            classify("bomb", true),
            Classification::new(Some(Move::Bomb), Decision::Invalid)
        );
        assert_eq!(
            classify("bomb", false),
            Classification::new(Some(Move::Bomb), Decision::Valid)
        );
    }

    #[test]
    fn test_spent_bomb_does_not_affect_other_moves() {
        assert_eq!(classify("rock", true).decision, Decision::Valid);
    }

    proptest::proptest! {
        #[test]
        fn prop_only_recognized_tokens_carry_a_move(raw in ".{0,12}", spent in proptest::bool::ANY) {
            let classification = classify(&raw, spent);
            proptest::prop_assert_eq!(classification.play, parse_move(&raw));
            proptest::prop_assert_eq!(
                classification.decision == Decision::Unclear,
                classification.play.is_none()
            );
            proptest::prop_assert_eq!(
                classification.decision == Decision::Invalid,
                spent && classification.play == Some(Move::Bomb)
            );
        }

        #[test]
        fn prop_padding_and_case_ignored(idx in 0usize..4, pad in "[ \t]{0,3}") {
            let name = ["rock", "paper", "scissors", "bomb"][idx];
            let raw = format!("{pad}{}{pad}", name.to_uppercase());
            proptest::prop_assert_eq!(parse_move(&raw), parse_move(name));
        }
    }
}
