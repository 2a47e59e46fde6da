//! Text views shown to the player.

use rps_engine::{MatchConfig, MatchState, Scoreline, TurnOutcome, TurnResult};

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Short celebration line for a turn result.
pub fn result_label(result: TurnResult) -> &'static str {
    match result {
        TurnResult::UserWin => "You win! 🎉",
        TurnResult::BotWin => "Bot wins! 🤖",
        TurnResult::Draw => "Draw! 🤝",
        TurnResult::Wasted => "Wasted turn ❌",
    }
}

/// Hint for the next move, noting a spent bomb.
pub fn next_move_hint(user_bomb_used: bool) -> String {
    let note = if user_bomb_used { " (your bomb used)" } else { "" };
    format!("Next: rock, paper, scissors, or bomb{}", note)
}

/// Summary block printed after every turn.
pub fn render_round(outcome: &TurnOutcome, config: &MatchConfig) -> String {
    let user_move = outcome
        .user_move()
        .map(|m| m.to_string())
        .unwrap_or_else(|| "unclear".to_string());

    let mut lines = vec![
        RULE.to_string(),
        format!("Round {}/{}", outcome.round(), config.max_rounds()),
        RULE.to_string(),
        format!("Your move: {}", user_move),
        format!("Bot move: {}", outcome.bot_move()),
        String::new(),
        format!("Decision: {}", outcome.decision()),
        format!("Reason: {}", outcome.explanation()),
        format!("Result: {}", result_label(outcome.result())),
        String::new(),
        format!("Score: {}", outcome.after()),
        RULE.to_string(),
    ];

    match outcome.ending() {
        Some(ending) => {
            lines.push(ending.to_string());
            lines.push("Type \"reset\" to play again.".to_string());
        }
        None => lines.push(next_move_hint(outcome.user_bomb_used())),
    }

    lines.join("\n")
}

/// Banner printed when a match starts or is reset.
pub fn render_new_game(config: &MatchConfig) -> String {
    [
        RULE.to_string(),
        "🎮 NEW GAME STARTED!".to_string(),
        RULE.to_string(),
        format!(
            "First to {} wins, or highest score after {} rounds.",
            config.win_target(),
            config.max_rounds()
        ),
        "Each player can use BOMB once (beats everything).".to_string(),
        String::new(),
        "Type: rock, paper, scissors, or bomb".to_string(),
    ]
    .join("\n")
}

/// Current standing of a match without playing a turn.
pub fn render_status(state: &MatchState, config: &MatchConfig) -> String {
    let bomb = |used: bool| if used { "used" } else { "available" };

    let mut lines = vec![
        RULE.to_string(),
        if state.game_over() {
            format!("Match over after {} rounds", state.turns_played())
        } else {
            format!("Round {}/{}", state.round(), config.max_rounds())
        },
        RULE.to_string(),
        format!("Score: {}", Scoreline::from(state)),
        format!("Your bomb: {}", bomb(state.user_bomb_used())),
        format!("Bot bomb: {}", bomb(state.bot_bomb_used())),
        RULE.to_string(),
    ];

    if state.game_over() {
        lines.push(state.game_over_reason().to_string());
        lines.push("Type \"reset\" to play again.".to_string());
    } else {
        lines.push(next_move_hint(state.user_bomb_used()));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rps_engine::{Match, Move};

    #[test]
    fn test_round_block_lists_moves_and_score() {
        let mut game = Match::default();
        let outcome = game.commit_turn("p", Move::Rock).unwrap();
        let text = render_round(&outcome, game.config());

        assert!(text.contains("Round 1/5"));
        assert!(text.contains("Your move: paper"));
        assert!(text.contains("Bot move: rock"));
        assert!(text.contains("Decision: VALID"));
        assert!(text.contains("Reason: paper beats rock"));
        assert!(text.contains("Result: You win! 🎉"));
        assert!(text.contains("Score: You 1 | Bot 0 | Draws 0"));
        assert!(text.ends_with("Next: rock, paper, scissors, or bomb"));
    }

    #[test]
    fn test_hint_notes_spent_bomb() {
        let mut game = Match::default();
        let outcome = game.commit_turn("bomb", Move::Paper).unwrap();
        let text = render_round(&outcome, game.config());
        assert!(text.ends_with("Next: rock, paper, scissors, or bomb (your bomb used)"));
    }

    #[test]
    fn test_unclear_move_shown_as_unclear() {
        let mut game = Match::default();
        let outcome = game.commit_turn("banana", Move::Rock).unwrap();
        let text = render_round(&outcome, game.config());
        assert!(text.contains("Your move: unclear"));
        assert!(text.contains("Result: Wasted turn ❌"));
    }

    #[test]
    fn test_final_round_prints_reason_and_reset_hint() {
        let mut game = Match::default();
        game.commit_turn("rock", Move::Scissors).unwrap();
        game.commit_turn("rock", Move::Scissors).unwrap();
        let outcome = game.commit_turn("rock", Move::Scissors).unwrap();
        let text = render_round(&outcome, game.config());

        assert!(text.contains("User wins: reached 3 wins"));
        assert!(text.ends_with("Type \"reset\" to play again."));
    }

    #[test]
    fn test_banner_uses_configured_thresholds() {
        let config = MatchConfig::new(2, 7).unwrap();
        let text = render_new_game(&config);
        assert!(text.contains("First to 2 wins, or highest score after 7 rounds."));
    }

    #[test]
    fn test_status_of_fresh_match() {
        let game = Match::default();
        let text = render_status(game.state(), game.config());
        assert!(text.contains("Round 1/5"));
        assert!(text.contains("Your bomb: available"));
    }
}
