//! Tests for the interactive play loop.

use rps_judge::{MatchConfig, Move, ScriptedMoveProvider, SessionManager, run_repl};
use std::sync::Arc;

async fn play(manager: &SessionManager, input: &str) -> String {
    let mut output = Vec::new();
    run_repl(manager, "repl", input.as_bytes(), &mut output)
        .await
        .unwrap();
    String::from_utf8(output).unwrap()
}

fn manager(moves: impl IntoIterator<Item = Move>) -> SessionManager {
    SessionManager::in_memory(
        MatchConfig::default(),
        Arc::new(ScriptedMoveProvider::new(moves)),
    )
    .unwrap()
}

#[tokio::test]
async fn test_fresh_session_shows_banner_and_plays() {
    let manager = manager([Move::Rock]);
    let text = play(&manager, "p\nquit\n").await;

    assert!(text.starts_with("━"));
    assert!(text.contains("🎮 NEW GAME STARTED!"));
    assert!(text.contains("Reason: paper beats rock"));
    assert!(text.trim_end().ends_with("Goodbye! 👋"));
}

#[tokio::test]
async fn test_quit_stops_reading_input() {
    let manager = manager([Move::Rock, Move::Rock]);
    play(&manager, "rock\nEXIT\nrock\n").await;

    assert_eq!(manager.state("repl").await.unwrap().round(), 2);
}

#[tokio::test]
async fn test_blank_lines_are_skipped() {
    let manager = manager([Move::Rock]);
    play(&manager, "\n   \nrock\n").await;

    assert_eq!(manager.state("repl").await.unwrap().round(), 2);
}

#[tokio::test]
async fn test_finished_match_asks_for_reset() {
    let manager = manager([Move::Scissors; 4]);
    let text = play(&manager, "r\nr\nr\nr\nnew game\nr\n").await;

    assert!(text.contains("User wins: reached 3 wins"));
    assert!(text.contains("The match is over. Type \"reset\" to play again."));
    assert_eq!(text.matches("🎮 NEW GAME STARTED!").count(), 2);

    let state = manager.state("repl").await.unwrap();
    assert_eq!((state.round(), state.user_score()), (2, 1));
}

#[tokio::test]
async fn test_bot_failure_is_reported_and_loop_continues() {
    let manager = manager(Vec::<Move>::new());
    let text = play(&manager, "rock\nstate\n").await;

    assert!(text.contains("Turn not played:"));
    assert!(text.contains("Round 1/5"));
    assert!(text.contains("Your bomb: available"));
}

#[tokio::test]
async fn test_resumed_session_shows_status_instead_of_banner() {
    let manager = manager([Move::Rock]);
    manager.play_turn("repl", "paper").await.unwrap();

    let text = play(&manager, "").await;
    assert!(!text.contains("NEW GAME"));
    assert!(text.contains("Round 2/5"));
    assert!(text.contains("Score: You 1 | Bot 0 | Draws 0"));
}
