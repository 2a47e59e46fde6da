//! Rule table for RPS+Bomb.
//!
//! All sixteen pairings are listed explicitly, with no wildcard arm.

use crate::types::{Clash, Move};

/// How move `a` fares against move `b`.
pub fn beats(a: Move, b: Move) -> Clash {
    use Move::{Bomb, Paper, Rock, Scissors};

    match (a, b) {
        (Rock, Rock) => Clash::Draw,
        (Rock, Paper) => Clash::Lose,
        (Rock, Scissors) => Clash::Win,
        (Rock, Bomb) => Clash::Lose,

        (Paper, Rock) => Clash::Win,
        (Paper, Paper) => Clash::Draw,
        (Paper, Scissors) => Clash::Lose,
        (Paper, Bomb) => Clash::Lose,

        (Scissors, Rock) => Clash::Lose,
        (Scissors, Paper) => Clash::Win,
        (Scissors, Scissors) => Clash::Draw,
        (Scissors, Bomb) => Clash::Lose,

        (Bomb, Rock) => Clash::Win,
        (Bomb, Paper) => Clash::Win,
        (Bomb, Scissors) => Clash::Win,
        (Bomb, Bomb) => Clash::Draw,
    }
}

/// Short explanation of why a pairing resolved the way it did.
///
/// Phrased from the winner's point of view, e.g. `"paper beats rock"`.
pub fn rule_text(a: Move, b: Move) -> String {
    match beats(a, b) {
        Clash::Win => format!("{} beats {}", a, b),
        Clash::Lose => format!("{} beats {}", b, a),
        Clash::Draw if a.is_bomb() => "bomb vs bomb is a draw".to_string(),
        Clash::Draw => "same move is a draw".to_string(),
    }
}
