//! Opponent move providers.
//!
//! The match asks its provider for the bot's move before looking at the
//! user's token. Providers only learn whether their own bomb is still
//! available.

use crate::error::ProviderError;
use crate::types::Move;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::VecDeque;
use std::sync::Mutex;
use tracing::{debug, instrument};

/// Source of the bot's moves.
///
/// Implementations must return [`Move::Bomb`] only when `bomb_available`
/// is true.
#[async_trait::async_trait]
pub trait MoveProvider: Send + Sync {
    /// Picks the bot's next move.
    async fn provide_move(&self, bomb_available: bool) -> Result<Move, ProviderError>;

    /// Display name for logs.
    fn name(&self) -> &str;
}

/// Legal moves for a side.
pub fn legal_moves(bomb_available: bool) -> &'static [Move] {
    const WITH_BOMB: [Move; 4] = [Move::Rock, Move::Paper, Move::Scissors, Move::Bomb];
    if bomb_available {
        &WITH_BOMB
    } else {
        &Move::STANDARD
    }
}

/// Picks uniformly among the legal moves.
#[derive(Debug)]
pub struct RandomMoveProvider {
    name: String,
    rng: Mutex<StdRng>,
}

impl RandomMoveProvider {
    /// Creates a provider seeded from the operating system.
    pub fn new() -> Self {
        Self {
            name: "random".to_string(),
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Creates a provider with a fixed seed for reproducible matches.
    pub fn seeded(seed: u64) -> Self {
        Self {
            name: format!("random(seed={})", seed),
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomMoveProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl MoveProvider for RandomMoveProvider {
    #[instrument(skip(self), fields(provider = %self.name))]
    async fn provide_move(&self, bomb_available: bool) -> Result<Move, ProviderError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| ProviderError::new("random source lock poisoned"))?;
        let mov = legal_moves(bomb_available)
            .choose(&mut *rng)
            .copied()
            .ok_or_else(|| ProviderError::new("no legal moves"))?;
        debug!(%mov, "Random move chosen");
        Ok(mov)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Replays a fixed sequence of moves, then fails.
#[derive(Debug)]
pub struct ScriptedMoveProvider {
    moves: Mutex<VecDeque<Move>>,
}

impl ScriptedMoveProvider {
    /// Creates a provider that plays `moves` in order.
    pub fn new(moves: impl IntoIterator<Item = Move>) -> Self {
        Self {
            moves: Mutex::new(moves.into_iter().collect()),
        }
    }

    /// Creates a provider that always plays the same move.
    pub fn repeating(mov: Move, times: usize) -> Self {
        Self::new(std::iter::repeat_n(mov, times))
    }

    /// Moves not yet played.
    pub fn remaining(&self) -> usize {
        self.moves.lock().map(|moves| moves.len()).unwrap_or(0)
    }
}

#[async_trait::async_trait]
impl MoveProvider for ScriptedMoveProvider {
    #[instrument(skip(self))]
    async fn provide_move(&self, _bomb_available: bool) -> Result<Move, ProviderError> {
        let mut moves = self
            .moves
            .lock()
            .map_err(|_| ProviderError::new("script lock poisoned"))?;
        moves
            .pop_front()
            .ok_or_else(|| ProviderError::new("scripted moves exhausted"))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_random_never_bombs_when_unavailable() {
        let provider = RandomMoveProvider::seeded(7);
        for _ in 0..200 {
            let mov = provider.provide_move(false).await.unwrap();
            assert_ne!(mov, Move::Bomb);
        }
    }

    #[tokio::test]
    async fn test_random_can_bomb_when_available() {
        let provider = RandomMoveProvider::seeded(7);
        let mut saw_bomb = false;
        for _ in 0..200 {
            if provider.provide_move(true).await.unwrap() == Move::Bomb {
                saw_bomb = true;
            }
        }
        assert!(saw_bomb);
    }

    #[tokio::test]
    async fn test_seeded_providers_agree() {
        let a = RandomMoveProvider::seeded(42);
        let b = RandomMoveProvider::seeded(42);
        for _ in 0..20 {
            assert_eq!(
                a.provide_move(true).await.unwrap(),
                b.provide_move(true).await.unwrap()
            );
        }
    }

    #[tokio::test]
    async fn test_script_plays_in_order_then_fails() {
        let provider = ScriptedMoveProvider::new([Move::Rock, Move::Bomb]);
        assert_eq!(provider.provide_move(true).await.unwrap(), Move::Rock);
        assert_eq!(provider.provide_move(true).await.unwrap(), Move::Bomb);
        assert_eq!(provider.remaining(), 0);
        assert!(provider.provide_move(true).await.is_err());
    }
}
