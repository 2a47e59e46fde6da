//! Degraded-mode policy for unreliable bots.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rps_engine::{Move, MoveProvider, ProviderError};
use std::sync::Mutex;
use std::time::Duration;
use tracing::{instrument, warn};

/// Wraps a provider with a deadline and an optional random fallback.
///
/// When the inner provider errors or misses the deadline, the wrapper either
/// plays a uniformly random non-bomb move or reports the failure.
#[derive(Debug)]
pub struct FallbackMoveProvider<P> {
    inner: P,
    timeout: Duration,
    substitute: bool,
    rng: Mutex<StdRng>,
    name: String,
}

impl<P: MoveProvider> FallbackMoveProvider<P> {
    /// Wraps `inner`, substituting a random move on failure when `substitute` is set.
    pub fn new(inner: P, timeout: Duration, substitute: bool) -> Self {
        let name = format!("fallback({})", inner.name());
        Self {
            inner,
            timeout,
            substitute,
            rng: Mutex::new(StdRng::from_entropy()),
            name,
        }
    }

    /// Uses a fixed seed for the substitute moves.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    fn substitute_move(&self) -> Result<Move, ProviderError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| ProviderError::new("fallback random source lock poisoned"))?;
        Move::STANDARD
            .choose(&mut *rng)
            .copied()
            .ok_or_else(|| ProviderError::new("no fallback moves"))
    }
}

#[async_trait::async_trait]
impl<P: MoveProvider> MoveProvider for FallbackMoveProvider<P> {
    #[instrument(skip(self), fields(provider = %self.name, timeout = ?self.timeout))]
    async fn provide_move(&self, bomb_available: bool) -> Result<Move, ProviderError> {
        let failure = match tokio::time::timeout(self.timeout, self.inner.provide_move(bomb_available)).await {
            Ok(Ok(mov)) => return Ok(mov),
            Ok(Err(e)) => e,
            Err(_) => ProviderError::new(format!(
                "{} timed out after {:?}",
                self.inner.name(),
                self.timeout
            )),
        };

        if !self.substitute {
            return Err(failure);
        }

        let mov = self.substitute_move()?;
        warn!(error = %failure, %mov, "Bot failed; playing random fallback move");
        Ok(mov)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rps_engine::ScriptedMoveProvider;

    struct SlowProvider;

    #[async_trait::async_trait]
    impl MoveProvider for SlowProvider {
        async fn provide_move(&self, _bomb_available: bool) -> Result<Move, ProviderError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(Move::Bomb)
        }

        fn name(&self) -> &str {
            "slow"
        }
    }

    #[tokio::test]
    async fn test_passes_through_success() {
        let provider = FallbackMoveProvider::new(
            ScriptedMoveProvider::new([Move::Bomb]),
            Duration::from_secs(1),
            true,
        );
        assert_eq!(provider.provide_move(true).await.unwrap(), Move::Bomb);
    }

    #[tokio::test]
    async fn test_unbounded_timeout_passes_through() {
        let provider = FallbackMoveProvider::new(
            ScriptedMoveProvider::new([Move::Paper]),
            Duration::MAX,
            false,
        );
        assert_eq!(provider.provide_move(true).await.unwrap(), Move::Paper);
    }

    #[tokio::test]
    async fn test_substitutes_non_bomb_on_error() {
        let provider = FallbackMoveProvider::new(
            ScriptedMoveProvider::new(Vec::<Move>::new()),
            Duration::from_secs(1),
            true,
        )
        .with_seed(3);
        for _ in 0..20 {
            assert_ne!(provider.provide_move(true).await.unwrap(), Move::Bomb);
        }
    }

    #[tokio::test]
    async fn test_propagates_error_without_substitution() {
        let provider = FallbackMoveProvider::new(
            ScriptedMoveProvider::new(Vec::<Move>::new()),
            Duration::from_secs(1),
            false,
        );
        assert!(provider.provide_move(true).await.is_err());
    }

    #[tokio::test]
    async fn test_timeout_substitutes() {
        let provider = FallbackMoveProvider::new(SlowProvider, Duration::from_millis(50), true);
        let mov = provider.provide_move(true).await.unwrap();
        assert_ne!(mov, Move::Bomb);
    }

    #[tokio::test]
    async fn test_timeout_without_substitution_fails() {
        let provider = FallbackMoveProvider::new(SlowProvider, Duration::from_millis(50), false);
        let err = provider.provide_move(true).await.unwrap_err();
        assert!(err.message.contains("timed out"));
    }
}
