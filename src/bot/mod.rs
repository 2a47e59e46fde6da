//! Bot adapters supplied to the match engine.

mod fallback;
mod llm;

pub use fallback::FallbackMoveProvider;
pub use llm::{LlmMoveProvider, bot_prompt, parse_reply};

use crate::judge_config::{BotConfig, BotKind, ConfigError};
use crate::llm_client::LlmClient;
use rps_engine::{MoveProvider, RandomMoveProvider};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument};

/// Builds the bot described by `config`.
///
/// The language-model bot is wrapped in a [`FallbackMoveProvider`] using the
/// configured timeout and substitution policy.
///
/// # Errors
///
/// Returns [`ConfigError`] if the LLM bot is selected but its API key is
/// missing.
#[instrument(skip(config), fields(kind = ?config.kind()))]
pub fn build_provider(config: &BotConfig) -> Result<Arc<dyn MoveProvider>, ConfigError> {
    let provider: Arc<dyn MoveProvider> = match config.kind() {
        BotKind::Random => match config.seed() {
            Some(seed) => Arc::new(RandomMoveProvider::seeded(*seed)),
            None => Arc::new(RandomMoveProvider::new()),
        },
        BotKind::Llm => {
            let client = LlmClient::new(config.create_llm_config()?);
            let provider = FallbackMoveProvider::new(
                LlmMoveProvider::new(client),
                Duration::from_millis(*config.timeout_ms()),
                *config.fallback(),
            );
            match config.seed() {
                Some(seed) => Arc::new(provider.with_seed(*seed)),
                None => Arc::new(provider),
            }
        }
    };

    info!(provider = provider.name(), "Bot ready");
    Ok(provider)
}
