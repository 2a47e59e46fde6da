//! Judge configuration loaded from TOML.

use crate::llm_client::{LlmConfig, LlmProvider};
use derive_getters::Getters;
use derive_more::{Display, Error};
use rps_engine::MatchConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Which bot plays against the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BotKind {
    /// Uniform random choice among legal moves.
    Random,
    /// Move chosen by a language model.
    Llm,
}

/// Bot selection and adapter policy.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct BotConfig {
    /// Bot implementation.
    #[serde(default = "default_bot_kind")]
    kind: BotKind,

    /// Seed for the random bot. Entropy-seeded when absent.
    #[serde(default)]
    seed: Option<u64>,

    /// LLM provider (openai or anthropic).
    #[serde(default = "default_provider")]
    llm_provider: LlmProvider,

    /// LLM model name.
    #[serde(default = "default_model")]
    llm_model: String,

    /// Maximum tokens for the model's reply.
    #[serde(default = "default_max_tokens")]
    llm_max_tokens: u32,

    /// Time allowed for the bot to answer, in milliseconds.
    #[serde(default = "default_timeout_ms")]
    timeout_ms: u64,

    /// Substitute a random non-bomb move when the bot fails or times out.
    #[serde(default = "default_fallback")]
    fallback: bool,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            kind: default_bot_kind(),
            seed: None,
            llm_provider: default_provider(),
            llm_model: default_model(),
            llm_max_tokens: default_max_tokens(),
            timeout_ms: default_timeout_ms(),
            fallback: default_fallback(),
        }
    }
}

impl BotConfig {
    /// Creates LLM configuration from this bot config.
    /// Requires OPENAI_API_KEY or ANTHROPIC_API_KEY environment variable.
    #[instrument(skip(self), fields(provider = ?self.llm_provider, model = %self.llm_model))]
    pub fn create_llm_config(&self) -> Result<LlmConfig, ConfigError> {
        debug!("Creating LLM config");

        let api_key = match self.llm_provider {
            LlmProvider::OpenAI => std::env::var("OPENAI_API_KEY").map_err(|_| {
                ConfigError::new("OPENAI_API_KEY environment variable not set".to_string())
            })?,
            LlmProvider::Anthropic => std::env::var("ANTHROPIC_API_KEY").map_err(|_| {
                ConfigError::new("ANTHROPIC_API_KEY environment variable not set".to_string())
            })?,
        };

        Ok(LlmConfig::new(
            self.llm_provider,
            api_key,
            self.llm_model.clone(),
            self.llm_max_tokens,
        ))
    }
}

/// Where sessions are persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct StoreConfig {
    /// JSON file holding every session. Sessions live in memory when absent.
    #[serde(default)]
    path: Option<PathBuf>,
}

/// Top-level judge configuration.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct JudgeConfig {
    /// Wins needed to end a match early.
    #[serde(default = "default_win_target")]
    win_target: u32,

    /// Rounds before the match is decided on score.
    #[serde(default = "default_max_rounds")]
    max_rounds: u32,

    /// Opponent settings.
    #[serde(default)]
    bot: BotConfig,

    /// Persistence settings.
    #[serde(default)]
    store: StoreConfig,
}

#[instrument]
fn default_win_target() -> u32 {
    rps_engine::WIN_TARGET
}

#[instrument]
fn default_max_rounds() -> u32 {
    rps_engine::MAX_ROUNDS
}

#[instrument]
fn default_bot_kind() -> BotKind {
    BotKind::Random
}

#[instrument]
fn default_provider() -> LlmProvider {
    LlmProvider::OpenAI
}

#[instrument]
fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

#[instrument]
fn default_max_tokens() -> u32 {
    16
}

#[instrument]
fn default_timeout_ms() -> u64 {
    5_000
}

#[instrument]
fn default_fallback() -> bool {
    true
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self {
            win_target: default_win_target(),
            max_rounds: default_max_rounds(),
            bot: BotConfig::default(),
            store: StoreConfig::default(),
        }
    }
}

impl JudgeConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(
            win_target = config.win_target,
            max_rounds = config.max_rounds,
            bot = ?config.bot.kind,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Validated match thresholds.
    ///
    /// # Errors
    ///
    /// Returns [`rps_engine::MatchError::InvalidConfiguration`] when either
    /// threshold is zero.
    #[instrument(skip(self))]
    pub fn match_config(&self) -> Result<MatchConfig, rps_engine::MatchError> {
        MatchConfig::new(self.win_target, self.max_rounds)
    }

    /// Overrides the win target.
    pub fn with_win_target(mut self, win_target: u32) -> Self {
        self.win_target = win_target;
        self
    }

    /// Overrides the round cap.
    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// Overrides the bot kind.
    pub fn with_bot_kind(mut self, kind: BotKind) -> Self {
        self.bot.kind = kind;
        self
    }

    /// Overrides the random bot seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.bot.seed = Some(seed);
        self
    }

    /// Overrides the session store path.
    pub fn with_store_path(mut self, path: PathBuf) -> Self {
        self.store.path = Some(path);
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = JudgeConfig::from_toml("").unwrap();
        assert_eq!(config, JudgeConfig::default());
        assert_eq!(*config.win_target(), 3);
        assert_eq!(*config.max_rounds(), 5);
        assert_eq!(*config.bot().kind(), BotKind::Random);
        assert!(*config.bot().fallback());
    }

    #[test]
    fn test_nested_tables() {
        let config = JudgeConfig::from_toml(
            r#"
            win_target = 2

            [bot]
            kind = "llm"
            llm_provider = "anthropic"
            llm_model = "claude-3-5-haiku-20241022"
            timeout_ms = 1500

            [store]
            path = "sessions.json"
            "#,
        )
        .unwrap();

        assert_eq!(*config.win_target(), 2);
        assert_eq!(*config.max_rounds(), 5);
        assert_eq!(*config.bot().kind(), BotKind::Llm);
        assert_eq!(*config.bot().llm_provider(), LlmProvider::Anthropic);
        assert_eq!(*config.bot().timeout_ms(), 1500);
        assert_eq!(
            config.store().path().as_deref(),
            Some(Path::new("sessions.json"))
        );
    }

    #[test]
    fn test_zero_threshold_rejected_by_match_config() {
        let config = JudgeConfig::default().with_max_rounds(0);
        assert!(matches!(
            config.match_config(),
            Err(rps_engine::MatchError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_negative_threshold_fails_to_parse() {
        assert!(JudgeConfig::from_toml("win_target = -1").is_err());
    }
}
