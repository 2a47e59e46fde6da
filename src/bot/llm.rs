//! Bot moves chosen by a language model.

use crate::llm_client::LlmClient;
use rps_engine::{Move, MoveProvider, ProviderError, parse_move};
use tracing::{debug, instrument, warn};

/// Asks a language model for the bot's move.
///
/// The prompt states only whether the bot's bomb is still available. A reply
/// that is not a legal move name is played as rock.
#[derive(Debug, Clone)]
pub struct LlmMoveProvider {
    client: LlmClient,
    name: String,
}

impl LlmMoveProvider {
    /// Creates a provider backed by `client`.
    #[instrument(skip(client), fields(model = %client.config().model()))]
    pub fn new(client: LlmClient) -> Self {
        let name = format!("llm({})", client.config().model());
        Self { client, name }
    }
}

/// Builds the bot prompt.
pub fn bot_prompt(bomb_available: bool) -> String {
    let availability = if bomb_available {
        "YES"
    } else {
        "NO (already used)"
    };
    format!(
        "Pick ONE move for Rock-Paper-Scissors: rock, paper, scissors, or bomb.\n\
         Bomb beats everything but you can only use it ONCE per match.\n\
         Bomb available: {}\n\
         Reply with ONLY the move name (rock, paper, scissors, or bomb). Nothing else.",
        availability
    )
}

/// Reads a move from the model's reply, playing rock when it is not legal.
#[instrument]
pub fn parse_reply(reply: &str, bomb_available: bool) -> Move {
    let cleaned = reply
        .trim()
        .trim_matches(|c: char| c.is_ascii_punctuation() || c.is_whitespace());

    match parse_move(cleaned) {
        Some(Move::Bomb) if !bomb_available => {
            warn!("Model chose a spent bomb; playing rock");
            Move::Rock
        }
        Some(mov) => mov,
        None => {
            warn!(reply, "Model reply is not a move; playing rock");
            Move::Rock
        }
    }
}

#[async_trait::async_trait]
impl MoveProvider for LlmMoveProvider {
    #[instrument(skip(self), fields(provider = %self.name))]
    async fn provide_move(&self, bomb_available: bool) -> Result<Move, ProviderError> {
        let reply = self
            .client
            .generate(&bot_prompt(bomb_available))
            .await
            .map_err(|e| ProviderError::new(e.message))?;
        let mov = parse_reply(&reply, bomb_available);
        debug!(%mov, "Model move parsed");
        Ok(mov)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
