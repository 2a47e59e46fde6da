//! Line-oriented play loop.
//!
//! Each input line is either a special command or a move token for the next
//! turn. Intent classification happens upstream of the engine, so a line is
//! forwarded as typed (trimmed) and the engine decides what it means.

use crate::render::{render_new_game, render_round, render_status};
use crate::session::{SessionError, SessionManager};
use rps_engine::MatchError;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info, instrument, warn};

/// A line that is handled by the host instead of being played as a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialCommand {
    /// Start over.
    Reset,
    /// Leave the loop.
    Quit,
    /// Show the standing.
    State,
}

impl SpecialCommand {
    /// Recognizes `reset`/`new game`, `quit`/`exit` and `state`, ignoring case
    /// and surrounding whitespace.
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_lowercase().as_str() {
            "reset" | "new game" => Some(Self::Reset),
            "quit" | "exit" => Some(Self::Quit),
            "state" => Some(Self::State),
            _ => None,
        }
    }
}

/// Runs the play loop until `quit` or end of input.
///
/// Session errors are reported on `output` and the loop continues.
///
/// # Errors
///
/// Returns an I/O error if reading `input` or writing `output` fails.
#[instrument(skip(manager, input, output))]
pub async fn run_repl<R, W>(
    manager: &SessionManager,
    session_id: &str,
    input: R,
    output: &mut W,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let config = *manager.config();

    match manager.state(session_id).await {
        Ok(state) if state.turns_played() == 0 => writeln!(output, "{}", render_new_game(&config))?,
        Ok(state) => writeln!(output, "{}", render_status(&state, &config))?,
        Err(e) => writeln!(output, "Could not open session: {}", e)?,
    }
    output.flush()?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let token = line.trim();
        if token.is_empty() {
            continue;
        }

        match SpecialCommand::parse(token) {
            Some(SpecialCommand::Quit) => {
                info!("Player quit");
                writeln!(output, "Goodbye! 👋")?;
                output.flush()?;
                return Ok(());
            }
            Some(SpecialCommand::Reset) => match manager.reset(session_id).await {
                Ok(_) => writeln!(output, "{}", render_new_game(&config))?,
                Err(e) => writeln!(output, "Could not reset: {}", e)?,
            },
            Some(SpecialCommand::State) => match manager.state(session_id).await {
                Ok(state) => writeln!(output, "{}", render_status(&state, &config))?,
                Err(e) => writeln!(output, "Could not read state: {}", e)?,
            },
            None => {
                debug!(token, "Playing turn");
                match manager.play_turn(session_id, token).await {
                    Ok(outcome) => writeln!(output, "{}", render_round(&outcome, &config))?,
                    Err(SessionError::Match(MatchError::MatchAlreadyOver)) => {
                        writeln!(output, "The match is over. Type \"reset\" to play again.")?
                    }
                    Err(e) => {
                        warn!(error = %e, "Turn not played");
                        writeln!(output, "Turn not played: {}. Try again.", e)?
                    }
                }
            }
        }
        output.flush()?;
    }

    debug!("Input closed");
    Ok(())
}
