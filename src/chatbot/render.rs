//! Plain-text rendering of replies and transcripts for the terminal.

use std::fmt::Write;

use crate::error::Result;
use crate::types::MessageRole;

use super::assembler::{AssembledTurn, DataResults};
use super::session::Session;

/// Format a completed turn with its annotations.
///
/// # Errors
///
/// Returns [`crate::error::AshaError::Json`] if the data results cannot be
/// serialized.
pub fn render_reply(turn: &AssembledTurn) -> Result<String> {
    let mut out = format!("asha> {}", turn.response);

    if turn.has_bias {
        let _ = write!(
            out,
            "\n  [bias detected: {}]",
            turn.detected_patterns.join(", ")
        );
        if turn.mitigated {
            out.push_str("\n  [reply rephrased to soften biased wording]");
        }
    }
    if turn.is_positive {
        out.push_str("\n  [positive reinforcement]");
    }
    if let Some(results) = &turn.data_results {
        push_data_results(&mut out, results)?;
    }

    Ok(out)
}

/// Format the full session transcript.
///
/// # Errors
///
/// Returns [`crate::error::AshaError::Json`] if recorded data results cannot
/// be serialized.
pub fn render_history(session: &Session) -> Result<String> {
    let mut out = format!(
        "Session {} (started {})",
        session.id(),
        session.started_at().format("%Y-%m-%d %H:%M:%S UTC")
    );

    for turn in session.history() {
        let speaker = match turn.role {
            MessageRole::User => "you",
            MessageRole::Assistant => "asha",
            MessageRole::System => "system",
        };
        let _ = write!(
            out,
            "\n[{}] {speaker}> {}",
            turn.created_at.format("%H:%M:%S"),
            turn.content
        );
        if turn.has_bias {
            out.push_str("  [bias]");
        }
        if turn.is_positive {
            out.push_str("  [positive]");
        }
        if let Some(results) = &turn.data_results {
            push_data_results(&mut out, results)?;
        }
    }

    Ok(out)
}

fn push_data_results(out: &mut String, results: &DataResults) -> Result<()> {
    let json = serde_json::to_string_pretty(results)?;
    out.push('\n');
    out.push_str(&json);
    Ok(())
}
