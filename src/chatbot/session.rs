//! Per-session conversation history.

use chrono::{DateTime, Utc};
use log::info;
use serde::Serialize;
use uuid::Uuid;

use crate::completion::Message;
use crate::types::MessageRole;

use super::assembler::{AssembledTurn, DataResults};

/// A finished message in the transcript. Never changed once recorded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatTurn {
    pub role: MessageRole,
    pub content: String,
    pub has_bias: bool,
    pub is_positive: bool,
    pub data_results: Option<DataResults>,
    pub created_at: DateTime<Utc>,
}

/// One conversation. Owned by the host; the assistant only reads it.
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    started_at: DateTime<Utc>,
    history: Vec<ChatTurn>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        let session = Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            history: Vec::new(),
        };
        info!("Started session {}", session.id);
        session
    }

    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn history(&self) -> &[ChatTurn] {
        &self.history
    }

    /// Prior turns as completion history, oldest first.
    #[must_use]
    pub fn prior_messages(&self) -> Vec<Message> {
        self.history
            .iter()
            .filter(|turn| matches!(turn.role, MessageRole::User | MessageRole::Assistant))
            .map(|turn| Message::new(turn.role, turn.content.as_str()))
            .collect()
    }

    /// Append a completed exchange: the user's message, then the reply.
    pub fn record(&mut self, user_message: &str, turn: &AssembledTurn) {
        let now = Utc::now();
        self.history.push(ChatTurn {
            role: MessageRole::User,
            content: user_message.to_string(),
            has_bias: false,
            is_positive: false,
            data_results: None,
            created_at: now,
        });
        self.history.push(ChatTurn {
            role: MessageRole::Assistant,
            content: turn.response.clone(),
            has_bias: turn.has_bias,
            is_positive: turn.is_positive,
            data_results: turn.data_results.clone(),
            created_at: now,
        });
    }

    /// Close the session, discarding its history. Returns how many turns it held.
    pub fn end(self) -> usize {
        info!(
            "Ended session {} after {} turns",
            self.id,
            self.history.len()
        );
        self.history.len()
    }
}
