//! The completion endpoint as seen by the assistant.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::MessageRole;

/// Sampling parameters sent with every completion request.
pub const MAX_TOKENS: u32 = 512;
pub const TEMPERATURE: f32 = 0.7;

/// A prior turn as the completion endpoint sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    #[must_use]
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Something that turns a conversation into a reply.
///
/// Implementations own the system prompt and sampling parameters.
pub trait CompletionProvider {
    /// Produce a reply to `message` given the earlier turns in `history`.
    fn complete(
        &self,
        history: &[Message],
        message: &str,
    ) -> impl Future<Output = Result<String>> + Send;
}
