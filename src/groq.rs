use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::completion::{CompletionProvider, MAX_TOKENS, Message, TEMPERATURE};
use crate::config::Config;
use crate::error::{AshaError, Result};
use crate::types::MessageRole;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

/// Client for Groq's OpenAI-compatible chat completions endpoint.
pub struct GroqClient {
    api_key: String,
    client: reqwest::Client,
    model: String,
    api_url: String,
    system_prompt: String,
}

impl GroqClient {
    /// Build a client whose requests expire after the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.completion_timeout)
            .build()?;

        Ok(Self {
            api_key: config.groq_api_key.clone(),
            client,
            model: config.groq_model.clone(),
            api_url: config.groq_api_url.clone(),
            system_prompt: config.system_prompt.clone(),
        })
    }

    fn build_request<'a>(&'a self, history: &[Message], message: &str) -> ChatRequest<'a> {
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(Message::new(MessageRole::System, self.system_prompt.as_str()));
        messages.extend(
            history
                .iter()
                .filter(|m| matches!(m.role, MessageRole::User | MessageRole::Assistant))
                .cloned(),
        );
        messages.push(Message::new(MessageRole::User, message));

        ChatRequest {
            model: &self.model,
            messages,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        }
    }
}

impl CompletionProvider for GroqClient {
    async fn complete(&self, history: &[Message], message: &str) -> Result<String> {
        let request = self.build_request(history, message);
        debug!(
            "Sending request to Groq API with {} messages",
            request.messages.len()
        );

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response
                .text()
                .await
                .unwrap_or_else(|e| format!("Failed to read error response: {e}"));
            warn!("Groq API returned {status}");
            return Err(AshaError::CompletionApi { status, message });
        }

        let body = response.text().await.map_err(transport_error)?;
        let reply = parse_reply(&body)?;

        debug!("Received {} characters from Groq API", reply.len());
        Ok(reply)
    }
}

fn transport_error(err: reqwest::Error) -> AshaError {
    if err.is_timeout() {
        warn!("Groq API request timed out");
        AshaError::CompletionTimeout
    } else {
        AshaError::Reqwest(err)
    }
}

fn parse_reply(body: &str) -> Result<String> {
    let parsed: ChatResponse = serde_json::from_str(body)
        .map_err(|e| AshaError::CompletionResponse(format!("Malformed response body: {e}")))?;

    parsed
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| AshaError::CompletionResponse("No choices in response".to_string()))?
        .message
        .content
        .ok_or_else(|| AshaError::CompletionResponse("Reply has no text content".to_string()))
}
