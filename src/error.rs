use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AshaError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    #[error("Failed to load dataset {}: {reason}", .path.display())]
    DataLoad { path: PathBuf, reason: String },

    #[error("Completion API error ({status}): {message}")]
    CompletionApi {
        status: reqwest::StatusCode,
        message: String,
    },

    #[error("Completion response error: {0}")]
    CompletionResponse(String),

    #[error("Completion request timed out")]
    CompletionTimeout,

    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Invalid bias policy pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AshaError {
    /// Returns a user-friendly error message suitable for showing in the chat
    pub fn user_message(&self) -> String {
        match self {
            AshaError::Config(_) | AshaError::EnvVar(_) => {
                "Sorry, there's a configuration issue on my end. Please contact the administrator.".to_string()
            }
            AshaError::DataLoad { .. } => {
                "Sorry, I couldn't load my job, event and mentorship listings.".to_string()
            }
            AshaError::CompletionApi { status, .. } => {
                match *status {
                    StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                        "Sorry, I'm having authentication issues with my AI service. Please contact the administrator.".to_string()
                    }
                    StatusCode::TOO_MANY_REQUESTS => {
                        "Sorry, I've hit my rate limit. Please try again in a few moments.".to_string()
                    }
                    status if status.is_server_error() => {
                        "Sorry, the AI service is experiencing issues right now. Please try again later.".to_string()
                    }
                    status if status.is_client_error() => {
                        "Sorry, there was an issue with my request to the AI service. Please try again or contact the administrator.".to_string()
                    }
                    _ => {
                        "Sorry, I'm having trouble connecting to my AI service. Please try again later.".to_string()
                    }
                }
            }
            AshaError::CompletionResponse(_) => {
                "Sorry, I received an unexpected response from my AI service. Please try again.".to_string()
            }
            AshaError::CompletionTimeout => {
                "Sorry, the AI service took too long to answer. Please try again.".to_string()
            }
            AshaError::Reqwest(_) => {
                "Sorry, I'm having network issues. Please try again in a moment.".to_string()
            }
            AshaError::Pattern(_) => {
                "Sorry, my bias checking rules are misconfigured. Please contact the administrator.".to_string()
            }
            AshaError::Io(_) | AshaError::Json(_) => {
                "Sorry, something went wrong reading or writing the conversation.".to_string()
            }
        }
    }

    /// Whether the failure only affects the current turn.
    ///
    /// Completion failures abort the turn but leave the session usable;
    /// everything else happens at startup or in the host and is fatal.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AshaError::CompletionApi { .. }
                | AshaError::CompletionResponse(_)
                | AshaError::CompletionTimeout
                | AshaError::Reqwest(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, AshaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_failures_are_recoverable() {
        let api = AshaError::CompletionApi {
            status: StatusCode::BAD_GATEWAY,
            message: "upstream".to_string(),
        };
        assert!(api.is_recoverable());
        assert!(AshaError::CompletionTimeout.is_recoverable());
        assert!(AshaError::CompletionResponse("no choices".to_string()).is_recoverable());
    }

    #[test]
    fn startup_failures_are_fatal() {
        let load = AshaError::DataLoad {
            path: PathBuf::from("data/events.csv"),
            reason: "missing column 'name'".to_string(),
        };
        assert!(!load.is_recoverable());
        assert!(!AshaError::Config("GROQ_API_KEY is empty".to_string()).is_recoverable());
    }

    #[test]
    fn rate_limit_has_dedicated_message() {
        let err = AshaError::CompletionApi {
            status: StatusCode::TOO_MANY_REQUESTS,
            message: String::new(),
        };
        assert!(err.user_message().contains("rate limit"));
    }

    #[test]
    fn data_load_display_names_the_file() {
        let err = AshaError::DataLoad {
            path: PathBuf::from("data/job_listings.csv"),
            reason: "duplicate id '7'".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to load dataset data/job_listings.csv: duplicate id '7'"
        );
    }
}
