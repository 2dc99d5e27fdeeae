use std::env;
use std::path::PathBuf;
use std::time::Duration;

use log::{debug, error, info};

use crate::error::{AshaError, Result};

const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
const DEFAULT_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a helpful assistant for women's career development and empowerment.";

#[derive(Debug, Clone)]
pub struct Config {
    pub groq_api_key: String,
    pub groq_model: String,
    pub groq_api_url: String,
    pub data_dir: PathBuf,
    pub completion_timeout: Duration,
    pub system_prompt: String,
}

impl Config {
    /// Read configuration from the environment, after loading `.env` if present.
    ///
    /// # Errors
    ///
    /// Fails if `GROQ_API_KEY` is missing or empty, or the timeout is not a
    /// positive integer.
    pub fn from_env() -> Result<Self> {
        debug!("Loading configuration from environment");
        dotenvy::dotenv().ok();

        let groq_api_key = env::var("GROQ_API_KEY").map_err(|e| {
            error!("Failed to load GROQ_API_KEY from environment: {e}");
            e
        })?;
        if groq_api_key.trim().is_empty() {
            return Err(AshaError::Config("GROQ_API_KEY is set but empty".to_string()));
        }

        let groq_model = var_or("GROQ_MODEL", DEFAULT_MODEL);
        let groq_api_url = var_or("GROQ_API_URL", DEFAULT_API_URL);
        let data_dir = PathBuf::from(var_or("ASHA_DATA_DIR", DEFAULT_DATA_DIR));
        let system_prompt = var_or("ASHA_SYSTEM_PROMPT", DEFAULT_SYSTEM_PROMPT);
        let completion_timeout = parse_timeout(env::var("ASHA_COMPLETION_TIMEOUT_SECS").ok())?;

        info!("Configuration loaded successfully");
        debug!("Groq API key length: {} characters", groq_api_key.len());
        debug!("Groq model: {groq_model}");
        debug!("Groq API URL: {groq_api_url}");
        debug!("Data directory: {}", data_dir.display());
        debug!("Completion timeout: {}s", completion_timeout.as_secs());
        debug!("System prompt length: {} characters", system_prompt.len());

        Ok(Self {
            groq_api_key,
            groq_model,
            groq_api_url,
            data_dir,
            completion_timeout,
            system_prompt,
        })
    }
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_timeout(raw: Option<String>) -> Result<Duration> {
    let Some(raw) = raw.filter(|value| !value.trim().is_empty()) else {
        return Ok(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    };

    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(AshaError::Config(format!(
            "ASHA_COMPLETION_TIMEOUT_SECS must be a positive integer, got '{raw}'"
        ))),
    }
}
