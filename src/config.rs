use std::env;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use crate::errors::{AppError, AppResult};

#[derive(Clone, Debug)]
pub struct Config {
    pub openai_api_key: SecretString,
    pub openai_api_base: String,
    pub openai_model: String,
    pub generation_timeout_secs: u64,
    pub max_question_count: u32,
    pub history_limit: usize,
    pub max_sessions: usize,
    pub web_server_host: String,
    pub web_server_port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            openai_api_key: SecretString::from(env::var("OPENAI_API_KEY").unwrap_or_default()),
            openai_api_base: env::var("OPENAI_API_BASE")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            generation_timeout_secs: parse_env("GENERATION_TIMEOUT_SECS").unwrap_or(60),
            max_question_count: parse_env("MAX_QUESTION_COUNT").unwrap_or(20),
            history_limit: parse_env("HISTORY_LIMIT").unwrap_or(25),
            max_sessions: parse_env("MAX_SESSIONS").unwrap_or(1000),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: parse_env("WEB_SERVER_PORT").unwrap_or(8080),
        }
    }

    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation_timeout_secs)
    }

    /// Rejects settings the server cannot start with.
    pub fn validate(&self) -> AppResult<()> {
        if self.openai_api_key.expose_secret().trim().is_empty() {
            return Err(AppError::ValidationError(
                "OPENAI_API_KEY is not set".to_string(),
            ));
        }
        if self.max_question_count == 0 {
            return Err(AppError::ValidationError(
                "MAX_QUESTION_COUNT must be at least 1".to_string(),
            ));
        }
        if self.max_sessions == 0 {
            return Err(AppError::ValidationError(
                "MAX_SESSIONS must be at least 1".to_string(),
            ));
        }
        if self.generation_timeout_secs == 0 {
            return Err(AppError::ValidationError(
                "GENERATION_TIMEOUT_SECS must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            openai_api_key: SecretString::from("sk-test".to_string()),
            openai_api_base: "http://127.0.0.1:9".to_string(),
            openai_model: "gpt-test".to_string(),
            generation_timeout_secs: 5,
            max_question_count: 10,
            history_limit: 3,
            max_sessions: 4,
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
        }
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
