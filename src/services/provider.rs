use async_openai::{config::OpenAIConfig, Client};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use secrecy::ExposeSecret;
use serde_json::{json, Value};

use crate::{
    config::Config,
    constants::prompts::{question_request_prompt, QUESTION_GENERATOR_PROMPT},
    errors::{AppError, AppResult},
    models::domain::{GenerationParams, ProviderBatch, ProviderQuestion, RawResponse},
};

static CODE_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^\s*```[A-Za-z0-9_-]*\s*\n?(.*?)\s*```\s*$")
        .expect("CODE_FENCE is a valid regex pattern")
});

/// Source of raw, not yet validated question batches.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionProvider: Send + Sync {
    async fn generate(&self, params: &GenerationParams) -> AppResult<RawResponse>;
}

pub struct OpenAiQuestionProvider {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiQuestionProvider {
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(config.openai_api_key.expose_secret())
            .with_api_base(&config.openai_api_base);

        Self {
            client: Client::with_config(openai_config),
            model: config.openai_model.clone(),
        }
    }

    fn build_request(&self, params: &GenerationParams) -> AppResult<Value> {
        let question_schema =
            serde_json::to_string_pretty(&schemars::schema_for!(ProviderQuestion))?;
        let system_prompt = format!("{}\n\n{}", QUESTION_GENERATOR_PROMPT, question_schema);
        let difficulty = params.difficulty().to_string();
        let user_prompt = question_request_prompt(
            params.topic(),
            params.count(),
            &difficulty,
            params.instructions(),
        );

        Ok(json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": system_prompt},
                {"role": "user", "content": user_prompt}
            ],
            "response_format": {"type": "json_object"},
            "temperature": 0.7
        }))
    }
}

#[async_trait]
impl QuestionProvider for OpenAiQuestionProvider {
    async fn generate(&self, params: &GenerationParams) -> AppResult<RawResponse> {
        let request = self.build_request(params)?;

        log::info!(
            "Requesting {} question(s) on '{}' from model {}",
            params.count(),
            params.topic(),
            self.model
        );

        let response: Value = self.client.chat().create_byot(request).await?;

        let content = response["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| {
                AppError::ProviderError("completion carried no message content".to_string())
            })?;

        parse_reply(content)
    }
}

/// Decodes the model's message text. Prefers the typed batch and falls back
/// to plain JSON so the normalizer can report what is wrong with it.
pub fn parse_reply(content: &str) -> AppResult<RawResponse> {
    let body = strip_code_fence(content);
    let value: Value = serde_json::from_str(body)
        .map_err(|e| AppError::ProviderError(format!("reply is not valid JSON: {}", e)))?;

    if value.get("questions").is_some_and(Value::is_array) {
        if let Ok(batch) = serde_json::from_value::<ProviderBatch>(value.clone()) {
            return Ok(RawResponse::Batch(batch));
        }
    }

    Ok(RawResponse::Json(value))
}

fn strip_code_fence(content: &str) -> &str {
    CODE_FENCE
        .captures(content)
        .and_then(|c| c.get(1))
        .map_or(content.trim(), |m| m.as_str())
}
