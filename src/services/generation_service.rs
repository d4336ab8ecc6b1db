use std::{sync::Arc, time::Duration};

use serde_json::Value;

use crate::{
    config::Config,
    errors::{AppError, AppResult},
    models::domain::{GenerationParams, HistoryEntry, QuestionRecord},
    services::{
        history_service::SessionHistory,
        normalizer::{normalize_response, normalize_value},
        provider::QuestionProvider,
    },
};

pub struct QuestionGenerationService {
    provider: Arc<dyn QuestionProvider>,
    history: Arc<SessionHistory>,
    max_question_count: u32,
    timeout: Duration,
}

impl QuestionGenerationService {
    pub fn new(
        provider: Arc<dyn QuestionProvider>,
        history: Arc<SessionHistory>,
        config: &Config,
    ) -> Self {
        Self {
            provider,
            history,
            max_question_count: config.max_question_count,
            timeout: config.generation_timeout(),
        }
    }

    /// Runs one generation request end to end and records the batch in the
    /// session history. Nothing is recorded when any step fails.
    pub async fn generate(
        &self,
        session: &str,
        params: GenerationParams,
    ) -> AppResult<HistoryEntry> {
        if params.count() > self.max_question_count {
            return Err(AppError::ValidationError(format!(
                "count must be at most {} (got {})",
                self.max_question_count,
                params.count()
            )));
        }

        log::info!(
            "Generating {} {} question(s) on '{}' for session {}",
            params.count(),
            params.difficulty(),
            params.topic(),
            session
        );

        let raw = tokio::time::timeout(self.timeout, self.provider.generate(&params))
            .await
            .map_err(|_| {
                AppError::ProviderError(format!(
                    "generation timed out after {}s",
                    self.timeout.as_secs()
                ))
            })?
            .inspect_err(|e| log::error!("Question provider failed: {}", e))?;

        let questions = normalize_response(raw)
            .inspect_err(|e| log::warn!("Rejected provider response: {}", e))?;

        if questions.len() != params.count() as usize {
            log::warn!(
                "Provider returned {} question(s), {} requested",
                questions.len(),
                params.count()
            );
        }

        let entry = HistoryEntry::new(&params, questions);
        self.history.record(session, entry.clone()).await;

        log::info!(
            "Recorded batch {} with {} question(s)",
            entry.id,
            entry.questions.len()
        );
        Ok(entry)
    }

    /// Normalizes a payload the caller already holds, without touching history.
    pub fn normalize_raw(&self, value: Value) -> AppResult<Vec<QuestionRecord>> {
        normalize_value(value)
    }
}
