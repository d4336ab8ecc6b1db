use std::sync::Arc;

use crate::{
    config::Config,
    services::{
        generation_service::QuestionGenerationService,
        history_service::SessionHistory,
        provider::{OpenAiQuestionProvider, QuestionProvider},
    },
};

#[derive(Clone)]
pub struct AppState {
    pub generation_service: Arc<QuestionGenerationService>,
    pub history: Arc<SessionHistory>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let provider = Arc::new(OpenAiQuestionProvider::new(&config));
        Self::with_provider(config, provider)
    }

    /// Builds the state around any provider; used by tests and alternate backends.
    pub fn with_provider(config: Config, provider: Arc<dyn QuestionProvider>) -> Self {
        let history = Arc::new(SessionHistory::new(
            config.history_limit,
            config.max_sessions,
        ));
        let generation_service = Arc::new(QuestionGenerationService::new(
            provider,
            history.clone(),
            &config,
        ));

        Self {
            generation_service,
            history,
            config: Arc::new(config),
        }
    }
}
