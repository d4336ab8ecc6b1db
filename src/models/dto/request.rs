use async_graphql::InputObject;
use serde::Deserialize;
use validator::Validate;

use crate::errors::AppError;
use crate::models::domain::{Difficulty, GenerationParams};

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
pub struct GenerateQuestionsRequest {
    #[validate(length(min = 1, max = 200))]
    pub topic: String,

    // Signed so that zero and negative counts reach validation.
    #[validate(range(min = 1))]
    pub count: i64,

    pub difficulty: Difficulty,

    #[validate(length(max = 2000))]
    #[serde(default)]
    pub instructions: Option<String>,
}

impl TryFrom<GenerateQuestionsRequest> for GenerationParams {
    type Error = AppError;

    fn try_from(request: GenerateQuestionsRequest) -> Result<Self, Self::Error> {
        request.validate()?;
        GenerationParams::new(
            &request.topic,
            request.count,
            request.difficulty,
            request.instructions.as_deref(),
        )
    }
}
