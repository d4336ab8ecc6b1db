use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use async_graphql::ErrorExtensions;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Question {position}: missing field '{field}'")]
    MissingField { position: usize, field: String },

    #[error("Question {position}: answer '{answer}' is not one of the options")]
    InconsistentAnswer { position: usize, answer: String },

    #[error("Question {position}: answer index {index} is outside 1..={option_count}")]
    InvalidAnswerIndex {
        position: usize,
        index: i64,
        option_count: usize,
    },

    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    pub fn missing_field(position: usize, field: &str) -> Self {
        AppError::MissingField {
            position,
            field: field.to_string(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::MalformedResponse(_) => "MALFORMED_RESPONSE",
            AppError::MissingField { .. } => "MISSING_FIELD",
            AppError::InconsistentAnswer { .. } => "INCONSISTENT_ANSWER",
            AppError::InvalidAnswerIndex { .. } => "INVALID_ANSWER_INDEX",
            AppError::ProviderError(_) => "PROVIDER_ERROR",
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// True for failures raised while turning a provider payload into records.
    pub fn is_normalization_error(&self) -> bool {
        matches!(
            self,
            AppError::MalformedResponse(_)
                | AppError::MissingField { .. }
                | AppError::InconsistentAnswer { .. }
                | AppError::InvalidAnswerIndex { .. }
        )
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    pub kind: &'static str,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            e if e.is_normalization_error() => StatusCode::BAD_GATEWAY,
            AppError::ProviderError(_) => StatusCode::BAD_GATEWAY,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            code: self.status_code().as_u16(),
            kind: self.error_code(),
        })
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InternalError(format!("JSON serialization error: {}", err))
    }
}

impl From<async_openai::error::OpenAIError> for AppError {
    fn from(err: async_openai::error::OpenAIError) -> Self {
        AppError::ProviderError(err.to_string())
    }
}

impl ErrorExtensions for AppError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_err, e| {
            e.set("code", self.error_code());
        })
    }
}

pub type AppResult<T> = Result<T, AppError>;
