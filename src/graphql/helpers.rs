use async_graphql::Context;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::session::{SessionId, DEFAULT_SESSION};

/// Helper to parse UUID from GraphQL ID string
pub fn parse_id(id: &str) -> AppResult<Uuid> {
    Uuid::parse_str(id).map_err(|_| AppError::ValidationError("Invalid UUID format".to_string()))
}

/// Session the GraphQL request runs in, as attached by the HTTP handler
pub fn session_from_context<'a>(ctx: &'a Context<'_>) -> &'a str {
    ctx.data_opt::<SessionId>()
        .map(SessionId::as_str)
        .unwrap_or(DEFAULT_SESSION)
}
