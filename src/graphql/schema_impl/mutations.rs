use async_graphql::{Context, Object, Result, ResultExt};

use crate::{
    app_state::AppState,
    graphql::helpers::session_from_context,
    models::{
        domain::GenerationParams,
        dto::{
            request::GenerateQuestionsRequest,
            response::{ClearHistoryResponse, GeneratedBatchDto},
        },
    },
};

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn generate_questions(
        &self,
        ctx: &Context<'_>,
        input: GenerateQuestionsRequest,
    ) -> Result<GeneratedBatchDto> {
        let state = ctx.data::<AppState>()?;
        let session = session_from_context(ctx);

        let params = GenerationParams::try_from(input).extend()?;
        let entry = state
            .generation_service
            .generate(session, params)
            .await
            .extend()?;
        Ok(GeneratedBatchDto::from(&entry))
    }

    async fn clear_history(&self, ctx: &Context<'_>) -> Result<ClearHistoryResponse> {
        let state = ctx.data::<AppState>()?;
        let session = session_from_context(ctx);

        let removed = state.history.clear(session).await;
        Ok(ClearHistoryResponse {
            removed: u32::try_from(removed).unwrap_or(u32::MAX),
            message: "History cleared".to_string(),
        })
    }
}
