use async_graphql::{Context, Object, Result, ResultExt, ID};

use crate::{
    app_state::AppState,
    graphql::helpers::{parse_id, session_from_context},
    models::dto::response::{GeneratedBatchDto, HistorySummaryDto},
};

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn history(&self, ctx: &Context<'_>) -> Result<Vec<HistorySummaryDto>> {
        let state = ctx.data::<AppState>()?;
        let session = session_from_context(ctx);

        Ok(state
            .history
            .list(session)
            .await
            .iter()
            .map(HistorySummaryDto::from)
            .collect())
    }

    async fn history_entry(&self, ctx: &Context<'_>, id: ID) -> Result<GeneratedBatchDto> {
        let state = ctx.data::<AppState>()?;
        let session = session_from_context(ctx);

        let id = parse_id(&id).extend()?;
        let entry = state.history.get(session, &id).await.extend()?;
        Ok(GeneratedBatchDto::from(&entry))
    }
}
