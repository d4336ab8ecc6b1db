use actix_web::{
    delete, get,
    http::header::{ContentDisposition, ContentType, DispositionParam, DispositionType},
    web, HttpResponse,
};
use uuid::Uuid;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::response::{ClearHistoryResponse, GeneratedBatchDto, HistorySummaryDto},
    services::exporter::{export_file_name, export_json},
    session::SessionId,
};

#[get("/api/history")]
pub async fn list_history(state: web::Data<AppState>, session: SessionId) -> HttpResponse {
    let summaries: Vec<HistorySummaryDto> = state
        .history
        .list(session.as_str())
        .await
        .iter()
        .map(HistorySummaryDto::from)
        .collect();
    HttpResponse::Ok().json(summaries)
}

#[get("/api/history/{id}")]
pub async fn get_history_entry(
    state: web::Data<AppState>,
    session: SessionId,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let entry = state.history.get(session.as_str(), &id).await?;
    Ok(HttpResponse::Ok().json(GeneratedBatchDto::from(&entry)))
}

/// Serves a stored batch as a JSON file download.
#[get("/api/history/{id}/export")]
pub async fn export_history_entry(
    state: web::Data<AppState>,
    session: SessionId,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let entry = state.history.get(session.as_str(), &id).await?;
    let document = export_json(&entry.questions)?;

    Ok(HttpResponse::Ok()
        .content_type(ContentType::json())
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(export_file_name(&entry.topic))],
        })
        .body(document))
}

#[delete("/api/history")]
pub async fn clear_history(state: web::Data<AppState>, session: SessionId) -> HttpResponse {
    let removed = state.history.clear(session.as_str()).await;
    log::info!("Cleared {} batch(es) for session {}", removed, session.as_str());

    HttpResponse::Ok().json(ClearHistoryResponse {
        removed: u32::try_from(removed).unwrap_or(u32::MAX),
        message: "History cleared".to_string(),
    })
}
