use actix_web::{post, web, HttpRequest, HttpResponse};
use serde_json::Value;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::{
        domain::GenerationParams,
        dto::{
            request::GenerateQuestionsRequest,
            response::{GeneratedBatchDto, NormalizedQuestionsDto},
        },
    },
    middleware::get_request_id,
    services::exporter::export_value,
    session::SessionId,
};

#[post("/api/questions/generate")]
pub async fn generate_questions(
    req: HttpRequest,
    state: web::Data<AppState>,
    session: SessionId,
    request: web::Json<GenerateQuestionsRequest>,
) -> Result<HttpResponse, AppError> {
    let params = GenerationParams::try_from(request.into_inner())?;
    log::info!(
        "[{}] generate request for session {}",
        get_request_id(&req).unwrap_or_default(),
        session.as_str()
    );
    let entry = state
        .generation_service
        .generate(session.as_str(), params)
        .await?;
    Ok(HttpResponse::Ok().json(GeneratedBatchDto::from(&entry)))
}

/// Normalizes a raw provider payload supplied by the caller.
#[post("/api/questions/normalize")]
pub async fn normalize_questions(
    state: web::Data<AppState>,
    body: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    let records = state.generation_service.normalize_raw(body.into_inner())?;
    Ok(HttpResponse::Ok().json(NormalizedQuestionsDto::from(records.as_slice())))
}

#[post("/api/questions/export")]
pub async fn export_questions(
    state: web::Data<AppState>,
    body: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    let records = state.generation_service.normalize_raw(body.into_inner())?;
    Ok(HttpResponse::Ok().json(export_value(&records)?))
}
