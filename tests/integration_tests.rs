use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use actix_web::{http::StatusCode, test, web, App};
use async_trait::async_trait;
use secrecy::SecretString;
use serde_json::{json, Value};

use quizgen_server::{
    app_state::AppState,
    config::Config,
    errors::{AppError, AppResult},
    handlers,
    models::domain::{GenerationParams, RawResponse},
    services::{normalizer::normalize_value, provider::QuestionProvider},
};

/// Replays a fixed provider reply and counts how often it was asked.
struct StubProvider {
    reply: Value,
    calls: AtomicUsize,
}

impl StubProvider {
    fn new(reply: Value) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl QuestionProvider for StubProvider {
    async fn generate(&self, _params: &GenerationParams) -> AppResult<RawResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(RawResponse::Json(self.reply.clone()))
    }
}

struct FailingProvider;

#[async_trait]
impl QuestionProvider for FailingProvider {
    async fn generate(&self, _params: &GenerationParams) -> AppResult<RawResponse> {
        Err(AppError::ProviderError("upstream unavailable".to_string()))
    }
}

fn config() -> Config {
    Config {
        openai_api_key: SecretString::from("sk-integration"),
        openai_api_base: "http://127.0.0.1:9".to_string(),
        openai_model: "gpt-test".to_string(),
        generation_timeout_secs: 5,
        max_question_count: 10,
        history_limit: 5,
        max_sessions: 2,
        web_server_host: "127.0.0.1".to_string(),
        web_server_port: 0,
    }
}

fn generate_body(count: i64) -> Value {
    json!({"topic": "World War II", "count": count, "difficulty": "medium"})
}

#[actix_web::test]
async fn test_generate_history_export_flow() {
    let provider = Arc::new(StubProvider::new(json!({
        "questions": [
            {"question": "When did it end?", "options": ["1944", "1945"], "correct_option": 2,
             "explanation": "Formal surrender in September."},
            {"text": "Name one Allied power", "options": [], "answer": "France"}
        ]
    })));
    let state = AppState::with_provider(config(), provider.clone());
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(handlers::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/questions/generate")
        .insert_header(("x-session-id", "tab-7"))
        .set_json(generate_body(2))
        .to_request();
    let batch: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(batch["questions"][0]["answer"], "1945");
    assert_eq!(batch["questions"][1]["kind"], "OpenEnded");
    assert_eq!(provider.calls.load(Ordering::SeqCst), 1);

    let req = test::TestRequest::get()
        .uri("/api/history")
        .insert_header(("x-session-id", "tab-7"))
        .to_request();
    let history: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(history.as_array().map(Vec::len), Some(1));
    assert_eq!(history[0]["batch_id"], batch["batch_id"]);

    let req = test::TestRequest::get()
        .uri(&format!(
            "/api/history/{}/export",
            batch["batch_id"].as_str().unwrap()
        ))
        .insert_header(("x-session-id", "tab-7"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let exported: Value = test::read_body_json(resp).await;

    // The exported document normalizes back to the same records.
    let reloaded = normalize_value(exported.clone()).unwrap();
    assert_eq!(reloaded.len(), 2);
    assert_eq!(reloaded[0].answer(), "1945");
    assert_eq!(exported["questions"][1]["explanation"], Value::Null);
}

#[actix_web::test]
async fn test_malformed_batch_is_not_recorded() {
    let provider = Arc::new(StubProvider::new(json!([
        {"question": "Fine", "options": ["a", "b"], "answer": "a"},
        {"question": "Broken", "options": ["a", "b"], "correct_option": 9}
    ])));
    let state = AppState::with_provider(config(), provider);
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/questions/generate")
        .set_json(generate_body(2))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["kind"], "INVALID_ANSWER_INDEX");
    assert!(body["error"].as_str().unwrap().contains("Question 2"));
    assert!(state.history.list("anonymous").await.is_empty());
}

#[actix_web::test]
async fn test_provider_failure_maps_to_bad_gateway() {
    let state = AppState::with_provider(config(), Arc::new(FailingProvider));
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(handlers::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/questions/generate")
        .set_json(generate_body(1))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["kind"], "PROVIDER_ERROR");
}

#[actix_web::test]
async fn test_count_above_limit_skips_provider() {
    let provider = Arc::new(StubProvider::new(json!([])));
    let state = AppState::with_provider(config(), provider.clone());
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(handlers::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/questions/generate")
        .set_json(generate_body(11))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
}

#[actix_web::test]
async fn test_health_endpoint() {
    let state = AppState::with_provider(config(), Arc::new(FailingProvider));
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(handlers::configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "healthy");
}

#[actix_web::test]
async fn test_distinct_sessions_are_capped() {
    let provider = Arc::new(StubProvider::new(json!([
        {"question": "Q", "options": ["a", "b"], "answer": "a"}
    ])));
    let state = AppState::with_provider(config(), provider);
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure),
    )
    .await;

    for session in ["tab-1", "tab-2", "tab-3"] {
        let req = test::TestRequest::post()
            .uri("/api/questions/generate")
            .insert_header(("x-session-id", session))
            .set_json(generate_body(1))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    assert_eq!(state.history.session_count().await, 2);
    assert!(state.history.list("tab-1").await.is_empty());
    assert_eq!(state.history.list("tab-3").await.len(), 1);
}
