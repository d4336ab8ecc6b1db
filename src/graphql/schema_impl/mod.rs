pub mod mutations;
pub mod queries;

use async_graphql::{EmptySubscription, Schema as GraphQLSchema};

use crate::app_state::AppState;

pub use mutations::MutationRoot;
pub use queries::QueryRoot;

pub type Schema = GraphQLSchema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn create_schema(app_state: AppState) -> Schema {
    GraphQLSchema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(app_state)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::Config,
        models::domain::RawResponse,
        services::provider::MockQuestionProvider,
        session::SessionId,
    };
    use async_graphql::Request;
    use serde_json::json;
    use std::sync::Arc;

    fn schema_with(provider: MockQuestionProvider) -> (Schema, AppState) {
        let state = AppState::with_provider(Config::test_config(), Arc::new(provider));
        (create_schema(state.clone()), state)
    }

    #[tokio::test]
    async fn test_generate_questions_mutation() {
        let mut provider = MockQuestionProvider::new();
        provider.expect_generate().returning(|_| {
            Ok(RawResponse::Json(json!({"questions": [
                {"question": "Q", "options": ["yes", "no"], "answer": "no", "explanation": "Because."}
            ]})))
        });
        let (schema, state) = schema_with(provider);

        let query = r#"mutation {
            generateQuestions(input: {topic: "Logic", count: 1, difficulty: HARD}) {
                topic
                questions { number kind answer answerLetter explanation }
            }
        }"#;
        let response = schema
            .execute(Request::new(query).data(SessionId("gql".to_string())))
            .await;

        assert!(response.errors.is_empty(), "{:?}", response.errors);
        let data = response.data.into_json().unwrap();
        let question = &data["generateQuestions"]["questions"][0];
        assert_eq!(question["answer"], "no");
        assert_eq!(question["answerLetter"], "B");
        assert_eq!(question["kind"], "MULTIPLE_CHOICE");
        assert_eq!(state.history.list("gql").await.len(), 1);
    }

    #[tokio::test]
    async fn test_normalization_error_carries_code() {
        let mut provider = MockQuestionProvider::new();
        provider
            .expect_generate()
            .returning(|_| Ok(RawResponse::Json(json!({"items": []}))));
        let (schema, _) = schema_with(provider);

        let query = r#"mutation {
            generateQuestions(input: {topic: "Logic", count: 1, difficulty: EASY}) { topic }
        }"#;
        let response = schema.execute(query).await;

        assert_eq!(response.errors.len(), 1);
        assert!(response.errors[0].message.starts_with("Malformed response"));
        let code = response.errors[0]
            .extensions
            .as_ref()
            .and_then(|extensions| extensions.get("code"));
        assert_eq!(
            code,
            Some(&async_graphql::Value::from("MALFORMED_RESPONSE"))
        );
    }

    #[tokio::test]
    async fn test_history_query_defaults_to_anonymous_session() {
        let (schema, state) = schema_with(MockQuestionProvider::new());
        state
            .history
            .record("anonymous", crate::test_utils::fixtures::history_entry("Optics"))
            .await;

        let response = schema.execute("{ history { topic questionCount } }").await;

        let data = response.data.into_json().unwrap();
        assert_eq!(data["history"][0]["topic"], "Optics");
    }

    #[tokio::test]
    async fn test_unknown_history_entry_is_not_found() {
        let (schema, _) = schema_with(MockQuestionProvider::new());

        let query = format!(
            r#"{{ historyEntry(id: "{}") {{ topic }} }}"#,
            uuid::Uuid::new_v4()
        );
        let response = schema.execute(query).await;

        assert_eq!(response.errors.len(), 1);
        let code = response.errors[0]
            .extensions
            .as_ref()
            .and_then(|extensions| extensions.get("code"));
        assert_eq!(code, Some(&async_graphql::Value::from("NOT_FOUND")));
    }
}
