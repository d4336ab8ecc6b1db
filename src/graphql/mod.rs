pub mod helpers;
pub mod schema_impl;

use actix_web::{web, HttpResponse};
use async_graphql::http::GraphiQLSource;
use async_graphql_actix_web::{GraphQLRequest, GraphQLResponse};

pub use schema_impl::{create_schema, Schema};

use crate::session::SessionId;

pub async fn graphql_handler(
    schema: web::Data<Schema>,
    session: SessionId,
    request: GraphQLRequest,
) -> GraphQLResponse {
    schema.execute(request.into_inner().data(session)).await.into()
}

pub async fn graphiql() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(GraphiQLSource::build().endpoint("/graphql").finish())
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/graphql", web::post().to(graphql_handler))
        .route("/graphiql", web::get().to(graphiql));
}
