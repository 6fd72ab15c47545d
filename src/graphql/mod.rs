pub mod schema_impl;

use actix_web::{get, post, web, HttpResponse};
use async_graphql::http::GraphiQLSource;
use async_graphql_actix_web::{GraphQLRequest, GraphQLResponse};

pub use schema_impl::{create_schema, MutationRoot, QueryRoot, Schema};

#[post("/graphql")]
pub async fn graphql_handler(schema: web::Data<Schema>, request: GraphQLRequest) -> GraphQLResponse {
    schema.execute(request.into_inner()).await.into()
}

#[get("/graphiql")]
pub async fn graphiql() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(GraphiQLSource::build().endpoint("/graphql").finish())
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(graphql_handler).service(graphiql);
}
