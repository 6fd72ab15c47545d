pub mod generation_handler;
pub mod health_handler;
pub mod question_handler;
pub mod unit_handler;

use actix_web::{http::header, web, HttpRequest, HttpResponse};
use serde::Serialize;

use crate::{
    errors::AppError,
    services::cache::{content_etag, CacheScope},
};

/// Register every REST route. Literal segments go before `{id}` so that
/// `/api/questions/stats` is never parsed as an id.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health_handler::health)
        .service(health_handler::readiness)
        .service(health_handler::liveness)
        .service(question_handler::list_questions)
        .service(question_handler::question_stats)
        .service(generation_handler::generate_questions)
        .service(question_handler::create_question)
        .service(question_handler::get_question)
        .service(question_handler::update_question)
        .service(question_handler::delete_question)
        .service(question_handler::import_questions)
        .service(generation_handler::export_questions)
        .service(unit_handler::list_units)
        .service(unit_handler::unit_topics);
}

/// True when the client already holds the representation tagged `etag`
pub(crate) fn not_modified(req: &HttpRequest, etag: &str) -> bool {
    req.headers()
        .get(header::IF_NONE_MATCH)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| {
            value
                .split(',')
                .map(str::trim)
                .any(|candidate| candidate == "*" || candidate == etag)
        })
}

/// JSON response tagged with a digest of its body. Answers 304 without a
/// body when the client's `If-None-Match` already names that digest.
pub(crate) fn cached_json<T: Serialize>(
    req: &HttpRequest,
    scope: CacheScope,
    body: &T,
) -> Result<HttpResponse, AppError> {
    let bytes = serde_json::to_vec(body)?;
    let etag = content_etag(scope, &bytes);

    if not_modified(req, &etag) {
        return Ok(HttpResponse::NotModified()
            .insert_header((header::ETAG, etag))
            .finish());
    }

    Ok(HttpResponse::Ok()
        .insert_header((header::ETAG, etag))
        .insert_header((header::CACHE_CONTROL, "no-cache"))
        .content_type("application/json")
        .body(bytes))
}
