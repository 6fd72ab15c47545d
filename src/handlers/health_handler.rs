use actix_web::{get, web, HttpResponse};

use crate::app_state::AppState;

#[get("/health")]
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    let revisions: serde_json::Map<String, serde_json::Value> = state
        .revisions
        .snapshot()
        .into_iter()
        .map(|(scope, revision)| (scope.as_str().to_string(), revision.into()))
        .collect();

    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "cacheRevisions": revisions,
    }))
}

#[get("/health/live")]
pub async fn liveness() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": "alive" }))
}

#[get("/health/ready")]
pub async fn readiness(state: web::Data<AppState>) -> HttpResponse {
    match state.question_service.ping().await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ready",
            "database": "connected",
        })),
        Err(err) => {
            log::warn!("Readiness check failed: {}", err);
            HttpResponse::ServiceUnavailable().json(serde_json::json!({
                "status": "not_ready",
                "database": "disconnected",
            }))
        }
    }
}
