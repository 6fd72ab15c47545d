use actix_web::{get, web, HttpRequest, HttpResponse};

use crate::{
    app_state::AppState,
    errors::AppError,
    handlers::cached_json,
    services::cache::CacheScope,
};

#[get("/api/units")]
pub async fn list_units(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let units = state.unit_service.list_units().await?;
    cached_json(&req, CacheScope::Units, &units)
}

#[get("/api/units/{id}/topics")]
pub async fn unit_topics(
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let topics = state.unit_service.topics_for_unit(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(topics))
}
