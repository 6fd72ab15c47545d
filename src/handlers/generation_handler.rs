use actix_web::{http::header, post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::{
        domain::SelectionCriteria,
        dto::request::{ExportRequest, GenerateQuestionsRequest},
    },
};

#[post("/api/questions/generate")]
pub async fn generate_questions(
    state: web::Data<AppState>,
    request: web::Json<GenerateQuestionsRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let criteria = SelectionCriteria::from(request);
    let questions = state.selection_service.select(&criteria).await?;
    Ok(HttpResponse::Ok().json(questions))
}

#[post("/api/export")]
pub async fn export_questions(
    state: web::Data<AppState>,
    request: web::Json<ExportRequest>,
) -> Result<HttpResponse, AppError> {
    let file = state.export_service.export(request.into_inner())?;

    Ok(HttpResponse::Ok()
        .content_type(file.content_type())
        .insert_header((header::CONTENT_DISPOSITION, file.content_disposition()))
        .body(file.bytes))
}
