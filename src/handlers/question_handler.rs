use actix_web::{delete, get, post, put, web, HttpRequest, HttpResponse};

use crate::{
    app_state::AppState,
    errors::AppError,
    handlers::cached_json,
    models::dto::request::{
        CreateQuestionRequest, ImportQuestionsRequest, QuestionListParams, UpdateQuestionRequest,
    },
    services::cache::CacheScope,
};

#[get("/api/questions")]
pub async fn list_questions(
    req: HttpRequest,
    state: web::Data<AppState>,
    params: web::Query<QuestionListParams>,
) -> Result<HttpResponse, AppError> {
    let page = state.question_service.list_questions(&params).await?;
    cached_json(&req, CacheScope::Questions, &page)
}

#[get("/api/questions/stats")]
pub async fn question_stats(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let stats = state.question_service.stats().await?;
    cached_json(&req, CacheScope::QuestionStats, &stats)
}

#[get("/api/questions/{id}")]
pub async fn get_question(
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let question = state.question_service.get_question(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(question))
}

#[post("/api/questions")]
pub async fn create_question(
    state: web::Data<AppState>,
    request: web::Json<CreateQuestionRequest>,
) -> Result<HttpResponse, AppError> {
    let question = state
        .question_service
        .create_question(request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(question))
}

#[put("/api/questions/{id}")]
pub async fn update_question(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    request: web::Json<UpdateQuestionRequest>,
) -> Result<HttpResponse, AppError> {
    let question = state
        .question_service
        .update_question(id.into_inner(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(question))
}

#[delete("/api/questions/{id}")]
pub async fn delete_question(
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let response = state.question_service.delete_question(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/api/import")]
pub async fn import_questions(
    state: web::Data<AppState>,
    request: web::Json<ImportQuestionsRequest>,
) -> Result<HttpResponse, AppError> {
    let result = state
        .question_service
        .import_questions(request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use actix_web::{http::StatusCode, test, App};

    use crate::config::Config;
    use crate::models::domain::BloomsLevel;
    use crate::repositories::{MockQuestionRepository, MockUnitRepository};
    use crate::test_utils::fixtures::sample_question;
    use crate::test_utils::test_helpers::assert_error_status;

    fn state(mock: MockQuestionRepository) -> AppState {
        AppState::from_parts(
            Config::test_config(),
            Arc::new(mock),
            Arc::new(MockUnitRepository::new()),
        )
    }

    #[actix_web::test]
    async fn test_get_question_returns_camel_case_record() {
        let mut mock = MockQuestionRepository::new();
        mock.expect_find_by_id()
            .returning(|id| Ok(Some(sample_question(id, "Unit 1", "Sets", BloomsLevel::Apply))));

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state(mock)))
                .service(get_question),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/questions/12").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["id"], 12);
        assert_eq!(body["bloomsLevel"], "Apply (Level 3)");
        assert!(body.get("optionA").is_some());
    }

    #[actix_web::test]
    async fn test_missing_question_is_404_with_error_body() {
        let mut mock = MockQuestionRepository::new();
        mock.expect_find_by_id().returning(|_| Ok(None));

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state(mock)))
                .service(get_question),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/questions/404").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], 404);
    }

    #[actix_web::test]
    async fn test_delete_returns_success_flag() {
        let mut mock = MockQuestionRepository::new();
        mock.expect_delete().returning(|_| Ok(()));

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state(mock)))
                .service(delete_question),
        )
        .await;

        let req = test::TestRequest::delete().uri("/api/questions/3").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, serde_json::json!({ "success": true }));
    }

    #[actix_web::test]
    async fn test_create_rejects_unknown_answer_key() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state(MockQuestionRepository::new())))
                .service(create_question),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/questions")
            .set_json(serde_json::json!({
                "question": "Pick one",
                "optionA": "a", "optionB": "b", "optionC": "c", "optionD": "d",
                "correctAnswer": "E",
                "bloomsLevel": "Remember (Level 1)",
                "topic": "Sets",
                "unit": "Unit 1"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_error_status(resp.status());
    }

    #[actix_web::test]
    async fn test_stats_honours_if_none_match() {
        let mut mock = MockQuestionRepository::new();
        mock.expect_unit_breakdown().times(2).returning(|| Ok(vec![]));
        mock.expect_blooms_breakdown().times(2).returning(|| Ok(vec![]));
        mock.expect_distinct_topic_count().times(2).returning(|| Ok(0));

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state(mock)))
                .service(question_stats),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/questions/stats").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let etag = resp
            .headers()
            .get("ETag")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .expect("etag header");

        let req = test::TestRequest::get()
            .uri("/api/questions/stats")
            .insert_header(("If-None-Match", etag))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_MODIFIED);
    }
}
