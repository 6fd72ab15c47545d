use async_graphql::{Context, ErrorExtensions, Object, Result};

use crate::{
    app_state::AppState,
    models::{
        domain::{BloomsLevel, Question, Topic, Unit},
        dto::{
            request::QuestionListParams,
            response::{QuestionPage, QuestionStats},
        },
    },
};

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn question(&self, ctx: &Context<'_>, id: i64) -> Result<Question> {
        let state = ctx.data::<AppState>()?;
        state
            .question_service
            .get_question(id)
            .await
            .map_err(|e| e.extend())
    }

    async fn questions(
        &self,
        ctx: &Context<'_>,
        unit: Option<String>,
        topic: Option<String>,
        blooms_level: Option<BloomsLevel>,
        page: Option<i64>,
        limit: Option<i64>,
    ) -> Result<QuestionPage> {
        let state = ctx.data::<AppState>()?;
        let params = QuestionListParams {
            unit,
            topic,
            blooms_level,
            page,
            limit,
        };

        state
            .question_service
            .list_questions(&params)
            .await
            .map_err(|e| e.extend())
    }

    async fn stats(&self, ctx: &Context<'_>) -> Result<QuestionStats> {
        let state = ctx.data::<AppState>()?;
        state.question_service.stats().await.map_err(|e| e.extend())
    }

    async fn units(&self, ctx: &Context<'_>) -> Result<Vec<Unit>> {
        let state = ctx.data::<AppState>()?;
        state.unit_service.list_units().await.map_err(|e| e.extend())
    }

    async fn topics(&self, ctx: &Context<'_>, unit_id: i64) -> Result<Vec<Topic>> {
        let state = ctx.data::<AppState>()?;
        state
            .unit_service
            .topics_for_unit(unit_id)
            .await
            .map_err(|e| e.extend())
    }
}
