use async_graphql::{Context, ErrorExtensions, Object, Result};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::{
        domain::{Question, SelectionCriteria},
        dto::{
            request::{CreateQuestionRequest, GenerateQuestionsRequest},
            response::DeleteResponse,
        },
    },
};

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn generate_questions(
        &self,
        ctx: &Context<'_>,
        input: GenerateQuestionsRequest,
    ) -> Result<Vec<Question>> {
        let state = ctx.data::<AppState>()?;
        input
            .validate()
            .map_err(|e| AppError::from(e).extend())?;

        let criteria = SelectionCriteria::from(input);
        state
            .selection_service
            .select(&criteria)
            .await
            .map_err(|e| e.extend())
    }

    async fn create_question(
        &self,
        ctx: &Context<'_>,
        input: CreateQuestionRequest,
    ) -> Result<Question> {
        let state = ctx.data::<AppState>()?;
        state
            .question_service
            .create_question(input)
            .await
            .map_err(|e| e.extend())
    }

    async fn delete_question(&self, ctx: &Context<'_>, id: i64) -> Result<DeleteResponse> {
        let state = ctx.data::<AppState>()?;
        state
            .question_service
            .delete_question(id)
            .await
            .map_err(|e| e.extend())
    }
}
