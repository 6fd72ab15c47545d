use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Question, QuestionDraft, QuestionFilter},
        dto::{
            request::{
                CreateQuestionRequest, ImportQuestionsRequest, QuestionListParams,
                UpdateQuestionRequest,
            },
            response::{BloomsDistribution, DeleteResponse, ImportResult, QuestionPage, QuestionStats},
        },
    },
    repositories::QuestionRepository,
    services::cache::{CacheInvalidator, CacheScope},
};

const WRITE_SCOPES: [CacheScope; 3] = CacheScope::ALL;

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub struct QuestionService {
    repository: Arc<dyn QuestionRepository>,
    invalidator: Arc<dyn CacheInvalidator>,
    default_page_limit: i64,
}

impl QuestionService {
    pub fn new(
        repository: Arc<dyn QuestionRepository>,
        invalidator: Arc<dyn CacheInvalidator>,
        default_page_limit: i64,
    ) -> Self {
        Self {
            repository,
            invalidator,
            default_page_limit,
        }
    }

    /// Cheapest query that proves the store answers
    pub async fn ping(&self) -> AppResult<u64> {
        self.repository.count(&QuestionFilter::default()).await
    }

    pub async fn get_question(&self, id: i64) -> AppResult<Question> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Question with id '{}' not found", id)))
    }

    pub async fn list_questions(&self, params: &QuestionListParams) -> AppResult<QuestionPage> {
        params.validate()?;

        let page = params.page();
        let limit = params.limit(self.default_page_limit);
        let offset = (page as u64 - 1)
            .checked_mul(limit as u64)
            .ok_or_else(|| AppError::ValidationError(format!("page {} is out of range", page)))?;

        let (questions, total) = self
            .repository
            .list(&params.filter(), offset, limit as u64)
            .await?;

        Ok(QuestionPage::new(questions, total as i64, page, limit))
    }

    pub async fn create_question(&self, request: CreateQuestionRequest) -> AppResult<Question> {
        request.validate()?;

        let question = self.repository.create(request.into()).await?;
        self.invalidator.invalidate(&WRITE_SCOPES);

        log::info!("Created question {} in '{}'", question.id, question.unit);
        Ok(question)
    }

    pub async fn update_question(
        &self,
        id: i64,
        request: UpdateQuestionRequest,
    ) -> AppResult<Question> {
        request.validate()?;

        let mut question = self.get_question(id).await?;
        request.apply_to(&mut question);
        question.updated_at = Some(chrono::Utc::now());

        let question = self.repository.update(question).await?;
        self.invalidator.invalidate(&WRITE_SCOPES);

        log::info!("Updated question {}", id);
        Ok(question)
    }

    pub async fn delete_question(&self, id: i64) -> AppResult<DeleteResponse> {
        self.repository.delete(id).await?;
        self.invalidator.invalidate(&WRITE_SCOPES);

        log::info!("Deleted question {}", id);
        Ok(DeleteResponse { success: true })
    }

    /// Insert already-parsed records. Invalid records are reported by their
    /// 1-based position and skipped; the valid ones are stored together.
    pub async fn import_questions(&self, request: ImportQuestionsRequest) -> AppResult<ImportResult> {
        request.validate()?;

        let total = request.questions.len();
        let mut drafts: Vec<QuestionDraft> = Vec::with_capacity(total);
        let mut errors = Vec::new();

        for (index, record) in request.questions.into_iter().enumerate() {
            match record.validate() {
                Ok(()) => drafts.push(record.into()),
                Err(err) => errors.push(format!("Record {}: {}", index + 1, err)),
            }
        }

        let imported_count = self.repository.insert_many(drafts).await?;
        if imported_count > 0 {
            self.invalidator.invalidate(&WRITE_SCOPES);
        }

        log::info!(
            "Imported {} of {} question records ({} rejected)",
            imported_count,
            total,
            errors.len()
        );

        let message = if errors.is_empty() {
            format!("Successfully imported {} questions", imported_count)
        } else {
            format!(
                "Imported {} questions, {} records rejected",
                imported_count,
                errors.len()
            )
        };

        Ok(ImportResult {
            success: imported_count > 0,
            message,
            imported_count,
            errors: (!errors.is_empty()).then_some(errors),
        })
    }

    pub async fn stats(&self) -> AppResult<QuestionStats> {
        let unit_stats = self.repository.unit_breakdown().await?;
        let levels = self.repository.blooms_breakdown().await?;
        let total_topics = self.repository.distinct_topic_count().await?;

        let total_questions: i64 = unit_stats.iter().map(|u| u.question_count).sum();

        let blooms_distribution = levels
            .iter()
            .map(|(level, count)| BloomsDistribution {
                level: *level,
                count: *count,
                percentage: if total_questions > 0 {
                    round_one_decimal(*count as f64 * 100.0 / total_questions as f64)
                } else {
                    0.0
                },
            })
            .collect();

        let level_total: i64 = levels.iter().map(|(_, count)| count).sum();
        let average_blooms_level = if level_total > 0 {
            let weighted: i64 = levels
                .iter()
                .map(|(level, count)| level.numeric() as i64 * count)
                .sum();
            round_one_decimal(weighted as f64 / level_total as f64)
        } else {
            0.0
        };

        Ok(QuestionStats {
            total_questions,
            total_units: unit_stats.len() as i64,
            total_topics,
            average_blooms_level,
            unit_stats,
            blooms_distribution,
        })
    }
}
