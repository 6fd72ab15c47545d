use std::{collections::HashSet, sync::Arc};

use crate::{
    errors::{AppError, AppResult},
    models::domain::{Question, SelectionCriteria},
    repositories::QuestionRepository,
};

/// Draws a bounded question set from the pool matching some criteria.
///
/// Read-only: one count query followed by one fetch. Either the caller gets
/// exactly `total_questions` distinct records or an error, never a partial set.
pub struct SelectionService {
    repository: Arc<dyn QuestionRepository>,
    max_questions: i64,
}

impl SelectionService {
    pub fn new(repository: Arc<dyn QuestionRepository>, max_questions: i64) -> Self {
        Self {
            repository,
            max_questions,
        }
    }

    pub async fn select(&self, criteria: &SelectionCriteria) -> AppResult<Vec<Question>> {
        let requested = criteria.total_questions;
        if requested <= 0 {
            return Err(AppError::ValidationError(
                "totalQuestions must be a positive integer".to_string(),
            ));
        }
        if requested > self.max_questions {
            return Err(AppError::ValidationError(format!(
                "totalQuestions cannot exceed {}",
                self.max_questions
            )));
        }
        let requested = requested as u64;

        if criteria.filter.is_unconstrained() {
            log::debug!("Selecting from the whole question bank");
        }

        let available = self.repository.count(&criteria.filter).await?;
        if available < requested {
            log::info!(
                "Selection rejected: {} requested, {} available",
                requested,
                available
            );
            return Err(AppError::InsufficientPool {
                available,
                requested,
            });
        }

        let fetched = self
            .repository
            .find(&criteria.filter, criteria.order(), requested)
            .await?;

        let mut seen = HashSet::with_capacity(fetched.len());
        let questions: Vec<Question> = fetched
            .into_iter()
            .filter(|question| seen.insert(question.id))
            .take(requested as usize)
            .collect();

        // Pool shrank between the count and the fetch
        if (questions.len() as u64) < requested {
            log::warn!(
                "Selection pool changed during request: counted {}, fetched {} distinct",
                available,
                questions.len()
            );
            return Err(AppError::InsufficientPool {
                available: questions.len() as u64,
                requested,
            });
        }

        log::debug!(
            "Selected {} of {} matching questions ({:?} order)",
            questions.len(),
            available,
            criteria.order()
        );
        Ok(questions)
    }
}
