use async_graphql::InputObject;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::domain::{
    AnswerKey, BloomsLevel, Question, QuestionDraft, QuestionFilter, SelectionCriteria,
};
use crate::services::render::ExportFormat;

pub const DEFAULT_TOTAL_QUESTIONS: i64 = 20;
pub const MAX_PAGE_LIMIT: i64 = 100;
pub const MAX_PAGE: i64 = 1_000_000;

fn default_total_questions() -> i64 {
    DEFAULT_TOTAL_QUESTIONS
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("must not be blank".into()));
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuestionsRequest {
    #[serde(default = "default_total_questions")]
    #[graphql(default = 20)]
    #[validate(range(min = 1, max = 100))]
    pub total_questions: i64,

    #[validate(length(min = 1, message = "Please select at least one unit"))]
    pub selected_units: Vec<String>,

    #[serde(default)]
    #[graphql(default)]
    pub selected_topics: Vec<String>,

    #[serde(default)]
    #[graphql(default)]
    pub selected_bloom_levels: Vec<BloomsLevel>,

    #[serde(default)]
    #[graphql(default)]
    pub randomize: bool,
}

impl From<GenerateQuestionsRequest> for SelectionCriteria {
    fn from(request: GenerateQuestionsRequest) -> Self {
        SelectionCriteria {
            total_questions: request.total_questions,
            filter: QuestionFilter {
                units: request.selected_units,
                topics: request.selected_topics,
                blooms_levels: request.selected_bloom_levels,
            },
            randomize: request.randomize,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    #[validate(length(min = 1, max = 100, message = "Export between 1 and 100 questions"))]
    pub questions: Vec<Question>,

    pub format: ExportFormat,

    #[serde(default)]
    pub include_answers: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuestionListParams {
    pub unit: Option<String>,
    pub topic: Option<String>,
    pub blooms_level: Option<BloomsLevel>,

    #[validate(range(min = 1, max = 1000000))]
    pub page: Option<i64>,

    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,
}

impl QuestionListParams {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).clamp(1, MAX_PAGE)
    }

    pub fn limit(&self, default_limit: i64) -> i64 {
        self.limit.unwrap_or(default_limit).clamp(1, MAX_PAGE_LIMIT)
    }

    pub fn filter(&self) -> QuestionFilter {
        QuestionFilter::from_single(
            self.unit.clone().filter(|u| !u.is_empty()),
            self.topic.clone().filter(|t| !t.is_empty()),
            self.blooms_level,
        )
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate, InputObject)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuestionRequest {
    #[validate(length(min = 1, max = 2000), custom(function = "not_blank"))]
    pub question: String,

    #[validate(length(min = 1, max = 500), custom(function = "not_blank"))]
    pub option_a: String,

    #[validate(length(min = 1, max = 500), custom(function = "not_blank"))]
    pub option_b: String,

    #[validate(length(min = 1, max = 500), custom(function = "not_blank"))]
    pub option_c: String,

    #[validate(length(min = 1, max = 500), custom(function = "not_blank"))]
    pub option_d: String,

    pub correct_answer: AnswerKey,

    pub blooms_level: BloomsLevel,

    #[validate(length(min = 1, max = 200), custom(function = "not_blank"))]
    pub topic: String,

    #[validate(length(min = 1, max = 200), custom(function = "not_blank"))]
    pub unit: String,
}

impl From<CreateQuestionRequest> for QuestionDraft {
    fn from(request: CreateQuestionRequest) -> Self {
        QuestionDraft {
            question: request.question.trim().to_string(),
            options: [
                request.option_a.trim().to_string(),
                request.option_b.trim().to_string(),
                request.option_c.trim().to_string(),
                request.option_d.trim().to_string(),
            ],
            correct_answer: request.correct_answer,
            blooms_level: request.blooms_level,
            topic: request.topic.trim().to_string(),
            unit: request.unit.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuestionRequest {
    #[validate(length(min = 1, max = 2000), custom(function = "not_blank"))]
    pub question: Option<String>,

    #[validate(length(min = 1, max = 500), custom(function = "not_blank"))]
    pub option_a: Option<String>,

    #[validate(length(min = 1, max = 500), custom(function = "not_blank"))]
    pub option_b: Option<String>,

    #[validate(length(min = 1, max = 500), custom(function = "not_blank"))]
    pub option_c: Option<String>,

    #[validate(length(min = 1, max = 500), custom(function = "not_blank"))]
    pub option_d: Option<String>,

    pub correct_answer: Option<AnswerKey>,

    pub blooms_level: Option<BloomsLevel>,

    #[validate(length(min = 1, max = 200), custom(function = "not_blank"))]
    pub topic: Option<String>,

    #[validate(length(min = 1, max = 200), custom(function = "not_blank"))]
    pub unit: Option<String>,
}

impl UpdateQuestionRequest {
    /// Overwrite only the fields present in the request
    pub fn apply_to(self, question: &mut Question) {
        fn set(target: &mut String, value: Option<String>) {
            if let Some(value) = value {
                *target = value.trim().to_string();
            }
        }

        set(&mut question.question, self.question);
        set(&mut question.option_a, self.option_a);
        set(&mut question.option_b, self.option_b);
        set(&mut question.option_c, self.option_c);
        set(&mut question.option_d, self.option_d);
        set(&mut question.topic, self.topic);
        set(&mut question.unit, self.unit);

        if let Some(answer) = self.correct_answer {
            question.correct_answer = answer;
        }
        if let Some(level) = self.blooms_level {
            question.blooms_level = level;
        }
    }
}

/// Records already parsed by the upload pipeline
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ImportQuestionsRequest {
    #[validate(length(min = 1, max = 5000))]
    pub questions: Vec<CreateQuestionRequest>,
}
