use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::{BloomsLevel, Question};

#[derive(Debug, Clone, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct QuestionPage {
    pub questions: Vec<Question>,
    pub total: i64,
    pub page: i64,
    pub total_pages: i64,
}

impl QuestionPage {
    pub fn new(questions: Vec<Question>, total: i64, page: i64, limit: i64) -> Self {
        let total_pages = if limit > 0 {
            (total + limit - 1) / limit
        } else {
            0
        };

        Self {
            questions,
            total,
            page,
            total_pages,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct UnitStats {
    pub unit_name: String,
    pub question_count: i64,
    pub topic_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct BloomsDistribution {
    pub level: BloomsLevel,
    pub count: i64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct QuestionStats {
    pub total_questions: i64,
    pub total_units: i64,
    pub total_topics: i64,
    pub average_blooms_level: f64,
    pub unit_stats: Vec<UnitStats>,
    pub blooms_distribution: Vec<BloomsDistribution>,
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct ImportResult {
    pub success: bool,
    pub message: String,
    pub imported_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

#[derive(Debug, Serialize, SimpleObject)]
pub struct DeleteResponse {
    pub success: bool,
}
