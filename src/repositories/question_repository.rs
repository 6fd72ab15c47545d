use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, from_document, Document},
    options::{IndexOptions, ReturnDocument},
    Collection, IndexModel,
};
use serde::Deserialize;

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::{
        domain::{BloomsLevel, Question, QuestionDraft, QuestionFilter, SortOrder},
        dto::response::UnitStats,
    },
};

const COUNTERS_COLLECTION: &str = "counters";
const QUESTION_SEQUENCE: &str = "questions";

/// Store adapter for question records.
///
/// `count` and `find` are issued back to back by the selection engine; the
/// adapter is expected to serve both from the same pool state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    async fn count(&self, filter: &QuestionFilter) -> AppResult<u64>;
    async fn find(&self, filter: &QuestionFilter, order: SortOrder, limit: u64) -> AppResult<Vec<Question>>;
    async fn list(&self, filter: &QuestionFilter, offset: u64, limit: u64) -> AppResult<(Vec<Question>, u64)>;
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Question>>;
    async fn create(&self, draft: QuestionDraft) -> AppResult<Question>;
    async fn update(&self, question: Question) -> AppResult<Question>;
    async fn delete(&self, id: i64) -> AppResult<()>;
    async fn insert_many(&self, drafts: Vec<QuestionDraft>) -> AppResult<u64>;
    async fn unit_breakdown(&self) -> AppResult<Vec<UnitStats>>;
    async fn blooms_breakdown(&self) -> AppResult<Vec<(BloomsLevel, i64)>>;
    async fn distinct_topic_count(&self) -> AppResult<i64>;
}

pub struct MongoQuestionRepository {
    collection: Collection<Question>,
    counters: Collection<Document>,
}

impl MongoQuestionRepository {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        Self {
            collection: db.get_collection(collection_name),
            counters: db.get_collection(COUNTERS_COLLECTION),
        }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for questions collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let classification_index = IndexModel::builder()
            .keys(doc! { "unit": 1, "topic": 1, "bloomsLevel": 1 })
            .options(
                IndexOptions::builder()
                    .name("unit_topic_level".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(classification_index).await?;

        log::info!("Successfully created indexes for questions collection");
        Ok(())
    }

    /// Reserve `count` consecutive ids and return the first one
    async fn reserve_ids(&self, count: i64) -> AppResult<i64> {
        let counter = self
            .counters
            .find_one_and_update(
                doc! { "_id": QUESTION_SEQUENCE },
                doc! { "$inc": { "seq": count } },
            )
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await?
            .ok_or_else(|| AppError::DatabaseError("question id counter missing".to_string()))?;

        let last = counter
            .get_i64("seq")
            .map_err(|e| AppError::DatabaseError(format!("invalid question id counter: {}", e)))?;

        Ok(last - count + 1)
    }
}

pub(crate) fn filter_document(filter: &QuestionFilter) -> Document {
    let mut document = Document::new();

    if !filter.units.is_empty() {
        document.insert("unit", doc! { "$in": filter.units.clone() });
    }
    if !filter.topics.is_empty() {
        document.insert("topic", doc! { "$in": filter.topics.clone() });
    }
    if !filter.blooms_levels.is_empty() {
        let labels: Vec<&str> = filter.blooms_levels.iter().map(|l| l.label()).collect();
        document.insert("bloomsLevel", doc! { "$in": labels });
    }

    document
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UnitRow {
    unit_name: String,
    question_count: i64,
    topic_count: i64,
    last_updated: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
struct LevelRow {
    #[serde(rename = "_id")]
    level: String,
    count: i64,
}

#[async_trait]
impl QuestionRepository for MongoQuestionRepository {
    async fn count(&self, filter: &QuestionFilter) -> AppResult<u64> {
        let count = self
            .collection
            .count_documents(filter_document(filter))
            .await?;
        Ok(count)
    }

    async fn find(&self, filter: &QuestionFilter, order: SortOrder, limit: u64) -> AppResult<Vec<Question>> {
        match order {
            SortOrder::Natural => {
                let questions = self
                    .collection
                    .find(filter_document(filter))
                    .sort(doc! { "id": 1 })
                    .limit(limit as i64)
                    .await?
                    .try_collect()
                    .await?;
                Ok(questions)
            }
            SortOrder::Random => {
                // $sample after $match samples without replacement
                let pipeline = vec![
                    doc! { "$match": filter_document(filter) },
                    doc! { "$sample": { "size": limit as i64 } },
                ];
                let documents: Vec<Document> =
                    self.collection.aggregate(pipeline).await?.try_collect().await?;

                documents
                    .into_iter()
                    .map(|d| from_document::<Question>(d).map_err(AppError::from))
                    .collect()
            }
        }
    }

    async fn list(&self, filter: &QuestionFilter, offset: u64, limit: u64) -> AppResult<(Vec<Question>, u64)> {
        let filter = filter_document(filter);

        let total = self.collection.count_documents(filter.clone()).await?;

        let questions = self
            .collection
            .find(filter)
            .sort(doc! { "id": 1 })
            .skip(offset)
            .limit(limit as i64)
            .await?
            .try_collect()
            .await?;

        Ok((questions, total))
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Question>> {
        let question = self.collection.find_one(doc! { "id": id }).await?;
        Ok(question)
    }

    async fn create(&self, draft: QuestionDraft) -> AppResult<Question> {
        let id = self.reserve_ids(1).await?;
        let question = draft.into_question(id, Utc::now());
        self.collection.insert_one(&question).await?;
        Ok(question)
    }

    async fn update(&self, question: Question) -> AppResult<Question> {
        let result = self
            .collection
            .replace_one(doc! { "id": question.id }, &question)
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!(
                "Question with id '{}' not found",
                question.id
            )));
        }

        Ok(question)
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let result = self.collection.delete_one(doc! { "id": id }).await?;

        if result.deleted_count == 0 {
            return Err(AppError::NotFound(format!(
                "Question with id '{}' not found",
                id
            )));
        }

        Ok(())
    }

    async fn insert_many(&self, drafts: Vec<QuestionDraft>) -> AppResult<u64> {
        if drafts.is_empty() {
            return Ok(0);
        }

        let first_id = self.reserve_ids(drafts.len() as i64).await?;
        let now = Utc::now();
        let questions: Vec<Question> = drafts
            .into_iter()
            .zip(first_id..)
            .map(|(draft, id)| draft.into_question(id, now))
            .collect();

        let result = self.collection.insert_many(&questions).await?;
        Ok(result.inserted_ids.len() as u64)
    }

    async fn unit_breakdown(&self) -> AppResult<Vec<UnitStats>> {
        let pipeline = vec![
            doc! { "$group": {
                "_id": "$unit",
                "questionCount": { "$sum": 1 },
                "topics": { "$addToSet": "$topic" },
                "lastUpdated": { "$max": "$updatedAt" },
            }},
            doc! { "$project": {
                "_id": 0,
                "unitName": "$_id",
                "questionCount": 1,
                "topicCount": { "$size": "$topics" },
                "lastUpdated": 1,
            }},
            doc! { "$sort": { "unitName": 1 } },
        ];

        let rows: Vec<Document> = self.collection.aggregate(pipeline).await?.try_collect().await?;

        rows.into_iter()
            .map(|row| -> AppResult<UnitStats> {
                let row: UnitRow = from_document(row)?;
                Ok(UnitStats {
                    unit_name: row.unit_name,
                    question_count: row.question_count,
                    topic_count: row.topic_count,
                    last_updated: row.last_updated,
                })
            })
            .collect()
    }

    async fn blooms_breakdown(&self) -> AppResult<Vec<(BloomsLevel, i64)>> {
        let pipeline = vec![doc! { "$group": {
            "_id": "$bloomsLevel",
            "count": { "$sum": 1 },
        }}];

        let rows: Vec<Document> = self.collection.aggregate(pipeline).await?.try_collect().await?;

        let mut levels = Vec::with_capacity(rows.len());
        for row in rows {
            let row: LevelRow = from_document(row)?;
            match BloomsLevel::parse(&row.level) {
                Some(level) => levels.push((level, row.count)),
                None => log::warn!("Skipping unknown Bloom's level '{}' in stats", row.level),
            }
        }
        levels.sort_by_key(|(level, _)| *level);
        Ok(levels)
    }

    async fn distinct_topic_count(&self) -> AppResult<i64> {
        let topics = self.collection.distinct("topic", doc! {}).await?;
        Ok(topics.len() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_builds_empty_document() {
        assert!(filter_document(&QuestionFilter::default()).is_empty());
    }

    #[test]
    fn filter_document_uses_in_clauses_per_dimension() {
        let filter = QuestionFilter {
            units: vec!["Unit 1".to_string(), "Unit 2".to_string()],
            topics: vec![],
            blooms_levels: vec![BloomsLevel::Apply],
        };

        let document = filter_document(&filter);
        assert_eq!(
            document,
            doc! {
                "unit": { "$in": ["Unit 1", "Unit 2"] },
                "bloomsLevel": { "$in": ["Apply (Level 3)"] },
            }
        );
        assert!(!document.contains_key("topic"));
    }
}
