#![allow(dead_code, unused_imports)]

use std::{
    collections::{BTreeMap, HashSet},
    sync::Arc,
};

use async_trait::async_trait;
use chrono::Utc;
use rand::seq::SliceRandom;
use tokio::sync::RwLock;

use mcq_bank_server::{
    errors::{AppError, AppResult},
    models::{
        domain::{BloomsLevel, Question, QuestionDraft, QuestionFilter, SortOrder, Topic, Unit},
        dto::response::UnitStats,
    },
    repositories::{QuestionRepository, UnitRepository},
};

pub use mcq_bank_server::test_utils::fixtures::{mixed_pool, sample_draft, sample_question, sample_units};


/// Questions keyed by id, so iteration is natural (ascending id) order.
pub struct InMemoryQuestionRepository {
    questions: Arc<RwLock<BTreeMap<i64, Question>>>,
    next_id: Arc<RwLock<i64>>,
}

impl InMemoryQuestionRepository {
    pub fn new() -> Self {
        Self {
            questions: Arc::new(RwLock::new(BTreeMap::new())),
            next_id: Arc::new(RwLock::new(1)),
        }
    }

    pub async fn with_questions(questions: Vec<Question>) -> Self {
        let repo = Self::new();
        {
            let mut store = repo.questions.write().await;
            let mut next_id = repo.next_id.write().await;
            for question in questions {
                *next_id = (*next_id).max(question.id + 1);
                store.insert(question.id, question);
            }
        }
        repo
    }

    async fn matching(&self, filter: &QuestionFilter) -> Vec<Question> {
        let store = self.questions.read().await;
        store.values().filter(|q| filter.matches(q)).cloned().collect()
    }
}

#[async_trait]
impl QuestionRepository for InMemoryQuestionRepository {
    async fn count(&self, filter: &QuestionFilter) -> AppResult<u64> {
        Ok(self.matching(filter).await.len() as u64)
    }

    async fn find(&self, filter: &QuestionFilter, order: SortOrder, limit: u64) -> AppResult<Vec<Question>> {
        let mut matching = self.matching(filter).await;
        if order == SortOrder::Random {
            matching.shuffle(&mut rand::thread_rng());
        }
        matching.truncate(limit as usize);
        Ok(matching)
    }

    async fn list(&self, filter: &QuestionFilter, offset: u64, limit: u64) -> AppResult<(Vec<Question>, u64)> {
        let matching = self.matching(filter).await;
        let total = matching.len() as u64;
        let page = matching
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect();
        Ok((page, total))
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Question>> {
        Ok(self.questions.read().await.get(&id).cloned())
    }

    async fn create(&self, draft: QuestionDraft) -> AppResult<Question> {
        let mut next_id = self.next_id.write().await;
        let question = draft.into_question(*next_id, Utc::now());
        *next_id += 1;

        self.questions
            .write()
            .await
            .insert(question.id, question.clone());
        Ok(question)
    }

    async fn update(&self, question: Question) -> AppResult<Question> {
        let mut store = self.questions.write().await;
        match store.get_mut(&question.id) {
            Some(existing) => {
                *existing = question.clone();
                Ok(question)
            }
            None => Err(AppError::NotFound(format!(
                "Question with id '{}' not found",
                question.id
            ))),
        }
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        self.questions
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("Question with id '{}' not found", id)))
    }

    async fn insert_many(&self, drafts: Vec<QuestionDraft>) -> AppResult<u64> {
        let mut inserted = 0;
        for draft in drafts {
            self.create(draft).await?;
            inserted += 1;
        }
        Ok(inserted)
    }

    async fn unit_breakdown(&self) -> AppResult<Vec<UnitStats>> {
        let store = self.questions.read().await;
        let mut units: BTreeMap<String, (i64, HashSet<String>)> = BTreeMap::new();
        for question in store.values() {
            let entry = units.entry(question.unit.clone()).or_default();
            entry.0 += 1;
            entry.1.insert(question.topic.clone());
        }

        Ok(units
            .into_iter()
            .map(|(unit_name, (question_count, topics))| UnitStats {
                unit_name,
                question_count,
                topic_count: topics.len() as i64,
                last_updated: None,
            })
            .collect())
    }

    async fn blooms_breakdown(&self) -> AppResult<Vec<(BloomsLevel, i64)>> {
        let store = self.questions.read().await;
        let mut levels: BTreeMap<BloomsLevel, i64> = BTreeMap::new();
        for question in store.values() {
            *levels.entry(question.blooms_level).or_default() += 1;
        }
        Ok(levels.into_iter().collect())
    }

    async fn distinct_topic_count(&self) -> AppResult<i64> {
        let store = self.questions.read().await;
        let topics: HashSet<&str> = store.values().map(|q| q.topic.as_str()).collect();
        Ok(topics.len() as i64)
    }
}

pub struct InMemoryUnitRepository {
    units: Arc<RwLock<Vec<Unit>>>,
}

impl InMemoryUnitRepository {
    pub fn new(units: Vec<Unit>) -> Self {
        Self {
            units: Arc::new(RwLock::new(units)),
        }
    }
}

#[async_trait]
impl UnitRepository for InMemoryUnitRepository {
    async fn list_units(&self) -> AppResult<Vec<Unit>> {
        let mut units: Vec<Unit> = self
            .units
            .read()
            .await
            .iter()
            .cloned()
            .map(Unit::sorted)
            .collect();
        units.sort_by_key(|u| u.id);
        Ok(units)
    }

    async fn topics_for_unit(&self, unit_id: i64) -> AppResult<Vec<Topic>> {
        self.units
            .read()
            .await
            .iter()
            .find(|u| u.id == unit_id)
            .cloned()
            .map(|u| u.sorted().topics)
            .ok_or_else(|| AppError::NotFound(format!("Unit with id '{}' not found", unit_id)))
    }
}
