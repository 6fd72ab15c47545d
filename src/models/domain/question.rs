use std::fmt;

use async_graphql::{Enum, SimpleObject};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::BloomsLevel;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: i64, // Assigned by the store on create, never changes
    pub question: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    pub correct_answer: AnswerKey,
    pub blooms_level: BloomsLevel,
    pub topic: String,
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize, Enum)]
pub enum AnswerKey {
    A,
    B,
    C,
    D,
}

impl AnswerKey {
    pub const ALL: [AnswerKey; 4] = [AnswerKey::A, AnswerKey::B, AnswerKey::C, AnswerKey::D];

    pub fn letter(&self) -> char {
        match self {
            AnswerKey::A => 'A',
            AnswerKey::B => 'B',
            AnswerKey::C => 'C',
            AnswerKey::D => 'D',
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "A" => Some(AnswerKey::A),
            "B" => Some(AnswerKey::B),
            "C" => Some(AnswerKey::C),
            "D" => Some(AnswerKey::D),
            _ => None,
        }
    }
}

impl fmt::Display for AnswerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Question content before the store has assigned an id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionDraft {
    pub question: String,
    pub options: [String; 4],
    pub correct_answer: AnswerKey,
    pub blooms_level: BloomsLevel,
    pub topic: String,
    pub unit: String,
}

impl QuestionDraft {
    pub fn into_question(self, id: i64, now: DateTime<Utc>) -> Question {
        let [option_a, option_b, option_c, option_d] = self.options;
        Question {
            id,
            question: self.question,
            option_a,
            option_b,
            option_c,
            option_d,
            correct_answer: self.correct_answer,
            blooms_level: self.blooms_level,
            topic: self.topic,
            unit: self.unit,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }
}

impl Question {
    pub fn option(&self, key: AnswerKey) -> &str {
        match key {
            AnswerKey::A => &self.option_a,
            AnswerKey::B => &self.option_b,
            AnswerKey::C => &self.option_c,
            AnswerKey::D => &self.option_d,
        }
    }

    /// Options paired with their letters, in A..D order
    pub fn lettered_options(&self) -> impl Iterator<Item = (AnswerKey, &str)> {
        AnswerKey::ALL.into_iter().map(move |key| (key, self.option(key)))
    }

    /// Question text and all four options are populated
    pub fn is_complete(&self) -> bool {
        !self.question.trim().is_empty()
            && self.lettered_options().all(|(_, text)| !text.trim().is_empty())
    }
}
