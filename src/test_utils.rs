//! Fixtures shared by the unit tests and the `tests/` suites.

pub mod fixtures {
    use crate::models::domain::{AnswerKey, BloomsLevel, Question, QuestionDraft, Topic, Unit};

    /// A complete question. Texts embed the id so that different fixtures
    /// never render identically; the answer key cycles with the id.
    pub fn sample_question(id: i64, unit: &str, topic: &str, level: BloomsLevel) -> Question {
        Question {
            id,
            question: format!("Question {} on {}?", id, topic),
            option_a: format!("Option {}a", id),
            option_b: format!("Option {}b", id),
            option_c: format!("Option {}c", id),
            option_d: format!("Option {}d", id),
            correct_answer: AnswerKey::ALL[id.rem_euclid(4) as usize],
            blooms_level: level,
            topic: topic.to_string(),
            unit: unit.to_string(),
            created_at: None,
            updated_at: None,
        }
    }

    pub fn sample_draft(unit: &str, topic: &str) -> QuestionDraft {
        QuestionDraft {
            question: format!("New question on {}?", topic),
            options: [
                "first".to_string(),
                "second".to_string(),
                "third".to_string(),
                "fourth".to_string(),
            ],
            correct_answer: AnswerKey::A,
            blooms_level: BloomsLevel::Understand,
            topic: topic.to_string(),
            unit: unit.to_string(),
        }
    }

    /// Five questions in Unit 1 and three in Unit 2, two topics per unit
    pub fn mixed_pool() -> Vec<Question> {
        vec![
            sample_question(1, "Unit 1", "Sets", BloomsLevel::Remember),
            sample_question(2, "Unit 1", "Sets", BloomsLevel::Understand),
            sample_question(3, "Unit 1", "Logic", BloomsLevel::Apply),
            sample_question(4, "Unit 1", "Logic", BloomsLevel::Remember),
            sample_question(5, "Unit 1", "Sets", BloomsLevel::Analyze),
            sample_question(6, "Unit 2", "Relations", BloomsLevel::Apply),
            sample_question(7, "Unit 2", "Functions", BloomsLevel::Evaluate),
            sample_question(8, "Unit 2", "Functions", BloomsLevel::Create),
        ]
    }

    /// Deliberately out of id order, topics included
    pub fn sample_units() -> Vec<Unit> {
        vec![
            Unit {
                id: 2,
                name: "Unit 2".to_string(),
                description: Some("Relations and functions".to_string()),
                topics: vec![
                    Topic {
                        id: 6,
                        name: "Functions".to_string(),
                        unit_id: 2,
                    },
                    Topic {
                        id: 5,
                        name: "Relations".to_string(),
                        unit_id: 2,
                    },
                ],
            },
            Unit {
                id: 1,
                name: "Unit 1".to_string(),
                description: None,
                topics: vec![Topic {
                    id: 1,
                    name: "Sets".to_string(),
                    unit_id: 1,
                }],
            },
        ]
    }
}
