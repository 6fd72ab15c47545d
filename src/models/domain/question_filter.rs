use crate::models::domain::{BloomsLevel, Question};

/// Conjunction of membership constraints over unit, topic and Bloom's level.
///
/// An empty set on a dimension leaves that dimension unconstrained, so
/// `QuestionFilter::default()` matches every question.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuestionFilter {
    pub units: Vec<String>,
    pub topics: Vec<String>,
    pub blooms_levels: Vec<BloomsLevel>,
}

impl QuestionFilter {
    /// Filter from optional single-value query parameters
    pub fn from_single(
        unit: Option<String>,
        topic: Option<String>,
        blooms_level: Option<BloomsLevel>,
    ) -> Self {
        Self {
            units: unit.into_iter().collect(),
            topics: topic.into_iter().collect(),
            blooms_levels: blooms_level.into_iter().collect(),
        }
    }

    pub fn matches(&self, question: &Question) -> bool {
        (self.units.is_empty() || self.units.iter().any(|u| *u == question.unit))
            && (self.topics.is_empty() || self.topics.iter().any(|t| *t == question.topic))
            && (self.blooms_levels.is_empty()
                || self.blooms_levels.contains(&question.blooms_level))
    }

    pub fn is_unconstrained(&self) -> bool {
        self.units.is_empty() && self.topics.is_empty() && self.blooms_levels.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending id, i.e. insertion order
    Natural,
    /// Uniform sample without replacement
    Random,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectionCriteria {
    pub total_questions: i64,
    pub filter: QuestionFilter,
    pub randomize: bool,
}

impl SelectionCriteria {
    pub fn order(&self) -> SortOrder {
        if self.randomize {
            SortOrder::Random
        } else {
            SortOrder::Natural
        }
    }
}
