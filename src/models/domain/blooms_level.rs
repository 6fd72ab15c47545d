use std::fmt;

use async_graphql::Enum;
use serde::{Deserialize, Serialize};

/// Cognitive-difficulty tag from Bloom's taxonomy, ordered from 1 to 6.
///
/// Stored and exchanged as its display label (`"Apply (Level 3)"`). The bare
/// name is accepted on input as well.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize, Enum)]
pub enum BloomsLevel {
    #[serde(rename = "Remember (Level 1)", alias = "Remember")]
    Remember,
    #[serde(rename = "Understand (Level 2)", alias = "Understand")]
    Understand,
    #[serde(rename = "Apply (Level 3)", alias = "Apply")]
    Apply,
    #[serde(rename = "Analyze (Level 4)", alias = "Analyze")]
    Analyze,
    #[serde(rename = "Evaluate (Level 5)", alias = "Evaluate")]
    Evaluate,
    #[serde(rename = "Create (Level 6)", alias = "Create")]
    Create,
}

impl BloomsLevel {
    pub const ALL: [BloomsLevel; 6] = [
        BloomsLevel::Remember,
        BloomsLevel::Understand,
        BloomsLevel::Apply,
        BloomsLevel::Analyze,
        BloomsLevel::Evaluate,
        BloomsLevel::Create,
    ];

    pub fn numeric(&self) -> u8 {
        match self {
            BloomsLevel::Remember => 1,
            BloomsLevel::Understand => 2,
            BloomsLevel::Apply => 3,
            BloomsLevel::Analyze => 4,
            BloomsLevel::Evaluate => 5,
            BloomsLevel::Create => 6,
        }
    }

    /// Label used on the wire and in the store
    pub fn label(&self) -> &'static str {
        match self {
            BloomsLevel::Remember => "Remember (Level 1)",
            BloomsLevel::Understand => "Understand (Level 2)",
            BloomsLevel::Apply => "Apply (Level 3)",
            BloomsLevel::Analyze => "Analyze (Level 4)",
            BloomsLevel::Evaluate => "Evaluate (Level 5)",
            BloomsLevel::Create => "Create (Level 6)",
        }
    }

    /// Parse either the full label or the bare name, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        Self::ALL.into_iter().find(|level| {
            level.label().eq_ignore_ascii_case(trimmed)
                || level.name().eq_ignore_ascii_case(trimmed)
        })
    }

    fn name(&self) -> &'static str {
        self.label()
            .split_once(' ')
            .map(|(name, _)| name)
            .unwrap_or_else(|| self.label())
    }
}

impl fmt::Display for BloomsLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
