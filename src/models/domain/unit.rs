use async_graphql::SimpleObject;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub topics: Vec<Topic>, // Ordered by id
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: i64,
    pub name: String,
    pub unit_id: i64, // Back-reference to the owning unit
}

impl Unit {
    pub fn sorted(mut self) -> Self {
        self.topics.sort_by_key(|t| t.id);
        self
    }
}
