//! TestRun: an immutable observation of one model's answers for a prospect.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::status::AiModel;

/// One model's sweep across the five canonical queries for a prospect (§3).
/// Append-only: never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestRun {
    pub id: String,
    pub campaign_id: String,
    pub prospect_id: String,
    pub timestamp: DateTime<Utc>,
    pub model: AiModel,
    pub queries: Vec<String>,
    pub raw_answers: Vec<String>,
    pub extracted_entities: Vec<Vec<Entity>>,
    pub mentioned_target: bool,
    pub mention_per_query: Vec<bool>,
    pub competitors_entities: Vec<String>,
    pub notes: Option<String>,
}

impl TestRun {
    /// Checks the length invariant from §8: queries, raw_answers,
    /// extracted_entities and mention_per_query all have equal length, and
    /// `mentioned_target == any(mention_per_query)`.
    #[must_use]
    pub fn upholds_invariants(&self) -> bool {
        let len = self.queries.len();
        len == self.raw_answers.len()
            && len == self.extracted_entities.len()
            && len == self.mention_per_query.len()
            && self.mentioned_target == self.mention_per_query.iter().any(|m| *m)
    }
}
