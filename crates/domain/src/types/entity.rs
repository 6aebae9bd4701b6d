//! Entities pulled out of free-form AI answers by the entity extractor.

use serde::{Deserialize, Serialize};

/// The kind of entity recognized by the extractor (§4.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Url,
    Company,
}

/// A single extracted entity. `domain` is only set for `Url` entities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    #[serde(rename = "type")]
    pub kind: EntityKind,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
}

impl Entity {
    pub fn company(value: impl Into<String>) -> Self {
        Self {
            kind: EntityKind::Company,
            value: value.into(),
            domain: None,
        }
    }

    pub fn url(value: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            kind: EntityKind::Url,
            value: value.into(),
            domain: Some(domain.into()),
        }
    }
}
