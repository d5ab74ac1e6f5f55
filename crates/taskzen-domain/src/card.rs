use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::field_update::FieldUpdate;
use crate::tag::TagId;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CardId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<&str> for CardId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<TagId>,
    #[serde(default)]
    pub archived: bool,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Card {
    pub fn new(title: String, description: Option<String>, tags: Vec<TagId>) -> Self {
        let now = Utc::now();
        Self {
            id: CardId::generate(),
            title,
            description,
            tags,
            archived: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Idempotent: adding a tag the card already carries is a no-op.
    /// Returns whether the set changed.
    pub fn add_tag(&mut self, tag_id: TagId) -> bool {
        if self.tags.contains(&tag_id) {
            return false;
        }
        self.tags.push(tag_id);
        self.touch();
        true
    }

    /// Idempotent: removing an absent tag is a no-op.
    /// Returns whether the set changed.
    pub fn remove_tag(&mut self, tag_id: &TagId) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag_id);
        let changed = self.tags.len() != before;
        if changed {
            self.touch();
        }
        changed
    }
}

/// Input for card creation. The store trims the title and rejects it when
/// empty.
#[derive(Debug, Clone, Default)]
pub struct NewCard {
    pub title: String,
    pub description: Option<String>,
    pub tags: Vec<TagId>,
}

impl NewCard {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}

/// Partial update for a card's editable fields. `description` is tri-state
/// so callers can distinguish "leave alone" from "clear".
#[derive(Debug, Clone, Default)]
pub struct CardPatch {
    pub title: Option<String>,
    pub description: FieldUpdate<String>,
    pub tags: Option<Vec<TagId>>,
}

impl CardPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && !self.description.is_change() && self.tags.is_none()
    }
}
