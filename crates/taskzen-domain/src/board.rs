use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::card::{Card, CardId};
use crate::column::{ColumnId, Columns};
use crate::tag::{Tag, TagId};

/// The aggregate root: fixed columns, the card map, tag definitions, and the
/// owning profile's display name.
///
/// Invariant: the union of every column's `card_order` equals exactly the key
/// set of `cards`, with each id placed in exactly one column, and a card's
/// `archived` flag mirrors membership in the archive column. All mutation
/// goes through `BoardStore`, which preserves this; `normalize` repairs
/// boards arriving from outside (import, disk).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub columns: Columns,
    pub cards: BTreeMap<CardId, Card>,
    #[serde(default)]
    pub tags: BTreeMap<TagId, Tag>,
    #[serde(default)]
    pub profile_name: String,
}

impl Board {
    pub fn new(profile_name: impl Into<String>) -> Self {
        Self {
            columns: Columns::new(),
            cards: BTreeMap::new(),
            tags: BTreeMap::new(),
            profile_name: profile_name.into(),
        }
    }

    /// Column currently holding the card, if it is placed anywhere.
    pub fn column_of(&self, card_id: &CardId) -> Option<ColumnId> {
        self.columns.position_of(card_id)
    }

    /// Repair referential integrity after deserializing untrusted data.
    ///
    /// Drops order entries with no backing card, keeps only the first
    /// placement of an id that appears twice, appends unplaced cards to the
    /// archive or todo column per their `archived` flag, and re-syncs the
    /// flag with the final placement. Timestamps are left untouched.
    pub fn normalize(&mut self) {
        let mut seen: BTreeSet<CardId> = BTreeSet::new();
        for column in self.columns.iter_mut() {
            let mut kept = Vec::with_capacity(column.card_order.len());
            for id in column.card_order.drain(..) {
                if self.cards.contains_key(&id) && seen.insert(id.clone()) {
                    kept.push(id);
                }
            }
            column.card_order = kept;
        }

        for (id, card) in &self.cards {
            if !seen.contains(id) {
                let target = if card.archived {
                    ColumnId::Archive
                } else {
                    ColumnId::Todo
                };
                self.columns.get_mut(target).card_order.push(id.clone());
            }
        }

        for id in ColumnId::ALL {
            let in_archive = id == ColumnId::Archive;
            let order = self.columns.get(id).card_order.clone();
            for card_id in order {
                if let Some(card) = self.cards.get_mut(&card_id) {
                    card.archived = in_archive;
                }
            }
        }
    }

    /// Verify the placement invariant. Returns the first violation found.
    pub fn check_integrity(&self) -> Result<(), String> {
        let mut placed: BTreeSet<&CardId> = BTreeSet::new();
        for column in self.columns.iter() {
            for id in &column.card_order {
                if !self.cards.contains_key(id) {
                    return Err(format!(
                        "column '{}' references unknown card '{}'",
                        column.id, id
                    ));
                }
                if !placed.insert(id) {
                    return Err(format!("card '{}' is placed more than once", id));
                }
                let archived = self.cards[id].archived;
                let in_archive = column.id == ColumnId::Archive;
                if archived != in_archive {
                    return Err(format!(
                        "card '{}' archived flag does not match its column '{}'",
                        id, column.id
                    ));
                }
            }
        }
        for id in self.cards.keys() {
            if !placed.contains(id) {
                return Err(format!("card '{}' is not placed in any column", id));
            }
        }
        Ok(())
    }
}
