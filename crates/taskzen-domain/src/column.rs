use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::card::CardId;

/// The closed set of workflow stages. `Archive` holds soft-deleted cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnId {
    Todo,
    Doing,
    Done,
    Archive,
}

impl ColumnId {
    pub const ALL: [ColumnId; 4] = [
        ColumnId::Todo,
        ColumnId::Doing,
        ColumnId::Done,
        ColumnId::Archive,
    ];

    /// Columns a valid import document must carry.
    pub const CORE: [ColumnId; 3] = [ColumnId::Todo, ColumnId::Doing, ColumnId::Done];

    pub fn as_str(self) -> &'static str {
        match self {
            ColumnId::Todo => "todo",
            ColumnId::Doing => "doing",
            ColumnId::Done => "done",
            ColumnId::Archive => "archive",
        }
    }

    pub fn default_title(self) -> &'static str {
        match self {
            ColumnId::Todo => "Todo",
            ColumnId::Doing => "Doing",
            ColumnId::Done => "Done",
            ColumnId::Archive => "Archive",
        }
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "todo" => Ok(ColumnId::Todo),
            "doing" => Ok(ColumnId::Doing),
            "done" => Ok(ColumnId::Done),
            "archive" => Ok(ColumnId::Archive),
            other => Err(format!(
                "unknown column '{}' (expected todo, doing, done, or archive)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    #[serde(default)]
    pub card_order: Vec<CardId>,
}

impl Column {
    pub fn new(id: ColumnId) -> Self {
        Self {
            id,
            title: id.default_title().to_string(),
            card_order: Vec::new(),
        }
    }

    pub fn contains(&self, card_id: &CardId) -> bool {
        self.card_order.contains(card_id)
    }

    pub fn remove(&mut self, card_id: &CardId) -> bool {
        let before = self.card_order.len();
        self.card_order.retain(|id| id != card_id);
        self.card_order.len() != before
    }
}

fn default_archive_column() -> Column {
    Column::new(ColumnId::Archive)
}

/// The fixed column set. Every key is always present; `archive` defaults in
/// when deserializing documents written before it existed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Columns {
    pub todo: Column,
    pub doing: Column,
    pub done: Column,
    #[serde(default = "default_archive_column")]
    pub archive: Column,
}

impl Columns {
    pub fn new() -> Self {
        Self {
            todo: Column::new(ColumnId::Todo),
            doing: Column::new(ColumnId::Doing),
            done: Column::new(ColumnId::Done),
            archive: Column::new(ColumnId::Archive),
        }
    }

    pub fn get(&self, id: ColumnId) -> &Column {
        match id {
            ColumnId::Todo => &self.todo,
            ColumnId::Doing => &self.doing,
            ColumnId::Done => &self.done,
            ColumnId::Archive => &self.archive,
        }
    }

    pub fn get_mut(&mut self, id: ColumnId) -> &mut Column {
        match id {
            ColumnId::Todo => &mut self.todo,
            ColumnId::Doing => &mut self.doing,
            ColumnId::Done => &mut self.done,
            ColumnId::Archive => &mut self.archive,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Column> {
        ColumnId::ALL.iter().map(move |id| self.get(*id))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Column> {
        [
            &mut self.todo,
            &mut self.doing,
            &mut self.done,
            &mut self.archive,
        ]
        .into_iter()
    }

    /// Column currently holding the card, if any.
    pub fn position_of(&self, card_id: &CardId) -> Option<ColumnId> {
        ColumnId::ALL
            .into_iter()
            .find(|id| self.get(*id).contains(card_id))
    }

    /// Remove the card id from every column's order.
    pub fn detach(&mut self, card_id: &CardId) {
        for column in self.iter_mut() {
            column.remove(card_id);
        }
    }
}

impl Default for Columns {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_id_parse() {
        assert_eq!("todo".parse::<ColumnId>().unwrap(), ColumnId::Todo);
        assert_eq!("DOING".parse::<ColumnId>().unwrap(), ColumnId::Doing);
        assert!("backlog".parse::<ColumnId>().is_err());
    }

    #[test]
    fn test_column_id_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ColumnId::Doing).unwrap(),
            "\"doing\""
        );
    }

    #[test]
    fn test_detach_removes_from_all_columns() {
        let mut columns = Columns::new();
        let id = CardId::generate();
        columns.todo.card_order.push(id.clone());
        columns.done.card_order.push(id.clone());

        columns.detach(&id);
        assert!(columns.iter().all(|c| !c.contains(&id)));
    }

    #[test]
    fn test_archive_column_defaults_in() {
        let json = r#"{
            "todo": {"id": "todo", "title": "Todo", "cardOrder": []},
            "doing": {"id": "doing", "title": "Doing", "cardOrder": []},
            "done": {"id": "done", "title": "Done", "cardOrder": []}
        }"#;
        let columns: Columns = serde_json::from_str(json).unwrap();
        assert_eq!(columns.archive.id, ColumnId::Archive);
        assert!(columns.archive.card_order.is_empty());
    }
}
