use taskzen_core::{TaskzenError, TaskzenResult};
use tracing::debug;

use crate::board::Board;
use crate::card::{Card, CardId, CardPatch, NewCard};
use crate::column::ColumnId;
use crate::export::{BoardExporter, BoardImporter};
use crate::tag::{NewTag, Tag, TagId, TagPatch};

/// The operation contract every front-end drives the board through.
/// Adding a method here forces every implementation to provide it.
pub trait BoardOps {
    fn add_card(&mut self, column: ColumnId, input: NewCard) -> TaskzenResult<CardId>;
    fn edit_card(&mut self, id: &CardId, patch: CardPatch) -> TaskzenResult<()>;
    fn delete_card(&mut self, id: &CardId) -> TaskzenResult<()>;
    fn archive_card(&mut self, id: &CardId) -> TaskzenResult<()>;
    fn restore_card(&mut self, id: &CardId) -> TaskzenResult<()>;
    fn move_card(&mut self, id: &CardId, target: ColumnId, index: Option<usize>)
        -> TaskzenResult<()>;
    fn reorder_card(&mut self, column: ColumnId, id: &CardId, to_index: usize)
        -> TaskzenResult<()>;

    fn add_tag(&mut self, input: NewTag) -> TaskzenResult<TagId>;
    fn edit_tag(&mut self, id: &TagId, patch: TagPatch) -> TaskzenResult<()>;
    fn delete_tag(&mut self, id: &TagId) -> TaskzenResult<()>;
    fn add_card_tag(&mut self, card_id: &CardId, tag_id: &TagId) -> TaskzenResult<()>;
    fn remove_card_tag(&mut self, card_id: &CardId, tag_id: &TagId) -> TaskzenResult<()>;

    fn clear_all(&mut self) -> TaskzenResult<()>;
    fn export_json(&self) -> TaskzenResult<String>;
    fn import_json(&mut self, data: &str) -> TaskzenResult<()>;
}

/// Owns the single board and routes every mutation through `BoardOps`.
///
/// Each operation either completes and leaves the board consistent, or
/// returns an error with the board untouched. `revision` increments on every
/// completed mutation so callers can detect change without diffing.
pub struct BoardStore {
    board: Board,
    revision: u64,
}

impl BoardStore {
    pub fn new(board: Board) -> Self {
        Self { board, revision: 0 }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn into_board(self) -> Board {
        self.board
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn bump(&mut self) {
        self.revision += 1;
        debug_assert!(
            self.board.check_integrity().is_ok(),
            "board invariant violated: {:?}",
            self.board.check_integrity()
        );
    }

    /// Keep only known tag ids, first occurrence wins.
    fn sanitize_tags(&self, tags: Vec<TagId>) -> Vec<TagId> {
        let mut kept = Vec::with_capacity(tags.len());
        for tag in tags {
            if self.board.tags.contains_key(&tag) && !kept.contains(&tag) {
                kept.push(tag);
            }
        }
        kept
    }
}

fn validated_title(title: &str) -> TaskzenResult<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(TaskzenError::Validation(
            "card title must not be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

impl BoardOps for BoardStore {
    fn add_card(&mut self, column: ColumnId, input: NewCard) -> TaskzenResult<CardId> {
        if column == ColumnId::Archive {
            return Err(TaskzenError::Validation(
                "cards cannot be created in the archive column".to_string(),
            ));
        }
        let title = validated_title(&input.title)?;
        let tags = self.sanitize_tags(input.tags);

        let card = Card::new(title, input.description, tags);
        let id = card.id.clone();
        self.board.cards.insert(id.clone(), card);
        self.board
            .columns
            .get_mut(column)
            .card_order
            .push(id.clone());

        debug!(card = %id, %column, "added card");
        self.bump();
        Ok(id)
    }

    fn edit_card(&mut self, id: &CardId, patch: CardPatch) -> TaskzenResult<()> {
        let title = match &patch.title {
            Some(title) => Some(validated_title(title)?),
            None => None,
        };
        let tags = patch.tags.map(|tags| self.sanitize_tags(tags));

        let card = self
            .board
            .cards
            .get_mut(id)
            .ok_or_else(|| TaskzenError::NotFound(format!("Card {}", id)))?;
        if let Some(title) = title {
            card.title = title;
        }
        patch.description.apply_to(&mut card.description);
        if let Some(tags) = tags {
            card.tags = tags;
        }
        card.touch();

        self.bump();
        Ok(())
    }

    fn delete_card(&mut self, id: &CardId) -> TaskzenResult<()> {
        if self.board.cards.remove(id).is_none() {
            return Err(TaskzenError::NotFound(format!("Card {}", id)));
        }
        self.board.columns.detach(id);

        debug!(card = %id, "deleted card");
        self.bump();
        Ok(())
    }

    fn archive_card(&mut self, id: &CardId) -> TaskzenResult<()> {
        let card = self
            .board
            .cards
            .get_mut(id)
            .ok_or_else(|| TaskzenError::NotFound(format!("Card {}", id)))?;
        if card.archived {
            return Ok(());
        }
        card.archived = true;
        card.touch();

        self.board.columns.detach(id);
        self.board
            .columns
            .get_mut(ColumnId::Archive)
            .card_order
            .push(id.clone());

        self.bump();
        Ok(())
    }

    fn restore_card(&mut self, id: &CardId) -> TaskzenResult<()> {
        let card = self
            .board
            .cards
            .get_mut(id)
            .ok_or_else(|| TaskzenError::NotFound(format!("Card {}", id)))?;
        if !card.archived {
            return Ok(());
        }
        card.archived = false;
        card.touch();

        self.board.columns.detach(id);
        self.board
            .columns
            .get_mut(ColumnId::Todo)
            .card_order
            .push(id.clone());

        self.bump();
        Ok(())
    }

    fn move_card(
        &mut self,
        id: &CardId,
        target: ColumnId,
        index: Option<usize>,
    ) -> TaskzenResult<()> {
        let card = self
            .board
            .cards
            .get_mut(id)
            .ok_or_else(|| TaskzenError::NotFound(format!("Card {}", id)))?;

        // The archived flag mirrors archive-column membership, so crossing
        // that boundary updates the card too.
        let now_archived = target == ColumnId::Archive;
        if card.archived != now_archived {
            card.archived = now_archived;
            card.touch();
        }

        self.board.columns.detach(id);
        let order = &mut self.board.columns.get_mut(target).card_order;
        match index {
            Some(index) if index < order.len() => order.insert(index, id.clone()),
            _ => order.push(id.clone()),
        }

        debug!(card = %id, %target, "moved card");
        self.bump();
        Ok(())
    }

    fn reorder_card(
        &mut self,
        column: ColumnId,
        id: &CardId,
        to_index: usize,
    ) -> TaskzenResult<()> {
        let order = &mut self.board.columns.get_mut(column).card_order;
        let from = order.iter().position(|c| c == id).ok_or_else(|| {
            TaskzenError::NotFound(format!("Card {} is not in column '{}'", id, column))
        })?;

        let card = order.remove(from);
        let to = to_index.min(order.len());
        order.insert(to, card);

        self.bump();
        Ok(())
    }

    fn add_tag(&mut self, input: NewTag) -> TaskzenResult<TagId> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(TaskzenError::Validation(
                "tag name must not be empty".to_string(),
            ));
        }
        let tag = Tag::new(name.to_string(), input.color);
        let id = tag.id.clone();
        self.board.tags.insert(id.clone(), tag);

        self.bump();
        Ok(id)
    }

    fn edit_tag(&mut self, id: &TagId, patch: TagPatch) -> TaskzenResult<()> {
        let name = match &patch.name {
            Some(name) => {
                let trimmed = name.trim();
                if trimmed.is_empty() {
                    return Err(TaskzenError::Validation(
                        "tag name must not be empty".to_string(),
                    ));
                }
                Some(trimmed.to_string())
            }
            None => None,
        };

        let tag = self
            .board
            .tags
            .get_mut(id)
            .ok_or_else(|| TaskzenError::NotFound(format!("Tag {}", id)))?;
        if let Some(name) = name {
            tag.name = name;
        }
        if let Some(color) = patch.color {
            tag.color = color;
        }

        self.bump();
        Ok(())
    }

    fn delete_tag(&mut self, id: &TagId) -> TaskzenResult<()> {
        if self.board.tags.remove(id).is_none() {
            return Err(TaskzenError::NotFound(format!("Tag {}", id)));
        }
        // Sweep the id out of every card that referenced it.
        for card in self.board.cards.values_mut() {
            card.remove_tag(id);
        }

        debug!(tag = %id, "deleted tag");
        self.bump();
        Ok(())
    }

    fn add_card_tag(&mut self, card_id: &CardId, tag_id: &TagId) -> TaskzenResult<()> {
        if !self.board.tags.contains_key(tag_id) {
            return Err(TaskzenError::NotFound(format!("Tag {}", tag_id)));
        }
        let card = self
            .board
            .cards
            .get_mut(card_id)
            .ok_or_else(|| TaskzenError::NotFound(format!("Card {}", card_id)))?;
        if card.add_tag(tag_id.clone()) {
            self.bump();
        }
        Ok(())
    }

    fn remove_card_tag(&mut self, card_id: &CardId, tag_id: &TagId) -> TaskzenResult<()> {
        let card = self
            .board
            .cards
            .get_mut(card_id)
            .ok_or_else(|| TaskzenError::NotFound(format!("Card {}", card_id)))?;
        if card.remove_tag(tag_id) {
            self.bump();
        }
        Ok(())
    }

    fn clear_all(&mut self) -> TaskzenResult<()> {
        self.board.cards.clear();
        for column in self.board.columns.iter_mut() {
            column.card_order.clear();
        }

        debug!("cleared board");
        self.bump();
        Ok(())
    }

    fn export_json(&self) -> TaskzenResult<String> {
        BoardExporter::to_json(&self.board)
    }

    fn import_json(&mut self, data: &str) -> TaskzenResult<()> {
        let mut board = BoardImporter::from_json(data)?;
        // Import replaces the board's contents, not its owner: the profile
        // name stays with the running profile.
        board.profile_name = self.board.profile_name.clone();
        self.board = board;

        debug!(
            cards = self.board.cards.len(),
            tags = self.board.tags.len(),
            "imported board"
        );
        self.bump();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field_update::FieldUpdate;

    fn store() -> BoardStore {
        BoardStore::new(Board::new("test"))
    }

    fn order(store: &BoardStore, column: ColumnId) -> &[CardId] {
        &store.board().columns.get(column).card_order
    }

    #[test]
    fn test_add_move_reorder_scenario() {
        let mut store = store();

        let a = store
            .add_card(ColumnId::Todo, NewCard::titled("A"))
            .unwrap();
        assert_eq!(order(&store, ColumnId::Todo), [a.clone()]);

        store.move_card(&a, ColumnId::Doing, None).unwrap();
        assert!(order(&store, ColumnId::Todo).is_empty());
        assert_eq!(order(&store, ColumnId::Doing), [a.clone()]);

        let b = store
            .add_card(ColumnId::Doing, NewCard::titled("B"))
            .unwrap();
        store.reorder_card(ColumnId::Doing, &b, 0).unwrap();
        assert_eq!(order(&store, ColumnId::Doing), [b, a]);
    }

    #[test]
    fn test_add_card_rejects_blank_title() {
        let mut store = store();
        let err = store
            .add_card(ColumnId::Todo, NewCard::titled("   "))
            .unwrap_err();
        assert!(matches!(err, TaskzenError::Validation(_)));
        assert!(store.board().cards.is_empty());
    }

    #[test]
    fn test_add_card_rejects_archive_column() {
        let mut store = store();
        assert!(store
            .add_card(ColumnId::Archive, NewCard::titled("A"))
            .is_err());
    }

    #[test]
    fn test_add_card_trims_title() {
        let mut store = store();
        let id = store
            .add_card(ColumnId::Todo, NewCard::titled("  Ship it  "))
            .unwrap();
        assert_eq!(store.board().cards[&id].title, "Ship it");
    }

    #[test]
    fn test_edit_card_patches_fields() {
        let mut store = store();
        let id = store
            .add_card(ColumnId::Todo, NewCard::titled("Draft"))
            .unwrap();
        let before = store.board().cards[&id].updated_at;

        store
            .edit_card(
                &id,
                CardPatch {
                    title: Some("Final".to_string()),
                    description: FieldUpdate::Set("ready to ship".to_string()),
                    tags: None,
                },
            )
            .unwrap();

        let card = &store.board().cards[&id];
        assert_eq!(card.title, "Final");
        assert_eq!(card.description.as_deref(), Some("ready to ship"));
        assert!(card.updated_at >= before);

        store
            .edit_card(
                &id,
                CardPatch {
                    description: FieldUpdate::Clear,
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(store.board().cards[&id].description, None);
    }

    #[test]
    fn test_edit_missing_card_reports_not_found() {
        let mut store = store();
        let err = store
            .edit_card(&CardId::generate(), CardPatch::default())
            .unwrap_err();
        assert!(matches!(err, TaskzenError::NotFound(_)));
    }

    #[test]
    fn test_delete_card_is_complete() {
        let mut store = store();
        let id = store
            .add_card(ColumnId::Todo, NewCard::titled("A"))
            .unwrap();
        store.move_card(&id, ColumnId::Done, None).unwrap();

        store.delete_card(&id).unwrap();
        assert!(!store.board().cards.contains_key(&id));
        assert!(store.board().columns.iter().all(|c| !c.contains(&id)));

        assert!(matches!(
            store.delete_card(&id),
            Err(TaskzenError::NotFound(_))
        ));
    }

    #[test]
    fn test_archive_and_restore() {
        let mut store = store();
        let id = store
            .add_card(ColumnId::Doing, NewCard::titled("A"))
            .unwrap();

        store.archive_card(&id).unwrap();
        assert!(store.board().cards[&id].archived);
        assert_eq!(order(&store, ColumnId::Archive), [id.clone()]);
        assert!(order(&store, ColumnId::Doing).is_empty());

        // Archiving again is a no-op.
        let revision = store.revision();
        store.archive_card(&id).unwrap();
        assert_eq!(store.revision(), revision);

        // Restore always lands at the tail of todo.
        store.restore_card(&id).unwrap();
        assert!(!store.board().cards[&id].archived);
        assert_eq!(order(&store, ColumnId::Todo), [id]);
    }

    #[test]
    fn test_move_card_with_index() {
        let mut store = store();
        let a = store
            .add_card(ColumnId::Todo, NewCard::titled("A"))
            .unwrap();
        let b = store
            .add_card(ColumnId::Todo, NewCard::titled("B"))
            .unwrap();
        let c = store
            .add_card(ColumnId::Doing, NewCard::titled("C"))
            .unwrap();

        store.move_card(&c, ColumnId::Todo, Some(1)).unwrap();
        assert_eq!(order(&store, ColumnId::Todo), [a.clone(), c, b]);

        // Out-of-range index appends.
        let d = store
            .add_card(ColumnId::Doing, NewCard::titled("D"))
            .unwrap();
        store.move_card(&d, ColumnId::Todo, Some(99)).unwrap();
        assert_eq!(order(&store, ColumnId::Todo).len(), 4);
        assert_eq!(order(&store, ColumnId::Todo)[3], d);
    }

    #[test]
    fn test_move_into_archive_syncs_flag() {
        let mut store = store();
        let id = store
            .add_card(ColumnId::Todo, NewCard::titled("A"))
            .unwrap();

        store.move_card(&id, ColumnId::Archive, None).unwrap();
        assert!(store.board().cards[&id].archived);

        store.move_card(&id, ColumnId::Done, None).unwrap();
        assert!(!store.board().cards[&id].archived);
        assert_eq!(order(&store, ColumnId::Done), [id]);
    }

    #[test]
    fn test_reorder_to_current_index_is_noop() {
        let mut store = store();
        let a = store
            .add_card(ColumnId::Todo, NewCard::titled("A"))
            .unwrap();
        let b = store
            .add_card(ColumnId::Todo, NewCard::titled("B"))
            .unwrap();

        let before = store.board().clone();
        store.reorder_card(ColumnId::Todo, &b, 1).unwrap();
        assert_eq!(store.board(), &before);
        let _ = a;
    }

    #[test]
    fn test_reorder_clamps_out_of_range_index() {
        let mut store = store();
        let a = store
            .add_card(ColumnId::Todo, NewCard::titled("A"))
            .unwrap();
        let b = store
            .add_card(ColumnId::Todo, NewCard::titled("B"))
            .unwrap();

        store.reorder_card(ColumnId::Todo, &a, 999).unwrap();
        assert_eq!(order(&store, ColumnId::Todo), [b, a]);
    }

    #[test]
    fn test_reorder_requires_membership() {
        let mut store = store();
        let a = store
            .add_card(ColumnId::Todo, NewCard::titled("A"))
            .unwrap();
        assert!(matches!(
            store.reorder_card(ColumnId::Doing, &a, 0),
            Err(TaskzenError::NotFound(_))
        ));
    }

    #[test]
    fn test_tag_lifecycle_with_sweep() {
        let mut store = store();
        let card = store
            .add_card(ColumnId::Todo, NewCard::titled("A"))
            .unwrap();
        let tag = store
            .add_tag(NewTag {
                name: "urgent".to_string(),
                color: "red".to_string(),
            })
            .unwrap();

        store.add_card_tag(&card, &tag).unwrap();
        assert_eq!(store.board().cards[&card].tags, [tag.clone()]);

        // Adding twice leaves a single entry.
        store.add_card_tag(&card, &tag).unwrap();
        assert_eq!(store.board().cards[&card].tags.len(), 1);

        store.delete_tag(&tag).unwrap();
        assert!(store.board().tags.is_empty());
        assert!(store.board().cards[&card].tags.is_empty());
    }

    #[test]
    fn test_remove_absent_card_tag_is_noop() {
        let mut store = store();
        let card = store
            .add_card(ColumnId::Todo, NewCard::titled("A"))
            .unwrap();
        let revision = store.revision();

        store.remove_card_tag(&card, &TagId::generate()).unwrap();
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn test_unreferenced_tags_are_kept() {
        let mut store = store();
        let tag = store
            .add_tag(NewTag {
                name: "someday".to_string(),
                color: "gray".to_string(),
            })
            .unwrap();
        assert!(store.board().tags.contains_key(&tag));
    }

    #[test]
    fn test_clear_all_preserves_tags_and_profile() {
        let mut store = store();
        store
            .add_card(ColumnId::Todo, NewCard::titled("A"))
            .unwrap();
        let tag = store
            .add_tag(NewTag {
                name: "keep".to_string(),
                color: "blue".to_string(),
            })
            .unwrap();

        store.clear_all().unwrap();
        assert!(store.board().cards.is_empty());
        assert!(store
            .board()
            .columns
            .iter()
            .all(|c| c.card_order.is_empty()));
        assert!(store.board().tags.contains_key(&tag));
        assert_eq!(store.board().profile_name, "test");
    }

    #[test]
    fn test_failed_import_leaves_board_unchanged() {
        let mut store = store();
        store
            .add_card(ColumnId::Todo, NewCard::titled("Keep me"))
            .unwrap();
        let before = store.board().clone();

        let err = store
            .import_json(r#"{"version": 2, "board": {"columns": {}}}"#)
            .unwrap_err();
        assert!(err.to_string().contains("unsupported version"));
        assert_eq!(store.board(), &before);
    }

    #[test]
    fn test_import_keeps_running_profile_name() {
        let mut store = store();
        let mut other = Board::new("somebody-else");
        other.profile_name = "somebody-else".to_string();
        let exported = BoardExporter::to_json(&other).unwrap();

        store.import_json(&exported).unwrap();
        assert_eq!(store.board().profile_name, "test");
    }

    #[test]
    fn test_exclusive_placement_after_mixed_operations() {
        let mut store = store();
        let a = store
            .add_card(ColumnId::Todo, NewCard::titled("A"))
            .unwrap();
        let b = store
            .add_card(ColumnId::Todo, NewCard::titled("B"))
            .unwrap();
        let c = store
            .add_card(ColumnId::Doing, NewCard::titled("C"))
            .unwrap();

        store.move_card(&a, ColumnId::Doing, Some(0)).unwrap();
        store.archive_card(&b).unwrap();
        store.move_card(&c, ColumnId::Done, None).unwrap();
        store.restore_card(&b).unwrap();
        store.reorder_card(ColumnId::Doing, &a, 5).unwrap();
        store.delete_card(&c).unwrap();

        assert!(store.board().check_integrity().is_ok());
    }
}
