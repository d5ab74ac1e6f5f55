//! Read-side selectors over a board.
//!
//! Filtering is non-destructive: selectors borrow cards out of the board and
//! never touch its state. Used by front-ends to render columns and live
//! search results.

use crate::board::Board;
use crate::card::Card;
use crate::column::ColumnId;

/// Predicate over cards, the seam for pluggable filters.
pub trait CardMatcher {
    fn matches(&self, card: &Card) -> bool;
}

/// Case-insensitive substring match over title and description.
pub struct TextMatcher {
    query: String,
}

impl TextMatcher {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into().to_lowercase(),
        }
    }
}

impl CardMatcher for TextMatcher {
    fn matches(&self, card: &Card) -> bool {
        if self.query.is_empty() {
            return true;
        }
        if card.title.to_lowercase().contains(&self.query) {
            return true;
        }
        card.description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(&self.query))
    }
}

/// Cards of one column in display order. Dangling order entries are skipped
/// rather than surfaced, matching the rendering contract.
pub fn cards_in_column(board: &Board, column: ColumnId) -> Vec<&Card> {
    board
        .columns
        .get(column)
        .card_order
        .iter()
        .filter_map(|id| board.cards.get(id))
        .collect()
}

/// All cards matching the query. A blank query matches nothing, so an empty
/// search box leaves the board view unfiltered.
pub fn search_cards<'a>(board: &'a Board, query: &str) -> Vec<&'a Card> {
    if query.trim().is_empty() {
        return Vec::new();
    }
    let matcher = TextMatcher::new(query);
    board
        .cards
        .values()
        .filter(|card| matcher.matches(card))
        .collect()
}

pub fn card_count(board: &Board, column: ColumnId) -> usize {
    board.columns.get(column).card_order.len()
}

pub fn total_card_count(board: &Board) -> usize {
    board.columns.iter().map(|c| c.card_order.len()).sum()
}
