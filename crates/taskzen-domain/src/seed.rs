//! The optional first-run demo board.
//!
//! Seeding is an explicitly configured startup behavior, never a hidden
//! default: callers opt in through configuration or a flag.

use crate::board::Board;
use crate::card::Card;
use crate::column::ColumnId;

/// Build the six-card demo board that walks a new user through the basics.
pub fn demo_board(profile_name: &str) -> Board {
    let mut board = Board::new(profile_name);

    let demos = [
        (
            ColumnId::Todo,
            "Explore the board",
            "Move cards between columns and reorder within a column.",
        ),
        (
            ColumnId::Todo,
            "Try search",
            "Search filters cards live without changing the board.",
        ),
        (
            ColumnId::Todo,
            "Add your first task",
            "Create a new card in any column to get started.",
        ),
        (
            ColumnId::Doing,
            "Edit a card",
            "Cards can be retitled, described, and tagged at any time.",
        ),
        (
            ColumnId::Doing,
            "Export / Import",
            "Export the board as JSON, then import to restore it.",
        ),
        (
            ColumnId::Done,
            "Works offline",
            "State persists to a local file and survives restarts.",
        ),
    ];

    for (column, title, description) in demos {
        let card = Card::new(title.to_string(), Some(description.to_string()), Vec::new());
        board
            .columns
            .get_mut(column)
            .card_order
            .push(card.id.clone());
        board.cards.insert(card.id.clone(), card);
    }

    board
}
