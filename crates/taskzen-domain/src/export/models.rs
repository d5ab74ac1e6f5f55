//! Export data models.

use serde::{Deserialize, Serialize};

use crate::board::Board;

/// Version stamped into every exported document.
pub const EXPORT_VERSION: u32 = 1;

/// The portable document format: a version gate around a full board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub version: u32,
    pub board: Board,
}

impl ExportDocument {
    pub fn from_board(board: &Board) -> Self {
        Self {
            version: EXPORT_VERSION,
            board: board.clone(),
        }
    }

    pub fn into_board(self) -> Board {
        self.board
    }
}
