//! Moves as they appear in the server's move log.
//!
//! A move is immutable once the server appends it. The order of the log is
//! the only source of truth for what the board looks like.

use super::GamePiece;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A piece placed at a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Move {
    /// Row index, 0 is the top row.
    pub row: usize,
    /// Column index, 0 is the leftmost column.
    pub col: usize,
    /// Color of the placed piece.
    pub game_piece: GamePiece,
}

impl Move {
    /// Creates a new move.
    #[instrument]
    pub fn new(row: usize, col: usize, game_piece: GamePiece) -> Self {
        Self {
            row,
            col,
            game_piece,
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> ({}, {})", self.game_piece, self.row, self.col)
    }
}
