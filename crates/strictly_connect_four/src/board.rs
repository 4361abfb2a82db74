//! The 6x7 Connect Four grid, always derived from a move log.

use super::{Cell, GamePiece, Move};
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

/// Number of rows. Row 0 is the top, row 5 the bottom.
pub const ROWS: usize = 6;

/// Number of columns.
pub const COLUMNS: usize = 7;

/// Connect Four board.
///
/// Boards are never patched in place by callers: they are rebuilt from the
/// full move log with [`Board::rebuild`]. Equality is cell-by-cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Cells indexed `[row][col]`.
    cells: [[Cell; COLUMNS]; ROWS],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; COLUMNS]; ROWS],
        }
    }

    /// Rebuilds a board by replaying `moves` in log order onto an empty grid.
    ///
    /// Later moves at the same coordinates overwrite earlier ones. Moves
    /// outside the grid are skipped.
    #[instrument(skip(moves), fields(moves = moves.len()))]
    pub fn rebuild(moves: &[Move]) -> Self {
        let mut board = Self::new();
        for mv in moves {
            match board.cells.get_mut(mv.row).and_then(|row| row.get_mut(mv.col)) {
                Some(cell) => *cell = Cell::Occupied(mv.game_piece),
                None => warn!(row = mv.row, col = mv.col, "Ignoring move outside the board"),
            }
        }
        board
    }

    /// Gets the cell at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Returns all rows, top first.
    pub fn rows(&self) -> &[[Cell; COLUMNS]; ROWS] {
        &self.cells
    }

    /// Returns true when the top cell of `col` is occupied.
    ///
    /// Columns outside the board are reported as not full; callers check the
    /// range separately.
    pub fn is_column_full(&self, col: usize) -> bool {
        self.get(0, col).is_some_and(|cell| !cell.is_empty())
    }

    /// Returns the lowest empty row in `col`.
    ///
    /// Scans from the bottom row upward. A full column yields row 0, leaving
    /// the rejection to the server.
    pub fn next_free_row(&self, col: usize) -> usize {
        (0..ROWS)
            .rev()
            .find(|&row| self.get(row, col).is_some_and(Cell::is_empty))
            .unwrap_or(0)
    }

    /// Formats the board as a human-readable string.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in self.rows() {
            for (col, cell) in row.iter().enumerate() {
                let symbol = match cell {
                    Cell::Empty => '.',
                    Cell::Occupied(GamePiece::Red) => 'R',
                    Cell::Occupied(GamePiece::Yellow) => 'Y',
                };
                result.push(symbol);
                if col + 1 < COLUMNS {
                    result.push(' ');
                }
            }
            result.push('\n');
        }
        result.push_str("0 1 2 3 4 5 6");
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rebuild_empty_log() {
        assert_eq!(Board::rebuild(&[]), Board::new());
    }

    #[test]
    fn test_rebuild_places_single_move() {
        let board = Board::rebuild(&[Move::new(0, 3, GamePiece::Red)]);
        for row in 0..ROWS {
            for col in 0..COLUMNS {
                let expected = if (row, col) == (0, 3) {
                    Cell::Occupied(GamePiece::Red)
                } else {
                    Cell::Empty
                };
                assert_eq!(board.get(row, col), Some(expected));
            }
        }
    }

    #[test]
    fn test_rebuild_duplicate_coordinates_overwrite() {
        let board = Board::rebuild(&[
            Move::new(5, 0, GamePiece::Red),
            Move::new(5, 0, GamePiece::Yellow),
        ]);
        assert_eq!(board.get(5, 0), Some(Cell::Occupied(GamePiece::Yellow)));
        let reds = board
            .rows()
            .iter()
            .flatten()
            .filter(|cell| cell.piece() == Some(GamePiece::Red))
            .count();
        assert_eq!(reds, 0);
    }

    #[test]
    fn test_rebuild_skips_out_of_range() {
        let board = Board::rebuild(&[
            Move::new(6, 0, GamePiece::Red),
            Move::new(0, 7, GamePiece::Red),
        ]);
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_first_drop_lands_on_bottom_row() {
        assert_eq!(Board::new().next_free_row(3), ROWS - 1);
    }

    #[test]
    fn test_next_free_row_stacks_upward() {
        let board = Board::rebuild(&[
            Move::new(5, 2, GamePiece::Red),
            Move::new(4, 2, GamePiece::Yellow),
        ]);
        assert_eq!(board.next_free_row(2), 3);
    }

    #[test]
    fn test_full_column() {
        let moves: Vec<Move> = (0..ROWS)
            .map(|row| Move::new(row, 6, GamePiece::Red))
            .collect();
        let board = Board::rebuild(&moves);
        assert!(board.is_column_full(6));
        assert_eq!(board.next_free_row(6), 0);
        assert!(!board.is_column_full(5));
    }

    #[test]
    fn test_out_of_range_column_not_full() {
        assert!(!Board::new().is_column_full(COLUMNS));
    }

    #[test]
    fn test_display() {
        let board = Board::rebuild(&[
            Move::new(5, 0, GamePiece::Red),
            Move::new(5, 1, GamePiece::Yellow),
        ]);
        let text = board.display();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), ROWS + 1);
        assert_eq!(lines[5], "R Y . . . . .");
        assert_eq!(lines[0], ". . . . . . .");
    }
}
