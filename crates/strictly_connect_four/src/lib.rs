//! Pure Connect Four logic for clients that mirror a server-owned game.
//!
//! Nothing here performs I/O. The board is a value rebuilt from the move log,
//! and the turn is computed from move-count parity.
//!
//! # Example
//!
//! ```
//! use strictly_connect_four::{Board, GamePiece, Move};
//!
//! let board = Board::rebuild(&[Move::new(5, 3, GamePiece::Red)]);
//! assert_eq!(board.next_free_row(3), 4);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod board;
mod error;
mod turn;
mod types;

pub use action::Move;
pub use board::{Board, COLUMNS, ROWS};
pub use error::TurnOrderError;
pub use turn::{piece_to_move, whose_turn};
pub use types::{Cell, FirstPlayer, GamePiece, GameStatus};
