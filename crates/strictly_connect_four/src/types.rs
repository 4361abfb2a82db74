//! Core domain types for Connect Four.

use serde::{Deserialize, Serialize};

/// Color of a piece, one per seated player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum GamePiece {
    /// Red pieces.
    Red,
    /// Yellow pieces.
    Yellow,
}

impl GamePiece {
    /// Returns the other color.
    pub fn opponent(self) -> Self {
        match self {
            GamePiece::Red => GamePiece::Yellow,
            GamePiece::Yellow => GamePiece::Red,
        }
    }
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// No piece.
    #[default]
    Empty,
    /// Cell holds a piece of the given color.
    Occupied(GamePiece),
}

impl Cell {
    /// Returns true when no piece sits in this cell.
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Returns the piece in this cell, if any.
    pub fn piece(self) -> Option<GamePiece> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(piece) => Some(piece),
        }
    }
}

/// Server-reported lifecycle of a game instance.
///
/// The server drives every transition:
/// `WaitingForPlayers -> WaitingToStart -> InProgress -> Over`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    /// Fewer than two players are seated.
    #[default]
    WaitingForPlayers,
    /// Both colors are assigned; someone has to start the game.
    WaitingToStart,
    /// Moves are being played.
    InProgress,
    /// The game has finished.
    Over,
}

/// Marker recording which color moved first in a game instance.
///
/// Unknown values on the wire decode to [`FirstPlayer::Unrecognized`] so a
/// single bad field does not reject the whole snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum FirstPlayer {
    /// Red moved first.
    Red,
    /// Yellow moved first.
    Yellow,
    /// The server sent a marker this client does not understand.
    #[serde(other)]
    Unrecognized,
}

impl FirstPlayer {
    /// Returns the color this marker names, if it is a recognized one.
    pub fn piece(self) -> Option<GamePiece> {
        match self {
            FirstPlayer::Red => Some(GamePiece::Red),
            FirstPlayer::Yellow => Some(GamePiece::Yellow),
            FirstPlayer::Unrecognized => None,
        }
    }
}

impl From<GamePiece> for FirstPlayer {
    fn from(piece: GamePiece) -> Self {
        match piece {
            GamePiece::Red => FirstPlayer::Red,
            GamePiece::Yellow => FirstPlayer::Yellow,
        }
    }
}
