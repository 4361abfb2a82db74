//! Error types for area controllers and their transport.

use derive_more::{Display, Error, From};
use strictly_connect_four::TurnOrderError;
use tracing::instrument;

/// Rejection of a controller action or query.
///
/// All variants are raised synchronously, before anything is sent to the
/// server. Nothing is retried.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum AreaError {
    /// The local player has no color in this game.
    #[display("Local player is not in this game")]
    NotInGame,

    /// Start requested outside the waiting-to-start phase or without a game.
    #[display("Game is not ready to start")]
    NotStartable,

    /// Action requires a game in progress.
    #[display("No game in progress")]
    NoGameInProgress,

    /// The column's top cell is occupied.
    #[display("Column {} is full", _0)]
    ColumnFull(#[error(not(source))] usize),

    /// The column index is outside the board.
    #[display("Column {} is out of range", _0)]
    ColumnOutOfRange(#[error(not(source))] usize),

    /// The server reported an in-progress game with no usable turn order.
    #[display("{}", _0)]
    #[from]
    TurnOrder(#[error(source)] TurnOrderError),
}

/// Failure delivering a command to the server.
#[derive(Debug, Clone, Display, Error)]
#[display("Transport error: {} at {}:{}", message, file, line)]
pub struct TransportError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl TransportError {
    /// Creates a new transport error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        Self::new(format!("HTTP error: {}", err))
    }
}
