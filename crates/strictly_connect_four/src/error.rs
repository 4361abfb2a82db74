//! Turn-order error types.

use derive_more::{Display, Error};
use tracing::instrument;

/// An in-progress game whose turn order cannot be determined.
///
/// Raised when the first-player marker is missing or unrecognized while the
/// game reports itself as in progress.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Turn order error: {} at {}:{}", message, file, line)]
pub struct TurnOrderError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl TurnOrderError {
    /// Creates a new turn-order error with caller location tracking.
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
