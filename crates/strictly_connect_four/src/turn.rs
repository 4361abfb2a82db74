//! Turn parity: whose turn it is, derived from the move count.
//!
//! The server never sends a "current turn" field. Turns alternate strictly,
//! starting with the color named by the first-player marker, so the piece to
//! move is fully determined by how many moves the log holds.

use super::{FirstPlayer, GamePiece, GameStatus, TurnOrderError};
use tracing::{debug, error, instrument};

/// Returns the color that moves after `move_count` moves.
///
/// Even counts belong to the first mover, odd counts to the other color.
///
/// # Errors
///
/// Returns [`TurnOrderError`] when the marker is missing or unrecognized.
#[instrument]
pub fn piece_to_move(
    first_player: Option<FirstPlayer>,
    move_count: usize,
) -> Result<GamePiece, TurnOrderError> {
    let Some(first) = first_player.and_then(FirstPlayer::piece) else {
        error!(?first_player, "Cannot resolve turn order");
        return Err(TurnOrderError::new(format!(
            "first player marker {:?} does not name a color",
            first_player
        )));
    };

    let piece = if move_count % 2 == 0 {
        first
    } else {
        first.opponent()
    };
    debug!(%piece, "Resolved piece to move");
    Ok(piece)
}

/// Returns the player whose turn it is, if any.
///
/// Yields `None` unless both colors are bound to a player and the game is in
/// progress. Otherwise the turn goes to the player holding
/// [`piece_to_move`]'s color.
///
/// # Errors
///
/// Returns [`TurnOrderError`] for an in-progress game without a usable
/// first-player marker.
#[instrument(skip(red, yellow), fields(red = red.is_some(), yellow = yellow.is_some()))]
pub fn whose_turn<'a, P: ?Sized>(
    red: Option<&'a P>,
    yellow: Option<&'a P>,
    status: GameStatus,
    first_player: Option<FirstPlayer>,
    move_count: usize,
) -> Result<Option<&'a P>, TurnOrderError> {
    let (Some(red), Some(yellow)) = (red, yellow) else {
        return Ok(None);
    };
    if status != GameStatus::InProgress {
        return Ok(None);
    }

    Ok(Some(match piece_to_move(first_player, move_count)? {
        GamePiece::Red => red,
        GamePiece::Yellow => yellow,
    }))
}
