//! Connect Four area controller.
//!
//! Holds the last snapshot the server sent and the board rebuilt from its
//! move log. Every update rebuilds the board from scratch, compares it with
//! the held one, and only notifies listeners about what actually changed.
//!
//! Commands are validated against the held state and then handed to the
//! transport. They never touch local state; the server's next snapshot does.

use std::sync::Arc;

use strictly_connect_four::{Board, COLUMNS, GamePiece, GameStatus, Move, whose_turn};
use tracing::{debug, error, info, instrument};

use super::area::{AreaController, AreaEvents, GameArea};
use crate::events::Channel;
use crate::snapshot::{ConnectFourSnapshot, ConnectFourState, Occupant, PlayerId};
use crate::transport::{AreaCommand, CommandFuture, CommandSender};
use crate::AreaError;

/// Notifications specific to Connect Four.
#[derive(Debug)]
pub struct ConnectFourEvents {
    /// The board differs from the previously held one. Carries the new board.
    pub board_changed: Channel<Board>,
    /// Whether it is the local player's turn flipped. Carries the new value.
    pub turn_changed: Channel<bool>,
}

impl Default for ConnectFourEvents {
    fn default() -> Self {
        Self {
            board_changed: Channel::new("board-changed"),
            turn_changed: Channel::new("turn-changed"),
        }
    }
}

/// Client-side view of a Connect Four area.
#[derive(Debug)]
pub struct ConnectFourAreaController {
    area: AreaController,
    snapshot: ConnectFourSnapshot,
    board: Board,
    events: ConnectFourEvents,
}

impl ConnectFourAreaController {
    /// Creates a controller for an area that just became known.
    #[instrument(skip(snapshot, sender), fields(area_id = %snapshot.id))]
    pub fn new(
        snapshot: ConnectFourSnapshot,
        local_player_id: PlayerId,
        sender: Arc<dyn CommandSender>,
    ) -> Self {
        let area = AreaController::new(&snapshot, local_player_id, sender);
        let board = snapshot
            .game
            .as_ref()
            .map(|game| Board::rebuild(&game.state.moves))
            .unwrap_or_default();
        Self {
            area,
            snapshot,
            board,
            events: ConnectFourEvents::default(),
        }
    }

    /// Connect Four notification channels.
    pub fn events_mut(&mut self) -> &mut ConnectFourEvents {
        &mut self.events
    }

    /// Area notification channels.
    pub fn area_events_mut(&mut self) -> &mut AreaEvents {
        self.area.events_mut()
    }

    /// The last applied snapshot.
    pub fn snapshot(&self) -> &ConnectFourSnapshot {
        &self.snapshot
    }

    /// The board rebuilt from the last applied move log.
    pub fn board(&self) -> &Board {
        &self.board
    }

    fn state(&self) -> Option<&ConnectFourState> {
        self.snapshot.game.as_ref().map(|game| &game.state)
    }

    /// Game status. An area without a game is waiting for players.
    pub fn status(&self) -> GameStatus {
        self.state()
            .map_or(GameStatus::WaitingForPlayers, |state| state.status)
    }

    /// Number of moves in the log.
    pub fn move_count(&self) -> usize {
        self.state().map_or(0, |state| state.moves.len())
    }

    /// Occupant holding red, if that player is present.
    pub fn red(&self) -> Option<&Occupant> {
        self.area
            .resolve(self.state().and_then(|state| state.red.as_deref()))
    }

    /// Occupant holding yellow, if that player is present.
    pub fn yellow(&self) -> Option<&Occupant> {
        self.area
            .resolve(self.state().and_then(|state| state.yellow.as_deref()))
    }

    /// Winner, if the game is over and the winner is present.
    pub fn winner(&self) -> Option<&Occupant> {
        self.area
            .resolve(self.state().and_then(|state| state.winner.as_deref()))
    }

    /// Occupants seated in the game.
    pub fn players(&self) -> Vec<&Occupant> {
        self.area.players(self.snapshot.seated())
    }

    /// Occupants watching without a seat.
    pub fn observers(&self) -> Vec<&Occupant> {
        self.area.observers(self.snapshot.seated())
    }

    /// Whether the local player is seated in the game.
    pub fn is_player(&self) -> bool {
        let me = self.area.local_player_id();
        self.snapshot.seated().iter().any(|id| id == me)
    }

    /// Player whose turn it is.
    ///
    /// `None` unless both colors are bound to present occupants and the game
    /// is in progress.
    ///
    /// # Errors
    ///
    /// Returns [`AreaError::TurnOrder`] when an in-progress game has no usable
    /// first-player marker.
    #[instrument(skip(self), fields(area_id = %self.area.id()))]
    pub fn whose_turn(&self) -> Result<Option<&Occupant>, AreaError> {
        let first_player = self.state().and_then(|state| state.first_player);
        let turn = whose_turn(
            self.red(),
            self.yellow(),
            self.status(),
            first_player,
            self.move_count(),
        )?;
        debug!(player = ?turn.map(|o| o.id()), "Resolved turn");
        Ok(turn)
    }

    /// Whether it is the local player's turn.
    ///
    /// # Errors
    ///
    /// Same as [`ConnectFourAreaController::whose_turn`].
    pub fn is_our_turn(&self) -> Result<bool, AreaError> {
        let me = self.area.local_player_id();
        Ok(self.whose_turn()?.is_some_and(|o| o.id() == me))
    }

    /// Color assigned to the local player.
    ///
    /// # Errors
    ///
    /// Returns [`AreaError::NotInGame`] when the local player holds no color.
    #[instrument(skip(self), fields(player_id = %self.area.local_player_id()))]
    pub fn game_piece(&self) -> Result<GamePiece, AreaError> {
        let me = self.area.local_player_id();
        if self.red().is_some_and(|o| o.id() == me) {
            Ok(GamePiece::Red)
        } else if self.yellow().is_some_and(|o| o.id() == me) {
            Ok(GamePiece::Yellow)
        } else {
            debug!("Local player holds no color");
            Err(AreaError::NotInGame)
        }
    }

    /// Asks the server to start the game.
    ///
    /// Nothing changes locally; the new status arrives with a later snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`AreaError::NotStartable`] unless a game instance exists and
    /// is waiting to start. Nothing is sent in that case.
    #[instrument(skip(self), fields(area_id = %self.area.id(), status = %self.status()))]
    pub fn start_game(&self) -> Result<CommandFuture, AreaError> {
        let instance_id = match self.area.instance_id() {
            Some(id) if self.status() == GameStatus::WaitingToStart => id.to_string(),
            _ => {
                debug!("Game is not startable");
                return Err(AreaError::NotStartable);
            }
        };

        info!(instance_id = %instance_id, "Starting game");
        Ok(self.area.send(AreaCommand::StartGame {
            game_instance_id: instance_id,
        }))
    }

    /// Drops the local player's piece into `column`.
    ///
    /// The landing row is the lowest empty row of the held board. The board
    /// is not updated locally; the server's next snapshot carries the move.
    ///
    /// # Errors
    ///
    /// - [`AreaError::NoGameInProgress`] without an active, in-progress game
    /// - [`AreaError::ColumnOutOfRange`] for a column past the board edge
    /// - [`AreaError::ColumnFull`] when the column's top cell is occupied
    /// - [`AreaError::NotInGame`] when the local player holds no color
    ///
    /// Nothing is sent when any of these apply.
    #[instrument(skip(self), fields(area_id = %self.area.id()))]
    pub fn make_move(&self, column: usize) -> Result<CommandFuture, AreaError> {
        let instance_id = match self.area.instance_id() {
            Some(id) if self.status() == GameStatus::InProgress => id.to_string(),
            _ => {
                debug!(status = %self.status(), "No game in progress");
                return Err(AreaError::NoGameInProgress);
            }
        };
        if column >= COLUMNS {
            return Err(AreaError::ColumnOutOfRange(column));
        }
        if self.board.is_column_full(column) {
            debug!("Column is full");
            return Err(AreaError::ColumnFull(column));
        }

        let game_piece = self.game_piece()?;
        let row = self.board.next_free_row(column);
        let game_move = Move::new(row, column, game_piece);

        info!(%game_move, "Sending move");
        Ok(self.area.send(AreaCommand::GameMove {
            game_instance_id: instance_id,
            game_move,
        }))
    }

    /// Asks the server for a seat in this area's game.
    pub fn join_game(&self) -> CommandFuture {
        self.area.join_game()
    }

    /// Gives up the local player's seat.
    ///
    /// # Errors
    ///
    /// Returns [`AreaError::NoGameInProgress`] when there is no game instance.
    pub fn leave_game(&self) -> Result<CommandFuture, AreaError> {
        self.area.leave_game()
    }
}

impl GameArea for ConnectFourAreaController {
    type State = ConnectFourState;

    fn area(&self) -> &AreaController {
        &self.area
    }

    fn area_mut(&mut self) -> &mut AreaController {
        &mut self.area
    }

    #[instrument(skip(self, snapshot), fields(area_id = %self.area.id()))]
    fn apply_snapshot(&mut self, snapshot: ConnectFourSnapshot) -> Result<(), AreaError> {
        // A previous turn-order failure was already reported when it happened.
        let was_our_turn = self.is_our_turn().unwrap_or(false);

        self.area.merge(&snapshot);
        let rebuilt = snapshot
            .game
            .as_ref()
            .map(|game| Board::rebuild(&game.state.moves));
        self.snapshot = snapshot;

        if let Some(board) = rebuilt
            && board != self.board
        {
            self.board = board;
            info!(moves = self.move_count(), "Board changed");
            self.events.board_changed.emit(&self.board);
        }

        let turn = self.is_our_turn();
        match &turn {
            Ok(is_our_turn) if *is_our_turn != was_our_turn => {
                info!(is_our_turn, "Turn changed");
                self.events.turn_changed.emit(is_our_turn);
            }
            Ok(_) => {}
            Err(e) => error!(error = %e, "Snapshot has no usable turn order"),
        }

        self.area.finish_update();
        turn.map(|_| ())
    }

    fn is_active(&self) -> bool {
        !self.is_empty()
            && !matches!(
                self.status(),
                GameStatus::Over | GameStatus::WaitingForPlayers
            )
    }

    fn is_empty(&self) -> bool {
        self.snapshot.seated().is_empty() && self.area.occupants().is_empty()
    }
}
