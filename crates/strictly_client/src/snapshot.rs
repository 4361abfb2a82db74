//! Area snapshots as delivered by the server.
//!
//! A snapshot is the whole server-side view of one game area. Controllers
//! replace their held snapshot wholesale on every update.

use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use strictly_connect_four::{FirstPlayer, GameStatus, Move};

/// Unique identifier for a player.
pub type PlayerId = String;

/// Unique identifier for a game area.
pub type AreaId = String;

/// Identifier of the game instance currently running in an area.
pub type GameInstanceId = String;

/// A player present in the area, seated or watching.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters, new)]
#[serde(rename_all = "camelCase")]
pub struct Occupant {
    /// Player's unique ID.
    id: PlayerId,
    /// Display name.
    user_name: String,
}

/// Full server-reported state of a game area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaSnapshot<S> {
    /// Area ID.
    pub id: AreaId,
    /// Players currently inside the area.
    #[serde(default)]
    pub occupants: Vec<Occupant>,
    /// The game instance, if one exists.
    pub game: Option<GameRecord<S>>,
}

/// A game instance within an area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord<S> {
    /// Instance ID.
    pub id: GameInstanceId,
    /// Players seated in the game.
    #[serde(default)]
    pub players: Vec<PlayerId>,
    /// Game-specific state.
    pub state: S,
}

/// Connect Four game state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectFourState {
    /// Applied moves, oldest first.
    #[serde(default)]
    pub moves: Vec<Move>,
    /// Lifecycle status.
    #[serde(default)]
    pub status: GameStatus,
    /// Player holding red.
    #[serde(default)]
    pub red: Option<PlayerId>,
    /// Player holding yellow.
    #[serde(default)]
    pub yellow: Option<PlayerId>,
    /// Winner, once the game is over.
    #[serde(default)]
    pub winner: Option<PlayerId>,
    /// Color that moved first.
    #[serde(default)]
    pub first_player: Option<FirstPlayer>,
}

/// Snapshot of a Connect Four area.
pub type ConnectFourSnapshot = AreaSnapshot<ConnectFourState>;

impl<S> AreaSnapshot<S> {
    /// Creates a snapshot of an area with no game.
    pub fn empty(id: impl Into<AreaId>) -> Self {
        Self {
            id: id.into(),
            occupants: Vec::new(),
            game: None,
        }
    }

    /// Players seated in the game, empty when there is no game.
    pub fn seated(&self) -> &[PlayerId] {
        self.game
            .as_ref()
            .map(|game| game.players.as_slice())
            .unwrap_or_default()
    }
}
