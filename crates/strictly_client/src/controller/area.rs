//! State shared by every game area controller.
//!
//! [`AreaController`] tracks who is in the area and which game instance is
//! active, and owns the outbound command channel. Concrete controllers embed
//! it and expose it through the [`GameArea`] trait.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::events::Channel;
use crate::snapshot::{AreaId, AreaSnapshot, GameInstanceId, Occupant, PlayerId};
use crate::transport::{AreaCommand, CommandFuture, CommandSender};
use crate::AreaError;

/// Notifications every area emits.
#[derive(Debug)]
pub struct AreaEvents {
    /// The occupant list changed. Carries the new list.
    pub occupants_changed: Channel<Vec<Occupant>>,
    /// A snapshot was applied.
    pub game_updated: Channel<()>,
}

impl Default for AreaEvents {
    fn default() -> Self {
        Self {
            occupants_changed: Channel::new("occupants-changed"),
            game_updated: Channel::new("game-updated"),
        }
    }
}

/// Contract every game area controller fulfills.
pub trait GameArea {
    /// Game-specific state carried in snapshots.
    type State;

    /// Shared area state.
    fn area(&self) -> &AreaController;

    /// Shared area state, mutably.
    fn area_mut(&mut self) -> &mut AreaController;

    /// Replaces the held snapshot and emits whatever changed.
    ///
    /// # Errors
    ///
    /// Returns an error only when the new state is internally inconsistent.
    /// The snapshot is still applied in that case.
    fn apply_snapshot(&mut self, snapshot: AreaSnapshot<Self::State>) -> Result<(), AreaError>;

    /// True when the area has someone in it and a game is under way.
    fn is_active(&self) -> bool;

    /// True when nobody is seated and nobody is present.
    fn is_empty(&self) -> bool;

    /// Players currently in the area.
    fn occupants(&self) -> &[Occupant] {
        self.area().occupants()
    }

    /// Local player identity.
    fn local_player_id(&self) -> &str {
        self.area().local_player_id()
    }

    /// Active game instance, if any.
    fn instance_id(&self) -> Option<&str> {
        self.area().instance_id()
    }
}

/// Area-level state and command plumbing.
#[derive(Debug)]
pub struct AreaController {
    id: AreaId,
    local_player_id: PlayerId,
    occupants: Vec<Occupant>,
    instance_id: Option<GameInstanceId>,
    sender: Arc<dyn CommandSender>,
    events: AreaEvents,
}

impl AreaController {
    /// Creates the area state from its first snapshot.
    #[instrument(skip(snapshot, sender), fields(area_id = %snapshot.id))]
    pub fn new<S>(
        snapshot: &AreaSnapshot<S>,
        local_player_id: PlayerId,
        sender: Arc<dyn CommandSender>,
    ) -> Self {
        info!("Creating area controller");
        Self {
            id: snapshot.id.clone(),
            local_player_id,
            occupants: snapshot.occupants.clone(),
            instance_id: snapshot.game.as_ref().map(|game| game.id.clone()),
            sender,
            events: AreaEvents::default(),
        }
    }

    /// Area ID.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Local player identity.
    pub fn local_player_id(&self) -> &str {
        &self.local_player_id
    }

    /// Players currently in the area.
    pub fn occupants(&self) -> &[Occupant] {
        &self.occupants
    }

    /// Active game instance, if any.
    pub fn instance_id(&self) -> Option<&str> {
        self.instance_id.as_deref()
    }

    /// Area notification channels.
    pub fn events_mut(&mut self) -> &mut AreaEvents {
        &mut self.events
    }

    /// Merges the area-level parts of a snapshot.
    ///
    /// Replaces the occupant list, emitting occupants-changed when it differs,
    /// and adopts the game's instance ID when a game is present.
    #[instrument(skip(self, snapshot), fields(area_id = %self.id))]
    pub fn merge<S>(&mut self, snapshot: &AreaSnapshot<S>) {
        if snapshot.occupants != self.occupants {
            self.occupants = snapshot.occupants.clone();
            info!(occupants = self.occupants.len(), "Occupants changed");
            self.events.occupants_changed.emit(&self.occupants);
        }

        if let Some(game) = &snapshot.game
            && self.instance_id.as_deref() != Some(game.id.as_str())
        {
            info!(instance_id = %game.id, "Adopting game instance");
            self.instance_id = Some(game.id.clone());
        }

        for player_id in snapshot.seated() {
            if !self.occupants.iter().any(|o| o.id() == player_id) {
                warn!(player_id = %player_id, "Seated player is not present in the area");
            }
        }
    }

    /// Emits game-updated. Called once a snapshot is fully applied.
    pub fn finish_update(&mut self) {
        self.events.game_updated.emit(&());
    }

    /// Resolves a raw player ID against the occupant list.
    ///
    /// IDs with no matching occupant resolve to `None`. Absent seated players
    /// are reported once per [`merge`](Self::merge), not on every lookup.
    pub fn resolve(&self, player_id: Option<&str>) -> Option<&Occupant> {
        let player_id = player_id?;
        let occupant = self.occupants.iter().find(|o| o.id() == player_id);
        if occupant.is_none() {
            debug!(player_id, "Player is not an occupant of this area");
        }
        occupant
    }

    /// Occupants seated in the game.
    pub fn players(&self, seated: &[PlayerId]) -> Vec<&Occupant> {
        self.occupants
            .iter()
            .filter(|o| seated.contains(o.id()))
            .collect()
    }

    /// Occupants not seated in the game.
    pub fn observers(&self, seated: &[PlayerId]) -> Vec<&Occupant> {
        self.occupants
            .iter()
            .filter(|o| !seated.contains(o.id()))
            .collect()
    }

    /// Sends a command for this area.
    #[instrument(skip(self, command), fields(area_id = %self.id, command = command.as_ref()))]
    pub fn send(&self, command: AreaCommand) -> CommandFuture {
        info!("Issuing command");
        self.sender.send(&self.id, command)
    }

    /// Asks the server for a seat in this area's game.
    pub fn join_game(&self) -> CommandFuture {
        self.send(AreaCommand::JoinGame)
    }

    /// Gives up the local player's seat.
    ///
    /// # Errors
    ///
    /// Returns [`AreaError::NoGameInProgress`] when there is no game instance.
    #[instrument(skip(self), fields(area_id = %self.id))]
    pub fn leave_game(&self) -> Result<CommandFuture, AreaError> {
        let Some(instance_id) = self.instance_id.clone() else {
            debug!("No game instance to leave");
            return Err(AreaError::NoGameInProgress);
        };
        Ok(self.send(AreaCommand::LeaveGame {
            game_instance_id: instance_id,
        }))
    }
}
