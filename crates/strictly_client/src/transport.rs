//! Outbound commands and the seam that carries them to the server.

use crate::snapshot::{AreaSnapshot, GameInstanceId};
use crate::TransportError;
use futures::future::BoxFuture;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use strictly_connect_four::Move;
use tracing::{debug, info, instrument, warn};

/// A command sent to the server on behalf of the local player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, strum::AsRefStr)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum AreaCommand {
    /// Take a seat in the area's game, creating one if needed.
    JoinGame,
    /// Give up the seat in the given game.
    LeaveGame {
        /// Game to leave.
        game_instance_id: GameInstanceId,
    },
    /// Start a game whose seats are filled.
    StartGame {
        /// Game to start.
        game_instance_id: GameInstanceId,
    },
    /// Drop a piece.
    GameMove {
        /// Game to play in.
        game_instance_id: GameInstanceId,
        /// Where the piece lands.
        #[serde(rename = "move")]
        game_move: Move,
    },
}

/// Eventual outcome of sending a command.
///
/// Resolving the future only says whether the server accepted the command.
/// Any resulting state change arrives later as a snapshot.
pub type CommandFuture = BoxFuture<'static, Result<(), TransportError>>;

/// Sends commands to the server.
pub trait CommandSender: std::fmt::Debug {
    /// Starts sending `command` for the given area.
    fn send(&self, area_id: &str, command: AreaCommand) -> CommandFuture;
}

/// REST transport talking JSON to the game server.
#[derive(Debug, Clone)]
pub struct RestTransport {
    base_url: String,
    client: reqwest::Client,
}

impl RestTransport {
    /// Creates a transport for the server at `base_url`.
    #[instrument(skip(base_url))]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        debug!(base_url = %base_url, "Creating REST transport");
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    /// Returns the server base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches the current snapshot of an area.
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn fetch_snapshot<S: DeserializeOwned>(
        &self,
        area_id: &str,
    ) -> Result<AreaSnapshot<S>, TransportError> {
        debug!("Fetching area snapshot");
        let url = format!("{}/api/areas/{}", self.base_url, area_id);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "Snapshot request failed");
            return Err(TransportError::new(format!(
                "Snapshot request failed: HTTP {}",
                status
            )));
        }

        Ok(response.json().await?)
    }
}

impl CommandSender for RestTransport {
    fn send(&self, area_id: &str, command: AreaCommand) -> CommandFuture {
        let url = format!("{}/api/areas/{}/commands", self.base_url, area_id);
        Box::pin(post_command(self.client.clone(), url, command))
    }
}

#[instrument(skip(client, command), fields(command = command.as_ref()))]
async fn post_command(
    client: reqwest::Client,
    url: String,
    command: AreaCommand,
) -> Result<(), TransportError> {
    info!("Sending command");
    let response = client
        .post(&url)
        .header("Content-Type", "application/json")
        .json(&command)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        warn!(status = %status, body = %body, "Command rejected");
        return Err(TransportError::new(format!(
            "Command rejected: {} - {}",
            status, body
        )));
    }

    debug!(status = %status, "Command accepted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use strictly_connect_four::GamePiece;

    #[test]
    fn test_move_command_json() {
        let command = AreaCommand::GameMove {
            game_instance_id: "game1".to_string(),
            game_move: Move::new(5, 2, GamePiece::Yellow),
        };
        assert_eq!(
            serde_json::to_value(&command).unwrap(),
            serde_json::json!({
                "type": "GameMove",
                "gameInstanceId": "game1",
                "move": { "row": 5, "col": 2, "gamePiece": "Yellow" }
            })
        );
    }

    #[test]
    fn test_join_command_json() {
        assert_eq!(
            serde_json::to_value(AreaCommand::JoinGame).unwrap(),
            serde_json::json!({ "type": "JoinGame" })
        );
        assert_eq!(AreaCommand::JoinGame.as_ref(), "JoinGame");
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        assert_eq!(
            RestTransport::new("http://localhost:3000/").base_url(),
            "http://localhost:3000"
        );
    }
}
