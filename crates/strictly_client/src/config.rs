//! Client configuration.

use crate::snapshot::{AreaId, PlayerId};
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Where the client connects and who it plays as.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters)]
#[setters(prefix = "with_", into)]
pub struct ClientConfig {
    /// Base URL of the game server.
    server_url: String,

    /// Area to follow.
    area_id: AreaId,

    /// Local player identity.
    player_id: PlayerId,

    /// Delay between snapshot polls, in milliseconds.
    poll_interval_ms: u64,

    /// Upper bound on a single snapshot request, in milliseconds.
    request_timeout_ms: u64,
}

/// Settings as written in a TOML config file. Every field may be left out.
#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigFile {
    server_url: Option<String>,
    area_id: Option<AreaId>,
    player_id: Option<PlayerId>,
    poll_interval_ms: Option<u64>,
    request_timeout_ms: Option<u64>,
}

/// Values that take precedence over the config file, usually from the
/// command line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Setters)]
#[setters(prefix = "with_", strip_option, into)]
pub struct ConfigOverrides {
    /// Base URL of the game server.
    pub server_url: Option<String>,
    /// Area to follow.
    pub area_id: Option<AreaId>,
    /// Local player identity.
    pub player_id: Option<PlayerId>,
}

#[instrument]
fn default_server_url() -> String {
    "http://127.0.0.1:3000".to_string()
}

#[instrument]
fn default_poll_interval_ms() -> u64 {
    500
}

#[instrument]
fn default_request_timeout_ms() -> u64 {
    10_000
}

impl ClientConfig {
    /// Creates a configuration with default server settings.
    #[instrument(skip(area_id, player_id), fields(area_id = %area_id, player_id = %player_id))]
    pub fn new(area_id: AreaId, player_id: PlayerId) -> Self {
        Self {
            server_url: default_server_url(),
            area_id,
            player_id,
            poll_interval_ms: default_poll_interval_ms(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }

    /// Loads configuration from TOML file.
    ///
    /// The file must name both the area and the player.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::resolve(Some(path.as_ref()), &ConfigOverrides::default(), None)
    }

    /// Builds a configuration from an optional file, overrides, and a
    /// fallback area.
    ///
    /// Overrides win over file values. `fallback_area` is used only when
    /// neither names an area.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or parsed, or when no
    /// area or player ID is given anywhere.
    #[instrument(skip(path, overrides), fields(path = ?path))]
    pub fn resolve(
        path: Option<&Path>,
        overrides: &ConfigOverrides,
        fallback_area: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => read_config_file(path)?,
            None => ConfigFile::default(),
        };

        let area_id = overrides
            .area_id
            .clone()
            .or(file.area_id)
            .or_else(|| fallback_area.map(str::to_string))
            .ok_or_else(|| ConfigError::new("No area ID configured".to_string()))?;
        let player_id = overrides
            .player_id
            .clone()
            .or(file.player_id)
            .ok_or_else(|| ConfigError::new("No player ID configured".to_string()))?;

        let config = Self {
            server_url: overrides
                .server_url
                .clone()
                .or(file.server_url)
                .unwrap_or_else(default_server_url),
            area_id,
            player_id,
            poll_interval_ms: file
                .poll_interval_ms
                .unwrap_or_else(default_poll_interval_ms),
            request_timeout_ms: file
                .request_timeout_ms
                .unwrap_or_else(default_request_timeout_ms),
        };
        info!(
            area_id = %config.area_id,
            player_id = %config.player_id,
            "Config resolved"
        );
        Ok(config)
    }

    /// Poll interval as a duration.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Request timeout as a duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

#[instrument(skip(path), fields(path = %path.display()))]
fn read_config_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    debug!("Loading config from file");
    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

    toml::from_str(&content)
        .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
