//! Tests for client configuration and snapshot logs.

use std::io::Write;

use strictly_client::{ClientConfig, ConfigOverrides, read_snapshot_log};
use strictly_connect_four::GameStatus;
use tempfile::NamedTempFile;

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write temp file");
    file
}

#[test]
fn test_config_defaults() {
    let file = write_temp("area_id = \"area1\"\nplayer_id = \"alice\"\n");
    let config = ClientConfig::from_file(file.path()).expect("Load failed");
    assert_eq!(config.area_id(), "area1");
    assert_eq!(config.player_id(), "alice");
    assert_eq!(config.server_url(), "http://127.0.0.1:3000");
    assert_eq!(*config.poll_interval_ms(), 500);
}

#[test]
fn test_config_explicit_values() {
    let file = write_temp(concat!(
        "server_url = \"http://games.local:8080\"\n",
        "area_id = \"a\"\n",
        "player_id = \"p\"\n",
        "poll_interval_ms = 250\n",
        "request_timeout_ms = 1500\n",
    ));
    let config = ClientConfig::from_file(file.path()).expect("Load failed");
    assert_eq!(config.server_url(), "http://games.local:8080");
    assert_eq!(config.poll_interval().as_millis(), 250);
    assert_eq!(config.request_timeout().as_millis(), 1500);
}

#[test]
fn test_config_missing_player_fails() {
    let file = write_temp("area_id = \"area1\"\n");
    let err = ClientConfig::from_file(file.path()).unwrap_err();
    assert!(err.message.contains("No player ID configured"));
}

#[test]
fn test_config_malformed_file_fails() {
    let file = write_temp("area_id = [\n");
    let err = ClientConfig::from_file(file.path()).unwrap_err();
    assert!(err.message.contains("Failed to parse config"));
}

#[test]
fn test_config_missing_file_fails() {
    let err = ClientConfig::from_file("/nonexistent/strictly_client.toml").unwrap_err();
    assert!(err.message.contains("Failed to read config file"));
}

#[test]
fn test_config_overrides() {
    let config = ClientConfig::new("area1".to_string(), "alice".to_string())
        .with_server_url("http://other:9000")
        .with_poll_interval_ms(50u64);
    assert_eq!(config.server_url(), "http://other:9000");
    assert_eq!(*config.poll_interval_ms(), 50);
}

#[test]
fn test_resolve_overrides_win_over_file() {
    let file = write_temp(concat!(
        "server_url = \"http://file:1\"\n",
        "area_id = \"file-area\"\n",
        "player_id = \"alice\"\n",
    ));
    let overrides = ConfigOverrides::default()
        .with_server_url("http://flag:2")
        .with_area_id("flag-area");

    let config = ClientConfig::resolve(Some(file.path()), &overrides, Some("log-area"))
        .expect("Resolve failed");
    assert_eq!(config.server_url(), "http://flag:2");
    assert_eq!(config.area_id(), "flag-area");
    assert_eq!(config.player_id(), "alice");
}

#[test]
fn test_resolve_file_without_area_uses_fallback() {
    let file = write_temp("player_id = \"alice\"\nserver_url = \"http://file:1\"\n");
    let config =
        ClientConfig::resolve(Some(file.path()), &ConfigOverrides::default(), Some("area1"))
            .expect("Resolve failed");
    assert_eq!(config.area_id(), "area1");
    assert_eq!(config.player_id(), "alice");
    assert_eq!(config.server_url(), "http://file:1");
}

#[test]
fn test_resolve_file_area_beats_fallback() {
    let file = write_temp("area_id = \"area2\"\nplayer_id = \"alice\"\n");
    let config =
        ClientConfig::resolve(Some(file.path()), &ConfigOverrides::default(), Some("area1"))
            .expect("Resolve failed");
    assert_eq!(config.area_id(), "area2");
}

#[test]
fn test_resolve_without_file_needs_player() {
    let overrides = ConfigOverrides::default().with_area_id("area1");
    let err = ClientConfig::resolve(None, &overrides, None).unwrap_err();
    assert!(err.message.contains("No player ID configured"));

    let err = ClientConfig::resolve(None, &ConfigOverrides::default().with_player_id("bob"), None)
        .unwrap_err();
    assert!(err.message.contains("No area ID configured"));
}

#[test]
fn test_read_snapshot_log() {
    let file = write_temp(concat!(
        r#"{"id":"area1"}"#,
        "\n\n",
        r#"{"id":"area1","game":{"id":"g","players":["a"],"#,
        r#""state":{"status":"WAITING_FOR_PLAYERS"}}}"#,
        "\n",
    ));
    let snapshots = read_snapshot_log(file.path()).expect("Read failed");
    assert_eq!(snapshots.len(), 2);
    assert!(snapshots[0].game.is_none());
    assert_eq!(
        snapshots[1].game.as_ref().map(|g| g.state.status),
        Some(GameStatus::WaitingForPlayers)
    );
}

#[test]
fn test_read_snapshot_log_reports_bad_line() {
    let file = write_temp("{\"id\":\"area1\"}\nnot json\n");
    let err = read_snapshot_log(file.path()).unwrap_err();
    assert!(err.to_string().contains("line 2"));
}
