//! Strictly Client - command-line driver
//!
//! Follows one game area through its snapshots and issues commands for the
//! local player.

#![warn(missing_docs)]

mod cli;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use strictly_client::{
    ClientConfig, ConfigOverrides, ConnectFourAreaController, ConnectFourSnapshot,
    ConnectFourState, GameArea, RestTransport, read_snapshot_log, watch_area,
};
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Replay { ref snapshots } => run_replay(&cli, snapshots),
        Command::Watch { interval_ms } => {
            let mut config = resolve_config(&cli, None)?;
            if let Some(ms) = interval_ms {
                config = config.with_poll_interval_ms(ms);
            }
            run_watch(config).await
        }
        Command::Join => {
            let controller = connect(&resolve_config(&cli, None)?).await?;
            controller.join_game().await?;
            println!("Join requested");
            Ok(())
        }
        Command::Leave => {
            let controller = connect(&resolve_config(&cli, None)?).await?;
            controller.leave_game()?.await?;
            println!("Leave requested");
            Ok(())
        }
        Command::Start => {
            let controller = connect(&resolve_config(&cli, None)?).await?;
            controller.start_game()?.await?;
            println!("Start requested");
            Ok(())
        }
        Command::Drop { column } => {
            let controller = connect(&resolve_config(&cli, None)?).await?;
            controller.make_move(column)?.await?;
            println!("Dropped into column {}", column);
            Ok(())
        }
    }
}

/// Builds the client config from the optional file and command-line overrides.
///
/// `fallback_area` is used only when neither the file nor `--area` names one.
#[instrument(skip(cli))]
fn resolve_config(cli: &Cli, fallback_area: Option<&str>) -> Result<ClientConfig> {
    let overrides = ConfigOverrides {
        server_url: cli.server_url.clone(),
        area_id: cli.area.clone(),
        player_id: cli.player.clone(),
    };
    let config = ClientConfig::resolve(cli.config.as_deref(), &overrides, fallback_area)
        .context("Failed to resolve client config")?;
    Ok(config)
}

/// Fetches the area's current snapshot and builds a controller around it.
#[instrument(skip(config), fields(area_id = %config.area_id()))]
async fn connect(config: &ClientConfig) -> Result<ConnectFourAreaController> {
    let transport = RestTransport::new(config.server_url().clone());
    let snapshot: ConnectFourSnapshot = tokio::time::timeout(
        config.request_timeout(),
        transport.fetch_snapshot(config.area_id()),
    )
    .await
    .context("Timed out fetching area snapshot")?
    .context("Failed to fetch area snapshot")?;
    Ok(ConnectFourAreaController::new(
        snapshot,
        config.player_id().clone(),
        Arc::new(transport),
    ))
}

/// Prints board and turn changes as they are emitted.
fn attach_printers(controller: &mut ConnectFourAreaController) {
    let events = controller.events_mut();
    events
        .board_changed
        .subscribe(|board| println!("{}\n", board.display()));
    events.turn_changed.subscribe(|our_turn| {
        if *our_turn {
            println!("Your turn");
        } else {
            println!("Waiting for opponent");
        }
    });
    controller
        .area_events_mut()
        .occupants_changed
        .subscribe(|occupants| info!(count = occupants.len(), "Occupants changed"));
}

/// Prints the current state once.
fn print_summary(controller: &ConnectFourAreaController) {
    println!("{}\n", controller.board().display());
    println!(
        "Status: {} | moves: {} | active: {}",
        controller.status(),
        controller.move_count(),
        controller.is_active()
    );
    if let Some(winner) = controller.winner() {
        println!("Winner: {}", winner.user_name());
    }
}

/// Applies a snapshot log in order.
#[instrument(skip(cli))]
fn run_replay(cli: &Cli, path: &std::path::Path) -> Result<()> {
    let mut snapshots = read_snapshot_log(path)?.into_iter();
    let Some(first) = snapshots.next() else {
        warn!("Snapshot log is empty");
        return Ok(());
    };

    let config = resolve_config(cli, Some(first.id.as_str()))?;
    if config.area_id() != &first.id {
        warn!(
            configured = %config.area_id(),
            logged = %first.id,
            "Snapshot log is for a different area"
        );
    }
    let transport = Arc::new(RestTransport::new(config.server_url().clone()));
    let mut controller =
        ConnectFourAreaController::new(first, config.player_id().clone(), transport);
    print_summary(&controller);
    attach_printers(&mut controller);

    for snapshot in snapshots {
        if let Err(e) = controller.apply_snapshot(snapshot) {
            warn!(error = %e, "Snapshot applied with errors");
        }
    }

    print_summary(&controller);
    Ok(())
}

/// Polls the server until interrupted.
#[instrument(skip(config), fields(area_id = %config.area_id()))]
async fn run_watch(config: ClientConfig) -> Result<()> {
    let transport = RestTransport::new(config.server_url().clone());
    let mut controller = connect(&config).await?;
    print_summary(&controller);
    attach_printers(&mut controller);

    let transport = &transport;
    let area_id = config.area_id().as_str();
    watch_area(
        &mut controller,
        move || transport.fetch_snapshot::<ConnectFourState>(area_id),
        config.poll_interval(),
        config.request_timeout(),
        tokio::signal::ctrl_c(),
    )
    .await;
    Ok(())
}
