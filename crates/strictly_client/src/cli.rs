//! Command-line interface for strictly_client.

use clap::{Parser, Subcommand};

/// Strictly Client - follow and play a server-owned Connect Four area
#[derive(Parser, Debug)]
#[command(name = "strictly_client")]
#[command(about = "Client controller for server-owned Connect Four areas", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML client config
    #[arg(short, long, global = true)]
    pub config: Option<std::path::PathBuf>,

    /// Game server URL (overrides config)
    #[arg(long, global = true)]
    pub server_url: Option<String>,

    /// Area to follow (overrides config)
    #[arg(long, global = true)]
    pub area: Option<String>,

    /// Local player ID (overrides config)
    #[arg(long, global = true)]
    pub player: Option<String>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Apply a JSON-lines snapshot log and print what changes
    Replay {
        /// Snapshot log, one JSON snapshot per line
        #[arg(long)]
        snapshots: std::path::PathBuf,
    },

    /// Poll the server and print the board whenever it changes
    Watch {
        /// Poll interval in milliseconds (overrides config)
        #[arg(long)]
        interval_ms: Option<u64>,
    },

    /// Ask for a seat in the area's game
    Join,

    /// Give up the seat in the area's game
    Leave,

    /// Start a game that is waiting to start
    Start,

    /// Drop a piece into a column (0-6)
    Drop {
        /// Column index
        column: usize,
    },
}
