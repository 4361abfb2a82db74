//! Strictly Client - game area controllers mirroring a server-owned game.
//!
//! The server owns every game. A controller holds the last snapshot it
//! received, derives the board and turn from it, and tells listeners what
//! changed. Actions are checked against that state before a command goes out.
//!
//! # Architecture
//!
//! - **Snapshot**: wire types delivered by the server
//! - **Controller**: the shared area contract and the Connect Four controller
//! - **Events**: typed, synchronous notification channels
//! - **Transport**: outbound commands and the REST client
//! - **Watch**: the polling loop that feeds snapshots to a controller
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use strictly_client::{ConnectFourAreaController, ConnectFourSnapshot, RestTransport};
//!
//! let transport = Arc::new(RestTransport::new("http://127.0.0.1:3000"));
//! let mut controller = ConnectFourAreaController::new(
//!     ConnectFourSnapshot::empty("area1"),
//!     "player1".to_string(),
//!     transport,
//! );
//! controller
//!     .events_mut()
//!     .board_changed
//!     .subscribe(|board| println!("{}", board.display()));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod controller;
mod error;
mod events;
mod replay;
mod snapshot;
mod transport;
mod watch;

// Crate-level exports - Configuration
pub use config::{ClientConfig, ConfigError, ConfigOverrides};

// Crate-level exports - Controllers
pub use controller::{
    AreaController, AreaEvents, ConnectFourAreaController, ConnectFourEvents, GameArea,
};

// Crate-level exports - Errors
pub use error::{AreaError, TransportError};

// Crate-level exports - Notifications
pub use events::{Channel, ListenerId};

// Crate-level exports - Snapshot logs
pub use replay::read_snapshot_log;

// Crate-level exports - Wire types
pub use snapshot::{
    AreaId, AreaSnapshot, ConnectFourSnapshot, ConnectFourState, GameInstanceId, GameRecord,
    Occupant, PlayerId,
};

// Crate-level exports - Transport
pub use transport::{AreaCommand, CommandFuture, CommandSender, RestTransport};

// Crate-level exports - Polling
pub use watch::watch_area;
