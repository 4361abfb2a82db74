//! Reading snapshot logs from disk.
//!
//! A snapshot log holds one JSON snapshot per line, oldest first. Blank lines
//! are skipped.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info, instrument};

use crate::snapshot::ConnectFourSnapshot;

/// Reads every snapshot in a log file.
#[instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn read_snapshot_log(path: impl AsRef<Path>) -> Result<Vec<ConnectFourSnapshot>> {
    let content = std::fs::read_to_string(path.as_ref())
        .with_context(|| format!("Failed to read {}", path.as_ref().display()))?;

    let snapshots = content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            debug!(line = idx + 1, "Parsing snapshot");
            serde_json::from_str(line)
                .with_context(|| format!("Invalid snapshot on line {}", idx + 1))
        })
        .collect::<Result<Vec<_>>>()?;

    info!(count = snapshots.len(), "Read snapshot log");
    Ok(snapshots)
}
