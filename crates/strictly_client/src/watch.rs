//! Polling loop that keeps a controller in step with the server.

use std::future::Future;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{info, instrument, warn};

use crate::controller::GameArea;
use crate::error::TransportError;
use crate::snapshot::AreaSnapshot;

/// Fetches a snapshot every `period` and applies it until `shutdown` resolves.
///
/// Each fetch is bounded by `request_timeout`. `shutdown` is watched while
/// waiting for the next tick and while a fetch is in flight, so a hung
/// server never delays stopping.
#[instrument(skip_all, fields(period_ms = period.as_millis() as u64))]
pub async fn watch_area<C, F, Fut, Sd>(
    controller: &mut C,
    mut fetch: F,
    period: Duration,
    request_timeout: Duration,
    shutdown: Sd,
) where
    C: GameArea,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<AreaSnapshot<C::State>, TransportError>>,
    Sd: Future,
{
    let mut interval = tokio::time::interval(period);
    tokio::pin!(shutdown);
    info!("Watching area");

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            _ = interval.tick() => {}
        }

        tokio::select! {
            _ = &mut shutdown => break,
            result = timeout(request_timeout, fetch()) => match result {
                Ok(Ok(snapshot)) => {
                    if let Err(e) = controller.apply_snapshot(snapshot) {
                        warn!(error = %e, "Snapshot applied with errors");
                    }
                }
                Ok(Err(e)) => warn!(error = %e, "Failed to fetch snapshot"),
                Err(_) => warn!(
                    timeout_ms = request_timeout.as_millis() as u64,
                    "Snapshot request timed out"
                ),
            },
        }
    }

    info!("Stopping watch");
}
