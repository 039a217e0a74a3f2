//! Dispatch loop: read → debounce → resolve → play
//!
//! Strictly sequential: one read in flight at a time, and each accepted
//! read is fully dispatched before the next read begins. All recoverable
//! outcomes (duplicate, unrecognized tag, failed playback request) are
//! handled inside the iteration; only a reader failure escapes the loop.

use std::future::Future;

use tagplay_common::debounce::{DebounceFilter, DebounceState};
use tagplay_common::tracks::TrackMap;
use tagplay_common::{Error, Result};
use tokio::signal;
use tracing::{debug, error, info, warn};

use crate::player::{PlayOutcome, PlayerClient};
use crate::reader::TagReader;

/// Run the dispatch loop until the reader fails or `shutdown` resolves.
///
/// The blocking hardware read runs on the blocking thread pool and is raced
/// against the shutdown future; an interrupt that arrives mid-read abandons
/// the in-flight read and returns cleanly (hardware teardown is the
/// caller's `HardwareGuard`, not the read's).
pub async fn run<R>(
    mut reader: R,
    filter: DebounceFilter,
    tracks: TrackMap,
    player: PlayerClient,
    shutdown: impl Future<Output = ()>,
) -> Result<()>
where
    R: TagReader + 'static,
{
    tokio::pin!(shutdown);
    let mut state = DebounceState::default();

    info!("Waiting for tags");
    loop {
        let pending = tokio::task::spawn_blocking(move || {
            let outcome = reader.read_tag();
            (reader, outcome)
        });

        let (returned, outcome) = tokio::select! {
            joined = pending => {
                joined.map_err(|e| Error::Reader(format!("Reader task failed: {}", e)))?
            }
            _ = &mut shutdown => {
                info!("Shutdown requested, stopping dispatch loop");
                return Ok(());
            }
        };
        reader = returned;

        // Reader failure is fatal; escalate for cleanup and termination
        let read = outcome.map_err(|e| Error::Reader(e.to_string()))?;

        let (accepted, next) = filter.accept(state, &read.tag_id, read.read_at);
        state = next;
        if !accepted {
            debug!(tag_id = %read.tag_id, "Ignoring duplicate read");
            continue;
        }

        info!(tag_id = %read.tag_id, "Tag detected");

        match tracks.resolve(&read.tag_id) {
            None => {
                warn!(tag_id = %read.tag_id, "Tag not recognized");
            }
            Some(track_uri) => {
                info!(tag_id = %read.tag_id, track = %track_uri, "Tag matched, requesting playback");
                match player.play(track_uri).await {
                    PlayOutcome::Success => {
                        info!(track = %track_uri, "Playback started");
                    }
                    PlayOutcome::HttpError(status) => {
                        error!(track = %track_uri, status, "Player rejected playback command");
                    }
                    PlayOutcome::TransportError(cause) => {
                        error!(track = %track_uri, cause = %cause, "Failed to reach player");
                    }
                }
            }
        }
    }
}

/// Graceful shutdown signal handler
pub async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
