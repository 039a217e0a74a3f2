//! Playback client for the media player's HTTP control interface
//!
//! Issues one GET per accepted, resolved tag read against the player's
//! command endpoint (`<base_url>playitem&arg=<track_uri>`) and classifies
//! the result. No retries, no response body parsing; only the status code
//! is inspected.

use std::time::Duration;
use tagplay_common::{Error, Result};
use tracing::debug;

/// Result of a single playback request, inspected by the dispatch loop for
/// logging only
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayOutcome {
    /// Player answered 200
    Success,
    /// Player answered a non-200 status
    HttpError(u16),
    /// The request never completed (timeout, connection refused, DNS
    /// failure, ...)
    TransportError(String),
}

/// Client for the player's command endpoint
pub struct PlayerClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl PlayerClient {
    /// Build the client with an explicit per-request timeout.
    ///
    /// `base_url` must end with the command query key (e.g.
    /// `http://moode.local/command/?cmd=`); the playback command and track
    /// argument are appended verbatim.
    pub fn new(base_url: String, timeout: Duration) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    /// Request playback of a track. One attempt; the outcome is returned
    /// rather than an error, since a failed play does not stop the daemon.
    ///
    /// The track URI is passed through without extra percent-encoding: the
    /// player matches the raw library path after `arg=`.
    pub async fn play(&self, track_uri: &str) -> PlayOutcome {
        let url = format!("{}playitem&arg={}", self.base_url, track_uri);
        debug!(track = %track_uri, "Sending playback command");

        match self.http_client.get(&url).send().await {
            Ok(response) => {
                let status = response.status();
                if status == reqwest::StatusCode::OK {
                    PlayOutcome::Success
                } else {
                    PlayOutcome::HttpError(status.as_u16())
                }
            }
            Err(e) => PlayOutcome::TransportError(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = PlayerClient::new(
            "http://moode.local/command/?cmd=".to_string(),
            Duration::from_secs(5),
        );
        assert!(client.is_ok());
    }
}
