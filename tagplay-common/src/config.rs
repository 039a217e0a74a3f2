//! Configuration loading and config file path resolution
//!
//! All configuration is static: loaded once at process start from a single
//! TOML file, immutable afterwards. The file location is resolved in
//! priority order:
//!
//! 1. Command-line argument (highest priority)
//! 2. `TAGPLAY_CONFIG` environment variable (handled by clap in the binary)
//! 3. Platform config directory default (`<config_dir>/tagplay/tagplay.toml`)

use crate::{Error, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

/// Configuration loaded from the TOML file
///
/// These settings cannot change during runtime. The daemon must restart to
/// pick up changes.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Player control URL base, up to and including the command query key.
    /// The playback command and track argument are appended verbatim.
    #[serde(default = "default_player_url")]
    pub player_url: String,

    /// Tag reader device path (e.g. a serial character device). May be
    /// omitted here and supplied on the command line instead; the daemon
    /// refuses to start without one from either source.
    #[serde(default)]
    pub device: Option<PathBuf>,

    /// Debounce window: repeated reads of the same tag within this many
    /// milliseconds are suppressed
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Timeout applied to each playback HTTP request
    #[serde(default = "default_http_timeout_ms")]
    pub http_timeout_ms: u64,

    /// Tag identifier → track URI mapping
    #[serde(default)]
    pub tracks: HashMap<String, String>,
}

fn default_player_url() -> String {
    // Moode's command endpoint; the trailing "?cmd=" is part of the base
    "http://moode.local/command/?cmd=".to_string()
}

fn default_debounce_ms() -> u64 {
    2000
}

fn default_http_timeout_ms() -> u64 {
    5000
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the file cannot be read or parsed. A
    /// missing config file is fatal: without a device path the daemon has
    /// nothing to poll.
    pub fn load(path: &Path) -> Result<Self> {
        let toml_str = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config: Config = toml::from_str(&toml_str)
            .map_err(|e| Error::Config(format!("Failed to parse TOML: {}", e)))?;

        info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Resolve the config file path from an optional CLI/env override
    ///
    /// Falls back to `<config_dir>/tagplay/tagplay.toml` when no override is
    /// given.
    pub fn resolve_path(cli_arg: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = cli_arg {
            return Ok(path.to_path_buf());
        }

        default_config_path()
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get debounce window as Duration
    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Get HTTP request timeout as Duration
    pub fn http_timeout(&self) -> Duration {
        Duration::from_millis(self.http_timeout_ms)
    }
}

/// Default configuration file path for the platform
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("tagplay").join("tagplay.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_debounce_ms() {
        assert_eq!(default_debounce_ms(), 2000);
    }

    #[test]
    fn test_default_http_timeout_ms() {
        assert_eq!(default_http_timeout_ms(), 5000);
    }

    #[test]
    fn test_default_player_url_is_command_base() {
        assert!(default_player_url().ends_with("?cmd="));
    }

    #[test]
    fn test_resolve_path_prefers_cli_arg() {
        let path = Config::resolve_path(Some(Path::new("/tmp/custom.toml"))).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/custom.toml"));
    }
}
