//! tagplay-rd - RFID tag reader daemon
//!
//! Polls an RFID tag reader and triggers playback of the mapped track on a
//! local media-player daemon via its HTTP control interface. Duplicate reads
//! of the same tag inside the debounce window are suppressed.
//!
//! Exit codes: 0 after an interrupt-driven shutdown, 1 on a fatal startup or
//! reader error.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tagplay_common::config::Config;
use tagplay_common::debounce::DebounceFilter;
use tagplay_common::tracks::TrackMap;
use tagplay_rd::dispatch;
use tagplay_rd::player::PlayerClient;
use tagplay_rd::reader::{HardwareGuard, LineTagReader};

/// Command-line arguments for tagplay-rd
#[derive(Parser, Debug)]
#[command(name = "tagplay-rd")]
#[command(about = "RFID tag reader daemon for tagplay")]
#[command(version)]
struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long, env = "TAGPLAY_CONFIG")]
    config: Option<PathBuf>,

    /// Tag reader device path (overrides config)
    #[arg(short, long)]
    device: Option<PathBuf>,

    /// Player control URL base (overrides config)
    #[arg(short, long)]
    player_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tagplay_rd=debug,tagplay_common=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse command-line arguments
    let args = Args::parse();

    // Log build identification before any config/hardware delays
    info!(
        "Starting tagplay reader daemon (tagplay-rd) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let config_path = Config::resolve_path(args.config.as_deref())
        .context("Failed to resolve config file path")?;
    let mut config = Config::load(&config_path)
        .with_context(|| format!("Failed to load configuration from {:?}", config_path))?;

    // CLI overrides take priority over the config file; the device may come
    // from either source but must come from one
    if let Some(player_url) = args.player_url {
        config.player_url = player_url;
    }
    let device = args.device.or_else(|| config.device.clone()).context(
        "No tag reader device configured (set `device` in the config file or pass --device)",
    )?;

    info!(
        device = %device.display(),
        player_url = %config.player_url,
        "Configuration loaded"
    );

    let tracks = TrackMap::new(config.tracks.clone());
    info!("Track mapping loaded ({} tags)", tracks.len());

    let filter = DebounceFilter::new(config.debounce_window());
    let player = PlayerClient::new(config.player_url.clone(), config.http_timeout())
        .context("Failed to build playback client")?;

    let reader = LineTagReader::open(&device)
        .with_context(|| format!("Failed to open tag reader device {:?}", device))?;

    // Hardware is released exactly once on every exit path, including an
    // interrupt that arrives while a read is blocked.
    let mut guard = HardwareGuard::new(move || {
        info!(device = %device.display(), "Tag reader released");
    });

    let result = dispatch::run(reader, filter, tracks, player, dispatch::shutdown_signal()).await;
    guard.release();

    match result {
        Ok(()) => {
            info!("tagplay reader daemon stopped");
            Ok(())
        }
        Err(e) => {
            error!("Fatal: {}", e);
            Err(e.into())
        }
    }
}
