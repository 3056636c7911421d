mod action;
mod app;
mod app_state;
mod component;
mod components;
mod focus;
mod mpv;
mod surface;
mod theme;
mod widgets;

#[cfg(test)]
mod test_support;

use std::time::Duration;

use tokio::sync::mpsc;

use sleep_core::config::Config;
use sleep_core::session::Session;
use sleep_core::store::PlaylistStore;

use crate::surface::{SurfaceCore, SurfaceEvent, SurfaceInput};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let data_dir = sleep_core::platform::data_dir();
    std::fs::create_dir_all(&data_dir)?;

    let log_path = data_dir.join("sound-sleep.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // Allow RUST_LOG override; default to debug.
    let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "debug".to_string());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    // Print log path to stderr so the operator can tail it immediately.
    eprintln!("sound-sleep log: {}", log_path.display());

    tracing::info!("sound-sleep starting…");

    // ── Load config ──────────────────────────────────────────────────────────
    let config = Config::load().unwrap_or_default();

    // ── Session (restores custom playlists) ──────────────────────────────────
    let store = PlaylistStore::at(config.storage.store_file.clone());
    let session = Session::open(store).await;

    // ── Playback surface ─────────────────────────────────────────────────────
    let (surface_tx, surface_rx) = mpsc::channel::<SurfaceInput>(256);
    let (events_tx, events_rx) = mpsc::channel::<SurfaceEvent>(256);
    let surface = SurfaceCore::new(&config.player, surface_tx.clone(), events_tx);
    let surface_task = tokio::spawn(async move {
        if let Err(e) = surface.run(surface_rx).await {
            tracing::error!("SurfaceCore exited with error: {}", e);
        }
    });

    // ── Run TUI ──────────────────────────────────────────────────────────────
    let app = app::App::new(session, config, surface_tx);
    let result = app.run(events_rx).await;

    // Give mpv a moment to be torn down before the runtime drops it.
    if tokio::time::timeout(Duration::from_secs(3), surface_task)
        .await
        .is_err()
    {
        tracing::warn!("surface did not stop in time");
    }

    tracing::info!("sound-sleep exited");
    result
}
