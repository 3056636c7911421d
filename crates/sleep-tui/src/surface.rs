//! SurfaceCore: single-owner event loop for the playback surface.
//!
//! Owns the `MpvDriver` and the live `MpvHandle`; no other task touches
//! them. The App sends `SurfaceInput::Command`s in and receives
//! `SurfaceEvent`s back on a separate channel.
//!
//! mpv is spawned lazily on the first load and reused afterwards. Load
//! progress is reported from mpv's own events:
//! `start-file` → LoadStarted, `file-loaded` → LoadEnded,
//! `end-file` with reason `error` → LoadError.
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use sleep_core::config::PlayerConfig;

use crate::mpv::{MpvDriver, MpvEvent, MpvHandle, OBS_MEDIA_TITLE, OBS_PAUSE};

// ── Messages ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCommand {
    /// Replace whatever is playing with `url`.
    Load { url: String },
    /// Load the last URL again (retry after an error).
    Reload,
    Stop,
    TogglePause,
    Volume(f32),
}

/// Reports from the surface back to the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    LoadStarted,
    LoadEnded,
    LoadError(String),
    Paused(bool),
    Title(Option<String>),
}

/// All inputs into the SurfaceCore loop.
#[derive(Debug)]
pub enum SurfaceInput {
    Command(SurfaceCommand),
    /// Raw mpv unsolicited event (forwarded from reader task).
    Mpv(MpvEvent),
    /// Heartbeat: check process liveness.
    HeartbeatTick,
    Shutdown,
}

/// Map one mpv event onto what the UI cares about.
pub fn classify(evt: &MpvEvent) -> Option<SurfaceEvent> {
    if let Some((obs_id, data)) = evt.as_property_change() {
        return match obs_id {
            OBS_PAUSE => data.as_bool().map(SurfaceEvent::Paused),
            OBS_MEDIA_TITLE => Some(SurfaceEvent::Title(data.as_str().map(str::to_string))),
            _ => None,
        };
    }
    if let Some(desc) = evt.end_file_error() {
        return Some(SurfaceEvent::LoadError(desc));
    }
    match evt.event_name()? {
        "start-file" => Some(SurfaceEvent::LoadStarted),
        "file-loaded" => Some(SurfaceEvent::LoadEnded),
        _ => None,
    }
}

// ── SurfaceCore ───────────────────────────────────────────────────────────────

pub struct SurfaceCore {
    driver: MpvDriver,
    /// Live handle to the mpv IO tasks. `None` until the first load.
    handle: Option<MpvHandle>,
    /// Forwards mpv events back into our own input channel.
    input_tx: mpsc::Sender<SurfaceInput>,
    events_tx: mpsc::Sender<SurfaceEvent>,
    current_url: Option<String>,
    paused: bool,
}

impl SurfaceCore {
    pub fn new(
        player: &PlayerConfig,
        input_tx: mpsc::Sender<SurfaceInput>,
        events_tx: mpsc::Sender<SurfaceEvent>,
    ) -> Self {
        Self {
            driver: MpvDriver::new(player),
            handle: None,
            input_tx,
            events_tx,
            current_url: None,
            paused: false,
        }
    }

    /// Run until `Shutdown` or until every input sender is dropped.
    pub async fn run(mut self, mut input_rx: mpsc::Receiver<SurfaceInput>) -> anyhow::Result<()> {
        info!("SurfaceCore: starting event loop");

        let heartbeat_tx = self.input_tx.clone();
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(tokio::time::Duration::from_secs(10)).await;
                if heartbeat_tx.send(SurfaceInput::HeartbeatTick).await.is_err() {
                    break;
                }
            }
        });

        while let Some(input) = input_rx.recv().await {
            match input {
                SurfaceInput::Shutdown => {
                    info!("SurfaceCore: shutdown requested");
                    break;
                }
                SurfaceInput::Command(cmd) => {
                    info!("SurfaceCore: command {:?}", cmd);
                    if let Err(e) = self.handle_command(cmd).await {
                        error!("SurfaceCore: command error: {}", e);
                    }
                }
                SurfaceInput::Mpv(evt) => {
                    debug!("mpv event: {:?}", evt.raw);
                    if let Some(out) = classify(&evt) {
                        if let SurfaceEvent::Paused(p) = out {
                            self.paused = p;
                        }
                        self.emit(out).await;
                    }
                }
                SurfaceInput::HeartbeatTick => {
                    if self.handle.is_some() && !self.driver.process_alive() {
                        warn!("SurfaceCore: heartbeat: mpv process died");
                        self.handle = None;
                        if self.current_url.is_some() {
                            self.emit(SurfaceEvent::LoadError("mpv exited".to_string()))
                                .await;
                        }
                    }
                }
            }
        }

        self.cleanup().await;
        Ok(())
    }

    async fn handle_command(&mut self, cmd: SurfaceCommand) -> anyhow::Result<()> {
        match cmd {
            SurfaceCommand::Load { url } => {
                self.current_url = Some(url.clone());
                self.load(&url).await;
            }
            SurfaceCommand::Reload => match self.current_url.clone() {
                Some(url) => self.load(&url).await,
                None => debug!("SurfaceCore: reload with nothing loaded"),
            },
            SurfaceCommand::Stop => {
                self.current_url = None;
                if let Some(handle) = self.handle.as_ref() {
                    handle.stop().await?;
                }
            }
            SurfaceCommand::TogglePause => {
                if self.current_url.is_none() {
                    return Ok(());
                }
                if let Some(handle) = self.handle.as_ref() {
                    // Local pause state avoids an IPC round-trip while buffering
                    handle.set_pause(!self.paused).await?;
                }
            }
            SurfaceCommand::Volume(value) => {
                let value = value.clamp(0.0, 1.0);
                self.driver.last_volume = value;
                if let Some(handle) = self.handle.as_ref() {
                    handle.set_volume(value).await?;
                }
            }
        }
        Ok(())
    }

    /// Load errors never propagate; they become `LoadError` for the overlay.
    async fn load(&mut self, url: &str) {
        let handle = match self.ensure_handle().await {
            Ok(h) => h,
            Err(e) => {
                warn!("SurfaceCore: failed to start mpv: {}", e);
                self.emit(SurfaceEvent::LoadError(e.to_string())).await;
                return;
            }
        };
        if let Err(e) = handle.load(url).await {
            warn!("SurfaceCore: load {} failed: {}", url, e);
            self.emit(SurfaceEvent::LoadError(e.to_string())).await;
        }
    }

    async fn ensure_handle(&mut self) -> anyhow::Result<MpvHandle> {
        if self.handle.is_some() && !self.driver.process_alive() {
            warn!("SurfaceCore: mpv process died, dropping handle");
            self.handle = None;
        }
        if let Some(handle) = self.handle.as_ref() {
            return Ok(handle.clone());
        }

        // One forwarder task per connection
        let (event_tx, mut event_rx) = mpsc::channel::<MpvEvent>(64);
        let core_tx = self.input_tx.clone();
        tokio::spawn(async move {
            while let Some(evt) = event_rx.recv().await {
                if core_tx.send(SurfaceInput::Mpv(evt)).await.is_err() {
                    break;
                }
            }
        });

        let handle = self.driver.spawn_and_connect(event_tx).await?;
        handle.observe_properties().await;
        self.paused = false;
        self.handle = Some(handle.clone());
        Ok(handle)
    }

    async fn emit(&self, event: SurfaceEvent) {
        if self.events_tx.send(event).await.is_err() {
            debug!("SurfaceCore: UI gone, dropping event");
        }
    }

    async fn cleanup(&mut self) {
        info!("SurfaceCore: cleanup, killing mpv");
        if let Some(handle) = self.handle.take() {
            let _ = handle.stop().await;
        }
        self.driver.kill().await;
    }
}
