//! mpv IPC driver with separated reader/writer tasks.
//!
//! Architecture:
//!
//! ```text
//!   MpvDriver::spawn_and_connect()
//!         │
//!         ├── writer_task   ← receives MpvRequest via mpsc, serialises → socket
//!         └── reader_task   ← reads JSON lines from socket
//!                                ├── response (has request_id) → matched oneshot::Sender
//!                                └── event / property-change   → event_tx channel
//! ```
//!
//! mpv hands YouTube URLs to yt-dlp itself, so the surface only ever deals
//! in plain `loadfile` commands.
//!
//! Platform notes:
//! - Unix:   Unix domain sockets
//! - Windows: Named pipes  \\.\pipe\<name>
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::{mpsc, oneshot, Mutex};
use tracing::{debug, info, warn};

use sleep_core::config::PlayerConfig;
use sleep_core::platform;

#[cfg(unix)]
use tokio::net::UnixStream;

#[cfg(windows)]
use tokio::net::windows::named_pipe::ClientOptions;

const MPV_STDERR_LOG: &str = "mpv-stderr.log";

// ── global request-id counter ─────────────────────────────────────────────────

static NEXT_REQ_ID: AtomicU64 = AtomicU64::new(1);

// ── observation property IDs ──────────────────────────────────────────────────

pub const OBS_PAUSE: u64 = 1;
pub const OBS_MEDIA_TITLE: u64 = 2;

type PendingMap = Arc<Mutex<HashMap<u64, oneshot::Sender<anyhow::Result<Value>>>>>;

// ── internal channel types ────────────────────────────────────────────────────

struct PendingRequest {
    req_id: u64,
    payload: String, // serialised JSON line (already has '\n')
    reply: oneshot::Sender<anyhow::Result<Value>>,
}

/// An mpv event / property-change that arrived unsolicited (no request_id).
#[derive(Debug, Clone)]
pub struct MpvEvent {
    pub raw: Value,
}

impl MpvEvent {
    /// Returns `Some((obs_id, data))` if this is a property-change event.
    pub fn as_property_change(&self) -> Option<(u64, &Value)> {
        if self.raw.get("event")?.as_str()? == "property-change" {
            let id = self.raw.get("id")?.as_u64()?;
            let data = self.raw.get("data").unwrap_or(&Value::Null);
            Some((id, data))
        } else {
            None
        }
    }

    /// Returns the event name, e.g. "end-file", "start-file", "file-loaded".
    pub fn event_name(&self) -> Option<&str> {
        self.raw.get("event")?.as_str()
    }

    /// For an `end-file` that ended in failure, the best description mpv
    /// gave. `None` for every other event, including normal ends.
    pub fn end_file_error(&self) -> Option<String> {
        if self.event_name()? != "end-file" {
            return None;
        }
        if self.raw.get("reason").and_then(Value::as_str) != Some("error") {
            return None;
        }
        let desc = self
            .raw
            .get("file_error")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .unwrap_or("playback error");
        Some(desc.to_string())
    }
}

// ── public handle ─────────────────────────────────────────────────────────────

/// Cloneable handle to the mpv writer task.  Use `send()` to fire a command
/// and await the response.
#[derive(Clone)]
pub struct MpvHandle {
    tx: mpsc::Sender<PendingRequest>,
}

impl MpvHandle {
    pub async fn send(&self, command: Value) -> anyhow::Result<Value> {
        let req_id = NEXT_REQ_ID.fetch_add(1, Ordering::Relaxed);
        let msg = json!({ "command": command, "request_id": req_id });
        let mut raw = serde_json::to_string(&msg)?;
        raw.push('\n');

        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(PendingRequest {
                req_id,
                payload: raw,
                reply: reply_tx,
            })
            .await
            .map_err(|_| anyhow::anyhow!("mpv writer task gone"))?;

        tokio::time::timeout(tokio::time::Duration::from_secs(5), reply_rx)
            .await
            .map_err(|_| anyhow::anyhow!("mpv IPC timeout for req={}", req_id))?
            .map_err(|_| anyhow::anyhow!("mpv reply channel dropped req={}", req_id))?
    }
}

// ── driver ────────────────────────────────────────────────────────────────────

/// Owns the mpv child process.
///
/// `spawn_and_connect()` returns a fresh `MpvHandle`; mpv events are pushed
/// into the channel passed in.
pub struct MpvDriver {
    pub socket_name: String,
    process: Option<tokio::process::Child>,
    mpv_path: Option<PathBuf>,
    pub last_volume: f32,
    loop_playback: bool,
    video: bool,
}

impl MpvDriver {
    pub fn new(player: &PlayerConfig) -> Self {
        Self {
            socket_name: platform::mpv_socket_name(),
            process: None,
            mpv_path: player.mpv_path.clone(),
            last_volume: player.volume,
            loop_playback: player.loop_playback,
            video: player.video,
        }
    }

    pub fn process_alive(&mut self) -> bool {
        if let Some(ref mut child) = self.process {
            match child.try_wait() {
                Ok(None) => true,
                Ok(Some(status)) => {
                    if let Some(code) = status.code() {
                        warn!("mpv process exited with code: {}", code);
                    } else {
                        warn!("mpv process terminated by signal");
                    }
                    false
                }
                Err(e) => {
                    warn!("mpv process_alive check failed: {}", e);
                    false
                }
            }
        } else {
            false
        }
    }

    /// Kill the process if running.
    pub async fn kill(&mut self) {
        if let Some(mut p) = self.process.take() {
            let _ = p.kill().await;
        }
    }

    /// Command-line flags for a fresh mpv.
    pub fn spawn_args(&self) -> Vec<String> {
        let mut args = vec![
            "--idle=yes".to_string(),
            platform::mpv_socket_arg(),
            "--quiet".to_string(),
            format!(
                "--volume={}",
                (self.last_volume * 100.0).clamp(0.0, 100.0).round() as i64
            ),
        ];
        if self.video {
            args.push("--force-window=yes".to_string());
        } else {
            args.push("--no-video".to_string());
        }
        if self.loop_playback {
            args.push("--loop-file=inf".to_string());
            args.push("--loop-playlist=inf".to_string());
        }
        args
    }

    fn command(&self) -> anyhow::Result<tokio::process::Command> {
        let mpv_binary = platform::find_mpv_binary(self.mpv_path.as_deref())
            .ok_or_else(|| anyhow::anyhow!("mpv binary not found"))?;
        let mut cmd = tokio::process::Command::new(mpv_binary);
        cmd.args(self.spawn_args())
            .stdout(std::process::Stdio::null())
            .kill_on_drop(true);
        Ok(cmd)
    }

    // ── spawn ─────────────────────────────────────────────────────────────────

    #[cfg(unix)]
    pub async fn spawn_and_connect(
        &mut self,
        event_tx: mpsc::Sender<MpvEvent>,
    ) -> anyhow::Result<MpvHandle> {
        // Kill stale process
        self.kill().await;

        let socket_path = PathBuf::from(&self.socket_name);
        let _ = tokio::fs::remove_file(&socket_path).await;

        info!("mpv: spawning new process");
        let mut cmd = self.command()?;

        let child = cmd.stderr(open_stderr_log(&platform::data_dir())?).spawn()?;
        info!("mpv: spawned process with pid {:?}", child.id());
        self.process = Some(child);

        for _ in 0..50 {
            tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
            if socket_path.exists() {
                break;
            }
        }
        if !socket_path.exists() {
            anyhow::bail!("mpv IPC socket did not appear");
        }
        tokio::time::sleep(tokio::time::Duration::from_millis(200)).await;

        let stream = UnixStream::connect(&socket_path).await?;
        info!("mpv: connected to IPC socket");
        let (read_half, write_half) = stream.into_split();
        Ok(start_io_tasks(BufReader::new(read_half), write_half, event_tx))
    }

    #[cfg(windows)]
    pub async fn spawn_and_connect(
        &mut self,
        event_tx: mpsc::Sender<MpvEvent>,
    ) -> anyhow::Result<MpvHandle> {
        self.kill().await;

        info!("mpv: spawning new process");
        let mut cmd = self.command()?;
        let child = cmd.stderr(open_stderr_log(&platform::data_dir())?).spawn()?;
        info!("mpv: spawned process with pid {:?}", child.id());
        self.process = Some(child);

        let pipe_path = format!(r"\\.\pipe\{}", self.socket_name);
        for _ in 0..50 {
            tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
            match ClientOptions::new().open(&pipe_path) {
                Ok(client) => {
                    info!("mpv: connected to named pipe");
                    let (read_half, write_half) = tokio::io::split(client);
                    return Ok(start_io_tasks(BufReader::new(read_half), write_half, event_tx));
                }
                Err(_) => continue,
            }
        }
        anyhow::bail!("mpv named pipe did not appear")
    }
}

/// mpv stderr goes to its own log for debugging load failures.
fn open_stderr_log(data_dir: &Path) -> anyhow::Result<std::fs::File> {
    std::fs::create_dir_all(data_dir)?;
    let stderr_path = data_dir.join(MPV_STDERR_LOG);
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&stderr_path)?;
    info!("mpv: logging stderr to {:?}", stderr_path);
    Ok(file)
}

fn start_io_tasks<R, W>(
    reader: BufReader<R>,
    writer: W,
    event_tx: mpsc::Sender<MpvEvent>,
) -> MpvHandle
where
    R: tokio::io::AsyncRead + Unpin + Send + 'static,
    W: tokio::io::AsyncWrite + Unpin + Send + 'static,
{
    // req_id → reply channel. Writer inserts, reader resolves.
    let pending: PendingMap = Arc::new(Mutex::new(HashMap::new()));
    let (cmd_tx, cmd_rx) = mpsc::channel::<PendingRequest>(64);

    tokio::spawn(writer_task(writer, cmd_rx, pending.clone()));
    tokio::spawn(reader_task(reader, pending, event_tx));

    MpvHandle { tx: cmd_tx }
}

// ── reader task ───────────────────────────────────────────────────────────────

async fn reader_task<R>(mut reader: BufReader<R>, pending: PendingMap, event_tx: mpsc::Sender<MpvEvent>)
where
    R: tokio::io::AsyncRead + Unpin,
{
    let mut line = String::new();
    loop {
        line.clear();
        match reader.read_line(&mut line).await {
            Ok(0) => {
                debug!("mpv reader: connection closed");
                fail_pending(&pending, "mpv IPC connection closed").await;
                break;
            }
            Ok(_) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let val: Value = match serde_json::from_str(trimmed) {
                    Ok(v) => v,
                    Err(e) => {
                        debug!("mpv reader: invalid json '{}': {}", trimmed, e);
                        continue;
                    }
                };

                if let Some(req_id) = val.get("request_id").and_then(|v| v.as_u64()) {
                    let mut map = pending.lock().await;
                    if let Some(tx) = map.remove(&req_id) {
                        let result = if val["error"].as_str() == Some("success") {
                            Ok(val)
                        } else {
                            let err = val["error"].as_str().unwrap_or("unknown error").to_string();
                            debug!("mpv reader: response req={} err={}", req_id, err);
                            Err(anyhow::anyhow!("mpv error: {}", err))
                        };
                        let _ = tx.send(result);
                    } else {
                        debug!("mpv reader: response for unknown req={}", req_id);
                    }
                } else {
                    debug!("mpv reader: event {}", trimmed);
                    if event_tx.send(MpvEvent { raw: val }).await.is_err() {
                        break;
                    }
                }
            }
            Err(e) => {
                warn!("mpv reader: read error: {}", e);
                fail_pending(&pending, &format!("mpv IPC read error: {}", e)).await;
                break;
            }
        }
    }
}

async fn fail_pending(pending: &PendingMap, reason: &str) {
    let mut map = pending.lock().await;
    for (_, tx) in map.drain() {
        let _ = tx.send(Err(anyhow::anyhow!("{}", reason)));
    }
}

// ── writer task ───────────────────────────────────────────────────────────────

async fn writer_task<W>(mut writer: W, mut rx: mpsc::Receiver<PendingRequest>, pending: PendingMap)
where
    W: tokio::io::AsyncWrite + Unpin,
{
    while let Some(req) = rx.recv().await {
        // Register reply channel before writing so reader can match it
        pending.lock().await.insert(req.req_id, req.reply);
        debug!(
            "mpv writer: send req={} payload={}",
            req.req_id,
            req.payload.trim()
        );
        if let Err(e) = writer.write_all(req.payload.as_bytes()).await {
            warn!("mpv writer: write error: {}", e);
            if let Some(tx) = pending.lock().await.remove(&req.req_id) {
                let _ = tx.send(Err(anyhow::anyhow!("mpv write error: {}", e)));
            }
            break;
        }
    }
    debug!("mpv writer: task exiting");
}

// ── convenience wrappers (used by SurfaceCore) ────────────────────────────────

impl MpvHandle {
    pub async fn load(&self, url: &str) -> anyhow::Result<()> {
        debug!("mpv: loadfile {}", url);
        self.send(json!(["loadfile", url, "replace"])).await?;
        self.set_pause(false).await
    }

    pub async fn stop(&self) -> anyhow::Result<()> {
        self.send(json!(["stop"])).await?;
        Ok(())
    }

    pub async fn set_volume(&self, vol: f32) -> anyhow::Result<()> {
        let vol_pct = (vol * 100.0).clamp(0.0, 100.0);
        self.send(json!(["set_property", "volume", vol_pct])).await?;
        Ok(())
    }

    pub async fn set_pause(&self, paused: bool) -> anyhow::Result<()> {
        self.send(json!(["set_property", "pause", paused])).await?;
        Ok(())
    }

    /// Register observe_property for everything the surface reports.
    /// Must be called after every fresh connection.
    pub async fn observe_properties(&self) {
        let props = [(OBS_PAUSE, "pause"), (OBS_MEDIA_TITLE, "media-title")];
        for (id, name) in &props {
            match self.send(json!(["observe_property", id, name])).await {
                Ok(_) => debug!("mpv: observe_property id={} name={}", id, name),
                Err(e) => warn!("mpv: observe_property {} failed: {}", name, e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(raw: Value) -> MpvEvent {
        MpvEvent { raw }
    }

    #[test]
    fn stderr_log_is_created_and_appended() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("data");
        {
            use std::io::Write;
            let mut first = open_stderr_log(&data_dir).unwrap();
            writeln!(first, "one").unwrap();
            let mut second = open_stderr_log(&data_dir).unwrap();
            writeln!(second, "two").unwrap();
        }
        let content = std::fs::read_to_string(data_dir.join(MPV_STDERR_LOG)).unwrap();
        assert_eq!(content, "one\ntwo\n");
    }

    #[test]
    fn property_change_is_decoded() {
        let evt = event(json!({"event": "property-change", "id": OBS_PAUSE, "name": "pause", "data": true}));
        let (id, data) = evt.as_property_change().unwrap();
        assert_eq!(id, OBS_PAUSE);
        assert_eq!(data, &Value::Bool(true));
        assert_eq!(evt.end_file_error(), None);
    }

    #[test]
    fn end_file_error_carries_mpv_description() {
        let evt = event(json!({"event": "end-file", "reason": "error", "file_error": "loading failed"}));
        assert_eq!(evt.end_file_error().as_deref(), Some("loading failed"));

        let bare = event(json!({"event": "end-file", "reason": "error"}));
        assert_eq!(bare.end_file_error().as_deref(), Some("playback error"));
    }

    #[test]
    fn normal_end_file_is_not_an_error() {
        for reason in ["eof", "stop", "quit", "redirect"] {
            let evt = event(json!({"event": "end-file", "reason": reason}));
            assert_eq!(evt.end_file_error(), None, "{reason}");
        }
        assert_eq!(event(json!({"event": "file-loaded"})).end_file_error(), None);
    }

    #[test]
    fn spawn_args_follow_player_config() {
        let mut player = PlayerConfig::default();
        player.volume = 0.3;
        let args = MpvDriver::new(&player).spawn_args();
        assert!(args.contains(&"--volume=30".to_string()));
        assert!(args.contains(&"--force-window=yes".to_string()));
        assert!(args.contains(&"--loop-file=inf".to_string()));

        player.video = false;
        player.loop_playback = false;
        let args = MpvDriver::new(&player).spawn_args();
        assert!(args.contains(&"--no-video".to_string()));
        assert!(!args.iter().any(|a| a.starts_with("--loop")));
        assert!(args.iter().any(|a| a.starts_with("--input-ipc-server=")));
    }
}
