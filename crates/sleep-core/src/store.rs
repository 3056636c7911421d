//! Local key-value storage and the custom-playlist persistence adapter.
//!
//! `KvStore` is a string-to-string map kept as one JSON object on disk.
//! `PlaylistStore` keeps the user's custom playlists under a single fixed
//! key. Its `load`/`save` never fail: errors are logged and the caller
//! carries on with whatever it has in memory.

use std::collections::BTreeMap;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::catalog::Playlist;

/// Storage key for the serialized custom playlist list.
pub const CUSTOM_PLAYLISTS_KEY: &str = "@sound_sleep_custom_playlists";

#[derive(Debug, Clone)]
pub struct KvStore {
    path: PathBuf,
}

impl KvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let mut map = self.read_map().await?;
        Ok(map.remove(key))
    }

    /// Overwrite `key`, preserving every other entry in the file.
    pub async fn set(&self, key: &str, value: String) -> anyhow::Result<()> {
        let mut map = match self.read_map().await {
            Ok(map) => map,
            Err(e) => {
                warn!("[store] {:?} unreadable, starting fresh: {}", self.path, e);
                BTreeMap::new()
            }
        };
        map.insert(key.to_string(), value);

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(&map)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }

    async fn read_map(&self) -> anyhow::Result<BTreeMap<String, String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PlaylistStore {
    kv: KvStore,
}

impl PlaylistStore {
    pub fn new(kv: KvStore) -> Self {
        Self { kv }
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self::new(KvStore::new(path))
    }

    /// Previously saved custom playlists, or an empty list.
    pub async fn load(&self) -> Vec<Playlist> {
        match self.try_load().await {
            Ok(list) => {
                debug!("[store] loaded {} custom playlists", list.len());
                list
            }
            Err(e) => {
                warn!("Failed to load playlists: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn save(&self, playlists: &[Playlist]) {
        match self.try_save(playlists).await {
            Ok(()) => debug!("[store] saved {} custom playlists", playlists.len()),
            Err(e) => warn!("Failed to save playlists: {}", e),
        }
    }

    pub async fn try_load(&self) -> anyhow::Result<Vec<Playlist>> {
        match self.kv.get(CUSTOM_PLAYLISTS_KEY).await? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    pub async fn try_save(&self, playlists: &[Playlist]) -> anyhow::Result<()> {
        let raw = serde_json::to_string(playlists)?;
        self.kv.set(CUSTOM_PLAYLISTS_KEY, raw).await
    }
}
