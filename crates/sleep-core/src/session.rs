//! Selection state, and the only writer of persisted playlists.
//!
//! Owns the selected frequency, the selected playlist, the player-visible
//! flag and the custom playlist list. The UI reads it through
//! `SessionSnapshot` and changes it only through the methods below.
//!
//! Every mutation of the custom list spawns a full-list save and returns
//! immediately. Saves are chained so they hit the disk in the order they
//! were issued; `flush` waits for the tail of that chain.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::catalog::{default_playlists, Category, Frequency, Playlist, FREQUENCIES};
use crate::store::PlaylistStore;
use crate::youtube::extract_youtube_id;

pub const CUSTOM_DESCRIPTION: &str = "Custom playlist";

/// Why a new playlist was rejected. The message is what the user sees.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddPlaylistError {
    #[error("Please enter a title")]
    EmptyTitle,
    #[error("Please enter a YouTube URL")]
    EmptyUrl,
    #[error("Invalid YouTube URL")]
    InvalidUrl,
}

/// Read-only copy of the session handed to rendering code.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub selected_frequency: Option<&'static Frequency>,
    pub selected_playlist: Option<Playlist>,
    pub player_visible: bool,
    pub default_playlists: Vec<Playlist>,
    pub custom_playlists: Vec<Playlist>,
}

impl SessionSnapshot {
    /// Defaults followed by custom entries; no de-duplication.
    pub fn merged_playlists(&self) -> impl Iterator<Item = &Playlist> {
        self.default_playlists
            .iter()
            .chain(self.custom_playlists.iter())
    }

    pub fn playlists_in(&self, category: Option<Category>) -> Vec<Playlist> {
        self.merged_playlists()
            .filter(|p| category.map_or(true, |c| p.category == c))
            .cloned()
            .collect()
    }
}

pub struct Session {
    frequencies: &'static [Frequency],
    defaults: Vec<Playlist>,
    custom: Vec<Playlist>,
    selected_frequency: Option<&'static Frequency>,
    selected_playlist: Option<Playlist>,
    player_visible: bool,
    store: Arc<PlaylistStore>,
    last_save: Option<JoinHandle<()>>,
}

impl Session {
    /// Build a session around an already-loaded custom list.
    pub fn new(store: PlaylistStore, custom: Vec<Playlist>) -> Self {
        Self {
            frequencies: FREQUENCIES,
            defaults: default_playlists(),
            custom,
            selected_frequency: FREQUENCIES.first(),
            selected_playlist: None,
            player_visible: false,
            store: Arc::new(store),
            last_save: None,
        }
    }

    /// Load the custom list from `store` and build the session.
    pub async fn open(store: PlaylistStore) -> Self {
        let custom = store.load().await;
        info!("session: {} custom playlists restored", custom.len());
        Self::new(store, custom)
    }

    // ── Reads ─────────────────────────────────────────────────────────────────

    pub fn frequencies(&self) -> &'static [Frequency] {
        self.frequencies
    }

    pub fn selected_frequency(&self) -> Option<&'static Frequency> {
        self.selected_frequency
    }

    pub fn selected_playlist(&self) -> Option<&Playlist> {
        self.selected_playlist.as_ref()
    }

    pub fn player_visible(&self) -> bool {
        self.player_visible
    }

    pub fn custom_playlists(&self) -> &[Playlist] {
        &self.custom
    }

    pub fn merged_playlists(&self) -> impl Iterator<Item = &Playlist> {
        self.defaults.iter().chain(self.custom.iter())
    }

    pub fn playlists_in(&self, category: Option<Category>) -> Vec<&Playlist> {
        self.merged_playlists()
            .filter(|p| category.map_or(true, |c| p.category == c))
            .collect()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            selected_frequency: self.selected_frequency,
            selected_playlist: self.selected_playlist.clone(),
            player_visible: self.player_visible,
            default_playlists: self.defaults.clone(),
            custom_playlists: self.custom.clone(),
        }
    }

    // ── Selection ─────────────────────────────────────────────────────────────

    pub fn select_frequency(&mut self, frequency: &'static Frequency) {
        debug!("session: frequency -> {}", frequency.id);
        self.selected_frequency = Some(frequency);
    }

    /// Select `playlist` and open the player overlay.
    pub fn select_playlist(&mut self, playlist: Playlist) {
        debug!("session: playlist -> {}", playlist.id);
        self.selected_playlist = Some(playlist);
        self.player_visible = true;
    }

    pub fn close_player(&mut self) {
        self.player_visible = false;
        self.selected_playlist = None;
    }

    // ── Custom playlists ──────────────────────────────────────────────────────

    /// Validate and append a custom playlist. Nothing changes on error.
    ///
    /// Must be called from within a tokio runtime; the save is spawned.
    pub fn add_playlist(&mut self, title: &str, url: &str) -> Result<Playlist, AddPlaylistError> {
        let title = title.trim();
        let url = url.trim();
        if title.is_empty() {
            return Err(AddPlaylistError::EmptyTitle);
        }
        if url.is_empty() {
            return Err(AddPlaylistError::EmptyUrl);
        }
        if extract_youtube_id(url).is_none() {
            return Err(AddPlaylistError::InvalidUrl);
        }

        let playlist = Playlist {
            id: self.next_custom_id(),
            title: title.to_string(),
            description: CUSTOM_DESCRIPTION.to_string(),
            youtube_url: url.to_string(),
            category: Category::Custom,
            thumbnail: None,
            is_default: false,
        };
        info!("session: added playlist {} ({})", playlist.id, playlist.title);
        self.custom.push(playlist.clone());
        self.spawn_save();
        Ok(playlist)
    }

    /// Remove a custom playlist by id. Returns `false` (and does nothing)
    /// for default entries and unknown ids.
    pub fn remove_playlist(&mut self, id: &str) -> bool {
        let before = self.custom.len();
        self.custom.retain(|p| p.id != id);
        if self.custom.len() == before {
            debug!("session: remove {} ignored (default or unknown)", id);
            return false;
        }
        info!("session: removed playlist {}", id);
        self.spawn_save();
        true
    }

    /// Wait for every save issued so far to finish.
    ///
    /// Returns `false` if the last save task died before completing.
    pub async fn flush(&mut self) -> bool {
        match self.last_save.take() {
            Some(handle) => join_save(handle).await,
            None => true,
        }
    }

    /// `custom-<unix millis>`, bumped past any id already in use.
    fn next_custom_id(&self) -> String {
        let mut millis = chrono::Utc::now().timestamp_millis();
        loop {
            let id = format!("custom-{}", millis);
            if !self.merged_playlists().any(|p| p.id == id) {
                return id;
            }
            millis += 1;
        }
    }

    fn spawn_save(&mut self) {
        let store = Arc::clone(&self.store);
        let list = self.custom.clone();
        let previous = self.last_save.take();
        self.last_save = Some(tokio::spawn(async move {
            if let Some(prev) = previous {
                join_save(prev).await;
            }
            store.save(&list).await;
        }));
    }
}

async fn join_save(handle: JoinHandle<()>) -> bool {
    match handle.await {
        Ok(()) => true,
        Err(e) => {
            warn!("session: save task failed: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn session_in(dir: &TempDir) -> Session {
        Session::new(PlaylistStore::at(dir.path().join("storage.json")), Vec::new())
    }

    #[tokio::test]
    async fn starts_on_first_frequency_with_player_closed() {
        let dir = TempDir::new().unwrap();
        let session = session_in(&dir);
        assert_eq!(session.selected_frequency().map(|f| f.id), Some("schumann"));
        assert!(session.selected_playlist().is_none());
        assert!(!session.player_visible());
        assert_eq!(session.merged_playlists().count(), 9);
    }

    #[tokio::test]
    async fn failed_save_is_reported_and_later_saves_still_land() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir);
        assert!(session.flush().await);

        session.last_save = Some(tokio::spawn(async { panic!("disk on fire") }));
        assert!(!session.flush().await);

        session.last_save = Some(tokio::spawn(async { panic!("disk on fire") }));
        session
            .add_playlist("After", "https://youtu.be/after")
            .unwrap();
        assert!(session.flush().await);
        let stored = PlaylistStore::at(dir.path().join("storage.json")).load().await;
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].title, "After");
    }

    #[tokio::test]
    async fn select_and_close_player() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir);
        let rain = session.playlists_in(Some(Category::Rain))[0].clone();

        session.select_frequency(&FREQUENCIES[4]);
        session.select_playlist(rain.clone());
        assert!(session.player_visible());
        assert_eq!(session.selected_playlist(), Some(&rain));
        assert_eq!(session.selected_frequency().map(|f| f.id), Some("delta"));

        session.close_player();
        assert!(!session.player_visible());
        assert!(session.selected_playlist().is_none());
        // Closing the player leaves the frequency alone.
        assert_eq!(session.selected_frequency().map(|f| f.id), Some("delta"));
    }

    #[tokio::test]
    async fn validation_order_and_trimming() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir);
        assert_eq!(session.add_playlist("  ", ""), Err(AddPlaylistError::EmptyTitle));
        assert_eq!(session.add_playlist("x", "   "), Err(AddPlaylistError::EmptyUrl));
        assert_eq!(session.add_playlist("x", "youtube"), Err(AddPlaylistError::InvalidUrl));
        assert!(session.custom_playlists().is_empty());

        let p = session
            .add_playlist("  Night  ", "  https://youtu.be/abc  ")
            .unwrap();
        assert_eq!(p.title, "Night");
        assert_eq!(p.youtube_url, "https://youtu.be/abc");
        assert_eq!(p.description, CUSTOM_DESCRIPTION);
        session.flush().await;
    }

    #[tokio::test]
    async fn ids_stay_unique_within_one_millisecond() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir);
        let a = session.add_playlist("a", "https://youtu.be/a").unwrap();
        let b = session.add_playlist("b", "https://youtu.be/b").unwrap();
        let c = session.add_playlist("c", "https://youtu.be/c").unwrap();
        assert_ne!(a.id, b.id);
        assert_ne!(b.id, c.id);
        assert_ne!(a.id, c.id);
        assert!(a.id.starts_with("custom-"));
        session.flush().await;
    }

    #[tokio::test]
    async fn snapshot_filters_by_category() {
        let dir = TempDir::new().unwrap();
        let mut session = session_in(&dir);
        session.add_playlist("Mine", "https://youtu.be/m").unwrap();
        let snap = session.snapshot();
        assert_eq!(snap.playlists_in(None).len(), 10);
        assert_eq!(snap.playlists_in(Some(Category::Binaural)).len(), 3);
        let custom = snap.playlists_in(Some(Category::Custom));
        assert_eq!(custom.len(), 1);
        assert_eq!(custom[0].title, "Mine");
        // Custom entries come after the defaults.
        assert_eq!(snap.merged_playlists().last().map(|p| p.title.as_str()), Some("Mine"));
        session.flush().await;
    }
}
