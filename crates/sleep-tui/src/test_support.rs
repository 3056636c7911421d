//! Fixtures shared by component tests.

use sleep_core::catalog::{default_playlists, Category, Playlist, FREQUENCIES};
use sleep_core::session::{SessionSnapshot, CUSTOM_DESCRIPTION};

use crate::app_state::AppState;

/// Fresh-start state: first frequency, player closed, no custom entries.
pub fn app_state() -> AppState {
    let session = SessionSnapshot {
        selected_frequency: FREQUENCIES.first(),
        selected_playlist: None,
        player_visible: false,
        default_playlists: default_playlists(),
        custom_playlists: Vec::new(),
    };
    AppState::new(session, 0.5, true)
}

pub fn custom_playlist(id: &str, title: &str) -> Playlist {
    Playlist {
        id: id.to_string(),
        title: title.to_string(),
        description: CUSTOM_DESCRIPTION.to_string(),
        youtube_url: "https://www.youtube.com/watch?v=abc".to_string(),
        category: Category::Custom,
        thumbnail: None,
        is_default: false,
    }
}
