//! Action enum: all user-initiated intents and internal events.

use sleep_core::catalog::Playlist;

use crate::surface::SurfaceEvent;

/// Unique identifier for a focusable component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    Header,
    FrequencyCarousel,
    PlaylistGrid,
    AddPlaylist,
    Dialog,
    PlayerOverlay,
    HelpOverlay,
}

/// All actions that can flow through the system.
/// Components produce Actions; the App dispatches them.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Selection ────────────────────────────────────────────────────────────
    SelectFrequency(usize), // index into the catalog
    SelectPlaylist(Playlist),
    ClosePlayer,

    // ── Custom playlists ─────────────────────────────────────────────────────
    OpenAddPlaylist,
    CloseAddPlaylist,
    SubmitPlaylist { title: String, url: String },
    /// Broadcast after the session accepted a new playlist.
    PlaylistAdded(Playlist),
    ConfirmRemove(Playlist),
    RemovePlaylist(String), // playlist id

    // ── Dialogs ──────────────────────────────────────────────────────────────
    ShowAlert { title: String, message: String },
    DismissDialog,

    // ── Playback surface ─────────────────────────────────────────────────────
    RetryLoad,
    TogglePause,
    Volume(f32),
    Surface(SurfaceEvent),

    // ── Navigation ───────────────────────────────────────────────────────────
    FocusNext,
    FocusPrev,
    FocusPane(ComponentId),

    // ── Filter/search ────────────────────────────────────────────────────────
    OpenFilter,
    CloseFilter,

    // ── UI toggles ───────────────────────────────────────────────────────────
    ToggleHelp,
    ToggleKeys,
    CopyToClipboard(String),

    // ── System ───────────────────────────────────────────────────────────────
    Quit,
    Resize(u16, u16),
    Noop,
}
