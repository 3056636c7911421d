//! AppState: shared read-only data passed to all components during render/event.
//!
//! Components read this, but never mutate it.
//! The App event-loop is the only thing that writes to AppState.

use sleep_core::catalog::{Frequency, FREQUENCIES};
use sleep_core::session::SessionSnapshot;

use crate::widgets::status_bar::InputMode;

pub struct AppState {
    // ── Session ─────────────────────────────────────────────────────────────
    /// Refreshed from `Session::snapshot()` after every mutation.
    pub session: SessionSnapshot,

    // ── Playback surface ────────────────────────────────────────────────────
    /// 0.0–1.0, mirrored into mpv.
    pub volume: f32,
    pub paused: bool,

    // ── UI mode ─────────────────────────────────────────────────────────────
    pub input_mode: InputMode,
    pub show_keys_bar: bool,
    /// Recent log lines for the help overlay footer.
    pub logs: Vec<String>,
}

impl AppState {
    pub fn new(session: SessionSnapshot, volume: f32, show_keys_bar: bool) -> Self {
        Self {
            session,
            volume,
            paused: false,
            input_mode: InputMode::Normal,
            show_keys_bar,
            logs: Vec::new(),
        }
    }

    pub fn selected_frequency(&self) -> Option<&'static Frequency> {
        self.session.selected_frequency
    }

    /// Catalog index of the selected frequency.
    pub fn selected_frequency_index(&self) -> Option<usize> {
        let selected = self.session.selected_frequency?;
        FREQUENCIES.iter().position(|f| f.id == selected.id)
    }
}
