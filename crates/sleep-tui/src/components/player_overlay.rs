//! PlayerOverlay: full-screen view of the playing playlist.
//!
//! Visibility comes from the session. Loading and error state are local
//! and driven by `SurfaceEvent`s.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use sleep_core::catalog::Playlist;
use sleep_core::youtube::embed_url;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    surface::SurfaceEvent,
    theme::{
        hex_color, style_muted, style_secondary, C_ACCENT, C_ERROR, C_LOADING, C_OVERLAY_BG,
        C_PLAYING, C_PRIMARY,
    },
    widgets::toast::SPINNER_FRAMES,
};

pub const VOLUME_STEP: f32 = 0.05;

pub struct PlayerOverlay {
    pub loading: bool,
    pub error: Option<String>,
    /// Title reported by mpv once the stream resolves.
    media_title: Option<String>,
    spinner: usize,
}

impl PlayerOverlay {
    pub fn new() -> Self {
        Self {
            loading: false,
            error: None,
            media_title: None,
            spinner: 0,
        }
    }

    fn start_loading(&mut self) {
        self.loading = true;
        self.error = None;
    }

    fn status_line(&self, state: &AppState) -> Line<'static> {
        if let Some(err) = &self.error {
            return Line::from(vec![
                Span::styled(
                    format!("Failed to load: {}", err),
                    Style::default().fg(C_ERROR).add_modifier(Modifier::BOLD),
                ),
                Span::styled("   [r] Retry", Style::default().fg(C_ACCENT)),
            ]);
        }
        if self.loading {
            let frame = SPINNER_FRAMES[self.spinner % SPINNER_FRAMES.len()];
            return Line::from(Span::styled(
                format!("{} Loading...", frame),
                Style::default().fg(C_LOADING),
            ));
        }
        if state.paused {
            Line::from(Span::styled("⏸ Paused", Style::default().fg(C_LOADING)))
        } else {
            Line::from(Span::styled("▶ Playing", Style::default().fg(C_PLAYING)))
        }
    }

    fn body(&self, playlist: &Playlist, state: &AppState) -> Vec<Line<'static>> {
        let info = playlist.category.info();
        let accent = hex_color(info.color);
        let mut lines = vec![
            Line::from(vec![
                Span::raw(format!("{} ", info.icon)),
                Span::styled(
                    playlist.title.clone(),
                    Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(Span::styled(playlist.description.clone(), style_secondary())),
            Line::from(""),
            self.status_line(state),
        ];
        if let Some(t) = &self.media_title {
            lines.push(Line::from(Span::styled(
                format!("♪ {}", t),
                Style::default().fg(accent),
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("source  ", style_muted()),
            Span::styled(embed_url(&playlist.youtube_url), style_secondary()),
        ]));
        lines.push(Line::from(vec![
            Span::styled("volume  ", style_muted()),
            Span::styled(
                format!("{:>3}%", (state.volume * 100.0).round() as i64),
                style_secondary(),
            ),
        ]));
        if let Some(f) = state.selected_frequency() {
            lines.push(Line::from(vec![
                Span::styled("tuned   ", style_muted()),
                Span::styled(
                    format!("{} {} - {}", f.icon, f.hz_label(), f.name),
                    Style::default().fg(hex_color(f.color)),
                ),
            ]));
        }
        lines
    }
}

impl Component for PlayerOverlay {
    fn id(&self) -> ComponentId {
        ComponentId::PlayerOverlay
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release || !state.session.player_visible {
            return vec![];
        }
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return vec![Action::ClosePlayer],
            KeyCode::Char('r') if self.error.is_some() => return vec![Action::RetryLoad],
            KeyCode::Char(' ') => return vec![Action::TogglePause],
            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Up => {
                return vec![Action::Volume((state.volume + VOLUME_STEP).min(1.0))];
            }
            KeyCode::Char('-') | KeyCode::Down => {
                return vec![Action::Volume((state.volume - VOLUME_STEP).max(0.0))];
            }
            _ => {}
        }
        vec![]
    }

    fn tick(&mut self, _state: &AppState) -> Vec<Action> {
        if self.loading {
            self.spinner = self.spinner.wrapping_add(1);
        }
        vec![]
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        match action {
            Action::SelectPlaylist(_) => {
                self.start_loading();
                self.media_title = None;
            }
            Action::RetryLoad => self.start_loading(),
            Action::ClosePlayer => {
                self.loading = false;
                self.error = None;
                self.media_title = None;
            }
            Action::Surface(evt) => match evt {
                SurfaceEvent::LoadStarted => self.loading = true,
                SurfaceEvent::LoadEnded => self.loading = false,
                SurfaceEvent::LoadError(desc) => {
                    self.loading = false;
                    self.error = Some(desc.clone());
                }
                SurfaceEvent::Title(t) => self.media_title = t.clone(),
                SurfaceEvent::Paused(_) => {}
            },
            _ => {}
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, state: &AppState) {
        if !state.session.player_visible {
            return;
        }
        let Some(playlist) = state.session.selected_playlist.as_ref() else {
            return;
        };

        frame.render_widget(Clear, area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(hex_color(playlist.category.info().color)))
            .title(Line::from(Span::styled(
                " now playing ",
                Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
            )))
            .title_top(Line::from(Span::styled(" esc close ", style_muted())).right_aligned())
            .style(Style::default().bg(C_OVERLAY_BG));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(inner);
        let pad = Rect {
            x: rows[0].x + 2,
            y: rows[0].y + 1,
            width: rows[0].width.saturating_sub(4),
            height: rows[0].height.saturating_sub(1),
        };
        frame.render_widget(
            Paragraph::new(self.body(playlist, state)).wrap(Wrap { trim: true }),
            pad,
        );

        let mut controls = vec![
            Span::styled(" space", Style::default().fg(C_ACCENT)),
            Span::styled(" pause  ", style_muted()),
            Span::styled("+/-", Style::default().fg(C_ACCENT)),
            Span::styled(" volume  ", style_muted()),
        ];
        if self.error.is_some() {
            controls.push(Span::styled("r", Style::default().fg(C_ACCENT)));
            controls.push(Span::styled(" retry  ", style_muted()));
        }
        controls.push(Span::styled("esc/q", Style::default().fg(C_ACCENT)));
        controls.push(Span::styled(" close", style_muted()));
        frame.render_widget(Paragraph::new(Line::from(controls)), rows[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::app_state;
    use ratatui::crossterm::event::KeyModifiers;
    use sleep_core::catalog::default_playlists;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn open_state() -> AppState {
        let mut state = app_state();
        state.session.selected_playlist = default_playlists().into_iter().next();
        state.session.player_visible = true;
        state
    }

    #[test]
    fn load_lifecycle_drives_local_flags() {
        let state = open_state();
        let mut overlay = PlayerOverlay::new();
        let playlist = default_playlists().remove(0);
        overlay.on_action(&Action::SelectPlaylist(playlist), &state);
        assert!(overlay.loading);

        overlay.on_action(&Action::Surface(SurfaceEvent::LoadEnded), &state);
        assert!(!overlay.loading);

        overlay.on_action(
            &Action::Surface(SurfaceEvent::LoadError("unsupported URL".into())),
            &state,
        );
        assert_eq!(overlay.error.as_deref(), Some("unsupported URL"));
        assert!(overlay.status_line(&state).spans[0]
            .content
            .starts_with("Failed to load: unsupported URL"));
    }

    #[test]
    fn retry_only_offered_after_error() {
        let state = open_state();
        let mut overlay = PlayerOverlay::new();
        assert!(overlay.handle_key(key(KeyCode::Char('r')), &state).is_empty());

        overlay.on_action(&Action::Surface(SurfaceEvent::LoadError("x".into())), &state);
        let actions = overlay.handle_key(key(KeyCode::Char('r')), &state);
        assert!(matches!(actions.as_slice(), [Action::RetryLoad]));

        overlay.on_action(&Action::RetryLoad, &state);
        assert!(overlay.loading);
        assert!(overlay.error.is_none());
    }

    #[test]
    fn volume_keys_step_and_clamp() {
        let mut state = open_state();
        let mut overlay = PlayerOverlay::new();
        state.volume = 0.98;
        let actions = overlay.handle_key(key(KeyCode::Char('+')), &state);
        assert!(matches!(actions.as_slice(), [Action::Volume(v)] if (*v - 1.0).abs() < f32::EPSILON));
        state.volume = 0.02;
        let actions = overlay.handle_key(key(KeyCode::Char('-')), &state);
        assert!(matches!(actions.as_slice(), [Action::Volume(v)] if *v == 0.0));
    }

    #[test]
    fn hidden_overlay_ignores_keys() {
        let state = app_state();
        let mut overlay = PlayerOverlay::new();
        assert!(overlay.handle_key(key(KeyCode::Esc), &state).is_empty());
    }
}
