//! App: component-based event loop.
//!
//! Architecture:
//! - `App` owns the `Session`, all components and `AppState` (the read-only
//!   view handed to components).
//! - A `tokio::mpsc` channel carries `AppMessage` events in from background
//!   tasks: terminal input and playback-surface reports.
//! - The event loop draws each frame, then awaits the next message.
//! - Components return `Vec<Action>`; App dispatches each Action.
//! - Commands to the playback surface flow out through `surface_tx`.

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use ratatui::crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Block,
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use sleep_core::catalog::FREQUENCIES;
use sleep_core::config::Config;
use sleep_core::session::Session;
use sleep_core::youtube::embed_url;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    components::{
        add_playlist::AddPlaylist, dialog::Dialog, frequency_carousel::FrequencyCarousel,
        header::Header, help_overlay::HelpOverlay, player_overlay::PlayerOverlay,
        playlist_grid::PlaylistGrid,
    },
    focus::FocusRing,
    surface::{SurfaceCommand, SurfaceEvent, SurfaceInput},
    theme::C_BG,
    widgets::{
        status_bar::{self, InputMode},
        toast::ToastManager,
    },
};

// ── Internal event bus ────────────────────────────────────────────────────────

enum AppMessage {
    Event(Event),
    Surface(SurfaceEvent),
}

/// Header rows.
const HEADER_H: u16 = 2;
/// Carousel pane: card rows + benefits row + borders.
const CAROUSEL_H: u16 = 9;
/// Upper bound on actions spawned by a single input.
const MAX_CHAINED_ACTIONS: usize = 32;
const MAX_LOG_LINES: usize = 500;

/// Pane rects from the last draw, for mouse hit-testing.
#[derive(Default, Clone, Copy)]
struct PaneAreas {
    carousel: Rect,
    grid: Rect,
}

pub struct App {
    session: Session,
    config: Config,
    state: AppState,
    surface_tx: mpsc::Sender<SurfaceInput>,
    focus: FocusRing,

    // ── Components ───────────────────────────────────────────────────────────
    header: Header,
    carousel: FrequencyCarousel,
    grid: PlaylistGrid,
    add_playlist: AddPlaylist,
    dialog: Dialog,
    player: PlayerOverlay,
    help_overlay: HelpOverlay,
    toast: ToastManager,

    pane_areas: PaneAreas,
    should_quit: bool,
}

impl App {
    pub fn new(session: Session, config: Config, surface_tx: mpsc::Sender<SurfaceInput>) -> Self {
        let state = AppState::new(
            session.snapshot(),
            config.player.volume,
            config.ui.show_keys_bar,
        );
        let carousel = FrequencyCarousel::new(&state);
        let grid = PlaylistGrid::new(&state);
        Self {
            session,
            config,
            state,
            surface_tx,
            focus: FocusRing::new(vec![ComponentId::FrequencyCarousel, ComponentId::PlaylistGrid]),
            header: Header::new(),
            carousel,
            grid,
            add_playlist: AddPlaylist::new(),
            dialog: Dialog::new(),
            player: PlayerOverlay::new(),
            help_overlay: HelpOverlay::new(),
            toast: ToastManager::new(),
            pane_areas: PaneAreas::default(),
            should_quit: false,
        }
    }

    pub async fn run(mut self, mut surface_rx: mpsc::Receiver<SurfaceEvent>) -> anyhow::Result<()> {
        debug!("run(): enabling raw mode");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        debug!("run(): terminal created, size={:?}", terminal.size());

        let (tx, mut rx) = mpsc::channel::<AppMessage>(1024);
        self.push_log("sound-sleep started".to_string());

        // ── Background task: keyboard/mouse events ────────────────────────────
        let event_tx = tx.clone();
        tokio::task::spawn_blocking(move || loop {
            match event::read() {
                Ok(ev) => {
                    if event_tx.blocking_send(AppMessage::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        });

        // ── Background task: surface reports → AppMessage ─────────────────────
        let surface_fwd = tx.clone();
        tokio::spawn(async move {
            while let Some(evt) = surface_rx.recv().await {
                if surface_fwd.send(AppMessage::Surface(evt)).await.is_err() {
                    break;
                }
            }
        });
        drop(tx);

        // ── Periodic timers ───────────────────────────────────────────────────
        // Toast expiry: 100ms
        let mut toast_tick = tokio::time::interval(Duration::from_millis(100));
        toast_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        // Component maintenance tick (spinner frames, filter cursors).
        let mut ui_tick = tokio::time::interval(Duration::from_millis(100));
        ui_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        // ── Main loop ─────────────────────────────────────────────────────────
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal.draw(|f| self.draw(f))?;
            }
            needs_redraw = false;

            if self.should_quit {
                break;
            }

            tokio::select! {
                msg = rx.recv() => {
                    let Some(msg) = msg else { break };
                    const MAX_DRAIN: usize = 256;
                    self.handle_message(msg).await;
                    let mut drained = 0usize;
                    while drained < MAX_DRAIN {
                        let Ok(next) = rx.try_recv() else { break };
                        drained += 1;
                        self.handle_message(next).await;
                    }
                    needs_redraw = true;
                }

                _ = ui_tick.tick() => {
                    let tick_actions: Vec<Action> = {
                        let s = &self.state;
                        let mut all = Vec::new();
                        all.extend(self.carousel.tick(s));
                        all.extend(self.grid.tick(s));
                        all.extend(self.player.tick(s));
                        all
                    };
                    for action in tick_actions {
                        self.dispatch(action).await;
                    }
                    needs_redraw = self.player.loading || needs_redraw;
                }

                _ = toast_tick.tick() => {
                    if !self.toast.is_empty() {
                        self.toast.tick();
                        needs_redraw = true;
                    }
                }
            }
        }

        // ── Teardown ──────────────────────────────────────────────────────────
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        self.shutdown().await;
        Ok(())
    }

    /// Stop the surface, let pending saves land, remember the volume.
    async fn shutdown(&mut self) {
        info!("shutting down");
        let _ = self.surface_tx.send(SurfaceInput::Shutdown).await;
        self.session.flush().await;

        if (self.config.player.volume - self.state.volume).abs() > f32::EPSILON
            || self.config.ui.show_keys_bar != self.state.show_keys_bar
        {
            self.config.player.volume = self.state.volume;
            self.config.ui.show_keys_bar = self.state.show_keys_bar;
            if let Err(e) = self.config.save() {
                warn!("failed to save config: {}", e);
            }
        }
    }

    async fn handle_message(&mut self, msg: AppMessage) {
        match msg {
            AppMessage::Event(ev) => match ev {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Release {
                        return;
                    }
                    let actions = self.handle_key(key);
                    for a in actions {
                        self.dispatch(a).await;
                    }
                }
                Event::Mouse(mouse) => {
                    let actions = self.handle_mouse(mouse);
                    for a in actions {
                        self.dispatch(a).await;
                    }
                }
                Event::Resize(w, h) => {
                    self.dispatch(Action::Resize(w, h)).await;
                }
                _ => {}
            },
            AppMessage::Surface(evt) => {
                self.dispatch(Action::Surface(evt)).await;
            }
        }
    }

    // ── Key routing ───────────────────────────────────────────────────────────

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        if key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL {
            return vec![Action::Quit];
        }

        let s = &self.state;

        // Layers, topmost first. Each one swallows keys while visible.
        if self.help_overlay.visible {
            return self.help_overlay.handle_key(key, s);
        }
        if self.dialog.is_open() {
            return self.dialog.handle_key(key, s);
        }
        if self.add_playlist.visible {
            return self.add_playlist.handle_key(key, s);
        }
        if s.session.player_visible {
            if key.code == KeyCode::Char('?') {
                return vec![Action::ToggleHelp];
            }
            return self.player.handle_key(key, s);
        }

        // Tab / Shift-Tab always cycle focus (closing the filter first)
        match key.code {
            KeyCode::Tab => {
                if s.input_mode == InputMode::Filter {
                    return vec![Action::CloseFilter, Action::FocusNext];
                }
                return vec![Action::FocusNext];
            }
            KeyCode::BackTab => {
                if s.input_mode == InputMode::Filter {
                    return vec![Action::CloseFilter, Action::FocusPrev];
                }
                return vec![Action::FocusPrev];
            }
            _ => {}
        }

        if s.input_mode == InputMode::Normal {
            match key.code {
                KeyCode::Char('q') => return vec![Action::Quit],
                KeyCode::Char('?') => return vec![Action::ToggleHelp],
                KeyCode::Char('K') => return vec![Action::ToggleKeys],
                KeyCode::Char('1') => return vec![Action::FocusPane(ComponentId::FrequencyCarousel)],
                KeyCode::Char('2') => return vec![Action::FocusPane(ComponentId::PlaylistGrid)],
                _ => {}
            }
        }

        // Dispatch to the focused component
        match self.focus.current() {
            Some(ComponentId::FrequencyCarousel) => self.carousel.handle_key(key, s),
            Some(ComponentId::PlaylistGrid) => self.grid.handle_key(key, s),
            _ => vec![],
        }
    }

    // ── Mouse handling ────────────────────────────────────────────────────────

    fn handle_mouse(&mut self, event: MouseEvent) -> Vec<Action> {
        let is_click = matches!(
            event.kind,
            MouseEventKind::Down(_) | MouseEventKind::ScrollUp | MouseEventKind::ScrollDown
        );
        if !is_click || self.overlay_open() {
            return vec![];
        }

        fn hit(r: Rect, col: u16, row: u16) -> bool {
            r.width > 0
                && r.height > 0
                && col >= r.x
                && col < r.x + r.width
                && row >= r.y
                && row < r.y + r.height
        }

        let areas = self.pane_areas;
        let s = &self.state;
        let (id, mut actions) = if hit(areas.carousel, event.column, event.row) {
            (
                ComponentId::FrequencyCarousel,
                self.carousel.handle_mouse(event, areas.carousel, s),
            )
        } else if hit(areas.grid, event.column, event.row) {
            (
                ComponentId::PlaylistGrid,
                self.grid.handle_mouse(event, areas.grid, s),
            )
        } else {
            return vec![];
        };
        // Focus follows the click
        if !self.focus.is_focused(id) {
            actions.insert(0, Action::FocusPane(id));
        }
        actions
    }

    fn overlay_open(&self) -> bool {
        self.help_overlay.visible
            || self.dialog.is_open()
            || self.add_playlist.visible
            || self.state.session.player_visible
    }

    // ── Action dispatcher ─────────────────────────────────────────────────────

    /// Broadcast each action to every component, then apply it. Follow-up
    /// actions from either side are queued behind it.
    async fn dispatch(&mut self, action: Action) {
        let mut queue = VecDeque::from([action]);
        let mut budget = MAX_CHAINED_ACTIONS;
        while let Some(action) = queue.pop_front() {
            if budget == 0 {
                warn!("dispatch: dropping {} chained actions", queue.len() + 1);
                break;
            }
            budget -= 1;

            let secondary: Vec<Action> = {
                let s = &self.state;
                let mut out = Vec::new();
                out.extend(self.header.on_action(&action, s));
                out.extend(self.carousel.on_action(&action, s));
                out.extend(self.grid.on_action(&action, s));
                out.extend(self.add_playlist.on_action(&action, s));
                out.extend(self.dialog.on_action(&action, s));
                out.extend(self.player.on_action(&action, s));
                out.extend(self.help_overlay.on_action(&action, s));
                out
            };

            let follow = self.apply_action(action).await;
            queue.extend(follow);
            queue.extend(secondary);
        }
    }

    async fn apply_action(&mut self, action: Action) -> Vec<Action> {
        match &action {
            Action::Noop | Action::Resize(..) => {}
            _ => debug!("apply_action: {:?}", action),
        }
        match action {
            // ── Selection ─────────────────────────────────────────────────────
            Action::SelectFrequency(idx) => match FREQUENCIES.get(idx) {
                Some(f) => {
                    self.session.select_frequency(f);
                    self.refresh_session();
                    self.push_log(format!("tuned to {} ({})", f.name, f.hz_label()));
                }
                None => warn!("SelectFrequency: index {} out of range", idx),
            },
            Action::SelectPlaylist(playlist) => {
                let url = embed_url(&playlist.youtube_url);
                info!("playing {} → {}", playlist.id, url);
                self.push_log(format!("playing {}", playlist.title));
                self.session.select_playlist(playlist);
                self.refresh_session();
                self.state.paused = false;
                self.state.input_mode = InputMode::Player;
                self.send_surface(SurfaceCommand::Load { url }).await;
            }
            Action::ClosePlayer => {
                self.session.close_player();
                self.refresh_session();
                self.state.input_mode = InputMode::Normal;
                self.send_surface(SurfaceCommand::Stop).await;
            }

            // ── Custom playlists ──────────────────────────────────────────────
            Action::OpenAddPlaylist => {
                self.state.input_mode = InputMode::Insert;
            }
            Action::CloseAddPlaylist => {
                self.state.input_mode = InputMode::Normal;
            }
            Action::SubmitPlaylist { title, url } => {
                return match self.session.add_playlist(&title, &url) {
                    Ok(playlist) => {
                        self.refresh_session();
                        self.toast.success(format!("added: {}", playlist.title));
                        vec![Action::PlaylistAdded(playlist)]
                    }
                    Err(e) => {
                        debug!("add playlist rejected: {}", e);
                        vec![Action::ShowAlert {
                            title: "Error".to_string(),
                            message: e.to_string(),
                        }]
                    }
                };
            }
            Action::PlaylistAdded(_) => {
                self.state.input_mode = InputMode::Normal;
                self.focus.set(ComponentId::PlaylistGrid);
            }
            Action::ConfirmRemove(_) => {}
            Action::RemovePlaylist(id) => {
                let title = self
                    .session
                    .custom_playlists()
                    .iter()
                    .find(|p| p.id == id)
                    .map(|p| p.title.clone());
                if self.session.remove_playlist(&id) {
                    self.refresh_session();
                    self.toast
                        .info(format!("removed: {}", title.unwrap_or(id)));
                }
            }

            // ── Dialogs ───────────────────────────────────────────────────────
            Action::ShowAlert { title, message } => {
                debug!("alert: {}: {}", title, message);
            }
            Action::DismissDialog => {}

            // ── Playback surface ──────────────────────────────────────────────
            Action::RetryLoad => {
                self.send_surface(SurfaceCommand::Reload).await;
            }
            Action::TogglePause => {
                self.send_surface(SurfaceCommand::TogglePause).await;
            }
            Action::Volume(v) => {
                self.state.volume = v.clamp(0.0, 1.0);
                self.send_surface(SurfaceCommand::Volume(self.state.volume))
                    .await;
            }
            Action::Surface(evt) => match evt {
                SurfaceEvent::Paused(p) => self.state.paused = p,
                SurfaceEvent::LoadError(desc) => {
                    self.push_log(format!("load failed: {}", desc));
                    if !self.state.session.player_visible {
                        self.toast.warning(format!("playback: {}", desc));
                    }
                }
                SurfaceEvent::LoadStarted | SurfaceEvent::LoadEnded | SurfaceEvent::Title(_) => {}
            },

            // ── Navigation ────────────────────────────────────────────────────
            Action::FocusNext => {
                self.focus.next();
            }
            Action::FocusPrev => {
                self.focus.prev();
            }
            Action::FocusPane(id) => self.focus.set(id),

            // ── Filter/search ─────────────────────────────────────────────────
            Action::OpenFilter => {
                self.state.input_mode = InputMode::Filter;
            }
            Action::CloseFilter => {
                self.state.input_mode = InputMode::Normal;
            }

            // ── UI toggles ────────────────────────────────────────────────────
            Action::ToggleHelp => {}
            Action::ToggleKeys => {
                self.state.show_keys_bar = !self.state.show_keys_bar;
            }
            Action::CopyToClipboard(text) => {
                match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(text.clone())) {
                    Ok(()) => {
                        // Truncate for toast display
                        let display = if text.chars().count() > 40 {
                            format!("{}…", text.chars().take(40).collect::<String>())
                        } else {
                            text.clone()
                        };
                        self.toast.success(format!("copied: {}", display));
                    }
                    Err(e) => {
                        warn!("clipboard error: {}", e);
                        self.toast.error(format!("clipboard error: {}", e));
                    }
                }
            }

            // ── System ────────────────────────────────────────────────────────
            Action::Quit => {
                self.should_quit = true;
            }
            Action::Resize(..) | Action::Noop => {}
        }
        vec![]
    }

    // ── Drawing ───────────────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(Style::default().bg(C_BG)), area);

        let status_h = if self.state.show_keys_bar { 1u16 } else { 0 };
        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_H),
                Constraint::Length(CAROUSEL_H),
                Constraint::Min(0),
                Constraint::Length(status_h),
            ])
            .split(area);

        self.header.draw(frame, outer[0], false, &self.state);

        let carousel_focused = self.focus.is_focused(ComponentId::FrequencyCarousel);
        self.carousel
            .draw(frame, outer[1], carousel_focused, &self.state);
        let grid_focused = self.focus.is_focused(ComponentId::PlaylistGrid);
        self.grid.draw(frame, outer[2], grid_focused, &self.state);
        self.pane_areas = PaneAreas {
            carousel: outer[1],
            grid: outer[2],
        };

        if self.state.show_keys_bar {
            status_bar::draw_keys_bar(
                frame,
                outer[3],
                self.state.input_mode,
                self.state.volume,
                self.state.paused,
            );
        }

        // ── Overlays, bottom to top ───────────────────────────────────────────
        let overlay_area = Rect {
            height: area.height.saturating_sub(status_h),
            ..area
        };
        self.player.draw(frame, overlay_area, true, &self.state);
        self.add_playlist.draw(frame, area, true, &self.state);
        self.dialog.draw(frame, area, true, &self.state);
        self.help_overlay.draw(frame, area, false, &self.state);

        // ── Toast notifications (topmost layer) ──────────────────────────────
        self.toast.draw(frame, area);
    }

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn refresh_session(&mut self) {
        self.state.session = self.session.snapshot();
    }

    async fn send_surface(&self, cmd: SurfaceCommand) {
        if self.surface_tx.send(SurfaceInput::Command(cmd)).await.is_err() {
            warn!("surface task is gone; command dropped");
        }
    }

    fn push_log(&mut self, msg: String) {
        let stamp = chrono::Local::now().format("%H:%M:%S");
        self.state.logs.push(format!("{} {}", stamp, msg));
        if self.state.logs.len() > MAX_LOG_LINES {
            self.state.logs.remove(0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sleep_core::store::PlaylistStore;
    use tempfile::TempDir;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app_in(dir: &TempDir) -> (App, mpsc::Receiver<SurfaceInput>) {
        let store = PlaylistStore::at(dir.path().join("storage.json"));
        let session = Session::new(store, Vec::new());
        let (surface_tx, surface_rx) = mpsc::channel(64);
        (App::new(session, Config::default(), surface_tx), surface_rx)
    }

    async fn press(app: &mut App, code: KeyCode) {
        for a in app.handle_key(key(code)) {
            app.dispatch(a).await;
        }
    }

    async fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c)).await;
        }
    }

    #[tokio::test]
    async fn invalid_url_raises_alert_and_keeps_modal() {
        let dir = TempDir::new().unwrap();
        let (mut app, _rx) = app_in(&dir);
        press(&mut app, KeyCode::Tab).await; // focus playlists
        press(&mut app, KeyCode::Char('a')).await;
        assert!(app.add_playlist.visible);
        assert_eq!(app.state.input_mode, InputMode::Insert);

        type_str(&mut app, "My Sound").await;
        press(&mut app, KeyCode::Tab).await;
        type_str(&mut app, "not-a-url").await;
        press(&mut app, KeyCode::Enter).await;

        assert!(app.dialog.is_open());
        assert!(app.add_playlist.visible);
        assert!(app.state.session.custom_playlists.is_empty());

        // Dismiss the alert; the modal is still there underneath
        press(&mut app, KeyCode::Enter).await;
        assert!(!app.dialog.is_open());
        assert!(app.add_playlist.visible);
    }

    #[tokio::test]
    async fn valid_submit_adds_persists_and_closes() {
        let dir = TempDir::new().unwrap();
        let (mut app, _rx) = app_in(&dir);
        app.dispatch(Action::OpenAddPlaylist).await;
        type_str(&mut app, "Night Rain").await;
        press(&mut app, KeyCode::Tab).await;
        type_str(&mut app, "https://youtu.be/abc123").await;
        press(&mut app, KeyCode::Enter).await;

        assert!(!app.add_playlist.visible);
        assert!(!app.dialog.is_open());
        assert_eq!(app.state.input_mode, InputMode::Normal);
        assert_eq!(app.state.session.custom_playlists.len(), 1);

        app.session.flush().await;
        let stored = PlaylistStore::at(dir.path().join("storage.json")).load().await;
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].title, "Night Rain");
    }

    #[tokio::test]
    async fn selecting_a_playlist_loads_embed_url() {
        let dir = TempDir::new().unwrap();
        let (mut app, mut rx) = app_in(&dir);
        press(&mut app, KeyCode::Char('2')).await;
        press(&mut app, KeyCode::Enter).await;

        assert!(app.state.session.player_visible);
        assert_eq!(app.state.input_mode, InputMode::Player);
        match rx.try_recv() {
            Ok(SurfaceInput::Command(SurfaceCommand::Load { url })) => {
                assert!(url.starts_with("https://www.youtube.com/embed/1ZYbU82GVz4?"));
            }
            other => panic!("expected Load, got {:?}", other),
        }

        // q closes the player rather than quitting
        press(&mut app, KeyCode::Char('q')).await;
        assert!(!app.should_quit);
        assert!(!app.state.session.player_visible);
        assert!(matches!(
            rx.try_recv(),
            Ok(SurfaceInput::Command(SurfaceCommand::Stop))
        ));
    }

    #[tokio::test]
    async fn confirm_dialog_removes_custom_playlist() {
        let dir = TempDir::new().unwrap();
        let (mut app, _rx) = app_in(&dir);
        app.dispatch(Action::SubmitPlaylist {
            title: "Mine".into(),
            url: "https://www.youtube.com/watch?v=zzz".into(),
        })
        .await;
        let added = app.state.session.custom_playlists[0].clone();

        app.dispatch(Action::ConfirmRemove(added)).await;
        assert!(app.dialog.is_open());
        press(&mut app, KeyCode::Char('y')).await;

        assert!(!app.dialog.is_open());
        assert!(app.state.session.custom_playlists.is_empty());
    }

    #[tokio::test]
    async fn carousel_enter_changes_header_frequency() {
        let dir = TempDir::new().unwrap();
        let (mut app, _rx) = app_in(&dir);
        press(&mut app, KeyCode::Right).await;
        press(&mut app, KeyCode::Enter).await;
        assert_eq!(app.state.selected_frequency().map(|f| f.id), Some("deep-theta"));
    }

    #[tokio::test]
    async fn load_error_reaches_overlay() {
        let dir = TempDir::new().unwrap();
        let (mut app, _rx) = app_in(&dir);
        let first = app.state.session.default_playlists[0].clone();
        app.dispatch(Action::SelectPlaylist(first)).await;
        assert!(app.player.loading);
        app.handle_message(AppMessage::Surface(SurfaceEvent::LoadError(
            "mpv not found".into(),
        )))
        .await;
        assert_eq!(app.player.error.as_deref(), Some("mpv not found"));

        press(&mut app, KeyCode::Char('r')).await;
        assert!(app.player.loading);
        assert!(app.player.error.is_none());
    }
}
