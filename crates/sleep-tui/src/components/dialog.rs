//! Dialog: blocking alert or remove confirmation.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph, Wrap},
    Frame,
};

use sleep_core::catalog::Playlist;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{style_default, style_muted, C_ERROR, C_PANEL_BORDER, C_SELECTION_BG},
    widgets::popup::{centered_rect, popup_block},
};

#[derive(Debug, Clone, PartialEq)]
pub enum DialogKind {
    Alert { title: String, message: String },
    ConfirmRemove(Playlist),
}

pub struct Dialog {
    pub current: Option<DialogKind>,
    /// Confirm only: true when "Remove" is highlighted.
    pub on_remove: bool,
}

impl Dialog {
    pub fn new() -> Self {
        Self {
            current: None,
            on_remove: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    fn confirm_choice(&self) -> Vec<Action> {
        match &self.current {
            Some(DialogKind::ConfirmRemove(p)) if self.on_remove => vec![
                Action::RemovePlaylist(p.id.clone()),
                Action::DismissDialog,
            ],
            _ => vec![Action::DismissDialog],
        }
    }
}

impl Component for Dialog {
    fn id(&self) -> ComponentId {
        ComponentId::Dialog
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release || self.current.is_none() {
            return vec![];
        }
        let confirming = matches!(self.current, Some(DialogKind::ConfirmRemove(_)));
        match key.code {
            KeyCode::Esc | KeyCode::Char('n') => return vec![Action::DismissDialog],
            KeyCode::Enter | KeyCode::Char(' ') => return self.confirm_choice(),
            KeyCode::Char('y') if confirming => {
                self.on_remove = true;
                return self.confirm_choice();
            }
            KeyCode::Left
            | KeyCode::Right
            | KeyCode::Tab
            | KeyCode::BackTab
            | KeyCode::Char('h')
            | KeyCode::Char('l')
                if confirming =>
            {
                self.on_remove = !self.on_remove;
            }
            _ => {}
        }
        // Blocking: swallow everything else
        vec![]
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        match action {
            Action::ShowAlert { title, message } => {
                self.current = Some(DialogKind::Alert {
                    title: title.clone(),
                    message: message.clone(),
                });
            }
            Action::ConfirmRemove(p) => {
                self.current = Some(DialogKind::ConfirmRemove(p.clone()));
                self.on_remove = false;
            }
            Action::DismissDialog => {
                self.current = None;
                self.on_remove = false;
            }
            _ => {}
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, _state: &AppState) {
        let Some(kind) = &self.current else {
            return;
        };

        let button = |label: &'static str, active: bool, color: Color| {
            let style = if active {
                Style::default()
                    .fg(color)
                    .bg(C_SELECTION_BG)
                    .add_modifier(Modifier::BOLD)
            } else {
                style_muted()
            };
            Span::styled(format!(" {} ", label), style)
        };

        let (title, border, lines) = match kind {
            DialogKind::Alert { title, message } => (
                title.as_str(),
                C_ERROR,
                vec![
                    Line::from(""),
                    Line::from(Span::styled(format!(" {}", message), style_default())),
                    Line::from(""),
                    Line::from(vec![Span::raw(" "), button("OK", true, C_PANEL_BORDER)]),
                ],
            ),
            DialogKind::ConfirmRemove(p) => (
                "Remove Playlist",
                C_PANEL_BORDER,
                vec![
                    Line::from(""),
                    Line::from(Span::styled(
                        format!(" Remove \"{}\" from your playlists?", p.title),
                        style_default(),
                    )),
                    Line::from(""),
                    Line::from(vec![
                        Span::raw(" "),
                        button("Cancel", !self.on_remove, C_PANEL_BORDER),
                        Span::raw("  "),
                        button("Remove", self.on_remove, C_ERROR),
                    ]),
                ],
            ),
        };

        let popup = centered_rect(50, 7, area);
        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(lines)
                .block(popup_block(title, border))
                .wrap(Wrap { trim: false }),
            popup,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{app_state, custom_playlist};
    use ratatui::crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn alert_is_dismissed_by_enter() {
        let state = app_state();
        let mut dialog = Dialog::new();
        dialog.on_action(
            &Action::ShowAlert {
                title: "Error".into(),
                message: "Invalid YouTube URL".into(),
            },
            &state,
        );
        assert!(dialog.is_open());
        assert!(dialog.handle_key(key(KeyCode::Char('x')), &state).is_empty());
        let actions = dialog.handle_key(key(KeyCode::Enter), &state);
        assert!(matches!(actions.as_slice(), [Action::DismissDialog]));
    }

    #[test]
    fn confirm_defaults_to_cancel() {
        let state = app_state();
        let mut dialog = Dialog::new();
        dialog.on_action(&Action::ConfirmRemove(custom_playlist("custom-1", "Night")), &state);
        let actions = dialog.handle_key(key(KeyCode::Enter), &state);
        assert!(matches!(actions.as_slice(), [Action::DismissDialog]));
    }

    #[test]
    fn confirm_remove_emits_playlist_id() {
        let state = app_state();
        let mut dialog = Dialog::new();
        dialog.on_action(&Action::ConfirmRemove(custom_playlist("custom-1", "Night")), &state);
        dialog.handle_key(key(KeyCode::Right), &state);
        let actions = dialog.handle_key(key(KeyCode::Enter), &state);
        assert!(matches!(
            actions.as_slice(),
            [Action::RemovePlaylist(id), Action::DismissDialog] if id == "custom-1"
        ));
        dialog.on_action(&Action::DismissDialog, &state);
        assert!(!dialog.is_open());
    }
}
