//! AddPlaylist: modal form for a custom YouTube playlist.
//!
//! Validation happens in the session. A rejected submit leaves the modal
//! open with the fields intact; `PlaylistAdded` clears and closes it.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{style_muted, style_secondary, C_ACCENT, C_PRIMARY},
    widgets::{
        popup::{centered_rect, popup_block},
        text_field::TextField,
    },
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Field {
    Title,
    Url,
}

pub struct AddPlaylist {
    pub visible: bool,
    pub focus: Field,
    title: TextField,
    url: TextField,
}

impl AddPlaylist {
    pub fn new() -> Self {
        Self {
            visible: false,
            focus: Field::Title,
            title: TextField::new("", "e.g. Late Night Rain"),
            url: TextField::new("", "https://www.youtube.com/watch?v=…"),
        }
    }

    fn open(&mut self) {
        self.visible = true;
        self.set_focus(Field::Title);
    }

    fn close(&mut self) {
        self.visible = false;
        self.title.deactivate();
        self.url.deactivate();
    }

    fn reset(&mut self) {
        self.title.clear();
        self.url.clear();
        self.set_focus(Field::Title);
    }

    fn set_focus(&mut self, field: Field) {
        self.focus = field;
        match field {
            Field::Title => {
                self.title.activate();
                self.url.deactivate();
            }
            Field::Url => {
                self.url.activate();
                self.title.deactivate();
            }
        }
    }

    fn toggle_focus(&mut self) {
        self.set_focus(match self.focus {
            Field::Title => Field::Url,
            Field::Url => Field::Title,
        });
    }

    fn focused_field(&mut self) -> &mut TextField {
        match self.focus {
            Field::Title => &mut self.title,
            Field::Url => &mut self.url,
        }
    }

    pub fn title_text(&self) -> &str {
        self.title.text()
    }

    pub fn url_text(&self) -> &str {
        self.url.text()
    }
}

impl Component for AddPlaylist {
    fn id(&self) -> ComponentId {
        ComponentId::AddPlaylist
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release || !self.visible {
            return vec![];
        }
        match key.code {
            KeyCode::Esc => return vec![Action::CloseAddPlaylist],
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => self.toggle_focus(),
            KeyCode::Enter => {
                return vec![Action::SubmitPlaylist {
                    title: self.title.text().to_string(),
                    url: self.url.text().to_string(),
                }];
            }
            _ => self.focused_field().edit(key),
        }
        vec![]
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        match action {
            Action::OpenAddPlaylist => self.open(),
            Action::CloseAddPlaylist => self.close(),
            Action::PlaylistAdded(_) => {
                self.reset();
                self.close();
            }
            _ => {}
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, _state: &AppState) {
        if !self.visible {
            return;
        }
        let popup = centered_rect(60, 11, area);
        frame.render_widget(Clear, popup);
        let block = popup_block("Add YouTube Playlist", C_ACCENT);
        let inner = block.inner(popup);
        frame.render_widget(block, popup);
        if inner.height < 7 {
            return;
        }

        let row = |dy: u16| Rect {
            x: inner.x + 1,
            y: inner.y + dy,
            width: inner.width.saturating_sub(2),
            height: 1,
        };
        let label = |text: &'static str, field: Field, focus: Field| {
            let style = if field == focus {
                Style::default().fg(C_PRIMARY)
            } else {
                style_secondary()
            };
            Paragraph::new(Span::styled(text, style))
        };

        frame.render_widget(label("Title", Field::Title, self.focus), row(0));
        self.title.draw(frame, row(1));
        frame.render_widget(label("YouTube URL", Field::Url, self.focus), row(3));
        self.url.draw(frame, row(4));
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("Tab", Style::default().fg(C_ACCENT)),
                Span::styled(" switch field  ", style_muted()),
                Span::styled("Enter", Style::default().fg(C_ACCENT)),
                Span::styled(" add  ", style_muted()),
                Span::styled("Esc", Style::default().fg(C_ACCENT)),
                Span::styled(" cancel", style_muted()),
            ])),
            row(6),
        );
    }
}
