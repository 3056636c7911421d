//! TextField: wraps tui-input for the list filter bar and the form fields.

use ratatui::crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tui_input::{backend::crossterm::EventHandler, Input};

use crate::theme::{C_FILTER_BG, C_FILTER_FG, C_MUTED, C_PRIMARY};

pub enum FilterAction {
    Changed(String),
    Confirmed,
    Cancelled,
}

pub struct TextField {
    input: Input,
    pub active: bool,
    prefix: &'static str,
    placeholder: String,
}

impl TextField {
    pub fn new(prefix: &'static str, placeholder: impl Into<String>) -> Self {
        Self {
            input: Input::default(),
            active: false,
            prefix,
            placeholder: placeholder.into(),
        }
    }

    /// A `/`-prefixed filter bar.
    pub fn filter(placeholder: impl Into<String>) -> Self {
        Self::new("/ ", placeholder)
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn clear(&mut self) {
        self.input = Input::default();
    }

    pub fn text(&self) -> &str {
        self.input.value()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Feed a key straight to the editor (typing, backspace, cursor moves).
    pub fn edit(&mut self, key: KeyEvent) {
        self.input.handle_event(&Event::Key(key));
    }

    /// Filter-bar key handling.
    ///
    /// Esc clears the text first; a second Esc on an empty bar closes it.
    pub fn handle_key(&mut self, key: KeyEvent) -> FilterAction {
        match key.code {
            KeyCode::Esc => {
                if !self.input.value().is_empty() {
                    self.clear();
                    FilterAction::Changed(String::new())
                } else {
                    self.deactivate();
                    FilterAction::Cancelled
                }
            }
            KeyCode::Enter => {
                self.deactivate();
                FilterAction::Confirmed
            }
            _ => {
                self.edit(key);
                FilterAction::Changed(self.input.value().to_string())
            }
        }
    }

    /// Render into a one-row `area`. The cursor is placed only while active.
    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let prefix_w = self.prefix.chars().count();
        let scroll = self
            .input
            .visual_scroll((area.width as usize).saturating_sub(prefix_w + 1));
        let value = self.input.value();
        let display = if value.is_empty() {
            Span::styled(
                format!("{}{}", self.prefix, self.placeholder),
                Style::default().fg(C_MUTED),
            )
        } else {
            let visible: String = value.chars().skip(scroll).collect();
            let fg = if self.prefix.starts_with('/') {
                C_FILTER_FG
            } else {
                C_PRIMARY
            };
            Span::styled(format!("{}{}", self.prefix, visible), Style::default().fg(fg))
        };

        let paragraph =
            Paragraph::new(Line::from(vec![display])).style(Style::default().bg(C_FILTER_BG));
        frame.render_widget(paragraph, area);

        if self.active {
            let offset = (prefix_w + self.input.visual_cursor().saturating_sub(scroll)) as u16;
            let cursor_x = (area.x + offset).min(area.x + area.width - 1);
            frame.set_cursor_position((cursor_x, area.y));
        }
    }
}
