//! Status bar: bottom line with input mode, volume and keybindings.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme::{
    C_LOADING, C_MODE_FILTER, C_MODE_INSERT, C_MODE_NORMAL, C_MODE_PLAYER, C_MUTED, C_SECONDARY,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,
    Filter,
    /// Typing into the add-playlist form.
    Insert,
    /// Player overlay is open.
    Player,
}

impl InputMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Filter => "FILTER",
            Self::Insert => "INSERT",
            Self::Player => "PLAYER",
        }
    }

    pub fn color(self) -> Color {
        match self {
            Self::Normal => C_MODE_NORMAL,
            Self::Filter => C_MODE_FILTER,
            Self::Insert => C_MODE_INSERT,
            Self::Player => C_MODE_PLAYER,
        }
    }

    fn keys(self) -> &'static str {
        match self {
            Self::Normal => {
                " ←→ frequency  Enter select  Tab pane  [ ] tabs  a add  d remove  y copy  / filter  K keys  ? help  q quit"
            }
            Self::Filter => " type to filter  ↑↓ move  Enter keep  Esc clear+close",
            Self::Insert => " Tab next field  Enter add  Esc cancel",
            Self::Player => " Space pause  +/- volume  r retry  Esc/q close",
        }
    }
}

/// Draw the keybindings footer bar (one row).
pub fn draw_keys_bar(frame: &mut Frame, area: Rect, mode: InputMode, volume: f32, paused: bool) {
    let mut spans = vec![Span::styled(
        format!(" {} ", mode.label()),
        Style::default().fg(mode.color()).add_modifier(Modifier::BOLD),
    )];

    if mode == InputMode::Player {
        let (icon, color) = if paused {
            ("⏸", C_LOADING)
        } else {
            ("▶", C_MODE_PLAYER)
        };
        spans.push(Span::styled(icon, Style::default().fg(color)));
        spans.push(Span::styled(
            format!(" {:>3}%", (volume * 100.0).round() as i64),
            Style::default().fg(C_SECONDARY),
        ));
    }

    spans.push(Span::raw(" "));
    spans.push(Span::styled(mode.keys(), Style::default().fg(C_MUTED)));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
