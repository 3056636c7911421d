//! PaneChrome: the bordered frame around the two focusable panes.
//!
//! The title carries the digit that jumps to the pane (`[1] frequency`,
//! `[2] playlists`), and the playlists pane can show a count badge on the
//! right of its top border.

use crate::action::ComponentId;
use crate::theme::{
    style_focused_border, style_unfocused_border, C_MUTED, C_NUMBER_HINT, C_PRIMARY,
};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders},
};

/// Right-aligned note on the top border, e.g. "3 custom".
pub struct Badge<'a> {
    pub text: &'a str,
    pub color: Color,
}

/// Jump key and label for a pane. Overlays have no chrome.
pub fn pane_heading(pane: ComponentId) -> Option<(char, &'static str)> {
    match pane {
        ComponentId::FrequencyCarousel => Some(('1', "frequency")),
        ComponentId::PlaylistGrid => Some(('2', "playlists")),
        _ => None,
    }
}

fn heading_line(pane: ComponentId, focused: bool) -> Line<'static> {
    let label_style = if focused {
        Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(C_MUTED)
    };
    match pane_heading(pane) {
        Some((key, label)) => Line::from(vec![
            Span::styled(format!("[{}] ", key), Style::default().fg(C_NUMBER_HINT)),
            Span::styled(label, label_style),
        ]),
        None => Line::default(),
    }
}

pub fn pane_chrome<'a>(pane: ComponentId, focused: bool, badge: Option<Badge<'a>>) -> Block<'a> {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if focused {
            style_focused_border()
        } else {
            style_unfocused_border()
        })
        .title(heading_line(pane, focused));

    match badge {
        Some(b) => block.title_top(
            Line::from(Span::styled(
                format!(" {} ", b.text),
                Style::default().fg(b.color).add_modifier(Modifier::BOLD),
            ))
            .right_aligned(),
        ),
        None => block,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headings_match_focus_shortcuts() {
        assert_eq!(pane_heading(ComponentId::FrequencyCarousel), Some(('1', "frequency")));
        assert_eq!(pane_heading(ComponentId::PlaylistGrid), Some(('2', "playlists")));
        assert_eq!(pane_heading(ComponentId::PlayerOverlay), None);
    }

    #[test]
    fn heading_line_shows_jump_key() {
        let line = heading_line(ComponentId::PlaylistGrid, true);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "[2] playlists");
    }
}
