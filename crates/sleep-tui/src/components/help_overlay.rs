//! HelpOverlay component: centered popup with keyboard shortcut reference.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph, Wrap},
    Frame,
};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{C_MUTED, C_PANEL_BORDER, C_PRIMARY, C_SECONDARY},
    widgets::popup::{centered_rect, popup_block},
};

/// Recent log lines shown at the bottom of the popup.
const LOG_TAIL: usize = 4;

pub struct HelpOverlay {
    pub visible: bool,
}

impl HelpOverlay {
    pub fn new() -> Self {
        Self { visible: false }
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }
}

impl Component for HelpOverlay {
    fn id(&self) -> ComponentId {
        ComponentId::HelpOverlay
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release || !self.visible {
            return vec![];
        }
        match key.code {
            KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::Esc => {
                return vec![Action::ToggleHelp];
            }
            _ => {}
        }
        // Consume all keys while overlay is open
        vec![]
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        match action {
            Action::ToggleHelp => self.toggle(),
            Action::Quit => self.hide(),
            _ => {}
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, state: &AppState) {
        if !self.visible {
            return;
        }

        let popup = centered_rect(68, 36, area);

        let mut help_lines: Vec<Line> = vec![
            section(" frequencies"),
            help_row("← / →  or  h / l", "move between frequency cards"),
            help_row("enter / space", "make the card the active frequency"),
            Line::from(""),
            section(" playlists"),
            help_row("↑ / ↓  or  j / k", "move selection"),
            help_row("[ / ]", "previous / next category tab"),
            help_row("enter", "open in the player"),
            help_row("a", "add a YouTube playlist"),
            help_row("d / delete", "remove a custom playlist"),
            help_row("y", "copy the YouTube URL"),
            help_row("/", "open filter (Esc clears + closes)"),
            Line::from(""),
            section(" player"),
            help_row("space", "pause / resume"),
            help_row("- / +", "volume down / up"),
            help_row("r", "retry after a load error"),
            help_row("esc / q", "close the player and stop"),
            Line::from(""),
            section(" panes & ui"),
            help_row("tab / shift-tab", "focus next / previous pane"),
            help_row("1 / 2", "focus frequencies / playlists"),
            help_row("K", "toggle keys bar"),
            help_row("?", "toggle this help overlay"),
            help_row("q / Ctrl+C", "quit"),
        ];

        if !state.logs.is_empty() {
            help_lines.push(Line::from(""));
            help_lines.push(section(" recent log"));
            let start = state.logs.len().saturating_sub(LOG_TAIL);
            for line in &state.logs[start..] {
                help_lines.push(Line::from(Span::styled(
                    format!(" {}", line),
                    Style::default().fg(C_MUTED),
                )));
            }
        }

        help_lines.push(Line::from(""));
        help_lines.push(Line::from(Span::styled(
            " press ? or esc to close",
            Style::default().fg(C_MUTED),
        )));

        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(help_lines)
                .block(popup_block("keyboard shortcuts", C_PANEL_BORDER))
                .wrap(Wrap { trim: false }),
            popup,
        );
    }
}

fn section(title: &str) -> Line<'_> {
    Line::from(Span::styled(
        title,
        Style::default().fg(C_MUTED).add_modifier(Modifier::BOLD),
    ))
}

fn help_row<'a>(key: &'a str, desc: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::raw(" "),
        Span::styled(
            format!("{:<18}", key),
            Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
        ),
        Span::styled(desc, Style::default().fg(C_SECONDARY)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::app_state;
    use ratatui::crossterm::event::KeyModifiers;

    #[test]
    fn closing_keys_emit_toggle() {
        let state = app_state();
        let mut help = HelpOverlay::new();
        help.on_action(&Action::ToggleHelp, &state);
        assert!(help.visible);

        let swallowed = help.handle_key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE), &state);
        assert!(swallowed.is_empty());

        let actions = help.handle_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE), &state);
        assert!(matches!(actions.as_slice(), [Action::ToggleHelp]));
        help.on_action(&Action::ToggleHelp, &state);
        assert!(!help.visible);
    }
}
