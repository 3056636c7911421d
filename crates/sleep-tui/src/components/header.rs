//! Header component: 2-row top bar.
//!
//! Row 1: time-of-day greeting and the app title.
//! Row 2: the active frequency as `<hz> Hz - <name>`.
//!
//! Not focusable.

use chrono::Timelike;
use ratatui::crossterm::event::KeyEvent;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};

use sleep_core::catalog::Frequency;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{hex_color, C_MUTED, C_PRIMARY, C_SECONDARY},
};

pub const APP_TITLE: &str = "Sound Sleep";

/// Greeting for a local hour (0–23).
pub fn greeting(hour: u32) -> &'static str {
    if hour < 12 {
        "Good Morning"
    } else if hour < 18 {
        "Good Afternoon"
    } else {
        "Good Evening"
    }
}

/// `"7.83 Hz - Schumann Resonance"`.
pub fn active_frequency_line(frequency: &Frequency) -> String {
    format!("{} - {}", frequency.hz_label(), frequency.name)
}

pub struct Header;

impl Header {
    pub fn new() -> Self {
        Self
    }
}

impl Component for Header {
    fn id(&self) -> ComponentId {
        ComponentId::Header
    }

    fn handle_key(&mut self, _key: KeyEvent, _state: &AppState) -> Vec<Action> {
        vec![]
    }

    fn on_action(&mut self, _action: &Action, _state: &AppState) -> Vec<Action> {
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, state: &AppState) {
        let hour = chrono::Local::now().hour();
        let row1 = Line::from(vec![
            Span::styled(format!(" {}  ", greeting(hour)), Style::default().fg(C_SECONDARY)),
            Span::styled(
                APP_TITLE,
                Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
            ),
        ]);

        let row2 = match state.selected_frequency() {
            Some(f) => Line::from(vec![
                Span::raw(format!(" {} ", f.icon)),
                Span::styled(
                    active_frequency_line(f),
                    Style::default()
                        .fg(hex_color(f.color))
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            None => Line::from(Span::styled(
                " choose a frequency below",
                Style::default().fg(C_MUTED),
            )),
        };

        frame.render_widget(Clear, area);
        if area.height < 2 {
            frame.render_widget(Paragraph::new(row1), area);
            return;
        }
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(area);
        frame.render_widget(Paragraph::new(row1), rows[0]);
        frame.render_widget(Paragraph::new(row2), rows[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sleep_core::catalog::FREQUENCIES;

    #[test]
    fn greeting_thresholds() {
        assert_eq!(greeting(0), "Good Morning");
        assert_eq!(greeting(11), "Good Morning");
        assert_eq!(greeting(12), "Good Afternoon");
        assert_eq!(greeting(17), "Good Afternoon");
        assert_eq!(greeting(18), "Good Evening");
        assert_eq!(greeting(23), "Good Evening");
    }

    #[test]
    fn frequency_line() {
        assert_eq!(active_frequency_line(&FREQUENCIES[0]), "7.83 Hz - Schumann Resonance");
        assert_eq!(active_frequency_line(&FREQUENCIES[5]), "528 Hz - Healing");
    }
}
