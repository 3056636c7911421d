//! FrequencyCarousel: horizontal strip of brainwave frequency cards.
//!
//! The cursor is local; `Enter` turns it into the session selection.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use sleep_core::catalog::{Frequency, FREQUENCIES};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{hex_color, style_muted, style_secondary, C_MUTED, C_PRIMARY, C_SELECTION_BG},
    widgets::{
        pane_chrome::pane_chrome,
        text::{fit_width, wrap_lines},
    },
};

const CARD_WIDTH: u16 = 24;
const CARD_HEIGHT: u16 = 6;

pub struct FrequencyCarousel {
    pub cursor: usize,
    /// Index of the first card drawn.
    offset: usize,
    /// Card rects from the last draw, for mouse hit-testing.
    card_areas: Vec<(usize, Rect)>,
}

impl FrequencyCarousel {
    pub fn new(state: &AppState) -> Self {
        Self {
            cursor: state.selected_frequency_index().unwrap_or(0),
            offset: 0,
            card_areas: Vec::new(),
        }
    }

    fn frequencies(&self) -> &'static [Frequency] {
        FREQUENCIES
    }

    fn move_by(&mut self, delta: isize) {
        let last = self.frequencies().len().saturating_sub(1) as isize;
        self.cursor = (self.cursor as isize + delta).clamp(0, last) as usize;
    }

    /// Keep the cursor inside a window of `visible` cards.
    fn ensure_visible(&mut self, visible: usize) {
        if visible == 0 {
            return;
        }
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + visible {
            self.offset = self.cursor + 1 - visible;
        }
    }

    fn draw_card(&self, frame: &mut Frame, area: Rect, f: &Frequency, is_cursor: bool, is_selected: bool) {
        let accent = hex_color(f.color);
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(if is_selected {
                BorderType::Thick
            } else {
                BorderType::Rounded
            })
            .border_style(if is_cursor || is_selected {
                Style::default().fg(accent)
            } else {
                style_muted()
            });
        if is_selected {
            block = block.title_top(
                Line::from(Span::styled(
                    " Selected ",
                    Style::default().fg(accent).add_modifier(Modifier::BOLD),
                ))
                .right_aligned(),
            );
        }
        if is_cursor {
            block = block.style(Style::default().bg(C_SELECTION_BG));
        }
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let w = inner.width as usize;
        let mut lines = vec![
            Line::from(vec![
                Span::raw(format!("{} ", f.icon)),
                Span::styled(
                    f.hz_label(),
                    Style::default().fg(accent).add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(Span::styled(
                fit_width(f.name, w),
                Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
            )),
        ];
        let desc_rows = (inner.height as usize).saturating_sub(lines.len());
        for row in wrap_lines(f.description, w, desc_rows) {
            lines.push(Line::from(Span::styled(row, style_secondary())));
        }
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

impl Component for FrequencyCarousel {
    fn id(&self) -> ComponentId {
        ComponentId::FrequencyCarousel
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => self.move_by(-1),
            KeyCode::Right | KeyCode::Char('l') => self.move_by(1),
            KeyCode::Home | KeyCode::Char('g') => self.cursor = 0,
            KeyCode::End | KeyCode::Char('G') => self.move_by(isize::MAX / 2),
            KeyCode::Enter | KeyCode::Char(' ') => {
                return vec![Action::SelectFrequency(self.cursor)];
            }
            _ => {}
        }
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, _state: &AppState) -> Vec<Action> {
        match event.kind {
            MouseEventKind::ScrollUp => self.move_by(-1),
            MouseEventKind::ScrollDown => self.move_by(1),
            MouseEventKind::Down(MouseButton::Left) => {
                let hit = self.card_areas.iter().find(|(_, r)| {
                    event.column >= r.x
                        && event.column < r.x + r.width
                        && event.row >= r.y
                        && event.row < r.y + r.height
                });
                if let Some(&(idx, _)) = hit {
                    self.cursor = idx;
                    return vec![Action::SelectFrequency(idx)];
                }
            }
            _ => {}
        }
        vec![]
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        if let Action::SelectFrequency(idx) = action {
            if *idx < self.frequencies().len() {
                self.cursor = *idx;
            }
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let block = pane_chrome(ComponentId::FrequencyCarousel, focused, None);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        self.card_areas.clear();
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let visible = (inner.width / CARD_WIDTH).max(1) as usize;
        self.ensure_visible(visible);
        let selected = state.selected_frequency_index();
        let card_h = CARD_HEIGHT.min(inner.height);

        let frequencies = self.frequencies();
        for (slot, idx) in (self.offset..frequencies.len()).take(visible).enumerate() {
            let card = Rect {
                x: inner.x + slot as u16 * CARD_WIDTH,
                y: inner.y,
                width: CARD_WIDTH.min(inner.width),
                height: card_h,
            };
            self.draw_card(
                frame,
                card,
                &frequencies[idx],
                idx == self.cursor,
                Some(idx) == selected,
            );
            self.card_areas.push((idx, card));
        }

        // Scroll hints when cards are off-screen
        if self.offset > 0 {
            frame.render_widget(
                Paragraph::new(Span::styled("‹", style_muted())),
                Rect { width: 1, height: 1, ..inner },
            );
        }
        if self.offset + visible < frequencies.len() {
            frame.render_widget(
                Paragraph::new(Span::styled("›", style_muted())),
                Rect {
                    x: inner.x + inner.width - 1,
                    width: 1,
                    height: 1,
                    ..inner
                },
            );
        }

        // Benefits of the selected frequency under the strip
        if inner.height > card_h {
            if let Some(f) = state.selected_frequency() {
                let mut spans = vec![Span::styled(" benefits  ", Style::default().fg(C_MUTED))];
                for (i, benefit) in f.benefits.iter().enumerate() {
                    if i > 0 {
                        spans.push(Span::styled(" · ", style_muted()));
                    }
                    spans.push(Span::styled(*benefit, Style::default().fg(hex_color(f.color))));
                }
                let row = Rect {
                    y: inner.y + card_h,
                    height: 1,
                    ..inner
                };
                frame.render_widget(Paragraph::new(Line::from(spans)), row);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::app_state;
    use ratatui::crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn cursor_moves_and_clamps() {
        let state = app_state();
        let mut carousel = FrequencyCarousel::new(&state);
        assert_eq!(carousel.cursor, 0);
        carousel.handle_key(key(KeyCode::Left), &state);
        assert_eq!(carousel.cursor, 0);
        carousel.handle_key(key(KeyCode::Right), &state);
        carousel.handle_key(key(KeyCode::Right), &state);
        assert_eq!(carousel.cursor, 2);
        carousel.handle_key(key(KeyCode::End), &state);
        assert_eq!(carousel.cursor, FREQUENCIES.len() - 1);
        carousel.handle_key(key(KeyCode::Right), &state);
        assert_eq!(carousel.cursor, FREQUENCIES.len() - 1);
    }

    #[test]
    fn enter_selects_the_cursor() {
        let state = app_state();
        let mut carousel = FrequencyCarousel::new(&state);
        carousel.handle_key(key(KeyCode::Right), &state);
        let actions = carousel.handle_key(key(KeyCode::Enter), &state);
        assert!(matches!(actions.as_slice(), [Action::SelectFrequency(1)]));
    }

    #[test]
    fn window_follows_cursor() {
        let state = app_state();
        let mut carousel = FrequencyCarousel::new(&state);
        carousel.cursor = 5;
        carousel.ensure_visible(3);
        assert_eq!(carousel.offset, 3);
        carousel.cursor = 1;
        carousel.ensure_visible(3);
        assert_eq!(carousel.offset, 1);
    }
}
