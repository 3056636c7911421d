//! PlaylistGrid component: category tabs over the merged playlist list.

use std::time::Instant;

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};

use sleep_core::catalog::{Category, Playlist};
use unicode_width::UnicodeWidthStr;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{
        hex_color, style_default, style_muted, style_secondary, style_selected_focused,
        C_BADGE_CUSTOM, C_MUTED, C_NUMBER_HINT, C_SELECTION_BG,
    },
    widgets::{
        pane_chrome::{pane_chrome, Badge},
        scrollable_list::ScrollableList,
        text::fit_width,
        text_field::{FilterAction, TextField},
    },
};

pub const EMPTY_CATEGORY: &str = "No playlists in this category";

/// Tab 0 is "All"; tabs 1.. follow `Category::ALL`.
const TAB_COUNT: usize = Category::ALL.len() + 1;

pub struct PlaylistGrid {
    pub list: ScrollableList<Playlist>,
    pub filter_input: TextField,
    pub tab: usize,
    list_state: ListState,
    /// Row of the tab strip from the last draw, for clicks.
    tab_spans: Vec<(usize, u16, u16)>,
    last_click: Option<(usize, Instant)>,
}

impl PlaylistGrid {
    pub fn new(state: &AppState) -> Self {
        let mut grid = Self {
            list: ScrollableList::new(|p: &Playlist, q: &str| playlist_matches(p, q)),
            filter_input: TextField::filter("title, description, category…"),
            tab: 0,
            list_state: ListState::default(),
            tab_spans: Vec::new(),
            last_click: None,
        };
        grid.sync(state);
        grid
    }

    pub fn category(&self) -> Option<Category> {
        self.tab.checked_sub(1).and_then(|i| Category::ALL.get(i).copied())
    }

    /// Pull the current tab's items from the session snapshot.
    pub fn sync(&mut self, state: &AppState) {
        let items = state.session.playlists_in(self.category());
        if items != self.list.items {
            let keep = self.list.selected_item().map(|p| p.id.clone());
            self.list.set_items(items);
            if let Some(id) = keep {
                self.list.select_where(|p| p.id == id);
            }
        }
    }

    fn set_tab(&mut self, tab: usize, state: &AppState) {
        self.tab = tab % TAB_COUNT;
        self.list.select_first();
        self.sync(state);
    }

    fn tab_label(tab: usize) -> String {
        match tab.checked_sub(1).and_then(|i| Category::ALL.get(i)) {
            Some(c) => {
                let info = c.info();
                format!("{} {}", info.icon, info.name)
            }
            None => "All".to_string(),
        }
    }

    fn render_item(
        &self,
        playlist: &Playlist,
        is_selected: bool,
        focused: bool,
        width: usize,
    ) -> ListItem<'static> {
        let info = playlist.category.info();
        let title_style = if is_selected && focused {
            style_selected_focused()
        } else if is_selected {
            style_default().add_modifier(Modifier::BOLD)
        } else {
            style_default()
        };

        let mut spans = vec![
            Span::raw(format!(" {} ", info.icon)),
            Span::styled(playlist.title.clone(), title_style),
        ];
        let mut used = 4 + UnicodeWidthStr::width(playlist.title.as_str());
        if playlist.is_removable() {
            spans.push(Span::styled(
                " Custom",
                Style::default().fg(C_BADGE_CUSTOM).add_modifier(Modifier::BOLD),
            ));
            used += 7;
        }
        let room = width.saturating_sub(used + 3);
        if room > 4 && !playlist.description.is_empty() {
            spans.push(Span::styled("  ", style_muted()));
            spans.push(Span::styled(
                fit_width(&playlist.description, room),
                style_secondary(),
            ));
        }

        let item = ListItem::new(Line::from(spans));
        if is_selected {
            item.style(Style::default().bg(C_SELECTION_BG))
        } else {
            item
        }
    }

    fn draw_tabs(&mut self, frame: &mut Frame, area: Rect) {
        self.tab_spans.clear();
        let mut spans = Vec::new();
        let mut x = area.x;
        for tab in 0..TAB_COUNT {
            let label = format!(" {} ", Self::tab_label(tab));
            let w = UnicodeWidthStr::width(label.as_str()) as u16;
            let color = match tab.checked_sub(1).and_then(|i| Category::ALL.get(i)) {
                Some(c) => hex_color(c.info().color),
                None => C_NUMBER_HINT,
            };
            let style = if tab == self.tab {
                Style::default()
                    .fg(color)
                    .bg(C_SELECTION_BG)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(C_MUTED)
            };
            spans.push(Span::styled(label, style));
            self.tab_spans.push((tab, x, x + w));
            x += w + 1;
            spans.push(Span::raw(" "));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

fn playlist_matches(playlist: &Playlist, q: &str) -> bool {
    if q.trim().is_empty() {
        return true;
    }
    let q = q.to_lowercase();
    let text = format!(
        "{} {} {}",
        playlist.title.to_lowercase(),
        playlist.description.to_lowercase(),
        playlist.category.info().name.to_lowercase()
    );
    q.split_whitespace().all(|term| text.contains(term))
}

impl Component for PlaylistGrid {
    fn id(&self) -> ComponentId {
        ComponentId::PlaylistGrid
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }

        // Filter mode input
        if self.filter_input.is_active() {
            match key.code {
                KeyCode::Up => {
                    self.list.select_up(1);
                    return vec![];
                }
                KeyCode::Down => {
                    self.list.select_down(1);
                    return vec![];
                }
                _ => {}
            }
            return match self.filter_input.handle_key(key) {
                FilterAction::Changed(q) => {
                    self.list.set_filter(&q);
                    vec![]
                }
                FilterAction::Confirmed => vec![Action::CloseFilter],
                FilterAction::Cancelled => {
                    self.list.set_filter("");
                    vec![Action::CloseFilter]
                }
            };
        }

        let step = if key.modifiers.contains(KeyModifiers::SHIFT) {
            5
        } else {
            1
        };
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.list.select_up(step),
            KeyCode::Down | KeyCode::Char('j') => self.list.select_down(step),
            KeyCode::PageUp => self.list.select_up(10),
            KeyCode::PageDown => self.list.select_down(10),
            KeyCode::Home | KeyCode::Char('g') => self.list.select_first(),
            KeyCode::End | KeyCode::Char('G') => self.list.select_last(),

            KeyCode::Char(']') | KeyCode::Right | KeyCode::Char('l') => {
                self.set_tab(self.tab + 1, state)
            }
            KeyCode::Char('[') | KeyCode::Left | KeyCode::Char('h') => {
                self.set_tab(self.tab + TAB_COUNT - 1, state)
            }

            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(p) = self.list.selected_item() {
                    return vec![Action::SelectPlaylist(p.clone())];
                }
            }

            KeyCode::Char('/') => {
                self.filter_input.activate();
                return vec![Action::OpenFilter];
            }

            KeyCode::Char('a') => return vec![Action::OpenAddPlaylist],

            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(p) = self.list.selected_item() {
                    if p.is_removable() {
                        return vec![Action::ConfirmRemove(p.clone())];
                    }
                }
            }

            KeyCode::Char('y') => {
                if let Some(p) = self.list.selected_item() {
                    return vec![Action::CopyToClipboard(p.youtube_url.clone())];
                }
            }

            _ => {}
        }

        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, area: Rect, state: &AppState) -> Vec<Action> {
        // +1 border, +1 tab strip
        let tab_row = area.y + 1;
        let rel_row = event.row.saturating_sub(area.y + 2) as usize;
        match event.kind {
            MouseEventKind::ScrollUp => self.list.select_up(1),
            MouseEventKind::ScrollDown => self.list.select_down(1),
            MouseEventKind::Down(MouseButton::Left) => {
                if event.row == tab_row {
                    let hit = self
                        .tab_spans
                        .iter()
                        .find(|(_, start, end)| event.column >= *start && event.column < *end)
                        .map(|(tab, _, _)| *tab);
                    if let Some(tab) = hit {
                        self.set_tab(tab, state);
                    }
                    return vec![];
                }
                let now = Instant::now();
                let is_double = self
                    .last_click
                    .map(|(row, t)| row == rel_row && t.elapsed().as_millis() < 400)
                    .unwrap_or(false);
                if self.list.handle_click(rel_row) && is_double {
                    self.last_click = None;
                    if let Some(p) = self.list.selected_item() {
                        return vec![Action::SelectPlaylist(p.clone())];
                    }
                } else {
                    self.last_click = Some((rel_row, now));
                }
            }
            _ => {}
        }
        vec![]
    }

    fn on_action(&mut self, action: &Action, state: &AppState) -> Vec<Action> {
        self.sync(state);
        match action {
            Action::PlaylistAdded(p) => {
                if self.category().map_or(true, |c| c == p.category) {
                    let id = p.id.clone();
                    self.list.select_where(|item| item.id == id);
                }
            }
            // Focus moved away mid-filter: keep the query, stop editing
            Action::CloseFilter => self.filter_input.deactivate(),
            _ => {}
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        self.sync(state);

        let custom = state.session.custom_playlists.len();
        let badge_text = format!("{} custom", custom);
        let badge = (custom > 0).then(|| Badge {
            text: &badge_text,
            color: C_BADGE_CUSTOM,
        });
        let block = pane_chrome(ComponentId::PlaylistGrid, focused, badge);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height == 0 {
            return;
        }

        self.draw_tabs(frame, Rect { height: 1, ..inner });
        let mut body = Rect {
            y: inner.y + 1,
            height: inner.height.saturating_sub(1),
            ..inner
        };
        let filter_visible = self.filter_input.is_active() || !self.list.filter.is_empty();
        if filter_visible && body.height > 0 {
            body.height -= 1;
        }

        if self.list.items.is_empty() {
            let lines = vec![
                Line::from(Span::styled(format!("  {}", EMPTY_CATEGORY), style_secondary())),
                Line::from(vec![
                    Span::styled("  press ", style_muted()),
                    Span::styled("a", Style::default().fg(C_BADGE_CUSTOM)),
                    Span::styled(" to add a YouTube playlist", style_muted()),
                ]),
            ];
            frame.render_widget(Paragraph::new(lines), body);
        } else if self.list.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled("  no playlists match filter", style_muted())),
                body,
            );
        } else {
            let content_h = body.height as usize;
            self.list.ensure_visible(content_h);
            let sel_in_view = self.list.selected_in_view(content_h);
            let width = body.width as usize;
            let items: Vec<ListItem> = self
                .list
                .visible_items(content_h)
                .into_iter()
                .enumerate()
                .map(|(row, (_, p))| self.render_item(p, row == sel_in_view, focused, width))
                .collect();
            self.list_state.select(Some(sel_in_view));
            frame.render_stateful_widget(List::new(items), body, &mut self.list_state);
        }

        if filter_visible {
            let filter_area = Rect {
                y: inner.y + inner.height.saturating_sub(1),
                height: 1,
                ..inner
            };
            self.filter_input.draw(frame, filter_area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{app_state, custom_playlist};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn tabs_cycle_through_categories() {
        let state = app_state();
        let mut grid = PlaylistGrid::new(&state);
        assert_eq!(grid.category(), None);
        assert_eq!(grid.list.len(), 9);

        grid.handle_key(key(KeyCode::Char(']')), &state);
        assert_eq!(grid.category(), Some(Category::Binaural));
        assert_eq!(grid.list.len(), 3);

        grid.handle_key(key(KeyCode::Char('[')), &state);
        grid.handle_key(key(KeyCode::Char('[')), &state);
        assert_eq!(grid.category(), Some(Category::Custom));
        assert!(grid.list.items.is_empty());
    }

    #[test]
    fn enter_selects_highlighted_playlist() {
        let state = app_state();
        let mut grid = PlaylistGrid::new(&state);
        grid.handle_key(key(KeyCode::Down), &state);
        let actions = grid.handle_key(key(KeyCode::Enter), &state);
        match actions.as_slice() {
            [Action::SelectPlaylist(p)] => assert_eq!(p.id, "binaural-2"),
            other => panic!("unexpected actions: {:?}", other),
        }
    }

    #[test]
    fn defaults_cannot_be_removed() {
        let state = app_state();
        let mut grid = PlaylistGrid::new(&state);
        assert!(grid.handle_key(key(KeyCode::Char('d')), &state).is_empty());
    }

    #[test]
    fn custom_entries_can_be_removed_and_copied() {
        let mut state = app_state();
        state.session.custom_playlists.push(custom_playlist("custom-1", "Night"));
        let mut grid = PlaylistGrid::new(&state);
        grid.list.select_last();

        let actions = grid.handle_key(key(KeyCode::Delete), &state);
        assert!(matches!(actions.as_slice(), [Action::ConfirmRemove(p)] if p.id == "custom-1"));

        let actions = grid.handle_key(key(KeyCode::Char('y')), &state);
        assert!(matches!(actions.as_slice(), [Action::CopyToClipboard(url)] if url.contains("youtube")));
    }

    #[test]
    fn filter_narrows_and_cancel_restores() {
        let state = app_state();
        let mut grid = PlaylistGrid::new(&state);
        let actions = grid.handle_key(key(KeyCode::Char('/')), &state);
        assert!(matches!(actions.as_slice(), [Action::OpenFilter]));
        for c in "rain".chars() {
            grid.handle_key(key(KeyCode::Char(c)), &state);
        }
        assert!(grid.list.len() < 9);
        assert!(grid.list.len() >= 2);

        grid.handle_key(key(KeyCode::Esc), &state);
        let actions = grid.handle_key(key(KeyCode::Esc), &state);
        assert!(matches!(actions.as_slice(), [Action::CloseFilter]));
        assert_eq!(grid.list.len(), 9);
    }

    #[test]
    fn added_playlist_is_selected() {
        let mut state = app_state();
        let mut grid = PlaylistGrid::new(&state);
        let added = custom_playlist("custom-7", "Waves");
        state.session.custom_playlists.push(added.clone());
        grid.on_action(&Action::PlaylistAdded(added), &state);
        assert_eq!(grid.list.selected_item().map(|p| p.id.as_str()), Some("custom-7"));
    }

    #[test]
    fn matcher_uses_all_terms() {
        let p = custom_playlist("custom-1", "Ocean Night");
        assert!(playlist_matches(&p, "ocean my"));
        assert!(!playlist_matches(&p, "ocean forest"));
    }
}
