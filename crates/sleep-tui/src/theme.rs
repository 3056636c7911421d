//! Color palette and style constants for the sleep TUI.

use ratatui::style::{Color, Modifier, Style};

// ── Color palette ─────────────────────────────────────────────────────────────

pub const C_BG: Color = Color::Rgb(12, 14, 28);
pub const C_OVERLAY_BG: Color = Color::Rgb(8, 9, 18);
pub const C_ACCENT: Color = Color::Rgb(139, 92, 246);
pub const C_PLAYING: Color = Color::Rgb(80, 200, 120);
pub const C_LOADING: Color = Color::Rgb(255, 184, 80);
pub const C_ERROR: Color = Color::Rgb(255, 95, 95);
pub const C_MUTED: Color = Color::Rgb(72, 76, 104);
pub const C_SECONDARY: Color = Color::Rgb(130, 134, 165);
pub const C_PRIMARY: Color = Color::Rgb(220, 222, 240);
pub const C_SELECTION_BG: Color = Color::Rgb(30, 32, 58);
pub const C_PANEL_BORDER: Color = Color::Rgb(40, 42, 66);
pub const C_PANEL_BORDER_FOCUSED: Color = Color::Rgb(120, 100, 200); // purple focus ring
pub const C_NUMBER_HINT: Color = Color::Rgb(90, 90, 125);
pub const C_FILTER_BG: Color = Color::Rgb(20, 22, 40);
pub const C_FILTER_FG: Color = Color::Rgb(255, 200, 80);
pub const C_BADGE_CUSTOM: Color = Color::Rgb(245, 158, 11);
pub const C_TOAST_INFO: Color = Color::Rgb(80, 160, 220);
pub const C_TOAST_SUCCESS: Color = Color::Rgb(80, 200, 120);
pub const C_TOAST_WARNING: Color = Color::Rgb(255, 184, 80);
pub const C_TOAST_ERROR: Color = Color::Rgb(255, 95, 95);
pub const C_MODE_NORMAL: Color = Color::Rgb(130, 134, 165);
pub const C_MODE_FILTER: Color = Color::Rgb(255, 200, 80);
pub const C_MODE_INSERT: Color = Color::Rgb(80, 160, 220);
pub const C_MODE_PLAYER: Color = Color::Rgb(80, 200, 120);

/// Parse a `#rrggbb` catalog colour. Anything else falls back to `C_ACCENT`.
pub fn hex_color(hex: &str) -> Color {
    let digits = hex.trim_start_matches('#');
    if digits.len() != 6 || !digits.is_ascii() {
        return C_ACCENT;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    match (channel(0), channel(2), channel(4)) {
        (Some(r), Some(g), Some(b)) => Color::Rgb(r, g, b),
        _ => C_ACCENT,
    }
}

// ── Predefined styles ─────────────────────────────────────────────────────────

pub fn style_default() -> Style {
    Style::default().fg(C_PRIMARY)
}

pub fn style_secondary() -> Style {
    Style::default().fg(C_SECONDARY)
}

pub fn style_muted() -> Style {
    Style::default().fg(C_MUTED)
}

pub fn style_selected_focused() -> Style {
    Style::default()
        .bg(C_SELECTION_BG)
        .fg(C_PRIMARY)
        .add_modifier(Modifier::BOLD)
}

pub fn style_focused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER_FOCUSED)
}

pub fn style_unfocused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER)
}
