//! Color palette and style constants for the melody TUI.

use ratatui::style::{Color, Modifier, Style};

// ── Color palette ─────────────────────────────────────────────────────────────

pub const C_ACCENT: Color = Color::Rgb(90, 200, 130);
pub const C_ERROR: Color = Color::Rgb(255, 90, 90);
pub const C_PENDING: Color = Color::Rgb(255, 184, 80);
pub const C_MUTED: Color = Color::Rgb(76, 76, 92);
pub const C_SEPARATOR: Color = Color::Rgb(42, 42, 54);
pub const C_SECONDARY: Color = Color::Rgb(120, 120, 142);
pub const C_PRIMARY: Color = Color::Rgb(214, 214, 228);
pub const C_SELECTION_BG: Color = Color::Rgb(28, 32, 40);
pub const C_PANEL_BORDER: Color = Color::Rgb(42, 42, 54);
pub const C_PANEL_BORDER_FOCUSED: Color = Color::Rgb(110, 150, 220);
pub const C_NUMBER_HINT: Color = Color::Rgb(92, 92, 116);
pub const C_TOAST_INFO: Color = Color::Rgb(80, 160, 220);
pub const C_TOAST_SUCCESS: Color = Color::Rgb(90, 200, 130);
pub const C_TOAST_ERROR: Color = Color::Rgb(255, 90, 90);
pub const C_BADGE_LIVE: Color = Color::Rgb(90, 200, 130);
pub const C_BADGE_ERR: Color = Color::Rgb(255, 90, 90);
pub const C_BADGE_PENDING: Color = Color::Rgb(255, 184, 80);

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

pub fn style_error() -> Style {
    Style::default().fg(C_ERROR)
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
