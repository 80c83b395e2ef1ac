//! Status bar — bottom line with session state and keybindings.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app_state::AppState;
use crate::theme::{C_ACCENT, C_MUTED, C_PENDING, C_SECONDARY, C_SEPARATOR};

/// Draw a horizontal separator line.
pub fn draw_separator(frame: &mut Frame, area: Rect) {
    let line = Line::from(Span::styled(
        "─".repeat(area.width as usize),
        Style::default().fg(C_SEPARATOR),
    ));
    frame.render_widget(Paragraph::new(line), area);
}

/// Draw the keybindings footer bar (one row).
pub fn draw_keys_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let (bulb, bulb_color) = if state.authenticated() {
        ("●", C_ACCENT)
    } else {
        ("○", C_PENDING)
    };

    let mut spans = vec![
        Span::styled(
            " MELODY ",
            Style::default().fg(C_SECONDARY).add_modifier(Modifier::BOLD),
        ),
        Span::styled(bulb, Style::default().fg(bulb_color)),
        Span::raw("  "),
    ];

    let keys: &[(&str, &str)] = if state.authenticated() {
        &[
            ("tab", "focus"),
            ("←/→", "strategy"),
            ("r", "refresh"),
            ("j/k", "scroll"),
            ("y", "copy"),
            ("?", "help"),
            ("q", "quit"),
        ]
    } else {
        &[
            ("enter", "log in"),
            ("y", "copy login url"),
            ("?", "help"),
            ("q", "quit"),
        ]
    };

    for (key, desc) in keys {
        spans.push(Span::styled(*key, Style::default().fg(C_SECONDARY)));
        spans.push(Span::styled(
            format!(" {}  ", desc),
            Style::default().fg(C_MUTED),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
