//! Header — single top row with the app name and session summary.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app_state::AppState;
use crate::theme::{C_ACCENT, C_MUTED, C_PENDING, C_SECONDARY};

pub fn draw(frame: &mut Frame, area: Rect, state: &AppState) {
    let left = " melody ♪";

    let right = if state.authenticated() {
        let fetched = state
            .last_fetch_at
            .map(|t| format!("  last fetch {}", t.format("%H:%M:%S")))
            .unwrap_or_default();
        format!(
            "user {}  {}{} ",
            state.user_id,
            state.rec_kind.as_param(),
            fetched
        )
    } else {
        "not logged in ".to_string()
    };

    let pad = (area.width as usize)
        .saturating_sub(left.width())
        .saturating_sub(right.width());

    let right_color = if state.authenticated() {
        C_SECONDARY
    } else {
        C_PENDING
    };

    let line = Line::from(vec![
        Span::styled(
            left,
            Style::default().fg(C_ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ".repeat(pad), Style::default().fg(C_MUTED)),
        Span::styled(right, Style::default().fg(right_color)),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}
