//! LoginPanel component — the single affordance shown while unauthenticated.
//!
//! Activation opens the fixed external login URL in the system browser; the
//! auth server is expected to redirect back to our callback listener with
//! the token.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{C_ACCENT, C_MUTED, C_PRIMARY, C_SECONDARY},
    widgets::pane_chrome::pane_chrome,
};

pub struct LoginPanel;

impl LoginPanel {
    pub fn new() -> Self {
        Self
    }
}

impl Component for LoginPanel {
    fn id(&self) -> ComponentId {
        ComponentId::LoginPanel
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        match key.code {
            KeyCode::Enter | KeyCode::Char('o') => vec![Action::OpenLogin],
            KeyCode::Char('y') => vec![Action::CopyLoginUrl],
            _ => vec![],
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let block = pane_chrome("login", None, focused, None);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height == 0 {
            return;
        }

        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                " Not logged in.",
                Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled(" enter", Style::default().fg(C_SECONDARY)),
                Span::styled(
                    "  open the login page in your browser",
                    Style::default().fg(C_MUTED),
                ),
            ]),
            Line::from(vec![
                Span::styled(" y", Style::default().fg(C_SECONDARY)),
                Span::styled("      copy the login url", Style::default().fg(C_MUTED)),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::raw(" "),
                Span::styled(state.login_url.as_str(), Style::default().fg(C_ACCENT)),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                format!(
                    " Waiting for the redirect on http://{} …",
                    state.callback_addr
                ),
                Style::default().fg(C_MUTED),
            )),
        ];

        frame.render_widget(Paragraph::new(lines), inner);
    }
}
