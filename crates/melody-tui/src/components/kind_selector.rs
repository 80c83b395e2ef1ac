//! KindSelector component — closed choice over the recommendation strategies.
//!
//! The selected kind lives in `AppState`; this component only emits
//! `SetKind` actions. Changing the kind schedules a refetch.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use melody_proto::song::RecKind;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{C_ACCENT, C_MUTED, C_SECONDARY, C_SEPARATOR},
    widgets::pane_chrome::{pane_chrome, Badge},
};

pub struct KindSelector;

impl KindSelector {
    pub fn new() -> Self {
        Self
    }
}

impl Component for KindSelector {
    fn id(&self) -> ComponentId {
        ComponentId::KindSelector
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => vec![Action::SetKind(state.rec_kind.prev())],
            KeyCode::Right | KeyCode::Char('l') => vec![Action::SetKind(state.rec_kind.next())],
            KeyCode::Char('r') | KeyCode::Enter => vec![Action::Refresh],
            _ => vec![],
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let badge = Badge {
            text: state.rec_kind.as_param(),
            color: C_SECONDARY,
        };
        let block = pane_chrome("strategy", Some('1'), focused, Some(badge));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height == 0 {
            return;
        }

        let mut spans: Vec<Span> = vec![Span::raw(" ")];
        for (i, kind) in RecKind::ALL.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  │  ", Style::default().fg(C_SEPARATOR)));
            }
            if *kind == state.rec_kind {
                spans.push(Span::styled(
                    format!("● {}", kind.label()),
                    Style::default().fg(C_ACCENT).add_modifier(Modifier::BOLD),
                ));
            } else {
                spans.push(Span::styled(
                    format!("○ {}", kind.label()),
                    Style::default().fg(C_MUTED),
                ));
            }
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), inner);
    }
}
