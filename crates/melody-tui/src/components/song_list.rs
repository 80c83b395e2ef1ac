//! SongList component — the recommendations pane.
//!
//! Renders one tile per renderable song, in response order. The error line
//! and the "no recommendations yet" message are mutually exclusive: an error
//! takes precedence, and the previously displayed list stays on screen
//! underneath it.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use melody_proto::song::Song;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    components::song_tile,
    theme::{style_error, style_muted, C_BADGE_ERR, C_BADGE_LIVE, C_BADGE_PENDING},
    widgets::pane_chrome::{pane_chrome, Badge},
};

/// Rows one tile occupies: name, artist, spacer.
const ROWS_PER_TILE: usize = 3;

pub struct SongList {
    selected: usize,
    scroll_offset: usize,
}

impl SongList {
    pub fn new() -> Self {
        Self {
            selected: 0,
            scroll_offset: 0,
        }
    }

    fn clamp(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
            self.scroll_offset = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    fn select_up(&mut self, n: usize) {
        self.selected = self.selected.saturating_sub(n);
    }

    fn select_down(&mut self, n: usize, len: usize) {
        self.selected = (self.selected + n).min(len.saturating_sub(1));
    }

    fn ensure_visible(&mut self, visible_tiles: usize) {
        if visible_tiles == 0 {
            return;
        }
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + visible_tiles {
            self.scroll_offset = self.selected.saturating_sub(visible_tiles - 1);
        }
    }

    fn selected_song<'a>(&self, state: &'a AppState) -> Option<&'a Song> {
        state.renderable_songs().nth(self.selected)
    }
}

impl Component for SongList {
    fn id(&self) -> ComponentId {
        ComponentId::SongList
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        let len = state.renderable_count();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.select_up(1),
            KeyCode::Down | KeyCode::Char('j') => self.select_down(1, len),
            KeyCode::PageUp => self.select_up(10),
            KeyCode::PageDown => self.select_down(10, len),
            KeyCode::Home | KeyCode::Char('g') => {
                self.selected = 0;
                self.scroll_offset = 0;
            }
            KeyCode::End | KeyCode::Char('G') => self.selected = len.saturating_sub(1),
            KeyCode::Char('y') => {
                if let Some(song) = self.selected_song(state) {
                    return vec![Action::CopyToClipboard(format!(
                        "{} by {}",
                        song.name, song.artist
                    ))];
                }
            }
            KeyCode::Char('r') | KeyCode::Enter => return vec![Action::Refresh],
            _ => {}
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let len = state.renderable_count();
        self.clamp(len);

        let count_text = format!("{} songs", len);
        let badge = if state.loading {
            Some(Badge {
                text: "…",
                color: C_BADGE_PENDING,
            })
        } else if state.error_message.is_some() {
            Some(Badge {
                text: "ERR",
                color: C_BADGE_ERR,
            })
        } else if len > 0 {
            Some(Badge {
                text: &count_text,
                color: C_BADGE_LIVE,
            })
        } else {
            None
        };

        let block = pane_chrome("recommended songs", Some('2'), focused, badge);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let mut content = inner;
        if let Some(message) = &state.error_message {
            let err_area = Rect { height: 1, ..content };
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    format!("fetch failed: {}", message),
                    style_error(),
                ))),
                err_area,
            );
            let used = 2.min(content.height);
            content.y += used;
            content.height -= used;
        }

        if len == 0 {
            // Empty-list message only when there is no error on display.
            if state.error_message.is_none() && content.height > 0 {
                let message = if state.loading {
                    "Loading recommendations…"
                } else if state.authenticated() {
                    "No recommendations yet. Try fetching! (r)"
                } else {
                    "Log in to fetch recommendations."
                };
                frame.render_widget(
                    Paragraph::new(Line::from(Span::styled(message, style_muted()))),
                    content,
                );
            }
            return;
        }

        let visible_tiles = (content.height as usize / ROWS_PER_TILE).max(1);
        self.ensure_visible(visible_tiles);

        let mut lines: Vec<Line> = Vec::new();
        for (idx, song) in state
            .renderable_songs()
            .enumerate()
            .skip(self.scroll_offset)
            .take(visible_tiles)
        {
            if let Some(tile) = song_tile::tile_lines(song, idx == self.selected, focused) {
                let [name, artist] = tile;
                lines.push(name);
                lines.push(artist);
                lines.push(Line::from(""));
            }
        }
        frame.render_widget(Paragraph::new(lines), content);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_stays_in_bounds() {
        let mut list = SongList::new();
        list.select_down(5, 3);
        assert_eq!(list.selected, 2);
        list.select_up(10);
        assert_eq!(list.selected, 0);
        list.clamp(0);
        assert_eq!(list.selected, 0);
    }

    #[test]
    fn scroll_follows_selection() {
        let mut list = SongList::new();
        list.select_down(7, 20);
        list.ensure_visible(4);
        assert_eq!(list.scroll_offset, 4);
        list.select_up(7);
        list.ensure_visible(4);
        assert_eq!(list.scroll_offset, 0);
    }
}
