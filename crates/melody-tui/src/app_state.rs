//! AppState — shared read-only data passed to all components during render/event.
//!
//! Components read this, but never mutate it.
//! The App event-loop is the only thing that writes to AppState.

use chrono::{DateTime, Local};
use tracing::{info, warn};

use melody_proto::song::{RecKind, Song};

/// The full shared state of the application.
pub struct AppState {
    // ── Session ─────────────────────────────────────────────────────────────
    /// Opaque token from the auth redirect. Held only in memory; its
    /// presence is the sole authentication state.
    pub access_token: Option<String>,
    pub user_id: String,

    // ── Recommendations ─────────────────────────────────────────────────────
    pub rec_kind: RecKind,
    /// Replaced wholesale on each successful fetch.
    pub recommendations: Vec<Song>,
    /// Set while the latest fetch is in flight; cleared when it resolves.
    pub loading: bool,
    /// Human-readable failure from the last fetch; cleared on next success.
    pub error_message: Option<String>,
    pub last_fetch_at: Option<DateTime<Local>>,

    // ── Endpoints (for display) ─────────────────────────────────────────────
    pub login_url: String,
    /// Loopback address the callback listener waits on, e.g. `127.0.0.1:5173`.
    pub callback_addr: String,
}

impl AppState {
    pub fn authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    /// Songs that will actually produce a tile.
    pub fn renderable_songs(&self) -> impl Iterator<Item = &Song> {
        self.recommendations.iter().filter(|s| s.is_renderable())
    }

    pub fn renderable_count(&self) -> usize {
        self.renderable_songs().count()
    }

    /// Apply the outcome of the latest fetch. The loading flag is cleared
    /// regardless of outcome; on failure the displayed list stays untouched.
    pub fn apply_fetch_outcome(&mut self, outcome: Result<Vec<Song>, String>) {
        self.loading = false;
        match outcome {
            Ok(songs) => {
                info!("received {} recommendations", songs.len());
                self.recommendations = songs;
                self.error_message = None;
                self.last_fetch_at = Some(Local::now());
            }
            Err(message) => {
                warn!("recommendations fetch failed: {}", message);
                self.error_message = Some(message);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        AppState {
            access_token: Some("abc123".to_string()),
            user_id: "user123".to_string(),
            rec_kind: RecKind::Hybrid,
            recommendations: Vec::new(),
            loading: false,
            error_message: None,
            last_fetch_at: None,
            login_url: "http://127.0.0.1:5000/login".to_string(),
            callback_addr: "127.0.0.1:5173".to_string(),
        }
    }

    fn song(name: &str, artist: &str) -> Song {
        Song {
            id: "1".to_string(),
            name: name.to_string(),
            artist: artist.to_string(),
        }
    }

    #[test]
    fn success_replaces_list_and_clears_error() {
        let mut s = state();
        s.loading = true;
        s.error_message = Some("previous failure".to_string());
        s.apply_fetch_outcome(Ok(vec![song("Song A", "Artist X")]));
        assert!(!s.loading);
        assert_eq!(s.recommendations.len(), 1);
        assert!(s.error_message.is_none());
        assert!(s.last_fetch_at.is_some());
    }

    #[test]
    fn failure_keeps_previous_list_and_surfaces_error() {
        let mut s = state();
        s.recommendations = vec![song("Song A", "Artist X")];
        s.loading = true;
        s.apply_fetch_outcome(Err("connection refused".to_string()));
        assert!(!s.loading);
        assert_eq!(s.recommendations.len(), 1);
        assert_eq!(s.error_message.as_deref(), Some("connection refused"));
    }

    #[test]
    fn incomplete_songs_are_not_renderable() {
        let mut s = state();
        s.apply_fetch_outcome(Ok(vec![
            song("Song A", "Artist X"),
            song("", "Artist Y"),
            song("Song C", ""),
        ]));
        assert_eq!(s.recommendations.len(), 3);
        assert_eq!(s.renderable_count(), 1);
    }
}
