//! App — component-based event loop.
//!
//! Architecture:
//! - `App` owns all components and `AppState` (shared read-only data for components).
//! - A `tokio::mpsc` channel carries `AppMessage` events in from background tasks:
//!   terminal input, the callback listener, and in-flight fetches.
//! - The event loop draws each frame, then awaits the next message.
//! - Components return `Vec<Action>`; App dispatches each Action.
//!
//! Fetch trigger policy: a fetch is issued whenever a dependency changes —
//! the token arrives or the strategy is switched — and `r` re-issues it by
//! hand (the retry path). Responses carry a generation number; only the
//! latest generation is ever applied.

use std::io;
use std::time::Duration;

use ratatui::crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use melody_proto::config::Config;
use melody_proto::platform;
use melody_proto::song::Song;

use crate::{
    action::{Action, ComponentId},
    api::{FetchGen, RecommendationsClient},
    app_state::AppState,
    auth,
    component::Component,
    components::{
        header, help_overlay::HelpOverlay, kind_selector::KindSelector, login_panel::LoginPanel,
        song_list::SongList,
    },
    focus::FocusRing,
    widgets::{status_bar, toast::ToastManager},
};

// ── Internal event bus ────────────────────────────────────────────────────────

enum AppMessage {
    Event(Event),
    /// A session token arrived from the callback listener.
    TokenReceived(String),
    /// A fetch resolved; the first field is its generation.
    RecommendationsFetched(u64, Result<Vec<Song>, String>),
}

// ── App ───────────────────────────────────────────────────────────────────────

pub struct App {
    /// Shared state, passed read-only to components.
    state: AppState,

    // ── Components ────────────────────────────────────────────────────────────
    login_panel: LoginPanel,
    kind_selector: KindSelector,
    song_list: SongList,
    help_overlay: HelpOverlay,

    focus: FocusRing,
    toast: ToastManager,

    // ── Session bookkeeping ───────────────────────────────────────────────────
    client: RecommendationsClient,
    fetch_gen: FetchGen,
    callback_bind: String,
    callback_port: u16,
    /// Set once `run` creates the message bus; fetches report back through it.
    msg_tx: Option<mpsc::Sender<AppMessage>>,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config) -> Self {
        let state = AppState {
            access_token: None,
            user_id: config.user.id.clone(),
            rec_kind: config.ui.default_kind,
            recommendations: Vec::new(),
            loading: false,
            error_message: None,
            last_fetch_at: None,
            login_url: config.auth.login_url.clone(),
            callback_addr: config.callback_addr(),
        };

        Self {
            state,
            login_panel: LoginPanel::new(),
            kind_selector: KindSelector::new(),
            song_list: SongList::new(),
            help_overlay: HelpOverlay::new(),
            focus: FocusRing::new(vec![ComponentId::LoginPanel]),
            toast: ToastManager::new(),
            client: RecommendationsClient::new(config.api.base_url),
            fetch_gen: FetchGen::default(),
            callback_bind: config.auth.callback_bind,
            callback_port: config.auth.callback_port,
            msg_tx: None,
            should_quit: false,
        }
    }

    pub async fn run(mut self) -> anyhow::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let (tx, mut rx) = mpsc::channel::<AppMessage>(256);
        self.msg_tx = Some(tx.clone());

        // ── Background task: keyboard events ──────────────────────────────────
        let event_tx = tx.clone();
        tokio::task::spawn_blocking(move || loop {
            match event::read() {
                Ok(ev) => {
                    if event_tx.blocking_send(AppMessage::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        });

        // ── Background task: callback listener → token bridge ─────────────────
        let (token_tx, mut token_rx) = mpsc::channel::<String>(8);
        auth::start_listener(self.callback_bind.clone(), self.callback_port, token_tx);
        let bridge_tx = tx.clone();
        tokio::spawn(async move {
            while let Some(token) = token_rx.recv().await {
                if bridge_tx.send(AppMessage::TokenReceived(token)).await.is_err() {
                    break;
                }
            }
        });

        // Toast expiry + spinner animation.
        let mut ui_tick = tokio::time::interval(Duration::from_millis(100));
        ui_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        // ── Main loop ─────────────────────────────────────────────────────────
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal.draw(|f| self.draw(f))?;
            }
            needs_redraw = false;

            if self.should_quit {
                break;
            }

            tokio::select! {
                Some(msg) = rx.recv() => {
                    needs_redraw = self.handle_message(msg);
                }
                _ = ui_tick.tick() => {
                    let had_toasts = !self.toast.is_empty();
                    self.toast.tick();
                    needs_redraw = had_toasts || !self.toast.is_empty();
                }
            }

            if self.should_quit {
                break;
            }
        }

        // ── Teardown ──────────────────────────────────────────────────────────
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        Ok(())
    }

    // ── Message handling ──────────────────────────────────────────────────────

    /// Returns true when the screen needs a redraw.
    fn handle_message(&mut self, msg: AppMessage) -> bool {
        match msg {
            AppMessage::Event(Event::Key(key)) => {
                self.handle_key(key);
                true
            }
            AppMessage::Event(Event::Resize(..)) => true,
            AppMessage::Event(_) => false,
            AppMessage::TokenReceived(token) => {
                let relogin = self.state.access_token.is_some();
                self.state.access_token = Some(token);
                self.focus
                    .set_items(vec![ComponentId::KindSelector, ComponentId::SongList]);
                if relogin {
                    info!("session token replaced");
                    self.toast.info("session replaced");
                } else {
                    info!("logged in");
                    self.toast.success("logged in");
                }
                self.start_fetch();
                true
            }
            AppMessage::RecommendationsFetched(gen, outcome) => {
                if !self.fetch_gen.is_current(gen) {
                    debug!("dropping stale fetch response (gen {})", gen);
                    return false;
                }
                self.toast.dismiss_spinner();
                match &outcome {
                    Ok(songs) => self.toast.success(format!("{} recommendations", songs.len())),
                    Err(_) => self.toast.error("fetch failed"),
                }
                self.state.apply_fetch_outcome(outcome);
                true
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }

        // Help overlay consumes every key while open.
        if self.help_overlay.visible {
            let _ = self.help_overlay.handle_key(key, &self.state);
            return;
        }

        // Global keys.
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('?') => {
                self.help_overlay.toggle();
                return;
            }
            KeyCode::Tab => {
                self.focus.next();
                return;
            }
            KeyCode::BackTab => {
                self.focus.prev();
                return;
            }
            KeyCode::Char('1') if self.state.authenticated() => {
                self.focus.set(ComponentId::KindSelector);
                return;
            }
            KeyCode::Char('2') if self.state.authenticated() => {
                self.focus.set(ComponentId::SongList);
                return;
            }
            _ => {}
        }

        // Route to the focused component.
        let actions = if self.focus.is_focused(self.login_panel.id()) {
            self.login_panel.handle_key(key, &self.state)
        } else if self.focus.is_focused(self.kind_selector.id()) {
            self.kind_selector.handle_key(key, &self.state)
        } else if self.focus.is_focused(self.song_list.id()) {
            self.song_list.handle_key(key, &self.state)
        } else {
            Vec::new()
        };
        for action in actions {
            self.dispatch(action);
        }
    }

    fn dispatch(&mut self, action: Action) {
        match action {
            Action::OpenLogin => {
                info!("opening login page: {}", self.state.login_url);
                match platform::open_in_browser(&self.state.login_url) {
                    Ok(()) => self.toast.info("opening login page in your browser"),
                    Err(e) => {
                        error!("failed to open browser: {}", e);
                        self.toast.error(format!("could not open browser: {}", e));
                    }
                }
            }
            Action::CopyLoginUrl => {
                let url = self.state.login_url.clone();
                self.copy_to_clipboard(&url);
            }
            Action::CopyToClipboard(text) => self.copy_to_clipboard(&text),
            Action::SetKind(kind) => {
                if self.state.rec_kind != kind {
                    self.state.rec_kind = kind;
                    debug!("strategy changed to {}", kind.as_param());
                    self.start_fetch();
                }
            }
            Action::Refresh => self.start_fetch(),
        }
    }

    /// Issue a fetch with the current token, user and kind. No token, no fetch.
    fn start_fetch(&mut self) {
        let Some(token) = self.state.access_token.clone() else {
            return;
        };
        let Some(tx) = self.msg_tx.clone() else {
            return;
        };

        let gen = self.fetch_gen.issue();
        self.state.loading = true;
        self.toast.spinner("fetching recommendations…");

        let client = self.client.clone();
        let user_id = self.state.user_id.clone();
        let kind = self.state.rec_kind;
        debug!("fetch #{}: user={} type={}", gen, user_id, kind.as_param());

        tokio::spawn(async move {
            let outcome = client
                .fetch(&token, &user_id, kind)
                .await
                .map_err(|e| e.to_string());
            let _ = tx
                .send(AppMessage::RecommendationsFetched(gen, outcome))
                .await;
        });
    }

    fn copy_to_clipboard(&mut self, text: &str) {
        match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(text.to_string())) {
            Ok(()) => self.toast.success("copied"),
            Err(e) => {
                warn!("clipboard error: {}", e);
                self.toast.error("clipboard unavailable");
            }
        }
    }

    // ── Drawing ───────────────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut ratatui::Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        header::draw(frame, chunks[0], &self.state);

        if self.state.authenticated() {
            let parts = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(3), Constraint::Min(3)])
                .split(chunks[1]);
            self.kind_selector.draw(
                frame,
                parts[0],
                self.focus.is_focused(ComponentId::KindSelector),
                &self.state,
            );
            self.song_list.draw(
                frame,
                parts[1],
                self.focus.is_focused(ComponentId::SongList),
                &self.state,
            );
        } else {
            self.login_panel.draw(frame, chunks[1], true, &self.state);
        }

        status_bar::draw_separator(frame, chunks[2]);
        status_bar::draw_keys_bar(frame, chunks[3], &self.state);

        self.help_overlay.draw(frame, area, false, &self.state);
        self.toast.draw(frame, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use melody_proto::song::RecKind;

    fn app_with_bus() -> (App, mpsc::Receiver<AppMessage>) {
        let mut app = App::new(Config::default());
        let (tx, rx) = mpsc::channel(16);
        app.msg_tx = Some(tx);
        (app, rx)
    }

    fn song(name: &str, artist: &str) -> Song {
        Song {
            id: "1".to_string(),
            name: name.to_string(),
            artist: artist.to_string(),
        }
    }

    #[tokio::test]
    async fn token_received_authenticates_and_triggers_fetch() {
        let (mut app, _rx) = app_with_bus();
        assert!(!app.state.authenticated());

        app.handle_message(AppMessage::TokenReceived("abc123".to_string()));

        assert_eq!(app.state.access_token.as_deref(), Some("abc123"));
        assert!(app.state.loading);
        assert!(app.focus.is_focused(ComponentId::KindSelector));
    }

    #[tokio::test]
    async fn no_fetch_without_a_token() {
        let (mut app, _rx) = app_with_bus();
        app.dispatch(Action::Refresh);
        assert!(!app.state.loading);
    }

    #[tokio::test]
    async fn changing_kind_refetches_but_same_kind_does_not() {
        let (mut app, _rx) = app_with_bus();
        app.state.access_token = Some("abc123".to_string());

        app.dispatch(Action::SetKind(RecKind::Hybrid)); // already the default
        assert!(!app.state.loading);

        app.dispatch(Action::SetKind(RecKind::Cf));
        assert_eq!(app.state.rec_kind, RecKind::Cf);
        assert!(app.state.loading);
    }

    #[tokio::test]
    async fn stale_fetch_responses_are_dropped() {
        let (mut app, _rx) = app_with_bus();
        app.state.access_token = Some("abc123".to_string());

        app.start_fetch(); // gen 1
        app.start_fetch(); // gen 2

        // The older response resolves after the newer request was issued.
        app.handle_message(AppMessage::RecommendationsFetched(
            1,
            Ok(vec![song("Old Song", "Old Artist")]),
        ));
        assert!(app.state.recommendations.is_empty());
        assert!(app.state.loading);

        app.handle_message(AppMessage::RecommendationsFetched(
            2,
            Ok(vec![song("Song A", "Artist X")]),
        ));
        assert!(!app.state.loading);
        assert_eq!(app.state.recommendations.len(), 1);
        assert_eq!(app.state.recommendations[0].name, "Song A");
    }

    #[tokio::test]
    async fn failed_fetch_keeps_list_and_surfaces_error() {
        let (mut app, _rx) = app_with_bus();
        app.state.access_token = Some("abc123".to_string());
        app.state.recommendations = vec![song("Song A", "Artist X")];

        app.start_fetch(); // gen 1
        app.handle_message(AppMessage::RecommendationsFetched(
            1,
            Err("connection refused".to_string()),
        ));

        assert!(!app.state.loading);
        assert_eq!(app.state.recommendations.len(), 1);
        assert_eq!(
            app.state.error_message.as_deref(),
            Some("connection refused")
        );
    }
}
