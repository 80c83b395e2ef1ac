//! Action enum — all user-initiated intents that flow through the app.

use melody_proto::song::RecKind;

/// Unique identifier for a focusable component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    LoginPanel,
    KindSelector,
    SongList,
    HelpOverlay,
}

/// All actions that can flow through the system.
/// Components produce Actions; the App dispatches them.
/// Quit, help and focus keys are global and never reach a component.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Session ──────────────────────────────────────────────────────────────
    /// Open the external login URL in the system browser.
    OpenLogin,
    CopyLoginUrl,

    // ── Recommendations ──────────────────────────────────────────────────────
    /// Change the recommendation strategy; schedules a refetch.
    SetKind(RecKind),
    /// Re-issue the fetch with the current token, user and kind.
    Refresh,

    // ── UI ───────────────────────────────────────────────────────────────────
    CopyToClipboard(String),
}
