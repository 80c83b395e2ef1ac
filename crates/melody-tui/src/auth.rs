//! Callback listener — receives the auth server's redirect carrying the
//! session token.
//!
//! The external login flow ends with the auth server redirecting the user's
//! browser to this loopback address with an `access_token` query parameter.
//! The handler extracts the token from the parsed query mapping, forwards it
//! to the app event-loop, and answers with a static page that does not echo
//! the token anywhere.

use axum::{
    extract::{Query, State},
    response::Html,
    routing::get,
    Router,
};
use std::collections::HashMap;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing::{error, info};

const LOGIN_OK_PAGE: &str = "<!doctype html>\
<html><body style=\"font-family: sans-serif; margin: 4em;\">\
<h2>melody</h2><p>Logged in. You can close this tab and return to the terminal.</p>\
</body></html>";

const LOGIN_MISSING_PAGE: &str = "<!doctype html>\
<html><body style=\"font-family: sans-serif; margin: 4em;\">\
<h2>melody</h2><p>No access token in the redirect. Try logging in again.</p>\
</body></html>";

/// Pull the session token out of a parsed query-parameter mapping.
/// Any non-empty value is accepted verbatim; no shape or expiry checks.
pub fn token_from_query(params: &HashMap<String, String>) -> Option<String> {
    params
        .get("access_token")
        .map(String::as_str)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

pub(crate) fn router(token_tx: mpsc::Sender<String>) -> Router {
    Router::new()
        .route("/", get(receive_token))
        .with_state(token_tx)
}

async fn receive_token(
    State(token_tx): State<mpsc::Sender<String>>,
    Query(params): Query<HashMap<String, String>>,
) -> Html<&'static str> {
    match token_from_query(&params) {
        Some(token) => {
            info!("session token received from auth redirect");
            if token_tx.send(token).await.is_err() {
                error!("app event loop is gone; dropping token");
            }
            Html(LOGIN_OK_PAGE)
        }
        None => {
            info!("auth redirect arrived without a token");
            Html(LOGIN_MISSING_PAGE)
        }
    }
}

/// Spawn the loopback callback listener. Tokens are delivered on `token_tx`;
/// a token received while already authenticated replaces the session.
pub fn start_listener(
    bind_address: String,
    port: u16,
    token_tx: mpsc::Sender<String>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let app = router(token_tx);
        let addr = format!("{}:{}", bind_address, port);
        let listener = match TcpListener::bind(&addr).await {
            Ok(l) => l,
            Err(e) => {
                error!("failed to bind callback listener on {}: {}", addr, e);
                return;
            }
        };

        info!("callback listener waiting on http://{}", addr);

        if let Err(e) = axum::serve(listener, app).await {
            error!("callback listener error: {}", e);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn token_extracted_when_present() {
        let q = params(&[("access_token", "abc123"), ("state", "xyz")]);
        assert_eq!(token_from_query(&q).as_deref(), Some("abc123"));
    }

    #[test]
    fn no_token_when_absent_or_blank() {
        assert_eq!(token_from_query(&params(&[("code", "123")])), None);
        assert_eq!(token_from_query(&params(&[("access_token", "")])), None);
        assert_eq!(token_from_query(&params(&[("access_token", "  ")])), None);
    }

    #[tokio::test]
    async fn redirect_delivers_token_and_page_does_not_echo_it() {
        let (tx, mut rx) = mpsc::channel::<String>(4);
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router(tx)).await.unwrap();
        });

        let body = reqwest::get(format!("http://{}/?access_token=abc123", addr))
            .await
            .unwrap()
            .text()
            .await
            .unwrap();

        assert_eq!(rx.recv().await.as_deref(), Some("abc123"));
        assert!(!body.contains("abc123"));
    }

    #[tokio::test]
    async fn redirect_without_token_delivers_nothing() {
        let (tx, mut rx) = mpsc::channel::<String>(4);
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router(tx)).await.unwrap();
        });

        let status = reqwest::get(format!("http://{}/", addr))
            .await
            .unwrap()
            .status();
        assert!(status.is_success());
        assert!(rx.try_recv().is_err());
    }
}
