//! Recommendations API client.

use melody_proto::song::{RecKind, Song};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("recommendations endpoint returned {0}")]
    Status(reqwest::StatusCode),
}

/// Thin client for `GET <base>/recommendations`.
///
/// The session token travels in an `Authorization: Bearer` header; only
/// `user_id` and `type` go in the query string.
#[derive(Clone)]
pub struct RecommendationsClient {
    http: reqwest::Client,
    base_url: String,
}

impl RecommendationsClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub async fn fetch(
        &self,
        token: &str,
        user_id: &str,
        kind: RecKind,
    ) -> Result<Vec<Song>, ApiError> {
        let url = format!("{}/recommendations", self.base_url.trim_end_matches('/'));
        let response = self
            .http
            .get(&url)
            .query(&[("user_id", user_id), ("type", kind.as_param())])
            .bearer_auth(token)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }

        let songs = response.json::<Vec<Song>>().await?;
        Ok(songs)
    }
}

/// Monotonic fetch generation counter.
///
/// Overlapping in-flight requests can resolve out of order; a response is
/// applied only if its generation is still the latest issued one.
#[derive(Debug, Default)]
pub struct FetchGen(u64);

impl FetchGen {
    /// Issue the next generation number for a new request.
    pub fn issue(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }

    /// Whether a response with generation `gen` may still be applied.
    pub fn is_current(&self, gen: u64) -> bool {
        self.0 == gen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Query, http::HeaderMap, routing::get, Json, Router};
    use std::collections::HashMap;

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn fetch_sends_bearer_token_and_exact_kind_param() {
        let app = Router::new().route(
            "/recommendations",
            get(
                |Query(params): Query<HashMap<String, String>>, headers: HeaderMap| async move {
                    assert_eq!(params.get("user_id").map(String::as_str), Some("user123"));
                    assert_eq!(params.get("type").map(String::as_str), Some("hybrid"));
                    // The token must not leak into the query string.
                    assert!(params.get("access_token").is_none());
                    assert_eq!(
                        headers.get("authorization").and_then(|v| v.to_str().ok()),
                        Some("Bearer abc123")
                    );
                    Json(vec![Song {
                        id: "1".to_string(),
                        name: "Song A".to_string(),
                        artist: "Artist X".to_string(),
                    }])
                },
            ),
        );
        let base = serve(app).await;

        let client = RecommendationsClient::new(base);
        let songs = client
            .fetch("abc123", "user123", RecKind::Hybrid)
            .await
            .unwrap();
        assert_eq!(songs.len(), 1);
        assert_eq!(songs[0].name, "Song A");
        assert_eq!(songs[0].artist, "Artist X");
    }

    #[tokio::test]
    async fn fetch_accepts_empty_list() {
        let app = Router::new().route(
            "/recommendations",
            get(|| async { Json(Vec::<Song>::new()) }),
        );
        let base = serve(app).await;

        let client = RecommendationsClient::new(base);
        let songs = client.fetch("abc123", "user123", RecKind::Cf).await.unwrap();
        assert!(songs.is_empty());
    }

    #[tokio::test]
    async fn fetch_surfaces_error_status() {
        let app = Router::new().route(
            "/recommendations",
            get(|| async { (axum::http::StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let base = serve(app).await;

        let client = RecommendationsClient::new(base);
        let err = client
            .fetch("abc123", "user123", RecKind::Cbf)
            .await
            .unwrap_err();
        match err {
            ApiError::Status(status) => assert_eq!(status.as_u16(), 500),
            other => panic!("expected status error, got {other}"),
        }
    }

    #[test]
    fn fetch_gen_accepts_only_the_latest() {
        let mut gen = FetchGen::default();
        let first = gen.issue();
        let second = gen.issue();
        assert!(!gen.is_current(first));
        assert!(gen.is_current(second));
    }
}
