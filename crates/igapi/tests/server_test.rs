//! Router tests with fake MediaSources.
//!
//! Run with: cargo test -p igapi --test server_test

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use igapi::cli::run_fetch;
use igapi::server::{router, AppState, COOKIE_HEADER};
use igcore::{IgError, IgResult, MediaSource, NormalizedMedia, Shortcode};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

const ENCODED_POST_URL: &str = "https%3A%2F%2Fwww.instagram.com%2Fp%2FC1abc%2F";

#[derive(Clone, Copy)]
enum Outcome {
    Media,
    Forbidden,
    NotFound,
    Broken,
}

/// Records what it was asked and answers with a fixed outcome.
struct FakeSource {
    name: &'static str,
    outcome: Outcome,
    calls: Mutex<Vec<(String, Option<String>)>>,
}

impl FakeSource {
    fn new(name: &'static str, outcome: Outcome) -> Arc<Self> {
        Arc::new(Self {
            name,
            outcome,
            calls: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> Vec<(String, Option<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaSource for FakeSource {
    fn name(&self) -> &str {
        self.name
    }

    async fn fetch_media(&self, shortcode: &Shortcode, cookie_override: Option<&str>) -> IgResult<NormalizedMedia> {
        self.calls
            .lock()
            .unwrap()
            .push((shortcode.to_string(), cookie_override.map(str::to_owned)));

        match self.outcome {
            Outcome::Media => Ok(NormalizedMedia {
                shortcode: Some(shortcode.to_string()),
                is_video: Some(false),
                ..Default::default()
            }),
            Outcome::Forbidden => Err(IgError::UpstreamStatus {
                status: 403,
                body: "login required".into(),
            }),
            Outcome::NotFound => Err(IgError::NotFound {
                details: Some("[\"require_login\"]".into()),
            }),
            Outcome::Broken => Err(IgError::Url(url::ParseError::EmptyHost)),
        }
    }
}

struct Harness {
    app: Router,
    graphql: Arc<FakeSource>,
    by_cookie: Arc<FakeSource>,
}

impl Harness {
    fn new(graphql: Outcome, by_cookie: Outcome) -> Self {
        let graphql = FakeSource::new("fake-graphql", graphql);
        let by_cookie = FakeSource::new("fake-cookie", by_cookie);
        let state = AppState::new(graphql.clone(), by_cookie.clone());
        Self {
            app: router(state),
            graphql,
            by_cookie,
        }
    }

    async fn get(&self, uri: &str, cookie: Option<&str>) -> (StatusCode, Value) {
        let mut request = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            request = request.header(COOKIE_HEADER, cookie);
        }
        let response = self
            .app
            .clone()
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }
}

#[tokio::test]
async fn test_healthz() {
    let harness = Harness::new(Outcome::Media, Outcome::Media);
    let (status, body) = harness.get("/healthz", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true }));
}

#[tokio::test]
async fn test_missing_url_is_400() {
    let harness = Harness::new(Outcome::Media, Outcome::Media);
    for uri in ["/api/instagram", "/api/instagram?url=", "/api/instagram/by-cookie"] {
        let (status, body) = harness.get(uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body, json!({ "ok": false, "error": "Query param 'url' is required." }));
    }
    assert!(harness.graphql.calls().is_empty());
    assert!(harness.by_cookie.calls().is_empty());
}

#[tokio::test]
async fn test_graphql_route_success() {
    let harness = Harness::new(Outcome::Media, Outcome::Media);
    let (status, body) = harness.get(&format!("/api/instagram?url={}", ENCODED_POST_URL), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "ok": true, "status": 200, "data": { "shortcode": "C1abc", "is_video": false } })
    );
    assert_eq!(harness.graphql.calls(), vec![("C1abc".to_string(), None)]);
    assert!(harness.by_cookie.calls().is_empty());
}

#[tokio::test]
async fn test_graphql_route_ignores_cookie_header() {
    let harness = Harness::new(Outcome::Media, Outcome::Media);
    harness
        .get(&format!("/api/instagram?url={}", ENCODED_POST_URL), Some("sessionid=abc"))
        .await;
    assert_eq!(harness.graphql.calls(), vec![("C1abc".to_string(), None)]);
}

#[tokio::test]
async fn test_invalid_url_is_400_envelope() {
    let harness = Harness::new(Outcome::Media, Outcome::Media);
    let (status, body) = harness.get("/api/instagram?url=https%3A%2F%2Fexample.com%2F", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "ok": false, "status": 400, "error": "Invalid Instagram URL." }));
    assert!(harness.graphql.calls().is_empty());
}

#[tokio::test]
async fn test_upstream_status_is_mirrored() {
    let harness = Harness::new(Outcome::Forbidden, Outcome::Media);
    let (status, body) = harness.get(&format!("/api/instagram?url={}", ENCODED_POST_URL), None).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        body,
        json!({
            "ok": false,
            "status": 403,
            "error": "Instagram request failed (403)",
            "details": "login required"
        })
    );
}

#[tokio::test]
async fn test_by_cookie_forwards_header() {
    let harness = Harness::new(Outcome::Media, Outcome::Media);
    let (status, _) = harness
        .get(
            &format!("/api/instagram/by-cookie?url={}", ENCODED_POST_URL),
            Some("sessionid=abc"),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        harness.by_cookie.calls(),
        vec![("C1abc".to_string(), Some("sessionid=abc".to_string()))]
    );
    assert!(harness.graphql.calls().is_empty());
}

#[tokio::test]
async fn test_by_cookie_without_header() {
    let harness = Harness::new(Outcome::Media, Outcome::NotFound);
    let (status, body) = harness
        .get(&format!("/api/instagram/by-cookie?url={}", ENCODED_POST_URL), None)
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["details"], json!("[\"require_login\"]"));
    assert_eq!(harness.by_cookie.calls(), vec![("C1abc".to_string(), None)]);
}

#[tokio::test]
async fn test_unexpected_error_is_500() {
    let harness = Harness::new(Outcome::Broken, Outcome::Media);
    let (status, body) = harness.get(&format!("/api/instagram?url={}", ENCODED_POST_URL), None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["ok"], json!(false));
    assert_eq!(body["error"], json!("Internal error"));
    assert!(body["details"].as_str().is_some_and(|d| !d.is_empty()));
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let harness = Harness::new(Outcome::Media, Outcome::Media);
    let (status, _) = harness.get("/api/other", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_run_fetch_picks_strategy() {
    let graphql = FakeSource::new("fake-graphql", Outcome::Media);
    let by_cookie = FakeSource::new("fake-cookie", Outcome::Media);
    let state = AppState::new(graphql.clone(), by_cookie.clone());
    let url = "https://www.instagram.com/reel/C1abc/";

    let envelope = run_fetch(&state, url, false, None).await.unwrap();
    assert!(envelope.is_ok());
    assert_eq!(graphql.calls().len(), 1);

    run_fetch(&state, url, true, None).await.unwrap();
    run_fetch(&state, url, false, Some("sessionid=cli")).await.unwrap();
    assert_eq!(
        by_cookie.calls(),
        vec![
            ("C1abc".to_string(), None),
            ("C1abc".to_string(), Some("sessionid=cli".to_string())),
        ]
    );
}
