//! HTTP surface: two lookup routes and a health check.
//!
//! - `GET /api/instagram?url=<u>`: anonymous GraphQL strategy
//! - `GET /api/instagram/by-cookie?url=<u>`: cookie strategy, optional `x-ig-cookie` header
//! - `GET /healthz`
//!
//! The envelope's `status` is mirrored onto the response status.

use axum::{
    extract::{Query, Request, State},
    http::{HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use igcore::{build_client, CookieSource, Envelope, GraphqlSource, IgConfig, IgResult, MediaSource, NormalizedMedia};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;

/// Per-request cookie override header for the by-cookie route.
pub const COOKIE_HEADER: &str = "x-ig-cookie";

pub const MISSING_URL_ERROR: &str = "Query param 'url' is required.";

/// Shared state for the router.
#[derive(Clone)]
pub struct AppState {
    pub graphql: Arc<dyn MediaSource>,
    pub by_cookie: Arc<dyn MediaSource>,
}

impl AppState {
    pub fn new(graphql: Arc<dyn MediaSource>, by_cookie: Arc<dyn MediaSource>) -> Self {
        Self { graphql, by_cookie }
    }

    /// Both built-in sources over one pooled client.
    pub fn from_config(config: Arc<IgConfig>) -> IgResult<Self> {
        let client = build_client()?;
        Ok(Self::new(
            Arc::new(GraphqlSource::with_client(Arc::clone(&config), client.clone())),
            Arc::new(CookieSource::with_client(config, client)),
        ))
    }
}

#[derive(Debug, Deserialize)]
pub struct MediaQuery {
    url: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/instagram", get(graphql_handler))
        .route("/api/instagram/by-cookie", get(by_cookie_handler))
        .route("/healthz", get(health_handler))
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

/// Bind and serve until Ctrl-C.
pub async fn start_server(addr: &str, state: AppState) -> anyhow::Result<()> {
    let app = router(state);

    log::info!("Starting igapi on http://{}", addr);
    log::info!("  /api/instagram?url=...            - Anonymous lookup (GraphQL)");
    log::info!("  /api/instagram/by-cookie?url=...  - Lookup with session cookie");
    log::info!("  /healthz                          - Health check");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    log::info!("igapi stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Shutdown signal received");
}

async fn graphql_handler(State(state): State<AppState>, Query(query): Query<MediaQuery>) -> Response {
    resolve(state.graphql.as_ref(), query.url.as_deref(), None).await
}

async fn by_cookie_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<MediaQuery>,
) -> Response {
    let cookie = headers.get(COOKIE_HEADER).and_then(|value| value.to_str().ok());
    resolve(state.by_cookie.as_ref(), query.url.as_deref(), cookie).await
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({ "ok": true }))
}

async fn resolve(source: &dyn MediaSource, url: Option<&str>, cookie: Option<&str>) -> Response {
    let Some(url) = url.filter(|u| !u.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "ok": false, "error": MISSING_URL_ERROR })),
        )
            .into_response();
    };

    match source.fetch(url, cookie).await {
        Ok(envelope) => envelope_response(envelope),
        Err(e) => {
            log::error!("{}: lookup failed [{}]: {}", source.name(), e.subcategory(), e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "ok": false, "error": "Internal error", "details": e.to_string() })),
            )
                .into_response()
        }
    }
}

/// Serialize an envelope with its own status as the HTTP status.
pub fn envelope_response(envelope: Envelope<NormalizedMedia>) -> Response {
    let status = StatusCode::from_u16(envelope.status()).unwrap_or(StatusCode::BAD_GATEWAY);
    (status, Json(envelope)).into_response()
}

/// Access log line per request: method, path, status, latency.
async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(request).await;

    log::info!(
        "{} {} {} - {:.1} ms",
        method,
        path,
        response.status().as_u16(),
        started.elapsed().as_secs_f64() * 1000.0
    );
    response
}
