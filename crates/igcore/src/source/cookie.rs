//! CookieSource: authenticated metadata lookup through the per-post JSON endpoint.
//!
//! Requests `/p/<code>?__a=1&__d=dis` with a logged-in session cookie. The cookie
//! comes from the per-call override (the `x-ig-cookie` header) when it is
//! non-empty, otherwise from `COOKIE` in the configuration. Without either the
//! call fails with 400 before anything is sent.
//!
//! Cookie values are never logged; only where they came from.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, COOKIE, USER_AGENT};
use secrecy::ExposeSecret;
use serde_json::{json, Value};
use std::sync::Arc;
use url::Url;

use crate::config::IgConfig;
use crate::error::{IgError, IgResult};
use crate::fallback::{first_bool, first_f64, first_i64, first_present, first_str, first_u64, first_value};
use crate::media::{CarouselItem, NormalizedMedia};
use crate::shortcode::Shortcode;
use crate::source::{read_document, MediaSource};

/// Where the media node lives in the response: private-API shape first, then
/// the older GraphQL-shaped page document.
const MEDIA_PATHS: &[&str] = &["/items/0", "/graphql/shortcode_media"];

/// `product_type` marking a multi-item post.
pub const CAROUSEL_PRODUCT_TYPE: &str = "carousel_container";

/// Where the effective cookie came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CookieOrigin {
    Override,
    Config,
}

impl CookieOrigin {
    fn as_str(self) -> &'static str {
        match self {
            CookieOrigin::Override => "override",
            CookieOrigin::Config => "config",
        }
    }
}

/// Metadata source using a session cookie.
pub struct CookieSource {
    client: reqwest::Client,
    config: Arc<IgConfig>,
}

impl CookieSource {
    pub fn new(config: Arc<IgConfig>) -> IgResult<Self> {
        Ok(Self::with_client(config, super::build_client()?))
    }

    pub fn with_client(config: Arc<IgConfig>, client: reqwest::Client) -> Self {
        Self { client, config }
    }

    fn endpoint(&self, shortcode: &Shortcode) -> IgResult<Url> {
        Ok(self.config.base_url.join(&format!("p/{}", shortcode))?)
    }

    /// Effective cookie: a non-blank override, else the configured cookie.
    pub fn resolve_cookie<'a>(&'a self, cookie_override: Option<&'a str>) -> Option<(&'a str, CookieOrigin)> {
        let from_override = cookie_override
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(|c| (c, CookieOrigin::Override));

        from_override.or_else(|| {
            self.config
                .cookie
                .as_ref()
                .map(|c| c.expose_secret().trim())
                .filter(|c| !c.is_empty())
                .map(|c| (c, CookieOrigin::Config))
        })
    }

    /// Issue the cookie request and return the parsed document (`None` when
    /// the body is empty or not JSON).
    pub async fn fetch_document(&self, shortcode: &Shortcode, cookie: &str) -> IgResult<Option<Value>> {
        let config = &self.config;
        let response = self
            .client
            .get(self.endpoint(shortcode)?)
            .query(&[("__a", "1"), ("__d", "dis")])
            .header(COOKIE, cookie)
            .header(USER_AGENT, config.user_agent.as_str())
            .header("X-IG-App-ID", config.app_id.as_str())
            .header("Sec-Fetch-Site", "same-origin")
            .header(ACCEPT, "application/json, text/plain, */*")
            .send()
            .await?;

        read_document(response).await
    }
}

/// Locate the media node, or `None` on shape drift.
pub fn locate_media(document: &Value) -> Option<&Value> {
    first_present(document, MEDIA_PATHS)
}

/// Top-level key names of the document, as a JSON array string.
///
/// Used as the not-found diagnostic so operators can see which shape came back
/// without the body (which may echo account data) ending up in the response.
pub fn top_level_keys(document: Option<&Value>) -> Option<String> {
    let keys: Vec<&str> = document?.as_object()?.keys().map(String::as_str).collect();
    serde_json::to_string(&keys).ok()
}

/// Project a private-API media item (or the legacy GraphQL-shaped node).
pub fn normalize(node: &Value) -> NormalizedMedia {
    NormalizedMedia {
        code: first_str(node, &["/code"]),
        created_at: first_i64(node, &["/taken_at"]),
        username: first_str(node, &["/user/username", "/owner/username"]),
        full_name: first_str(node, &["/user/full_name"]),
        profile_picture: first_str(node, &["/user/profile_pic_url"]),
        is_verified: first_bool(node, &["/user/is_verified"]),
        is_paid_partnership: first_bool(node, &["/is_paid_partnership"]),
        product_type: first_str(node, &["/product_type"]),
        caption: first_str(node, &["/caption/text", "/edge_media_to_caption/edges/0/node/text"]),
        like_count: first_u64(node, &["/like_count", "/edge_media_preview_like/count"]),
        comment_count: first_u64(node, &["/comment_count", "/edge_media_to_parent_comment/count"]),
        view_count: first_u64(node, &["/view_count", "/play_count"]),
        video_duration: first_f64(node, &["/video_duration"]),
        location: first_value(node, &["/location"]),
        height: first_u64(node, &["/original_height", "/dimensions/height"]),
        width: first_u64(node, &["/original_width", "/dimensions/width"]),
        image_versions: first_value(node, &["/image_versions2/candidates", "/display_resources"]),
        video_versions: video_versions(node),
        carousel_media: carousel_media(node),
        ..Default::default()
    }
}

/// `video_versions` as given, or a one-element list built from `video_url`
/// when the node is flagged as video.
fn video_versions(node: &Value) -> Option<Value> {
    if let Some(versions) = first_value(node, &["/video_versions"]) {
        return Some(versions);
    }
    if first_bool(node, &["/is_video"]) != Some(true) {
        return None;
    }
    Some(match first_present(node, &["/video_url"]) {
        Some(url) => json!([{ "url": url }]),
        None => json!([{}]),
    })
}

/// Children of a carousel post; `None` for anything else.
fn carousel_media(node: &Value) -> Option<Vec<CarouselItem>> {
    if first_str(node, &["/product_type"]).as_deref() != Some(CAROUSEL_PRODUCT_TYPE) {
        return None;
    }
    let children = node.get("carousel_media")?.as_array()?;
    Some(
        children
            .iter()
            .map(|child| CarouselItem {
                image_versions: first_value(child, &["/image_versions2/candidates"]),
                video_versions: first_value(child, &["/video_versions"]),
            })
            .collect(),
    )
}

#[async_trait]
impl MediaSource for CookieSource {
    fn name(&self) -> &str {
        "cookie"
    }

    async fn fetch_media(&self, shortcode: &Shortcode, cookie_override: Option<&str>) -> IgResult<NormalizedMedia> {
        let (cookie, origin) = self.resolve_cookie(cookie_override).ok_or(IgError::MissingCookie)?;

        log::info!(
            "CookieSource: GET post shortcode={} (cookie from {})",
            shortcode,
            origin.as_str()
        );

        let document = self.fetch_document(shortcode, cookie).await?;

        let Some(node) = document.as_ref().and_then(locate_media) else {
            let details = top_level_keys(document.as_ref());
            log::warn!(
                "CookieSource: no media node in response, keys: {}",
                details.as_deref().unwrap_or("<none>")
            );
            return Err(IgError::NotFound { details });
        };

        Ok(normalize(node))
    }
}
