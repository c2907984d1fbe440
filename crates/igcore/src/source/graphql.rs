//! GraphqlSource: anonymous metadata lookup through Instagram's internal GraphQL API.
//!
//! Sends the shortcode as a query variable together with the public web-app
//! tokens (app id, LSD, ASBD id). No session cookie is sent: stale cookies make
//! Instagram serve the HTML login page instead of JSON.
//!
//! `doc_id` is configurable via `IG_DOC_ID` (it rotates every few weeks).

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use serde_json::{json, Value};
use std::sync::Arc;
use url::Url;

use crate::config::IgConfig;
use crate::error::{IgError, IgResult};
use crate::fallback::{first_bool, first_f64, first_present, first_str, first_u64, first_value};
use crate::media::NormalizedMedia;
use crate::shortcode::Shortcode;
use crate::source::{read_document, MediaSource};

/// GraphQL endpoint, relative to the configured base URL.
const GRAPHQL_PATH: &str = "api/graphql";

/// Where the media node lives in the response, newest layout first.
const MEDIA_PATHS: &[&str] = &["/data/xdt_shortcode_media", "/data/shortcode_media"];

/// Metadata source using the anonymous GraphQL query.
pub struct GraphqlSource {
    client: reqwest::Client,
    config: Arc<IgConfig>,
}

impl GraphqlSource {
    pub fn new(config: Arc<IgConfig>) -> IgResult<Self> {
        Ok(Self::with_client(config, super::build_client()?))
    }

    pub fn with_client(config: Arc<IgConfig>, client: reqwest::Client) -> Self {
        Self { client, config }
    }

    fn endpoint(&self) -> IgResult<Url> {
        Ok(self.config.base_url.join(GRAPHQL_PATH)?)
    }

    /// Issue the GraphQL request and return the parsed document (`None` when
    /// the body is not JSON).
    pub async fn fetch_document(&self, shortcode: &Shortcode) -> IgResult<Option<Value>> {
        let variables = json!({ "shortcode": shortcode.as_str() }).to_string();
        let config = &self.config;

        log::info!("GraphqlSource: POST graphql shortcode={} doc_id={}", shortcode, config.doc_id);

        let response = self
            .client
            .post(self.endpoint()?)
            .query(&[
                ("variables", variables.as_str()),
                ("doc_id", config.doc_id.as_str()),
                ("lsd", config.fb_lsd.as_str()),
            ])
            .header(USER_AGENT, config.user_agent.as_str())
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header("X-IG-App-ID", config.app_id.as_str())
            .header("X-FB-LSD", config.fb_lsd.as_str())
            .header("X-ASBD-ID", config.asbd_id.as_str())
            .header("Sec-Fetch-Site", "same-origin")
            .send()
            .await?;

        read_document(response).await
    }
}

/// Locate the media node, or `None` on shape drift.
pub fn locate_media(document: &Value) -> Option<&Value> {
    first_present(document, MEDIA_PATHS)
}

/// Project a GraphQL `shortcode_media` node.
pub fn normalize(node: &Value) -> NormalizedMedia {
    NormalizedMedia {
        typename: first_str(node, &["/__typename"]),
        shortcode: first_str(node, &["/shortcode"]),
        dimensions: first_value(node, &["/dimensions"]),
        display_url: first_str(node, &["/display_url"]),
        display_resources: first_value(node, &["/display_resources"]),
        has_audio: first_bool(node, &["/has_audio"]),
        video_url: first_str(node, &["/video_url"]),
        video_view_count: first_u64(node, &["/video_view_count"]),
        video_play_count: first_u64(node, &["/video_play_count"]),
        is_video: first_bool(node, &["/is_video"]),
        caption: first_str(node, &["/edge_media_to_caption/edges/0/node/text"]),
        is_paid_partnership: first_bool(node, &["/is_paid_partnership"]),
        location: first_value(node, &["/location"]),
        owner: first_value(node, &["/owner"]),
        product_type: first_str(node, &["/product_type"]),
        video_duration: first_f64(node, &["/video_duration"]),
        thumbnail_src: first_str(node, &["/thumbnail_src"]),
        clips_music_attribution_info: first_value(node, &["/clips_music_attribution_info"]),
        sidecar: first_value(node, &["/edge_sidecar_to_children/edges"]),
        ..Default::default()
    }
}

/// Upstream error text (doc_id expiry, login checkpoint), if any.
fn upstream_message(document: Option<&Value>) -> Option<&str> {
    document?.get("message")?.as_str()
}

#[async_trait]
impl MediaSource for GraphqlSource {
    fn name(&self) -> &str {
        "graphql"
    }

    async fn fetch_media(&self, shortcode: &Shortcode, _cookie_override: Option<&str>) -> IgResult<NormalizedMedia> {
        let document = self.fetch_document(shortcode).await?;

        let Some(node) = document.as_ref().and_then(locate_media) else {
            match upstream_message(document.as_ref()) {
                Some(message) => log::warn!("GraphqlSource: no media node, upstream says: {}", message),
                None if document.is_none() => log::warn!("GraphqlSource: response was not JSON"),
                None => log::warn!("GraphqlSource: no media node in response"),
            }
            return Err(IgError::NotFound { details: None });
        };

        Ok(normalize(node))
    }
}
