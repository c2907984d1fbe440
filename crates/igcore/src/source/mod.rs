//! Fetch strategies behind one `MediaSource` trait.
//!
//! Built-in sources:
//! - `GraphqlSource`: anonymous query against `/api/graphql`
//! - `CookieSource`: session-cookie request against `/p/<code>?__a=1&__d=dis`
//!
//! Both issue at most one upstream request per call and never retry.

pub mod cookie;
pub mod graphql;

use async_trait::async_trait;
use serde_json::Value;

use crate::envelope::{into_envelope, Envelope};
use crate::error::{IgError, IgResult};
use crate::media::NormalizedMedia;
use crate::shortcode::Shortcode;

/// Maximum number of characters of upstream body echoed as diagnostics.
pub const MAX_DETAILS_CHARS: usize = 500;

/// A strategy that resolves a shortcode into normalized media.
#[async_trait]
pub trait MediaSource: Send + Sync {
    /// Human-readable name of this source (e.g., "graphql", "cookie")
    fn name(&self) -> &str;

    /// Fetch and normalize one media item.
    ///
    /// `cookie_override` is ignored by sources that do not send a session.
    async fn fetch_media(&self, shortcode: &Shortcode, cookie_override: Option<&str>) -> IgResult<NormalizedMedia>;

    /// Resolve a URL into an envelope.
    ///
    /// Every expected failure (invalid URL, missing cookie, upstream status,
    /// shape drift) comes back as `Ok(Envelope::Failure)`. `Err` is reserved
    /// for transport-level failures the caller should answer with a 500.
    async fn fetch(&self, url: &str, cookie_override: Option<&str>) -> IgResult<Envelope<NormalizedMedia>> {
        let Some(shortcode) = Shortcode::from_url(url) else {
            log::warn!("{}: no shortcode in input URL", self.name());
            return Ok(Envelope::from_error(&IgError::InvalidUrl));
        };

        let result = self.fetch_media(&shortcode, cookie_override).await;
        if let Err(ref e) = result {
            log::warn!(
                "{}: shortcode={} failed [{}] status={}: {}",
                self.name(),
                shortcode,
                e.subcategory(),
                e.status(),
                e
            );
        }
        into_envelope(result)
    }
}

/// Shared HTTP client. One per process; reqwest pools connections internally.
pub fn build_client() -> IgResult<reqwest::Client> {
    Ok(reqwest::Client::builder().build()?)
}

/// First `MAX_DETAILS_CHARS` characters of `body`.
pub(crate) fn truncate_details(body: &str) -> String {
    body.chars().take(MAX_DETAILS_CHARS).collect()
}

/// Consume a response: non-success becomes `UpstreamStatus`, a success body
/// that is not JSON becomes `None`.
pub(crate) async fn read_document(response: reqwest::Response) -> IgResult<Option<Value>> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(IgError::UpstreamStatus {
            status: status.as_u16(),
            body: truncate_details(&body),
        });
    }

    let document = match response.bytes().await {
        Ok(bytes) => serde_json::from_slice::<Value>(&bytes).ok(),
        Err(e) => {
            log::debug!("failed to read upstream body: {}", e);
            None
        }
    };
    Ok(document)
}
