use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Stable output record for both fetch strategies.
///
/// Every field is optional and omitted from JSON when absent. The GraphQL
/// strategy fills the `shortcode`/`owner`/`display_*` family, the cookie
/// strategy the `code`/`username`/`*_versions` family; shared fields
/// (caption, product type, partnership, location, duration) come from either.
/// Opaque sub-trees are passed through as JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedMedia {
    // Identity
    #[serde(rename = "__typename", skip_serializing_if = "Option::is_none")]
    pub typename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shortcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,
    /// Unix timestamp (`taken_at`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,

    // Author
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_verified: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,

    // Engagement
    #[serde(skip_serializing_if = "Option::is_none")]
    pub like_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_view_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_play_count: Option<u64>,

    // Dimensions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u64>,

    // Media
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_video: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_audio: Option<bool>,
    /// Seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_resources: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_src: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    /// Image candidate list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_versions: Option<Value>,
    /// Video candidate list; always a list when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_versions: Option<Value>,

    // Carousel children
    /// Sidecar edges from the GraphQL document
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sidecar: Option<Value>,
    /// Present only for carousel posts; an empty carousel stays an empty list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carousel_media: Option<Vec<CarouselItem>>,

    // Partnership / location / music
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_paid_partnership: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clips_music_attribution_info: Option<Value>,
}

/// One child of a carousel post.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CarouselItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_versions: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_versions: Option<Value>,
}
