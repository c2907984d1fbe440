//! Shared fixtures for the upstream integration tests.

#![allow(dead_code)]

use igcore::IgConfig;
use serde_json::{json, Value};
use std::sync::Arc;
use url::Url;
use wiremock::MockServer;

pub const TEST_USER_AGENT: &str = "test-agent/1.0";
pub const TEST_APP_ID: &str = "936619743392459";

/// Config pointing both strategies at the mock server.
pub fn test_config(server: &MockServer) -> IgConfig {
    IgConfig::new(TEST_USER_AGENT, TEST_APP_ID).with_base_url(Url::parse(&server.uri()).unwrap())
}

pub fn shared(config: IgConfig) -> Arc<IgConfig> {
    Arc::new(config)
}

pub fn graphql_document() -> Value {
    json!({
        "data": {
            "xdt_shortcode_media": {
                "__typename": "XDTGraphImage",
                "shortcode": "C1abc",
                "dimensions": { "height": 1350, "width": 1080 },
                "display_url": "https://cdn.example/display.jpg",
                "is_video": false,
                "edge_media_to_caption": { "edges": [{ "node": { "text": "sunset" } }] },
                "owner": { "id": "1", "username": "photographer" },
                "product_type": "feed"
            }
        },
        "extensions": { "is_final": true },
        "status": "ok"
    })
}

pub fn private_api_document() -> Value {
    json!({
        "items": [{
            "code": "C1abc",
            "taken_at": 1700000000,
            "product_type": "feed",
            "user": { "username": "photographer", "full_name": "Photo Grapher", "is_verified": false },
            "caption": { "text": "sunset" },
            "like_count": 321,
            "comment_count": 12,
            "original_height": 1350,
            "original_width": 1080,
            "image_versions2": { "candidates": [{ "url": "https://cdn.example/1080.jpg", "width": 1080, "height": 1350 }] }
        }],
        "num_results": 1,
        "more_available": false
    })
}

pub fn carousel_document() -> Value {
    json!({
        "items": [{
            "code": "Ccarousel",
            "product_type": "carousel_container",
            "user": { "username": "traveller" },
            "carousel_media": [
                { "image_versions2": { "candidates": [{ "url": "https://cdn.example/a.jpg" }] } },
                {
                    "image_versions2": { "candidates": [{ "url": "https://cdn.example/b.jpg" }] },
                    "video_versions": [{ "url": "https://cdn.example/b.mp4" }]
                }
            ]
        }]
    })
}
