//! Instagram post metadata without an official API.
//!
//! Turns a post/reel/story URL into a [`NormalizedMedia`] record through one of
//! two strategies:
//! - [`GraphqlSource`]: anonymous, uses the web app's GraphQL query
//! - [`CookieSource`]: authenticated, uses a logged-in session cookie
//!
//! Both return an [`Envelope`] (`ok`/`status`/`data` or `error`/`details`).
//!
//! ```no_run
//! use igcore::{GraphqlSource, IgConfig, MediaSource};
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Arc::new(IgConfig::from_env()?);
//! let source = GraphqlSource::new(config)?;
//! let envelope = source.fetch("https://www.instagram.com/p/C1abc/", None).await?;
//! println!("{}", serde_json::to_string(&envelope)?);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod envelope;
pub mod error;
pub mod fallback;
pub mod media;
pub mod shortcode;
pub mod source;

pub use config::IgConfig;
pub use envelope::{Envelope, Failure};
pub use error::{ConfigError, IgError, IgResult};
pub use media::{CarouselItem, NormalizedMedia};
pub use shortcode::{extract_shortcode, Shortcode};
pub use source::cookie::CookieSource;
pub use source::graphql::GraphqlSource;
pub use source::{build_client, MediaSource};
