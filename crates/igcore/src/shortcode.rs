//! Shortcode extraction from Instagram post, reel and story URLs.

use lazy_regex::regex_captures;
use std::fmt;

/// The token identifying a single post, reel or story.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shortcode(String);

impl Shortcode {
    /// Find the shortcode in an arbitrary string.
    ///
    /// Matches `instagram.com/[<username>/](p|reel|reels|stories)/<code>` anywhere
    /// in the input, so scheme, `www.`, trailing slashes and query strings are all
    /// tolerated. Returns `None` when nothing matches.
    pub fn from_url(input: &str) -> Option<Self> {
        let (_, code) = regex_captures!(
            r"instagram\.com/(?:[A-Za-z0-9_.]+/)?(?:p|reels?|stories)/([A-Za-z0-9_-]+)",
            input
        )?;
        Some(Self(code.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Shortcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Shorthand for [`Shortcode::from_url`].
pub fn extract_shortcode(input: &str) -> Option<Shortcode> {
    Shortcode::from_url(input)
}
