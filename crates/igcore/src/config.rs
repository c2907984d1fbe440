//! Process-wide configuration shared by both fetch strategies.
//!
//! Loaded once at startup and passed into each source at construction time.
//! Sources read from it but never mutate it, so one `Arc<IgConfig>` serves
//! any number of concurrent requests.
//!
//! Keys (environment variables, or the same names lowercased in `igmeta.toml`):
//! - `USER_AGENT`: required
//! - `X_IG_APP_ID`: required
//! - `X_FB_LSD`, `X_ASBD_ID`, `IG_DOC_ID`: GraphQL tokens, with built-in defaults
//! - `COOKIE`: default session cookie for the cookie strategy
//! - `IG_BASE_URL`: provider origin, defaults to `https://www.instagram.com`

use figment::providers::{Format, Toml};
use figment::value::{Dict, Map, Value};
use figment::{Figment, Metadata, Profile, Provider};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer};
use url::Url;

use crate::error::ConfigError;

/// Provider origin used when `IG_BASE_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "https://www.instagram.com";

/// Facebook LSD token (anti-CSRF, public static value used by web clients).
pub const DEFAULT_FB_LSD: &str = "AVqbxe3J_YA";

/// Facebook ASBD ID (public, embedded in the web app).
pub const DEFAULT_ASBD_ID: &str = "129477";

/// GraphQL document id for the shortcode media query. Rotates every few weeks.
pub const DEFAULT_DOC_ID: &str = "10015901848480474";

/// Optional config file merged under the environment.
pub const CONFIG_FILE: &str = "igmeta.toml";

const ENV_KEYS: &[&str] = &[
    "USER_AGENT",
    "X_IG_APP_ID",
    "X_FB_LSD",
    "X_ASBD_ID",
    "IG_DOC_ID",
    "COOKIE",
    "IG_BASE_URL",
];

/// Figment with the standard sources: `igmeta.toml`, then the environment.
pub fn figment() -> Figment {
    Figment::new()
        .merge(Toml::file(CONFIG_FILE))
        .merge(StringEnv::from_process())
}

/// Environment provider for [`ENV_KEYS`] that keeps every value as the exact
/// string that was set.
///
/// `figment::providers::Env` parses values, so `X_ASBD_ID=0129477` would arrive
/// as the integer `129477`. Tokens are sent upstream verbatim and must not be
/// reinterpreted.
#[derive(Debug, Clone, Default)]
pub struct StringEnv {
    vars: Vec<(String, String)>,
}

impl StringEnv {
    /// Snapshot of the process environment; non-UTF-8 entries are skipped.
    pub fn from_process() -> Self {
        Self::from_vars(
            std::env::vars_os().filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?))),
        )
    }

    /// Keep only the known keys (case-insensitive) from `vars`.
    pub fn from_vars<K, V>(vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let vars = vars
            .into_iter()
            .map(|(k, v)| -> (String, String) { (k.into(), v.into()) })
            .filter(|(k, _)| ENV_KEYS.iter().any(|known| known.eq_ignore_ascii_case(k)))
            .map(|(k, v)| (k.to_ascii_lowercase(), v))
            .collect();
        Self { vars }
    }
}

impl Provider for StringEnv {
    fn metadata(&self) -> Metadata {
        Metadata::named("environment variable(s)")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, figment::Error> {
        let dict: Dict = self
            .vars
            .iter()
            .map(|(k, v)| (k.clone(), Value::from(v.clone())))
            .collect();
        Ok(Profile::Default.collect(dict))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    #[serde(deserialize_with = "lenient_string")]
    user_agent: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    x_ig_app_id: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    x_fb_lsd: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    x_asbd_id: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    ig_doc_id: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    cookie: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    ig_base_url: Option<String>,
}

/// `igmeta.toml` may spell numeric-looking tokens (app id, doc id) as bare
/// integers; accept them as strings.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Str(String),
        Unsigned(u64),
        Signed(i64),
        Float(f64),
        Bool(bool),
    }

    let value = Option::<Scalar>::deserialize(deserializer)?;
    Ok(value
        .map(|scalar| match scalar {
            Scalar::Str(s) => s,
            Scalar::Unsigned(n) => n.to_string(),
            Scalar::Signed(n) => n.to_string(),
            Scalar::Float(n) => n.to_string(),
            Scalar::Bool(b) => b.to_string(),
        })
        .filter(|s| !s.trim().is_empty()))
}

/// Immutable configuration for [`GraphqlSource`](crate::source::graphql::GraphqlSource)
/// and [`CookieSource`](crate::source::cookie::CookieSource).
#[derive(Debug)]
pub struct IgConfig {
    pub user_agent: String,
    pub app_id: String,
    pub fb_lsd: String,
    pub asbd_id: String,
    pub doc_id: String,
    /// Default session cookie. Redacted in `Debug`.
    pub cookie: Option<SecretString>,
    pub base_url: Url,
}

impl IgConfig {
    /// Configuration with the required values and built-in defaults for the rest.
    pub fn new(user_agent: impl Into<String>, app_id: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            app_id: app_id.into(),
            fb_lsd: DEFAULT_FB_LSD.to_string(),
            asbd_id: DEFAULT_ASBD_ID.to_string(),
            doc_id: DEFAULT_DOC_ID.to_string(),
            cookie: None,
            base_url: default_base_url(),
        }
    }

    pub fn with_cookie(mut self, cookie: impl Into<String>) -> Self {
        let cookie: String = cookie.into();
        self.cookie = (!cookie.trim().is_empty()).then(|| SecretString::from(cookie));
        self
    }

    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = with_trailing_slash(base_url);
        self
    }

    pub fn with_doc_id(mut self, doc_id: impl Into<String>) -> Self {
        self.doc_id = doc_id.into();
        self
    }

    /// Load from `igmeta.toml` and the environment. Fails fast when
    /// `USER_AGENT` or `X_IG_APP_ID` is missing.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_figment(&figment())
    }

    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let raw: RawConfig = figment.extract()?;

        let user_agent = raw.user_agent.ok_or(ConfigError::Missing("USER_AGENT"))?;
        let app_id = raw.x_ig_app_id.ok_or(ConfigError::Missing("X_IG_APP_ID"))?;
        let base_url = match raw.ig_base_url {
            Some(url) => with_trailing_slash(Url::parse(url.trim())?),
            None => default_base_url(),
        };

        Ok(Self {
            user_agent,
            app_id,
            fb_lsd: raw.x_fb_lsd.unwrap_or_else(|| DEFAULT_FB_LSD.to_string()),
            asbd_id: raw.x_asbd_id.unwrap_or_else(|| DEFAULT_ASBD_ID.to_string()),
            doc_id: raw.ig_doc_id.unwrap_or_else(|| DEFAULT_DOC_ID.to_string()),
            cookie: raw.cookie.map(SecretString::from),
            base_url,
        })
    }

    /// True when a default cookie is configured.
    pub fn has_cookie(&self) -> bool {
        self.cookie
            .as_ref()
            .is_some_and(|c| !c.expose_secret().trim().is_empty())
    }
}

/// Endpoint paths are joined relative to the base, so a base with a path
/// prefix must end in `/` or its last segment would be replaced.
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[allow(clippy::expect_used)]
fn default_base_url() -> Url {
    Url::parse(DEFAULT_BASE_URL).expect("DEFAULT_BASE_URL is a valid absolute URL")
}
