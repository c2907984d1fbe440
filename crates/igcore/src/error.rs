use thiserror::Error;

/// Errors raised while resolving an Instagram URL into media metadata.
///
/// Variants split into two groups:
/// - expected failures (`InvalidUrl`, `MissingCookie`, `UpstreamStatus`, `NotFound`)
///   are projected into an [`Envelope`](crate::envelope::Envelope) and never escape
///   a source's public entry point;
/// - unexpected failures (`Transport`, `Url`) propagate to the caller, which is
///   expected to answer them with a 500.
#[derive(Error, Debug)]
pub enum IgError {
    /// The input has no extractable shortcode
    #[error("Invalid Instagram URL.")]
    InvalidUrl,

    /// Cookie strategy called without an override and without a configured cookie
    #[error("Missing cookie. Set env COOKIE or pass the x-ig-cookie header.")]
    MissingCookie,

    /// Instagram answered with a non-success status
    #[error("Instagram request failed ({status})")]
    UpstreamStatus {
        status: u16,
        /// Response body, already truncated for diagnostics
        body: String,
    },

    /// The request succeeded but no media node could be located
    #[error("Media not found or response shape changed.")]
    NotFound { details: Option<String> },

    /// Connection, TLS, DNS or client construction failure
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Endpoint could not be built from the configured base URL
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),
}

impl IgError {
    /// Whether this failure is part of the documented error taxonomy.
    pub fn is_expected(&self) -> bool {
        !matches!(self, IgError::Transport(_) | IgError::Url(_))
    }

    /// HTTP status an outer layer should emit for this failure.
    pub fn status(&self) -> u16 {
        match self {
            IgError::InvalidUrl | IgError::MissingCookie => 400,
            IgError::UpstreamStatus { status, .. } => *status,
            IgError::NotFound { .. } => 404,
            IgError::Transport(_) | IgError::Url(_) => 500,
        }
    }

    /// Best-effort diagnostic attached to the failure envelope.
    pub fn details(&self) -> Option<&str> {
        match self {
            IgError::UpstreamStatus { body, .. } => Some(body),
            IgError::NotFound { details } => details.as_deref(),
            _ => None,
        }
    }

    /// Returns subcategory for logs
    pub fn subcategory(&self) -> &'static str {
        match self {
            IgError::InvalidUrl => "invalid_url",
            IgError::MissingCookie => "missing_cookie",
            IgError::UpstreamStatus { .. } => "upstream_status",
            IgError::NotFound { .. } => "not_found",
            IgError::Transport(_) => "transport",
            IgError::Url(_) => "url",
        }
    }
}

/// Errors raised while loading process configuration at startup.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required key is absent or empty
    #[error("Missing env: {0}")]
    Missing(&'static str),

    /// The configuration sources could not be read or deserialized
    #[error("Configuration error: {0}")]
    Figment(#[from] figment::Error),

    /// `IG_BASE_URL` is not a valid absolute URL
    #[error("Invalid IG_BASE_URL: {0}")]
    BaseUrl(#[from] url::ParseError),
}

/// Type alias for Result with IgError
pub type IgResult<T> = Result<T, IgError>;
