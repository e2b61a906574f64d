use thiserror::Error;

/// The primary error type for all fallible operations in this crate.
#[derive(Debug, Error)]
pub enum GardenError {
    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// A provided URL could not be parsed.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The upstream site answered with a status outside `200..300`.
    #[error("Upstream responded with status {status} at {url}")]
    Upstream {
        /// The HTTP status code.
        status: u16,
        /// The URL that returned the error.
        url: String,
    },

    /// The request never produced a usable response (connect failure, reset, timeout,
    /// unreadable body).
    #[error("Network error while fetching {url}: {source}")]
    Network {
        /// The URL being fetched.
        url: String,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// JSON could not be encoded or decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The caller supplied an invalid configuration value or username.
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    /// The bundled or configured sample profile is missing or corrupt.
    #[error("Sample profile unavailable: {0}")]
    SampleUnavailable(String),
}
