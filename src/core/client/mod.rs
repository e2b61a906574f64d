//! Public client surface + builder.
//! Defaults (UA, headers, upstream root) live in `constants`.

pub(crate) mod constants;

use crate::core::GardenError;
use constants::{ACCEPT, ACCEPT_LANGUAGE, DEFAULT_BASE_SITE, DEFAULT_REFERER, USER_AGENT};
use reqwest::Client;
use reqwest::header::{self, HeaderMap, HeaderValue};
use std::time::Duration;
use url::Url;

/// HTTP client for the upstream site.
///
/// Cloning is cheap; the underlying connection pool is shared. The client is the
/// production [`Relay`](crate::Relay) implementation.
#[derive(Debug, Clone)]
pub struct GardenClient {
    http: Client,
    base_site: Url,
}

impl GardenClient {
    /// Create a new builder.
    pub fn builder() -> GardenClientBuilder {
        GardenClientBuilder::default()
    }

    /// Build a client with every default.
    ///
    /// # Errors
    ///
    /// Returns `GardenError::Http` if the TLS backend cannot be initialized.
    pub fn new() -> Result<Self, GardenError> {
        Self::builder().build()
    }

    /// Root of the upstream site; page addresses are built relative to it.
    pub fn base_site(&self) -> &Url {
        &self.base_site
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }
}

/* ----------------------- Builder ----------------------- */

#[derive(Default)]
pub struct GardenClientBuilder {
    base_site: Option<Url>,
    user_agent: Option<String>,
    referer: Option<String>,
    accept_language: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl GardenClientBuilder {
    /// Override the upstream root (e.g., a mock server in tests).
    #[must_use]
    pub fn base_site(mut self, url: Url) -> Self {
        self.base_site = Some(url);
        self
    }

    /// Override the User-Agent.
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Override the Referer header.
    #[must_use]
    pub fn referer(mut self, referer: impl Into<String>) -> Self {
        self.referer = Some(referer.into());
        self
    }

    /// Override the Accept-Language header.
    #[must_use]
    pub fn accept_language(mut self, lang: impl Into<String>) -> Self {
        self.accept_language = Some(lang.into());
        self
    }

    /// Set a global request timeout (overall). Default: none.
    #[must_use]
    pub fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: none.
    #[must_use]
    pub fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    /// Finish the builder.
    ///
    /// # Errors
    ///
    /// Returns `GardenError::InvalidParams` for a non-http(s) site root or a header value that
    /// is not valid ASCII, and `GardenError::Http` if the HTTP client cannot be built.
    pub fn build(self) -> Result<GardenClient, GardenError> {
        let mut base_site = match self.base_site {
            Some(url) => url,
            None => Url::parse(DEFAULT_BASE_SITE)?,
        };
        if !matches!(base_site.scheme(), "http" | "https") || base_site.cannot_be_a_base() {
            return Err(GardenError::InvalidParams(format!(
                "site root must be an http(s) URL, got `{base_site}`"
            )));
        }
        if !base_site.path().ends_with('/') {
            let path = format!("{}/", base_site.path());
            base_site.set_path(&path);
        }

        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static(ACCEPT));
        headers.insert(
            header::ACCEPT_LANGUAGE,
            header_value(self.accept_language.as_deref().unwrap_or(ACCEPT_LANGUAGE))?,
        );
        headers.insert(
            header::REFERER,
            header_value(self.referer.as_deref().unwrap_or(DEFAULT_REFERER))?,
        );

        let mut httpb = reqwest::Client::builder()
            .user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT))
            .default_headers(headers);

        if let Some(t) = self.timeout {
            httpb = httpb.timeout(t);
        }
        if let Some(ct) = self.connect_timeout {
            httpb = httpb.connect_timeout(ct);
        }

        Ok(GardenClient {
            http: httpb.build()?,
            base_site,
        })
    }
}

fn header_value(raw: &str) -> Result<HeaderValue, GardenError> {
    HeaderValue::from_str(raw)
        .map_err(|e| GardenError::InvalidParams(format!("invalid header value `{raw}`: {e}")))
}
