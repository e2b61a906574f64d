//! The `GET /api/profile` relay handler, independent of any HTTP server.
//!
//! The handler fetches one upstream page and wraps it in a JSON envelope. Upstream failures
//! are answered with the sample profile when one is available.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use url::Url;

use crate::address::{self, ListingPage};
use crate::core::client::constants::DEFAULT_QUERY_USERNAME;
use crate::core::Relay;
use crate::profile::{Profile, SampleProvider};

/// Query parameters of the relay endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileQuery {
    pub username: Option<String>,
    /// Upstream status id; without it the summary page is fetched.
    pub status: Option<String>,
    pub page: Option<String>,
    /// Accepted and ignored.
    pub cache_bust: Option<String>,
}

impl ProfileQuery {
    /// Parse a raw `a=b&c=d` query string. Unknown keys are ignored and the last repeat wins.
    pub fn from_query(query: &str) -> Self {
        let mut out = Self::default();
        for (key, value) in url::form_urlencoded::parse(query.trim_start_matches('?').as_bytes()) {
            let value = Some(value.into_owned());
            match key.as_ref() {
                "username" => out.username = value,
                "status" => out.status = value,
                "page" => out.page = value,
                "cacheBust" => out.cache_bust = value,
                _ => {}
            }
        }
        out
    }

    fn username(&self) -> &str {
        non_empty(self.username.as_deref()).unwrap_or(DEFAULT_QUERY_USERNAME)
    }

    fn listing(&self) -> Option<ListingPage> {
        non_empty(self.status.as_deref()).map(|status| ListingPage {
            status: status.to_string(),
            page: non_empty(self.page.as_deref()).map(str::to_string),
        })
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

/// Where an envelope's body came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeSource {
    Remote,
    Sample,
    Error,
}

/// Upstream markup on success, the sample profile on fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnvelopeBody {
    Html(String),
    Profile(Box<Profile>),
}

/// JSON document returned by the relay endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileEnvelope {
    pub ok: bool,
    pub status_code: u16,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<EnvelopeBody>,
    pub source: EnvelopeSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Answer one relay request.
///
/// Returns the HTTP status to send together with the envelope: 200 for upstream success
/// and for sample fallback (envelope `statusCode` 503), 500 when the sample is unavailable.
pub async fn handle_profile_request<R: Relay>(
    relay: &R,
    site: &Url,
    sample: &SampleProvider,
    query: &ProfileQuery,
) -> (u16, ProfileEnvelope) {
    let listing = query.listing();
    let fetched = match address::page_address(site, query.username(), listing.as_ref()) {
        Ok(url) => relay.fetch(&url).await.map(|resp| (url, resp)),
        Err(e) => Err(e),
    };

    let error = match fetched {
        Ok((url, resp)) => {
            info!(url = %url, status = resp.status, "relayed upstream page");
            return (
                200,
                ProfileEnvelope {
                    ok: true,
                    status_code: resp.status,
                    headers: resp.headers,
                    body: Some(EnvelopeBody::Html(resp.body)),
                    source: EnvelopeSource::Remote,
                    error: None,
                },
            );
        }
        Err(e) => e,
    };

    warn!(username = query.username(), error = %error, "relay failed");
    match sample.get_sample().await {
        Some(profile) => (
            200,
            ProfileEnvelope {
                ok: false,
                status_code: 503,
                headers: BTreeMap::new(),
                body: Some(EnvelopeBody::Profile(Box::new(profile))),
                source: EnvelopeSource::Sample,
                error: Some(error.to_string()),
            },
        ),
        None => (
            500,
            ProfileEnvelope {
                ok: false,
                status_code: 500,
                headers: BTreeMap::new(),
                body: None,
                source: EnvelopeSource::Error,
                error: Some(error.to_string()),
            },
        ),
    }
}
