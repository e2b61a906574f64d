//! The relay seam: one GET on the caller's behalf, nothing else.

use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;

use tracing::debug;
use url::Url;

use crate::core::{GardenClient, GardenError, net};

/// Raw outcome of a single relayed GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayResponse {
    /// The HTTP status code (always within `200..300` for a successful fetch).
    pub status: u16,
    /// Response headers with lower-cased names.
    pub headers: BTreeMap<String, String>,
    /// The body decoded as text.
    pub body: String,
}

/// Boxed future returned by [`Relay::fetch`].
pub type RelayFuture<'a> =
    Pin<Box<dyn Future<Output = Result<RelayResponse, GardenError>> + Send + 'a>>;

/// Something that can fetch a remote page.
///
/// Implemented by [`GardenClient`] for real traffic. Tests and embedders can plug in their
/// own implementation (a recorded fixture set, a proxy, a browser) without touching the
/// loader.
pub trait Relay: Send + Sync {
    /// Issues exactly one GET for `url`.
    ///
    /// Implementations must not retry. A status outside `200..300` is reported as
    /// [`GardenError::Upstream`], a transport failure as [`GardenError::Network`].
    fn fetch<'a>(&'a self, url: &'a Url) -> RelayFuture<'a>;
}

impl<R: Relay + ?Sized> Relay for &R {
    fn fetch<'a>(&'a self, url: &'a Url) -> RelayFuture<'a> {
        (**self).fetch(url)
    }
}

impl<R: Relay + ?Sized> Relay for std::sync::Arc<R> {
    fn fetch<'a>(&'a self, url: &'a Url) -> RelayFuture<'a> {
        (**self).fetch(url)
    }
}

impl Relay for GardenClient {
    fn fetch<'a>(&'a self, url: &'a Url) -> RelayFuture<'a> {
        Box::pin(async move {
            let resp = self
                .http()
                .get(url.clone())
                .send()
                .await
                .map_err(|source| GardenError::Network {
                    url: url.to_string(),
                    source,
                })?;

            let status = resp.status();
            debug!(%url, status = status.as_u16(), "relay response");
            if !status.is_success() {
                return Err(GardenError::Upstream {
                    status: status.as_u16(),
                    url: url.to_string(),
                });
            }

            let headers = net::collect_headers(resp.headers());
            let body = net::get_text(resp, url.as_str()).await?;
            Ok(RelayResponse {
                status: status.as_u16(),
                headers,
                body,
            })
        })
    }
}
