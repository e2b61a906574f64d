use std::collections::BTreeMap;

use reqwest::header::HeaderMap;

use crate::core::GardenError;

/// Read the response body as text, reporting a broken stream as a network failure.
pub(crate) async fn get_text(resp: reqwest::Response, url: &str) -> Result<String, GardenError> {
    resp.text().await.map_err(|source| GardenError::Network {
        url: url.to_string(),
        source,
    })
}

/// Flatten response headers into lower-cased names; repeated headers are joined with `", "`.
pub(crate) fn collect_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut out: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
        out.entry(name.as_str().to_ascii_lowercase())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert(value);
    }
    out
}
