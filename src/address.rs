//! Upstream page addresses.

use url::Url;

use crate::core::GardenError;

/// Which listing page of a status to address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingPage {
    /// Upstream status id (see [`StatusSlug::remote_id`](crate::StatusSlug::remote_id)).
    pub status: String,
    /// 1-based page number; `None` means the first page.
    pub page: Option<String>,
}

impl ListingPage {
    pub fn new(status: impl Into<String>, page: u32) -> Self {
        Self {
            status: status.into(),
            page: Some(page.to_string()),
        }
    }
}

/// Build the address of a user's list page.
///
/// Without `listing` this is the profile summary, `<site>/users/<name>/anime`. With it,
/// the ajax listing `...?ajax=1&status=<id>&page=<n>`. Every caller-supplied value is
/// percent-encoded.
///
/// # Errors
///
/// Returns `GardenError::InvalidParams` for the usernames `.` and `..`: URLs resolve them
/// as dot segments, so no address can carry them verbatim.
pub fn page_address(
    site: &Url,
    username: &str,
    listing: Option<&ListingPage>,
) -> Result<Url, GardenError> {
    if matches!(username, "." | "..") {
        return Err(GardenError::InvalidParams(format!(
            "username `{username}` cannot be addressed"
        )));
    }

    let mut url = site.clone();
    url.set_query(None);
    url.set_fragment(None);
    url.path_segments_mut()
        .map_err(|()| GardenError::InvalidParams(format!("site root `{site}` cannot be a base")))?
        .pop_if_empty()
        .extend(["users", username, "anime"]);

    if let Some(listing) = listing {
        url.query_pairs_mut()
            .append_pair("ajax", "1")
            .append_pair("status", &listing.status)
            .append_pair("page", listing.page.as_deref().unwrap_or("1"));
    }
    Ok(url)
}

/// Summary address for `username`.
///
/// # Errors
///
/// See [`page_address`].
pub fn summary_address(site: &Url, username: &str) -> Result<Url, GardenError> {
    page_address(site, username, None)
}

/// Listing address for `username`, status id `status` and page `page`.
///
/// # Errors
///
/// See [`page_address`].
pub fn listing_address(
    site: &Url,
    username: &str,
    status: &str,
    page: u32,
) -> Result<Url, GardenError> {
    page_address(site, username, Some(&ListingPage::new(status, page)))
}
