//! Centralized constants for the upstream site, browser headers and model defaults.

/// Desktop UA so the upstream serves the regular markup instead of a bot wall.
pub(crate) const USER_AGENT: &str = concat!(
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) ",
    "AppleWebKit/537.36 (KHTML, like Gecko) ",
    "Chrome/120.0.0.0 Safari/537.36"
);

pub(crate) const ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8";

pub(crate) const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// Upstream site root. Profile pages hang off `users/<name>/anime`.
pub const DEFAULT_BASE_SITE: &str = "https://www.anime-planet.com/";

/// Referer sent with every relay request.
pub(crate) const DEFAULT_REFERER: &str = "https://www.anime-planet.com/";

/// Placeholder used for avatars and cover art when the page offers none.
pub const DEFAULT_AVATAR: &str =
    "https://cdn.anime-planet.com/images/characters/thumbs/21249.jpg?t=1578669141";

pub(crate) const DEFAULT_USERNAME: &str = "Anime Fan";
pub(crate) const DEFAULT_BIO: &str = "This profile is keeping their secrets for now.";
pub(crate) const DEFAULT_ITEM_TITLE: &str = "Untitled entry";
pub(crate) const DEFAULT_ITEM_TYPE: &str = "Anime";

/// Username used by the boundary endpoint when the query omits one.
pub(crate) const DEFAULT_QUERY_USERNAME: &str = "Swmarly";

/// Upper bound on listing pages followed per status.
pub(crate) const DEFAULT_MAX_PAGES: u32 = 10;
