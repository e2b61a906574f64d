//! Raw input to canonical [`Profile`].
//!
//! Every field gets exactly one default, lists are resolved onto the five fixed statuses
//! and URLs are made absolute against the site root. Running the normalizer on its own
//! output is the identity.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use tracing::warn;
use url::Url;

use crate::core::client::constants::{
    DEFAULT_AVATAR, DEFAULT_BASE_SITE, DEFAULT_BIO, DEFAULT_ITEM_TITLE, DEFAULT_ITEM_TYPE,
    DEFAULT_USERNAME,
};
use crate::core::wire::count_from_value;

use super::raw::{RawItem, RawProfile, RawStatus};
use super::{Item, Profile, StatKey, Stats, Status, StatusSlug};

static DEFAULT_SITE: LazyLock<Url> =
    LazyLock::new(|| Url::parse(DEFAULT_BASE_SITE).expect("DEFAULT_BASE_SITE is a valid URL"));

/// Converts raw profile input into the canonical model.
#[derive(Debug, Clone)]
pub struct Normalizer {
    site: Url,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            site: DEFAULT_SITE.clone(),
        }
    }
}

impl Normalizer {
    /// Normalizer resolving relative links against `site`.
    pub fn new(site: Url) -> Self {
        Self { site }
    }

    pub fn normalize(&self, raw: &RawProfile) -> Profile {
        Profile {
            username: trimmed(raw.username.as_deref())
                .unwrap_or(DEFAULT_USERNAME)
                .to_string(),
            avatar: self.normalize_image(raw.avatar.as_deref()),
            banner: raw.banner.as_deref().and_then(|b| self.resolve_url(b)),
            bio: trimmed(raw.bio.as_deref()).unwrap_or(DEFAULT_BIO).to_string(),
            stats: raw.stats.as_ref().map(normalize_stats).unwrap_or_default(),
            statuses: self.normalize_statuses(raw.statuses.as_deref().unwrap_or_default()),
            last_updated: raw.last_updated.clone().unwrap_or_default(),
        }
    }

    fn normalize_statuses(&self, raw: &[RawStatus]) -> Vec<Status> {
        let mut resolved: BTreeMap<StatusSlug, Status> = BTreeMap::new();

        for (index, status) in raw.iter().enumerate() {
            let raw_slug = trimmed(status.slug.as_deref())
                .map(str::to_string)
                .or_else(|| trimmed(status.label.as_deref()).map(slugify))
                .unwrap_or_else(|| format!("list-{}", index + 1));

            let Some(slug) = StatusSlug::resolve(&raw_slug) else {
                warn!(slug = %raw_slug, position = index, "dropping list with unknown status");
                continue;
            };

            let items = status
                .items
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(|item| self.normalize_item(item));

            match resolved.get_mut(&slug) {
                Some(existing) => existing.items.extend(items),
                None => {
                    let label = trimmed(status.label.as_deref())
                        .map_or_else(|| slug.label().to_string(), str::to_string);
                    resolved.insert(
                        slug,
                        Status {
                            slug,
                            label,
                            items: items.collect(),
                        },
                    );
                }
            }
        }

        StatusSlug::ALL
            .into_iter()
            .map(|slug| {
                resolved.remove(&slug).unwrap_or_else(|| Status {
                    slug,
                    label: slug.label().to_string(),
                    items: Vec::new(),
                })
            })
            .collect()
    }

    pub fn normalize_item(&self, raw: &RawItem) -> Item {
        Item {
            title: trimmed(raw.title.as_deref())
                .unwrap_or(DEFAULT_ITEM_TITLE)
                .to_string(),
            url: raw
                .url
                .as_deref()
                .and_then(|u| self.resolve_url(u))
                .unwrap_or_else(|| self.site.to_string()),
            image: self.normalize_image(raw.image.as_deref()),
            kind: trimmed(raw.kind.as_deref())
                .unwrap_or(DEFAULT_ITEM_TYPE)
                .to_string(),
            progress: text_or_empty(raw.progress.as_deref()),
            rating: text_or_empty(raw.rating.as_deref()),
            notes: text_or_empty(raw.notes.as_deref()),
        }
    }

    /// Absolute image URL, or the placeholder when there is no usable source.
    pub fn normalize_image(&self, src: Option<&str>) -> String {
        src.and_then(|s| self.resolve_url(s))
            .unwrap_or_else(|| DEFAULT_AVATAR.to_string())
    }

    /// Make `raw` absolute.
    ///
    /// `//host/x` gains `https:`, `/x` gains the site origin, absolute URLs are returned
    /// unchanged and anything else is joined onto the site root.
    pub fn resolve_url(&self, raw: &str) -> Option<String> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        if raw.starts_with("//") {
            return Some(format!("https:{raw}"));
        }
        if raw.starts_with('/') {
            return Some(format!("{}{raw}", self.site.origin().ascii_serialization()));
        }
        if Url::parse(raw).is_ok() {
            return Some(raw.to_string());
        }
        self.site.join(raw).ok().map(String::from)
    }
}

fn normalize_stats(raw: &BTreeMap<String, serde_json::Value>) -> Stats {
    let mut stats = Stats::default();
    for (key, value) in raw {
        if let Some(key) = StatKey::from_key(key) {
            stats.set(key, count_from_value(value));
        }
    }
    stats
}

fn trimmed(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

fn text_or_empty(s: Option<&str>) -> String {
    trimmed(s).unwrap_or_default().to_string()
}

/// Lower-case `value` and collapse every run of non-alphanumerics into one `-`.
pub fn slugify(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut pending_sep = false;
    for c in value.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() {
            if pending_sep && !out.is_empty() {
                out.push('-');
            }
            pending_sep = false;
            out.push(c);
        } else {
            pending_sep = true;
        }
    }
    out
}
