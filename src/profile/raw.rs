//! Raw, untrusted profile input: extraction output, the sample resource, or any
//! `Profile`-shaped JSON. Every field is optional and wrongly-typed JSON reads as absent.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::wire::{lenient, lenient_string, lenient_vec};

use super::{Item, Profile, Stats, Status};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProfile {
    #[serde(default, deserialize_with = "lenient_string")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub avatar: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub banner: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub bio: Option<String>,
    /// Stat key to value; values are interpreted by the normalizer.
    #[serde(default, deserialize_with = "lenient")]
    pub stats: Option<BTreeMap<String, Value>>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub statuses: Option<Vec<RawStatus>>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub last_updated: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawStatus {
    #[serde(default, deserialize_with = "lenient_string")]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub label: Option<String>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub items: Option<Vec<RawItem>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawItem {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub image: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub progress: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub rating: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub notes: Option<String>,
}

impl RawProfile {
    /// Parse raw JSON text.
    ///
    /// # Errors
    ///
    /// Fails only when the text is not JSON or not an object; individual fields never fail.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

pub(crate) fn stats_to_raw(stats: &Stats) -> BTreeMap<String, Value> {
    stats
        .present()
        .map(|(k, v)| (k.as_str().to_string(), Value::from(v)))
        .collect()
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

impl From<&Item> for RawItem {
    fn from(item: &Item) -> Self {
        Self {
            title: non_empty(&item.title),
            url: non_empty(&item.url),
            image: non_empty(&item.image),
            kind: non_empty(&item.kind),
            progress: non_empty(&item.progress),
            rating: non_empty(&item.rating),
            notes: non_empty(&item.notes),
        }
    }
}

impl From<&Status> for RawStatus {
    fn from(status: &Status) -> Self {
        Self {
            slug: Some(status.slug.as_str().to_string()),
            label: non_empty(&status.label),
            items: Some(status.items.iter().map(RawItem::from).collect()),
        }
    }
}

impl From<&Profile> for RawProfile {
    fn from(profile: &Profile) -> Self {
        Self {
            username: non_empty(&profile.username),
            avatar: non_empty(&profile.avatar),
            banner: profile.banner.clone(),
            bio: non_empty(&profile.bio),
            stats: Some(stats_to_raw(&profile.stats)),
            statuses: Some(profile.statuses.iter().map(RawStatus::from).collect()),
            last_updated: non_empty(&profile.last_updated),
        }
    }
}
