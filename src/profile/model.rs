use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the five fixed watch-state lists, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatusSlug {
    Watching,
    Completed,
    OnHold,
    Dropped,
    WantToWatch,
}

impl StatusSlug {
    /// Every status, in the order a profile presents them.
    pub const ALL: [Self; 5] = [
        Self::Watching,
        Self::Completed,
        Self::OnHold,
        Self::Dropped,
        Self::WantToWatch,
    ];

    /// Stable identifier (`onHold`, `wantToWatch`, ...).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Watching => "watching",
            Self::Completed => "completed",
            Self::OnHold => "onHold",
            Self::Dropped => "dropped",
            Self::WantToWatch => "wantToWatch",
        }
    }

    /// Human-readable list name.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Watching => "Watching",
            Self::Completed => "Completed",
            Self::OnHold => "On Hold",
            Self::Dropped => "Dropped",
            Self::WantToWatch => "Want to Watch",
        }
    }

    /// Value of the upstream `status=` query parameter for this list.
    pub const fn remote_id(self) -> &'static str {
        match self {
            Self::Completed => "1",
            Self::Watching => "2",
            Self::Dropped => "3",
            Self::WantToWatch => "4",
            Self::OnHold => "5",
        }
    }

    /// Resolve a free-form slug (`on-hold`, `plan_to_watch`, `Stalled`, `list-3`, ...) to a
    /// fixed status.
    ///
    /// `list-N` is the positional fallback produced for unnamed lists and maps to the N-th
    /// status (1-based).
    pub fn resolve(raw: &str) -> Option<Self> {
        let compact: String = raw
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match compact.as_str() {
            "watching" | "currentlywatching" => Some(Self::Watching),
            "completed" | "watched" => Some(Self::Completed),
            "onhold" | "stalled" | "paused" => Some(Self::OnHold),
            "dropped" => Some(Self::Dropped),
            "wanttowatch" | "plantowatch" | "planned" | "ptw" => Some(Self::WantToWatch),
            other => other
                .strip_prefix("list")
                .and_then(|n| n.parse::<usize>().ok())
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| Self::ALL.get(i).copied()),
        }
    }
}

impl fmt::Display for StatusSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keys of the profile statistics block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatKey {
    Watching,
    Completed,
    OnHold,
    Dropped,
    WantToWatch,
    EpisodesWatched,
    TotalEntries,
}

impl StatKey {
    pub const ALL: [Self; 7] = [
        Self::Watching,
        Self::Completed,
        Self::OnHold,
        Self::Dropped,
        Self::WantToWatch,
        Self::EpisodesWatched,
        Self::TotalEntries,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Watching => "watching",
            Self::Completed => "completed",
            Self::OnHold => "onHold",
            Self::Dropped => "dropped",
            Self::WantToWatch => "wantToWatch",
            Self::EpisodesWatched => "episodesWatched",
            Self::TotalEntries => "totalEntries",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Watching => "Watching",
            Self::Completed => "Completed",
            Self::OnHold => "On Hold",
            Self::Dropped => "Dropped",
            Self::WantToWatch => "Plan to Watch",
            Self::EpisodesWatched => "Episodes Watched",
            Self::TotalEntries => "Total Entries",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == key)
    }
}

/// Profile statistics; every value is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub watching: Option<u64>,
    pub completed: Option<u64>,
    pub on_hold: Option<u64>,
    pub dropped: Option<u64>,
    pub want_to_watch: Option<u64>,
    pub episodes_watched: Option<u64>,
    pub total_entries: Option<u64>,
}

impl Stats {
    pub const fn get(&self, key: StatKey) -> Option<u64> {
        match key {
            StatKey::Watching => self.watching,
            StatKey::Completed => self.completed,
            StatKey::OnHold => self.on_hold,
            StatKey::Dropped => self.dropped,
            StatKey::WantToWatch => self.want_to_watch,
            StatKey::EpisodesWatched => self.episodes_watched,
            StatKey::TotalEntries => self.total_entries,
        }
    }

    pub fn set(&mut self, key: StatKey, value: Option<u64>) {
        let slot = match key {
            StatKey::Watching => &mut self.watching,
            StatKey::Completed => &mut self.completed,
            StatKey::OnHold => &mut self.on_hold,
            StatKey::Dropped => &mut self.dropped,
            StatKey::WantToWatch => &mut self.want_to_watch,
            StatKey::EpisodesWatched => &mut self.episodes_watched,
            StatKey::TotalEntries => &mut self.total_entries,
        };
        *slot = value;
    }

    /// Present values as `(key, value)` pairs in display order.
    pub fn present(&self) -> impl Iterator<Item = (StatKey, u64)> + '_ {
        StatKey::ALL
            .into_iter()
            .filter_map(|k| self.get(k).map(|v| (k, v)))
    }

    pub fn is_empty(&self) -> bool {
        self.present().next().is_none()
    }
}

/// A single title on a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub title: String,
    /// Absolute link to the title's detail page.
    pub url: String,
    /// Absolute cover image URL (placeholder when the page had none).
    pub image: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub progress: String,
    pub rating: String,
    pub notes: String,
}

/// One watch-state list of a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub slug: StatusSlug,
    pub label: String,
    pub items: Vec<Item>,
}

/// Canonical, fully defaulted profile snapshot handed to the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub username: String,
    pub avatar: String,
    pub banner: Option<String>,
    pub bio: String,
    pub stats: Stats,
    /// Always the five fixed statuses, in [`StatusSlug::ALL`] order.
    pub statuses: Vec<Status>,
    pub last_updated: String,
}

impl Profile {
    /// The list for `slug`, if present.
    pub fn status(&self, slug: StatusSlug) -> Option<&Status> {
        self.statuses.iter().find(|s| s.slug == slug)
    }

    /// Number of titles across all lists.
    pub fn total_items(&self) -> usize {
        self.statuses.iter().map(|s| s.items.len()).sum()
    }
}

/// Where a snapshot came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileSource {
    Remote,
    Sample,
    /// Remote summary and lists fetched before a failure, remaining lists from the sample.
    Merged,
}

/// What the loader hands to the rendering layer: a normalized profile and its origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub profile: Profile,
    pub source: ProfileSource,
    /// The failure that forced a fallback, if any.
    pub error: Option<String>,
}
