//! Selector lists for every field, in priority order.
//!
//! The upstream markup changes without notice. Each redesign only needs a new
//! [`ExtractionStrategy`] (or an edited list); the loader and normalizer stay untouched.

use std::sync::LazyLock;

use regex::Regex;

use crate::profile::StatKey;

/// A selector plus the attribute to read from the matched element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrSelector {
    pub selector: String,
    pub attr: String,
}

impl AttrSelector {
    pub fn new(selector: impl Into<String>, attr: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            attr: attr.into(),
        }
    }
}

/// A stat label pattern; the first pattern matching an element's text claims its number.
#[derive(Debug, Clone)]
pub struct StatLabel {
    pub key: StatKey,
    pub pattern: Regex,
}

/// Ordered selector sets for every extracted field.
///
/// Earlier entries win. Invalid selectors are skipped at extraction time.
#[derive(Debug, Clone)]
pub struct ExtractionStrategy {
    /// Free-form tag identifying the markup generation this strategy targets.
    pub version: String,

    pub avatar: Vec<AttrSelector>,
    pub banner: Vec<AttrSelector>,
    pub bio: Vec<String>,

    /// Elements that may hold a single statistic. Candidates wrapping other candidates are
    /// ignored so a stats container never claims a number meant for one of its rows.
    pub stat_candidates: Vec<String>,
    pub stat_labels: Vec<StatLabel>,

    /// Elements that may hold a single list entry.
    pub card_candidates: Vec<String>,
    pub card_title: Vec<String>,
    /// Anchors inside a card; the first whose `href` matches `detail_link` is the item link.
    pub card_link: Vec<String>,
    pub detail_link: Regex,
    /// Elements carrying the cover image, searched together with the card itself.
    pub card_image: Vec<String>,
    /// Image attributes in preference order.
    pub image_attrs: Vec<String>,
    pub card_type: Vec<String>,
    pub card_progress: Vec<String>,
    pub card_rating: Vec<String>,
    /// Tried after `card_rating` when no rating text was found.
    pub card_rating_attr: Vec<AttrSelector>,
    pub card_notes: Vec<String>,

    /// Markers of a further listing page.
    pub next_page: Vec<String>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn attrs(items: &[(&str, &str)]) -> Vec<AttrSelector> {
    items
        .iter()
        .map(|(sel, attr)| AttrSelector::new(*sel, *attr))
        .collect()
}

fn label(key: StatKey, pattern: &str) -> StatLabel {
    StatLabel {
        key,
        pattern: Regex::new(pattern).expect("stat label patterns are valid"),
    }
}

static STAT_LABELS: LazyLock<Vec<StatLabel>> = LazyLock::new(|| {
    vec![
        label(StatKey::Watching, r"(?i)\bwatching\b"),
        label(StatKey::Completed, r"(?i)\bcompleted\b|^[\d,\s]*watched\b"),
        label(StatKey::OnHold, r"(?i)\bon[\s_-]?hold\b|\bstalled\b"),
        label(StatKey::Dropped, r"(?i)\bdropped\b"),
        label(StatKey::WantToWatch, r"(?i)\b(?:want|plan(?:ned)?)\s+to\s+watch\b"),
        label(StatKey::EpisodesWatched, r"(?i)\bepisodes?\b"),
        label(StatKey::TotalEntries, r"(?i)\btotal\b|\bentries\b"),
    ]
});

static DETAIL_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:https?:)?(?://[^/]+)?/anime/[^/?#\s]+").expect("detail link pattern is valid")
});

impl ExtractionStrategy {
    /// Strategy for the 2024-era anime-planet profile and list markup.
    pub fn anime_planet() -> Self {
        Self {
            version: "anime-planet/2024".to_string(),
            avatar: attrs(&[
                (".avatar img", "data-src"),
                (".avatar img", "src"),
                ("img.avatar", "src"),
                ("#profileAvatar img", "src"),
                (r#"meta[property="og:image"]"#, "content"),
            ]),
            banner: attrs(&[
                (".profileBanner img", "data-src"),
                (".profileBanner img", "src"),
                (".profileBanner", "data-src"),
                (".profileBanner", "data-image"),
                ("#profileBanner img", "src"),
                (".banner img", "src"),
            ]),
            bio: strings(&[".profileBio", "#userBio", ".userBio", ".bio", ".about"]),
            stat_candidates: strings(&[
                r#"[class*="stat"]"#,
                r#"[class*="Stat"]"#,
                ".userStats li",
                r#"li[class*="status"]"#,
            ]),
            stat_labels: STAT_LABELS.clone(),
            card_candidates: strings(&[
                "li.card",
                ".cardDeck .card",
                r#"[data-type="anime"]"#,
                "table.personalList tbody tr",
                ".entryList li",
            ]),
            card_title: strings(&[".cardName", "h3", ".title", ".tableTitle", "[data-title]"]),
            card_link: strings(&["a[href]"]),
            detail_link: DETAIL_LINK.clone(),
            card_image: strings(&["img", "[data-image]"]),
            image_attrs: strings(&["data-src", "data-image", "src"]),
            card_type: strings(&[".type", ".cardType", r#"[class*="type"]"#]),
            card_progress: strings(&[".progress", ".episodes", ".statusArea", r#"[class*="progress"]"#]),
            card_rating: strings(&[".ttRating", ".rating", ".tableRating"]),
            card_rating_attr: attrs(&[
                ("[data-rating]", "data-rating"),
                (".starrating [data-stars]", "data-stars"),
            ]),
            card_notes: strings(&[".notes", ".cardNotes", ".tableNotes"]),
            next_page: strings(&[
                ".pagination li.next a",
                r#"a[rel="next"]"#,
                ".pagination .next",
            ]),
        }
    }
}

impl Default for ExtractionStrategy {
    fn default() -> Self {
        Self::anime_planet()
    }
}
