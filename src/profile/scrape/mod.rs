//! Scrape profile and list markup into raw records.
//!
//! Internals are split into:
//! - `strategy`: ordered selector sets per field (swap it when the markup changes)
//! - `extract`:  scalar, stat, card and pagination extraction over a parsed document
//! - `utils`:    text helpers shared by the extractors
//!
//! Parsing is synchronous; parsed documents are not `Send` and never cross an await.

pub mod extract;
pub mod strategy;
pub(crate) mod utils;

use scraper::Html;
use tracing::debug;

use crate::profile::Stats;
use crate::profile::raw::RawItem;

pub use strategy::{AttrSelector, ExtractionStrategy, StatLabel};

/// Scalar fields and statistics of a profile summary page, as found on the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileSummary {
    pub avatar: Option<String>,
    pub banner: Option<String>,
    pub bio: Option<String>,
    pub stats: Stats,
}

/// Entries of one listing page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusPage {
    pub items: Vec<RawItem>,
    pub has_next: bool,
}

/// Extract avatar, banner, bio and stats from a profile summary page.
///
/// Markup without any recognisable element yields an empty summary, never an error.
pub fn parse_summary_page(body: &str, strategy: &ExtractionStrategy) -> ProfileSummary {
    let doc = Html::parse_document(body);
    let root = doc.root_element();

    let summary = ProfileSummary {
        avatar: extract::find_attr(root, &strategy.avatar),
        banner: extract::find_attr(root, &strategy.banner),
        bio: extract::find_text(root, &strategy.bio),
        stats: extract::extract_stats(root, strategy),
    };

    debug!(
        strategy = %strategy.version,
        body_len = body.len(),
        avatar = summary.avatar.is_some(),
        banner = summary.banner.is_some(),
        bio = summary.bio.is_some(),
        "parsed summary page"
    );
    if summary == ProfileSummary::default() {
        debug!(
            preview = %utils::truncate(body, 160),
            "summary page matched nothing"
        );
    }
    summary
}

/// Extract list entries and the pagination marker from a listing page (HTML or an ajax
/// JSON wrapper around HTML).
pub fn parse_status_page(body: &str, strategy: &ExtractionStrategy) -> StatusPage {
    let html = utils::unwrap_ajax_body(body);
    let doc = Html::parse_document(&html);
    let root = doc.root_element();

    StatusPage {
        items: extract::extract_cards(root, strategy),
        has_next: extract::has_next_page(root, strategy),
    }
}
