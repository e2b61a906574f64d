use std::collections::HashSet;

use scraper::ElementRef;
use tracing::debug;

use crate::profile::raw::RawItem;

use super::super::strategy::ExtractionStrategy;
use super::helpers::{
    candidates, compile, compile_all, first_attr, first_text, innermost, non_empty_attr,
};

/// Recover list entries.
///
/// A candidate becomes an item only with a title element and a link to a detail page;
/// anything else is skipped silently. A qualifying candidate wrapping another qualifying
/// candidate is a container, not a card, and is ignored. Repeated links on one page are
/// kept once.
pub fn extract_cards(scope: ElementRef<'_>, strategy: &ExtractionStrategy) -> Vec<RawItem> {
    let selectors = compile_all(&strategy.card_candidates);
    let found = candidates(scope, &selectors);

    let qualifying: Vec<(ElementRef<'_>, RawItem)> = found
        .iter()
        .filter_map(|card| extract_card(*card, strategy).map(|item| (*card, item)))
        .collect();
    let skipped = found.len() - qualifying.len();

    let cards: HashSet<_> = innermost(qualifying.iter().map(|(el, _)| *el).collect())
        .into_iter()
        .map(|el| el.id())
        .collect();

    let mut seen = HashSet::new();
    let mut items = Vec::new();
    for (el, item) in qualifying {
        if !cards.contains(&el.id()) {
            continue;
        }
        if let Some(url) = item.url.clone()
            && seen.insert(url)
        {
            items.push(item);
        }
    }

    debug!(
        candidates = found.len(),
        items = items.len(),
        skipped,
        "extracted cards"
    );
    items
}

fn extract_card(card: ElementRef<'_>, strategy: &ExtractionStrategy) -> Option<RawItem> {
    let title = first_text(card, &strategy.card_title)?;
    let url = detail_link(card, strategy)?;

    let rating = first_text(card, &strategy.card_rating)
        .or_else(|| first_attr(card, &strategy.card_rating_attr));

    Some(RawItem {
        title: Some(title),
        url: Some(url),
        image: card_image(card, strategy),
        kind: first_text(card, &strategy.card_type),
        progress: first_text(card, &strategy.card_progress),
        rating,
        notes: first_text(card, &strategy.card_notes),
    })
}

fn detail_link(card: ElementRef<'_>, strategy: &ExtractionStrategy) -> Option<String> {
    strategy.card_link.iter().find_map(|raw| {
        let sel = compile(raw)?;
        card.select(&sel)
            .filter_map(|a| non_empty_attr(a, "href"))
            .find(|href| strategy.detail_link.is_match(href))
    })
}

/// Image attributes are tried in preference order; for each attribute the card itself is
/// checked before its image elements.
fn card_image(card: ElementRef<'_>, strategy: &ExtractionStrategy) -> Option<String> {
    let selectors = compile_all(&strategy.card_image);
    let mut holders = vec![card];
    holders.extend(
        card.descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .filter(|el| selectors.iter().any(|sel| sel.matches(el))),
    );

    strategy.image_attrs.iter().find_map(|attr| {
        holders
            .iter()
            .find_map(|holder| non_empty_attr(*holder, attr))
    })
}
