mod cards;
mod helpers;
mod stats;

use scraper::ElementRef;

use super::strategy::{AttrSelector, ExtractionStrategy};

pub use cards::extract_cards;
pub use stats::extract_stats;

/// First non-empty attribute value found by `probes`, tried in order.
pub fn find_attr(scope: ElementRef<'_>, probes: &[AttrSelector]) -> Option<String> {
    helpers::first_attr(scope, probes)
}

/// First non-empty text found by `selectors`, tried in order. Whitespace is collapsed.
pub fn find_text(scope: ElementRef<'_>, selectors: &[String]) -> Option<String> {
    helpers::first_text(scope, selectors)
}

/// Whether a listing page links to a further page.
pub fn has_next_page(scope: ElementRef<'_>, strategy: &ExtractionStrategy) -> bool {
    let selectors = helpers::compile_all(&strategy.next_page);
    helpers::candidates(scope, &selectors).iter().any(|el| {
        !el.value().classes().any(|c| c == "disabled")
            && el
                .ancestors()
                .filter_map(ElementRef::wrap)
                .all(|a| !a.value().classes().any(|c| c == "disabled"))
    })
}
