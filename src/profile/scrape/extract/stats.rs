use std::collections::HashSet;

use scraper::ElementRef;
use tracing::debug;

use crate::profile::{StatKey, Stats};

use super::super::strategy::ExtractionStrategy;
use super::super::utils::first_number;
use super::helpers::{candidates, compile_all, element_text, innermost};

/// Recover the statistics block.
///
/// An element counts when its text carries both a number and a recognised label; a
/// qualifying element wrapping another qualifying element is ignored. The first value
/// seen for a key wins. Without an explicit total, `totalEntries` is the sum of the other
/// recognised stats.
pub fn extract_stats(scope: ElementRef<'_>, strategy: &ExtractionStrategy) -> Stats {
    let selectors = compile_all(&strategy.stat_candidates);

    let qualifying: Vec<(ElementRef<'_>, StatKey, u64)> = candidates(scope, &selectors)
        .into_iter()
        .filter_map(|el| {
            let text = element_text(el);
            let value = first_number(&text)?;
            let key = strategy
                .stat_labels
                .iter()
                .find(|label| label.pattern.is_match(&text))?
                .key;
            Some((el, key, value))
        })
        .collect();

    let kept: HashSet<_> = innermost(qualifying.iter().map(|(el, _, _)| *el).collect())
        .into_iter()
        .map(|el| el.id())
        .collect();

    let mut stats = Stats::default();
    for (el, key, value) in &qualifying {
        if kept.contains(&el.id()) && stats.get(*key).is_none() {
            stats.set(*key, Some(*value));
        }
    }

    if stats.total_entries.is_none() && !stats.is_empty() {
        let total = stats.present().map(|(_, v)| v).fold(0u64, u64::saturating_add);
        stats.total_entries = Some(total);
    }

    debug!(
        candidates = qualifying.len(),
        recognised = stats.present().count(),
        "extracted stats"
    );
    stats
}
