use std::collections::HashSet;

use scraper::{ElementRef, Selector};
use tracing::warn;

use super::super::strategy::AttrSelector;
use super::super::utils::collapse_whitespace;

/// Compile `raw`, logging and skipping selectors the parser rejects.
pub(crate) fn compile(raw: &str) -> Option<Selector> {
    match Selector::parse(raw) {
        Ok(sel) => Some(sel),
        Err(e) => {
            warn!(selector = raw, error = ?e, "skipping invalid selector");
            None
        }
    }
}

pub(crate) fn compile_all(raw: &[String]) -> Vec<Selector> {
    raw.iter().filter_map(|s| compile(s)).collect()
}

pub(crate) fn element_text(el: ElementRef<'_>) -> String {
    collapse_whitespace(el.text())
}

pub(crate) fn non_empty_attr(el: ElementRef<'_>, attr: &str) -> Option<String> {
    el.value()
        .attr(attr)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Descendants of `scope` matching any of `selectors`, once each, in document order.
pub(crate) fn candidates<'a>(scope: ElementRef<'a>, selectors: &[Selector]) -> Vec<ElementRef<'a>> {
    if selectors.is_empty() {
        return Vec::new();
    }
    scope
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .filter(|el| selectors.iter().any(|sel| sel.matches(el)))
        .collect()
}

/// Drop every element that contains another element of the set.
pub(crate) fn innermost<'a>(elements: Vec<ElementRef<'a>>) -> Vec<ElementRef<'a>> {
    let ids: HashSet<_> = elements.iter().map(|el| el.id()).collect();
    elements
        .into_iter()
        .filter(|el| !el.descendants().skip(1).any(|node| ids.contains(&node.id())))
        .collect()
}

/// First non-empty attribute value across `probes`, in order.
pub(crate) fn first_attr(scope: ElementRef<'_>, probes: &[AttrSelector]) -> Option<String> {
    probes.iter().find_map(|probe| {
        let sel = compile(&probe.selector)?;
        scope
            .select(&sel)
            .find_map(|el| non_empty_attr(el, &probe.attr))
    })
}

/// First non-empty, whitespace-collapsed text across `selectors`, in order.
pub(crate) fn first_text(scope: ElementRef<'_>, selectors: &[String]) -> Option<String> {
    selectors.iter().find_map(|raw| {
        let sel = compile(raw)?;
        scope
            .select(&sel)
            .map(element_text)
            .find(|text| !text.is_empty())
    })
}
