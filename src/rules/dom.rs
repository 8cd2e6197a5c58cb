//! Shared DOM helpers for the static rule sources

use scraper::{ElementRef, Html, Selector};

/// Builds a CSS selector path for an element
///
/// Stops at the nearest ancestor with an `id`; otherwise qualifies each
/// segment with `:nth-of-type` when the element has same-named preceding
/// siblings.
pub(crate) fn css_path(el: ElementRef) -> String {
    let mut segments: Vec<String> = Vec::new();
    let mut current = Some(el);

    while let Some(node) = current {
        let name = node.value().name().to_lowercase();

        if let Some(id) = node.value().attr("id") {
            segments.push(format!("{name}#{id}"));
            break;
        }

        let mut nth = 1;
        for sibling in node.prev_siblings() {
            if let Some(element) = sibling.value().as_element() {
                if element.name().eq_ignore_ascii_case(&name) {
                    nth += 1;
                }
            }
        }

        if nth == 1 {
            segments.push(name);
        } else {
            segments.push(format!("{name}:nth-of-type({nth})"));
        }

        current = node.parent().and_then(ElementRef::wrap);
    }

    segments.reverse();
    segments.join(" > ")
}

/// HTML snippet of an element, capped at 200 characters
pub(crate) fn snippet(el: ElementRef) -> String {
    el.html().chars().take(200).collect()
}

/// Visible text of an element with whitespace collapsed
pub(crate) fn element_text(el: ElementRef) -> String {
    el.text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Extracts the markup of the first element matching `selector`, for
/// region-scoped analysis
pub(crate) fn region_markup(html: &str, selector: &str) -> Option<String> {
    let document = Html::parse_document(html);

    for part in selector.split(',') {
        let Ok(parsed) = Selector::parse(part.trim()) else {
            continue;
        };
        if let Some(el) = document.select(&parsed).next() {
            return Some(el.html());
        }
    }

    None
}
