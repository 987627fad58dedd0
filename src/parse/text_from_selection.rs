use scraper::{ElementRef, Selector};

/// All text below `element`, concatenated in document order.
pub fn inner_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Text of every element under `element` matching `selector`, concatenated.
/// Empty when nothing matches.
pub fn text_from_selection(selector: &Selector, element: ElementRef<'_>) -> String {
    element.select(selector).flat_map(|e| e.text()).collect()
}

/// The `n`-th (1-based) element child of `parent`, like `:nth-child(n)`.
pub fn nth_child(parent: ElementRef<'_>, n: usize) -> Option<ElementRef<'_>> {
    parent
        .children()
        .filter_map(ElementRef::wrap)
        .nth(n.checked_sub(1)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::static_selector;

    #[test]
    fn test_text_from_selection() {
        static_selector!(CODE_SELECTOR <- ".zsnamen");
        let html = scraper::Html::parse_fragment(
            r#"<div>Suppe <span class="zsnamen">(1)</span> <span class="zsnamen">(V)</span></div>"#,
        );
        assert_eq!(text_from_selection(&CODE_SELECTOR, html.root_element()), "(1)(V)");
        assert_eq!(inner_text(html.root_element()), "Suppe (1) (V)");
    }

    #[test]
    fn test_nth_child() {
        let html = scraper::Html::parse_fragment(
            "<table><tbody><tr><td>a</td>\n<td>b</td><td>c</td></tr></tbody></table>",
        );
        static_selector!(ROW_SELECTOR <- "tr");
        let row = html.select(&ROW_SELECTOR).next().unwrap();
        assert_eq!(inner_text(nth_child(row, 2).unwrap()), "b");
        assert!(nth_child(row, 0).is_none());
        assert!(nth_child(row, 4).is_none());
    }
}
