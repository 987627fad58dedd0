use std::sync::OnceLock;

use scraper::{ElementRef, Selector};

/// A CSS selector written as a literal, compiled the first time a page is parsed.
#[derive(Debug)]
pub(super) struct StaticSelector {
    compiled: OnceLock<Selector>,
    css: &'static str,
}

impl StaticSelector {
    pub(super) const fn new(css: &'static str) -> Self {
        Self {
            compiled: OnceLock::new(),
            css,
        }
    }

    /// First match below `scope` in document order.
    pub(super) fn first_in<'a>(&self, scope: ElementRef<'a>) -> Option<ElementRef<'a>> {
        scope.select(self).next()
    }

    /// The `n`-th match below `scope`, counting from 0.
    pub(super) fn nth_in<'a>(&self, scope: ElementRef<'a>, n: usize) -> Option<ElementRef<'a>> {
        scope.select(self).nth(n)
    }
}

impl core::ops::Deref for StaticSelector {
    type Target = Selector;

    fn deref(&self) -> &Self::Target {
        // literals only, so a bad selector is a bug in this crate
        self.compiled.get_or_init(|| match Selector::parse(self.css) {
            Ok(sel) => sel,
            Err(e) => panic!("menu selector {:?} does not compile: {e:?}", self.css),
        })
    }
}

#[macro_export]
macro_rules! static_selector {
    ($x: ident <- $sel: literal) => {
        static $x: $crate::parse::static_selector::StaticSelector =
            $crate::parse::static_selector::StaticSelector::new($sel);
    };
}

#[cfg(test)]
mod tests {
    use scraper::Html;

    const PAGE: &str = r#"<table>
        <tr class="items_row"><td>Essen 1</td></tr>
        <tr class="price_row"><td>2,60</td></tr>
        <tr class="items_row"><td>Essen 2</td></tr>
    </table>"#;

    #[test]
    fn test_first_and_nth() {
        static_selector!(ROW_SELECTOR <- "tr.items_row");
        let html = Html::parse_fragment(PAGE);
        let root = html.root_element();
        let first = ROW_SELECTOR.first_in(root).unwrap();
        assert_eq!(first.text().collect::<String>(), "Essen 1");
        let second = ROW_SELECTOR.nth_in(root, 1).unwrap();
        assert_eq!(second.text().collect::<String>(), "Essen 2");
        assert!(ROW_SELECTOR.nth_in(root, 2).is_none());
    }

    #[test]
    fn test_compiles_once() {
        static_selector!(PRICE_SELECTOR <- "tr.price_row td");
        let html = Html::parse_fragment(PAGE);
        assert_eq!(html.select(&PRICE_SELECTOR).count(), 1);
        assert!(std::ptr::eq(&*PRICE_SELECTOR, &*PRICE_SELECTOR));
    }
}
