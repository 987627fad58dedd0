mod current;
mod legacy;

use scraper::{ElementRef, Html};

pub(super) use current::Current;
pub(super) use legacy::Legacy;

/// Which markup convention a source page uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// `div.mainmensa` pages with `items_row` / `price_row` table rows.
    Current,
    /// `body#essen` pages addressed by row position.
    Legacy,
}

/// The rows of one meal category.
pub(super) struct CategoryRows<'a> {
    pub label: String,
    pub names: ElementRef<'a>,
    pub prices: Option<ElementRef<'a>>,
}

/// How a layout finds things in its page. The extraction itself is shared.
pub(super) trait TableLayout {
    const NAME: &'static str;
    const UPPERCASE_ATTRIBUTES: bool;

    fn locate_table<'a>(&self, document: &'a Html) -> Option<ElementRef<'a>>;

    fn interval_text(&self, table: ElementRef<'_>) -> String;

    /// `index` counts categories from 0 in page order.
    fn category<'a>(&self, table: ElementRef<'a>, index: usize) -> Option<CategoryRows<'a>>;

    /// `day` is 1-based, Monday = 1.
    fn day_cell<'a>(&self, row: ElementRef<'a>, day: u8) -> Option<ElementRef<'a>>;

    /// Text the attribute codes (and nutrition labels) are read from.
    fn attribute_text(&self, cell: ElementRef<'_>) -> String;

    fn tracks_nutrition(&self, _cell: ElementRef<'_>) -> bool {
        false
    }
}

pub(super) fn has_class(element: ElementRef<'_>, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}

pub(super) fn is_cell(element: &ElementRef<'_>) -> bool {
    element.value().name() == "td"
}
