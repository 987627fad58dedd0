use scraper::{ElementRef, Html};

use super::{has_class, is_cell, CategoryRows, TableLayout};
use crate::parse::{
    normalize::collapse_whitespace,
    text_from_selection::{inner_text, nth_child, text_from_selection},
};
use crate::static_selector;

pub struct Current;

impl TableLayout for Current {
    const NAME: &'static str = "current";
    const UPPERCASE_ATTRIBUTES: bool = false;

    fn locate_table<'a>(&self, document: &'a Html) -> Option<ElementRef<'a>> {
        static_selector!(TABLE_SELECTOR <- "div.mainmensa table");
        TABLE_SELECTOR.first_in(document.root_element())
    }

    fn interval_text(&self, table: ElementRef<'_>) -> String {
        // "Speiseplan vom 08.09. bis 12.09.2014"
        static_selector!(HEADER_SELECTOR <- "tr.thead h4");
        text_from_selection(&HEADER_SELECTOR, table)
    }

    fn category<'a>(&self, table: ElementRef<'a>, index: usize) -> Option<CategoryRows<'a>> {
        static_selector!(ITEMS_ROW_SELECTOR <- "tr.items_row");
        static_selector!(PRICE_ROW_SELECTOR <- "tr.price_row");
        static_selector!(LABEL_SELECTOR <- "td.menu_head");
        let names = ITEMS_ROW_SELECTOR.nth_in(table, index)?;
        let prices = PRICE_ROW_SELECTOR.nth_in(table, index);
        // "Essen 1", "Essen 3 oder 4", "Angebot des Tages"
        let label = collapse_whitespace(&text_from_selection(&LABEL_SELECTOR, names));
        Some(CategoryRows {
            label,
            names,
            prices,
        })
    }

    fn day_cell<'a>(&self, row: ElementRef<'a>, day: u8) -> Option<ElementRef<'a>> {
        // the first cell holds the label
        nth_child(row, usize::from(day) + 1)
            .filter(|cell| is_cell(cell) && has_class(*cell, "menu_content"))
    }

    fn attribute_text(&self, cell: ElementRef<'_>) -> String {
        inner_text(cell)
    }
}
