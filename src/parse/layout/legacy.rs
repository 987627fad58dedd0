use scraper::{ElementRef, Html};

use super::{has_class, is_cell, CategoryRows, TableLayout};
use crate::parse::{
    normalize::collapse_whitespace,
    text_from_selection::{inner_text, nth_child, text_from_selection},
};
use crate::static_selector;

/// Category rows start at this child of the table body and come in name/price pairs.
const FIRST_CATEGORY_ROW: usize = 4;

pub struct Legacy;

impl TableLayout for Legacy {
    const NAME: &'static str = "legacy";
    const UPPERCASE_ATTRIBUTES: bool = true;

    fn locate_table<'a>(&self, document: &'a Html) -> Option<ElementRef<'a>> {
        static_selector!(TABLE_SELECTOR <- "body#essen table tbody");
        TABLE_SELECTOR.first_in(document.root_element())
    }

    fn interval_text(&self, table: ElementRef<'_>) -> String {
        static_selector!(HEADER_SELECTOR <- "tr[valign=bottom] td strong");
        text_from_selection(&HEADER_SELECTOR, table)
    }

    fn category<'a>(&self, table: ElementRef<'a>, index: usize) -> Option<CategoryRows<'a>> {
        static_selector!(LABEL_SELECTOR <- "td.gelb strong.big2");
        let position = FIRST_CATEGORY_ROW + index * 2;
        let is_row = |row: &ElementRef<'_>| row.value().name() == "tr";
        let names = nth_child(table, position).filter(is_row)?;
        let prices = nth_child(table, position + 1).filter(is_row);
        let label = collapse_whitespace(&text_from_selection(&LABEL_SELECTOR, names));
        Some(CategoryRows {
            label,
            names,
            prices,
        })
    }

    fn day_cell<'a>(&self, row: ElementRef<'a>, day: u8) -> Option<ElementRef<'a>> {
        nth_child(row, usize::from(day) + 1).filter(is_cell)
    }

    fn attribute_text(&self, cell: ElementRef<'_>) -> String {
        // (1, 3, 9a) (V), Kcal:718, E:28.0 g, K:98.0 g, Fe:22.0 g
        static_selector!(CODES_SELECTOR <- ".zsnamen");
        if CODES_SELECTOR.first_in(cell).is_some() {
            text_from_selection(&CODES_SELECTOR, cell)
        } else {
            inner_text(cell)
        }
    }

    fn tracks_nutrition(&self, cell: ElementRef<'_>) -> bool {
        has_class(cell, "mensavital")
    }
}
