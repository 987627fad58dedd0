use chrono::{Local, NaiveDate};
use scraper::{ElementRef, Html};

use super::{
    attributes::parse_attributes,
    layout::{CategoryRows, Current, Layout, Legacy, TableLayout},
    normalize::sanitize_meal_name,
    nutrition::{nutrition_or_absent, NutritionPolicy},
    price::price_or_absent,
    text_from_selection::inner_text,
    validity::validity_or_current_week,
    Error,
};
use crate::{
    menu::{MealItem, MealTable, Menu, WeekSlots, WEEKDAYS},
    sources::Source,
};

/// Either the whole menu or the reason there is none. Never a partial menu.
pub type ParseOutcome = Result<Menu, Error>;

/// Separator between attribute codes inside a group.
const ATTRIBUTE_DELIMITER: char = ',';

/// Turns a fetched page into a [`Menu`]. Configured once per deployment.
#[derive(Debug, Clone)]
pub struct Extractor {
    currency: String,
    nutrition: NutritionPolicy,
}

impl Extractor {
    pub fn new(currency: impl Into<String>, nutrition: NutritionPolicy) -> Self {
        Self {
            currency: currency.into(),
            nutrition,
        }
    }

    /// Only a missing meal table fails. Bad prices, dates or nutrition
    /// labels degrade to absent fields or the current week.
    pub fn parse(&self, source: &Source, raw: &str) -> ParseOutcome {
        self.parse_on(source, raw, Local::now().date_naive())
    }

    /// [`Self::parse`] with a fixed "today" for the validity fallback.
    pub fn parse_on(&self, source: &Source, raw: &str, today: NaiveDate) -> ParseOutcome {
        let document = Html::parse_document(raw);
        match source.layout {
            Layout::Current => self.extract(&Current, source, &document, today),
            Layout::Legacy => self.extract(&Legacy, source, &document, today),
        }
    }

    fn extract<L: TableLayout>(
        &self,
        layout: &L,
        source: &Source,
        document: &Html,
        today: NaiveDate,
    ) -> ParseOutcome {
        let table = layout.locate_table(document).ok_or_else(|| {
            Error::TableNotFound(format!("{} ({} layout)", source.key, L::NAME))
        })?;
        let validity = validity_or_current_week(&layout.interval_text(table), today);

        let mut meals = MealTable::default();
        for index in 0..source.meal_count {
            let Some(rows) = layout.category(table, index) else {
                log::warn!(
                    "{}: meal category {} of {} not on the page",
                    source.key,
                    index + 1,
                    source.meal_count
                );
                continue;
            };
            let mut days: [Option<MealItem>; 5] = Default::default();
            for (slot, day) in days.iter_mut().zip(WEEKDAYS) {
                *slot = self.slot(layout, &rows, day);
            }
            meals.insert(rows.label, WeekSlots::new(days));
        }
        log::debug!(
            "{}: parsed {} of {} meal categories",
            source.key,
            meals.len(),
            source.meal_count
        );

        Ok(Menu::new(
            source.info.clone(),
            validity,
            self.currency.clone(),
            meals,
        ))
    }

    fn slot<L: TableLayout>(&self, layout: &L, rows: &CategoryRows<'_>, day: u8) -> Option<MealItem> {
        let cell = layout.day_cell(rows.names, day);
        let price_cell = rows.prices.and_then(|row| layout.day_cell(row, day));

        let raw = cell.map(inner_text).unwrap_or_default();
        let attribute_text = cell
            .map(|cell| layout.attribute_text(cell))
            .unwrap_or_default();
        let attributes =
            parse_attributes(&attribute_text, ATTRIBUTE_DELIMITER, L::UPPERCASE_ATTRIBUTES);
        let price = price_cell
            .map(inner_text)
            .and_then(|text| price_or_absent(&text));
        let nutrition = cell
            .filter(|cell: &ElementRef<'_>| layout.tracks_nutrition(*cell))
            .and_then(|_| nutrition_or_absent(&attribute_text, self.nutrition));

        MealItem::slot(sanitize_meal_name(&raw), attributes, price, nutrition)
    }
}
