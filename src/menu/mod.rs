mod meal;
mod validity;

use serde::{Serialize, Serializer};

pub use meal::{MealItem, NutritionFacts, PriceItem};
pub use validity::Validity;

/// Weekdays a menu covers, Monday = 1 through Friday = 5.
pub const WEEKDAYS: std::ops::RangeInclusive<u8> = 1..=5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub lat: f64,
    pub long: f64,
}

/// Public description of a cafeteria, copied into every menu it serves.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanteenInfo {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Coordinates>,
}

/// The five weekday slots of one meal category. `None` marks a day that is
/// known to have no offering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeekSlots([Option<MealItem>; 5]);

impl WeekSlots {
    #[must_use]
    pub const fn new(days: [Option<MealItem>; 5]) -> Self {
        Self(days)
    }

    /// `day` is 1-based (Monday = 1). Out of range days have no offering.
    #[cfg(test)]
    pub fn day(&self, day: u8) -> Option<&MealItem> {
        if !WEEKDAYS.contains(&day) {
            return None;
        }
        self.0[usize::from(day - 1)].as_ref()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, Option<&MealItem>)> {
        WEEKDAYS.zip(self.0.iter().map(Option::as_ref))
    }
}

impl Serialize for WeekSlots {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// Meal categories in the order the page lists them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MealTable(Vec<(String, WeekSlots)>);

impl MealTable {
    /// A label seen twice keeps its first position but takes the later slots.
    pub fn insert(&mut self, label: String, days: WeekSlots) {
        match self.0.iter_mut().find(|(existing, _)| *existing == label) {
            Some(entry) => entry.1 = days,
            None => self.0.push((label, days)),
        }
    }

    #[cfg(test)]
    pub fn get(&self, label: &str) -> Option<&WeekSlots> {
        self.0
            .iter()
            .find(|(existing, _)| existing == label)
            .map(|(_, days)| days)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(label, _)| label.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for MealTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(label, days)| (label, days)))
    }
}

/// A fully extracted weekly menu. Never patched: a refresh replaces it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Menu {
    info: CanteenInfo,
    validity: Validity,
    currency: String,
    meals: MealTable,
}

impl Menu {
    #[must_use]
    pub const fn new(
        info: CanteenInfo,
        validity: Validity,
        currency: String,
        meals: MealTable,
    ) -> Self {
        Self {
            info,
            validity,
            currency,
            meals,
        }
    }

    #[must_use]
    pub const fn info(&self) -> &CanteenInfo {
        &self.info
    }

    #[must_use]
    pub const fn validity(&self) -> &Validity {
        &self.validity
    }

    #[must_use]
    pub fn currency(&self) -> &str {
        &self.currency
    }

    #[must_use]
    pub const fn meals(&self) -> &MealTable {
        &self.meals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn item(name: &str) -> Option<MealItem> {
        MealItem::slot(name.to_owned(), vec![], None, None)
    }

    #[test]
    fn test_table_keeps_first_position() {
        let mut table = MealTable::default();
        table.insert("Essen 1".into(), WeekSlots::default());
        table.insert("Essen 2".into(), WeekSlots::default());
        table.insert(
            "Essen 1".into(),
            WeekSlots::new([item("Suppe"), None, None, None, None]),
        );
        assert_eq!(table.labels().collect::<Vec<_>>(), ["Essen 1", "Essen 2"]);
        assert_eq!(table.get("Essen 1").unwrap().day(1).unwrap().name, "Suppe");
    }

    #[test]
    fn test_day_out_of_range() {
        let days = WeekSlots::new([item("a"), item("b"), item("c"), item("d"), item("e")]);
        assert!(days.day(0).is_none());
        assert!(days.day(6).is_none());
        assert_eq!(days.day(5).unwrap().name, "e");
    }

    #[test]
    fn test_menu_wire_shape() {
        let mut meals = MealTable::default();
        meals.insert(
            "Essen 1".into(),
            WeekSlots::new([item("Suppe"), None, None, None, None]),
        );
        let menu = Menu::new(
            CanteenInfo {
                name: "Mensa".into(),
                location_description: None,
                location: Some(Coordinates {
                    lat: 51.5,
                    long: 9.5,
                }),
            },
            Validity::new(
                NaiveDate::from_ymd_opt(2014, 9, 8).unwrap(),
                NaiveDate::from_ymd_opt(2014, 9, 12).unwrap(),
            )
            .unwrap(),
            "€".into(),
            meals,
        );
        assert_eq!(
            serde_json::to_value(&menu).unwrap(),
            json!({
                "info": { "name": "Mensa", "location": { "lat": 51.5, "long": 9.5 } },
                "validity": { "from": "2014-09-08", "until": "2014-09-12" },
                "currency": "€",
                "meals": {
                    "Essen 1": {
                        "1": { "name": "Suppe", "attributes": [], "price": null, "vitalInfo": null },
                        "2": null,
                        "3": null,
                        "4": null,
                        "5": null,
                    }
                }
            })
        );
    }
}
