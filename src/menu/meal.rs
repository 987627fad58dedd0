use serde::Serialize;

/// Student, employee and external price of one meal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceItem {
    pub student: f64,
    pub employee: f64,
    pub foreign: f64,
}

/// Nutrition facts of a tracked ("vital") meal.
///
/// With the strict policy every field is `Some`; the partial policy keeps
/// whichever labels were found.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct NutritionFacts {
    pub protein: Option<f64>,
    pub fat: Option<f64>,
    pub carbohydrate: Option<f64>,
    pub calories: Option<f64>,
}

impl NutritionFacts {
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.protein.is_some()
            && self.fat.is_some()
            && self.carbohydrate.is_some()
            && self.calories.is_some()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.protein.is_none()
            && self.fat.is_none()
            && self.carbohydrate.is_none()
            && self.calories.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MealItem {
    pub name: String,
    pub attributes: Vec<String>,
    pub price: Option<PriceItem>,
    #[serde(rename = "vitalInfo")]
    pub nutrition: Option<NutritionFacts>,
}

impl MealItem {
    /// Builds the slot for one day. A cell without a name and without a price
    /// is an explicit absence; anything else is kept, even if only partly filled.
    #[must_use]
    pub fn slot(
        name: String,
        attributes: Vec<String>,
        price: Option<PriceItem>,
        nutrition: Option<NutritionFacts>,
    ) -> Option<Self> {
        if name.is_empty() && price.is_none() {
            return None;
        }
        Some(Self {
            name,
            attributes,
            price,
            nutrition,
        })
    }
}
