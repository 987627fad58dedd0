use std::{str::FromStr, sync::OnceLock};

use regex::Regex;

use crate::menu::NutritionFacts;

use super::Error;

/// What to keep when only some nutrition labels are present in a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NutritionPolicy {
    /// All four labels or no nutrition facts at all.
    #[default]
    Strict,
    /// Keep whichever labels matched.
    Partial,
}

impl FromStr for NutritionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "partial" => Ok(Self::Partial),
            other => Err(format!("unknown nutrition policy {other:?}")),
        }
    }
}

struct Labels {
    calories: Regex,
    protein: Regex,
    carbohydrate: Regex,
    fat: Regex,
    decimal_comma: Regex,
}

fn labels() -> &'static Labels {
    static LABELS: OnceLock<Labels> = OnceLock::new();
    LABELS.get_or_init(|| {
        let label = |name: &str| {
            Regex::new(&format!(r"(?i)\b{name}:\s*([0-9]*\.?[0-9]+)"))
                .expect("regex should be valid")
        };
        Labels {
            calories: label("Kcal"),
            protein: label("E"),
            carbohydrate: label("K"),
            fat: label("Fe"),
            decimal_comma: Regex::new(r"(\d),(\d)").expect("regex should be valid"),
        }
    })
}

fn labeled(re: &Regex, text: &str) -> Option<f64> {
    re.captures(text)?
        .get(1)?
        .as_str()
        .parse()
        .ok()
        .filter(|v: &f64| v.is_finite())
}

/// Parses "Kcal:718, E:28.0 g, K:98.0 g, Fe:22.0 g" from the attribute text of a tracked meal.
pub fn parse_nutrition(text: &str, policy: NutritionPolicy) -> Result<NutritionFacts, Error> {
    let labels = labels();
    let text = labels.decimal_comma.replace_all(text, "$1.$2");
    let facts = NutritionFacts {
        protein: labeled(&labels.protein, &text),
        fat: labeled(&labels.fat, &text),
        carbohydrate: labeled(&labels.carbohydrate, &text),
        calories: labeled(&labels.calories, &text),
    };
    match policy {
        NutritionPolicy::Strict if !facts.is_complete() => Err(Error::Nutrition(format!(
            "not all of Kcal, E, K, Fe found in {text:?}"
        ))),
        NutritionPolicy::Partial if facts.is_empty() => Err(Error::Nutrition(format!(
            "no nutrition label found in {text:?}"
        ))),
        _ => Ok(facts),
    }
}

pub fn nutrition_or_absent(text: &str, policy: NutritionPolicy) -> Option<NutritionFacts> {
    parse_nutrition(text, policy)
        .map_err(|e| log::debug!("{e}"))
        .ok()
}
