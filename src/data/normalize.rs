//! Conversion of raw FatSecret detail payloads into the canonical schema
//!
//! The raw payload is tolerated in whatever state it arrives: missing
//! servings, absent fields, and non-numeric nutrient strings all map to
//! defaults rather than errors.

use std::collections::BTreeMap;

use super::{NutritionFacts, OneOrMany, RawFood, Serving, SOURCE_NAME};

/// Name used when the payload carries no food name
pub const DEFAULT_FOOD_NAME: &str = "Unknown Food";

/// Serving size used when the serving carries no description
pub const DEFAULT_SERVING_SIZE: &str = "100g";

/// Converts a raw detail payload into a canonical nutrition record
///
/// Uses the first serving when several are present. A payload without
/// servings yields a zeroed record carrying only the food name. Macro
/// nutrients parse to 0.0 when absent or malformed; micronutrients are
/// included only for fields actually present in the serving.
pub fn standardize(food: &RawFood) -> NutritionFacts {
    let food_name = food
        .food_name
        .clone()
        .unwrap_or_else(|| DEFAULT_FOOD_NAME.to_string());

    let Some(serving) = first_serving(food) else {
        return NutritionFacts {
            food_name,
            source: SOURCE_NAME.to_string(),
            serving_size: DEFAULT_SERVING_SIZE.to_string(),
            calories: 0.0,
            protein: 0.0,
            fat: 0.0,
            carbohydrates: 0.0,
            micro_nutrients: BTreeMap::new(),
        };
    };

    let mut micro_nutrients = BTreeMap::new();
    for (name, raw) in [
        ("fiber", &serving.fiber),
        ("sugar", &serving.sugar),
        ("sodium", &serving.sodium),
        ("potassium", &serving.potassium),
        ("cholesterol", &serving.cholesterol),
        ("saturatedFat", &serving.saturated_fat),
    ] {
        if raw.is_some() {
            micro_nutrients.insert(name.to_string(), parse_nutrient(raw.as_deref()));
        }
    }

    NutritionFacts {
        food_name,
        source: SOURCE_NAME.to_string(),
        serving_size: serving
            .serving_description
            .clone()
            .unwrap_or_else(|| DEFAULT_SERVING_SIZE.to_string()),
        calories: parse_nutrient(serving.calories.as_deref()),
        protein: parse_nutrient(serving.protein.as_deref()),
        fat: parse_nutrient(serving.fat.as_deref()),
        carbohydrates: parse_nutrient(serving.carbohydrate.as_deref()),
        micro_nutrients,
    }
}

/// Picks the serving to normalize: the first of a list, or the sole one
fn first_serving(food: &RawFood) -> Option<&Serving> {
    match food.servings.as_ref()?.serving.as_ref()? {
        OneOrMany::One(serving) => Some(serving),
        OneOrMany::Many(servings) => servings.first(),
    }
}

/// Parses a numeric-as-string nutrient value, defaulting to 0.0
fn parse_nutrient(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok()).unwrap_or(0.0)
}
