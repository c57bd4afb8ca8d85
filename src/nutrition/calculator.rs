use super::NutrientAmounts;
use crate::foods::FoodTable;

/// Absolute nutrient amounts for `grams` of a food.
///
/// Per-100g values scale linearly. An unknown or missing key contributes
/// nothing rather than failing the request.
pub fn nutrients_for(foods: &FoodTable, food_key: Option<&str>, grams: f64) -> NutrientAmounts {
    match food_key.and_then(|key| foods.get(key)) {
        Some(entry) => entry.per_100g.scale(grams / 100.0),
        None => NutrientAmounts::zero(),
    }
}

/// Element-wise sum; an empty input yields all zeros
pub fn aggregate<'a, I>(items: I) -> NutrientAmounts
where
    I: IntoIterator<Item = &'a NutrientAmounts>,
{
    items.into_iter().sum()
}
