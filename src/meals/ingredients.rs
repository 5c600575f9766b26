use super::dto::Ingredient;
use crate::api::dto::{str_field, RawMeal};

/// The API numbers ingredient slots `strIngredient1` to `strIngredient20`.
pub const MAX_INGREDIENTS: usize = 20;

pub const FALLBACK_MEASURE: &str = "to taste";

/// Flattens the numbered ingredient/measure pairs of a record, in slot order.
///
/// A slot is kept only when its name is non-blank. A missing or blank measure
/// is replaced by [`FALLBACK_MEASURE`].
pub fn extract_ingredients(raw: &RawMeal) -> Vec<Ingredient> {
    (1..=MAX_INGREDIENTS)
        .filter_map(|n| {
            let name = str_field(raw, &format!("strIngredient{n}"))?;
            if name.trim().is_empty() {
                return None;
            }
            let measure = str_field(raw, &format!("strMeasure{n}"))
                .filter(|m| !m.trim().is_empty())
                .unwrap_or(FALLBACK_MEASURE);
            Some(Ingredient {
                name: name.to_string(),
                measure: measure.to_string(),
            })
        })
        .collect()
}
