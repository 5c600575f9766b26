use serde::Deserialize;
use serde_json::{Map, Value};

/// A recipe record exactly as the API returns it. Field names are the API's
/// (`idMeal`, `strMeal`, `strIngredient1`, ...); partial for search/filter
/// results, complete for lookups.
pub type RawMeal = Map<String, Value>;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryRecord {
    #[serde(rename = "strCategory")]
    pub name: String,
    #[serde(rename = "strCategoryDescription", default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoriesResponse {
    #[serde(default)]
    pub categories: Option<Vec<CategoryRecord>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MealsResponse {
    #[serde(default)]
    pub meals: Option<Vec<RawMeal>>,
}

impl MealsResponse {
    pub fn from_meals(meals: Vec<RawMeal>) -> Self {
        Self { meals: Some(meals) }
    }

    pub fn none() -> Self {
        Self { meals: None }
    }
}

/// Reads a string field, treating null and non-string values as absent.
pub fn str_field<'a>(raw: &'a RawMeal, key: &str) -> Option<&'a str> {
    raw.get(key).and_then(Value::as_str)
}

/// `idMeal` is a string in every API response, but tolerate a bare number.
pub fn meal_id(raw: &RawMeal) -> Option<String> {
    match raw.get("idMeal")? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
