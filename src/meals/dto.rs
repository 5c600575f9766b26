use super::ingredients::extract_ingredients;
use crate::api::dto::{meal_id, str_field, CategoryRecord, RawMeal};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    pub name: String,
    pub measure: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meal {
    pub id: String,
    pub name: String,
    pub thumbnail: String,
    pub category: String,
    pub area: String,
    pub instructions: String,
    pub tags: Option<String>,
    pub youtube: Option<String>,
    pub source: Option<String>,
    pub ingredients: Vec<Ingredient>,
}

impl Meal {
    /// Builds a meal from a full lookup record. Returns `None` when the record
    /// carries no `idMeal`.
    pub fn from_record(raw: &RawMeal) -> Option<Self> {
        let text = |key: &str| str_field(raw, key).unwrap_or_default().to_string();
        let optional = |key: &str| {
            str_field(raw, key)
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        Some(Self {
            id: meal_id(raw)?,
            name: text("strMeal"),
            thumbnail: text("strMealThumb"),
            category: text("strCategory"),
            area: text("strArea"),
            instructions: text("strInstructions"),
            tags: optional("strTags"),
            youtube: optional("strYoutube"),
            source: optional("strSource"),
            ingredients: extract_ingredients(raw),
        })
    }

    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .as_deref()
            .map(|tags| {
                tags.split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// What the listing is narrowed by. Search text and category are exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    None,
    Search(String),
    Category(String),
}

impl Filter {
    /// A search filter for non-blank text, `Filter::None` otherwise.
    pub fn search(text: &str) -> Self {
        let text = text.trim();
        if text.is_empty() {
            Self::None
        } else {
            Self::Search(text.to_string())
        }
    }

    pub fn query(&self) -> Option<&str> {
        match self {
            Self::Search(text) => Some(text),
            _ => None,
        }
    }

    pub fn category(&self) -> Option<&str> {
        match self {
            Self::Category(name) => Some(name),
            _ => None,
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, Self::None)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub description: Option<String>,
}

impl From<CategoryRecord> for Category {
    fn from(r: CategoryRecord) -> Self {
        Self {
            name: r.name,
            description: r.description.filter(|d| !d.trim().is_empty()),
        }
    }
}
