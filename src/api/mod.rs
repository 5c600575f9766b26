mod client;
pub mod dto;
#[cfg(test)]
pub mod fake;

pub use client::MealDbClient;
pub use dto::{CategoriesResponse, CategoryRecord, MealsResponse, RawMeal};

use async_trait::async_trait;

use crate::error::ApiError;

/// The four TheMealDB endpoints the browser consumes.
#[async_trait]
pub trait RecipeApi: Send + Sync {
    async fn categories(&self) -> Result<CategoriesResponse, ApiError>;
    async fn search(&self, text: &str) -> Result<MealsResponse, ApiError>;
    async fn filter_by_category(&self, category: &str) -> Result<MealsResponse, ApiError>;
    async fn lookup(&self, id: &str) -> Result<MealsResponse, ApiError>;
}
