pub mod dto;
pub mod ingredients;
pub mod services;

pub use dto::{Category, Filter, Ingredient, Meal};
pub use services::{load_categories, load_meals, FanOutPolicy, LoadLimits, MealBatch};
