//! Data models
//!
//! Rust structs for form input, computed weights, and nutrition results.

mod ingredient;
mod nutrition;
mod weights;

pub use ingredient::{IngredientEntry, ValidatedIngredient};
pub use nutrition::{IngredientNutrition, NutritionRecord, NutritionTotals, NOT_AVAILABLE};
pub use weights::WeightMap;
