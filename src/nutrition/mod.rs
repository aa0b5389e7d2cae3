//! Nutrition lookup and aggregation module
//!
//! Turns weighed ingredients into recipe nutrition totals via an external
//! lookup service.

pub mod aggregator;
pub mod client;
pub mod query;

pub use aggregator::{compute_weights, AggregateError, Aggregation, Aggregator};
pub use client::{FoodItem, LookupError, NutritionLookup, NutritionixClient};
pub use query::{format_query, ingredient_from_query};
