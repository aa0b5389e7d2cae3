//! Shared nutrition data structure
//!
//! Used for per-ingredient lookup results and for recipe totals.

use serde::{Deserialize, Serialize};

/// Marker used for micronutrients the lookup service did not report
pub const NOT_AVAILABLE: &str = "N/A";

/// Nutritional information for one ingredient at a specific weight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionRecord {
    pub calories: f64,
    pub protein: f64,            // grams
    pub total_fat: f64,          // grams
    pub saturated_fat: f64,      // grams
    pub trans_fat: f64,          // grams
    pub total_carbohydrate: f64, // grams
    pub dietary_fiber: f64,      // grams
    pub sugars: f64,             // grams
    pub cholesterol: f64,        // milligrams
    pub sodium: f64,             // milligrams
    pub vitamin_a: String,
    pub vitamin_c: String,
    pub calcium: String,
    pub iron: String,
}

/// Recipe totals share the record's shape
pub type NutritionTotals = NutritionRecord;

impl NutritionRecord {
    /// All numeric fields zero, micronutrients "N/A"
    pub fn empty() -> Self {
        Self {
            calories: 0.0,
            protein: 0.0,
            total_fat: 0.0,
            saturated_fat: 0.0,
            trans_fat: 0.0,
            total_carbohydrate: 0.0,
            dietary_fiber: 0.0,
            sugars: 0.0,
            cholesterol: 0.0,
            sodium: 0.0,
            vitamin_a: NOT_AVAILABLE.to_string(),
            vitamin_c: NOT_AVAILABLE.to_string(),
            calcium: NOT_AVAILABLE.to_string(),
            iron: NOT_AVAILABLE.to_string(),
        }
    }

    /// Fold another record into this one.
    ///
    /// Numeric fields are summed. The micronutrient strings are replaced by
    /// `other`'s, so a fold over many records keeps only the last one's.
    /// Use the per-ingredient breakdown when the individual values matter.
    pub fn fold(self, other: NutritionRecord) -> Self {
        Self {
            calories: self.calories + other.calories,
            protein: self.protein + other.protein,
            total_fat: self.total_fat + other.total_fat,
            saturated_fat: self.saturated_fat + other.saturated_fat,
            trans_fat: self.trans_fat + other.trans_fat,
            total_carbohydrate: self.total_carbohydrate + other.total_carbohydrate,
            dietary_fiber: self.dietary_fiber + other.dietary_fiber,
            sugars: self.sugars + other.sugars,
            cholesterol: self.cholesterol + other.cholesterol,
            sodium: self.sodium + other.sodium,
            vitamin_a: other.vitamin_a,
            vitamin_c: other.vitamin_c,
            calcium: other.calcium,
            iron: other.iron,
        }
    }
}

impl Default for NutritionRecord {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::iter::Sum for NutritionRecord {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(NutritionRecord::empty(), NutritionRecord::fold)
    }
}

/// Nutrition for one ingredient of a calculated recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientNutrition {
    pub name: String,
    pub weight_grams: f64,
    pub nutrition: NutritionRecord,
}
