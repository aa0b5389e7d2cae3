//! Nutrition lookup transport
//!
//! `NutritionLookup` is the seam the aggregator talks to; `NutritionixClient`
//! is the HTTP implementation against the Nutritionix natural nutrients API.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::config::NutritionixConfig;
use crate::models::{NutritionRecord, NOT_AVAILABLE};

/// Lookup failure for a single query
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("No nutrition data found for query '{query}'")]
    NotFound { query: String },

    #[error("Nutrition API returned status {status} for query '{query}'")]
    Status { status: u16, query: String },

    #[error("Nutrition API returned no foods for query '{query}'")]
    NoFoods { query: String },

    #[error("Nutrition API request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// One food item as returned by the lookup service.
///
/// Every field is optional; the service omits or nulls nutrients it does not
/// know. Micronutrients may come back as numbers or strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FoodItem {
    #[serde(default)]
    pub food_name: Option<String>,
    #[serde(default)]
    pub nf_calories: Option<f64>,
    #[serde(default)]
    pub nf_protein: Option<f64>,
    #[serde(default)]
    pub nf_total_fat: Option<f64>,
    #[serde(default)]
    pub nf_saturated_fat: Option<f64>,
    #[serde(default)]
    pub nf_trans_fat: Option<f64>,
    #[serde(default)]
    pub nf_total_carbohydrate: Option<f64>,
    #[serde(default)]
    pub nf_dietary_fiber: Option<f64>,
    #[serde(default)]
    pub nf_sugars: Option<f64>,
    #[serde(default)]
    pub nf_cholesterol: Option<f64>,
    #[serde(default)]
    pub nf_sodium: Option<f64>,
    #[serde(default)]
    pub nf_vitamin_a: Option<Value>,
    #[serde(default)]
    pub nf_vitamin_c: Option<Value>,
    #[serde(default)]
    pub nf_calcium: Option<Value>,
    #[serde(default)]
    pub nf_iron: Option<Value>,
}

impl FoodItem {
    /// Convert to a record, defaulting missing numbers to 0 and missing
    /// micronutrients to "N/A"
    pub fn into_record(self) -> NutritionRecord {
        NutritionRecord {
            calories: self.nf_calories.unwrap_or(0.0),
            protein: self.nf_protein.unwrap_or(0.0),
            total_fat: self.nf_total_fat.unwrap_or(0.0),
            saturated_fat: self.nf_saturated_fat.unwrap_or(0.0),
            trans_fat: self.nf_trans_fat.unwrap_or(0.0),
            total_carbohydrate: self.nf_total_carbohydrate.unwrap_or(0.0),
            dietary_fiber: self.nf_dietary_fiber.unwrap_or(0.0),
            sugars: self.nf_sugars.unwrap_or(0.0),
            cholesterol: self.nf_cholesterol.unwrap_or(0.0),
            sodium: self.nf_sodium.unwrap_or(0.0),
            vitamin_a: micronutrient_display(self.nf_vitamin_a),
            vitamin_c: micronutrient_display(self.nf_vitamin_c),
            calcium: micronutrient_display(self.nf_calcium),
            iron: micronutrient_display(self.nf_iron),
        }
    }
}

/// Empty strings and zeros count as "not reported"
fn micronutrient_display(value: Option<Value>) -> String {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => s,
        Some(Value::Number(n)) => match n.as_f64() {
            Some(v) if v != 0.0 => v.to_string(),
            _ => NOT_AVAILABLE.to_string(),
        },
        _ => NOT_AVAILABLE.to_string(),
    }
}

#[derive(Debug, Deserialize)]
struct NutrientsResponse {
    #[serde(default)]
    foods: Vec<FoodItem>,
}

/// Resolves a natural-language query into the first matching food item
#[async_trait]
pub trait NutritionLookup: Send + Sync {
    async fn lookup(&self, query: &str) -> Result<FoodItem, LookupError>;
}

/// Nutritionix HTTP client
#[derive(Debug, Clone)]
pub struct NutritionixClient {
    http: reqwest::Client,
    config: NutritionixConfig,
}

impl NutritionixClient {
    pub fn new(config: NutritionixConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &NutritionixConfig {
        &self.config
    }
}

#[async_trait]
impl NutritionLookup for NutritionixClient {
    async fn lookup(&self, query: &str) -> Result<FoodItem, LookupError> {
        tracing::debug!(query, "Requesting nutrients");

        let response = self
            .http
            .post(&self.config.endpoint)
            .header("x-app-id", &self.config.app_id)
            .header("x-app-key", &self.config.app_key)
            .json(&json!({ "query": query }))
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(LookupError::NotFound {
                query: query.to_string(),
            });
        }
        if !status.is_success() {
            return Err(LookupError::Status {
                status: status.as_u16(),
                query: query.to_string(),
            });
        }

        let body: NutrientsResponse = response.json().await?;
        body.foods
            .into_iter()
            .next()
            .ok_or_else(|| LookupError::NoFoods {
                query: query.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default() {
        let item: FoodItem = serde_json::from_value(json!({ "food_name": "mystery" })).unwrap();
        let record = item.into_record();
        assert_eq!(record, NutritionRecord::empty());
    }

    #[test]
    fn test_null_fields_default() {
        let item: FoodItem = serde_json::from_value(json!({
            "nf_calories": 120.5,
            "nf_trans_fat": null,
            "nf_vitamin_a": null
        }))
        .unwrap();
        let record = item.into_record();
        assert_eq!(record.calories, 120.5);
        assert_eq!(record.trans_fat, 0.0);
        assert_eq!(record.vitamin_a, NOT_AVAILABLE);
    }

    #[test]
    fn test_micronutrient_display() {
        assert_eq!(micronutrient_display(Some(json!("15%"))), "15%");
        assert_eq!(micronutrient_display(Some(json!(12.5))), "12.5");
        assert_eq!(micronutrient_display(Some(json!(3))), "3");
        assert_eq!(micronutrient_display(Some(json!(12.0))), "12");
        assert_eq!(micronutrient_display(Some(json!(0.0))), NOT_AVAILABLE);
        assert_eq!(micronutrient_display(Some(json!(0))), NOT_AVAILABLE);
        assert_eq!(micronutrient_display(Some(json!(""))), NOT_AVAILABLE);
        assert_eq!(micronutrient_display(None), NOT_AVAILABLE);
    }

    #[test]
    fn test_full_item() {
        let item: FoodItem = serde_json::from_value(json!({
            "food_name": "chicken breast",
            "nf_calories": 198.0,
            "nf_protein": 37.2,
            "nf_total_fat": 4.3,
            "nf_saturated_fat": 1.2,
            "nf_total_carbohydrate": 0.0,
            "nf_cholesterol": 104.0,
            "nf_sodium": 89.0,
            "nf_iron": "6%"
        }))
        .unwrap();
        let record = item.into_record();
        assert_eq!(record.protein, 37.2);
        assert_eq!(record.cholesterol, 104.0);
        assert_eq!(record.iron, "6%");
        assert_eq!(record.calcium, NOT_AVAILABLE);
    }
}
