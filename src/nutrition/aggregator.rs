//! Weight computation and nutrition aggregation
//!
//! Converts validated percentages into grams, looks every ingredient up
//! concurrently, and folds the results into recipe totals.

use std::sync::Arc;

use futures_util::future::try_join_all;
use serde::Serialize;
use thiserror::Error;

use super::client::{LookupError, NutritionLookup};
use super::query::{format_query, ingredient_from_query};
use crate::models::{IngredientNutrition, NutritionRecord, NutritionTotals, ValidatedIngredient, WeightMap};

/// Aggregation failure. Either variant discards every other lookup result.
#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("Nutrition data not found. Please check the ingredient name: {ingredient}.")]
    NotFound {
        ingredient: String,
        #[source]
        source: LookupError,
    },

    #[error("Error fetching nutrition data. Please check the API.")]
    Lookup(#[source] LookupError),
}

impl From<LookupError> for AggregateError {
    fn from(err: LookupError) -> Self {
        match &err {
            LookupError::NotFound { query } => {
                let ingredient = ingredient_from_query(query).unwrap_or(query.as_str()).to_string();
                AggregateError::NotFound { ingredient, source: err }
            }
            _ => AggregateError::Lookup(err),
        }
    }
}

/// Totals plus the per-ingredient records they were folded from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregation {
    pub totals: NutritionTotals,
    pub breakdown: Vec<IngredientNutrition>,
}

/// Grams of each ingredient in a batch of `total_weight` grams
///
/// Later entries with a repeated name replace the earlier weight.
pub fn compute_weights(entries: &[ValidatedIngredient], total_weight: f64) -> WeightMap {
    entries
        .iter()
        .map(|e| (e.name.clone(), (e.percentage / 100.0) * total_weight))
        .collect()
}

/// Looks up and sums nutrition for a set of weighed ingredients
#[derive(Clone)]
pub struct Aggregator {
    lookup: Arc<dyn NutritionLookup>,
}

impl Aggregator {
    pub fn new<L>(lookup: L) -> Self
    where
        L: NutritionLookup + 'static,
    {
        Self {
            lookup: Arc::new(lookup),
        }
    }

    /// Nutrition for `grams` of one ingredient; exactly one lookup
    pub async fn fetch_nutrition(&self, ingredient: &str, grams: f64) -> Result<NutritionRecord, LookupError> {
        let query = format_query(ingredient, grams);
        let item = self.lookup.lookup(&query).await?;
        Ok(item.into_record())
    }

    /// Look up every ingredient concurrently and fold the results.
    ///
    /// All lookups are started together. The first failure aborts the whole
    /// aggregation. Results fold in map order, so the totals' micronutrient
    /// strings come from the last ingredient in the map.
    pub async fn aggregate(&self, weights: &WeightMap) -> Result<Aggregation, AggregateError> {
        let lookups = weights.iter().map(|(name, grams)| async move {
            let nutrition = self.fetch_nutrition(name, grams).await?;
            Ok::<_, LookupError>(IngredientNutrition {
                name: name.to_string(),
                weight_grams: grams,
                nutrition,
            })
        });

        let breakdown = try_join_all(lookups).await.map_err(|e| {
            tracing::error!(error = %e, "Error fetching nutrition data");
            AggregateError::from(e)
        })?;

        let totals: NutritionTotals = breakdown.iter().map(|i| i.nutrition.clone()).sum();

        tracing::info!(
            ingredients = breakdown.len(),
            calories = totals.calories,
            "Aggregated recipe nutrition"
        );

        Ok(Aggregation { totals, breakdown })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NOT_AVAILABLE;
    use crate::nutrition::client::FoodItem;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Serves canned items keyed by query and records what was asked
    #[derive(Default)]
    struct FakeLookup {
        items: HashMap<String, FoodItem>,
        seen: Arc<Mutex<Vec<String>>>,
    }

    impl FakeLookup {
        fn with(mut self, query: &str, calories: f64, protein: f64, vitamin_a: &str) -> Self {
            self.items.insert(
                query.to_string(),
                FoodItem {
                    nf_calories: Some(calories),
                    nf_protein: Some(protein),
                    nf_vitamin_a: Some(serde_json::Value::String(vitamin_a.to_string())),
                    ..FoodItem::default()
                },
            );
            self
        }
    }

    #[async_trait]
    impl NutritionLookup for FakeLookup {
        async fn lookup(&self, query: &str) -> Result<FoodItem, LookupError> {
            self.seen.lock().unwrap().push(query.to_string());
            self.items.get(query).cloned().ok_or_else(|| LookupError::NotFound {
                query: query.to_string(),
            })
        }
    }

    fn ingredient(name: &str, percentage: f64) -> ValidatedIngredient {
        ValidatedIngredient {
            name: name.to_string(),
            percentage,
        }
    }

    #[test]
    fn test_compute_weights_example() {
        let weights = compute_weights(&[ingredient("A", 60.0), ingredient("B", 40.0)], 200.0);
        assert_eq!(weights.get("A"), Some(120.0));
        assert_eq!(weights.get("B"), Some(80.0));
    }

    #[test]
    fn test_weights_sum_to_total_at_hundred_percent() {
        let entries = vec![
            ingredient("flour", 33.3),
            ingredient("water", 33.3),
            ingredient("salt", 0.4),
            ingredient("yeast", 33.0),
        ];
        let weights = compute_weights(&entries, 737.0);
        assert!((weights.total() - 737.0).abs() < 1e-9);
    }

    #[test]
    fn test_duplicate_names_last_weight_wins() {
        let weights = compute_weights(&[ingredient("rice", 60.0), ingredient("rice", 40.0)], 100.0);
        assert_eq!(weights.len(), 1);
        assert_eq!(weights.get("rice"), Some(40.0));
    }

    #[test]
    fn test_names_differing_by_whitespace_stay_separate() {
        let weights = compute_weights(&[ingredient("rice", 60.0), ingredient("rice ", 40.0)], 100.0);
        assert_eq!(weights.len(), 2);
        assert_eq!(weights.get("rice"), Some(60.0));
        assert_eq!(weights.get("rice "), Some(40.0));
    }

    #[tokio::test]
    async fn test_fetch_nutrition_query_format() {
        let fake = FakeLookup::default().with("120g chicken", 200.0, 30.0, "2%");
        let seen = fake.seen.clone();
        let aggregator = Aggregator::new(fake);

        let record = aggregator.fetch_nutrition("chicken", 120.0).await.unwrap();
        assert_eq!(record.calories, 200.0);
        assert_eq!(record.vitamin_a, "2%");
        assert_eq!(*seen.lock().unwrap(), vec!["120g chicken".to_string()]);
    }

    #[tokio::test]
    async fn test_aggregate_single_ingredient_matches_record() {
        let aggregator = Aggregator::new(FakeLookup::default().with("100g rice", 130.0, 2.7, "1%"));
        let weights = compute_weights(&[ingredient("rice", 100.0)], 100.0);

        let result = aggregator.aggregate(&weights).await.unwrap();
        let record = aggregator.fetch_nutrition("rice", 100.0).await.unwrap();
        assert_eq!(result.totals, record);
        assert_eq!(result.breakdown.len(), 1);
    }

    #[tokio::test]
    async fn test_aggregate_sums_pairwise() {
        let aggregator = Aggregator::new(
            FakeLookup::default()
                .with("100g A", 100.0, 5.0, "10%")
                .with("100g B", 50.0, 2.0, "20%"),
        );
        let weights = compute_weights(&[ingredient("A", 50.0), ingredient("B", 50.0)], 200.0);

        let result = aggregator.aggregate(&weights).await.unwrap();
        assert_eq!(result.totals.calories, 150.0);
        assert_eq!(result.totals.protein, 7.0);
        // Micronutrients collapse to the last ingredient's values
        assert_eq!(result.totals.vitamin_a, "20%");
        assert_eq!(result.breakdown[0].nutrition.vitamin_a, "10%");
    }

    #[tokio::test]
    async fn test_aggregate_empty_map() {
        let aggregator = Aggregator::new(FakeLookup::default());
        let result = aggregator.aggregate(&WeightMap::new()).await.unwrap();
        assert_eq!(result.totals, NutritionRecord::empty());
        assert_eq!(result.totals.iron, NOT_AVAILABLE);
        assert!(result.breakdown.is_empty());
    }

    #[tokio::test]
    async fn test_one_failure_aborts_everything() {
        let aggregator = Aggregator::new(FakeLookup::default().with("50g rice", 65.0, 1.3, "N/A"));
        let weights = compute_weights(&[ingredient("rice", 50.0), ingredient("unicorn steak", 50.0)], 100.0);

        let err = aggregator.aggregate(&weights).await.unwrap_err();
        match &err {
            AggregateError::NotFound { ingredient, .. } => assert_eq!(ingredient, "unicorn steak"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(
            err.to_string(),
            "Nutrition data not found. Please check the ingredient name: unicorn steak."
        );
    }

    #[test]
    fn test_other_failures_are_generic() {
        let err = AggregateError::from(LookupError::Status {
            status: 401,
            query: "10g rice".to_string(),
        });
        assert!(matches!(err, AggregateError::Lookup(_)));
        assert_eq!(err.to_string(), "Error fetching nutrition data. Please check the API.");
    }
}
