//! Recipe calculator tools
//!
//! Form editing operations and the validate -> weigh -> aggregate pipeline.

use serde::Serialize;
use thiserror::Error;

use super::facts::render_nutrition_facts;
use crate::form::{parse_percentage, FormState, ValidationError};
use crate::models::{IngredientNutrition, NutritionTotals};
use crate::nutrition::{compute_weights, AggregateError, Aggregator};

/// Anything that stops a calculation. The message is meant for the user.
#[derive(Debug, Error)]
pub enum CalculationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Aggregate(#[from] AggregateError),
}

impl CalculationError {
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

/// One form row as shown to the user
#[derive(Debug, Serialize)]
pub struct IngredientRow {
    pub index: usize,
    pub name: String,
    pub percentage: Option<f64>,
}

/// Current form contents
#[derive(Debug, Serialize)]
pub struct FormSnapshot {
    pub ingredients: Vec<IngredientRow>,
    pub total_weight: f64,
    pub ignore_remaining: bool,
    pub total_percentage: f64,
    pub remaining_percentage: f64,
}

impl From<&FormState> for FormSnapshot {
    fn from(form: &FormState) -> Self {
        let total_percentage = form.total_percentage();
        Self {
            ingredients: form
                .ingredients
                .iter()
                .enumerate()
                .map(|(index, e)| IngredientRow {
                    index,
                    name: e.name.clone(),
                    percentage: e.percentage,
                })
                .collect(),
            total_weight: form.total_weight,
            ignore_remaining: form.ignore_remaining,
            total_percentage,
            remaining_percentage: (100.0 - total_percentage).max(0.0),
        }
    }
}

/// Response for form edits that may target a missing row
#[derive(Debug, Serialize)]
pub struct FormEditResponse {
    pub applied: bool,
    pub form: FormSnapshot,
}

/// Successful calculation
#[derive(Debug, Clone, Serialize)]
pub struct CalculationResult {
    /// The batch weight, shown as the label's serving size
    pub serving_size_grams: f64,
    pub totals: NutritionTotals,
    pub breakdown: Vec<IngredientNutrition>,
    pub label: String,
    pub calculated_at: String,
}

/// Form plus the latest successful calculation
#[derive(Debug, Default)]
pub struct CalculatorSession {
    pub form: FormState,
    pub last_result: Option<CalculationResult>,
}

impl CalculatorSession {
    pub fn new() -> Self {
        Self::default()
    }
}

// ============================================================================
// Form Tools
// ============================================================================

pub fn get_form(session: &CalculatorSession) -> FormSnapshot {
    FormSnapshot::from(&session.form)
}

pub fn add_ingredient(session: &mut CalculatorSession, name: Option<&str>, percentage: Option<&str>) -> Result<FormSnapshot, String> {
    // Parse first so a bad percentage doesn't leave a half-filled row behind
    let percentage = percentage
        .map(parse_percentage)
        .transpose()
        .map_err(|e| e.to_string())?
        .flatten();

    let index = session.form.add_ingredient();
    if let Some(name) = name {
        session.form.update_name(index, name);
    }
    session.form.ingredients[index].percentage = percentage;

    tracing::debug!(index, "Added ingredient row");
    Ok(get_form(session))
}

pub fn remove_ingredient(session: &mut CalculatorSession, index: usize) -> FormEditResponse {
    let applied = session.form.remove_ingredient(index);
    if !applied {
        tracing::debug!(index, "Ignoring removal of missing ingredient row");
    }
    FormEditResponse { applied, form: get_form(session) }
}

pub fn update_ingredient_name(session: &mut CalculatorSession, index: usize, name: &str) -> FormEditResponse {
    let applied = session.form.update_name(index, name);
    FormEditResponse { applied, form: get_form(session) }
}

pub fn update_ingredient_percentage(session: &mut CalculatorSession, index: usize, value: &str) -> Result<FormEditResponse, String> {
    let applied = session
        .form
        .update_percentage(index, value)
        .map_err(|e| e.to_string())?;
    Ok(FormEditResponse { applied, form: get_form(session) })
}

pub fn set_total_weight(session: &mut CalculatorSession, grams: f64) -> Result<FormSnapshot, String> {
    session.form.set_total_weight(grams).map_err(|e| e.to_string())?;
    Ok(get_form(session))
}

pub fn set_ignore_remaining(session: &mut CalculatorSession, ignore: bool) -> FormSnapshot {
    session.form.set_ignore_remaining(ignore);
    get_form(session)
}

pub fn reset_form(session: &mut CalculatorSession) -> FormSnapshot {
    *session = CalculatorSession::new();
    get_form(session)
}

// ============================================================================
// Calculation
// ============================================================================

/// Validate the form, weigh each ingredient, and aggregate its nutrition
pub async fn calculate(aggregator: &Aggregator, form: &FormState) -> Result<CalculationResult, CalculationError> {
    let ingredients = form.validate()?;
    let weights = compute_weights(&ingredients, form.total_weight);

    tracing::info!(
        ingredients = weights.len(),
        total_weight = form.total_weight,
        "Calculating recipe nutrition"
    );

    let aggregation = aggregator.aggregate(&weights).await?;
    let label = render_nutrition_facts(form.total_weight, &aggregation.totals);

    Ok(CalculationResult {
        serving_size_grams: form.total_weight,
        totals: aggregation.totals,
        breakdown: aggregation.breakdown,
        label,
        calculated_at: chrono::Utc::now().to_rfc3339(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_remaining_percentage() {
        let mut session = CalculatorSession::new();
        update_ingredient_name(&mut session, 0, "rice");
        update_ingredient_percentage(&mut session, 0, "60").unwrap();
        add_ingredient(&mut session, Some("beans"), Some("25")).unwrap();

        let snapshot = get_form(&session);
        assert_eq!(snapshot.ingredients.len(), 2);
        assert_eq!(snapshot.ingredients[1].index, 1);
        assert_eq!(snapshot.ingredients[1].name, "beans");
        assert_eq!(snapshot.total_percentage, 85.0);
        assert_eq!(snapshot.remaining_percentage, 15.0);
    }

    #[test]
    fn test_add_with_bad_percentage_adds_nothing() {
        let mut session = CalculatorSession::new();
        assert!(add_ingredient(&mut session, Some("beans"), Some("lots")).is_err());
        assert_eq!(session.form.ingredients.len(), 1);
    }

    #[test]
    fn test_remove_missing_row_reports_not_applied() {
        let mut session = CalculatorSession::new();
        let response = remove_ingredient(&mut session, 9);
        assert!(!response.applied);
        assert_eq!(response.form.ingredients.len(), 1);
    }

    #[test]
    fn test_reset_form() {
        let mut session = CalculatorSession::new();
        set_total_weight(&mut session, 500.0).unwrap();
        set_ignore_remaining(&mut session, true);
        let snapshot = reset_form(&mut session);
        assert_eq!(snapshot.total_weight, 100.0);
        assert!(!snapshot.ignore_remaining);
        assert!(session.last_result.is_none());
    }

    #[test]
    fn test_validation_message_passes_through() {
        let err = CalculationError::from(ValidationError::MissingName);
        assert_eq!(err.user_message(), "All ingredients must have a name");
    }
}
