//! Form session state
//!
//! Holds what the user has typed so far: ingredient rows, batch weight, and
//! the ignore-remaining flag.

use serde::Serialize;
use thiserror::Error;

use super::validate::{validate, ValidationError};
use crate::models::{IngredientEntry, ValidatedIngredient};

/// Batch weight a new form starts with, in grams
pub const DEFAULT_TOTAL_WEIGHT: f64 = 100.0;

/// Errors from editing the form
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    #[error("Invalid percentage '{0}': must be a number")]
    InvalidPercentage(String),

    #[error("Invalid total weight: must be a finite number")]
    InvalidTotalWeight,
}

/// Editable recipe form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormState {
    pub ingredients: Vec<IngredientEntry>,
    pub total_weight: f64,
    pub ignore_remaining: bool,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            ingredients: vec![IngredientEntry::default()],
            total_weight: DEFAULT_TOTAL_WEIGHT,
            ignore_remaining: false,
        }
    }
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a blank row and return its index
    pub fn add_ingredient(&mut self) -> usize {
        self.ingredients.push(IngredientEntry::default());
        self.ingredients.len() - 1
    }

    /// Remove the row at `index`. Returns false if there is no such row.
    pub fn remove_ingredient(&mut self, index: usize) -> bool {
        if index >= self.ingredients.len() {
            return false;
        }
        self.ingredients.remove(index);
        true
    }

    /// Set a row's name. Returns false if there is no such row.
    pub fn update_name(&mut self, index: usize, value: &str) -> bool {
        match self.ingredients.get_mut(index) {
            Some(entry) => {
                entry.name = value.to_string();
                true
            }
            None => false,
        }
    }

    /// Set a row's percentage from raw text input.
    ///
    /// Empty text clears the percentage. Returns `Ok(false)` if there is no
    /// such row; unparsable text leaves the row untouched.
    pub fn update_percentage(&mut self, index: usize, value: &str) -> Result<bool, FormError> {
        let percentage = parse_percentage(value)?;
        match self.ingredients.get_mut(index) {
            Some(entry) => {
                entry.percentage = percentage;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn set_total_weight(&mut self, grams: f64) -> Result<(), FormError> {
        if !grams.is_finite() {
            return Err(FormError::InvalidTotalWeight);
        }
        self.total_weight = grams;
        Ok(())
    }

    pub fn set_ignore_remaining(&mut self, ignore: bool) {
        self.ignore_remaining = ignore;
    }

    /// Sum of the percentages entered so far, ignoring blank ones
    pub fn total_percentage(&self) -> f64 {
        self.ingredients.iter().filter_map(|e| e.percentage).sum()
    }

    pub fn validate(&self) -> Result<Vec<ValidatedIngredient>, ValidationError> {
        validate(&self.ingredients, self.total_weight, self.ignore_remaining)
    }
}

/// Parse raw percentage text; empty text means "not entered"
pub fn parse_percentage(value: &str) -> Result<Option<f64>, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<f64>() {
        Ok(p) if p.is_finite() => Ok(Some(p)),
        _ => Err(FormError::InvalidPercentage(trimmed.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_form_has_one_blank_row() {
        let form = FormState::new();
        assert_eq!(form.ingredients.len(), 1);
        assert_eq!(form.ingredients[0], IngredientEntry::default());
        assert_eq!(form.total_weight, DEFAULT_TOTAL_WEIGHT);
        assert!(!form.ignore_remaining);
    }

    #[test]
    fn test_add_and_remove() {
        let mut form = FormState::new();
        assert_eq!(form.add_ingredient(), 1);
        assert_eq!(form.add_ingredient(), 2);
        form.update_name(1, "beans");

        assert!(form.remove_ingredient(0));
        assert_eq!(form.ingredients.len(), 2);
        assert_eq!(form.ingredients[0].name, "beans");
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let mut form = FormState::new();
        assert!(!form.remove_ingredient(5));
        assert_eq!(form.ingredients.len(), 1);
    }

    #[test]
    fn test_update_out_of_range_is_noop() {
        let mut form = FormState::new();
        assert!(!form.update_name(3, "rice"));
        assert_eq!(form.update_percentage(3, "10"), Ok(false));
        assert_eq!(form, FormState::new());
    }

    #[test]
    fn test_empty_percentage_is_absent_not_zero() {
        let mut form = FormState::new();
        assert_eq!(form.update_percentage(0, "25"), Ok(true));
        assert_eq!(form.ingredients[0].percentage, Some(25.0));

        assert_eq!(form.update_percentage(0, ""), Ok(true));
        assert_eq!(form.ingredients[0].percentage, None);

        assert_eq!(form.update_percentage(0, "0"), Ok(true));
        assert_eq!(form.ingredients[0].percentage, Some(0.0));
    }

    #[test]
    fn test_invalid_percentage_leaves_row_untouched() {
        let mut form = FormState::new();
        form.update_percentage(0, "40").unwrap();
        assert_eq!(
            form.update_percentage(0, "forty"),
            Err(FormError::InvalidPercentage("forty".to_string()))
        );
        assert_eq!(form.ingredients[0].percentage, Some(40.0));
        assert!(form.update_percentage(0, "inf").is_err());
    }

    #[test]
    fn test_total_weight() {
        let mut form = FormState::new();
        form.set_total_weight(250.0).unwrap();
        assert_eq!(form.total_weight, 250.0);
        assert_eq!(form.set_total_weight(f64::NAN), Err(FormError::InvalidTotalWeight));
        // Non-positive weights are accepted here and rejected by validation
        form.set_total_weight(0.0).unwrap();
        assert_eq!(form.validate(), Err(ValidationError::TotalWeightNotPositive));
    }

    #[test]
    fn test_validate_uses_form_flags() {
        let mut form = FormState::new();
        form.update_name(0, "rice");
        form.update_percentage(0, "70").unwrap();
        assert_eq!(form.validate(), Err(ValidationError::PercentageBelowTotal));

        form.set_ignore_remaining(true);
        assert_eq!(form.validate().unwrap().len(), 1);
        assert_eq!(form.total_percentage(), 70.0);
    }
}
