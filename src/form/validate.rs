//! Pre-calculation validation of the ingredient form

use thiserror::Error;

use crate::models::{IngredientEntry, ValidatedIngredient};

/// Why a form cannot be calculated. Only the first failing check is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Total weight must be greater than 0")]
    TotalWeightNotPositive,

    #[error("Please add at least one ingredient")]
    NoIngredients,

    #[error("All ingredients must have a name")]
    MissingName,

    #[error("All ingredients must have a percentage")]
    MissingPercentage,

    #[error("Total percentage must not be less than 100%")]
    PercentageBelowTotal,
}

/// Check the form and normalize its entries.
///
/// Checks run in a fixed order: total weight, entry count, names,
/// percentages, then the percentage sum (skipped when `ignore_remaining`).
pub fn validate(
    entries: &[IngredientEntry],
    total_weight: f64,
    ignore_remaining: bool,
) -> Result<Vec<ValidatedIngredient>, ValidationError> {
    // NaN fails this comparison too
    if !(total_weight > 0.0) {
        return Err(ValidationError::TotalWeightNotPositive);
    }

    if entries.is_empty() {
        return Err(ValidationError::NoIngredients);
    }

    if entries.iter().any(|e| !e.has_name()) {
        return Err(ValidationError::MissingName);
    }

    let validated: Vec<ValidatedIngredient> = entries
        .iter()
        .map(|e| {
            e.percentage
                .map(|percentage| ValidatedIngredient {
                    name: e.name.clone(),
                    percentage,
                })
                .ok_or(ValidationError::MissingPercentage)
        })
        .collect::<Result<_, _>>()?;

    let total_percentage: f64 = validated.iter().map(|i| i.percentage).sum();
    if !ignore_remaining && total_percentage < 100.0 {
        return Err(ValidationError::PercentageBelowTotal);
    }

    Ok(validated)
}
