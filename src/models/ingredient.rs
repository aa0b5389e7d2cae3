//! Ingredient entries as typed into the form

use serde::{Deserialize, Serialize};

/// One row of user input
///
/// `percentage` is `None` until the user types something; that is distinct
/// from an explicit zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngredientEntry {
    pub name: String,
    pub percentage: Option<f64>,
}

impl IngredientEntry {
    pub fn new(name: impl Into<String>, percentage: Option<f64>) -> Self {
        Self {
            name: name.into(),
            percentage,
        }
    }

    /// Whether the entry has a usable name
    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

/// An entry that passed validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatedIngredient {
    pub name: String,
    pub percentage: f64,
}
