//! Ingredient name to absolute weight mapping

use indexmap::IndexMap;
use serde::Serialize;

/// Absolute weight in grams per ingredient name
///
/// Keeps insertion order. Inserting a name that is already present replaces
/// its weight in place, so duplicates never merge and never reorder.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct WeightMap {
    entries: IndexMap<String, f64>,
}

impl WeightMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, name: String, grams: f64) {
        self.entries.insert(name, grams);
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(name, grams)| (name.as_str(), *grams))
    }

    /// Sum of all weights in grams
    pub fn total(&self) -> f64 {
        self.entries.values().sum()
    }
}

impl FromIterator<(String, f64)> for WeightMap {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
